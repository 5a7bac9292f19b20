pub mod binaural;
pub mod modes;
pub mod wav;

pub use binaural::{normalize_peak, synthesize, ResonanceParams, StereoBuffer};
pub use modes::WaveMode;
