//! Core of the Consciousness Echo wellness demo: slider ratings become an
//! awareness proxy, a button renders a binaural tone, and journal notes land in
//! a flat CSV log with a trend of post-session scores.
//!
//! The host UI owns an [`EchoSession`] and passes it through the handlers on
//! [`EchoCore`]. Nothing here keeps global state.

pub mod audio;
pub mod error;
pub mod journal;
pub mod oracle;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod utils;

pub use audio::{synthesize, ResonanceParams, StereoBuffer, WaveMode};
pub use error::EchoError;
pub use journal::{render_trend, LogRow, LogTable, SessionLog, TrendSeries};
pub use oracle::{ApiKey, InsightRequest, OracleClient};
pub use scoring::{Ratings, Score, ScoringConfig, StateScorer};
pub use session::{EchoCore, EchoSession, Notice, NoticeLevel, Outcome};
pub use settings::{EchoSettings, OracleSettings, SettingsStore, WaveSettings};
pub use utils::init_logging;
