pub mod config;
pub mod ratings;
pub mod scorer;

pub use config::ScoringConfig;
pub use ratings::Ratings;
pub use scorer::{Score, StateScorer};
