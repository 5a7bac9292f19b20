use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::scoring::{Ratings, Score};

/// Per-user session state, owned by the host and threaded through every handler.
#[derive(Debug, Clone, PartialEq)]
pub struct EchoSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    /// Journal entries written during this session.
    pub streak: u32,
    pub ratings: Option<Ratings>,
    pub score: Option<Score>,
    /// Last synthesized tone as WAV bytes.
    pub tone: Option<Vec<u8>>,
    pub insight: Option<String>,
}

impl EchoSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            streak: 0,
            ratings: None,
            score: None,
            tone: None,
            insight: None,
        }
    }

    /// Ratings used by handlers that run before the sliders were submitted.
    pub fn ratings_or_default(&self) -> Ratings {
        self.ratings.unwrap_or_default()
    }
}

impl Default for EchoSession {
    fn default() -> Self {
        Self::new()
    }
}
