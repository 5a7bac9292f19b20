use crate::scoring::{Ratings, Score};

/// Inputs for the reflective insight prompt.
#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub ratings: Ratings,
    pub score: Option<Score>,
    /// Voice-note transcript. Empty when the user has not recorded anything.
    pub transcript: String,
}

impl InsightRequest {
    pub fn new(ratings: Ratings, score: Option<Score>, transcript: Option<&str>) -> Self {
        Self {
            ratings,
            score,
            transcript: transcript.unwrap_or_default().trim().to_string(),
        }
    }

    pub fn prompt(&self) -> String {
        let r = &self.ratings;
        let mut prompt = format!(
            "You are a gentle meditation guide. A user rated their current state on a 1-10 scale: \
             presence {}, emotion {}, logic {}, meta-awareness {}.",
            r.presence, r.emotion, r.logic, r.meta_awareness
        );

        if let Some(score) = &self.score {
            prompt.push_str(&format!(
                " Their awareness index is {:.1} with coherence {:.2}.",
                score.awareness_proxy, score.coherence
            ));
        }

        if !self.transcript.is_empty() {
            prompt.push_str(&format!(
                " They also shared this reflection: \"{}\".",
                self.transcript
            ));
        }

        prompt.push_str(
            " Offer a short, grounded insight (3-4 sentences) and one practice for the next few minutes.",
        );
        prompt
    }
}
