use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::{Ratings, ScoringConfig};

/// Awareness proxy ("Φ") and coherence derived from one set of ratings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Nominally 0-100, but the noise term can push it outside that range.
    pub awareness_proxy: f64,
    /// In (0, 1]; exactly 1.0 when all four ratings agree.
    pub coherence: f64,
}

#[derive(Debug, Clone, Default)]
pub struct StateScorer {
    config: ScoringConfig,
}

impl StateScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a rating vector. Each call draws fresh noise from `rng`.
    pub fn score<R: Rng + ?Sized>(&self, ratings: &Ratings, rng: &mut R) -> Score {
        Score {
            awareness_proxy: ratings.mean() * self.config.scale + self.noise(rng),
            coherence: self.coherence(ratings),
        }
    }

    /// 1 / (cv + 1) where cv is stddev over (mean + epsilon).
    pub fn coherence(&self, ratings: &Ratings) -> f64 {
        let variation = ratings.std_dev() / (ratings.mean() + self.config.epsilon);
        1.0 / (variation + 1.0)
    }

    /// Post-session value recorded next to a pre score in the journal.
    pub fn post_score<R: Rng + ?Sized>(&self, pre: f64, rng: &mut R) -> f64 {
        pre * self.config.post_multiplier + self.noise(rng)
    }

    fn noise<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        z * self.config.noise_std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn identical_ratings_are_fully_coherent() {
        let scorer = StateScorer::default();
        for v in 1..=10 {
            let ratings = Ratings::new(v, v, v, v);
            assert_eq!(scorer.coherence(&ratings), 1.0);
        }
    }

    #[test]
    fn spread_ratings_lower_coherence() {
        let scorer = StateScorer::default();
        let c = scorer.coherence(&Ratings::new(1, 10, 1, 10));
        // mean 5.5, stddev 4.5
        assert_relative_eq!(c, 1.0 / (4.5 / (5.5 + 1e-6) + 1.0), epsilon = 1e-12);
        assert!(c > 0.0 && c < 1.0);
    }

    #[test]
    fn awareness_noise_matches_distribution() {
        let scorer = StateScorer::default();
        let mut rng = StdRng::seed_from_u64(7);
        let ratings = Ratings::new(5, 5, 5, 5);
        let draws: Vec<f64> = (0..1000)
            .map(|_| scorer.score(&ratings, &mut rng).awareness_proxy)
            .collect();

        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / draws.len() as f64;

        // standard error of the mean is 5 / sqrt(1000) ~= 0.16
        assert!((mean - 50.0).abs() < 1.0, "mean was {mean}");
        assert!((var.sqrt() - 5.0).abs() < 0.5, "stddev was {}", var.sqrt());
    }

    #[test]
    fn repeated_scores_differ() {
        let scorer = StateScorer::default();
        let mut rng = StdRng::seed_from_u64(1);
        let ratings = Ratings::new(7, 7, 7, 7);
        let a = scorer.score(&ratings, &mut rng);
        let b = scorer.score(&ratings, &mut rng);
        assert_ne!(a.awareness_proxy, b.awareness_proxy);
        assert_eq!(a.coherence, b.coherence);
    }

    #[test]
    fn out_of_range_ratings_stay_finite() {
        let scorer = StateScorer::default();
        let mut rng = StdRng::seed_from_u64(3);
        let score = scorer.score(&Ratings::new(0, 0, 0, 0), &mut rng);
        assert!(score.awareness_proxy.is_finite());
        assert_eq!(score.coherence, 1.0);
    }

    #[test]
    fn zero_noise_post_score_is_scaled_pre() {
        let scorer = StateScorer::new(ScoringConfig {
            noise_std_dev: 0.0,
            ..ScoringConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(9);
        assert_relative_eq!(scorer.post_score(40.0, &mut rng), 60.0);
    }
}
