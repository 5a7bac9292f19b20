/// Tunable constants for the awareness and coherence proxies.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Multiplier applied to the mean rating (1-10 becomes roughly 10-100)
    pub scale: f64,

    /// Standard deviation of the Gaussian noise added to every awareness draw
    pub noise_std_dev: f64,

    /// Guard added to the mean before dividing, keeps coherence finite
    pub epsilon: f64,

    /// Post-session rule: post = pre * multiplier + fresh noise
    pub post_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            noise_std_dev: 5.0,
            epsilon: 1e-6,
            post_multiplier: 1.5,
        }
    }
}
