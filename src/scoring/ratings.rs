use serde::{Deserialize, Serialize};

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 10;

/// The four self-reported sliders collected per interaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub presence: i32,
    pub emotion: i32,
    pub logic: i32,
    pub meta_awareness: i32,
}

impl Ratings {
    /// Values are stored as given. The collecting UI is responsible for the 1-10 range.
    pub fn new(presence: i32, emotion: i32, logic: i32, meta_awareness: i32) -> Self {
        Self {
            presence,
            emotion,
            logic,
            meta_awareness,
        }
    }

    /// Same as [`Ratings::new`] but pins every slider into `[1, 10]`.
    pub fn clamped(presence: i32, emotion: i32, logic: i32, meta_awareness: i32) -> Self {
        let clamp = |v: i32| v.clamp(RATING_MIN, RATING_MAX);
        Self::new(
            clamp(presence),
            clamp(emotion),
            clamp(logic),
            clamp(meta_awareness),
        )
    }

    pub fn values(&self) -> [i32; 4] {
        [self.presence, self.emotion, self.logic, self.meta_awareness]
    }

    pub fn mean(&self) -> f64 {
        self.values().iter().map(|&v| v as f64).sum::<f64>() / 4.0
    }

    /// Population standard deviation (divides by N, not N - 1).
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let variance = self
            .values()
            .iter()
            .map(|&v| {
                let diff = v as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / 4.0;
        variance.sqrt()
    }
}

impl Default for Ratings {
    fn default() -> Self {
        Self::new(5, 5, 5, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_pins_out_of_range_values() {
        let ratings = Ratings::clamped(0, 11, -4, 7);
        assert_eq!(ratings.values(), [1, 10, 1, 7]);
    }

    #[test]
    fn new_keeps_values_verbatim() {
        let ratings = Ratings::new(0, 11, -4, 7);
        assert_eq!(ratings.values(), [0, 11, -4, 7]);
    }

    #[test]
    fn population_std_dev() {
        // mean 5, deviations -3,-1,1,3 -> variance 5
        let ratings = Ratings::new(2, 4, 6, 8);
        assert_eq!(ratings.mean(), 5.0);
        assert!((ratings.std_dev() - 5.0_f64.sqrt()).abs() < 1e-12);
    }
}
