use serde::{Deserialize, Serialize};

/// Entrainment presets offered in the mode picker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum WaveMode {
    #[default]
    GammaPeak,
    BetaFocus,
    AlphaRelax,
    ThetaDream,
    DeltaHeal,
}

impl WaveMode {
    pub const ALL: [WaveMode; 5] = [
        WaveMode::GammaPeak,
        WaveMode::BetaFocus,
        WaveMode::AlphaRelax,
        WaveMode::ThetaDream,
        WaveMode::DeltaHeal,
    ];

    /// Beat frequency in Hz.
    pub fn beat_hz(&self) -> f64 {
        match self {
            WaveMode::GammaPeak => 40.0,
            WaveMode::BetaFocus => 20.0,
            WaveMode::AlphaRelax => 10.0,
            WaveMode::ThetaDream => 6.0,
            WaveMode::DeltaHeal => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WaveMode::GammaPeak => "Gamma Peak (40 Hz)",
            WaveMode::BetaFocus => "Beta Focus (20 Hz)",
            WaveMode::AlphaRelax => "Alpha Relax (10 Hz)",
            WaveMode::ThetaDream => "Theta Dream (6 Hz)",
            WaveMode::DeltaHeal => "Delta Heal (2 Hz)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WaveMode::GammaPeak => "Heightened insight, watcher mode, cognitive flow",
            WaveMode::BetaFocus => "Alert thinking, productivity, problem-solving",
            WaveMode::AlphaRelax => "Calm alertness, stress reduction, creativity bridge",
            WaveMode::ThetaDream => "Deep meditation, intuition, subconscious access",
            WaveMode::DeltaHeal => "Deep sleep, healing, restorative detachment",
        }
    }
}
