/// Easing curve applied to viewport transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
    /// Map linear progress `t` (clamped to `0..=1`) onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Eased progress of a transition `elapsed_ms` into `duration_ms`.
    ///
    /// A zero duration is already complete.
    pub fn progress(self, elapsed_ms: u64, duration_ms: u64) -> f64 {
        if duration_ms == 0 {
            return 1.0;
        }
        self.apply(elapsed_ms as f64 / duration_ms as f64)
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
