use crate::foundation::error::{OverlayError, OverlayResult};
use crate::reveal::phase::RevealPhase;

/// Default total reveal duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Default phase offsets as fractions of the total duration.
///
/// The duration is split into four quarters; lines, markers, connections and the info panel fire
/// at 25%, 75%, 125% and 150% of one quarter.
pub const DEFAULT_FRACTIONS: [f64; 4] = [0.25 / 4.0, 0.75 / 4.0, 1.25 / 4.0, 1.5 / 4.0];

/// Validated reveal timing: total duration plus one absolute offset per timed phase.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSchedule {
    total_ms: u64,
    fractions: [f64; 4],
    offsets_ms: [u64; 4],
}

impl Default for RevealSchedule {
    fn default() -> Self {
        Self::from_parts(DEFAULT_DURATION_MS, DEFAULT_FRACTIONS)
    }
}

impl RevealSchedule {
    /// Schedule with the default fractions over `total_ms`.
    ///
    /// A zero duration is a configuration error.
    pub fn new(total_ms: u64) -> OverlayResult<Self> {
        Self::with_fractions(total_ms, DEFAULT_FRACTIONS)
    }

    /// Schedule for an optional duration; `None` falls back to [`DEFAULT_DURATION_MS`].
    pub fn from_duration(total_ms: Option<u64>) -> OverlayResult<Self> {
        Self::new(total_ms.unwrap_or(DEFAULT_DURATION_MS))
    }

    /// Schedule with explicit fractions.
    ///
    /// Fractions must be finite, within `[0, 1]` and strictly increasing.
    pub fn with_fractions(total_ms: u64, fractions: [f64; 4]) -> OverlayResult<Self> {
        if total_ms == 0 {
            return Err(OverlayError::configuration(
                "reveal duration must be > 0 ms",
            ));
        }
        for (i, f) in fractions.iter().enumerate() {
            if !f.is_finite() || !(0.0..=1.0).contains(f) {
                return Err(OverlayError::configuration(format!(
                    "reveal fraction #{i} must be finite and within [0, 1], got {f}"
                )));
            }
        }
        if fractions.windows(2).any(|w| w[0] >= w[1]) {
            return Err(OverlayError::configuration(
                "reveal fractions must be strictly increasing",
            ));
        }
        Ok(Self::from_parts(total_ms, fractions))
    }

    fn from_parts(total_ms: u64, fractions: [f64; 4]) -> Self {
        let mut offsets_ms = [0u64; 4];
        let mut prev: Option<u64> = None;
        for (slot, f) in offsets_ms.iter_mut().zip(fractions) {
            let raw = (total_ms as f64 * f).round() as u64;
            // Rounding can collapse neighbours on short durations.
            let off = match prev {
                Some(p) if raw <= p => p + 1,
                _ => raw,
            };
            *slot = off;
            prev = Some(off);
        }
        Self {
            total_ms,
            fractions,
            offsets_ms,
        }
    }

    /// Total duration in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Configured fractions.
    pub fn fractions(&self) -> [f64; 4] {
        self.fractions
    }

    /// Offset of every timed phase from the start of the run.
    pub fn offsets(&self) -> impl Iterator<Item = (RevealPhase, u64)> + '_ {
        RevealPhase::TIMED.into_iter().zip(self.offsets_ms)
    }

    /// Offset at which `phase` fires, `None` for [`RevealPhase::Idle`].
    pub fn offset_of(&self, phase: RevealPhase) -> Option<u64> {
        self.offsets().find(|(p, _)| *p == phase).map(|(_, o)| o)
    }

    /// Offset of the last timed phase; the run is complete from here on.
    pub fn completes_at(&self) -> u64 {
        self.offsets_ms[3]
    }
}
