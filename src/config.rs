//! JSON configuration for the overlay. Every field is optional.

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::disclosure::DisclosureState;
use crate::hotspot::load::HotspotCatalog;
use crate::reveal::schedule::{DEFAULT_DURATION_MS, DEFAULT_FRACTIONS, RevealSchedule};
use crate::viewport::map::{MapViewport, ViewportOpts};
use std::path::Path;

/// Reveal timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealOpts {
    /// Total duration; `None` uses the 4000 ms default, `Some(0)` is rejected.
    pub duration_ms: Option<u64>,
    pub fractions: [f64; 4],
}

impl Default for RevealOpts {
    fn default() -> Self {
        Self {
            duration_ms: None,
            fractions: DEFAULT_FRACTIONS,
        }
    }
}

impl RevealOpts {
    /// Build the validated schedule.
    pub fn schedule(&self) -> OverlayResult<RevealSchedule> {
        let total = self.duration_ms.unwrap_or(DEFAULT_DURATION_MS);
        RevealSchedule::with_fractions(total, self.fractions)
    }
}

/// Error boundary settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundaryOpts {
    /// Local retries before a full reload is required.
    pub max_retries: u32,
}

impl Default for BoundaryOpts {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Top-level overlay configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub reveal: RevealOpts,
    /// Show hover tooltips on hotspots.
    pub tooltips: bool,
    pub boundary: BoundaryOpts,
    pub viewport: ViewportOpts,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            reveal: RevealOpts::default(),
            tooltips: true,
            boundary: BoundaryOpts::default(),
            viewport: ViewportOpts::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse and validate from JSON text.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate from a JSON file.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            OverlayError::Other(
                anyhow::Error::new(e).context(format!("read config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> OverlayResult<()> {
        self.reveal.schedule()?;
        self.viewport.validate()?;
        Ok(())
    }

    /// Disclosure state for `catalog` with the tooltip preference applied.
    pub fn disclosure(&self, catalog: &HotspotCatalog) -> DisclosureState {
        let mut state = DisclosureState::new(catalog);
        state.set_tooltips_enabled(self.tooltips);
        state
    }

    /// Map viewport with these options.
    pub fn map_viewport(&self) -> OverlayResult<MapViewport> {
        MapViewport::new(self.viewport.clone())
    }
}
