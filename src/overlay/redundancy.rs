use crate::config::OverlayConfig;
use crate::foundation::core::Millis;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::disclosure::{FocusTarget, Key};
use crate::overlay::boundary::{BoundaryOutcome, ErrorBoundary, ErrorHook, RetryOutcome};
use crate::reveal::{PhaseEvent, RevealPhase, RevealSequencer};

/// Accessible label of the overlay's close control.
pub const CLOSE_LABEL: &str = "Close redundancy visualization";
/// Label of the return-to-page action.
pub const BACK_LABEL: &str = "Back to Main";

const COMPONENT: &str = "redundancy-overlay";

/// A group of sources feeding the site, as `"Plant → Substation"` strings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceGroup {
    pub sources: Vec<String>,
    /// Combined capacity in MW.
    pub capacity_mw: u32,
}

/// The 2N+1 redundancy summary.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RedundancyStats {
    pub data_center_need_mw: u32,
    pub active: SourceGroup,
    pub standby: SourceGroup,
    pub total_capacity_mw: u32,
    /// Total capacity over need, in percent.
    pub redundancy_ratio_pct: u32,
}

impl Default for RedundancyStats {
    fn default() -> Self {
        Self {
            data_center_need_mw: 300,
            active: SourceGroup {
                sources: vec![
                    "Quảng Trạch → Sub 01".to_owned(),
                    "Thanh Mỹ → Sub 01".to_owned(),
                ],
                capacity_mw: 500,
            },
            standby: SourceGroup {
                sources: vec![
                    "Quảng Trị → Sub 02".to_owned(),
                    "Đà Nẵng → Sub 02".to_owned(),
                ],
                capacity_mw: 600,
            },
            total_capacity_mw: 1200,
            redundancy_ratio_pct: 400,
        }
    }
}

/// Whether a line carries load or stands by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Active,
    Standby,
}

/// One drawn transmission line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransmissionLine {
    pub from: String,
    pub to: String,
    pub role: LineRole,
}

impl RedundancyStats {
    /// Transmission lines described by the source groups, active first.
    pub fn lines(&self) -> OverlayResult<Vec<TransmissionLine>> {
        let active = self.active.sources.iter().map(|s| (s, LineRole::Active));
        let standby = self.standby.sources.iter().map(|s| (s, LineRole::Standby));
        active
            .chain(standby)
            .map(|(s, role)| {
                let (from, to) = s.split_once('→').ok_or_else(|| {
                    OverlayError::render(format!("source '{s}' has no '→' separator"))
                })?;
                let (from, to) = (from.trim(), to.trim());
                if from.is_empty() || to.is_empty() {
                    return Err(OverlayError::render(format!(
                        "source '{s}' is missing an endpoint"
                    )));
                }
                Ok(TransmissionLine {
                    from: from.to_owned(),
                    to: to.to_owned(),
                    role,
                })
            })
            .collect()
    }
}

/// Content built once, on first open.
#[derive(Clone, Debug)]
struct OverlayContent {
    lines: Vec<TransmissionLine>,
    substations: Vec<String>,
}

impl OverlayContent {
    fn build(stats: &RedundancyStats) -> OverlayResult<Self> {
        let lines = stats.lines()?;
        let mut substations: Vec<String> = Vec::new();
        for l in &lines {
            if !substations.contains(&l.to) {
                substations.push(l.to.clone());
            }
        }
        Ok(Self { lines, substations })
    }
}

/// Everything visible in the overlay at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayFrame {
    pub phase: RevealPhase,
    pub lines: Vec<TransmissionLine>,
    pub substations: Vec<String>,
    pub connections: bool,
    pub info_panel: Option<RedundancyStats>,
    pub close_label: &'static str,
    pub back_label: &'static str,
}

/// Full-page 2N+1 redundancy visualization.
///
/// Owns the reveal sequencer and an error boundary around its content; the close path never
/// goes through the boundary, so a failed render can always be dismissed.
pub struct RedundancyOverlay {
    sequencer: RevealSequencer,
    boundary: ErrorBoundary,
    stats: RedundancyStats,
    content: Option<OverlayContent>,
    content_builds: u32,
    return_focus: Option<FocusTarget>,
    on_close: Option<Box<dyn FnMut() + Send>>,
}

impl std::fmt::Debug for RedundancyOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedundancyOverlay")
            .field("sequencer", &self.sequencer)
            .field("boundary", &self.boundary)
            .field("content_builds", &self.content_builds)
            .finish_non_exhaustive()
    }
}

impl RedundancyOverlay {
    /// Build from configuration; fails before any timer exists if the reveal settings are bad.
    pub fn new(config: &OverlayConfig) -> OverlayResult<Self> {
        let schedule = config.reveal.schedule()?;
        Ok(Self {
            sequencer: RevealSequencer::with_schedule(schedule),
            boundary: ErrorBoundary::new(config.boundary.max_retries),
            stats: RedundancyStats::default(),
            content: None,
            content_builds: 0,
            return_focus: None,
            on_close: None,
        })
    }

    /// Replace the summary figures.
    pub fn with_stats(mut self, stats: RedundancyStats) -> Self {
        self.stats = stats;
        self.content = None;
        self
    }

    /// Callback fired on every effective close.
    pub fn on_close(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Callback receiving render failures.
    pub fn on_error(mut self, hook: ErrorHook) -> Self {
        self.boundary.set_on_error(hook);
        self
    }

    pub fn stats(&self) -> &RedundancyStats {
        &self.stats
    }

    pub fn is_open(&self) -> bool {
        self.sequencer.is_visible()
    }

    pub fn phase(&self) -> RevealPhase {
        self.sequencer.phase()
    }

    pub fn sequencer(&self) -> &RevealSequencer {
        &self.sequencer
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// Times the overlay content has been built.
    pub fn content_builds(&self) -> u32 {
        self.content_builds
    }

    /// Show the overlay and start the reveal. `focus_origin` gets focus back on close.
    ///
    /// Opening an already open overlay restarts the reveal.
    pub fn open(&mut self, now: Millis, focus_origin: Option<FocusTarget>) {
        tracing::info!(at = now.0, "redundancy overlay opened");
        if focus_origin.is_some() || !self.is_open() {
            self.return_focus = focus_origin;
        }
        self.sequencer.start(now);
    }

    /// Hide the overlay and cancel the reveal. Returns the control to refocus.
    ///
    /// Closing a closed overlay does nothing and returns `None`.
    pub fn close(&mut self) -> Option<FocusTarget> {
        if !self.is_open() {
            return None;
        }
        self.sequencer.reset();
        tracing::info!("redundancy overlay closed");
        if let Some(cb) = self.on_close.as_mut() {
            cb();
        }
        self.return_focus.take()
    }

    /// Keyboard handling; `Escape` closes. Returns the focus target when it closed.
    pub fn handle_key(&mut self, key: Key) -> Option<FocusTarget> {
        match key {
            Key::Escape => self.close(),
            _ => None,
        }
    }

    /// Advance the reveal to `now`.
    pub fn tick(&mut self, now: Millis) -> Vec<PhaseEvent> {
        self.sequencer.advance(now)
    }

    /// Render the visible content at `now`, inside the error boundary.
    pub fn frame(&mut self, now: Millis) -> BoundaryOutcome<OverlayFrame> {
        self.tick(now);
        let phase = self.sequencer.phase();
        let open = self.is_open();
        let Self {
            boundary,
            stats,
            content,
            content_builds,
            ..
        } = self;

        boundary.render(COMPONENT, || {
            if !open {
                return Ok(OverlayFrame::hidden());
            }
            if content.is_none() {
                *content_builds += 1;
                tracing::debug!("building redundancy overlay content");
                *content = Some(OverlayContent::build(stats)?);
            }
            let Some(c) = content.as_ref() else {
                return Err(OverlayError::render("overlay content missing"));
            };
            Ok(OverlayFrame {
                phase,
                lines: if phase.reached(RevealPhase::LinesVisible) {
                    c.lines.clone()
                } else {
                    Vec::new()
                },
                substations: if phase.reached(RevealPhase::MarkersVisible) {
                    c.substations.clone()
                } else {
                    Vec::new()
                },
                connections: phase.reached(RevealPhase::ConnectionsVisible),
                info_panel: phase
                    .reached(RevealPhase::InfoPanelVisible)
                    .then(|| stats.clone()),
                close_label: CLOSE_LABEL,
                back_label: BACK_LABEL,
            })
        })
    }

    /// Retry after a render failure.
    pub fn retry(&mut self) -> RetryOutcome {
        self.boundary.retry()
    }

    /// Full reload: restore the retry budget and rebuild content on the next frame.
    pub fn reload(&mut self) {
        self.content = None;
        self.boundary.reload();
    }
}

impl OverlayFrame {
    fn hidden() -> Self {
        Self {
            phase: RevealPhase::Idle,
            lines: Vec::new(),
            substations: Vec::new(),
            connections: false,
            info_panel: None,
            close_label: CLOSE_LABEL,
            back_label: BACK_LABEL,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.substations.is_empty()
            && !self.connections
            && self.info_panel.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/redundancy.rs"]
mod tests;
