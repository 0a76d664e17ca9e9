use crate::foundation::core::Millis;
use crate::foundation::error::OverlayResult;
use crate::reveal::phase::RevealPhase;
use crate::reveal::schedule::RevealSchedule;
use crate::reveal::timers::TimerArena;

/// A phase change observed while advancing the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseEvent {
    /// Run the transition belongs to. Bumped by every reset.
    pub epoch: u64,
    /// Time the transition was due.
    pub at: Millis,
    /// Phase entered.
    pub phase: RevealPhase,
}

/// Timed reveal state machine driven by an explicit millisecond clock.
///
/// Time only moves when the caller passes a later `now` to [`RevealSequencer::advance`], so the
/// same inputs always produce the same phase sequence.
#[derive(Debug)]
pub struct RevealSequencer {
    schedule: RevealSchedule,
    phase: RevealPhase,
    visible: bool,
    started_at: Option<Millis>,
    timers: TimerArena<RevealPhase>,
}

impl Default for RevealSequencer {
    fn default() -> Self {
        Self::with_schedule(RevealSchedule::default())
    }
}

impl RevealSequencer {
    /// Sequencer over `total_ms` with the default phase fractions.
    pub fn new(total_ms: u64) -> OverlayResult<Self> {
        Ok(Self::with_schedule(RevealSchedule::new(total_ms)?))
    }

    /// Sequencer over an already validated schedule.
    pub fn with_schedule(schedule: RevealSchedule) -> Self {
        Self {
            schedule,
            phase: RevealPhase::Idle,
            visible: false,
            started_at: None,
            timers: TimerArena::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether the 2N+1 summary panel is shown.
    pub fn info_panel_shown(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Externally supplied visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current run epoch.
    pub fn epoch(&self) -> u64 {
        self.timers.generation()
    }

    /// Number of scheduled transitions that have not fired yet.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Earliest time at which [`RevealSequencer::advance`] would fire something.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Time the current run started, if one is active.
    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    /// Return `true` once every phase of the current run has fired.
    pub fn is_complete(&self) -> bool {
        self.started_at.is_some() && self.timers.is_empty() && self.phase.is_terminal()
    }

    /// The schedule this sequencer runs.
    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// Apply the visibility flag: becoming visible starts a run, becoming hidden resets.
    ///
    /// Re-asserting the current value does nothing.
    pub fn set_visible(&mut self, visible: bool, now: Millis) {
        if visible == self.visible {
            return;
        }
        if visible {
            self.start(now);
        } else {
            self.reset();
        }
    }

    /// Start a run at `now`, resetting any run already in progress first.
    #[tracing::instrument(skip(self), fields(total_ms = self.schedule.total_ms()))]
    pub fn start(&mut self, now: Millis) {
        self.reset();
        self.visible = true;
        self.started_at = Some(now);
        for (phase, offset) in self.schedule.offsets() {
            self.timers.schedule(now.after(offset), phase);
        }
        tracing::debug!(epoch = self.epoch(), "reveal run scheduled");
    }

    /// Cancel every pending transition and return to [`RevealPhase::Idle`].
    ///
    /// Idempotent; safe to call when nothing is pending.
    pub fn reset(&mut self) {
        if self.started_at.is_none() && self.timers.is_empty() && !self.visible {
            return;
        }
        let dropped = self.timers.cancel_all();
        self.phase = RevealPhase::Idle;
        self.visible = false;
        self.started_at = None;
        tracing::debug!(dropped, epoch = self.epoch(), "reveal reset");
    }

    /// Fire every transition due at or before `now`, in order, and return them.
    pub fn advance(&mut self, now: Millis) -> Vec<PhaseEvent> {
        let mut fired = Vec::new();
        while let Some((at, phase)) = self.timers.pop_due(now) {
            // Transitions never move backwards within a run.
            if phase <= self.phase {
                continue;
            }
            self.phase = phase;
            tracing::debug!(?phase, at = at.0, "reveal phase");
            fired.push(PhaseEvent {
                epoch: self.epoch(),
                at,
                phase,
            });
        }
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/sequencer.rs"]
mod tests;
