//! Timed multi-phase reveal for the 2N+1 redundancy overlay.
//!
//! [`RevealSequencer`] is the deterministic state machine; [`RevealDriver`] runs one on a
//! dedicated thread against the wall clock.

pub(crate) mod driver;
pub(crate) mod phase;
pub(crate) mod schedule;
pub(crate) mod sequencer;
pub(crate) mod timers;

pub use driver::{DriverSnapshot, RevealDriver};
pub use phase::RevealPhase;
pub use schedule::{DEFAULT_DURATION_MS, DEFAULT_FRACTIONS, RevealSchedule};
pub use sequencer::{PhaseEvent, RevealSequencer};
pub use timers::{TaskHandle, TimerArena};
