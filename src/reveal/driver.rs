//! Real-time reveal driver.
//!
//! The sequencer is owned by a single worker thread. Callers talk to it through commands, so
//! every mutation is applied by one writer in arrival order.

use crate::foundation::core::Millis;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::reveal::phase::RevealPhase;
use crate::reveal::schedule::RevealSchedule;
use crate::reveal::sequencer::{PhaseEvent, RevealSequencer};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

enum Command {
    SetVisible(bool),
    Start,
    Reset,
    Query(mpsc::Sender<DriverSnapshot>),
    Shutdown,
}

/// Point-in-time view of the driven sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverSnapshot {
    /// Current phase.
    pub phase: RevealPhase,
    /// Current run epoch.
    pub epoch: u64,
    /// Pending transitions.
    pub pending: usize,
    /// Visibility flag.
    pub visible: bool,
}

/// Handle to a sequencer running on its own thread.
///
/// Dropping the handle stops the worker and joins it.
pub struct RevealDriver {
    tx: mpsc::Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl RevealDriver {
    /// Spawn the worker. `on_event` runs on the worker thread for every phase change.
    pub fn spawn<F>(schedule: RevealSchedule, mut on_event: F) -> OverlayResult<Self>
    where
        F: FnMut(PhaseEvent) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Command>();
        let worker = std::thread::Builder::new()
            .name("reveal-driver".to_owned())
            .spawn(move || {
                let origin = Instant::now();
                let mut seq = RevealSequencer::with_schedule(schedule);
                run_worker(&rx, &mut seq, origin, &mut on_event);
            })
            .map_err(|e| OverlayError::Other(anyhow::Error::new(e)))?;
        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }

    /// Forward the visibility flag.
    pub fn set_visible(&self, visible: bool) -> OverlayResult<()> {
        self.send(Command::SetVisible(visible))
    }

    /// Start (or restart) a run now.
    pub fn start(&self) -> OverlayResult<()> {
        self.send(Command::Start)
    }

    /// Cancel the current run.
    pub fn reset(&self) -> OverlayResult<()> {
        self.send(Command::Reset)
    }

    /// Ask the worker for its current state. Commands sent earlier are applied first.
    pub fn snapshot(&self) -> OverlayResult<DriverSnapshot> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(Command::Query(reply_tx))?;
        reply_rx
            .recv()
            .map_err(|_| OverlayError::render("reveal driver stopped before replying"))
    }

    fn send(&self, cmd: Command) -> OverlayResult<()> {
        self.tx
            .send(cmd)
            .map_err(|_| OverlayError::render("reveal driver is not running"))
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("reveal driver worker panicked");
        }
    }
}

fn now_ms(origin: Instant) -> Millis {
    Millis(u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX))
}

fn run_worker(
    rx: &mpsc::Receiver<Command>,
    seq: &mut RevealSequencer,
    origin: Instant,
    on_event: &mut dyn FnMut(PhaseEvent),
) {
    loop {
        let first = match seq.next_due() {
            Some(due) => {
                let wait = due.since(now_ms(origin));
                match rx.recv_timeout(Duration::from_millis(wait)) {
                    Ok(cmd) => Some(cmd),
                    Err(mpsc::RecvTimeoutError::Timeout) => None,
                    Err(mpsc::RecvTimeoutError::Disconnected) => return,
                }
            }
            None => match rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => return,
            },
        };

        // Apply everything already queued before firing timers, so a reset sent right after a
        // start always wins over transitions that came due in between.
        let mut pending_cmd = first;
        while let Some(cmd) = pending_cmd {
            if !apply(seq, cmd, origin, on_event) {
                return;
            }
            pending_cmd = rx.try_recv().ok();
        }

        for ev in seq.advance(now_ms(origin)) {
            on_event(ev);
        }
    }
}

fn apply(
    seq: &mut RevealSequencer,
    cmd: Command,
    origin: Instant,
    on_event: &mut dyn FnMut(PhaseEvent),
) -> bool {
    match cmd {
        Command::SetVisible(v) => seq.set_visible(v, now_ms(origin)),
        Command::Start => seq.start(now_ms(origin)),
        Command::Reset => seq.reset(),
        Command::Query(reply) => {
            // Snapshots never report a phase that is already overdue.
            for ev in seq.advance(now_ms(origin)) {
                on_event(ev);
            }
            let _ = reply.send(DriverSnapshot {
                phase: seq.phase(),
                epoch: seq.epoch(),
                pending: seq.pending(),
                visible: seq.is_visible(),
            });
        }
        Command::Shutdown => return false,
    }
    true
}
