//! Shared pomodoro timer: state machine plus its ticker

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    services::{chime, PhaseNotifier},
    tasks::Ticker,
    timer::{TickOutcome, TimerMachine, TimerSettings, TimerSnapshot},
};

/// Machine and ticker share one lock so ticks and user actions never interleave
#[derive(Debug)]
struct SessionInner {
    machine: TimerMachine,
    ticker: Option<Ticker>,
    last_epoch: u64,
}

impl SessionInner {
    fn disarm(&mut self) {
        // Dropping the handle aborts the task
        self.ticker = None;
    }
}

/// A mounted pomodoro timer
pub struct TimerSession {
    inner: Mutex<SessionInner>,
    notifier: Arc<dyn PhaseNotifier>,
    /// Latest snapshot, republished after every transition
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
    this: Weak<TimerSession>,
}

impl TimerSession {
    /// Create a paused session at the start of a focus period
    pub fn new(settings: TimerSettings, notifier: Arc<dyn PhaseNotifier>) -> Arc<Self> {
        let machine = TimerMachine::new(settings);
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());

        Arc::new_cyclic(|this| Self {
            inner: Mutex::new(SessionInner {
                machine,
                ticker: None,
                last_epoch: 0,
            }),
            notifier,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            this: this.clone(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock timer session: {}", e))
    }

    fn publish(&self, inner: &SessionInner) -> TimerSnapshot {
        let snapshot = inner.machine.snapshot();
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
        snapshot
    }

    /// Start counting down. Arms the ticker; a no-op if already running.
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        self.start_locked(&mut inner)?;
        Ok(self.publish(&inner))
    }

    /// Stop counting, keeping the remaining time
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        self.pause_locked(&mut inner);
        Ok(self.publish(&inner))
    }

    /// The start/pause button
    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        if inner.machine.is_running() {
            self.pause_locked(&mut inner);
        } else {
            self.start_locked(&mut inner)?;
        }
        Ok(self.publish(&inner))
    }

    fn start_locked(&self, inner: &mut SessionInner) -> Result<(), String> {
        if inner.machine.is_running() {
            return Ok(());
        }

        // Any leftover ticker goes before a new one is armed
        inner.disarm();
        let epoch = inner.last_epoch + 1;
        let ticker = Ticker::spawn(self.this.clone(), epoch)?;
        inner.last_epoch = epoch;
        inner.ticker = Some(ticker);
        inner.machine.start();

        info!(
            "Timer started: {} phase, {}s remaining",
            inner.machine.phase(),
            inner.machine.remaining_seconds()
        );
        Ok(())
    }

    fn pause_locked(&self, inner: &mut SessionInner) {
        inner.disarm();
        if inner.machine.pause() {
            info!(
                "Timer paused: {} phase, {}s remaining",
                inner.machine.phase(),
                inner.machine.remaining_seconds()
            );
        }
    }

    /// Back to a paused, full focus period
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        inner.disarm();
        inner.machine.reset();
        info!("Timer reset to {}s of focus", inner.machine.remaining_seconds());
        Ok(self.publish(&inner))
    }

    /// Commit new settings; the countdown restarts paused in focus
    pub fn apply_settings(&self, settings: TimerSettings) -> Result<TimerSnapshot, String> {
        let mut inner = self.lock()?;
        inner.disarm();
        let applied = inner.machine.apply_settings(settings);
        if applied != settings {
            warn!(
                "Clamped timer settings {}/{} to {}/{}",
                settings.focus_minutes, settings.break_minutes, applied.focus_minutes, applied.break_minutes
            );
        }
        info!(
            "Timer settings applied: focus={}min, break={}min",
            applied.focus_minutes, applied.break_minutes
        );
        Ok(self.publish(&inner))
    }

    /// Committed settings
    pub fn settings(&self) -> Result<TimerSettings, String> {
        Ok(self.lock()?.machine.settings())
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Watch every snapshot the session publishes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Whether a ticker is currently armed
    pub fn is_armed(&self) -> bool {
        self.lock().map(|inner| inner.ticker.is_some()).unwrap_or(false)
    }

    /// Disarm the ticker on teardown, leaving the countdown paused
    pub fn shutdown(&self) {
        match self.lock() {
            Ok(mut inner) => {
                inner.disarm();
                inner.machine.pause();
                self.publish(&inner);
                info!("Timer session shut down");
            }
            Err(e) => error!("{}", e),
        }
    }

    /// Poison the session lock, as a panic while holding it would
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _inner = self.inner.lock();
            panic!("timer session poisoned");
        }));
    }

    /// Apply one tick from the ticker armed at `epoch`
    ///
    /// Returns false when that ticker is no longer the armed one and must stop.
    pub(crate) fn tick(&self, epoch: u64) -> bool {
        let outcome = {
            let mut inner = match self.lock() {
                Ok(inner) => inner,
                Err(e) => {
                    error!("{}", e);
                    return false;
                }
            };

            if inner.ticker.as_ref().map(Ticker::epoch) != Some(epoch) {
                return false;
            }

            let outcome = inner.machine.tick();
            if outcome != TickOutcome::Ignored {
                self.publish(&inner);
            }
            outcome
        };

        if let TickOutcome::PhaseComplete { finished, next } = outcome {
            info!("{} phase complete, starting {}", finished, next);
            chime(self.notifier.as_ref(), finished, next);
        }
        true
    }
}

impl std::fmt::Debug for TimerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerSession")
            .field("snapshot", &*self.snapshot_tx.borrow())
            .finish_non_exhaustive()
    }
}
