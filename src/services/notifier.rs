//! Phase-complete chime

use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, warn};

use crate::timer::TimerPhase;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to play chime: {0}")]
    Playback(#[from] io::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Something that can announce the end of a phase
pub trait PhaseNotifier: Send + Sync {
    fn phase_complete(&self, finished: TimerPhase, next: TimerPhase) -> Result<(), NotifyError>;
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default)]
pub struct TerminalBell;

impl PhaseNotifier for TerminalBell {
    fn phase_complete(&self, finished: TimerPhase, next: TimerPhase) -> Result<(), NotifyError> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "\x07")?;
        stderr.flush()?;
        debug!("Chimed for end of {} phase, {} starts", finished, next);
        Ok(())
    }
}

/// Chime that stays quiet (`--no-sound`)
#[derive(Debug, Default)]
pub struct Silent;

impl PhaseNotifier for Silent {
    fn phase_complete(&self, _finished: TimerPhase, _next: TimerPhase) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Play the chime, logging instead of returning any failure
pub fn chime(notifier: &dyn PhaseNotifier, finished: TimerPhase, next: TimerPhase) {
    if let Err(e) = notifier.phase_complete(finished, next) {
        warn!("Failed to play notification sound: {}", e);
    }
}
