//! One-second ticker driving the pomodoro countdown

use std::{sync::Weak, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::state::TimerSession;

/// Wall-clock spacing between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to an armed ticker task
///
/// Dropping the handle aborts the task, so a session that replaces or drops
/// its ticker can never leave one running behind.
#[derive(Debug)]
pub struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker for `session` on the current tokio runtime
    pub fn spawn(session: Weak<TimerSession>, epoch: u64) -> Result<Self, String> {
        let runtime = Handle::try_current()
            .map_err(|e| format!("Cannot arm timer outside a tokio runtime: {}", e))?;
        let handle = runtime.spawn(tick_loop(session, epoch));
        debug!("Armed ticker epoch {}", epoch);
        Ok(Self { epoch, handle })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Disarmed ticker epoch {}", self.epoch);
    }
}

/// Feed the session one tick per period until it goes away or disowns us
async fn tick_loop(session: Weak<TimerSession>, epoch: u64) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(live) = session.upgrade() else {
            debug!("Timer session dropped, ticker epoch {} exiting", epoch);
            break;
        };

        if !live.tick(epoch) {
            debug!("Ticker epoch {} is stale, exiting", epoch);
            break;
        }
    }
}
