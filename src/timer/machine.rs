//! Pomodoro countdown state machine
//!
//! The machine is a plain value: it owns no timer and never sleeps. Whoever
//! drives it (the ticker task) calls [`TimerMachine::tick`] once per second
//! while it is running.
//!
//! ```text
//! FocusPaused <-start/pause-> FocusRunning
//!      ^                          | tick at 1s
//!      | reset / apply_settings   v
//! BreakPaused <-start/pause-> BreakRunning
//! ```

use serde::{Deserialize, Serialize};

use super::{TimerPhase, TimerSettings};

/// Result of feeding one tick to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The machine was paused; nothing changed
    Ignored,
    /// One second was counted off the current phase
    Counted { remaining_seconds: u64 },
    /// The phase ran out and the machine moved on to `next`
    PhaseComplete { finished: TimerPhase, next: TimerPhase },
}

/// Runtime state of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRuntimeState {
    pub remaining_seconds: u64,
    pub phase: TimerPhase,
    pub is_running: bool,
}

/// Point-in-time view of the timer for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub runtime: TimerRuntimeState,
    pub settings: TimerSettings,
    pub phase_label: String,
    pub display: String,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerMachine {
    settings: TimerSettings,
    runtime: TimerRuntimeState,
}

impl TimerMachine {
    /// New machine in FocusPaused with a full focus period
    pub fn new(settings: TimerSettings) -> Self {
        let settings = settings.clamped();
        Self {
            settings,
            runtime: TimerRuntimeState {
                remaining_seconds: settings.phase_seconds(TimerPhase::Focus),
                phase: TimerPhase::Focus,
                is_running: false,
            },
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn runtime(&self) -> TimerRuntimeState {
        self.runtime
    }

    pub fn phase(&self) -> TimerPhase {
        self.runtime.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.runtime.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_running
    }

    /// Resume counting. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.runtime.is_running {
            return false;
        }
        self.runtime.is_running = true;
        true
    }

    /// Stop counting, keeping the remaining time. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if !self.runtime.is_running {
            return false;
        }
        self.runtime.is_running = false;
        true
    }

    /// Count off one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.runtime.is_running {
            return TickOutcome::Ignored;
        }

        if self.runtime.remaining_seconds <= 1 {
            let finished = self.runtime.phase;
            let next = finished.next();
            self.runtime.phase = next;
            self.runtime.remaining_seconds = self.settings.phase_seconds(next);
            return TickOutcome::PhaseComplete { finished, next };
        }

        self.runtime.remaining_seconds -= 1;
        TickOutcome::Counted {
            remaining_seconds: self.runtime.remaining_seconds,
        }
    }

    /// Back to FocusPaused with a full focus period
    pub fn reset(&mut self) {
        self.runtime = TimerRuntimeState {
            remaining_seconds: self.settings.phase_seconds(TimerPhase::Focus),
            phase: TimerPhase::Focus,
            is_running: false,
        };
    }

    /// Replace the settings (clamped) and reset
    pub fn apply_settings(&mut self, settings: TimerSettings) -> TimerSettings {
        self.settings = settings.clamped();
        self.reset();
        self.settings
    }

    /// Length of the current phase in seconds
    pub fn phase_seconds(&self) -> u64 {
        self.settings.phase_seconds(self.runtime.phase)
    }

    /// Fraction of the current phase already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        let total = self.phase_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.runtime.remaining_seconds);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            runtime: self.runtime,
            settings: self.settings,
            phase_label: self.runtime.phase.label().to_string(),
            display: format_countdown(self.runtime.remaining_seconds),
            progress: self.progress(),
        }
    }
}

impl Default for TimerMachine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Render seconds as zero-padded `MM:SS`
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(settings: TimerSettings) -> TimerMachine {
        let mut machine = TimerMachine::new(settings);
        machine.start();
        machine
    }

    #[test]
    fn test_initial_state_is_focus_paused() {
        let machine = TimerMachine::new(TimerSettings::new(25, 5));
        assert_eq!(
            machine.runtime(),
            TimerRuntimeState { remaining_seconds: 1500, phase: TimerPhase::Focus, is_running: false }
        );
        assert_eq!(machine.progress(), 0.0);
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let mut machine = TimerMachine::default();
        assert!(machine.start());
        assert!(!machine.start());
        assert!(machine.is_running());
        assert!(machine.pause());
        assert!(!machine.pause());
        assert!(!machine.is_running());
    }

    #[test]
    fn test_full_focus_period_flips_to_break() {
        let mut machine = running(TimerSettings::new(25, 5));
        let mut flips = 0;
        for _ in 0..1500 {
            if let TickOutcome::PhaseComplete { finished, next } = machine.tick() {
                assert_eq!(finished, TimerPhase::Focus);
                assert_eq!(next, TimerPhase::Break);
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(
            machine.runtime(),
            TimerRuntimeState { remaining_seconds: 300, phase: TimerPhase::Break, is_running: true }
        );
    }

    #[test]
    fn test_flip_happens_once_per_phase_for_every_setting() {
        for focus in [5, 25, 60] {
            for brk in [1, 5, 30] {
                let settings = TimerSettings::new(focus, brk);
                let mut machine = running(settings);
                let focus_secs = settings.phase_seconds(TimerPhase::Focus);
                let break_secs = settings.phase_seconds(TimerPhase::Break);

                for _ in 0..focus_secs - 1 {
                    assert!(matches!(machine.tick(), TickOutcome::Counted { .. }));
                }
                assert_eq!(machine.remaining_seconds(), 1);
                assert!(matches!(machine.tick(), TickOutcome::PhaseComplete { .. }));
                assert_eq!(machine.phase(), TimerPhase::Break);
                assert_eq!(machine.remaining_seconds(), break_secs);

                for _ in 0..break_secs - 1 {
                    assert!(matches!(machine.tick(), TickOutcome::Counted { .. }));
                }
                assert_eq!(
                    machine.tick(),
                    TickOutcome::PhaseComplete { finished: TimerPhase::Break, next: TimerPhase::Focus }
                );
                assert_eq!(machine.remaining_seconds(), focus_secs);
            }
        }
    }

    #[test]
    fn test_pause_then_start_keeps_remaining() {
        let mut machine = running(TimerSettings::default());
        for _ in 0..42 {
            machine.tick();
        }
        machine.pause();
        let paused_at = machine.remaining_seconds();
        machine.start();
        assert_eq!(machine.remaining_seconds(), paused_at);
        assert_eq!(paused_at, 1500 - 42);
    }

    #[test]
    fn test_ticks_while_paused_are_ignored() {
        let mut machine = running(TimerSettings::default());
        for _ in 0..600 {
            machine.tick();
        }
        machine.pause();
        assert_eq!(machine.remaining_seconds(), 900);
        assert_eq!(machine.tick(), TickOutcome::Ignored);
        assert_eq!(machine.tick(), TickOutcome::Ignored);
        assert_eq!(machine.remaining_seconds(), 900);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut machine = running(TimerSettings::new(30, 10));
        for _ in 0..1805 {
            machine.tick();
        }
        assert_eq!(machine.phase(), TimerPhase::Break);
        machine.reset();
        assert_eq!(
            machine.runtime(),
            TimerRuntimeState { remaining_seconds: 1800, phase: TimerPhase::Focus, is_running: false }
        );
    }

    #[test]
    fn test_apply_settings_while_running_pauses_in_focus() {
        let mut machine = running(TimerSettings::default());
        for _ in 0..1510 {
            machine.tick();
        }
        let applied = machine.apply_settings(TimerSettings { focus_minutes: 45, break_minutes: 15 });
        assert_eq!(applied, TimerSettings::new(45, 15));
        assert_eq!(
            machine.runtime(),
            TimerRuntimeState { remaining_seconds: 2700, phase: TimerPhase::Focus, is_running: false }
        );
    }

    #[test]
    fn test_apply_settings_clamps_out_of_range() {
        let mut machine = TimerMachine::default();
        let applied = machine.apply_settings(TimerSettings { focus_minutes: 0, break_minutes: 100 });
        assert_eq!(applied, TimerSettings { focus_minutes: 5, break_minutes: 30 });
        assert_eq!(machine.remaining_seconds(), 300);
    }

    #[test]
    fn test_progress_monotonic_and_resets_on_flip() {
        let mut machine = running(TimerSettings::new(5, 1));
        let mut last = machine.progress();
        for _ in 0..299 {
            machine.tick();
            let now = machine.progress();
            assert!(now >= last);
            assert!((0.0..=1.0).contains(&now));
            last = now;
        }
        machine.tick();
        assert_eq!(machine.phase(), TimerPhase::Break);
        assert_eq!(machine.progress(), 0.0);
    }

    #[test]
    fn test_snapshot_display() {
        let mut machine = running(TimerSettings::new(25, 5));
        machine.tick();
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.display, "24:59");
        assert_eq!(snapshot.phase_label, "Focus Time");
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(3600), "60:00");
    }
}
