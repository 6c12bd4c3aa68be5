//! Pomodoro duration settings

use serde::{Deserialize, Serialize};

use super::TimerPhase;

/// Shortest focus period in minutes
pub const MIN_FOCUS_MINUTES: u32 = 5;
/// Longest focus period in minutes
pub const MAX_FOCUS_MINUTES: u32 = 60;
/// Granularity of the focus slider
pub const FOCUS_STEP_MINUTES: u32 = 5;
/// Shortest break in minutes
pub const MIN_BREAK_MINUTES: u32 = 1;
/// Longest break in minutes
pub const MAX_BREAK_MINUTES: u32 = 30;
/// Granularity of the break slider
pub const BREAK_STEP_MINUTES: u32 = 1;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Configured focus and break durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl TimerSettings {
    /// Settings clamped into the supported ranges
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes,
            break_minutes,
        }
        .clamped()
    }

    /// Copy with both durations forced into their ranges
    pub fn clamped(self) -> Self {
        Self {
            focus_minutes: self.focus_minutes.clamp(MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES),
            break_minutes: self.break_minutes.clamp(MIN_BREAK_MINUTES, MAX_BREAK_MINUTES),
        }
    }

    /// Length of `phase` in minutes
    pub fn phase_minutes(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Focus => self.focus_minutes,
            TimerPhase::Break => self.break_minutes,
        }
    }

    /// Length of `phase` in seconds
    pub fn phase_seconds(&self, phase: TimerPhase) -> u64 {
        u64::from(self.phase_minutes(phase)) * 60
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_25_5() {
        let settings = TimerSettings::default();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.break_minutes, 5);
    }

    #[test]
    fn test_clamped_forces_ranges() {
        assert_eq!(TimerSettings::new(0, 0), TimerSettings { focus_minutes: 5, break_minutes: 1 });
        assert_eq!(TimerSettings::new(600, 90), TimerSettings { focus_minutes: 60, break_minutes: 30 });
        // Off-step values are kept; steps belong to the editor
        assert_eq!(TimerSettings::new(23, 7), TimerSettings { focus_minutes: 23, break_minutes: 7 });
    }

    #[test]
    fn test_phase_seconds() {
        let settings = TimerSettings::new(25, 5);
        assert_eq!(settings.phase_seconds(TimerPhase::Focus), 1500);
        assert_eq!(settings.phase_seconds(TimerPhase::Break), 300);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_string(&TimerSettings::default()).unwrap();
        assert_eq!(json, r#"{"focusMinutes":25,"breakMinutes":5}"#);
    }

    #[test]
    fn test_malformed_blob_does_not_parse() {
        assert!(serde_json::from_str::<TimerSettings>(r#"{"focusMinutes":"bad"}"#).is_err());
    }
}
