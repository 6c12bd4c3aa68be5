use serde::{Deserialize, Serialize};

/// Which half of the pomodoro cycle is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Focus,
    Break,
}

impl TimerPhase {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    /// Label shown under the countdown
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus Time",
            Self::Break => "Break Time",
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Focus => f.write_str("focus"),
            Self::Break => f.write_str("break"),
        }
    }
}
