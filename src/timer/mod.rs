//! Pomodoro timer module
//!
//! Pure timer logic: settings, phases, the countdown state machine and the
//! settings editor. Scheduling lives in `tasks`, shared ownership in `state`.

pub mod editor;
pub mod machine;
pub mod phase;
pub mod settings;

// Re-export main types
pub use editor::{EditorError, SettingsEditor};
pub use machine::{format_countdown, TickOutcome, TimerMachine, TimerRuntimeState, TimerSnapshot};
pub use phase::TimerPhase;
pub use settings::TimerSettings;
