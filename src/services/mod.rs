//! Side-effect services module
//!
//! This module contains the best-effort side effects the timer triggers,
//! such as the phase-complete chime.

pub mod notifier;

// Re-export main types
pub use notifier::{chime, NotifyError, PhaseNotifier, Silent, TerminalBell};
