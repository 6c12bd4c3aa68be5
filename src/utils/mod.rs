//! Process-level helpers for the daemon

pub mod signals;

pub use signals::shutdown_signal;
