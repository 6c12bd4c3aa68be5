//! State management module
//! 
//! This module contains the shared, lock-protected state the HTTP handlers act on.

pub mod app_state;
pub mod timer_session;

// Re-export main types
pub use app_state::AppState;
pub use timer_session::TimerSession;
