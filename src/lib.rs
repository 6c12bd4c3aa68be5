//! Focus Suite - A local productivity daemon
//! 
//! This library provides a pomodoro timer with persisted settings, a to-do
//! list, a kanban board and a flip clock, all kept in local key-value storage
//! and driven over a small HTTP control surface.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod storage;
pub mod tasks;
pub mod timer;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
