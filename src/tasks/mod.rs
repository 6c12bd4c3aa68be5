//! Background tasks module
//!
//! This module contains the background tasks that run alongside the HTTP server.

pub mod ticker;

// Re-export main types
pub use ticker::{Ticker, TICK_PERIOD};
