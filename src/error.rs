//! Errors surfaced by application actions

use thiserror::Error;

use crate::{timer::EditorError, widgets::WidgetError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Poisoned locks and other failures the caller cannot fix
    #[error("{0}")]
    Internal(String),
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        Self::Internal(message)
    }
}
