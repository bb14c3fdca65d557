//! Core error types

use thiserror::Error;

use crate::core::window::WindowId;

/// Core window-system errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown window: {0:?}")]
    UnknownWindow(WindowId),

    #[error("Window {0:?} is already attached to a parent")]
    AlreadyAttached(WindowId),

    #[error("Window {child:?} is not a child of {parent:?}")]
    NotAChild { parent: WindowId, child: WindowId },

    #[error("Attaching {0:?} would make it its own ancestor")]
    WouldCycle(WindowId),

    #[error("Operation not permitted on the screen root: {0}")]
    RootOperation(&'static str),

    #[error("Invalid state {state:?} for window {window:?}")]
    InvalidState {
        window: Option<WindowId>,
        state: String,
    },

    #[error("Invalid colour: {0}")]
    InvalidColor(String),
}

impl CoreError {
    pub fn invalid_state(window: Option<WindowId>, state: impl Into<String>) -> Self {
        Self::InvalidState {
            window,
            state: state.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
