//! Pointer and keyboard input handling.
//!
//! Events arrive in absolute screen coordinates from the external event
//! pump. The interaction session turns them into `Command`s that the desktop
//! applies to the window tree.

pub mod pointer;
pub mod session;
mod tests;

pub use pointer::PointerState;
pub use session::{Command, DragMode, Grab, InteractionSession, SessionState};

/// Input event type delivered by the event pump
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerPressed {
        x: f64,
        y: f64,
    },
    PointerReleased {
        x: f64,
        y: f64,
    },
    /// Motion with no button held
    PointerMoved {
        x: f64,
        y: f64,
    },
    /// Motion with a button held
    PointerDragged {
        x: f64,
        y: f64,
    },
    Key {
        ch: char,
    },
}
