//! Platform API Trait
//!
//! This trait defines what a host adapter must implement.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

/// Host adapter interface.
///
/// # Host Implementation Guide
///
/// ## Event Loop
/// 1. Translate native pointer and key events → call `Desktop::pressed()`,
///    `released()`, `moved()`, `dragged()`, `key()` with screen coordinates
/// 2. When `request_repaint()` has been called, schedule a frame
/// 3. In the frame, call `Desktop::paint()` with a `DrawContext`
pub trait Platform {
    /// Initialize the platform adapter.
    fn initialize(&mut self) -> Result<()>;

    /// Ask the host to redraw at its next opportunity. Must not draw synchronously.
    fn request_repaint(&mut self);
}

/// Stub implementation for headless runs and tests. Counts repaint requests.
#[derive(Debug, Default, Clone)]
pub struct StubPlatform {
    repaints: Rc<Cell<u64>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the repaint counter, readable after the platform has
    /// been handed to a desktop.
    pub fn repaint_counter(&self) -> Rc<Cell<u64>> {
        Rc::clone(&self.repaints)
    }
}

impl Platform for StubPlatform {
    fn initialize(&mut self) -> Result<()> {
        tracing::info!("StubPlatform initialized (no-op)");
        Ok(())
    }

    fn request_repaint(&mut self) {
        self.repaints.set(self.repaints.get() + 1);
        tracing::trace!("Repaint requested ({} total)", self.repaints.get());
    }
}
