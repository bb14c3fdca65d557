//! Z-order and focus.
//!
//! Focus is structural: the focused window is the last entry of the root's
//! children, so raising a window and focusing it are the same operation.

use crate::core::errors::{CoreError, Result};
use crate::core::window::tree::WindowTree;
use crate::core::window::window::WindowId;

impl WindowTree {
    /// Raise the top-level ancestor of `id` to the front.
    ///
    /// Returns the raised window, or `None` when `id` is the root (a click on
    /// the background). Raising the already-frontmost window leaves the order
    /// untouched.
    pub fn bring_to_front(&mut self, id: WindowId) -> Result<Option<WindowId>> {
        let root = self.root();
        if id == root {
            return Ok(None);
        }
        self.node(id)?;
        let top = self
            .top_level_of(id)
            .ok_or(CoreError::NotAChild { parent: root, child: id })?;

        if self.focused() == Some(top) {
            return Ok(Some(top));
        }

        let origin = self.to_screen(top, 0.0, 0.0)?;
        self.unlink(root, top)?;
        let node = self.node_mut(top)?;
        node.x = origin.x;
        node.y = origin.y;
        node.parent = Some(root);
        self.node_mut(root)?.children.push(top);

        tracing::debug!("Brought {:?} to front", top);
        Ok(Some(top))
    }

    /// Move a top-level window behind all others.
    pub fn send_to_back(&mut self, window: WindowId) -> Result<()> {
        let root = self.root();
        if !self.is_top_level(window) {
            return Err(CoreError::NotAChild { parent: root, child: window });
        }
        let children = &mut self.node_mut(root)?.children;
        children.retain(|&id| id != window);
        children.insert(0, window);
        Ok(())
    }

    pub fn has_focus(&self, id: WindowId) -> bool {
        self.focused() == Some(id)
    }
}
