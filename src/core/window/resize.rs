//! Anchor-based resize propagation.
//!
//! A node's box is recomputed from its direct parent's box and its anchor
//! flags, then the same pass descends into every child.

use crate::core::errors::{CoreError, Result};
use crate::core::window::tree::WindowTree;
use crate::core::window::window::{Anchors, WindowId};
use crate::util::geometry::Rect;

/// Resolve one axis of a non-top-level node.
///
/// `leading`/`trailing` are the LEFT/RIGHT (or TOP/BOTTOM) anchor bits.
/// Returns the new `(position, size)`.
pub fn anchor_axis(
    leading: bool,
    trailing: bool,
    position: f64,
    size: f64,
    parent_size: f64,
    trailing_margin: f64,
) -> (f64, f64) {
    match (leading, trailing) {
        (false, false) => ((parent_size - size) / 2.0, size),
        (true, true) => (position, parent_size - position - trailing_margin),
        (false, true) => (parent_size - size - trailing_margin, size),
        (true, false) => (position, size),
    }
}

impl WindowTree {
    /// Explicitly set a node's box and propagate to its subtree.
    ///
    /// Top-level windows take the requested box, floored to the configured
    /// minimum window size. Nested nodes take the requested box as their new
    /// reference (margins are recaptured) and then have their anchors applied.
    pub fn resize(&mut self, id: WindowId, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if id == self.root() {
            return Err(CoreError::RootOperation("resize the screen as a window"));
        }
        let parent = self.node(id)?.parent;
        let requested = Rect::new(x, y, width, height);

        match parent {
            Some(parent_id) if parent_id == self.root() => {
                let frame = self.floor_top_level(requested);
                self.node_mut(id)?.set_frame(frame);
                tracing::debug!("Resized top-level {:?} to {:?}", id, frame);
            }
            Some(parent_id) => {
                let parent_size = self.node(parent_id)?.size();
                let node = self.node_mut(id)?;
                node.set_frame(requested);
                node.margin_right = parent_size.width - requested.right();
                node.margin_bottom = parent_size.height - requested.bottom();
            }
            None => self.node_mut(id)?.set_frame(requested),
        }

        self.relayout(id)
    }

    /// Recompute `id`'s box from its current parent, then descend.
    pub fn relayout(&mut self, id: WindowId) -> Result<()> {
        let (parent, managed, frame) = {
            let node = self.node(id)?;
            (node.parent, node.managed_by.is_some(), node.frame())
        };
        match parent {
            Some(parent) if parent == self.root() => {
                let frame = self.floor_top_level(frame);
                self.node_mut(id)?.set_frame(frame);
            }
            Some(parent) if !managed => self.apply_anchors(id, parent)?,
            _ => {}
        }
        self.refresh_hidden(id);

        if self.node(id)?.kind.is_container() {
            self.layout_container(id)?;
        }

        let children = self.node(id)?.children.clone();
        for child in children {
            self.relayout(child)?;
        }
        Ok(())
    }

    fn floor_top_level(&self, frame: Rect) -> Rect {
        let config = self.config();
        Rect::new(
            frame.x,
            frame.y,
            frame.width.max(config.min_window_width),
            frame.height.max(config.min_window_height),
        )
    }

    /// Apply anchor semantics of `id` against its direct parent's box.
    fn apply_anchors(&mut self, id: WindowId, parent: WindowId) -> Result<()> {
        let parent_size = self.node(parent)?.size();
        let parent_is_top_level = self.is_top_level(parent);
        let title_bar_height = self.config().title_bar_height;
        let min_extent = self.config().min_child_extent;

        let node = self.node_mut(id)?;
        let anchors = node.anchors;
        let (mut x, mut width) = anchor_axis(
            anchors.contains(Anchors::LEFT),
            anchors.contains(Anchors::RIGHT),
            node.x,
            node.width,
            parent_size.width,
            node.margin_right,
        );
        let (mut y, mut height) = anchor_axis(
            anchors.contains(Anchors::TOP),
            anchors.contains(Anchors::BOTTOM),
            node.y,
            node.height,
            parent_size.height,
            node.margin_bottom,
        );

        // Decorations are placed by the window manager and keep their exact metrics.
        if !node.role.is_decoration() {
            let min_y = if parent_is_top_level { title_bar_height } else { 0.0 };
            x = x.max(0.0);
            y = y.max(min_y);
            width = width.max(min_extent);
            height = height.max(min_extent);
        }

        node.set_frame(Rect::new(x, y, width, height));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::anchor_axis;

    #[test]
    fn test_anchor_axis_regimes() {
        // centered
        assert_eq!(anchor_axis(false, false, 0.0, 40.0, 140.0, 0.0), (50.0, 40.0));
        // stretched, both margins kept
        assert_eq!(anchor_axis(true, true, 20.0, 40.0, 140.0, 20.0), (20.0, 100.0));
        // trailing pinned
        assert_eq!(anchor_axis(false, true, 0.0, 40.0, 140.0, 10.0), (90.0, 40.0));
        // leading pinned
        assert_eq!(anchor_axis(true, false, 7.0, 40.0, 140.0, 10.0), (7.0, 40.0));
    }
}
