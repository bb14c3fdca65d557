//! Window tree management.
//!
//! Nodes live in a slot arena addressed by `WindowId`. Each node owns the
//! ordered list of its children; index order is z-order (back to front).

use slotmap::SlotMap;

use crate::config::DesktopConfig;
use crate::core::errors::{CoreError, Result};
use crate::core::window::window::{Role, WindowId, WindowKind, WindowNode};
use crate::util::geometry::{Point, Rect, Size};

/// Identifier of the screen root.
pub const SCREEN_IDENTIFIER: &str = "SCREEN";

/// Manages the hierarchy and stacking order of windows.
#[derive(Debug)]
pub struct WindowTree {
    nodes: SlotMap<WindowId, WindowNode>,
    root: WindowId,
    config: DesktopConfig,
}

impl WindowTree {
    pub fn new(config: DesktopConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(
            WindowNode::new(
                0.0,
                0.0,
                config.screen_width,
                config.screen_height,
                SCREEN_IDENTIFIER,
            )
            .with_background(None),
        );
        Self { nodes, root, config }
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        self.nodes.get_mut(id)
    }

    pub fn node(&self, id: WindowId) -> Result<&WindowNode> {
        self.nodes.get(id).ok_or(CoreError::UnknownWindow(id))
    }

    pub fn node_mut(&mut self, id: WindowId) -> Result<&mut WindowNode> {
        self.nodes.get_mut(id).ok_or(CoreError::UnknownWindow(id))
    }

    /// Insert a node into the arena without attaching it anywhere.
    pub fn insert(&mut self, node: WindowNode) -> WindowId {
        let identifier = node.identifier.clone();
        let id = self.nodes.insert(WindowNode {
            parent: None,
            ..node
        });
        tracing::trace!("Inserted window {:?} ({})", id, identifier);
        id
    }

    pub fn parent_of(&self, id: WindowId) -> Option<WindowId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children_of(&self, id: WindowId) -> &[WindowId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Top-level windows in z-order (back to front).
    pub fn top_level_windows(&self) -> &[WindowId] {
        self.children_of(self.root)
    }

    /// The focused window is structurally the frontmost top-level window.
    pub fn focused(&self) -> Option<WindowId> {
        self.top_level_windows().last().copied()
    }

    pub fn is_top_level(&self, id: WindowId) -> bool {
        id != self.root && self.parent_of(id) == Some(self.root)
    }

    /// Walk parents until the direct child of the root is reached.
    /// Returns `None` for the root itself and for nodes not attached under it.
    pub fn top_level_of(&self, id: WindowId) -> Option<WindowId> {
        if id == self.root {
            return None;
        }
        let mut current = id;
        loop {
            match self.parent_of(current) {
                Some(parent) if parent == self.root => return Some(current),
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// True if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: WindowId, id: WindowId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent_of(node_id);
        }
        false
    }

    /// Attach `child` as the frontmost child of `parent`.
    ///
    /// Records the child's right/bottom margins against the parent's current
    /// box and runs an initial resize pass so anchors apply immediately.
    pub fn attach_child(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        if child == self.root {
            return Err(CoreError::RootOperation("attach the screen as a child"));
        }
        let parent_size = self.node(parent)?.size();
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(CoreError::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(CoreError::WouldCycle(child));
        }

        let child_node = self.node_mut(child)?;
        child_node.parent = Some(parent);
        child_node.margin_right = parent_size.width - (child_node.x + child_node.width);
        child_node.margin_bottom = parent_size.height - (child_node.y + child_node.height);
        tracing::debug!(
            "Attached {} to {:?} (margins r={} b={})",
            child_node.identifier,
            parent,
            child_node.margin_right,
            child_node.margin_bottom
        );
        self.node_mut(parent)?.children.push(child);

        self.relayout(child)
    }

    /// Unlink `child` from `parent`. The subtree stays in the arena, unattached,
    /// and may be attached again. A child managed by a container outside the
    /// subtree leaves that container's layout.
    pub fn detach(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        self.unlink(parent, child)?;
        let managed_by = self.node(child)?.managed_by;
        if let Some(container) = managed_by {
            if !self.is_ancestor(child, container) && self.unmanage(container, child) {
                self.layout_container(container)?;
            }
        }
        Ok(())
    }

    /// Remove `child` from `parent`'s child list without touching layout state.
    pub(crate) fn unlink(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        self.node(child)?;
        let parent_node = self.node_mut(parent)?;
        let index = parent_node
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(CoreError::NotAChild { parent, child })?;
        parent_node.children.remove(index);
        self.node_mut(child)?.parent = None;
        tracing::debug!("Detached {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Detach a node from its parent (if any) and drop its entire subtree.
    ///
    /// Management links crossing the subtree boundary are cut in both
    /// directions and surviving containers re-flow.
    pub fn remove(&mut self, id: WindowId) -> Result<()> {
        if id == self.root {
            return Err(CoreError::RootOperation("remove the screen"));
        }
        if let Some(parent) = self.node(id)?.parent {
            self.unlink(parent, id)?;
        }
        let doomed = self.subtree(id);
        let mut reflow = Vec::new();
        for &node_id in &doomed {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            let managed_by = node.managed_by;
            let managed = match &node.kind {
                WindowKind::Container(data) => data.managed.clone(),
                _ => Vec::new(),
            };
            if let Some(container) = managed_by {
                if self.unmanage(container, node_id) && !doomed.contains(&container) {
                    reflow.push(container);
                }
            }
            for window in managed {
                if !doomed.contains(&window) {
                    self.unmanage(node_id, window);
                }
            }
        }
        for node_id in doomed {
            if let Some(node) = self.nodes.remove(node_id) {
                tracing::trace!("Dropped window {}", node.identifier);
            }
        }
        for container in reflow {
            if self.contains(container) {
                self.layout_container(container)?;
            }
        }
        Ok(())
    }

    /// `id` followed by all of its descendants, pre-order.
    pub fn subtree(&self, id: WindowId) -> Vec<WindowId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.nodes.get(node_id) {
                out.push(node_id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<WindowId> {
        self.subtree(self.root)
            .into_iter()
            .find(|&id| self.nodes[id].identifier == identifier)
    }

    pub fn find_child_by_role(&self, parent: WindowId, role: Role) -> Option<WindowId> {
        self.children_of(parent)
            .iter()
            .copied()
            .find(|&id| self.nodes[id].role == role)
    }

    // =========================================================================
    // Coordinate conversion
    // =========================================================================

    /// Convert a point local to `id` into absolute screen coordinates.
    pub fn to_screen(&self, id: WindowId, local_x: f64, local_y: f64) -> Result<Point> {
        let node = self.node(id)?;
        let mut point = Point::new(local_x + node.x, local_y + node.y);
        let mut parent = node.parent;
        while let Some(parent_id) = parent {
            if parent_id == self.root {
                break;
            }
            let parent_node = self.node(parent_id)?;
            point = point.offset(parent_node.x, parent_node.y);
            parent = parent_node.parent;
        }
        Ok(point)
    }

    /// Convert an absolute screen point into `id`'s local coordinate space.
    pub fn from_screen(&self, id: WindowId, screen_x: f64, screen_y: f64) -> Result<Point> {
        let origin = self.to_screen(id, 0.0, 0.0)?;
        Ok(Point::new(screen_x - origin.x, screen_y - origin.y))
    }

    /// Box of `id` in absolute screen coordinates.
    pub fn screen_frame(&self, id: WindowId) -> Result<Rect> {
        let origin = self.to_screen(id, 0.0, 0.0)?;
        Ok(Rect::from_parts(origin, self.node(id)?.size()))
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    pub fn hit_test(&self, id: WindowId, local_x: f64, local_y: f64) -> bool {
        self.nodes
            .get(id)
            .map(|n| n.hit_test(local_x, local_y))
            .unwrap_or(false)
    }

    /// Deepest, frontmost node under an absolute screen point. Falls back to
    /// the root when only the background is hit.
    pub fn locate(&self, x: f64, y: f64) -> WindowId {
        self.locate_in(self.root, x, y)
    }

    /// Deepest, frontmost node under a point local to `id`, or `id` itself.
    pub fn locate_in(&self, id: WindowId, x: f64, y: f64) -> WindowId {
        let Some(node) = self.nodes.get(id) else {
            return id;
        };
        for &child_id in node.children.iter().rev() {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            if child.minimized || child.is_hidden {
                continue;
            }
            let (local_x, local_y) = (x - child.x, y - child.y);
            if child.kind.is_container() {
                // Never a target itself; its own children may still be.
                let bounds = Rect::new(0.0, 0.0, child.width, child.height);
                if !child.children.is_empty() && bounds.contains_point(local_x, local_y) {
                    let found = self.locate_in(child_id, local_x, local_y);
                    if found != child_id {
                        return found;
                    }
                }
                continue;
            }
            if child.hit_test(local_x, local_y) {
                if child.children.is_empty() {
                    return child_id;
                }
                return self.locate_in(child_id, local_x, local_y);
            }
        }
        id
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Size actually drawn: the box clipped against the parent's right and
    /// bottom edges. Top-level windows are never clipped.
    pub fn effective_draw_size(&self, id: WindowId) -> Size {
        let Some(node) = self.nodes.get(id) else {
            return Size::default();
        };
        match node.parent.and_then(|p| self.nodes.get(p).map(|n| (p, n))) {
            Some((parent_id, parent)) if parent_id != self.root => Size::new(
                node.width.min((parent.width - node.x).max(0.0)),
                node.height.min((parent.height - node.y).max(0.0)),
            ),
            _ => node.size(),
        }
    }

    /// Recompute the derived hidden flag of a single node.
    pub fn refresh_hidden(&mut self, id: WindowId) -> bool {
        let effective = self.effective_draw_size(id);
        let hidden = effective.is_empty();
        if let Some(node) = self.nodes.get_mut(id) {
            if node.is_hidden != hidden {
                tracing::trace!("{} hidden={}", node.identifier, hidden);
            }
            node.is_hidden = hidden;
        }
        hidden
    }

    /// Recompute hidden flags for every attached node.
    pub fn refresh_all_hidden(&mut self) {
        for id in self.subtree(self.root) {
            self.refresh_hidden(id);
        }
    }
}
