//! Container auto-layout.
//!
//! A container distributes its managed windows along one axis with uniform
//! spacing. Managed windows may be the container's own children or siblings
//! of it; their boxes are always expressed in their own parent's space.

use crate::core::errors::{CoreError, Result};
use crate::core::window::tree::WindowTree;
use crate::core::window::window::{WindowId, WindowKind};
use crate::util::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Extent of each managed child along the layout axis.
pub fn child_extent(container_extent: f64, spacing: f64, count: usize, min_extent: f64) -> f64 {
    if count == 0 {
        return min_extent;
    }
    let total_spacing = spacing * (count as f64 - 1.0);
    ((container_extent - total_spacing) / count as f64).max(min_extent)
}

impl WindowTree {
    /// Put `window` under the layout of `container` and re-flow it.
    pub fn add_to_container(&mut self, container: WindowId, window: WindowId) -> Result<()> {
        self.node(window)?;
        if window == container
            || self.is_ancestor(window, container)
            || self.manages_transitively(window, container)
        {
            return Err(CoreError::WouldCycle(window));
        }
        match self.node(window)?.managed_by {
            Some(owner) if owner != container => return Err(CoreError::AlreadyAttached(window)),
            _ => {}
        }
        let WindowKind::Container(data) = &mut self.node_mut(container)?.kind else {
            return Err(CoreError::invalid_state(Some(container), "not a container"));
        };
        if !data.managed.contains(&window) {
            data.managed.push(window);
        }
        self.node_mut(window)?.managed_by = Some(container);
        self.layout_container(container)
    }

    /// Release `window` from `container`'s layout and re-flow the rest.
    pub fn remove_from_container(&mut self, container: WindowId, window: WindowId) -> Result<()> {
        if !self.unmanage(container, window) {
            return Err(CoreError::NotAChild {
                parent: container,
                child: window,
            });
        }
        self.layout_container(container)
    }

    /// True if `target` is reachable from `container` through the managed
    /// sets of nested containers.
    fn manages_transitively(&self, container: WindowId, target: WindowId) -> bool {
        let mut seen = Vec::new();
        let mut stack = vec![container];
        while let Some(id) = stack.pop() {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(WindowKind::Container(data)) = self.get(id).map(|n| &n.kind) {
                if data.managed.contains(&target) {
                    return true;
                }
                stack.extend(data.managed.iter().copied());
            }
        }
        false
    }

    /// Drop `window` from `container`'s managed set. A released window takes
    /// its current box as the new anchor reference.
    pub(crate) fn unmanage(&mut self, container: WindowId, window: WindowId) -> bool {
        let removed = match self.get_mut(container).map(|n| &mut n.kind) {
            Some(WindowKind::Container(data)) => {
                let before = data.managed.len();
                data.managed.retain(|&id| id != window);
                before != data.managed.len()
            }
            _ => false,
        };
        let parent_size = self
            .parent_of(window)
            .and_then(|parent| self.get(parent))
            .map(|parent| parent.size());
        if let Some(node) = self.get_mut(window) {
            if node.managed_by == Some(container) {
                node.managed_by = None;
                if let Some(size) = parent_size {
                    node.margin_right = size.width - (node.x + node.width);
                    node.margin_bottom = size.height - (node.y + node.height);
                }
            }
        }
        removed
    }

    /// Re-flow the managed windows of `container`. Nested containers re-flow
    /// immediately as part of this pass.
    pub fn layout_container(&mut self, container: WindowId) -> Result<()> {
        let (axis, spacing, managed) = match &self.node(container)?.kind {
            WindowKind::Container(data) => (data.axis, data.spacing, data.managed.clone()),
            _ => return Ok(()),
        };
        let managed: Vec<WindowId> = managed.into_iter().filter(|&id| self.contains(id)).collect();
        if managed.is_empty() {
            return Ok(());
        }

        let container_node = self.node(container)?;
        let container_size = container_node.size();
        let container_local = container_node.origin();
        let container_screen = self.to_screen(container, 0.0, 0.0)?;
        let along = match axis {
            Axis::Horizontal => container_size.width,
            Axis::Vertical => container_size.height,
        };
        let extent = child_extent(along, spacing, managed.len(), self.config().min_child_extent);
        tracing::trace!(
            "Laying out {} children of {:?} along {:?}: extent={}",
            managed.len(),
            container,
            axis,
            extent
        );

        let mut cursor = 0.0;
        for id in managed {
            let base = match self.parent_of(id) {
                Some(parent) if parent == container => Point::ORIGIN,
                Some(parent) => {
                    let parent_screen = self.to_screen(parent, 0.0, 0.0)?;
                    let (dx, dy) = container_screen.delta_from(parent_screen);
                    Point::new(dx, dy)
                }
                None => container_local,
            };
            let frame = match axis {
                Axis::Horizontal => {
                    Rect::new(base.x + cursor, base.y, extent, container_size.height)
                }
                Axis::Vertical => Rect::new(base.x, base.y + cursor, container_size.width, extent),
            };
            cursor += extent + spacing;

            self.node_mut(id)?.set_frame(frame);
            self.relayout(id)?;
        }
        Ok(())
    }
}
