use crate::core::errors::Result;
use crate::core::window::{Anchors, Axis, WindowId, WindowKind, WindowNode, WindowTree};
use crate::util::geometry::Rect;

#[derive(Debug, Clone, Default)]
pub struct ContainerData {
    pub axis: Axis,
    pub spacing: f64,
    /// Windows whose boxes this container owns, in layout order.
    pub managed: Vec<WindowId>,
}

pub fn container(
    frame: Rect,
    identifier: impl Into<String>,
    anchors: Anchors,
    axis: Axis,
    spacing: f64,
) -> WindowNode {
    WindowNode::new(frame.x, frame.y, frame.width, frame.height, identifier)
        .with_anchors(anchors)
        .with_background(None)
        .with_kind(WindowKind::Container(ContainerData {
            axis,
            spacing,
            managed: Vec::new(),
        }))
}

impl WindowTree {
    /// Attach a container under `parent` and hand it `managed` in order.
    pub fn attach_container(
        &mut self,
        parent: WindowId,
        node: WindowNode,
        managed: &[WindowId],
    ) -> Result<WindowId> {
        let id = self.insert(node);
        self.attach_child(parent, id)?;
        for &window in managed {
            self.add_to_container(id, window)?;
        }
        Ok(id)
    }

    pub fn managed_windows(&self, container: WindowId) -> &[WindowId] {
        match self.get(container).map(|n| &n.kind) {
            Some(WindowKind::Container(data)) => data.managed.as_slice(),
            _ => &[],
        }
    }
}
