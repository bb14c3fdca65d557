use crate::core::errors::{CoreError, Result};
use crate::core::window::{Anchors, WindowId, WindowKind, WindowNode, WindowTree};
use crate::util::color::Color;
use crate::util::geometry::Rect;

/// Text drawn by the external context at a fixed inset.
#[derive(Debug, Clone)]
pub struct LabelData {
    pub text: String,
    pub font_color: Color,
}

impl LabelData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_color: Color::BLACK,
        }
    }
}

pub fn label(
    frame: Rect,
    identifier: impl Into<String>,
    anchors: Anchors,
    text: impl Into<String>,
) -> WindowNode {
    WindowNode::new(frame.x, frame.y, frame.width, frame.height, identifier)
        .with_anchors(anchors)
        .with_background(None)
        .with_kind(WindowKind::Label(LabelData::new(text)))
}

impl WindowTree {
    /// Text of a label or button.
    pub fn label_text(&self, id: WindowId) -> Result<&str> {
        match &self.node(id)?.kind {
            WindowKind::Label(data) => Ok(&data.text),
            WindowKind::Button(data) => Ok(&data.label.text),
            other => Err(CoreError::invalid_state(Some(id), other.name())),
        }
    }

    pub fn set_label_text(&mut self, id: WindowId, text: impl Into<String>) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            WindowKind::Label(data) => data.text = text.into(),
            WindowKind::Button(data) => data.label.text = text.into(),
            other => return Err(CoreError::invalid_state(Some(id), other.name())),
        }
        Ok(())
    }
}
