use crate::core::errors::{CoreError, Result};
use crate::core::widgets::{ValueCallback, WidgetState};
use crate::core::window::{Anchors, WindowId, WindowKind, WindowNode, WindowTree};
use crate::util::color::Color;
use crate::util::geometry::Rect;

#[derive(Debug)]
pub struct SliderData {
    /// Always within `[0, 1]`.
    pub value: f64,
    pub state: WidgetState,
    pub handle_width: f64,
    pub handle_color: Color,
    pub on_change: Option<ValueCallback>,
}

/// Map a pointer x (local to the slider) to a value.
pub fn value_from_pointer(width: f64, handle_width: f64, local_x: f64) -> f64 {
    let usable = width - handle_width;
    if usable <= 0.0 {
        return 0.0;
    }
    (local_x - handle_width / 2.0).clamp(0.0, usable) / usable
}

/// Local x of the handle centre for a value.
pub fn handle_center(width: f64, handle_width: f64, value: f64) -> f64 {
    let usable = (width - handle_width).max(0.0);
    handle_width / 2.0 + value.clamp(0.0, 1.0) * usable
}

pub fn slider(
    frame: Rect,
    identifier: impl Into<String>,
    anchors: Anchors,
    handle_width: f64,
    value: f64,
    on_change: Option<ValueCallback>,
) -> WindowNode {
    WindowNode::new(frame.x, frame.y, frame.width, frame.height, identifier)
        .with_anchors(anchors)
        .with_background(Some(Color::LIGHT_GRAY))
        .with_kind(WindowKind::Slider(SliderData {
            value: value.clamp(0.0, 1.0),
            state: WidgetState::Normal,
            handle_width,
            handle_color: Color::GRAY,
            on_change,
        }))
}

impl WindowTree {
    pub fn slider_value(&self, id: WindowId) -> Result<f64> {
        match &self.node(id)?.kind {
            WindowKind::Slider(data) => Ok(data.value),
            other => Err(CoreError::invalid_state(Some(id), other.name())),
        }
    }

    /// Set a slider's value, notifying its callback if it changed.
    pub fn set_slider_value(&mut self, id: WindowId, value: f64) -> Result<f64> {
        let value = value.clamp(0.0, 1.0);
        let callback = match &mut self.node_mut(id)?.kind {
            WindowKind::Slider(data) => {
                if data.value == value {
                    return Ok(value);
                }
                data.value = value;
                data.on_change.take()
            }
            other => return Err(CoreError::invalid_state(Some(id), other.name())),
        };
        tracing::trace!("Slider {:?} value={}", id, value);

        if let Some(mut callback) = callback {
            callback.call(self, id, value);
            if let Some(WindowKind::Slider(data)) = self.get_mut(id).map(|n| &mut n.kind) {
                if data.on_change.is_none() {
                    data.on_change = Some(callback);
                }
            }
        }
        Ok(value)
    }

    /// Track the pointer at a slider-local x coordinate.
    pub fn drag_slider(&mut self, id: WindowId, local_x: f64) -> Result<f64> {
        let node = self.node(id)?;
        let value = match &node.kind {
            WindowKind::Slider(data) => value_from_pointer(node.width, data.handle_width, local_x),
            other => return Err(CoreError::invalid_state(Some(id), other.name())),
        };
        self.set_slider_value(id, value)
    }
}
