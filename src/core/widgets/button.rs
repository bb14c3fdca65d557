use crate::core::errors::{CoreError, Result};
use crate::core::widgets::label::LabelData;
use crate::core::widgets::{Action, WidgetState};
use crate::core::window::{Anchors, WindowId, WindowKind, WindowNode, WindowTree};
use crate::util::color::Color;
use crate::util::geometry::Rect;

/// Colours of a button in each visual state.
#[derive(Debug, Clone, Copy)]
pub struct ButtonStyle {
    pub background: Color,
    pub hover_background: Color,
    pub pressed_background: Color,
    pub font_color: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::LIGHT_GRAY,
            hover_background: Color::LIGHT_BLUE,
            pressed_background: Color::ORANGE,
            font_color: Color::BLACK,
        }
    }
}

#[derive(Debug)]
pub struct ButtonData {
    pub label: LabelData,
    pub state: WidgetState,
    pub hover_background: Color,
    pub pressed_background: Color,
    pub action: Option<Action>,
}

pub fn button(
    frame: Rect,
    identifier: impl Into<String>,
    anchors: Anchors,
    text: impl Into<String>,
    style: ButtonStyle,
    action: Option<Action>,
) -> WindowNode {
    let mut label = LabelData::new(text);
    label.font_color = style.font_color;
    WindowNode::new(frame.x, frame.y, frame.width, frame.height, identifier)
        .with_anchors(anchors)
        .with_background(Some(style.background))
        .with_kind(WindowKind::Button(ButtonData {
            label,
            state: WidgetState::Normal,
            hover_background: style.hover_background,
            pressed_background: style.pressed_background,
            action,
        }))
}

impl WindowTree {
    /// Background a button shows for its current state.
    pub fn button_background(&self, id: WindowId) -> Result<Option<Color>> {
        let node = self.node(id)?;
        match &node.kind {
            WindowKind::Button(data) => Ok(match data.state {
                WidgetState::Normal => node.background,
                WidgetState::Hovered => Some(data.hover_background),
                WidgetState::Pressed => Some(data.pressed_background),
            }),
            other => Err(CoreError::invalid_state(Some(id), other.name())),
        }
    }

    pub fn set_button_action(&mut self, id: WindowId, action: Action) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            WindowKind::Button(data) => {
                data.action = Some(action);
                Ok(())
            }
            other => Err(CoreError::invalid_state(Some(id), other.name())),
        }
    }

    /// Run a button's action and leave it hovered.
    ///
    /// The action may mutate the tree freely, including removing the button
    /// itself; it is only put back if the button still exists.
    pub fn click_button(&mut self, id: WindowId) -> Result<()> {
        let action = match &mut self.node_mut(id)?.kind {
            WindowKind::Button(data) => data.action.take(),
            other => return Err(CoreError::invalid_state(Some(id), other.name())),
        };
        tracing::debug!("Button {:?} clicked", id);

        let Some(mut action) = action else {
            return self.set_widget_state(id, WidgetState::Hovered);
        };
        action.call(self, id);

        if let Some(WindowKind::Button(data)) = self.get_mut(id).map(|n| &mut n.kind) {
            if data.action.is_none() {
                data.action = Some(action);
            }
            data.state = WidgetState::Hovered;
        }
        Ok(())
    }
}
