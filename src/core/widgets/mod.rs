//! Widget layer: labels, buttons, sliders and auto-layout containers.
//!
//! Widgets are ordinary window nodes whose `WindowKind` carries the
//! kind-specific data. Behaviour lives in `impl WindowTree` blocks per kind.

pub mod label;
pub mod button;
pub mod slider;
pub mod container;

use std::fmt;
use std::str::FromStr;

use crate::core::errors::{CoreError, Result};
use crate::core::window::{WindowId, WindowKind, WindowTree};

pub use button::{button, ButtonData, ButtonStyle};
pub use container::{container, ContainerData};
pub use label::{label, LabelData};
pub use slider::{slider, SliderData};

/// Visual state of an interactive widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

impl WidgetState {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetState::Normal => "NORMAL",
            WidgetState::Hovered => "HOVERED",
            WidgetState::Pressed => "PRESSED",
        }
    }
}

impl FromStr for WidgetState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(WidgetState::Normal),
            "HOVERED" => Ok(WidgetState::Hovered),
            "PRESSED" => Ok(WidgetState::Pressed),
            _ => Err(CoreError::invalid_state(None, s)),
        }
    }
}

/// Callback run when a button is clicked.
pub struct Action(Box<dyn FnMut(&mut WindowTree, WindowId)>);

impl Action {
    pub fn new(f: impl FnMut(&mut WindowTree, WindowId) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn call(&mut self, tree: &mut WindowTree, id: WindowId) {
        (self.0)(tree, id)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Callback run whenever a slider's value changes.
pub struct ValueCallback(Box<dyn FnMut(&mut WindowTree, WindowId, f64)>);

impl ValueCallback {
    pub fn new(f: impl FnMut(&mut WindowTree, WindowId, f64) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn call(&mut self, tree: &mut WindowTree, id: WindowId, value: f64) {
        (self.0)(tree, id, value)
    }
}

impl fmt::Debug for ValueCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueCallback(..)")
    }
}

impl WindowTree {
    /// Current visual state of a button or slider.
    pub fn widget_state(&self, id: WindowId) -> Result<WidgetState> {
        match &self.node(id)?.kind {
            WindowKind::Button(data) => Ok(data.state),
            WindowKind::Slider(data) => Ok(data.state),
            other => Err(CoreError::invalid_state(Some(id), other.name())),
        }
    }

    /// Request a visual state. Buttons accept every state; sliders only
    /// `Normal` and `Pressed`; other kinds have no visual state at all.
    pub fn set_widget_state(&mut self, id: WindowId, state: WidgetState) -> Result<()> {
        let node = self.node_mut(id)?;
        let previous = match &mut node.kind {
            WindowKind::Button(data) => std::mem::replace(&mut data.state, state),
            WindowKind::Slider(data) if state != WidgetState::Hovered => {
                std::mem::replace(&mut data.state, state)
            }
            _ => return Err(CoreError::invalid_state(Some(id), state.name())),
        };
        if previous != state {
            tracing::trace!("{} {} -> {}", node.identifier, previous.name(), state.name());
        }
        Ok(())
    }
}
