use crate::core::window::{WindowId, WindowTree};

/// Pointer state for the desktop seat: position, hover target and held buttons.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Absolute pointer position in screen coordinates
    pub x: f64,
    pub y: f64,
    /// Deepest node under the pointer while no button is held
    pub hovered: Option<WindowId>,
    /// Number of buttons currently pressed
    pub button_count: u32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track button press/release
    pub fn update_button(&mut self, pressed: bool) {
        if pressed {
            self.button_count = self.button_count.saturating_add(1);
        } else {
            self.button_count = self.button_count.saturating_sub(1);
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.button_count > 0
    }

    /// Move the pointer and re-resolve the hover target.
    ///
    /// Returns `(left, entered)` when the hovered node changed. Hover is frozen
    /// while a button is held.
    pub fn update_hover(
        &mut self,
        tree: &WindowTree,
        x: f64,
        y: f64,
    ) -> Option<(Option<WindowId>, Option<WindowId>)> {
        self.x = x;
        self.y = y;
        if self.is_pressed() {
            return None;
        }
        let located = tree.locate(x, y);
        let current = (located != tree.root()).then_some(located);
        if current == self.hovered {
            return None;
        }
        let previous = std::mem::replace(&mut self.hovered, current);
        Some((previous, current))
    }
}
