//! Window manager: decorations, screen containment and title-bar actions.

use std::collections::HashMap;

use crate::config::DesktopConfig;
use crate::core::errors::Result;
use crate::core::widgets::label;
use crate::core::window::maximize::MaximizeState;
use crate::core::window::{Anchors, Role, WindowId, WindowKind, WindowNode, WindowTree};
use crate::util::color::Color;
use crate::util::geometry::Rect;

/// True if a top-level window of `width` placed at `(x, y)` keeps at least
/// `min_title_visibility` pixels of its title bar on screen in every direction.
pub fn title_bar_visible(config: &DesktopConfig, width: f64, x: f64, y: f64) -> bool {
    let margin = config.min_title_visibility;
    let visible_left = x + width > margin;
    let visible_right = x < config.screen_width - margin;
    let visible_top = y + config.title_bar_height > margin;
    let visible_bottom = y < config.screen_height - margin;
    visible_left && visible_right && visible_top && visible_bottom
}

/// Outcome of a click on a title-bar button.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleAction {
    Closed { window: WindowId, identifier: String },
    Minimized(WindowId),
    Maximized(WindowId),
    Restored(WindowId),
}

#[derive(Debug, Default)]
pub struct WindowManager {
    maximized: HashMap<WindowId, MaximizeState>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_maximized(&self, window: WindowId) -> bool {
        self.maximized.contains_key(&window)
    }

    /// Regenerate the decorations of every top-level window.
    pub fn decorate_all(&self, tree: &mut WindowTree) -> Result<()> {
        for window in tree.top_level_windows().to_vec() {
            self.decorate(tree, window)?;
        }
        Ok(())
    }

    /// Replace the title bar of a top-level window with a fresh one.
    ///
    /// The new title bar is appended last so it sits in front of the content.
    pub fn decorate(&self, tree: &mut WindowTree, window: WindowId) -> Result<()> {
        let stale: Vec<WindowId> = tree
            .children_of(window)
            .iter()
            .copied()
            .filter(|&id| tree.get(id).is_some_and(|n| n.role.is_decoration()))
            .collect();
        for id in stale {
            tree.remove(id)?;
        }

        let config = tree.config().clone();
        let (width, owner) = {
            let node = tree.node(window)?;
            (node.width, node.identifier.clone())
        };
        let background = if tree.has_focus(window) {
            Color::DARK_GREEN
        } else {
            Color::LIGHT_GREEN
        };

        let bar_identifier = format!("{}{}", owner, Role::TitleBar.suffix());
        let title_bar = tree.insert(
            WindowNode::new(0.0, 0.0, width, config.title_bar_height, bar_identifier.clone())
                .with_anchors(Anchors::TOP | Anchors::LEFT | Anchors::RIGHT)
                .with_background(Some(background))
                .with_role(Role::TitleBar),
        );
        tree.attach_child(window, title_bar)?;

        let mut title = label(
            Rect::new(0.0, 0.0, width / 2.0, config.title_bar_height),
            format!("{}{}", bar_identifier, Role::Title.suffix()),
            Anchors::TOP | Anchors::LEFT,
            owner,
        )
        .with_background(Some(background))
        .with_role(Role::Title);
        if let WindowKind::Label(data) = &mut title.kind {
            data.font_color = Color::WHITE;
        }
        let title = tree.insert(title);
        tree.attach_child(title_bar, title)?;

        let stride = config.title_button_width + config.title_button_spacing;
        let buttons = [
            (1.0, Role::CloseButton),
            (2.0, Role::MaximizeButton),
            (3.0, Role::MinimizeButton),
        ];
        for (slot, role) in buttons {
            let node = WindowNode::new(
                width - slot * stride,
                4.0,
                config.title_button_width,
                config.title_button_height(),
                format!("{}{}", bar_identifier, role.suffix()),
            )
            .with_anchors(Anchors::TOP | Anchors::RIGHT)
            .with_background(Some(background))
            .with_role(role);
            let id = tree.insert(node);
            tree.attach_child(title_bar, id)?;
        }

        tracing::trace!("Decorated {:?}", window);
        Ok(())
    }

    /// Act on a click that landed on a decoration node.
    pub fn handle_title_bar_click(
        &mut self,
        tree: &mut WindowTree,
        target: WindowId,
    ) -> Result<Option<TitleAction>> {
        let role = tree.node(target)?.role;
        let Some(window) = tree.top_level_of(target) else {
            return Ok(None);
        };
        let action = match role {
            Role::CloseButton => Some(self.close_window(tree, window)?),
            Role::MinimizeButton => Some(self.minimize_window(tree, window)?),
            Role::MaximizeButton => Some(self.toggle_maximize(tree, window)?),
            _ => None,
        };
        Ok(action)
    }

    pub fn close_window(&mut self, tree: &mut WindowTree, window: WindowId) -> Result<TitleAction> {
        let identifier = tree.node(window)?.identifier.clone();
        tree.remove(window)?;
        self.maximized.remove(&window);
        crate::wlog!(crate::util::logging::WM, "Closed window {}", identifier);
        Ok(TitleAction::Closed { window, identifier })
    }

    pub fn minimize_window(&mut self, tree: &mut WindowTree, window: WindowId) -> Result<TitleAction> {
        let node = tree.node_mut(window)?;
        node.minimized = true;
        tracing::info!("Minimized {}", node.identifier);
        tree.send_to_back(window)?;
        Ok(TitleAction::Minimized(window))
    }

    /// Toggle between the full screen box and the remembered box.
    pub fn toggle_maximize(&mut self, tree: &mut WindowTree, window: WindowId) -> Result<TitleAction> {
        let action = if let Some(state) = self.maximized.remove(&window) {
            let previous = state.previous;
            tree.resize(window, previous.x, previous.y, previous.width, previous.height)?;
            TitleAction::Restored(window)
        } else {
            let previous = tree.node(window)?.frame();
            let (width, height) = (tree.config().screen_width, tree.config().screen_height);
            tree.resize(window, 0.0, 0.0, width, height)?;
            self.maximized.insert(window, MaximizeState::new(previous));
            TitleAction::Maximized(window)
        };
        self.decorate(tree, window)?;
        tracing::debug!("{:?}", action);
        Ok(action)
    }
}
