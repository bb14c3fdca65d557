//! Central desktop state machine.
//!
//! The `Desktop` struct ties together:
//! - the window tree (geometry, anchors, z-order)
//! - the window manager (decorations, title-bar actions)
//! - the interaction session and pointer state
//! - the host platform, asked for repaints after every mutating event
//!
//! Every entry point runs to completion before the next event is accepted.

use std::collections::HashMap;

use crate::config::DesktopConfig;
use crate::core::errors::Result;
use crate::core::input::{Command, InputEvent, InteractionSession, PointerState};
use crate::core::manager::{TitleAction, WindowManager};
use crate::core::render::{self, DrawContext};
use crate::core::widgets::WidgetState;
use crate::core::window::{WindowId, WindowKind, WindowNode, WindowTree};
use crate::platform::Platform;
use crate::util::color::Color;
use crate::util::geometry::Point;

/// Handler for characters typed while a window is focused.
pub type KeyHandler = Box<dyn FnMut(&mut WindowTree, WindowId, char)>;

/// Events emitted by the desktop for the host to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopEvent {
    WindowCreated { window: WindowId },
    WindowClosed { window: WindowId, identifier: String },
    WindowMinimized { window: WindowId },
    WindowRestored { window: WindowId },
    WindowMaximized { window: WindowId, maximized: bool },
    FocusChanged { window: WindowId },
    WindowMoved { window: WindowId, x: f64, y: f64 },
    WindowResized { window: WindowId, width: f64, height: f64 },
    Clicked { target: WindowId },
    KeyDelivered { window: WindowId, key: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetKind {
    Button,
    Slider,
    Other,
}

pub struct Desktop {
    tree: WindowTree,
    manager: WindowManager,
    session: InteractionSession,
    pointer: PointerState,
    platform: Box<dyn Platform>,
    key_handlers: HashMap<WindowId, KeyHandler>,
    instances: HashMap<String, usize>,
    pending_events: Vec<DesktopEvent>,
}

impl Desktop {
    pub fn new(config: DesktopConfig, platform: Box<dyn Platform>) -> Self {
        crate::wlog!(
            crate::util::logging::DESKTOP,
            "Creating desktop {}x{}",
            config.screen_width,
            config.screen_height
        );
        Self {
            tree: WindowTree::new(config),
            manager: WindowManager::new(),
            session: InteractionSession::new(),
            pointer: PointerState::new(),
            platform,
            key_handlers: HashMap::new(),
            instances: HashMap::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn tree(&self) -> &WindowTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WindowTree {
        &mut self.tree
    }

    pub fn config(&self) -> &DesktopConfig {
        self.tree.config()
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<DesktopEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn request_repaint(&mut self) {
        self.platform.request_repaint();
    }

    // =========================================================================
    // Window management
    // =========================================================================

    /// Numbered label for a new app instance, e.g. `"2 Calculator"`.
    pub fn instance_label(&mut self, name: &str) -> String {
        let count = self.instances.entry(name.to_string()).or_insert(0);
        *count += 1;
        format!("{} {}", count, name)
    }

    /// Create a decorated, focused top-level window.
    pub fn create_window(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        identifier: impl Into<String>,
    ) -> Result<WindowId> {
        self.create_window_with(
            WindowNode::new(x, y, width, height, identifier).with_background(Some(Color::WHITE)),
        )
    }

    pub fn create_window_with(&mut self, node: WindowNode) -> Result<WindowId> {
        let root = self.tree.root();
        let id = self.tree.insert(node);
        self.tree.attach_child(root, id)?;
        self.manager.decorate_all(&mut self.tree)?;

        crate::wlog!(
            crate::util::logging::DESKTOP,
            "Created window {}",
            self.tree.node(id)?.identifier
        );
        self.pending_events.push(DesktopEvent::WindowCreated { window: id });
        self.pending_events.push(DesktopEvent::FocusChanged { window: id });
        self.request_repaint();
        Ok(id)
    }

    /// Insert `node` and attach it under `parent`. Title bars stay in front of
    /// content added to a top-level window.
    pub fn attach_child(&mut self, parent: WindowId, node: WindowNode) -> Result<WindowId> {
        let id = self.tree.insert(node);
        self.tree.attach_child(parent, id)?;
        if self.tree.is_top_level(parent) {
            self.manager.decorate(&mut self.tree, parent)?;
        }
        self.request_repaint();
        Ok(id)
    }

    /// Detach and drop a node with its subtree.
    pub fn detach(&mut self, id: WindowId) -> Result<()> {
        if self.tree.is_top_level(id) {
            return self.close_window(id);
        }
        self.tree.remove(id)?;
        self.request_repaint();
        Ok(())
    }

    pub fn close_window(&mut self, window: WindowId) -> Result<()> {
        let action = self.manager.close_window(&mut self.tree, window)?;
        self.record_title_action(action);
        self.request_repaint();
        Ok(())
    }

    pub fn resize(&mut self, id: WindowId, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.tree.resize(id, x, y, width, height)?;
        if self.tree.is_top_level(id) {
            self.manager.decorate(&mut self.tree, id)?;
            let size = self.tree.node(id)?.size();
            self.pending_events.push(DesktopEvent::WindowResized {
                window: id,
                width: size.width,
                height: size.height,
            });
        }
        self.request_repaint();
        Ok(())
    }

    /// Raise the top-level ancestor of `id`. `None` for the background.
    pub fn bring_to_front(&mut self, id: WindowId) -> Result<Option<WindowId>> {
        let before = self.tree.focused();
        let raised = self.tree.bring_to_front(id)?;
        if let Some(window) = raised {
            if before != Some(window) {
                self.pending_events.push(DesktopEvent::FocusChanged { window });
                self.request_repaint();
            }
        }
        Ok(raised)
    }

    pub fn locate(&self, x: f64, y: f64) -> WindowId {
        self.tree.locate(x, y)
    }

    /// Un-minimize a window and raise it.
    pub fn restore(&mut self, window: WindowId) -> Result<()> {
        self.tree.node_mut(window)?.minimized = false;
        self.tree.bring_to_front(window)?;
        self.pending_events.push(DesktopEvent::WindowRestored { window });
        self.pending_events.push(DesktopEvent::FocusChanged { window });
        self.request_repaint();
        Ok(())
    }

    pub fn set_key_handler(
        &mut self,
        window: WindowId,
        handler: impl FnMut(&mut WindowTree, WindowId, char) + 'static,
    ) {
        self.key_handlers.insert(window, Box::new(handler));
    }

    fn record_title_action(&mut self, action: TitleAction) {
        let event = match action {
            TitleAction::Closed { window, identifier } => {
                self.key_handlers.remove(&window);
                DesktopEvent::WindowClosed { window, identifier }
            }
            TitleAction::Minimized(window) => {
                self.pending_events.push(DesktopEvent::WindowMinimized { window });
                match self.tree.focused() {
                    Some(focused) if focused != window => DesktopEvent::FocusChanged { window: focused },
                    _ => return,
                }
            }
            TitleAction::Maximized(window) => DesktopEvent::WindowMaximized {
                window,
                maximized: true,
            },
            TitleAction::Restored(window) => DesktopEvent::WindowMaximized {
                window,
                maximized: false,
            },
        };
        self.pending_events.push(event);
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn process_input_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerPressed { x, y } => self.pressed(x, y),
            InputEvent::PointerReleased { x, y } => self.released(x, y),
            InputEvent::PointerMoved { x, y } => self.moved(x, y),
            InputEvent::PointerDragged { x, y } => self.dragged(x, y),
            InputEvent::Key { ch } => self.key(ch),
        }
    }

    pub fn pressed(&mut self, x: f64, y: f64) -> Result<()> {
        self.pointer.x = x;
        self.pointer.y = y;
        let commands = self.session.press(&self.tree, x, y);
        self.pointer.update_button(true);
        if self.apply(commands)? {
            self.request_repaint();
        }
        Ok(())
    }

    pub fn released(&mut self, x: f64, y: f64) -> Result<()> {
        let commands = self.session.release(&self.tree, x, y);
        self.pointer.update_button(false);
        let mut dirty = self.apply(commands)?;
        dirty |= self.update_hover(x, y)?;
        if dirty {
            self.request_repaint();
        }
        Ok(())
    }

    pub fn moved(&mut self, x: f64, y: f64) -> Result<()> {
        if self.update_hover(x, y)? {
            self.request_repaint();
        }
        Ok(())
    }

    pub fn dragged(&mut self, x: f64, y: f64) -> Result<()> {
        self.pointer.x = x;
        self.pointer.y = y;
        let commands = self.session.motion(&self.tree, x, y);
        if self.apply(commands)? {
            self.request_repaint();
        }
        Ok(())
    }

    /// Deliver a typed character to the focused window's key handler.
    pub fn key(&mut self, ch: char) -> Result<()> {
        let Some(window) = self.tree.focused() else {
            return Ok(());
        };
        if self.tree.node(window)?.minimized {
            return Ok(());
        }
        let Some(mut handler) = self.key_handlers.remove(&window) else {
            tracing::trace!("No key handler for {:?}", window);
            return Ok(());
        };
        handler(&mut self.tree, window, ch);
        if self.tree.contains(window) {
            self.key_handlers.entry(window).or_insert(handler);
        }
        self.pending_events.push(DesktopEvent::KeyDelivered { window, key: ch });
        self.request_repaint();
        Ok(())
    }

    fn widget_kind(&self, id: WindowId) -> WidgetKind {
        match self.tree.get(id).map(|n| &n.kind) {
            Some(WindowKind::Button(_)) => WidgetKind::Button,
            Some(WindowKind::Slider(_)) => WidgetKind::Slider,
            _ => WidgetKind::Other,
        }
    }

    fn update_hover(&mut self, x: f64, y: f64) -> Result<bool> {
        let Some((left, entered)) = self.pointer.update_hover(&self.tree, x, y) else {
            return Ok(false);
        };
        let mut dirty = false;
        if let Some(left) = left {
            if self.widget_kind(left) == WidgetKind::Button
                && self.tree.widget_state(left)? == WidgetState::Hovered
            {
                self.tree.set_widget_state(left, WidgetState::Normal)?;
                dirty = true;
            }
        }
        if let Some(entered) = entered {
            if self.widget_kind(entered) == WidgetKind::Button
                && self.tree.widget_state(entered)? == WidgetState::Normal
            {
                self.tree.set_widget_state(entered, WidgetState::Hovered)?;
                dirty = true;
            }
        }
        Ok(dirty)
    }

    /// Apply session commands in order. Returns whether anything visible changed.
    fn apply(&mut self, commands: Vec<Command>) -> Result<bool> {
        let mut dirty = false;
        for command in commands {
            match command {
                Command::BringToFront(target) => {
                    if !self.tree.contains(target) {
                        continue;
                    }
                    let before = self.tree.focused();
                    if let Some(window) = self.tree.bring_to_front(target)? {
                        if before != Some(window) {
                            self.pending_events.push(DesktopEvent::FocusChanged { window });
                            dirty = true;
                        }
                    }
                }
                Command::Press { target, local } => match self.widget_kind(target) {
                    WidgetKind::Button => {
                        self.tree.set_widget_state(target, WidgetState::Pressed)?;
                        dirty = true;
                    }
                    WidgetKind::Slider => {
                        self.tree.set_widget_state(target, WidgetState::Pressed)?;
                        self.tree.drag_slider(target, local.x)?;
                        dirty = true;
                    }
                    WidgetKind::Other => {}
                },
                Command::Track { target, local } => {
                    if self.widget_kind(target) == WidgetKind::Slider
                        && self.tree.widget_state(target)? == WidgetState::Pressed
                    {
                        self.tree.drag_slider(target, local.x)?;
                        dirty = true;
                    }
                }
                Command::Release { target, inside } => match self.widget_kind(target) {
                    WidgetKind::Button => {
                        let state = if inside {
                            WidgetState::Hovered
                        } else {
                            WidgetState::Normal
                        };
                        self.tree.set_widget_state(target, state)?;
                        dirty = true;
                    }
                    WidgetKind::Slider => {
                        self.tree.set_widget_state(target, WidgetState::Normal)?;
                        dirty = true;
                    }
                    WidgetKind::Other => {}
                },
                Command::Move { window, x, y } => {
                    let node = self.tree.node_mut(window)?;
                    node.x = x;
                    node.y = y;
                    self.pending_events.push(DesktopEvent::WindowMoved { window, x, y });
                    dirty = true;
                }
                Command::Resize {
                    window,
                    width,
                    height,
                } => {
                    let origin = self.tree.node(window)?.origin();
                    self.tree.resize(window, origin.x, origin.y, width, height)?;
                    self.manager.decorate(&mut self.tree, window)?;
                    let size = self.tree.node(window)?.size();
                    self.pending_events.push(DesktopEvent::WindowResized {
                        window,
                        width: size.width,
                        height: size.height,
                    });
                    dirty = true;
                }
                Command::Click { target, local } => {
                    if self.tree.contains(target) {
                        self.click(target, local)?;
                        dirty = true;
                    }
                }
            }
        }
        Ok(dirty)
    }

    fn click(&mut self, target: WindowId, local: Point) -> Result<()> {
        self.pending_events.push(DesktopEvent::Clicked { target });
        let node = self.tree.node(target)?;
        if node.role.is_decoration() {
            if let Some(action) = self.manager.handle_title_bar_click(&mut self.tree, target)? {
                self.record_title_action(action);
            }
            return Ok(());
        }
        match self.widget_kind(target) {
            WidgetKind::Button => self.tree.click_button(target)?,
            _ => tracing::debug!(
                "Window {} was clicked at ({}, {})",
                node.identifier,
                local.x,
                local.y
            ),
        }
        Ok(())
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Run a decoration pass, recompute hidden flags and draw the desktop.
    pub fn paint(&mut self, ctx: &mut dyn DrawContext) -> Result<()> {
        self.manager.decorate_all(&mut self.tree)?;
        self.tree.refresh_all_hidden();
        render::paint(&self.tree, ctx);
        Ok(())
    }
}
