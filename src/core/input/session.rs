//! Press → drag → release interaction sessions.
//!
//! The session only reads the tree. Every effect it wants is returned as a
//! `Command` for the desktop to apply, in order.

use crate::core::manager::title_bar_visible;
use crate::core::window::{Role, WindowId, WindowTree};
use crate::util::geometry::{Point, Size};

/// What a drag started at the press point will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Pressed on a title bar: dragging moves the window
    Move,
    /// Pressed in the bottom-right corner zone: dragging resizes the window
    Resize,
    /// Pressed anywhere else, content included. Motion is forwarded to the
    /// pressed widget and never moves the window, so sliders and buttons
    /// inside a window stay usable; windows move only by their title bar.
    Widget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Pressed(DragMode),
    DraggingMove,
    DraggingResize,
}

/// Everything remembered at press time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// Node under the press point
    pub target: WindowId,
    /// Its top-level ancestor
    pub window: WindowId,
    pub mode: DragMode,
    pub press: Point,
    /// Window origin and size at press time
    pub origin: Point,
    pub size: Size,
    /// Press point minus window origin
    pub offset: (f64, f64),
    /// Largest pointer travel seen since the press
    pub max_travel: f64,
}

/// Effects requested by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    BringToFront(WindowId),
    /// Widget pressed at a point local to it
    Press { target: WindowId, local: Point },
    /// Pointer moved while a widget is held
    Track { target: WindowId, local: Point },
    /// Button released; `inside` tells whether the pointer is still over the widget
    Release { target: WindowId, inside: bool },
    Move { window: WindowId, x: f64, y: f64 },
    Resize { window: WindowId, width: f64, height: f64 },
    Click { target: WindowId, local: Point },
}

#[derive(Debug, Default)]
pub struct InteractionSession {
    state: SessionState,
    grab: Option<Grab>,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn grab(&self) -> Option<&Grab> {
        self.grab.as_ref()
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.grab = None;
    }

    pub fn press(&mut self, tree: &WindowTree, x: f64, y: f64) -> Vec<Command> {
        if self.state != SessionState::Idle {
            tracing::debug!("Press while {:?}; discarding previous session", self.state);
            self.reset();
        }

        let target = tree.locate(x, y);
        if target == tree.root() {
            tracing::trace!("Background pressed at ({}, {})", x, y);
            return Vec::new();
        }
        let Some(window) = tree.top_level_of(target) else {
            return Vec::new();
        };
        let Ok(frame) = tree.screen_frame(window) else {
            return Vec::new();
        };

        let tolerance = tree.config().resize_corner_tolerance;
        let role = tree.get(target).map(|n| n.role).unwrap_or_default();
        let mode = if x >= frame.right() - tolerance && y >= frame.bottom() - tolerance {
            DragMode::Resize
        } else if matches!(role, Role::TitleBar | Role::Title) {
            DragMode::Move
        } else {
            DragMode::Widget
        };

        let press = Point::new(x, y);
        self.grab = Some(Grab {
            target,
            window,
            mode,
            press,
            origin: frame.origin(),
            size: frame.size(),
            offset: press.delta_from(frame.origin()),
            max_travel: 0.0,
        });
        self.state = SessionState::Pressed(mode);
        tracing::debug!("Session pressed {:?} in {:?} ({:?})", target, window, mode);

        let mut commands = vec![Command::BringToFront(target)];
        if mode == DragMode::Widget {
            if let Ok(local) = tree.from_screen(target, x, y) {
                commands.push(Command::Press { target, local });
            }
        }
        commands
    }

    pub fn motion(&mut self, tree: &WindowTree, x: f64, y: f64) -> Vec<Command> {
        let Some(grab) = self.grab.as_mut() else {
            return Vec::new();
        };
        let point = Point::new(x, y);
        grab.max_travel = grab.max_travel.max(grab.press.distance_to(point));
        let grab = *grab;

        if let SessionState::Pressed(mode) = self.state {
            if grab.max_travel > tree.config().click_tolerance {
                self.state = match mode {
                    DragMode::Move => SessionState::DraggingMove,
                    DragMode::Resize => SessionState::DraggingResize,
                    DragMode::Widget => SessionState::Pressed(mode),
                };
                tracing::trace!("Session now {:?}", self.state);
            }
        }

        match self.state {
            SessionState::DraggingMove => {
                let (new_x, new_y) = (x - grab.offset.0, y - grab.offset.1);
                if title_bar_visible(tree.config(), grab.size.width, new_x, new_y) {
                    vec![Command::Move {
                        window: grab.window,
                        x: new_x,
                        y: new_y,
                    }]
                } else {
                    tracing::debug!("Rejected move of {:?} to ({}, {}): off screen", grab.window, new_x, new_y);
                    Vec::new()
                }
            }
            SessionState::DraggingResize => {
                let (dx, dy) = point.delta_from(grab.press);
                vec![Command::Resize {
                    window: grab.window,
                    width: grab.size.width + dx,
                    height: grab.size.height + dy,
                }]
            }
            SessionState::Pressed(DragMode::Widget) => match tree.from_screen(grab.target, x, y) {
                Ok(local) => vec![Command::Track {
                    target: grab.target,
                    local,
                }],
                Err(_) => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    pub fn release(&mut self, tree: &WindowTree, x: f64, y: f64) -> Vec<Command> {
        let Some(mut grab) = self.grab.take() else {
            self.state = SessionState::Idle;
            return Vec::new();
        };
        grab.max_travel = grab.max_travel.max(grab.press.distance_to(Point::new(x, y)));
        self.state = SessionState::Idle;

        let mut commands = Vec::new();
        if grab.mode == DragMode::Widget {
            let inside = tree
                .screen_frame(grab.target)
                .map(|frame| frame.contains_point(x, y))
                .unwrap_or(false);
            commands.push(Command::Release {
                target: grab.target,
                inside,
            });
        }

        if grab.max_travel <= tree.config().click_tolerance {
            let target = tree.locate(x, y);
            if target != tree.root() {
                if let Ok(local) = tree.from_screen(target, x, y) {
                    commands.push(Command::Click { target, local });
                }
            }
        }
        tracing::debug!("Session released after {:.1}px", grab.max_travel);
        commands
    }
}
