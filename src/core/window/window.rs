use bitflags::bitflags;
use slotmap::new_key_type;

use crate::core::widgets::{ButtonData, ContainerData, LabelData, SliderData};
use crate::util::color::Color;
use crate::util::geometry::{Point, Rect, Size};

new_key_type! {
    /// Stable handle of a node in the window arena.
    pub struct WindowId;
}

bitflags! {
    /// Parent edges a node's box is pinned to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Anchors: u8 {
        const TOP = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Anchors::TOP | Anchors::LEFT
    }
}

/// What a node is for. Everything except `Content` is synthesized by the
/// window manager during a decoration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Content,
    TitleBar,
    Title,
    CloseButton,
    MaximizeButton,
    MinimizeButton,
}

impl Role {
    pub fn is_decoration(&self) -> bool {
        !matches!(self, Role::Content)
    }

    /// Identifier suffix appended to the owner's identifier.
    pub fn suffix(&self) -> &'static str {
        match self {
            Role::Content => "",
            Role::TitleBar => " - Title Bar",
            Role::Title => " - Title",
            Role::CloseButton => " - Close Button",
            Role::MaximizeButton => " - Maximize Button",
            Role::MinimizeButton => " - Minimize Button",
        }
    }
}

/// Kind-specific node data.
#[derive(Debug, Default)]
pub enum WindowKind {
    #[default]
    Plain,
    Label(LabelData),
    Button(ButtonData),
    Slider(SliderData),
    Container(ContainerData),
}

impl WindowKind {
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Plain => "window",
            WindowKind::Label(_) => "label",
            WindowKind::Button(_) => "button",
            WindowKind::Slider(_) => "slider",
            WindowKind::Container(_) => "container",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, WindowKind::Container(_))
    }
}

/// A rectangular node of the window tree.
///
/// Geometry is expressed in the parent's local coordinate space. The parent
/// link is a plain handle used for lookups only; the arena plus `children`
/// lists are the single source of ownership.
#[derive(Debug)]
pub struct WindowNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub identifier: String,
    pub anchors: Anchors,
    /// Distance from the right/bottom edge to the parent's, captured on attach.
    pub margin_right: f64,
    pub margin_bottom: f64,
    /// Box clipped to the parent collapses to nothing. Recomputed on every pass.
    pub is_hidden: bool,
    /// Top-level windows only: hidden by the minimize button.
    pub minimized: bool,
    pub background: Option<Color>,
    pub role: Role,
    pub kind: WindowKind,
    /// Container whose layout owns this node's box, if any.
    pub managed_by: Option<WindowId>,
    pub children: Vec<WindowId>,
    pub parent: Option<WindowId>,
}

impl WindowNode {
    pub fn new(x: f64, y: f64, width: f64, height: f64, identifier: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            identifier: identifier.into(),
            anchors: Anchors::default(),
            margin_right: 0.0,
            margin_bottom: 0.0,
            is_hidden: false,
            minimized: false,
            background: Some(Color::GRAY),
            role: Role::Content,
            kind: WindowKind::Plain,
            managed_by: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn with_kind(mut self, kind: WindowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Box in the parent's coordinate space.
    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.x = frame.x;
        self.y = frame.y;
        self.width = frame.width;
        self.height = frame.height;
    }

    /// Edge-inclusive test of a point in this node's own coordinate space.
    /// Containers never report a hit so that their managed children stay
    /// individually clickable.
    pub fn hit_test(&self, local_x: f64, local_y: f64) -> bool {
        if self.kind.is_container() {
            return false;
        }
        Rect::new(0.0, 0.0, self.width, self.height).contains_point(local_x, local_y)
    }
}
