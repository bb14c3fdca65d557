//! Common imports and types used throughout Trellis.

pub use crate::config::DesktopConfig;
pub use crate::core::desktop::{Desktop, DesktopEvent};
pub use crate::core::input::InputEvent;
pub use crate::core::render::{DrawContext, RecordingContext};
pub use crate::core::widgets::WidgetState;
pub use crate::core::window::{Anchors, Axis, Role, WindowId, WindowKind, WindowNode, WindowTree};
pub use crate::util::color::Color;
pub use crate::util::geometry::{Point, Rect, Size};

pub type Result<T> = std::result::Result<T, crate::core::errors::CoreError>;
