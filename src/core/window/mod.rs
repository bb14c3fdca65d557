pub mod window;
pub mod tree;
pub mod focus;
pub mod resize;
pub mod layout;
pub mod maximize;

pub use window::{Anchors, Role, WindowId, WindowKind, WindowNode};
pub use tree::{WindowTree, SCREEN_IDENTIFIER};
pub use layout::Axis;
