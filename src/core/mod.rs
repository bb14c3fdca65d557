pub mod errors;
pub mod window;
pub mod widgets;
pub mod input;
pub mod manager;
pub mod render;
pub mod desktop;


// Re-export key types
pub use desktop::{Desktop, DesktopEvent, KeyHandler};
pub use errors::CoreError;
pub use manager::{TitleAction, WindowManager};
