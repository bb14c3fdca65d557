//! Desktop configuration.
//!
//! Every tunable constant of the window system lives here. There is no file or
//! command-line layer; embedders construct a `DesktopConfig` directly.

/// Window system configuration
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Screen (root window) size
    pub screen_width: f64,
    pub screen_height: f64,
    /// Height of the reserved title-bar band at the top of each top-level window
    pub title_bar_height: f64,
    /// Smallest extent any anchored or container-managed child may take
    pub min_child_extent: f64,
    /// Smallest size a top-level window may be resized to
    pub min_window_width: f64,
    pub min_window_height: f64,
    /// Maximum pointer travel (px) between press and release still counted as a click
    pub click_tolerance: f64,
    /// Size of the bottom-right zone that starts a resize instead of a move
    pub resize_corner_tolerance: f64,
    /// How much of the title bar must stay on screen while dragging
    pub min_title_visibility: f64,
    /// Title-bar button metrics
    pub title_button_width: f64,
    pub title_button_spacing: f64,
    /// Default slider handle width
    pub slider_handle_width: f64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            title_bar_height: 18.0,
            min_child_extent: 20.0,
            min_window_width: 80.0,
            min_window_height: 40.0,
            click_tolerance: 3.0,
            resize_corner_tolerance: 10.0,
            min_title_visibility: 6.0,
            title_button_width: 10.0,
            title_button_spacing: 5.0,
            slider_handle_width: 30.0,
        }
    }
}

impl DesktopConfig {
    /// Create config for a specific screen size
    pub fn with_screen_size(width: f64, height: f64) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// Height of the close/maximize/minimize buttons.
    pub fn title_button_height(&self) -> f64 {
        (self.title_bar_height - 8.0).max(1.0)
    }
}
