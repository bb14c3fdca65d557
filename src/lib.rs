// Trellis Desktop
// Copyright (c) 2026
//
// Minimal desktop windowing core: a window tree with anchor layout,
// z-order, title-bar decorations and a pointer interaction session.
// Drawing and event delivery are supplied by the host platform.

pub mod core;
pub mod platform;
pub mod config;
pub mod util;
pub mod prelude;

pub use config::DesktopConfig;
pub use crate::core::{CoreError, Desktop, DesktopEvent};
