//! Platform Integration Module
//!
//! The host supplies the event pump and the drawing context. The core asks
//! it for repaints through the `Platform` trait.

pub mod api;

pub use api::{Platform, StubPlatform};
