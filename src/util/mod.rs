pub mod logging;
pub mod geometry;
pub mod color;
