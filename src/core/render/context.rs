//! Drawing substrate interface.
//!
//! The actual pixel work is done by an externally supplied context. The core
//! only issues primitive calls with an origin set to the node being drawn.

use crate::util::color::Color;

/// Primitive drawing operations supplied by the host.
pub trait DrawContext {
    /// Translate subsequent drawing so that `(0, 0)` maps to `(x, y)` on screen.
    fn set_origin(&mut self, x: f64, y: f64);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_string(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Origin(f64, f64),
    Fill(Color),
    Stroke(Color),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    Line(f64, f64, f64, f64),
    Text(String, f64, f64),
}

/// A context that records calls instead of drawing. Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub ops: Vec<DrawOp>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// All strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for RecordingContext {
    fn set_origin(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Origin(x, y));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(DrawOp::Stroke(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect(x, y, width, height));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::StrokeRect(x, y, width, height));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line(x1, y1, x2, y2));
    }

    fn draw_string(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text(text.to_string(), x, y));
    }
}
