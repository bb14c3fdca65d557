use crate::util::geometry::Rect;

/// Box a maximized window returns to when restored.
#[derive(Debug, Default, Clone)]
pub struct MaximizeState {
    pub previous: Rect,
}

impl MaximizeState {
    pub fn new(previous: Rect) -> Self {
        Self { previous }
    }
}
