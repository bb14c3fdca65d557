pub mod context;
pub mod scene;

pub use context::{DrawContext, DrawOp, RecordingContext};
pub use scene::{dump, flatten, paint, FlattenedWindow};
