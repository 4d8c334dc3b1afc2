//! Layout model and reorder engine.

mod model;
pub mod reorder;

pub use model::{AddOutcome, LayoutModel, ShapeChange};
pub use reorder::Direction;
