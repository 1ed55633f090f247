// event_core/src/math/mod.rs
pub mod bounds;
pub mod color;
pub mod curve;
pub mod rect;

pub use bounds::Bounds;
pub use color::Color;
pub use curve::{AnimationCurve, Keyframe};
pub use rect::Rect;
