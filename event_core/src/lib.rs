pub mod event;
pub mod introspect;
pub mod logging;
pub mod math;
pub mod scene;
pub mod storage;

pub use scene_component::{scene_component, scene_methods};
