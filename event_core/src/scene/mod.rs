// event_core/src/scene/mod.rs
pub mod component;
pub mod node;
pub mod scene;
pub mod schema;
pub mod schema_registry;
