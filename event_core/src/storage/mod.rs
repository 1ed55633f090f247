// event_core/src/storage/mod.rs
pub mod settings;
