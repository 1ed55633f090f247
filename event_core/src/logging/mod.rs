// event_core/src/logging/mod.rs
pub mod logging;
