// event_core/src/event/mod.rs
pub mod binding;
pub mod error;
pub mod extended_event;
pub mod listener;
pub mod literal;
pub mod value;
