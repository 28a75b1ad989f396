//! Inbound ports - Interfaces that the application exposes to the outside world

mod content_module;

pub use content_module::{ContentModule, ModuleRegistry};
