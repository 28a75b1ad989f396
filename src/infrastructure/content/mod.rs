//! Built-in content modules

mod borderlands;

use std::sync::Arc;

pub use borderlands::BorderlandsModule;

use crate::application::ports::inbound::ModuleRegistry;
use crate::domain::errors::ContentError;

/// Registry of every module the binary seeds, in seeding order
pub fn builtin_registry() -> Result<ModuleRegistry, ContentError> {
    ModuleRegistry::new().with(Arc::new(BorderlandsModule))
}
