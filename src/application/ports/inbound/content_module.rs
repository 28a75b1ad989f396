//! Content module port - How adventure modules hand their content to the engine

use std::sync::Arc;

use crate::application::services::{ModuleBuilder, ModuleDefinition};
use crate::domain::errors::ContentError;
use crate::domain::value_objects::ModuleId;

/// An adventure module that declares its content through a [`ModuleBuilder`]
///
/// Implementations are pure data: `define` may be called more than once and
/// must declare the same content every time.
pub trait ContentModule: Send + Sync {
    /// Short module key used in every composed ID (e.g. `b1`)
    fn module_id(&self) -> ModuleId;

    /// Declare abilities, items, loot tables, creatures and so on
    fn define(&self, builder: &mut ModuleBuilder);
}

/// Explicit registry of content modules, built once at startup
///
/// Modules are kept in registration order, which is also the order they are
/// provisioned in.
#[derive(Default, Clone)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn ContentModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: Arc<dyn ContentModule>) -> Result<(), ContentError> {
        let id = module.module_id();
        if self.modules.iter().any(|m| m.module_id() == id) {
            return Err(ContentError::DuplicateModule(id));
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn with(mut self, module: Arc<dyn ContentModule>) -> Result<Self, ContentError> {
        self.register(module)?;
        Ok(self)
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|m| m.module_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Run every module's definition through a fresh builder
    pub fn build_all(&self) -> Result<Vec<ModuleDefinition>, ContentError> {
        self.modules
            .iter()
            .map(|module| {
                let mut builder = ModuleBuilder::new(module.module_id());
                module.define(&mut builder);
                builder.build()
            })
            .collect()
    }
}
