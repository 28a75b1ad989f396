//! Strongly-typed identifiers for content entities
//!
//! Content IDs are human-readable strings composed as
//! `<kind>-<moduleId>-<suffix>` (e.g. `creature-b1-giant-rat`). The same
//! suffix always yields the same ID, so a re-run finds the rows it wrote.

use serde::{Deserialize, Serialize};

use super::ContentKind;

macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_string_id!(ContentId);
define_string_id!(ModuleId);

impl ContentId {
    /// Compose the deterministic ID for an entity of `kind` in `module`
    pub fn compose(kind: ContentKind, module: &ModuleId, suffix: &str) -> Self {
        Self(format!(
            "{}-{}-{}",
            kind.id_prefix(),
            module.as_str(),
            suffix.trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_is_namespaced_and_stable() {
        let module = ModuleId::from("b1");

        let first = ContentId::compose(ContentKind::Creature, &module, "giant-rat");
        let second = ContentId::compose(ContentKind::Creature, &module, "giant-rat");

        assert_eq!(first.as_str(), "creature-b1-giant-rat");
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_suffix_differs_across_kinds() {
        let module = ModuleId::from("b1");

        let item = ContentId::compose(ContentKind::Item, &module, "rat-pelt");
        let table = ContentId::compose(ContentKind::LootTable, &module, "rat-pelt");

        assert_ne!(item, table);
        assert_eq!(table.as_str(), "loot-b1-rat-pelt");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ContentId::from("item-b1-torch");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"item-b1-torch\"");
    }
}
