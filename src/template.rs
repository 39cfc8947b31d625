//! Generic template maps.
//!
//! A [`TemplateTypeMap`] binds generic template parameter names (from
//! `@template T` declarations) to concrete types.  A declaration's own map
//! is attached at construction time; usage-site maps (what was supplied
//! where an ancestor was extended) arrive through the binding context
//! during inheritance merging.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// An immutable mapping from template parameter name to its bound type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTypeMap {
    types: IndexMap<String, Type>,
}

impl TemplateTypeMap {
    /// The explicit empty map — no template parameters in scope.
    pub fn empty() -> TemplateTypeMap {
        TemplateTypeMap::default()
    }

    pub fn new(types: IndexMap<String, Type>) -> TemplateTypeMap {
        TemplateTypeMap { types }
    }

    /// The type bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Whether `name` is a template parameter in this map.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Iterate bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.types.iter()
    }
}

impl FromIterator<(String, Type)> for TemplateTypeMap {
    fn from_iter<I: IntoIterator<Item = (String, Type)>>(iter: I) -> TemplateTypeMap {
        TemplateTypeMap {
            types: iter.into_iter().collect(),
        }
    }
}
