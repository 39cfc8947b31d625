//! Usage-site binding between a resolved docblock and an ancestor.
//!
//! When a declaration overrides an ancestor, the merge needs two pieces
//! of usage-site information about that ancestor: which concrete types
//! were supplied for its generic template parameters where it was
//! extended (`@extends Base<int, User>`), and how its parameter names
//! line up with the overriding declaration's (PHP allows an override to
//! rename parameters).  A [`BindingContext`] supplies both.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::tags::ParamTag;
use crate::template::TemplateTypeMap;

/// Per-ancestor merge input: the active template bindings at the usage
/// site, and the parameter-name correspondence.
pub trait BindingContext {
    /// The template map in effect where this ancestor was extended/used —
    /// what `T` and friends concretely mean for this child.
    fn active_template_map(&self) -> &TemplateTypeMap;

    /// Re-key a parameter-name keyed collection from the ancestor's
    /// naming onto the overriding declaration's naming.
    fn map_parameter_names(&self, tags: IndexMap<String, ParamTag>) -> IndexMap<String, ParamTag>;
}

/// A plain value implementation of [`BindingContext`] for hosts that
/// already computed the usage-site facts.
#[derive(Debug, Clone, Default)]
pub struct UsageBinding {
    template_map: TemplateTypeMap,
    /// Ancestor parameter name → overriding declaration parameter name.
    /// An empty mapping means the names already agree (identity).
    parameter_name_mapping: HashMap<String, String>,
}

impl UsageBinding {
    pub fn new(
        template_map: TemplateTypeMap,
        parameter_name_mapping: HashMap<String, String>,
    ) -> UsageBinding {
        UsageBinding {
            template_map,
            parameter_name_mapping,
        }
    }

    /// A binding with no template instantiation and matching parameter
    /// names — the common non-generic override.
    pub fn identity() -> UsageBinding {
        UsageBinding::default()
    }
}

impl BindingContext for UsageBinding {
    fn active_template_map(&self) -> &TemplateTypeMap {
        &self.template_map
    }

    fn map_parameter_names(&self, tags: IndexMap<String, ParamTag>) -> IndexMap<String, ParamTag> {
        if self.parameter_name_mapping.is_empty() {
            return tags;
        }

        // Names absent from the mapping are dropped, not carried over —
        // an unmapped ancestor parameter has no counterpart to document.
        tags.into_iter()
            .filter_map(|(name, tag)| {
                self.parameter_name_mapping
                    .get(&name)
                    .map(|mapped| (mapped.clone(), tag))
            })
            .collect()
    }
}
