//! The resolved docblock: lazy tag resolution plus inheritance merging.
//!
//! A [`ResolvedDocBlock`] is the memoizing snapshot of every fact a
//! single declaration's docblock provides.  Facts are computed on first
//! access through the bound [`TagResolver`] and cached; callers never
//! observe the memoization (repeated reads return the identical cached
//! value and trigger no further resolver calls).
//!
//! Each lazy field is a `OnceCell`, which keeps the three states
//! distinct: an uninitialised cell is *not yet computed*, an initialised
//! cell holds the computed result, and absence within a computed result
//! is an empty collection or `None` — never conflated with "not yet
//! computed".
//!
//! When a declaration overrides ancestors, [`ResolvedDocBlock::clone_and_merge`]
//! combines the local facts with the ancestors' under per-kind policies
//! (see the method docs), substituting usage-site generic bindings along
//! the way.  Merging never mutates the original block beyond filling its
//! own lazy caches — the result is always a new instance.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use tracing::{debug, trace};

use crate::binding::BindingContext;
use crate::node::DocNode;
use crate::resolver::TagResolver;
use crate::scope::NameScope;
use crate::tags::{
    DeprecatedTag, ExtendsTag, ImplementsTag, MethodTag, MixinTag, ParamTag, PropertyTag,
    ReturnTag, TemplateTag, ThrowsTag, TypedTag, UsesTag, VarTag, VarTagKey,
};
use crate::template::TemplateTypeMap;
use crate::types::Type;

/// The lazy, mergeable snapshot of one declaration's docblock facts.
pub struct ResolvedDocBlock {
    node: DocNode,
    text: String,
    filename: Option<String>,
    /// Absent only for the synthetic empty block.
    scope: Option<NameScope>,
    /// This declaration's own `@template` bindings.
    template_type_map: TemplateTypeMap,
    /// Declared template parameter name → template tag.  Always supplied
    /// eagerly: merge substitution needs these before any lazy field.
    template_tags: IndexMap<String, TemplateTag>,
    resolver: Option<Arc<dyn TagResolver + Send + Sync>>,

    var_tags: OnceCell<IndexMap<VarTagKey, VarTag>>,
    method_tags: OnceCell<IndexMap<String, MethodTag>>,
    property_tags: OnceCell<IndexMap<String, PropertyTag>>,
    extends_tags: OnceCell<IndexMap<String, ExtendsTag>>,
    implements_tags: OnceCell<IndexMap<String, ImplementsTag>>,
    uses_tags: OnceCell<IndexMap<String, UsesTag>>,
    param_tags: OnceCell<IndexMap<String, ParamTag>>,
    return_tag: OnceCell<Option<ReturnTag>>,
    throws_tag: OnceCell<Option<ThrowsTag>>,
    mixin_tags: OnceCell<Vec<MixinTag>>,
    deprecated_tag: OnceCell<Option<DeprecatedTag>>,
    is_deprecated: OnceCell<bool>,
    is_internal: OnceCell<bool>,
    is_final: OnceCell<bool>,
}

impl ResolvedDocBlock {
    /// Build a live block bound to `resolver`; every lazy field starts
    /// out unresolved.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        node: DocNode,
        text: impl Into<String>,
        filename: Option<String>,
        scope: NameScope,
        template_type_map: TemplateTypeMap,
        template_tags: IndexMap<String, TemplateTag>,
        resolver: Arc<dyn TagResolver + Send + Sync>,
    ) -> ResolvedDocBlock {
        ResolvedDocBlock {
            node,
            text: text.into(),
            filename,
            scope: Some(scope),
            template_type_map,
            template_tags,
            resolver: Some(resolver),
            var_tags: OnceCell::new(),
            method_tags: OnceCell::new(),
            property_tags: OnceCell::new(),
            extends_tags: OnceCell::new(),
            implements_tags: OnceCell::new(),
            uses_tags: OnceCell::new(),
            param_tags: OnceCell::new(),
            return_tag: OnceCell::new(),
            throws_tag: OnceCell::new(),
            mixin_tags: OnceCell::new(),
            deprecated_tag: OnceCell::new(),
            is_deprecated: OnceCell::new(),
            is_internal: OnceCell::new(),
            is_final: OnceCell::new(),
        }
    }

    /// The neutral block for declarations with no docblock: every field
    /// already resolved to its empty/absent state, all flags false.
    /// Merging it into anything contributes nothing.
    pub fn create_empty() -> ResolvedDocBlock {
        ResolvedDocBlock {
            node: DocNode::empty(),
            text: "/** */".to_string(),
            filename: None,
            scope: None,
            template_type_map: TemplateTypeMap::empty(),
            template_tags: IndexMap::new(),
            resolver: None,
            var_tags: OnceCell::with_value(IndexMap::new()),
            method_tags: OnceCell::with_value(IndexMap::new()),
            property_tags: OnceCell::with_value(IndexMap::new()),
            extends_tags: OnceCell::with_value(IndexMap::new()),
            implements_tags: OnceCell::with_value(IndexMap::new()),
            uses_tags: OnceCell::with_value(IndexMap::new()),
            param_tags: OnceCell::with_value(IndexMap::new()),
            return_tag: OnceCell::with_value(None),
            throws_tag: OnceCell::with_value(None),
            mixin_tags: OnceCell::with_value(Vec::new()),
            deprecated_tag: OnceCell::with_value(None),
            is_deprecated: OnceCell::with_value(false),
            is_internal: OnceCell::with_value(false),
            is_final: OnceCell::with_value(false),
        }
    }

    pub fn node(&self) -> &DocNode {
        &self.node
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn template_type_map(&self) -> &TemplateTypeMap {
        &self.template_type_map
    }

    /// Template tags are eager — no resolver round trip.
    pub fn template_tags(&self) -> &IndexMap<String, TemplateTag> {
        &self.template_tags
    }

    // ─── Lazy accessors ─────────────────────────────────────────────────
    //
    // Each field resolves at most once through the bound resolver; the
    // empty block (no resolver, no scope) falls back to the empty value,
    // though its cells are pre-resolved anyway.

    fn parts(&self) -> Option<(&(dyn TagResolver + Send + Sync), &NameScope)> {
        match (&self.resolver, &self.scope) {
            (Some(resolver), Some(scope)) => Some((resolver.as_ref(), scope)),
            _ => None,
        }
    }

    pub fn var_tags(&self) -> &IndexMap<VarTagKey, VarTag> {
        self.var_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_var_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn method_tags(&self) -> &IndexMap<String, MethodTag> {
        self.method_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_method_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn property_tags(&self) -> &IndexMap<String, PropertyTag> {
        self.property_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_property_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn extends_tags(&self) -> &IndexMap<String, ExtendsTag> {
        self.extends_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_extends_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn implements_tags(&self) -> &IndexMap<String, ImplementsTag> {
        self.implements_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_implements_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn uses_tags(&self) -> &IndexMap<String, UsesTag> {
        self.uses_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_uses_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn param_tags(&self) -> &IndexMap<String, ParamTag> {
        self.param_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_param_tags(&self.node, scope),
            None => IndexMap::new(),
        })
    }

    pub fn return_tag(&self) -> Option<&ReturnTag> {
        self.return_tag
            .get_or_init(|| match self.parts() {
                Some((resolver, scope)) => resolver.resolve_return_tag(&self.node, scope),
                None => None,
            })
            .as_ref()
    }

    pub fn throws_tag(&self) -> Option<&ThrowsTag> {
        self.throws_tag
            .get_or_init(|| match self.parts() {
                Some((resolver, scope)) => resolver.resolve_throws_tag(&self.node, scope),
                None => None,
            })
            .as_ref()
    }

    pub fn mixin_tags(&self) -> &[MixinTag] {
        self.mixin_tags.get_or_init(|| match self.parts() {
            Some((resolver, scope)) => resolver.resolve_mixin_tags(&self.node, scope),
            None => Vec::new(),
        })
    }

    pub fn deprecated_tag(&self) -> Option<&DeprecatedTag> {
        self.deprecated_tag
            .get_or_init(|| match self.parts() {
                Some((resolver, scope)) => resolver.resolve_deprecated_tag(&self.node, scope),
                None => None,
            })
            .as_ref()
    }

    pub fn is_deprecated(&self) -> bool {
        *self.is_deprecated.get_or_init(|| match &self.resolver {
            Some(resolver) => resolver.resolve_is_deprecated(&self.node),
            None => false,
        })
    }

    pub fn is_internal(&self) -> bool {
        *self.is_internal.get_or_init(|| match &self.resolver {
            Some(resolver) => resolver.resolve_is_internal(&self.node),
            None => false,
        })
    }

    pub fn is_final(&self) -> bool {
        *self.is_final.get_or_init(|| match &self.resolver {
            Some(resolver) => resolver.resolve_is_final(&self.node),
            None => false,
        })
    }

    // ─── Derivation ─────────────────────────────────────────────────────

    /// A new block whose param-tags are re-keyed through `mapping`
    /// (old name → new name).  Names absent from the mapping are dropped,
    /// not carried over under their old name.  Every other field keeps
    /// its current cache state.
    pub fn change_parameter_names_by_mapping(
        &self,
        mapping: &HashMap<String, String>,
    ) -> ResolvedDocBlock {
        let param_tags = self.param_tags();
        trace!(params = param_tags.len(), "remapping docblock parameter names");

        let new_param_tags: IndexMap<String, ParamTag> = param_tags
            .iter()
            .filter_map(|(name, tag)| {
                mapping
                    .get(name)
                    .map(|mapped| (mapped.clone(), tag.clone()))
            })
            .collect();

        ResolvedDocBlock {
            node: self.node.clone(),
            text: self.text.clone(),
            filename: self.filename.clone(),
            scope: self.scope.clone(),
            template_type_map: self.template_type_map.clone(),
            template_tags: self.template_tags.clone(),
            resolver: self.resolver.clone(),
            var_tags: self.var_tags.clone(),
            method_tags: self.method_tags.clone(),
            property_tags: self.property_tags.clone(),
            extends_tags: self.extends_tags.clone(),
            implements_tags: self.implements_tags.clone(),
            uses_tags: self.uses_tags.clone(),
            param_tags: OnceCell::with_value(new_param_tags),
            return_tag: self.return_tag.clone(),
            throws_tag: self.throws_tag.clone(),
            mixin_tags: self.mixin_tags.clone(),
            deprecated_tag: self.deprecated_tag.clone(),
            is_deprecated: self.is_deprecated.clone(),
            is_internal: self.is_internal.clone(),
            is_final: self.is_final.clone(),
        }
    }

    // ─── Inheritance merging ────────────────────────────────────────────

    /// Merge this block's facts with its ancestors', producing a new
    /// block.  `parents[i]` pairs with `bindings[i]`; the order is the
    /// caller's already-linearized inheritance order.
    ///
    /// Per-kind policies:
    ///
    ///   - **var**: a local var-tag wins outright; otherwise the first
    ///     parent with a var-tag contributes (substituted), and iteration
    ///     stops there.
    ///   - **param**: local names win; each parent's tags are re-keyed
    ///     through its binding and only fill names nobody documented yet
    ///     (earlier parents beat later ones).
    ///   - **return**: a local return-tag wins outright.  Otherwise every
    ///     parent is visited in order; a parent overwrites the value held
    ///     so far unless its type is a proven supertype of it, so a later
    ///     more specific ancestor can replace an earlier broader one but
    ///     a broader one never widens the result.  Adopted tags are
    ///     marked implicit.
    ///   - **throws**: accumulates across all parents into a single tag,
    ///     unioning with whatever the block already throws — an override
    ///     must cover everything any ancestor might throw.
    ///   - **deprecated**: any deprecated parent marks the result; the
    ///     last one in iteration order supplies the tag.  The
    ///     `is_deprecated` flag is recomputed from the merged tag.
    ///
    /// extends/implements/uses/property/method/mixin tags and the
    /// internal/final flags do not participate: the merged block carries
    /// over their current cache state from `self`.
    pub fn clone_and_merge(
        &self,
        parents: &[&ResolvedDocBlock],
        bindings: &[&dyn BindingContext],
    ) -> ResolvedDocBlock {
        debug_assert_eq!(parents.len(), bindings.len());
        debug!(parents = parents.len(), "merging docblock with ancestors");

        let var_tags = self.merge_var_tags(parents, bindings);
        let param_tags = self.merge_param_tags(parents, bindings);
        let return_tag = self.merge_return_tag(parents, bindings);
        let throws_tag = self.merge_throws_tag(parents);
        let deprecated_tag = self.merge_deprecated_tag(parents);
        let is_deprecated = deprecated_tag.is_some();

        ResolvedDocBlock {
            node: self.node.clone(),
            text: self.text.clone(),
            filename: self.filename.clone(),
            scope: self.scope.clone(),
            template_type_map: self.template_type_map.clone(),
            template_tags: self.template_tags.clone(),
            resolver: self.resolver.clone(),
            var_tags: OnceCell::with_value(var_tags),
            method_tags: self.method_tags.clone(),
            property_tags: self.property_tags.clone(),
            extends_tags: self.extends_tags.clone(),
            implements_tags: self.implements_tags.clone(),
            uses_tags: self.uses_tags.clone(),
            param_tags: OnceCell::with_value(param_tags),
            return_tag: OnceCell::with_value(return_tag),
            throws_tag: OnceCell::with_value(throws_tag),
            mixin_tags: self.mixin_tags.clone(),
            deprecated_tag: OnceCell::with_value(deprecated_tag),
            is_deprecated: OnceCell::with_value(is_deprecated),
            is_internal: self.is_internal.clone(),
            is_final: self.is_final.clone(),
        }
    }

    fn merge_var_tags(
        &self,
        parents: &[&ResolvedDocBlock],
        bindings: &[&dyn BindingContext],
    ) -> IndexMap<VarTagKey, VarTag> {
        // Only one var tag survives per block; a local one wins outright.
        let own = self.var_tags();
        if !own.is_empty() {
            return own.clone();
        }

        for (parent, binding) in parents.iter().zip(bindings) {
            if let Some((key, tag)) = parent.var_tags().first() {
                let tag = resolve_template_type_in_tag(tag.clone(), *binding);
                let mut merged = IndexMap::new();
                merged.insert(key.clone(), tag);
                return merged;
            }
        }

        IndexMap::new()
    }

    fn merge_param_tags(
        &self,
        parents: &[&ResolvedDocBlock],
        bindings: &[&dyn BindingContext],
    ) -> IndexMap<String, ParamTag> {
        let mut merged = self.param_tags().clone();

        for (parent, binding) in parents.iter().zip(bindings) {
            let parent_tags = binding.map_parameter_names(parent.param_tags().clone());
            for (name, tag) in parent_tags {
                // Self and earlier parents win over later parents.
                if merged.contains_key(&name) {
                    continue;
                }
                merged.insert(name, resolve_template_type_in_tag(tag, *binding));
            }
        }

        merged
    }

    fn merge_return_tag(
        &self,
        parents: &[&ResolvedDocBlock],
        bindings: &[&dyn BindingContext],
    ) -> Option<ReturnTag> {
        let mut merged = self.return_tag().cloned();
        if merged.is_some() {
            return merged;
        }

        for (parent, binding) in parents.iter().zip(bindings) {
            let Some(parent_tag) = parent.return_tag() else {
                continue;
            };

            // Each parent overwrites the previous one except when it
            // returns a less specific type.  Incompatible types are not
            // our concern here; a downstream rule reports those.
            if let Some(current) = &merged
                && parent_tag.ty().is_supertype_of(current.ty()).yes()
            {
                continue;
            }

            merged = Some(resolve_template_type_in_tag(
                parent_tag.clone().into_implicit(),
                *binding,
            ));
        }

        merged
    }

    fn merge_throws_tag(&self, parents: &[&ResolvedDocBlock]) -> Option<ThrowsTag> {
        let mut merged = self.throws_tag().cloned();

        for parent in parents {
            let Some(parent_tag) = parent.throws_tag() else {
                continue;
            };

            merged = Some(match merged {
                None => parent_tag.clone(),
                Some(current) => ThrowsTag::new(Type::union(
                    current.ty().clone(),
                    parent_tag.ty().clone(),
                )),
            });
        }

        merged
    }

    fn merge_deprecated_tag(&self, parents: &[&ResolvedDocBlock]) -> Option<DeprecatedTag> {
        let mut merged = self.deprecated_tag().cloned();

        for parent in parents {
            if let Some(parent_tag) = parent.deprecated_tag() {
                merged = Some(parent_tag.clone());
            }
        }

        merged
    }
}

/// Substitute the usage-site template bindings into a tag's type and
/// rebuild the tag.  Placeholders not bound at the usage site pass
/// through unchanged.
fn resolve_template_type_in_tag<T: TypedTag>(tag: T, binding: &dyn BindingContext) -> T {
    let ty = tag.ty().substitute_templates(binding.active_template_map());
    tag.with_type(ty)
}
