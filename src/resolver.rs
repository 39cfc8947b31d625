//! On-demand resolution of typed tags from a parsed docblock node.
//!
//! The [`TagResolver`] trait is the seam between the lazy block and
//! whatever produces typed facts: each operation takes the comment node
//! plus the name-resolution context and returns one kind of fact.  A
//! resolver never fails — a missing or malformed tag simply resolves to
//! an empty collection or an absent value.
//!
//! [`NodeTagResolver`] is the stock implementation, walking the
//! structured [`DocNode`] entries and qualifying type names through the
//! scope.

use indexmap::IndexMap;

use crate::node::{DocNode, DocTag};
use crate::scope::NameScope;
use crate::tags::{
    DeprecatedTag, ExtendsTag, ImplementsTag, MethodTag, MixinTag, ParamTag, PropertyTag,
    ReturnTag, TemplateTag, ThrowsTag, UsesTag, VarTag, VarTagKey,
};
use crate::types::Type;

/// Resolves one kind of typed fact from a `(node, scope)` pair.
///
/// The three boolean flags are computed from the node alone — they do not
/// involve any type names.
pub trait TagResolver {
    fn resolve_var_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<VarTagKey, VarTag>;

    fn resolve_method_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<String, MethodTag>;

    fn resolve_property_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, PropertyTag>;

    fn resolve_extends_tags(&self, node: &DocNode, scope: &NameScope)
    -> IndexMap<String, ExtendsTag>;

    fn resolve_implements_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, ImplementsTag>;

    fn resolve_uses_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<String, UsesTag>;

    fn resolve_param_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<String, ParamTag>;

    fn resolve_return_tag(&self, node: &DocNode, scope: &NameScope) -> Option<ReturnTag>;

    /// All `@throws` entries collapse into a single tag whose type is the
    /// union of every thrown type.
    fn resolve_throws_tag(&self, node: &DocNode, scope: &NameScope) -> Option<ThrowsTag>;

    fn resolve_mixin_tags(&self, node: &DocNode, scope: &NameScope) -> Vec<MixinTag>;

    fn resolve_deprecated_tag(&self, node: &DocNode, scope: &NameScope) -> Option<DeprecatedTag>;

    fn resolve_is_deprecated(&self, node: &DocNode) -> bool;

    fn resolve_is_internal(&self, node: &DocNode) -> bool;

    fn resolve_is_final(&self, node: &DocNode) -> bool;
}

/// The stock resolver over structured [`DocNode`] entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeTagResolver;

impl NodeTagResolver {
    pub fn new() -> NodeTagResolver {
        NodeTagResolver
    }

    /// Extract `@template` tags for eager resolution at block
    /// construction.  Template tags are never resolved lazily — the
    /// merge machinery needs them before anything else — so this helper
    /// lives outside the [`TagResolver`] trait.
    pub fn resolve_template_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, TemplateTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Template { name, bound } = tag {
                let bound = match bound {
                    Some(ty) => scope.resolve_type(ty),
                    None => Type::Mixed,
                };
                tags.insert(name.clone(), TemplateTag::new(name.clone(), bound));
            }
        }
        tags
    }
}

impl TagResolver for NodeTagResolver {
    fn resolve_var_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<VarTagKey, VarTag> {
        let mut tags = IndexMap::new();
        let mut position = 0usize;
        for tag in node.tags() {
            if let DocTag::Var { ty, name } = tag {
                let key = match name {
                    Some(name) => VarTagKey::Name(name.clone()),
                    None => {
                        let key = VarTagKey::Position(position);
                        position += 1;
                        key
                    }
                };
                tags.insert(key, VarTag::new(scope.resolve_type(ty)));
            }
        }
        tags
    }

    fn resolve_method_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, MethodTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Method {
                name,
                ty,
                is_static,
            } = tag
            {
                tags.insert(name.clone(), MethodTag::new(scope.resolve_type(ty), *is_static));
            }
        }
        tags
    }

    fn resolve_property_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, PropertyTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Property { name, ty } = tag {
                tags.insert(name.clone(), PropertyTag::new(scope.resolve_type(ty)));
            }
        }
        tags
    }

    fn resolve_extends_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, ExtendsTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Extends { name, ty } = tag {
                tags.insert(
                    scope.resolve_name(name),
                    ExtendsTag::new(scope.resolve_type(ty)),
                );
            }
        }
        tags
    }

    fn resolve_implements_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, ImplementsTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Implements { name, ty } = tag {
                tags.insert(
                    scope.resolve_name(name),
                    ImplementsTag::new(scope.resolve_type(ty)),
                );
            }
        }
        tags
    }

    fn resolve_uses_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<String, UsesTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Uses { name, ty } = tag {
                tags.insert(
                    scope.resolve_name(name),
                    UsesTag::new(scope.resolve_type(ty)),
                );
            }
        }
        tags
    }

    fn resolve_param_tags(&self, node: &DocNode, scope: &NameScope) -> IndexMap<String, ParamTag> {
        let mut tags = IndexMap::new();
        for tag in node.tags() {
            if let DocTag::Param {
                name,
                ty,
                is_variadic,
            } = tag
            {
                tags.insert(
                    name.clone(),
                    ParamTag::new(scope.resolve_type(ty), *is_variadic),
                );
            }
        }
        tags
    }

    fn resolve_return_tag(&self, node: &DocNode, scope: &NameScope) -> Option<ReturnTag> {
        // The first @return wins; later duplicates are ignored.
        node.tags().iter().find_map(|tag| match tag {
            DocTag::Return { ty } => Some(ReturnTag::new(scope.resolve_type(ty))),
            _ => None,
        })
    }

    fn resolve_throws_tag(&self, node: &DocNode, scope: &NameScope) -> Option<ThrowsTag> {
        let mut thrown: Option<Type> = None;
        for tag in node.tags() {
            if let DocTag::Throws { ty } = tag {
                let resolved = scope.resolve_type(ty);
                thrown = Some(match thrown {
                    Some(existing) => Type::union(existing, resolved),
                    None => resolved,
                });
            }
        }
        thrown.map(ThrowsTag::new)
    }

    fn resolve_mixin_tags(&self, node: &DocNode, scope: &NameScope) -> Vec<MixinTag> {
        node.tags()
            .iter()
            .filter_map(|tag| match tag {
                DocTag::Mixin { ty } => Some(MixinTag::new(scope.resolve_type(ty))),
                _ => None,
            })
            .collect()
    }

    fn resolve_deprecated_tag(&self, node: &DocNode, _scope: &NameScope) -> Option<DeprecatedTag> {
        node.tags().iter().find_map(|tag| match tag {
            DocTag::Deprecated { message } => Some(DeprecatedTag::new(message.clone())),
            _ => None,
        })
    }

    fn resolve_is_deprecated(&self, node: &DocNode) -> bool {
        node.tags()
            .iter()
            .any(|tag| matches!(tag, DocTag::Deprecated { .. }))
    }

    fn resolve_is_internal(&self, node: &DocNode) -> bool {
        node.tags().iter().any(|tag| matches!(tag, DocTag::Internal))
    }

    fn resolve_is_final(&self, node: &DocNode) -> bool {
        node.tags().iter().any(|tag| matches!(tag, DocTag::Final))
    }
}
