//! Tests for lazy docblock resolution.
//!
//! These exercise the memoization contract of `ResolvedDocBlock`: each
//! fact is resolved at most once, unrelated facts are not resolved as a
//! side effect, the empty block is fully neutral, and parameter-name
//! remapping follows the drop rule.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use phpdoc_resolve::{
    DocNode, DocTag, NameScope, NodeTagResolver, ResolvedDocBlock, TagResolver, TemplateTypeMap,
    Type, TypedTag,
};

// ─── Counting resolver ──────────────────────────────────────────────

/// Per-operation invocation counters, shared with the test body.
#[derive(Default)]
struct Counters {
    var: AtomicUsize,
    param: AtomicUsize,
    return_: AtomicUsize,
    throws: AtomicUsize,
    deprecated: AtomicUsize,
    method: AtomicUsize,
}

/// Wraps the stock resolver and counts how often each operation runs.
struct CountingResolver {
    inner: NodeTagResolver,
    counters: Arc<Counters>,
}

impl TagResolver for CountingResolver {
    fn resolve_var_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<phpdoc_resolve::VarTagKey, phpdoc_resolve::VarTag> {
        self.counters.var.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_var_tags(node, scope)
    }

    fn resolve_method_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::MethodTag> {
        self.counters.method.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_method_tags(node, scope)
    }

    fn resolve_property_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::PropertyTag> {
        self.inner.resolve_property_tags(node, scope)
    }

    fn resolve_extends_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::ExtendsTag> {
        self.inner.resolve_extends_tags(node, scope)
    }

    fn resolve_implements_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::ImplementsTag> {
        self.inner.resolve_implements_tags(node, scope)
    }

    fn resolve_uses_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::UsesTag> {
        self.inner.resolve_uses_tags(node, scope)
    }

    fn resolve_param_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> IndexMap<String, phpdoc_resolve::ParamTag> {
        self.counters.param.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_param_tags(node, scope)
    }

    fn resolve_return_tag(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> Option<phpdoc_resolve::ReturnTag> {
        self.counters.return_.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_return_tag(node, scope)
    }

    fn resolve_throws_tag(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> Option<phpdoc_resolve::ThrowsTag> {
        self.counters.throws.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_throws_tag(node, scope)
    }

    fn resolve_mixin_tags(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> Vec<phpdoc_resolve::MixinTag> {
        self.inner.resolve_mixin_tags(node, scope)
    }

    fn resolve_deprecated_tag(
        &self,
        node: &DocNode,
        scope: &NameScope,
    ) -> Option<phpdoc_resolve::DeprecatedTag> {
        self.counters.deprecated.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve_deprecated_tag(node, scope)
    }

    fn resolve_is_deprecated(&self, node: &DocNode) -> bool {
        self.inner.resolve_is_deprecated(node)
    }

    fn resolve_is_internal(&self, node: &DocNode) -> bool {
        self.inner.resolve_is_internal(node)
    }

    fn resolve_is_final(&self, node: &DocNode) -> bool {
        self.inner.resolve_is_final(node)
    }
}

/// Build a live block over the given tags with a counting resolver.
fn counted_block(tags: Vec<DocTag>) -> (ResolvedDocBlock, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let resolver = CountingResolver {
        inner: NodeTagResolver::new(),
        counters: Arc::clone(&counters),
    };
    let block = ResolvedDocBlock::create(
        DocNode::new(tags),
        "/** ... */",
        Some("src/Example.php".to_string()),
        NameScope::global(),
        TemplateTypeMap::empty(),
        IndexMap::new(),
        Arc::new(resolver),
    );
    (block, counters)
}

// ─── Idempotence ────────────────────────────────────────────────────

#[test]
fn repeated_reads_resolve_once() {
    let (block, counters) = counted_block(vec![
        DocTag::Param {
            name: "id".to_string(),
            ty: Type::named("int"),
            is_variadic: false,
        },
        DocTag::Return {
            ty: Type::named("string"),
        },
    ]);

    let first = block.param_tags().clone();
    let second = block.param_tags().clone();
    assert_eq!(first, second);
    assert_eq!(counters.param.load(Ordering::Relaxed), 1);

    let first = block.return_tag().cloned();
    let second = block.return_tag().cloned();
    assert_eq!(first, second);
    assert!(first.is_some());
    assert_eq!(counters.return_.load(Ordering::Relaxed), 1);
}

#[test]
fn absent_results_are_cached_too() {
    // A docblock without @return: the absent result must be memoized,
    // not recomputed on every read.
    let (block, counters) = counted_block(vec![DocTag::Param {
        name: "id".to_string(),
        ty: Type::named("int"),
        is_variadic: false,
    }]);

    assert!(block.return_tag().is_none());
    assert!(block.return_tag().is_none());
    assert_eq!(counters.return_.load(Ordering::Relaxed), 1);
}

#[test]
fn accessing_one_field_does_not_resolve_others() {
    let (block, counters) = counted_block(vec![
        DocTag::Param {
            name: "id".to_string(),
            ty: Type::named("int"),
            is_variadic: false,
        },
        DocTag::Return {
            ty: Type::named("string"),
        },
        DocTag::Throws {
            ty: Type::named("RuntimeException"),
        },
    ]);

    let _ = block.return_tag();
    assert_eq!(counters.return_.load(Ordering::Relaxed), 1);
    assert_eq!(counters.param.load(Ordering::Relaxed), 0);
    assert_eq!(counters.throws.load(Ordering::Relaxed), 0);
    assert_eq!(counters.var.load(Ordering::Relaxed), 0);
}

// ─── Empty block neutrality ─────────────────────────────────────────

#[test]
fn empty_block_has_nothing() {
    let block = ResolvedDocBlock::create_empty();

    assert!(block.var_tags().is_empty());
    assert!(block.method_tags().is_empty());
    assert!(block.property_tags().is_empty());
    assert!(block.extends_tags().is_empty());
    assert!(block.implements_tags().is_empty());
    assert!(block.uses_tags().is_empty());
    assert!(block.param_tags().is_empty());
    assert!(block.return_tag().is_none());
    assert!(block.throws_tag().is_none());
    assert!(block.mixin_tags().is_empty());
    assert!(block.deprecated_tag().is_none());
    assert!(block.template_tags().is_empty());
    assert!(block.template_type_map().is_empty());
    assert!(!block.is_deprecated());
    assert!(!block.is_internal());
    assert!(!block.is_final());
    assert!(block.filename().is_none());
}

// ─── Parameter-name remapping ───────────────────────────────────────

#[test]
fn remapping_drops_unmapped_names() {
    let (block, _) = counted_block(vec![
        DocTag::Param {
            name: "a".to_string(),
            ty: Type::named("int"),
            is_variadic: false,
        },
        DocTag::Param {
            name: "b".to_string(),
            ty: Type::named("string"),
            is_variadic: false,
        },
    ]);

    let mut mapping = HashMap::new();
    mapping.insert("a".to_string(), "x".to_string());

    let remapped = block.change_parameter_names_by_mapping(&mapping);
    let tags = remapped.param_tags();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags["x"].ty(), &Type::named("int"));
    assert!(!tags.contains_key("a"));
    assert!(!tags.contains_key("b"));
}

#[test]
fn remapping_keeps_other_fields() {
    let (block, counters) = counted_block(vec![
        DocTag::Param {
            name: "a".to_string(),
            ty: Type::named("int"),
            is_variadic: false,
        },
        DocTag::Return {
            ty: Type::named("string"),
        },
    ]);

    // Resolve the return tag on the original; the derived block must
    // carry the cached value over without another resolver call.
    let _ = block.return_tag();

    let mut mapping = HashMap::new();
    mapping.insert("a".to_string(), "x".to_string());
    let remapped = block.change_parameter_names_by_mapping(&mapping);

    assert_eq!(
        remapped.return_tag().map(|t| t.ty().clone()),
        Some(Type::named("string"))
    );
    assert_eq!(counters.return_.load(Ordering::Relaxed), 1);
    assert_eq!(remapped.text(), block.text());
    assert_eq!(remapped.filename(), block.filename());
}

// ─── Flags ──────────────────────────────────────────────────────────

#[test]
fn flags_come_from_the_node() {
    let (block, _) = counted_block(vec![
        DocTag::Deprecated {
            message: Some("use createFromFormat() instead".to_string()),
        },
        DocTag::Internal,
        DocTag::Final,
    ]);

    assert!(block.is_deprecated());
    assert!(block.is_internal());
    assert!(block.is_final());
    assert_eq!(
        block.deprecated_tag().and_then(|t| t.message()),
        Some("use createFromFormat() instead")
    );
}
