//! Tests for the stock tag resolver: tag extraction from structured
//! docblock nodes, name qualification through the scope, and var-tag
//! keying.

use std::collections::HashMap;

use phpdoc_resolve::{
    DocNode, DocTag, NameScope, NodeTagResolver, TagResolver, TemplateTypeMap, Type, TypedTag,
    VarTagKey,
};

fn scope() -> NameScope {
    let mut uses = HashMap::new();
    uses.insert("User".to_string(), "App\\Models\\User".to_string());
    NameScope::new(
        Some("App\\Services".to_string()),
        uses,
        TemplateTypeMap::empty(),
    )
}

#[test]
fn param_types_are_qualified_through_the_scope() {
    let node = DocNode::new(vec![DocTag::Param {
        name: "user".to_string(),
        ty: Type::named("User"),
        is_variadic: false,
    }]);

    let tags = NodeTagResolver::new().resolve_param_tags(&node, &scope());
    assert_eq!(tags["user"].ty(), &Type::named("App\\Models\\User"));
}

#[test]
fn var_tags_key_by_name_when_annotated() {
    let node = DocNode::new(vec![
        DocTag::Var {
            ty: Type::named("int"),
            name: None,
        },
        DocTag::Var {
            ty: Type::named("string"),
            name: Some("label".to_string()),
        },
        DocTag::Var {
            ty: Type::named("bool"),
            name: None,
        },
    ]);

    let tags = NodeTagResolver::new().resolve_var_tags(&node, &scope());
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[&VarTagKey::Position(0)].ty(), &Type::named("int"));
    assert_eq!(
        tags[&VarTagKey::Name("label".to_string())].ty(),
        &Type::named("string")
    );
    assert_eq!(tags[&VarTagKey::Position(1)].ty(), &Type::named("bool"));
}

#[test]
fn multiple_throws_collapse_into_one_union_tag() {
    let node = DocNode::new(vec![
        DocTag::Throws {
            ty: Type::named("\\RuntimeException"),
        },
        DocTag::Throws {
            ty: Type::named("\\LogicException"),
        },
    ]);

    let tag = NodeTagResolver::new()
        .resolve_throws_tag(&node, &scope())
        .unwrap();
    assert_eq!(
        tag.ty(),
        &Type::Union(vec![
            Type::named("RuntimeException"),
            Type::named("LogicException"),
        ])
    );
}

#[test]
fn first_return_tag_wins_over_duplicates() {
    let node = DocNode::new(vec![
        DocTag::Return {
            ty: Type::named("int"),
        },
        DocTag::Return {
            ty: Type::named("string"),
        },
    ]);

    let tag = NodeTagResolver::new()
        .resolve_return_tag(&node, &scope())
        .unwrap();
    assert_eq!(tag.ty(), &Type::named("int"));
}

#[test]
fn extends_tags_key_by_qualified_parent_name() {
    let node = DocNode::new(vec![DocTag::Extends {
        name: "Repository".to_string(),
        ty: Type::Generic {
            base: "Repository".to_string(),
            args: vec![Type::named("User")],
        },
    }]);

    let tags = NodeTagResolver::new().resolve_extends_tags(&node, &scope());
    let tag = &tags["App\\Services\\Repository"];
    assert_eq!(
        tag.ty(),
        &Type::Generic {
            base: "App\\Services\\Repository".to_string(),
            args: vec![Type::named("App\\Models\\User")],
        }
    );
}

#[test]
fn template_tags_resolve_eagerly_with_bounds() {
    let node = DocNode::new(vec![
        DocTag::Template {
            name: "T".to_string(),
            bound: None,
        },
        DocTag::Template {
            name: "TKey".to_string(),
            bound: Some(Type::named("int")),
        },
    ]);

    let tags = NodeTagResolver::new().resolve_template_tags(&node, &scope());
    assert_eq!(tags.len(), 2);
    assert_eq!(tags["T"].bound(), &Type::Mixed);
    assert_eq!(tags["TKey"].bound(), &Type::named("int"));
}

#[test]
fn booleans_need_no_scope() {
    let node = DocNode::new(vec![DocTag::Deprecated { message: None }, DocTag::Final]);
    let resolver = NodeTagResolver::new();

    assert!(resolver.resolve_is_deprecated(&node));
    assert!(!resolver.resolve_is_internal(&node));
    assert!(resolver.resolve_is_final(&node));
}
