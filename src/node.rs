//! The structured docblock node handed in from upstream parsing.
//!
//! Parsing raw `/** ... */` text is not this crate's job: the host parses
//! a comment once and hands the engine a [`DocNode`] — an ordered list of
//! structured tag entries whose type expressions are still *unresolved*
//! (short or aliased class names, template parameters written as plain
//! names).  Resolution against a [`crate::scope::NameScope`] happens
//! lazily, per tag kind, inside the resolved block.

use serde::{Deserialize, Serialize};

use crate::types::Type;

/// One structured tag entry in a parsed docblock.
///
/// Types carried here are unresolved; the tag resolver maps them through
/// the name scope when the corresponding fact is first requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocTag {
    /// `@var Type` / `@var Type $name`
    Var { ty: Type, name: Option<String> },
    /// `@param Type $name` (name stored without the `$` prefix)
    Param {
        name: String,
        ty: Type,
        is_variadic: bool,
    },
    /// `@return Type`
    Return { ty: Type },
    /// `@throws Type`
    Throws { ty: Type },
    /// `@method ReturnType name(...)`
    Method {
        name: String,
        ty: Type,
        is_static: bool,
    },
    /// `@property Type $name` (name stored without the `$` prefix)
    Property { name: String, ty: Type },
    /// `@extends Base<...>`
    Extends { name: String, ty: Type },
    /// `@implements Interface<...>`
    Implements { name: String, ty: Type },
    /// `@use Trait<...>`
    Uses { name: String, ty: Type },
    /// `@mixin ClassName`
    Mixin { ty: Type },
    /// `@deprecated [message]`
    Deprecated { message: Option<String> },
    /// `@internal`
    Internal,
    /// `@final`
    Final,
    /// `@template T [of Bound]`
    Template { name: String, bound: Option<Type> },
}

/// A parsed docblock: the ordered tag entries of one `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    tags: Vec<DocTag>,
}

impl DocNode {
    pub fn new(tags: Vec<DocTag>) -> DocNode {
        DocNode { tags }
    }

    /// The node of a declaration with no docblock at all.
    pub fn empty() -> DocNode {
        DocNode::default()
    }

    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
