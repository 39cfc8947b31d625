//! Typed docblock tags.
//!
//! Each tag kind is its own small value type carrying the resolved
//! [`Type`] it documents (plus kind-specific extras such as the variadic
//! flag on `@param`).  The shared [`TypedTag`] capability lets the merge
//! machinery substitute generic template types into a tag without knowing
//! its concrete kind.

use serde::{Deserialize, Serialize};

use crate::types::Type;

/// Capability shared by every tag kind that documents a type: read the
/// type, and rebuild the tag with a substituted type (all other fields
/// unchanged).
pub trait TypedTag: Sized {
    fn ty(&self) -> &Type;
    fn with_type(self, ty: Type) -> Self;
}

/// Defines a tag struct that carries nothing but a type.
macro_rules! simple_typed_tag {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            ty: Type,
        }

        impl $name {
            pub fn new(ty: Type) -> $name {
                $name { ty }
            }
        }

        impl TypedTag for $name {
            fn ty(&self) -> &Type {
                &self.ty
            }

            fn with_type(self, ty: Type) -> $name {
                $name { ty }
            }
        }
    };
}

simple_typed_tag! {
    /// An `@var` tag documenting a variable or property type.
    VarTag
}

simple_typed_tag! {
    /// An `@throws` tag.  After merging this is always a single tag whose
    /// type may be a union of everything the declaration (and its
    /// ancestors) can throw.
    ThrowsTag
}

simple_typed_tag! {
    /// An `@property` tag declaring a magic property.
    PropertyTag
}

simple_typed_tag! {
    /// An `@extends` tag binding generic arguments on the parent class.
    ExtendsTag
}

simple_typed_tag! {
    /// An `@implements` tag binding generic arguments on an interface.
    ImplementsTag
}

simple_typed_tag! {
    /// An `@use` tag binding generic arguments on a trait.
    UsesTag
}

simple_typed_tag! {
    /// A `@mixin` tag declaring that another class's public members are
    /// exposed via magic methods.
    MixinTag
}

/// An `@param` tag documenting one parameter's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamTag {
    ty: Type,
    is_variadic: bool,
}

impl ParamTag {
    pub fn new(ty: Type, is_variadic: bool) -> ParamTag {
        ParamTag { ty, is_variadic }
    }

    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }
}

impl TypedTag for ParamTag {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn with_type(self, ty: Type) -> ParamTag {
        ParamTag { ty, ..self }
    }
}

/// An `@return` tag.
///
/// A return tag adopted from an ancestor during merging is marked
/// *implicit* — the overriding declaration never spelled it out, which
/// downstream consumers may want to know (e.g. to soften diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnTag {
    ty: Type,
    is_implicit: bool,
}

impl ReturnTag {
    pub fn new(ty: Type) -> ReturnTag {
        ReturnTag {
            ty,
            is_implicit: false,
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit
    }

    /// The same tag, marked as inherited rather than locally declared.
    pub fn into_implicit(self) -> ReturnTag {
        ReturnTag {
            is_implicit: true,
            ..self
        }
    }
}

impl TypedTag for ReturnTag {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn with_type(self, ty: Type) -> ReturnTag {
        ReturnTag { ty, ..self }
    }
}

/// An `@method` tag declaring a magic method.  The type is the declared
/// return type (`mixed` when omitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTag {
    ty: Type,
    is_static: bool,
}

impl MethodTag {
    pub fn new(ty: Type, is_static: bool) -> MethodTag {
        MethodTag { ty, is_static }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl TypedTag for MethodTag {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn with_type(self, ty: Type) -> MethodTag {
        MethodTag { ty, ..self }
    }
}

/// An `@deprecated` tag.  Carries an optional free-text message rather
/// than a type, so it does not implement [`TypedTag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedTag {
    message: Option<String>,
}

impl DeprecatedTag {
    pub fn new(message: Option<String>) -> DeprecatedTag {
        DeprecatedTag { message }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// A `@template` tag declaring a generic parameter with its bound
/// (`mixed` when no `of` clause is given).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTag {
    name: String,
    bound: Type,
}

impl TemplateTag {
    pub fn new(name: impl Into<String>, bound: Type) -> TemplateTag {
        TemplateTag {
            name: name.into(),
            bound,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bound(&self) -> &Type {
        &self.bound
    }
}

/// Key for `@var` tags: keyed by the annotated variable name when the tag
/// names one (`@var Type $foo`), otherwise by position within the
/// docblock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VarTagKey {
    Position(usize),
    Name(String),
}
