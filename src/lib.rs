//! PHPDoc resolution and inheritance merging for PHP static analysis.
//!
//! Given a parsed docblock attached to a declaration (class, method,
//! property, function), this crate lazily derives typed facts — parameter
//! types, return type, `@var` annotations, declared exceptions, generic
//! template bindings, deprecation/internal/final flags — and, when the
//! declaration overrides ancestors, merges those facts with the
//! ancestors' under per-tag-kind policies while substituting concrete
//! generic type arguments across the inheritance boundary.
//!
//! The centerpiece is [`ResolvedDocBlock`]: construct one per declaration
//! with [`ResolvedDocBlock::create`] (or [`ResolvedDocBlock::create_empty`]
//! when no docblock exists), pull facts lazily, and combine override
//! chains with [`ResolvedDocBlock::clone_and_merge`].
//!
//! # What this crate does *not* do
//!
//! Parsing raw `/** ... */` text, reflecting the class hierarchy, and the
//! full type algebra are the host's job.  The crate consumes them at
//! narrow seams: [`DocNode`] (already-parsed tags), [`NameScope`]
//! (short-name → FQN resolution), [`TagResolver`] (node → typed facts),
//! and [`BindingContext`] (usage-site generic bindings and parameter-name
//! correspondence per ancestor).
//!
//! # Modules
//!
//! - [`block`]: the lazy, memoizing, mergeable [`ResolvedDocBlock`].
//! - [`tags`]: the typed-tag value family (`@param`, `@return`, `@var`,
//!   `@throws`, `@deprecated`, ...).
//! - [`types`]: the type model with supertype queries, unions, and
//!   template substitution.
//! - [`template`]: generic template maps.
//! - [`verbosity`]: rendering detail levels with fallback dispatch.
//! - [`resolver`]: the [`TagResolver`] seam and its stock implementation.
//! - [`binding`]: per-ancestor usage-site bindings for merging.
//! - [`node`] / [`scope`]: the parsed-comment and name-resolution inputs.

pub mod binding;
pub mod block;
pub mod node;
pub mod resolver;
pub mod scope;
pub mod tags;
pub mod template;
pub mod trinary;
pub mod types;
pub mod verbosity;

pub use binding::{BindingContext, UsageBinding};
pub use block::ResolvedDocBlock;
pub use node::{DocNode, DocTag};
pub use resolver::{NodeTagResolver, TagResolver};
pub use scope::NameScope;
pub use tags::{
    DeprecatedTag, ExtendsTag, ImplementsTag, MethodTag, MixinTag, ParamTag, PropertyTag,
    ReturnTag, TemplateTag, ThrowsTag, TypedTag, UsesTag, VarTag, VarTagKey,
};
pub use template::TemplateTypeMap;
pub use trinary::TrinaryLogic;
pub use types::{ConstantValue, Type};
pub use verbosity::VerbosityLevel;
