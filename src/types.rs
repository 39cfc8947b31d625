//! The PHP type model consumed by tag resolution and merging.
//!
//! This is deliberately a small, closed representation: enough structure for
//! the operations the docblock engine needs (supertype queries during return
//! merging, union construction for `@throws` accumulation, generic template
//! substitution, and verbosity-aware rendering).  It is *not* a full subtype
//! lattice — class hierarchies are not reflected here, so relationship
//! queries between unrelated class names answer [`TrinaryLogic::Maybe`].

use serde::{Deserialize, Serialize};

use crate::template::TemplateTypeMap;
use crate::trinary::TrinaryLogic;
use crate::verbosity::VerbosityLevel;

/// Scalar / built-in type names.  These are pairwise disjoint, so a
/// supertype query between two different builtins is a definite `No`
/// rather than a `Maybe`.
pub(crate) const SCALAR_TYPES: &[&str] = &[
    "int", "integer", "float", "double", "string", "bool", "boolean", "void", "never", "null",
    "false", "true", "callable", "resource",
];

/// A literal value appearing as a constant type (e.g. `123`, `'active'`).
///
/// The null constant is represented by [`Type::Null`] directly, matching
/// the special treatment it gets in verbosity recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstantValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ConstantValue {
    /// The builtin type this constant belongs to.
    pub fn base_type_name(&self) -> &'static str {
        match self {
            ConstantValue::Bool(_) => "bool",
            ConstantValue::Int(_) => "int",
            ConstantValue::String(_) => "string",
        }
    }
}

/// A resolved PHP type as it appears in docblock annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// `mixed` — the top type, supertype of everything.
    Mixed,
    /// The `null` constant type.
    Null,
    /// A class, interface, or builtin name.  Class names are stored
    /// fully qualified (no leading `\`), e.g. `"App\\Models\\User"`.
    Named(String),
    /// An unbound generic template placeholder, e.g. `T` from `@template T`.
    Template(String),
    /// A constant-valued type, e.g. `123` or `'active'`.
    Constant(ConstantValue),
    /// A union, e.g. `User|Admin|null`.  Always at least two members;
    /// [`Type::union`] maintains that invariant.
    Union(Vec<Type>),
    /// A callable with a (possibly empty) parameter list and return type,
    /// e.g. `callable(int): string`.
    Callable {
        params: Vec<Type>,
        return_type: Box<Type>,
    },
    /// A generic instantiation, e.g. `Collection<int, User>`.
    Generic { base: String, args: Vec<Type> },
}

impl Type {
    /// Shorthand for a [`Type::Named`] from any string-ish value.
    pub fn named(name: impl Into<String>) -> Type {
        Type::Named(name.into())
    }

    /// Shorthand for a [`Type::Template`] placeholder.
    pub fn template(name: impl Into<String>) -> Type {
        Type::Template(name.into())
    }

    /// Whether this name is one of the disjoint builtin scalars.
    fn is_scalar_name(name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        SCALAR_TYPES.contains(&lower.as_str())
    }

    /// Is this type (at the top level) callable?
    pub fn is_callable(&self) -> bool {
        match self {
            Type::Callable { .. } => true,
            Type::Named(name) => name.eq_ignore_ascii_case("callable"),
            _ => false,
        }
    }

    /// Is this type a constant value other than the null constant?
    pub fn is_non_null_constant(&self) -> bool {
        matches!(self, Type::Constant(_))
    }

    /// Depth-first structural check: does any nested component (including
    /// `self`) satisfy the predicate?  Used by verbosity recommendation.
    pub fn any_component(&self, predicate: &dyn Fn(&Type) -> bool) -> bool {
        if predicate(self) {
            return true;
        }
        match self {
            Type::Union(members) => members.iter().any(|m| m.any_component(predicate)),
            Type::Callable {
                params,
                return_type,
            } => {
                params.iter().any(|p| p.any_component(predicate))
                    || return_type.any_component(predicate)
            }
            Type::Generic { args, .. } => args.iter().any(|a| a.any_component(predicate)),
            _ => false,
        }
    }

    /// Three-valued "is `self` a supertype of (broader than or equal to)
    /// `other`".
    ///
    /// Definite answers are only given where no hierarchy knowledge is
    /// needed: `mixed` covers everything, equal types cover each other,
    /// distinct builtins are disjoint, and unions distribute over their
    /// members.  Two unrelated class names answer `Maybe` — resolving
    /// their actual relationship would require reflection.
    pub fn is_supertype_of(&self, other: &Type) -> TrinaryLogic {
        if self == other {
            return TrinaryLogic::Yes;
        }

        if let Type::Mixed = self {
            return TrinaryLogic::Yes;
        }
        if let Type::Mixed = other {
            // A non-mixed type never covers all of mixed, but `other` may
            // still turn out to be narrower at runtime.
            return TrinaryLogic::Maybe;
        }

        // A union on the right: self must cover every member.
        if let Type::Union(members) = other {
            return TrinaryLogic::all(members.iter().map(|m| self.is_supertype_of(m)));
        }

        // A union on the left: any member covering `other` suffices; if
        // every member definitely rejects it, the union does too.
        if let Type::Union(members) = self {
            return TrinaryLogic::any(members.iter().map(|m| m.is_supertype_of(other)));
        }

        match (self, other) {
            // A builtin covers its constants: `int` ⊇ `123`.
            (Type::Named(name), Type::Constant(value)) => {
                if name.eq_ignore_ascii_case(value.base_type_name()) {
                    TrinaryLogic::Yes
                } else if Type::is_scalar_name(name) {
                    TrinaryLogic::No
                } else {
                    TrinaryLogic::Maybe
                }
            }
            // `null` the builtin and the null constant are the same set.
            (Type::Named(name), Type::Null) if name.eq_ignore_ascii_case("null") => {
                TrinaryLogic::Yes
            }
            (Type::Constant(_), _) | (Type::Null, _) => TrinaryLogic::No,
            (Type::Named(a), Type::Named(b)) => {
                // Distinct builtins are disjoint; anything involving a
                // class name is unknown without the hierarchy.
                if Type::is_scalar_name(a) && Type::is_scalar_name(b) {
                    TrinaryLogic::No
                } else {
                    TrinaryLogic::Maybe
                }
            }
            // Same generic base: covariant over the arguments as far as
            // we can tell; different base or arity is unknown.
            (
                Type::Generic { base: a, args: xs },
                Type::Generic { base: b, args: ys },
            ) if a == b && xs.len() == ys.len() => TrinaryLogic::all(
                xs.iter()
                    .zip(ys.iter())
                    .map(|(x, y)| x.is_supertype_of(y)),
            ),
            _ => TrinaryLogic::Maybe,
        }
    }

    /// Build the union of two types.
    ///
    /// Unions are flattened, duplicate members are dropped (so unioning the
    /// same type in twice is a no-op), `mixed` absorbs everything, and a
    /// single surviving member is returned unwrapped.
    pub fn union(a: Type, b: Type) -> Type {
        let mut members: Vec<Type> = Vec::new();

        let push = |ty: Type, members: &mut Vec<Type>| {
            if !members.contains(&ty) {
                members.push(ty);
            }
        };

        for ty in [a, b] {
            match ty {
                Type::Mixed => return Type::Mixed,
                Type::Union(inner) => {
                    for member in inner {
                        push(member, &mut members);
                    }
                }
                other => push(other, &mut members),
            }
        }

        match members.len() {
            1 => members.pop().unwrap(),
            _ => Type::Union(members),
        }
    }

    /// Replace every template placeholder bound in `map` with its concrete
    /// type, recursively.  Unbound placeholders pass through unchanged.
    pub fn substitute_templates(&self, map: &TemplateTypeMap) -> Type {
        match self {
            Type::Template(name) => match map.get(name) {
                Some(bound) => bound.clone(),
                None => self.clone(),
            },
            Type::Union(members) => {
                // Rebuild through `union` so substitution can collapse
                // members that become equal (e.g. `T|User` with T = User).
                members
                    .iter()
                    .map(|m| m.substitute_templates(map))
                    .reduce(Type::union)
                    .unwrap_or(Type::Mixed)
            }
            Type::Callable {
                params,
                return_type,
            } => Type::Callable {
                params: params.iter().map(|p| p.substitute_templates(map)).collect(),
                return_type: Box::new(return_type.substitute_templates(map)),
            },
            Type::Generic { base, args } => Type::Generic {
                base: base.clone(),
                args: args.iter().map(|a| a.substitute_templates(map)).collect(),
            },
            _ => self.clone(),
        }
    }

    /// Apply a name-mapping function to every class/interface name in the
    /// type, recursively.  Used by name-scope resolution to turn short or
    /// aliased names into fully-qualified ones (and to recognise template
    /// placeholders written as plain names).
    pub fn map_names(&self, f: &dyn Fn(&str) -> Type) -> Type {
        match self {
            Type::Named(name) => f(name),
            Type::Union(members) => members
                .iter()
                .map(|m| m.map_names(f))
                .reduce(Type::union)
                .unwrap_or(Type::Mixed),
            Type::Callable {
                params,
                return_type,
            } => Type::Callable {
                params: params.iter().map(|p| p.map_names(f)).collect(),
                return_type: Box::new(return_type.map_names(f)),
            },
            Type::Generic { base, args } => {
                // The base keeps its name-resolution but stays a generic;
                // a base that resolves to something other than a plain
                // name keeps the original spelling.
                let base = match f(base) {
                    Type::Named(resolved) => resolved,
                    _ => base.clone(),
                };
                Type::Generic {
                    base,
                    args: args.iter().map(|a| a.map_names(f)).collect(),
                }
            }
            _ => self.clone(),
        }
    }

    /// Render the type at the given verbosity level.
    ///
    /// The level only changes how much detail is shown for constants and
    /// callables; plain names render the same everywhere.
    pub fn describe(&self, level: VerbosityLevel) -> String {
        level.handle(
            &|| self.describe_type_only(),
            &|| self.describe_value(),
            Some(&|| self.describe_precise()),
            None,
        )
    }

    fn describe_type_only(&self) -> String {
        match self {
            Type::Mixed => "mixed".to_string(),
            Type::Null => "null".to_string(),
            Type::Named(name) => name.clone(),
            Type::Template(name) => name.clone(),
            Type::Constant(value) => value.base_type_name().to_string(),
            Type::Union(members) => members
                .iter()
                .map(|m| m.describe_type_only())
                .collect::<Vec<_>>()
                .join("|"),
            Type::Callable { .. } => "callable".to_string(),
            Type::Generic { base, args } => format!(
                "{}<{}>",
                base,
                args.iter()
                    .map(|a| a.describe_type_only())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn describe_value(&self) -> String {
        match self {
            Type::Constant(ConstantValue::Bool(b)) => b.to_string(),
            Type::Constant(ConstantValue::Int(i)) => i.to_string(),
            Type::Constant(ConstantValue::String(s)) => format!("'{s}'"),
            Type::Union(members) => members
                .iter()
                .map(|m| m.describe_value())
                .collect::<Vec<_>>()
                .join("|"),
            Type::Generic { base, args } => format!(
                "{}<{}>",
                base,
                args.iter()
                    .map(|a| a.describe_value())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => self.describe_type_only(),
        }
    }

    fn describe_precise(&self) -> String {
        match self {
            Type::Callable {
                params,
                return_type,
            } => format!(
                "callable({}): {}",
                params
                    .iter()
                    .map(|p| p.describe_precise())
                    .collect::<Vec<_>>()
                    .join(", "),
                return_type.describe_precise()
            ),
            Type::Union(members) => members
                .iter()
                .map(|m| m.describe_precise())
                .collect::<Vec<_>>()
                .join("|"),
            Type::Generic { base, args } => format!(
                "{}<{}>",
                base,
                args.iter()
                    .map(|a| a.describe_precise())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => self.describe_value(),
        }
    }
}
