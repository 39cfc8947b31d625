//! Verbosity levels for type rendering and cache keying.
//!
//! A [`VerbosityLevel`] controls how much detail a type description
//! carries: `TypeOnly` shows bare type names, `Value` adds constant
//! values, `Precise` adds full callable signatures, and `Cache` is the
//! most detailed form used for stable cache keys.
//!
//! Levels form a fallback chain: a caller that only implements the less
//! detailed renderings still gets a sensible result at a more detailed
//! level (see [`VerbosityLevel::handle`]).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// The closed set of rendering detail levels.
///
/// Each level has a stable numeric code (used by hosts that key caches on
/// the level).  Because the set is a closed Rust enum, dispatching on an
/// out-of-range level is unrepresentable; only [`VerbosityLevel::from_code`]
/// can observe an unknown code, and it answers `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbosityLevel {
    TypeOnly,
    Value,
    Precise,
    Cache,
}

/// Process-wide code → level lookup, populated once at first use and
/// never written again, so it is safe to share across threads.
static REGISTRY: Lazy<HashMap<u8, VerbosityLevel>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    for level in [
        VerbosityLevel::TypeOnly,
        VerbosityLevel::Value,
        VerbosityLevel::Precise,
        VerbosityLevel::Cache,
    ] {
        registry.insert(level.code(), level);
    }
    registry
});

impl VerbosityLevel {
    /// The stable numeric code for this level.
    pub fn code(self) -> u8 {
        match self {
            VerbosityLevel::TypeOnly => 1,
            VerbosityLevel::Value => 2,
            VerbosityLevel::Precise => 3,
            VerbosityLevel::Cache => 4,
        }
    }

    /// Look up a level by its numeric code.  Unknown codes answer `None`.
    pub fn from_code(code: u8) -> Option<VerbosityLevel> {
        REGISTRY.get(&code).copied()
    }

    /// Dispatch to the callback matching this level, degrading gracefully
    /// when the caller did not implement the more detailed variants:
    ///
    ///   - `TypeOnly` → `type_only`
    ///   - `Value`    → `value`
    ///   - `Precise`  → `precise`, else `value`
    ///   - `Cache`    → `cache`, else `precise`, else `value`
    pub fn handle<R>(
        self,
        type_only: &dyn Fn() -> R,
        value: &dyn Fn() -> R,
        precise: Option<&dyn Fn() -> R>,
        cache: Option<&dyn Fn() -> R>,
    ) -> R {
        match self {
            VerbosityLevel::TypeOnly => type_only(),
            VerbosityLevel::Value => value(),
            VerbosityLevel::Precise => match precise {
                Some(callback) => callback(),
                None => value(),
            },
            VerbosityLevel::Cache => match cache.or(precise) {
                Some(callback) => callback(),
                None => value(),
            },
        }
    }

    /// Pick the level recommended for describing `ty`.
    ///
    /// If any nested component is callable, or is a constant value other
    /// than the null constant, a bare type name would be ambiguous and
    /// `Value` is recommended; otherwise `TypeOnly` suffices.
    pub fn recommended_level_for(ty: &Type) -> VerbosityLevel {
        let more_verbose = ty.any_component(&|component| {
            component.is_callable() || component.is_non_null_constant()
        });

        if more_verbose {
            VerbosityLevel::Value
        } else {
            VerbosityLevel::TypeOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_registry() {
        for level in [
            VerbosityLevel::TypeOnly,
            VerbosityLevel::Value,
            VerbosityLevel::Precise,
            VerbosityLevel::Cache,
        ] {
            assert_eq!(VerbosityLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(VerbosityLevel::from_code(0), None);
        assert_eq!(VerbosityLevel::from_code(99), None);
    }
}
