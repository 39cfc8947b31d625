//! Name-resolution context for docblock types.
//!
//! A [`NameScope`] captures everything needed to turn a type name as
//! written in a docblock into its resolved form: the surrounding
//! namespace, the file's `use` import table (alias → fully-qualified
//! name), and the set of generic template parameters in scope (so that a
//! plain `T` resolves to a template placeholder rather than a class).
//!
//! Name resolution follows the usual PHP rules:
//!
//!   - Fully-qualified names (`\App\User`) have the leading `\` stripped
//!   - Unqualified names are looked up in the import table, then
//!     prefixed with the current namespace
//!   - Qualified names (`Models\User`) expand their first segment
//!     through the import table before namespace prefixing

use std::collections::HashMap;

use crate::template::TemplateTypeMap;
use crate::types::{SCALAR_TYPES, Type};

/// The name-resolution context attached to a resolved docblock.
#[derive(Debug, Clone, Default)]
pub struct NameScope {
    /// The enclosing namespace, without leading/trailing `\`.
    namespace: Option<String>,
    /// Import table from the file's `use` statements: alias → FQN.
    uses: HashMap<String, String>,
    /// Template parameters in scope at this declaration.  Names found
    /// here resolve to [`Type::Template`] instead of a class name.
    template_map: TemplateTypeMap,
}

impl NameScope {
    pub fn new(
        namespace: Option<String>,
        uses: HashMap<String, String>,
        template_map: TemplateTypeMap,
    ) -> NameScope {
        NameScope {
            namespace,
            uses,
            template_map,
        }
    }

    /// A scope with no namespace, no imports, and no templates.
    pub fn global() -> NameScope {
        NameScope::default()
    }

    pub fn template_map(&self) -> &TemplateTypeMap {
        &self.template_map
    }

    /// Resolve a class-ish name as written in a docblock to its
    /// fully-qualified form (no leading `\`).
    pub fn resolve_name(&self, name: &str) -> String {
        // Fully qualified — strip the `\` and take it as-is.
        if let Some(fqn) = name.strip_prefix('\\') {
            return fqn.to_string();
        }

        // Builtins never get namespace-qualified.
        let lower = name.to_ascii_lowercase();
        if SCALAR_TYPES.contains(&lower.as_str())
            || lower == "mixed"
            || lower == "object"
            || lower == "array"
            || lower == "iterable"
            || lower == "self"
            || lower == "static"
            || lower == "parent"
        {
            return name.to_string();
        }

        // Expand the first segment through the import table.
        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };

        if let Some(imported) = self.uses.get(first) {
            return match rest {
                Some(rest) => format!("{imported}\\{rest}"),
                None => imported.clone(),
            };
        }

        // Unimported names live in the current namespace.
        match &self.namespace {
            Some(ns) => format!("{ns}\\{name}"),
            None => name.to_string(),
        }
    }

    /// Resolve every name inside a type expression: template parameters
    /// in scope become placeholders, everything else is qualified
    /// through [`NameScope::resolve_name`].
    pub fn resolve_type(&self, ty: &Type) -> Type {
        ty.map_names(&|name| {
            if self.template_map.has(name) {
                Type::Template(name.to_string())
            } else {
                Type::Named(self.resolve_name(name))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> NameScope {
        let mut uses = HashMap::new();
        uses.insert("User".to_string(), "App\\Models\\User".to_string());
        uses.insert("Support".to_string(), "Illuminate\\Support".to_string());
        NameScope::new(
            Some("App\\Services".to_string()),
            uses,
            TemplateTypeMap::from_iter([("T".to_string(), Type::Mixed)]),
        )
    }

    #[test]
    fn fully_qualified_names_pass_through() {
        assert_eq!(scope().resolve_name("\\App\\User"), "App\\User");
    }

    #[test]
    fn imported_alias_expands() {
        assert_eq!(scope().resolve_name("User"), "App\\Models\\User");
        assert_eq!(
            scope().resolve_name("Support\\Collection"),
            "Illuminate\\Support\\Collection"
        );
    }

    #[test]
    fn unimported_name_gets_namespace_prefix() {
        assert_eq!(scope().resolve_name("Invoice"), "App\\Services\\Invoice");
    }

    #[test]
    fn builtins_stay_unqualified() {
        assert_eq!(scope().resolve_name("int"), "int");
        assert_eq!(scope().resolve_name("string"), "string");
    }

    #[test]
    fn template_names_resolve_to_placeholders() {
        let resolved = scope().resolve_type(&Type::named("T"));
        assert_eq!(resolved, Type::template("T"));
    }
}
