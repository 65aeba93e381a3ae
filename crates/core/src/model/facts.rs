use std::collections::HashSet;

use thiserror::Error;

use super::types::*;

/// Embedding chains deeper than this are not followed
pub const MAX_EMBED_DEPTH: usize = 8;

/// Read-only view of one declared type: its fields and its declared methods.
/// Checks only ever see declared types through this trait.
pub trait TypeView {
    fn name(&self) -> &str;

    fn position(&self) -> &Position;

    /// Struct fields in declaration order, empty for non-struct types
    fn fields(&self) -> &[FieldDecl];

    /// Methods declared on the type itself (value and pointer receivers)
    fn methods(&self) -> &[MethodDecl];

    fn is_interface(&self) -> bool;

    /// Fields that are embedded rather than named
    fn embedded_fields(&self) -> Box<dyn Iterator<Item = &FieldDecl> + '_> {
        Box::new(self.fields().iter().filter(|f| f.embedded))
    }
}

/// Declared types of one analyzed package
pub trait ProgramFacts {
    /// Import path of the analyzed package
    fn package(&self) -> &str;

    /// Declared types, in input order
    fn type_decls(&self) -> Vec<&dyn TypeView>;

    fn lookup_type(&self, name: &str) -> Option<&dyn TypeView>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("package `{0}` is not available to the analysis")]
    PackageNotFound(String),
    #[error("package `{package}` has no interface named `{name}`")]
    InterfaceNotFound { package: String, name: String },
}

/// Maps a `(module, name)` pair to its interface definition
pub trait InterfaceResolver {
    fn resolve_interface(&self, package: &str, name: &str) -> Result<InterfaceDef, ResolveError>;
}

impl TypeView for TypeDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn fields(&self) -> &[FieldDecl] {
        match &self.underlying {
            Underlying::Struct { fields } => fields,
            _ => &[],
        }
    }

    fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    fn is_interface(&self) -> bool {
        matches!(self.underlying, Underlying::Interface { .. })
    }
}

impl ProgramFacts for CompilationUnit {
    fn package(&self) -> &str {
        &self.package
    }

    fn type_decls(&self) -> Vec<&dyn TypeView> {
        self.types.iter().map(|t| t as &dyn TypeView).collect()
    }

    fn lookup_type(&self, name: &str) -> Option<&dyn TypeView> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t as &dyn TypeView)
    }
}

impl InterfaceResolver for CompilationUnit {
    fn resolve_interface(&self, package: &str, name: &str) -> Result<InterfaceDef, ResolveError> {
        let not_found = || ResolveError::InterfaceNotFound {
            package: package.to_string(),
            name: name.to_string(),
        };

        if package == self.package {
            let decl = self.types.iter().find(|t| t.name == name).ok_or_else(not_found)?;
            return match &decl.underlying {
                Underlying::Interface { methods, embeds } => Ok(InterfaceDef {
                    package: package.to_string(),
                    name: name.to_string(),
                    methods: methods.clone(),
                    embeds: embeds.clone(),
                }),
                _ => Err(not_found()),
            };
        }

        let facts = self
            .imports
            .iter()
            .find(|p| p.path == package)
            .ok_or_else(|| ResolveError::PackageNotFound(package.to_string()))?;
        facts
            .interfaces
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(not_found)
    }
}

/// Full method list of an interface, with embedded interfaces expanded.
/// Explicit methods come first; an embedded method never replaces one
/// already collected. Unresolvable embeds contribute nothing.
pub fn interface_method_set(
    resolver: &dyn InterfaceResolver,
    def: &InterfaceDef,
) -> Vec<InterfaceMethod> {
    let mut methods: Vec<InterfaceMethod> = Vec::new();
    let mut visited: HashSet<(String, String)> = HashSet::new();
    collect_interface_methods(resolver, def, &mut methods, &mut visited, 0);
    methods
}

fn collect_interface_methods(
    resolver: &dyn InterfaceResolver,
    def: &InterfaceDef,
    out: &mut Vec<InterfaceMethod>,
    visited: &mut HashSet<(String, String)>,
    depth: usize,
) {
    if depth > MAX_EMBED_DEPTH || !visited.insert((def.package.clone(), def.name.clone())) {
        return;
    }
    for m in &def.methods {
        if !out.iter().any(|existing| existing.name == m.name) {
            out.push(m.clone());
        }
    }
    for embed in &def.embeds {
        let Some((package, name)) = embed.as_named() else {
            continue;
        };
        if let Ok(inner) = resolver.resolve_interface(package, name) {
            collect_interface_methods(resolver, &inner, out, visited, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_resolve_imported_interface() {
        let unit = slog_unit("handlers");
        let def = unit.resolve_interface(SLOG, "Handler").unwrap();
        assert_eq!(def.methods.len(), 4);
    }

    #[test]
    fn test_resolve_missing_package() {
        let unit = CompilationUnit::new("handlers");
        let err = unit.resolve_interface(SLOG, "Handler").unwrap_err();
        assert_eq!(err, ResolveError::PackageNotFound(SLOG.to_string()));
    }

    #[test]
    fn test_resolve_missing_interface() {
        let unit = slog_unit("handlers");
        let err = unit.resolve_interface(SLOG, "Leveler").unwrap_err();
        assert!(matches!(err, ResolveError::InterfaceNotFound { .. }));
    }

    #[test]
    fn test_resolve_local_interface() {
        let mut unit = slog_unit("handlers");
        unit.types.push(TypeDecl {
            name: "Sink".to_string(),
            position: pos(3),
            underlying: Underlying::Interface {
                methods: vec![],
                embeds: vec![handler_ref()],
            },
            methods: vec![],
        });

        let def = unit.resolve_interface("handlers", "Sink").unwrap();
        let expanded = interface_method_set(&unit, &def);
        let names: Vec<&str> = expanded.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Enabled", "Handle", "WithAttrs", "WithGroup"]);
    }

    #[test]
    fn test_embedded_fields_view() {
        let decl = embedding_handler("TraceHandler", 10, vec![]);
        let embedded: Vec<_> = decl.embedded_fields().collect();
        assert_eq!(embedded.len(), 1);
        assert!(embedded[0].ty.is_named(SLOG, "Handler"));
    }
}
