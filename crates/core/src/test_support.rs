//! Builders for unit facts shared by the unit tests.

use crate::contract::{InterfaceContract, RequiredMethod, TypeDescriptor};
use crate::model::*;

pub const SLOG: &str = "log/slog";

pub fn pos(line: usize) -> Position {
    Position::new("handler.go", line, 6)
}

pub fn handler_ref() -> TypeRef {
    TypeRef::named(SLOG, "Handler")
}

pub fn attrs_type() -> TypeRef {
    TypeRef::slice(TypeRef::named(SLOG, "Attr"))
}

fn sig(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Signature {
    Signature {
        params,
        results,
        variadic: false,
    }
}

fn slog_facts() -> PackageFacts {
    let context = TypeRef::named("context", "Context");
    PackageFacts {
        path: SLOG.to_string(),
        interfaces: vec![InterfaceDef {
            package: SLOG.to_string(),
            name: "Handler".to_string(),
            methods: vec![
                InterfaceMethod {
                    name: "Enabled".to_string(),
                    signature: sig(
                        vec![context.clone(), TypeRef::named(SLOG, "Level")],
                        vec![TypeRef::basic(BasicKind::Bool)],
                    ),
                },
                InterfaceMethod {
                    name: "Handle".to_string(),
                    signature: sig(
                        vec![context, TypeRef::named(SLOG, "Record")],
                        vec![TypeRef::named("", "error")],
                    ),
                },
                InterfaceMethod {
                    name: "WithAttrs".to_string(),
                    signature: sig(vec![attrs_type()], vec![handler_ref()]),
                },
                InterfaceMethod {
                    name: "WithGroup".to_string(),
                    signature: sig(vec![TypeRef::basic(BasicKind::String)], vec![handler_ref()]),
                },
            ],
            embeds: vec![],
        }],
    }
}

/// A unit whose imports make `log/slog.Handler` resolvable
pub fn slog_unit(package: &str) -> CompilationUnit {
    let mut unit = CompilationUnit::new(package);
    unit.imports.push(slog_facts());
    unit
}

fn method(name: &str, receiver: Receiver, signature: Signature) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        receiver,
        signature,
        position: None,
    }
}

pub fn enabled(receiver: Receiver) -> MethodDecl {
    method(
        "Enabled",
        receiver,
        sig(
            vec![TypeRef::named("context", "Context"), TypeRef::named(SLOG, "Level")],
            vec![TypeRef::basic(BasicKind::Bool)],
        ),
    )
}

pub fn handle(receiver: Receiver) -> MethodDecl {
    method(
        "Handle",
        receiver,
        sig(
            vec![TypeRef::named("context", "Context"), TypeRef::named(SLOG, "Record")],
            vec![TypeRef::named("", "error")],
        ),
    )
}

pub fn with_attrs(receiver: Receiver) -> MethodDecl {
    method("WithAttrs", receiver, sig(vec![attrs_type()], vec![handler_ref()]))
}

pub fn with_group(receiver: Receiver) -> MethodDecl {
    method(
        "WithGroup",
        receiver,
        sig(vec![TypeRef::basic(BasicKind::String)], vec![handler_ref()]),
    )
}

pub fn embedded_field(ty: TypeRef) -> FieldDecl {
    FieldDecl {
        name: String::new(),
        ty,
        embedded: true,
    }
}

pub fn plain_struct(name: &str, line: usize, methods: Vec<MethodDecl>) -> TypeDecl {
    TypeDecl {
        name: name.to_string(),
        position: pos(line),
        underlying: Underlying::Struct { fields: vec![] },
        methods,
    }
}

/// A struct with a single embedded field of type `ty`
pub fn embedding(name: &str, line: usize, ty: TypeRef) -> TypeDecl {
    TypeDecl {
        name: name.to_string(),
        position: pos(line),
        underlying: Underlying::Struct {
            fields: vec![embedded_field(ty)],
        },
        methods: vec![],
    }
}

/// `type <name> struct { slog.Handler }` with the given declared methods
pub fn embedding_handler(name: &str, line: usize, methods: Vec<MethodDecl>) -> TypeDecl {
    TypeDecl {
        methods,
        ..embedding(name, line, handler_ref())
    }
}

/// `slog.Handler` requiring `WithAttrs` and `WithGroup`, both detection modes
pub fn full_contract() -> InterfaceContract {
    InterfaceContract::new(
        SLOG,
        "Handler",
        vec![
            RequiredMethod::new(
                "WithAttrs",
                vec![TypeDescriptor::slice_of(SLOG, "Attr")],
                vec![TypeDescriptor::named(SLOG, "Handler")],
            ),
            RequiredMethod::new(
                "WithGroup",
                vec![TypeDescriptor::basic(BasicKind::String)],
                vec![TypeDescriptor::named(SLOG, "Handler")],
            ),
        ],
    )
}
