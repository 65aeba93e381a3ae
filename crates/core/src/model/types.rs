use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Declaration position reported by the front end (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: PathBuf,
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

impl Position {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// Primitive kinds a front end may report for a basic type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    UnsafePointer,
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        };
        f.write_str(name)
    }
}

/// Shape of a type as seen by the type checker.
/// Named types compare by (package, name); universe types such as `error`
/// carry an empty package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Basic { name: BasicKind },
    Named { package: String, name: String },
    Pointer { elem: Box<TypeRef> },
    Slice { elem: Box<TypeRef> },
    /// Any compound shape not modelled above (map, func, chan, array, ...)
    Other { repr: String },
}

impl TypeRef {
    pub fn basic(kind: BasicKind) -> Self {
        TypeRef::Basic { name: kind }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeRef) -> Self {
        TypeRef::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeRef) -> Self {
        TypeRef::Slice {
            elem: Box::new(elem),
        }
    }

    /// `(package, name)` if this is a named type
    pub fn as_named(&self) -> Option<(&str, &str)> {
        match self {
            TypeRef::Named { package, name } => Some((package, name)),
            _ => None,
        }
    }

    pub fn is_named(&self, package: &str, name: &str) -> bool {
        self.as_named() == Some((package, name))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Basic { name } => write!(f, "{name}"),
            TypeRef::Named { package, name } if package.is_empty() => write!(f, "{name}"),
            TypeRef::Named { package, name } => write!(f, "{package}.{name}"),
            TypeRef::Pointer { elem } => write!(f, "*{elem}"),
            TypeRef::Slice { elem } => write!(f, "[]{elem}"),
            TypeRef::Other { repr } => write!(f, "{repr}"),
        }
    }
}

/// Ordered parameter and result types of a method
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub results: Vec<TypeRef>,
    /// Last parameter is `...T`; it is then reported as a slice of `T`
    #[serde(default)]
    pub variadic: bool,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |types: &[TypeRef]| {
            types
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut params = join(&self.params);
        if self.variadic {
            if let Some(TypeRef::Slice { elem }) = self.params.last() {
                let head = join(&self.params[..self.params.len() - 1]);
                params = if head.is_empty() {
                    format!("...{elem}")
                } else {
                    format!("{head}, ...{elem}")
                };
            }
        }
        write!(f, "({params})")?;
        match self.results.len() {
            0 => Ok(()),
            1 => write!(f, " {}", self.results[0]),
            _ => write!(f, " ({})", join(&self.results)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    #[default]
    Value,
    Pointer,
}

/// A method declared directly on a type (never a promoted one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub receiver: Receiver,
    #[serde(flatten)]
    pub signature: Signature,
    #[serde(default)]
    pub position: Option<Position>,
}

/// A method required by an interface definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    #[serde(flatten)]
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub embedded: bool,
}

/// Underlying representation of a declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Underlying {
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<InterfaceMethod>,
        #[serde(default)]
        embeds: Vec<TypeRef>,
    },
    Other {
        repr: String,
    },
}

/// A type declared in the analyzed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub position: Position,
    pub underlying: Underlying,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// An interface definition, local or imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub methods: Vec<InterfaceMethod>,
    #[serde(default)]
    pub embeds: Vec<TypeRef>,
}

/// Facts about one imported package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFacts {
    pub path: String,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDef>,
}

/// Type-checked facts for one analyzed package, as emitted by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub imports: Vec<PackageFacts>,
}

impl CompilationUnit {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            types: Vec::new(),
            imports: Vec::new(),
        }
    }
}
