// Declaration record definitions for the binding engine

use serde::{Deserialize, Serialize};

/// Type reference with const qualifier, pointers, and arrays
///
/// The base name is left unresolved here; the [`Catalog`](crate::catalog::Catalog)
/// decides whether it names a struct, an enum, a typedef alias, a C
/// primitive, or an opaque type from an unseen header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub pointer_depth: usize, // 0 = not pointer, 1 = *, 2 = **, etc.
    #[serde(default)]
    pub array_dims: Vec<Option<usize>>, // None for unsized dimension (function params)
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            is_const: false,
            pointer_depth: 0,
            array_dims: Vec::new(),
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    pub fn with_array(mut self, size: Option<usize>) -> Self {
        self.array_dims.push(size);
        self
    }

    /// Whether this reference carries any pointer or array indirection
    pub fn is_indirect(&self) -> bool {
        self.pointer_depth > 0 || !self.array_dims.is_empty()
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

/// Struct field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// Struct definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Enum definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
}

/// Typedef alias: `typedef <underlying> <name>;`
///
/// Aliases participate in type resolution only; they are never binding
/// targets themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefDecl {
    pub name: String,
    pub underlying: TypeRef,
}

/// Function definition or prototype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: TypeRef,
    pub params: Vec<Param>,
}

impl FunctionDecl {
    /// The receiver-shaped slot: C convention puts the object argument first
    pub fn first_param(&self) -> Option<&Param> {
        self.params.first()
    }
}

/// A top-level declaration as delivered by the parser collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    Struct(StructDecl),
    Enum(EnumDecl),
    Typedef(TypedefDecl),
    Function(FunctionDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Struct(s) => &s.name,
            Declaration::Enum(e) => &e.name,
            Declaration::Typedef(t) => &t.name,
            Declaration::Function(f) => &f.name,
        }
    }
}

/// One parsed source file: its identifier plus declarations in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub id: String,
    pub declarations: Vec<Declaration>,
}

impl TranslationUnit {
    pub fn new(id: impl Into<String>) -> Self {
        TranslationUnit {
            id: id.into(),
            declarations: Vec::new(),
        }
    }

    pub fn with_declarations(id: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        TranslationUnit {
            id: id.into(),
            declarations,
        }
    }

    pub fn push(&mut self, decl: Declaration) {
        self.declarations.push(decl);
    }
}
