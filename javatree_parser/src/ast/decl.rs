//! Compilation units, declarations and class members

use serde::Serialize;

use super::{
    Annotation, Block, Dimension, Expr, GenericType, Modifier, Name, Type, TypeParameter,
};

/// The root of a parse: an ordinary or a module compilation unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CompilationUnit {
    Ordinary(OrdinaryCompilationUnit),
    Module(ModuleCompilationUnit),
}

impl CompilationUnit {
    /// Serialize the tree to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// `[package] import* typedecl*`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdinaryCompilationUnit {
    pub package: Option<Package>,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDeclaration>,
}

/// `[open] module name { directive* }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleCompilationUnit {
    pub name: Name,
    pub open: bool,
    pub imports: Vec<Import>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub members: Vec<Directive>,
}

/// A package declaration with its annotations and Javadoc
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: Name,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// A single import declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Import {
    pub name: Name,
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Whether the trailing `.*` was present
    pub wildcard: bool,
}

/// A module-level directive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Directive {
    Requires {
        name: Name,
        /// `transitive` and/or `static`
        modifiers: Vec<Modifier>,
        doc: Option<String>,
    },
    Exports {
        name: Name,
        to: Vec<Name>,
        doc: Option<String>,
    },
    Opens {
        name: Name,
        to: Vec<Name>,
        doc: Option<String>,
    },
    Uses {
        name: Name,
        doc: Option<String>,
    },
    Provides {
        name: Name,
        provides: Vec<Name>,
        doc: Option<String>,
    },
}

/// A top-level or nested type declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Annotation(AnnotationDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub name: Name,
    pub typeparams: Vec<TypeParameter>,
    pub superclass: Option<GenericType>,
    pub interfaces: Vec<GenericType>,
    pub members: Vec<Member>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDeclaration {
    pub name: Name,
    pub typeparams: Vec<TypeParameter>,
    /// `extends` list
    pub interfaces: Vec<GenericType>,
    pub members: Vec<Member>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDeclaration {
    pub name: Name,
    pub interfaces: Vec<GenericType>,
    /// The enum constants, before the first `;`
    pub fields: Vec<EnumField>,
    pub members: Vec<Member>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationDeclaration {
    pub name: Name,
    pub members: Vec<Member>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// A member of a class, interface, enum or annotation body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Member {
    Type(TypeDeclaration),
    Method(FunctionDeclaration),
    Constructor(ConstructorDeclaration),
    Field(FieldDeclaration),
    /// An annotation type element: `Type name() [default value];`
    Property(AnnotationProperty),
    Initializer(InitializerBlock),
}

/// A method declaration; `body` is `None` for abstract/native methods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: Name,
    pub return_type: Type,
    pub typeparams: Vec<TypeParameter>,
    pub params: Vec<Parameter>,
    pub throws: Vec<GenericType>,
    pub body: Option<Block>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorDeclaration {
    pub name: Name,
    pub typeparams: Vec<TypeParameter>,
    pub params: Vec<Parameter>,
    pub throws: Vec<GenericType>,
    pub body: Block,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// A field declaration; one type, one or more declarators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDeclaration {
    #[serde(rename = "type")]
    pub ty: Type,
    pub declarators: Vec<VariableDeclarator>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// A local variable declaration (also the variable of an enhanced `for`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    #[serde(rename = "type")]
    pub ty: Type,
    pub declarators: Vec<VariableDeclarator>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// One `name [dims] [= init]` of a field or variable declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    pub name: Name,
    pub init: Option<Expr>,
    /// Trailing per-declarator array dimensions (`int a[]`)
    pub dimensions: Vec<Dimension>,
}

/// An enum constant, optionally with constructor arguments and a body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumField {
    pub name: Name,
    pub args: Option<Vec<Expr>>,
    pub members: Option<Vec<Member>>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// An annotation type element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationProperty {
    #[serde(rename = "type")]
    pub ty: Type,
    pub name: Name,
    pub default: Option<Expr>,
    pub dimensions: Vec<Dimension>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
}

/// A static or instance initializer block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializerBlock {
    pub body: Block,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub doc: Option<String>,
}

/// A declared method or constructor parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Parameter {
    Formal(FormalParameter),
    /// An explicit receiver parameter (`Foo this` or `Foo Outer.this`)
    This(ThisParameter),
}

impl Parameter {
    pub fn is_variadic(&self) -> bool {
        matches!(self, Parameter::Formal(p) if p.variadic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormalParameter {
    #[serde(rename = "type")]
    pub ty: Type,
    pub name: Name,
    pub variadic: bool,
    pub dimensions: Vec<Dimension>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisParameter {
    #[serde(rename = "type")]
    pub ty: Type,
    /// The `Outer` of `Outer.this`
    pub qualifier: Option<Name>,
    pub annotations: Vec<Annotation>,
}
