//! Expression nodes

use serde::Serialize;

use super::{Annotation, GenericType, Member, Name, Switch, Type, TypeArgument};
use crate::ast::stmt::Block;

/// Any expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Numeric, boolean, string or character literal, stored as valid
    /// Java source text
    Literal(Literal),
    /// The `null` literal
    Null,
    /// `Foo.class`, `int[].class`, `void.class`
    TypeLiteral {
        #[serde(rename = "type")]
        ty: Type,
    },
    /// `this`, or qualified `Outer.this`
    This { object: Option<Box<Expr>> },
    /// `super` as a member-access qualifier
    Super { object: Option<Box<Expr>> },
    /// Field access, or a bare name when `object` is `None`
    MemberAccess {
        object: Option<Box<Expr>>,
        name: Name,
    },
    /// Method call, optionally qualified and with explicit type arguments
    FunctionCall {
        object: Option<Box<Expr>>,
        name: Name,
        args: Vec<Expr>,
        typeargs: Vec<TypeArgument>,
    },
    /// Alternate constructor invocation `this(…)`
    ThisCall {
        object: Option<Box<Expr>>,
        args: Vec<Expr>,
        typeargs: Vec<TypeArgument>,
    },
    /// Superclass constructor invocation `super(…)`
    SuperCall {
        object: Option<Box<Expr>>,
        args: Vec<Expr>,
        typeargs: Vec<TypeArgument>,
    },
    /// Array subscript
    Index {
        indexed: Box<Expr>,
        index: Box<Expr>,
    },
    /// `obj::name` or `Type::new`
    MethodReference {
        name: MethodRefTarget,
        object: Box<Expr>,
    },
    /// `(Type) expr`
    Cast {
        #[serde(rename = "type")]
        ty: Type,
        expr: Box<Expr>,
    },
    /// Prefix `+ - ~ !`
    Unary { op: UnaryOp, expr: Box<Expr> },
    /// `++`/`--`, prefix or postfix
    Increment {
        op: IncrementOp,
        prefix: bool,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Ternary `c ? a : b`
    Conditional {
        condition: Box<Expr>,
        truepart: Box<Expr>,
        falsepart: Box<Expr>,
    },
    Assignment {
        op: AssignOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Lambda {
        params: LambdaParams,
        body: LambdaBody,
    },
    /// `new Foo(…)`, possibly with an anonymous class body or an
    /// enclosing-instance qualifier (`outer.new Inner()`)
    ClassCreator(ClassCreator),
    /// `new Foo[…]…` with per-dimension sizes or an initializer
    ArrayCreator {
        #[serde(rename = "type")]
        ty: Type,
        dimensions: Vec<DimensionExpression>,
        initializer: Option<ArrayInitializer>,
    },
    /// `expr instanceof Type`
    TypeTest {
        expr: Box<Expr>,
        #[serde(rename = "type")]
        ty: Type,
    },
    /// Parenthesized expression
    Parenthesis(Box<Expr>),
    /// `{ a, b, c }` in a variable initializer or annotation value
    ArrayInit(ArrayInitializer),
    /// An annotation used as an annotation value
    Annotation(Box<Annotation>),
    /// A type used as the qualifier of a method reference
    /// (`List<String>::new`)
    TypeExpr(Type),
    /// A `switch` used as an expression; same node as the statement form
    Switch(Box<Switch>),
}

/// A literal, stored as re-encoded Java source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub value: String,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// The member side of a method reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MethodRefTarget {
    /// `Type::new`
    New,
    Name(Name),
}

/// One `[…]` of an array creator: empty or holding a size expression
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DimensionExpression {
    pub annotations: Vec<Annotation>,
    pub size: Option<Expr>,
}

/// A brace-enclosed list of initializers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayInitializer {
    pub values: Vec<Expr>,
}

/// `new Type(args)` with optional anonymous body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCreator {
    #[serde(rename = "type")]
    pub ty: GenericType,
    pub args: Vec<Expr>,
    pub typeargs: Vec<TypeArgument>,
    pub members: Option<Vec<Member>>,
    /// Enclosing instance for `outer.new Inner()`; patched in after the
    /// creator itself is parsed
    pub object: Option<Box<Expr>>,
}

/// Lambda parameter list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LambdaParams {
    /// `x -> …` or `(x, y) -> …`
    Inferred(Vec<Name>),
    /// `(int x, int y) -> …`, or the empty list `() -> …`
    Declared(Vec<super::Parameter>),
}

/// Lambda body: a single expression or a block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

/// Prefix unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn from_str(op: &str) -> Option<Self> {
        Some(match op {
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Minus,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// `++` or `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncrementOp {
    Increment,
    Decrement,
}

impl IncrementOp {
    pub fn from_str(op: &str) -> Option<Self> {
        Some(match op {
            "++" => IncrementOp::Increment,
            "--" => IncrementOp::Decrement,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementOp::Increment => "++",
            IncrementOp::Decrement => "--",
        }
    }
}

/// Binary operators, shift operators included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Ushr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Ushr,
}

impl AssignOp {
    pub fn from_str(op: &str) -> Option<Self> {
        Some(match op {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::Add,
            "-=" => AssignOp::Sub,
            "*=" => AssignOp::Mul,
            "/=" => AssignOp::Div,
            "%=" => AssignOp::Rem,
            "&=" => AssignOp::BitAnd,
            "|=" => AssignOp::BitOr,
            "^=" => AssignOp::BitXor,
            "<<=" => AssignOp::Shl,
            ">>=" => AssignOp::Shr,
            ">>>=" => AssignOp::Ushr,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::Ushr => ">>>=",
        }
    }
}
