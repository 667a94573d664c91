//! Primary expressions
//!
//! Literals, `this`/`super`, type literals, parenthesized expressions,
//! switch expressions, class and array creators, names and calls. The
//! name case speculatively tries a type first so `X[].class`, generic
//! `X<T>::y` and qualified `a.b.C::d` prefixes are recognised; plain
//! names fall back to member accesses and calls.

use crate::ast::{
    ArrayType, ClassCreator, DimensionExpression, Expr, GenericType, Literal, Primitive,
    PrimitiveType, Type, TypeArgument, VoidType,
};
use crate::error::ParseResult;
use crate::token::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.check_kind(Token::Number) {
            let text = self.token().text;
            self.next();
            return Ok(Expr::Literal(Literal::new(text)));
        }
        if self.check_kind(Token::Str) {
            return Ok(Expr::Literal(Literal::new(self.reencode_string_token()?)));
        }
        if self.check_kind(Token::CharLit) {
            return Ok(Expr::Literal(Literal::new(self.reencode_char_token()?)));
        }
        if self.accept("true") {
            return Ok(Expr::Literal(Literal::new("true")));
        }
        if self.accept("false") {
            return Ok(Expr::Literal(Literal::new("false")));
        }
        if self.accept("null") {
            return Ok(Expr::Null);
        }

        if self.check("this") {
            return self.parse_primary_this();
        }
        if self.check("super") {
            return self.parse_primary_super();
        }
        if self.check("switch") {
            return Ok(Expr::Switch(Box::new(self.parse_switch()?)));
        }

        if self.accept("void") {
            self.require2(".", "class")?;
            return Ok(Expr::TypeLiteral {
                ty: Type::Void(VoidType),
            });
        }
        if let Some(primitive) = Primitive::from_keyword(self.token().text) {
            self.next();
            let mut ty = Type::Primitive(PrimitiveType::new(primitive));
            if self.check("[") || self.check("@") {
                ty = Type::Array(ArrayType::new(ty, self.parse_dimensions()?));
            }
            self.require2(".", "class")?;
            return Ok(Expr::TypeLiteral { ty });
        }

        if self.check("(") {
            return self.parse_parens();
        }
        if self.check("[") || self.check("{") {
            // List and map literals are not Java.
            return Err(self.err("illegal start of expression"));
        }

        if self.check("<") {
            // Generic method call with explicit type arguments.
            let typeargs = self.parse_type_args()?;
            let name = self.parse_name()?;
            let args = self.parse_args()?;
            return Ok(Expr::FunctionCall {
                object: None,
                name,
                args,
                typeargs,
            });
        }

        if self.check("new") {
            return self.parse_creator(true);
        }

        if self.check_kind(Token::Name) {
            let speculated = self.speculate(|p| {
                let ty = p.parse_type()?;
                if p.accept2(".", "class") {
                    return Ok(Expr::TypeLiteral { ty });
                }
                // A type can only stand alone as the qualifier of a method
                // reference, and a type indistinguishable from a variable
                // name is left for the fallback below.
                let qualifies = match &ty {
                    Type::Primitive(_) => false,
                    Type::Generic(generic) => !generic.is_simple(),
                    _ => true,
                };
                if qualifies && p.check("::") {
                    Ok(Expr::TypeExpr(ty))
                } else {
                    Err(p.err("expected '.class' or '::' here"))
                }
            });
            if let Ok(expr) = speculated {
                return Ok(expr);
            }

            let name = self.parse_name()?;
            if self.check("(") {
                let args = self.parse_args()?;
                return Ok(Expr::FunctionCall {
                    object: None,
                    name,
                    args,
                    typeargs: Vec::new(),
                });
            }
            return Ok(Expr::MemberAccess { object: None, name });
        }

        if self.is_at_end() {
            return Err(self.err("reached end of file while parsing"));
        }
        Err(self.err("illegal start of expression"))
    }

    fn parse_parens(&mut self) -> ParseResult<Expr> {
        self.require("(")?;
        let expr = self.parse_expr()?;
        self.require(")")?;
        Ok(Expr::Parenthesis(Box::new(expr)))
    }

    fn parse_primary_this(&mut self) -> ParseResult<Expr> {
        self.require("this")?;
        if self.check("(") {
            let args = self.parse_args()?;
            self.expect_call_terminator()?;
            return Ok(Expr::ThisCall {
                object: None,
                args,
                typeargs: Vec::new(),
            });
        }
        Ok(Expr::This { object: None })
    }

    fn parse_primary_super(&mut self) -> ParseResult<Expr> {
        self.require("super")?;
        if self.check("(") {
            let args = self.parse_args()?;
            self.expect_call_terminator()?;
            return Ok(Expr::SuperCall {
                object: None,
                args,
                typeargs: Vec::new(),
            });
        }
        if !self.check(".") {
            return Err(self.err("'super' must be followed by a member-access expression"));
        }
        Ok(Expr::Super { object: None })
    }

    // ==================== Creators ====================

    /// Parse a `new` expression. `allow_array` is false after `expr.new`,
    /// where only a qualified class creator is grammatical.
    pub(crate) fn parse_creator(&mut self, allow_array: bool) -> ParseResult<Expr> {
        self.require("new")?;
        let typeargs = self.parse_type_args_opt()?;
        let annotations = self.parse_annotations()?;

        if typeargs.is_none() && allow_array {
            if let Some(primitive) = Primitive::from_keyword(self.token().text) {
                self.next();
                let mut ty = PrimitiveType::new(primitive);
                ty.annotations = annotations;
                return self.parse_array_creator_rest(Type::Primitive(ty));
            }
        }

        let mut ty = self.parse_generic_type()?;
        ty.annotations = annotations;
        if typeargs.is_none() && allow_array && (self.check("[") || self.check("@")) {
            return self.parse_array_creator_rest(Type::Generic(ty));
        }

        self.parse_class_creator_rest(ty, typeargs.unwrap_or_default())
    }

    fn parse_class_creator_rest(
        &mut self,
        ty: GenericType,
        typeargs: Vec<TypeArgument>,
    ) -> ParseResult<Expr> {
        let args = self.parse_args()?;
        let members = if self.check("{") {
            Some(self.parse_class_body(Self::parse_class_member)?)
        } else {
            None
        };
        Ok(Expr::ClassCreator(ClassCreator {
            ty,
            args,
            typeargs,
            members,
            object: None,
        }))
    }

    /// Array creator dimensions: the first `[…]` is either empty (an
    /// initializer must follow) or sized; sized pairs may continue until
    /// the first empty pair; all pairs after that must be empty.
    fn parse_array_creator_rest(&mut self, ty: Type) -> ParseResult<Expr> {
        let mut dimensions = Vec::new();
        let annotations = self.parse_annotations()?;
        self.require("[")?;

        if self.accept("]") {
            dimensions.push(DimensionExpression {
                annotations,
                size: None,
            });
            while self.check("[") || self.check("@") {
                let annotations = self.parse_annotations()?;
                self.require2("[", "]")?;
                dimensions.push(DimensionExpression {
                    annotations,
                    size: None,
                });
            }
            let initializer = self.parse_array_init()?;
            return Ok(Expr::ArrayCreator {
                ty,
                dimensions,
                initializer: Some(initializer),
            });
        }

        dimensions.push(DimensionExpression {
            annotations,
            size: Some(self.parse_expr()?),
        });
        self.require("]")?;

        while self.check("[") || self.check("@") {
            let annotations = self.parse_annotations()?;
            self.require("[")?;
            if self.accept("]") {
                dimensions.push(DimensionExpression {
                    annotations,
                    size: None,
                });
                break;
            }
            dimensions.push(DimensionExpression {
                annotations,
                size: Some(self.parse_expr()?),
            });
            self.require("]")?;
        }
        while self.check("[") || self.check("@") {
            let annotations = self.parse_annotations()?;
            self.require2("[", "]")?;
            dimensions.push(DimensionExpression {
                annotations,
                size: None,
            });
        }

        Ok(Expr::ArrayCreator {
            ty,
            dimensions,
            initializer: None,
        })
    }
}
