//! Expression parsing
//!
//! A ladder of recursive routines, one per precedence level (lowest
//! first): assignment, conditional, `||`, `&&`, `|`, `^`, `&`, equality,
//! comparison/`instanceof`, shift, additive, multiplicative, unary, cast,
//! postfix, primary.
//!
//! Two quirks live here:
//!
//! - `>>` and `>>>` are fused from adjacent `>` tokens (the lexer never
//!   produces multi-character shift tokens, see [`crate::token`]);
//! - casts and lambdas are disambiguated from parenthesized expressions
//!   by bounded speculation.

mod primary;

use crate::ast::{
    AssignOp, BinaryOp, Expr, IncrementOp, LambdaBody, LambdaParams, MethodRefTarget, Type,
    UnaryOp,
};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse an expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and the lowest level
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let result = self.parse_conditional()?;
        if let Some(op) = AssignOp::from_str(self.token().text) {
            self.next();
            let rhs = self.parse_assignment()?;
            return Ok(Expr::Assignment {
                op,
                lhs: Box::new(result),
                rhs: Box::new(rhs),
            });
        }
        Ok(result)
    }

    /// Ternary conditional; also the entry point for lambdas, which are
    /// tried speculatively when the tokens could begin one
    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let looks_like_lambda =
            (self.check_kind(Token::Name) && self.check_at(1, "->")) || self.check("(");
        let mut result = if looks_like_lambda {
            match self.speculate(|p| p.parse_lambda()) {
                Ok(lambda) => lambda,
                Err(_) => self.parse_logic_or()?,
            }
        } else {
            self.parse_logic_or()?
        };

        if self.accept("?") {
            let truepart = self.parse_assignment()?;
            self.require(":")?;
            let falsepart = self.parse_conditional()?;
            result = Expr::Conditional {
                condition: Box::new(result),
                truepart: Box::new(truepart),
                falsepart: Box::new(falsepart),
            };
        }
        Ok(result)
    }

    /// Left-fold a run of binary operators over the next-higher level
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> ParseResult<Expr>,
        ops: &[(&str, BinaryOp)],
    ) -> ParseResult<Expr> {
        let mut result = next(self)?;
        'fold: loop {
            for (text, op) in ops {
                if self.accept(text) {
                    let rhs = next(self)?;
                    result = Expr::Binary {
                        op: *op,
                        lhs: Box::new(result),
                        rhs: Box::new(rhs),
                    };
                    continue 'fold;
                }
            }
            return Ok(result);
        }
    }

    fn parse_logic_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_logic_and, &[("||", BinaryOp::Or)])
    }

    fn parse_logic_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bitwise_or, &[("&&", BinaryOp::And)])
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bitwise_xor, &[("|", BinaryOp::BitOr)])
    }

    fn parse_bitwise_xor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bitwise_and, &[("^", BinaryOp::BitXor)])
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_equality, &[("&", BinaryOp::BitAnd)])
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_comparison,
            &[("==", BinaryOp::Eq), ("!=", BinaryOp::Ne)],
        )
    }

    /// Comparison operators and `instanceof` share a level
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_shift()?;
        loop {
            let op = match self.token().text {
                "<=" => Some(BinaryOp::Le),
                ">=" => Some(BinaryOp::Ge),
                "<" => Some(BinaryOp::Lt),
                ">" => Some(BinaryOp::Gt),
                _ => None,
            };
            if let Some(op) = op {
                self.next();
                let rhs = self.parse_shift()?;
                result = Expr::Binary {
                    op,
                    lhs: Box::new(result),
                    rhs: Box::new(rhs),
                };
            } else if self.accept("instanceof") {
                let annotations = self.parse_annotations()?;
                let ty = self.parse_generic_type_or_array(annotations)?;
                result = Expr::TypeTest {
                    expr: Box::new(result),
                    ty,
                };
            } else {
                return Ok(result);
            }
        }
    }

    /// Shift operators. `<<` is a real token; `>>` and `>>>` are
    /// recognised as two or three adjacent `>` tokens whose spans abut,
    /// so that `Map<K, List<V>>` still closes one angle bracket at a
    /// time.
    fn parse_shift(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_additive()?;
        loop {
            if self.accept("<<") {
                let rhs = self.parse_additive()?;
                result = Expr::Binary {
                    op: BinaryOp::Shl,
                    lhs: Box::new(result),
                    rhs: Box::new(rhs),
                };
                continue;
            }

            if self.check(">") {
                let first = *self.tokens.look(0);
                let second = *self.tokens.look(1);
                if second.text == ">" && first.span.abuts(&second.span) {
                    let third = *self.tokens.look(2);
                    let op = if third.text == ">" && second.span.abuts(&third.span) {
                        self.next();
                        self.next();
                        self.next();
                        BinaryOp::Ushr
                    } else {
                        self.next();
                        self.next();
                        BinaryOp::Shr
                    };
                    let rhs = self.parse_additive()?;
                    result = Expr::Binary {
                        op,
                        lhs: Box::new(result),
                        rhs: Box::new(rhs),
                    };
                    continue;
                }
            }

            return Ok(result);
        }
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_multiplicative,
            &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)],
        )
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_unary,
            &[
                ("*", BinaryOp::Mul),
                ("/", BinaryOp::Div),
                ("%", BinaryOp::Rem),
            ],
        )
    }

    // ==================== Unary and Cast ====================

    pub(crate) fn parse_unary(&mut self) -> ParseResult<Expr> {
        if let Some(op) = UnaryOp::from_str(self.token().text) {
            self.next();
            return Ok(Expr::Unary {
                op,
                expr: Box::new(self.parse_unary()?),
            });
        }
        if let Some(op) = IncrementOp::from_str(self.token().text) {
            self.next();
            return Ok(Expr::Increment {
                op,
                prefix: true,
                expr: Box::new(self.parse_postfix()?),
            });
        }
        self.parse_cast()
    }

    /// Casts vs. parenthesized expressions.
    ///
    /// On `(`, speculatively parse `Type )`. If that succeeds the
    /// construct is a cast when the type is a primitive or an array
    /// (always), or when the next token can begin a unary operand that is
    /// not `+`/`-` (so `(x) - y` stays a subtraction). Otherwise the
    /// speculation is rolled back and the parenthesis is an expression.
    fn parse_cast(&mut self) -> ParseResult<Expr> {
        if self.check("(") {
            if let Some(cast) = self.try_parse_cast()? {
                return Ok(cast);
            }
        }
        self.parse_postfix_with_increment()
    }

    fn try_parse_cast(&mut self) -> ParseResult<Option<Expr>> {
        self.tokens.push_marker();
        let prefix = (|parser: &mut Self| {
            parser.next();
            let ty = parser.parse_cast_type()?;
            parser.require(")")?;
            Ok::<Type, crate::error::SyntaxError>(ty)
        })(self);

        let ty = match prefix {
            Ok(ty) => ty,
            Err(_) => {
                self.tokens.pop_marker(true);
                return Ok(None);
            }
        };

        let always_cast = matches!(ty, Type::Primitive(_) | Type::Array(_));
        if !always_cast && !self.cast_operand_ahead() {
            self.tokens.pop_marker(true);
            return Ok(None);
        }
        self.tokens.pop_marker(false);

        let expr = if always_cast {
            self.parse_unary()?
        } else {
            self.parse_cast_operand()?
        };
        Ok(Some(Expr::Cast {
            ty,
            expr: Box::new(expr),
        }))
    }

    /// Whether the current token can begin the operand of a
    /// reference-type cast (a unary expression that is not `+`/`-`)
    fn cast_operand_ahead(&self) -> bool {
        match self.token().token {
            Token::Name | Token::Number | Token::Str | Token::CharLit => true,
            _ => matches!(
                self.token().text,
                "(" | "!" | "~" | "++" | "--" | "this" | "super" | "new" | "switch" | "true"
                    | "false" | "null"
            ),
        }
    }

    fn parse_cast_operand(&mut self) -> ParseResult<Expr> {
        if self.check("(") || (self.check_kind(Token::Name) && self.check_at(1, "->")) {
            if let Ok(lambda) = self.speculate(|p| p.parse_lambda()) {
                return Ok(lambda);
            }
            return self.parse_postfix_with_increment();
        }
        if matches!(self.token().text, "!" | "~" | "++" | "--") {
            return self.parse_unary();
        }
        self.parse_postfix_with_increment()
    }

    // ==================== Postfix ====================

    fn parse_postfix_with_increment(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_postfix()?;
        if let Some(op) = IncrementOp::from_str(self.token().text) {
            self.next();
            result = Expr::Increment {
                op,
                prefix: false,
                expr: Box::new(result),
            };
        }
        Ok(result)
    }

    pub(crate) fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_primary()?;
        loop {
            if self.check(".") {
                result = self.parse_dot_expr(result)?;
            } else if self.accept("[") {
                let index = self.parse_expr()?;
                self.require("]")?;
                result = Expr::Index {
                    indexed: Box::new(result),
                    index: Box::new(index),
                };
            } else if self.check("::") {
                result = self.parse_ref_expr(result)?;
            } else {
                return Ok(result);
            }
        }
    }

    /// Everything that can follow a `.`: qualified creators, `this`,
    /// `super`, member access, calls, and calls with explicit type
    /// arguments
    fn parse_dot_expr(&mut self, object: Expr) -> ParseResult<Expr> {
        self.require(".")?;

        if self.check("new") {
            // `outer.new Inner(…)`: parse the creator, then patch in the
            // enclosing instance.
            let creator = self.parse_creator(false)?;
            return Ok(match creator {
                Expr::ClassCreator(mut creator) => {
                    creator.object = Some(Box::new(object));
                    Expr::ClassCreator(creator)
                }
                other => other,
            });
        }

        if self.accept("this") {
            if self.check("(") {
                let args = self.parse_args()?;
                self.expect_call_terminator()?;
                return Ok(Expr::ThisCall {
                    object: Some(Box::new(object)),
                    args,
                    typeargs: Vec::new(),
                });
            }
            return Ok(Expr::This {
                object: Some(Box::new(object)),
            });
        }

        if self.accept("super") {
            if self.check("(") {
                let args = self.parse_args()?;
                self.expect_call_terminator()?;
                return Ok(Expr::SuperCall {
                    object: Some(Box::new(object)),
                    args,
                    typeargs: Vec::new(),
                });
            }
            return Ok(Expr::Super {
                object: Some(Box::new(object)),
            });
        }

        if self.check_kind(Token::Name) {
            let name = self.parse_name()?;
            if self.check("(") {
                let args = self.parse_args()?;
                return Ok(Expr::FunctionCall {
                    object: Some(Box::new(object)),
                    name,
                    args,
                    typeargs: Vec::new(),
                });
            }
            return Ok(Expr::MemberAccess {
                object: Some(Box::new(object)),
                name,
            });
        }

        if self.check("<") {
            let typeargs = self.parse_type_args()?;
            if self.accept("this") {
                let args = self.parse_args()?;
                self.expect_call_terminator()?;
                return Ok(Expr::ThisCall {
                    object: Some(Box::new(object)),
                    args,
                    typeargs,
                });
            }
            if self.accept("super") {
                let args = self.parse_args()?;
                self.expect_call_terminator()?;
                return Ok(Expr::SuperCall {
                    object: Some(Box::new(object)),
                    args,
                    typeargs,
                });
            }
            let name = self.parse_name()?;
            let args = self.parse_args()?;
            return Ok(Expr::FunctionCall {
                object: Some(Box::new(object)),
                name,
                args,
                typeargs,
            });
        }

        Err(self.err("expected NAME, 'this', 'super', 'new', or '<' here"))
    }

    fn parse_ref_expr(&mut self, object: Expr) -> ParseResult<Expr> {
        self.require("::")?;
        let name = if self.accept("new") {
            MethodRefTarget::New
        } else {
            MethodRefTarget::Name(self.parse_name()?)
        };
        Ok(Expr::MethodReference {
            name,
            object: Box::new(object),
        })
    }

    /// Constructor delegations `this(…)`/`super(…)` must stand alone as
    /// statements: peek for the `;` without consuming it
    pub(crate) fn expect_call_terminator(&mut self) -> ParseResult<()> {
        if self.check(";") {
            Ok(())
        } else {
            Err(self.err_expected("';'"))
        }
    }

    pub(crate) fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.require("(")?;
        let mut args = Vec::new();
        if !self.check(")") {
            args.push(self.parse_expr()?);
            while self.accept(",") {
                args.push(self.parse_expr()?);
            }
        }
        self.require(")")?;
        Ok(args)
    }

    // ==================== Lambda ====================

    /// Parse a lambda. Callers reach this speculatively; any mismatch
    /// rolls the cursor back to before the would-be parameter list.
    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let params = if self.check_kind(Token::Name) {
            LambdaParams::Inferred(vec![self.parse_name()?])
        } else if self.check("(")
            && self.check_kind_at(1, Token::Name)
            && (self.check_at(2, ")") || self.check_at(2, ","))
        {
            self.next();
            let mut names = vec![self.parse_name()?];
            while self.accept(",") {
                names.push(self.parse_name()?);
            }
            self.require(")")?;
            LambdaParams::Inferred(names)
        } else {
            LambdaParams::Declared(self.parse_parameters(false)?)
        };

        self.require("->")?;

        let body = if self.check("{") {
            LambdaBody::Block(self.parse_block()?)
        } else {
            LambdaBody::Expr(Box::new(self.parse_expr()?))
        };

        Ok(Expr::Lambda { params, body })
    }
}
