//! Statement parsing
//!
//! Block statements carry two of the speculation sites: a statement
//! starting with a name or primitive keyword is first tried as a local
//! variable declaration and reparsed as an expression statement if that
//! fails, and a `for (` header is first tried as an enhanced-for control.

use crate::ast::{
    ArrayInitializer, Block, CatchClause, CatchVar, Expr, ForControl, ForInit, Primitive, Stmt,
    Switch, SwitchCase, TryResource, TryResourceVar, TryStatement, Type, VariableDeclaration,
    VariableDeclarator,
};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

/// Tokens that may follow `NAME :` to form a labeled statement
const LABELED_STMT_STARTS: [&str; 8] = ["{", "if", "while", "for", "do", "switch", "synchronized", "try"];

impl<'a> Parser<'a> {
    // ==================== Statements ====================

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.check("{") {
            Ok(Stmt::Block(self.parse_block()?))
        } else if self.check("if") {
            self.parse_if()
        } else if self.check("for") {
            self.parse_for()
        } else if self.check("while") {
            self.parse_while()
        } else if self.check("do") {
            self.parse_do()
        } else if self.check("try") {
            self.parse_try()
        } else if self.check("break") {
            self.parse_break()
        } else if self.check("continue") {
            self.parse_continue()
        } else if self.check("yield") {
            self.parse_yield()
        } else if self.check("throw") {
            self.parse_throw()
        } else if self.check("return") {
            self.parse_return()
        } else if self.check("switch") {
            Ok(Stmt::Switch(self.parse_switch()?))
        } else if self.check("synchronized") {
            self.parse_synchronized()
        } else if self.check("assert") {
            self.parse_assert()
        } else if self.check(";") {
            self.next();
            Ok(Stmt::Empty)
        } else if self.check("else") {
            Err(self.err("'else' without 'if'"))
        } else if self.check("case") || self.check("default") {
            Err(self.err(format!("'{}' outside 'switch'", self.token().text)))
        } else {
            self.parse_expr_statement()
        }
    }

    fn parse_expr_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expr()?;
        self.require(";")?;
        Ok(Stmt::Expr(expr))
    }

    /// Parse a statement in block position, where labels, local classes
    /// and local variable declarations are also allowed
    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<Stmt> {
        if self.check_kind(Token::Name)
            && self.check_at(1, ":")
            && LABELED_STMT_STARTS
                .iter()
                .any(|start| self.check_at(2, start))
        {
            let label = self.parse_name()?;
            self.next();
            return Ok(Stmt::Labeled {
                label,
                stmt: Box::new(self.parse_statement()?),
            });
        }

        if self.check("final") || (self.check("@") && !self.check_at(1, "interface")) {
            return self.parse_class_or_variable_decl();
        }
        if self.check("class") || self.check("abstract") {
            return Ok(Stmt::LocalClass(self.parse_class_declaration()?));
        }

        if self.check_kind(Token::Name) || Primitive::from_keyword(self.token().text).is_some() {
            return match self.speculate(|p| p.parse_variable_decl()) {
                Ok(decl) => Ok(Stmt::LocalVar(decl)),
                Err(first) => match self.parse_statement() {
                    Ok(stmt) => Ok(stmt),
                    Err(second) => Err(second.with_cause(first)),
                },
            };
        }

        self.parse_statement()
    }

    fn parse_class_or_variable_decl(&mut self) -> ParseResult<Stmt> {
        let doc = self.doc();
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        if self.check("class") {
            Ok(Stmt::LocalClass(self.parse_class_declaration_with(
                doc, modifiers, annotations,
            )?))
        } else {
            Ok(Stmt::LocalVar(self.parse_variable_decl_with(
                doc, modifiers, annotations,
            )?))
        }
    }

    pub(crate) fn parse_variable_decl(&mut self) -> ParseResult<VariableDeclaration> {
        let doc = self.doc();
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        self.parse_variable_decl_with(doc, modifiers, annotations)
    }

    fn parse_variable_decl_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<crate::ast::Modifier>,
        annotations: Vec<crate::ast::Annotation>,
    ) -> ParseResult<VariableDeclaration> {
        let ty = if self.accept("var") {
            Type::var()
        } else {
            self.parse_type()?
        };
        let array = matches!(ty, Type::Array(_));
        let mut declarators = vec![self.parse_declarator(false, array)?];
        while self.accept(",") {
            declarators.push(self.parse_declarator(false, array)?);
        }
        self.require(";")?;
        Ok(VariableDeclaration {
            ty,
            declarators,
            modifiers,
            annotations,
            doc,
        })
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.require("{")?;
        let mut stmts = Vec::new();
        while !self.check("}") && !self.is_at_end() {
            stmts.push(self.parse_block_statement()?);
        }
        self.require("}")?;
        Ok(Block::new(stmts))
    }

    /// Parse a parenthesized condition
    fn parse_condition(&mut self) -> ParseResult<Expr> {
        self.require("(")?;
        let expr = self.parse_expr()?;
        self.require(")")?;
        Ok(expr)
    }

    // ==================== Control Flow ====================

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.require("if")?;
        let condition = self.parse_condition()?;
        let body = Box::new(self.parse_statement()?);
        let elsebody = if self.accept("else") {
            Some(Box::new(if self.check("if") {
                self.parse_if()?
            } else {
                self.parse_statement()?
            }))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            body,
            elsebody,
        })
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        self.require("for")?;
        let control = self.parse_for_control()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For { control, body })
    }

    fn parse_for_control(&mut self) -> ParseResult<ForControl> {
        self.require("(")?;

        if let Ok(control) = self.speculate(|p| p.parse_enhanced_for_control()) {
            return Ok(control);
        }

        let init = if self.accept(";") {
            None
        } else {
            match self.speculate(|p| p.parse_variable_decl()) {
                Ok(decl) => Some(ForInit::Var(decl)),
                Err(_) => {
                    let expr = self.parse_expr()?;
                    self.require(";")?;
                    Some(ForInit::Expr(expr))
                }
            }
        };

        let condition = if self.accept(";") {
            None
        } else {
            let expr = self.parse_expr()?;
            self.require(";")?;
            Some(expr)
        };

        let update = if self.check(")") {
            Vec::new()
        } else {
            let mut update = vec![self.parse_expr()?];
            while self.accept(",") {
                update.push(self.parse_expr()?);
            }
            update
        };

        self.require(")")?;

        Ok(ForControl::Classic {
            init,
            condition,
            update,
        })
    }

    fn parse_enhanced_for_control(&mut self) -> ParseResult<ForControl> {
        let var = self.parse_enhanced_for_var()?;
        self.require(":")?;
        let iterable = self.parse_expr()?;
        self.require(")")?;
        Ok(ForControl::Enhanced { var, iterable })
    }

    fn parse_enhanced_for_var(&mut self) -> ParseResult<VariableDeclaration> {
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        let ty = if self.accept("var") {
            Type::var()
        } else {
            self.parse_type_with(Vec::new())?
        };
        let name = self.parse_name()?;
        let dimensions = self.parse_dimensions_opt()?;
        Ok(VariableDeclaration {
            ty,
            declarators: vec![VariableDeclarator {
                name,
                init: None,
                dimensions,
            }],
            modifiers,
            annotations,
            doc: None,
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.require("while")?;
        let condition = self.parse_condition()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn parse_do(&mut self) -> ParseResult<Stmt> {
        self.require("do")?;
        let body = Box::new(self.parse_statement()?);
        self.require("while")?;
        let condition = self.parse_condition()?;
        self.require(";")?;
        Ok(Stmt::DoWhile { condition, body })
    }

    fn parse_synchronized(&mut self) -> ParseResult<Stmt> {
        self.require("synchronized")?;
        let lock = self.parse_condition()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::Synchronized { lock, body })
    }

    // ==================== Try ====================

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        self.require("try")?;
        let resources = if self.accept("(") {
            let mut resources = vec![self.parse_try_resource()?];
            while self.accept(";") {
                if self.check(")") {
                    break;
                }
                resources.push(self.parse_try_resource()?);
            }
            self.require(")")?;
            Some(resources)
        } else {
            None
        };

        let body = self.parse_block()?;

        let mut catches = Vec::new();
        while self.check("catch") {
            catches.push(self.parse_catch()?);
        }

        let finallybody = if self.accept("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };

        if resources.is_none() && catches.is_empty() && finallybody.is_none() {
            return Err(self.err("expected 'catch' or 'finally' here"));
        }

        Ok(Stmt::Try(TryStatement {
            resources,
            catches,
            body,
            finallybody,
        }))
    }

    fn parse_catch(&mut self) -> ParseResult<CatchClause> {
        self.require("catch")?;
        self.require("(")?;
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        let ty = self.parse_type_intersection()?;
        let name = self.parse_name()?;
        self.require(")")?;
        let body = self.parse_block()?;
        Ok(CatchClause {
            var: CatchVar {
                ty,
                name,
                modifiers,
                annotations,
            },
            body,
        })
    }

    fn parse_try_resource(&mut self) -> ParseResult<TryResource> {
        let declared = self.speculate(|p| {
            let (modifiers, annotations) = p.parse_mods_and_annotations()?;
            let ty = if p.accept("var") {
                Type::var()
            } else {
                Type::Generic(p.parse_generic_type()?)
            };
            let name = p.parse_name()?;
            p.require("=")?;
            let init = p.parse_expr()?;
            Ok(TryResourceVar {
                ty,
                name,
                init,
                modifiers,
                annotations,
            })
        });
        match declared {
            Ok(var) => Ok(TryResource::Var(var)),
            Err(_) => Ok(TryResource::Expr(self.parse_expr()?)),
        }
    }

    // ==================== Switch ====================

    /// Parse a `switch`; the same node serves statement and expression
    /// uses
    pub(crate) fn parse_switch(&mut self) -> ParseResult<Switch> {
        self.require("switch")?;
        let condition = self.parse_condition()?;
        self.require("{")?;
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.check("}") && !self.is_at_end() {
            let case = self.parse_case()?;
            if case.labels.is_none() {
                if seen_default {
                    return Err(self.err("duplicate 'default' label"));
                }
                seen_default = true;
            }
            cases.push(case);
        }
        self.require("}")?;
        Ok(Switch { condition, cases })
    }

    fn parse_case(&mut self) -> ParseResult<SwitchCase> {
        let labels = if self.accept("default") {
            None
        } else {
            self.require("case")?;
            let mut labels = vec![self.parse_case_label()?];
            while self.accept(",") {
                labels.push(self.parse_case_label()?);
            }
            Some(labels)
        };

        if self.accept("->") {
            let stmts = vec![if self.check("throw") {
                self.parse_throw()?
            } else if self.check("{") {
                Stmt::Block(self.parse_block()?)
            } else {
                self.parse_expr_statement()?
            }];
            Ok(SwitchCase {
                labels,
                stmts,
                arrow: true,
            })
        } else {
            self.require(":")?;
            let mut stmts = Vec::new();
            while !self.check("case")
                && !self.check("default")
                && !self.check("}")
                && !self.is_at_end()
            {
                stmts.push(self.parse_block_statement()?);
            }
            Ok(SwitchCase {
                labels,
                stmts,
                arrow: false,
            })
        }
    }

    /// A case label. A plain name (or parenthesized name) is parsed as a
    /// primary so that `case FOO ->` does not read `FOO ->` as a lambda.
    fn parse_case_label(&mut self) -> ParseResult<Expr> {
        let name_label = self.check_kind(Token::Name)
            && (self.check_at(1, "->") || self.check_at(1, ":"));
        let paren_name_label = self.check("(")
            && self.check_kind_at(1, Token::Name)
            && self.check_at(2, ")")
            && (self.check_at(3, "->") || self.check_at(3, ":"));
        if name_label || paren_name_label {
            self.parse_primary()
        } else {
            self.parse_expr()
        }
    }

    // ==================== Jumps ====================

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        self.require("return")?;
        if self.accept(";") {
            Ok(Stmt::Return(None))
        } else {
            let expr = self.parse_expr()?;
            self.require(";")?;
            Ok(Stmt::Return(Some(expr)))
        }
    }

    pub(crate) fn parse_throw(&mut self) -> ParseResult<Stmt> {
        self.require("throw")?;
        let expr = self.parse_expr()?;
        self.require(";")?;
        Ok(Stmt::Throw(expr))
    }

    fn parse_break(&mut self) -> ParseResult<Stmt> {
        self.require("break")?;
        if self.accept(";") {
            Ok(Stmt::Break(None))
        } else {
            let label = self.parse_name()?;
            self.require(";")?;
            Ok(Stmt::Break(Some(label)))
        }
    }

    fn parse_continue(&mut self) -> ParseResult<Stmt> {
        self.require("continue")?;
        if self.accept(";") {
            Ok(Stmt::Continue(None))
        } else {
            let label = self.parse_name()?;
            self.require(";")?;
            Ok(Stmt::Continue(Some(label)))
        }
    }

    fn parse_yield(&mut self) -> ParseResult<Stmt> {
        self.require("yield")?;
        let expr = self.parse_expr()?;
        self.require(";")?;
        Ok(Stmt::Yield(expr))
    }

    fn parse_assert(&mut self) -> ParseResult<Stmt> {
        self.require("assert")?;
        let condition = self.parse_expr()?;
        let message = if self.accept(":") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.require(";")?;
        Ok(Stmt::Assert { condition, message })
    }

    // ==================== Initializers ====================

    /// A declarator initializer: a brace initializer when the declared
    /// type is an array, otherwise an expression
    pub(crate) fn parse_initializer(&mut self, array: bool) -> ParseResult<Expr> {
        if array && self.check("{") {
            Ok(Expr::ArrayInit(self.parse_array_init()?))
        } else {
            self.parse_expr()
        }
    }

    pub(crate) fn parse_array_init(&mut self) -> ParseResult<ArrayInitializer> {
        self.require("{")?;
        let mut values = Vec::new();
        if !self.check("}") && !self.accept(",") {
            values.push(self.parse_initializer(true)?);
            while self.accept(",") {
                if self.check("}") {
                    break;
                }
                values.push(self.parse_initializer(true)?);
            }
        }
        self.require("}")?;
        Ok(ArrayInitializer { values })
    }
}
