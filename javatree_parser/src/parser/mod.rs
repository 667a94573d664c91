//! Recursive descent parser for Java
//!
//! Consumes the filtered token stream through a [`TokenCursor`] and
//! builds the typed AST bottom-up. Grammar routines are grouped by area:
//!
//! - this module: token plumbing, compilation units, imports, modules
//! - `declarations`: type declarations and class members
//! - `statements`: statements and blocks
//! - `types`: type references, type parameters and annotations
//! - `expressions`: the precedence ladder and primaries
//! - `literals`: string/char literal re-encoding
//!
//! Java has a handful of genuinely ambiguous constructs (lambda vs.
//! parenthesized expression, cast vs. parenthesized expression, local
//! variable declaration vs. expression statement, enhanced vs. classic
//! `for`, typed vs. expression try-resources, type prefix vs. plain name).
//! Each is resolved by bounded speculation: save the cursor, try one
//! alternative, and roll back on its `SyntaxError`. Unrelated errors are
//! never swallowed; when both alternatives fail, the later error is
//! reported with the earlier as its cause.

mod declarations;
mod expressions;
mod literals;
mod statements;
mod types;

use crate::ast::{CompilationUnit, Directive, Import, Modifier, ModuleCompilationUnit, Name, OrdinaryCompilationUnit, Package};
use crate::cursor::TokenCursor;
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::{tokenize, SpannedToken};
use crate::span::SourceMap;
use crate::token::Token;

/// Java parser
///
/// Owns its cursor and speculation stack exclusively; strictly
/// single-threaded and synchronous. Construct one per input and discard
/// it afterwards.
#[derive(Debug)]
pub struct Parser<'a> {
    /// Source code
    pub(crate) source: &'a str,
    /// Name of the file being parsed, for diagnostics
    pub(crate) filename: String,
    /// Token cursor with look-ahead and speculation markers
    pub(crate) tokens: TokenCursor<'a>,
    /// Source map for line/column calculation
    pub(crate) source_map: SourceMap,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given source code. Tokenizes eagerly; the
    /// first lexical error aborts.
    pub fn new(source: &'a str, filename: impl Into<String>) -> ParseResult<Self> {
        let filename = filename.into();
        let tokens = TokenCursor::new(tokenize(source, &filename)?);
        Ok(Self {
            source,
            filename,
            tokens,
            source_map: SourceMap::new(source),
        })
    }

    // ==================== Token Management ====================

    /// The current token
    pub(crate) fn token(&self) -> &SpannedToken<'a> {
        self.tokens.current()
    }

    /// Consume the current token
    pub(crate) fn next(&mut self) {
        self.tokens.advance();
    }

    /// Whether the current token's text matches
    pub(crate) fn check(&self, text: &str) -> bool {
        self.token().text == text
    }

    /// Whether the token `k` ahead has the given text
    pub(crate) fn check_at(&self, k: usize, text: &str) -> bool {
        self.tokens.look(k).text == text
    }

    /// Whether the current token has the given kind
    pub(crate) fn check_kind(&self, kind: Token) -> bool {
        self.token().token == kind
    }

    /// Whether the token `k` ahead has the given kind
    pub(crate) fn check_kind_at(&self, k: usize, kind: Token) -> bool {
        self.tokens.look(k).token == kind
    }

    /// Consume the current token if its text matches
    pub(crate) fn accept(&mut self, text: &str) -> bool {
        if self.check(text) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consume two tokens if both texts match, atomically
    pub(crate) fn accept2(&mut self, first: &str, second: &str) -> bool {
        if self.check(first) && self.check_at(1, second) {
            self.next();
            self.next();
            true
        } else {
            false
        }
    }

    /// Consume a token with the given text or fail
    pub(crate) fn require(&mut self, text: &str) -> ParseResult<()> {
        if self.accept(text) {
            Ok(())
        } else {
            Err(self.err_expected(&format!("'{}'", text)))
        }
    }

    /// Consume two tokens with the given texts or fail
    pub(crate) fn require2(&mut self, first: &str, second: &str) -> ParseResult<()> {
        self.require(first)?;
        self.require(second)
    }

    /// Consume a token of the given kind or fail, returning its text
    pub(crate) fn require_kind(&mut self, kind: Token) -> ParseResult<&'a str> {
        if self.check_kind(kind) {
            let text = self.token().text;
            self.next();
            Ok(text)
        } else {
            Err(self.err_expected(kind.kind_name()))
        }
    }

    /// Whether the cursor is at the end marker
    pub(crate) fn is_at_end(&self) -> bool {
        self.tokens.is_at_end()
    }

    /// Javadoc comment immediately behind the cursor, if any.
    ///
    /// A comment is Javadoc when it begins with `/**` and is longer than
    /// the degenerate `/**/`.
    pub(crate) fn doc(&self) -> Option<String> {
        let prev = self.tokens.previous()?;
        if prev.token == Token::Comment && prev.text.starts_with("/**") && prev.text != "/**/" {
            Some(prev.text.to_string())
        } else {
            None
        }
    }

    /// Run a speculative parse: on error the cursor is restored to where
    /// it was before `f` ran, so the caller can try the other alternative.
    pub(crate) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.tokens.push_marker();
        match f(self) {
            Ok(value) => {
                self.tokens.pop_marker(false);
                Ok(value)
            }
            Err(err) => {
                self.tokens.pop_marker(true);
                Err(err)
            }
        }
    }

    // ==================== Errors ====================

    /// Build a syntax error at the given token
    pub(crate) fn err_at(&self, message: impl Into<String>, token: &SpannedToken<'a>) -> SyntaxError {
        let line = token.span.start_line;
        SyntaxError::new(
            message,
            self.filename.clone(),
            line,
            token.span.start_column,
            self.source_map.line_text(self.source, line),
        )
        .with_token(token.text)
    }

    /// Build a syntax error at the current token
    pub(crate) fn err(&self, message: impl Into<String>) -> SyntaxError {
        self.err_at(message, self.token())
    }

    /// Build a syntax error at the most recently consumed token
    pub(crate) fn err_at_previous(&self, message: impl Into<String>) -> SyntaxError {
        match self.tokens.previous() {
            Some(prev) => {
                let prev = *prev;
                self.err_at(message, &prev)
            }
            None => self.err(message),
        }
    }

    /// "expected X got Y" at the current token
    pub(crate) fn err_expected(&self, what: &str) -> SyntaxError {
        self.err(format!("expected {} got {}", what, self.token().describe()))
    }

    // ==================== Names ====================

    /// Consume a NAME token and return its text
    pub(crate) fn parse_ident(&mut self) -> ParseResult<&'a str> {
        self.require_kind(Token::Name)
    }

    /// Parse a simple name
    pub(crate) fn parse_name(&mut self) -> ParseResult<Name> {
        Ok(Name::from(self.parse_ident()?))
    }

    /// Parse a simple name that declares a type; `var` is rejected
    pub(crate) fn parse_class_name(&mut self) -> ParseResult<Name> {
        let token = *self.token();
        let name = self.parse_name()?;
        if name.as_str() == "var" {
            return Err(self.err_at("'var' cannot be used as a type name", &token));
        }
        Ok(name)
    }

    /// Parse a dotted qualified name
    pub(crate) fn parse_qual_name(&mut self) -> ParseResult<Name> {
        let mut result = self.parse_ident()?.to_string();
        while self.check(".") && self.check_kind_at(1, Token::Name) {
            self.next();
            result.push('.');
            result.push_str(self.parse_ident()?);
        }
        Ok(Name::new(result))
    }

    // ==================== Compilation Unit ====================

    /// Parse a whole compilation unit: the only public entry point.
    ///
    /// Javadoc, modifiers and annotations may precede the `package`
    /// declaration; if any modifier was seen, `package` is no longer
    /// possible and everything read so far belongs to the first type
    /// declaration.
    pub fn parse_compilation_unit(&mut self) -> ParseResult<CompilationUnit> {
        let mut doc = self.doc();
        let (mut modifiers, mut annotations) = self.parse_mods_and_annotations()?;

        let package = if modifiers.is_empty() && self.check("package") {
            let package =
                self.parse_package_declaration(doc.take(), std::mem::take(&mut annotations))?;
            doc = self.doc();
            let (mods, anns) = self.parse_mods_and_annotations()?;
            modifiers = mods;
            annotations = anns;
            Some(package)
        } else {
            None
        };

        if modifiers.is_empty() && annotations.is_empty() {
            doc = None;
        } else if self.check("import") {
            return Err(self.err("expected 'class', 'interface', '@interface', or 'enum' here"));
        }
        let imports = self.parse_import_section()?;

        // Re-read Javadoc, modifiers and annotations if the pre-package
        // ones were used up by the package declaration.
        if modifiers.is_empty() && annotations.is_empty() {
            doc = self.doc();
            let (mods, anns) = self.parse_mods_and_annotations()?;
            modifiers = mods;
            annotations = anns;
        }

        if modifiers.is_empty() && annotations.is_empty() {
            while self.accept(";") {}
        }

        if package.is_none()
            && modifiers.is_empty()
            && (self.check("open") || self.check("module"))
        {
            return Ok(CompilationUnit::Module(
                self.parse_module_declaration(imports, annotations, doc)?,
            ));
        }

        let types = if !self.is_at_end() || !modifiers.is_empty() || !annotations.is_empty() {
            self.parse_type_declarations(doc, modifiers, annotations)?
        } else {
            Vec::new()
        };

        if !self.is_at_end() {
            return Err(self.err(format!("unexpected token {}", self.token().describe())));
        }

        Ok(CompilationUnit::Ordinary(OrdinaryCompilationUnit {
            package,
            imports,
            types,
        }))
    }

    fn parse_package_declaration(
        &mut self,
        doc: Option<String>,
        annotations: Vec<crate::ast::Annotation>,
    ) -> ParseResult<Package> {
        self.require("package")?;
        let name = self.parse_qual_name()?;
        self.require(";")?;
        Ok(Package {
            name,
            annotations,
            doc,
        })
    }

    fn parse_import_section(&mut self) -> ParseResult<Vec<Import>> {
        let mut imports = Vec::new();
        while self.check("import") {
            imports.push(self.parse_import_declaration()?);
        }
        Ok(imports)
    }

    fn parse_import_declaration(&mut self) -> ParseResult<Import> {
        self.require("import")?;
        let is_static = self.accept("static");
        let name = self.parse_qual_name()?;
        let wildcard = self.accept2(".", "*");
        self.require(";")?;
        Ok(Import {
            name,
            is_static,
            wildcard,
        })
    }

    // ==================== Module Declarations ====================

    fn parse_module_declaration(
        &mut self,
        imports: Vec<Import>,
        annotations: Vec<crate::ast::Annotation>,
        doc: Option<String>,
    ) -> ParseResult<ModuleCompilationUnit> {
        let open = self.accept("open");
        self.require("module")?;
        let name = self.parse_qual_name()?;
        self.require("{")?;
        let mut members = Vec::new();
        while !self.check("}") {
            members.push(self.parse_directive()?);
        }
        self.require("}")?;
        Ok(ModuleCompilationUnit {
            name,
            open,
            imports,
            annotations,
            doc,
            members,
        })
    }

    fn parse_directive(&mut self) -> ParseResult<Directive> {
        let doc = self.doc();
        if self.check("requires") {
            self.parse_requires_directive(doc)
        } else if self.check("exports") {
            self.parse_exports_directive(doc)
        } else if self.check("opens") {
            self.parse_opens_directive(doc)
        } else if self.check("uses") {
            self.parse_uses_directive(doc)
        } else if self.check("provides") {
            self.parse_provides_directive(doc)
        } else {
            Err(self.err("expected 'requires', 'exports', 'opens', 'uses', or 'provides'"))
        }
    }

    fn parse_requires_directive(&mut self, doc: Option<String>) -> ParseResult<Directive> {
        self.require("requires")?;
        let mut modifiers = Vec::new();
        while self.check("transitive") || self.check("static") {
            modifiers.push(if self.check("transitive") {
                Modifier::Transitive
            } else {
                Modifier::Static
            });
            self.next();
        }
        let name = self.parse_qual_name()?;
        self.require(";")?;
        Ok(Directive::Requires {
            name,
            modifiers,
            doc,
        })
    }

    fn parse_exports_directive(&mut self, doc: Option<String>) -> ParseResult<Directive> {
        self.require("exports")?;
        let name = self.parse_qual_name()?;
        let to = self.parse_directive_name_list("to")?;
        self.require(";")?;
        Ok(Directive::Exports { name, to, doc })
    }

    fn parse_opens_directive(&mut self, doc: Option<String>) -> ParseResult<Directive> {
        self.require("opens")?;
        let name = self.parse_qual_name()?;
        let to = self.parse_directive_name_list("to")?;
        self.require(";")?;
        Ok(Directive::Opens { name, to, doc })
    }

    fn parse_uses_directive(&mut self, doc: Option<String>) -> ParseResult<Directive> {
        self.require("uses")?;
        let name = self.parse_qual_name()?;
        if name.is_var() {
            return Err(self.err_at_previous("'var' cannot be used as a type name"));
        }
        self.require(";")?;
        Ok(Directive::Uses { name, doc })
    }

    fn parse_provides_directive(&mut self, doc: Option<String>) -> ParseResult<Directive> {
        self.require("provides")?;
        let name = self.parse_qual_name()?;
        if name.is_var() {
            return Err(self.err_at_previous("'var' cannot be used as a type name"));
        }
        let provides = self.parse_directive_name_list("with")?;
        self.require(";")?;
        Ok(Directive::Provides {
            name,
            provides,
            doc,
        })
    }

    /// Parse the optional `to a, b` / `with a, b` tail of a directive
    fn parse_directive_name_list(&mut self, keyword: &str) -> ParseResult<Vec<Name>> {
        let mut names = Vec::new();
        if self.accept(keyword) {
            names.push(self.parse_qual_name()?);
            while self.accept(",") {
                names.push(self.parse_qual_name()?);
            }
        }
        Ok(names)
    }
}
