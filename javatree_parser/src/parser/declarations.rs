//! Type declarations and class members
//!
//! Member-kind disambiguation inside a class body:
//!
//! 1. `static {` is a static initializer, a bare `{` an instance one.
//! 2. After modifiers and annotations, `class`/`interface`/`enum`/
//!    `@interface` start a nested type.
//! 3. `<` starts type parameters: generic method, or generic constructor
//!    when `NAME (` follows immediately.
//! 4. `void` starts a method; `NAME (` (outside interfaces) a
//!    constructor; anything else is `Type Name`, then `(` decides method
//!    vs. field.

use crate::ast::{
    Annotation, AnnotationDeclaration, AnnotationProperty, ArrayType, ClassDeclaration,
    ConstructorDeclaration, Dimension, EnumDeclaration, EnumField, FieldDeclaration,
    FormalParameter, FunctionDeclaration, InitializerBlock, InterfaceDeclaration, Member,
    Modifier, Parameter, ThisParameter, Type, TypeDeclaration, TypeParameter,
    VariableDeclarator, VoidType,
};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    // ==================== Type Declarations ====================

    pub(crate) fn parse_type_declarations(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<Vec<TypeDeclaration>> {
        let mut types = vec![self.parse_type_declaration_with(doc, modifiers, annotations)?];
        while !self.is_at_end() {
            if !self.accept(";") {
                types.push(self.parse_type_declaration()?);
            }
        }
        Ok(types)
    }

    pub(crate) fn parse_type_declaration(&mut self) -> ParseResult<TypeDeclaration> {
        let doc = self.doc();
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        self.parse_type_declaration_with(doc, modifiers, annotations)
    }

    pub(crate) fn parse_type_declaration_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<TypeDeclaration> {
        if self.check("class") {
            Ok(TypeDeclaration::Class(self.parse_class_declaration_with(
                doc, modifiers, annotations,
            )?))
        } else if self.check("interface") {
            Ok(TypeDeclaration::Interface(
                self.parse_interface_declaration_with(doc, modifiers, annotations)?,
            ))
        } else if self.check("enum") {
            Ok(TypeDeclaration::Enum(self.parse_enum_declaration_with(
                doc, modifiers, annotations,
            )?))
        } else if self.check("@") && self.check_at(1, "interface") {
            Ok(TypeDeclaration::Annotation(
                self.parse_annotation_declaration_with(doc, modifiers, annotations)?,
            ))
        } else {
            Err(self.err("expected 'class', 'interface', 'enum', or '@interface' here"))
        }
    }

    /// Consume modifier keywords and annotations in any order until
    /// neither matches. Duplicate modifiers are rejected.
    pub(crate) fn parse_mods_and_annotations(
        &mut self,
    ) -> ParseResult<(Vec<Modifier>, Vec<Annotation>)> {
        let mut modifiers = Vec::new();
        let mut annotations = Vec::new();
        loop {
            if self.check("@") && !self.check_at(1, "interface") {
                annotations.push(self.parse_annotation()?);
            } else if let Some(modifier) = self.peek_modifier() {
                if modifiers.contains(&modifier) {
                    return Err(self.err(format!("repeated modifier '{}'", modifier.as_str())));
                }
                modifiers.push(modifier);
                self.consume_modifier(modifier);
            } else {
                return Ok((modifiers, annotations));
            }
        }
    }

    /// Check for a modifier keyword at the cursor. `non-sealed` spans
    /// three tokens which must abut exactly.
    fn peek_modifier(&self) -> Option<Modifier> {
        if let Some(modifier) = Modifier::from_keyword(self.token().text) {
            return Some(modifier);
        }
        if self.check("non") && self.check_at(1, "-") && self.check_at(2, "sealed") {
            let first = self.tokens.look(0).span;
            let second = self.tokens.look(1).span;
            let third = self.tokens.look(2).span;
            if first.abuts(&second) && second.abuts(&third) {
                return Some(Modifier::NonSealed);
            }
        }
        None
    }

    fn consume_modifier(&mut self, modifier: Modifier) {
        let words = if modifier == Modifier::NonSealed { 3 } else { 1 };
        for _ in 0..words {
            self.next();
        }
    }

    pub(crate) fn parse_class_declaration(&mut self) -> ParseResult<ClassDeclaration> {
        let doc = self.doc();
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        self.parse_class_declaration_with(doc, modifiers, annotations)
    }

    pub(crate) fn parse_class_declaration_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<ClassDeclaration> {
        self.require("class")?;
        let name = self.parse_class_name()?;
        let typeparams = self.parse_type_parameters_opt()?.unwrap_or_default();
        let superclass = if self.accept("extends") {
            Some(self.parse_generic_type()?)
        } else {
            None
        };
        let interfaces = if self.accept("implements") {
            self.parse_generic_type_list()?
        } else {
            Vec::new()
        };
        let members = self.parse_class_body(Self::parse_class_member)?;
        Ok(ClassDeclaration {
            name,
            typeparams,
            superclass,
            interfaces,
            members,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_interface_declaration_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<InterfaceDeclaration> {
        self.require("interface")?;
        let name = self.parse_class_name()?;
        let typeparams = self.parse_type_parameters_opt()?.unwrap_or_default();
        let interfaces = if self.accept("extends") {
            self.parse_generic_type_list()?
        } else {
            Vec::new()
        };
        let members = self.parse_class_body(Self::parse_interface_member)?;
        Ok(InterfaceDeclaration {
            name,
            typeparams,
            interfaces,
            members,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_enum_declaration_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<EnumDeclaration> {
        self.require("enum")?;
        let name = self.parse_class_name()?;
        let interfaces = if self.accept("implements") {
            self.parse_generic_type_list()?
        } else {
            Vec::new()
        };
        let (fields, members) = self.parse_enum_body()?;
        Ok(EnumDeclaration {
            name,
            interfaces,
            fields,
            members,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_annotation_declaration_with(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<AnnotationDeclaration> {
        self.require2("@", "interface")?;
        let name = self.parse_class_name()?;
        let members = self.parse_class_body(Self::parse_annotation_member)?;
        Ok(AnnotationDeclaration {
            name,
            members,
            modifiers,
            annotations,
            doc,
        })
    }

    // ==================== Class Bodies ====================

    pub(crate) fn parse_class_body(
        &mut self,
        parse_member: fn(&mut Self) -> ParseResult<Member>,
    ) -> ParseResult<Vec<Member>> {
        self.require("{")?;
        let mut members = Vec::new();
        while !self.check("}") && !self.is_at_end() {
            if !self.accept(";") {
                members.push(parse_member(self)?);
            }
        }
        self.require("}")?;
        Ok(members)
    }

    fn parse_enum_body(&mut self) -> ParseResult<(Vec<EnumField>, Vec<Member>)> {
        self.require("{")?;
        let mut fields = Vec::new();
        let mut members = Vec::new();

        while !self.check(";") && !self.check("}") && !self.is_at_end() {
            fields.push(self.parse_enum_field()?);
            if !self.accept(",") {
                break;
            }
        }

        if self.accept(";") {
            while !self.check("}") && !self.is_at_end() {
                if !self.accept(";") {
                    members.push(self.parse_class_member()?);
                }
            }
        }

        self.require("}")?;
        Ok((fields, members))
    }

    fn parse_enum_field(&mut self) -> ParseResult<EnumField> {
        let doc = self.doc();
        let annotations = self.parse_annotations()?;
        let name = self.parse_name()?;
        let args = if self.check("(") {
            Some(self.parse_args()?)
        } else {
            None
        };
        let members = if self.check("{") {
            Some(self.parse_class_body(Self::parse_class_member)?)
        } else {
            None
        };
        Ok(EnumField {
            name,
            args,
            members,
            annotations,
            doc,
        })
    }

    pub(crate) fn parse_class_member(&mut self) -> ParseResult<Member> {
        let doc = self.doc();
        if self.check("static") && self.check_at(1, "{") {
            self.next();
            let body = self.parse_block()?;
            return Ok(Member::Initializer(InitializerBlock {
                body,
                is_static: true,
                doc,
            }));
        }
        if self.check("{") {
            let body = self.parse_block()?;
            return Ok(Member::Initializer(InitializerBlock {
                body,
                is_static: false,
                doc,
            }));
        }
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        if self.check("class") || self.check("interface") || self.check("enum") || self.check("@")
        {
            Ok(Member::Type(self.parse_type_declaration_with(
                doc, modifiers, annotations,
            )?))
        } else {
            self.parse_method_or_field_declaration(doc, modifiers, annotations, false)
        }
    }

    fn parse_interface_member(&mut self) -> ParseResult<Member> {
        let doc = self.doc();
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        if self.check("class") || self.check("interface") || self.check("enum") || self.check("@")
        {
            Ok(Member::Type(self.parse_type_declaration_with(
                doc, modifiers, annotations,
            )?))
        } else {
            self.parse_method_or_field_declaration(doc, modifiers, annotations, true)
        }
    }

    fn parse_annotation_member(&mut self) -> ParseResult<Member> {
        let doc = self.doc();
        if self.check("static") && self.check_at(1, "{") {
            self.next();
            let body = self.parse_block()?;
            return Ok(Member::Initializer(InitializerBlock {
                body,
                is_static: true,
                doc,
            }));
        }
        if self.check("{") {
            let body = self.parse_block()?;
            return Ok(Member::Initializer(InitializerBlock {
                body,
                is_static: false,
                doc,
            }));
        }
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        if self.check("class") || self.check("interface") || self.check("enum") || self.check("@")
        {
            return Ok(Member::Type(self.parse_type_declaration_with(
                doc, modifiers, annotations,
            )?));
        }

        if modifiers.contains(&Modifier::Static) {
            // Static members of annotation types parse like class members.
            let typeparams = self.parse_type_parameters_opt()?;
            if let Some(typeparams) = typeparams {
                let return_type = if self.accept("void") {
                    Type::Void(VoidType)
                } else {
                    self.parse_type_with(Vec::new())?
                };
                let name = self.parse_name()?;
                return self
                    .parse_method_rest(return_type, name, typeparams, doc, modifiers, annotations)
                    .map(Member::Method);
            }
            if self.accept("void") {
                let name = self.parse_name()?;
                return self
                    .parse_method_rest(
                        Type::Void(VoidType),
                        name,
                        Vec::new(),
                        doc,
                        modifiers,
                        annotations,
                    )
                    .map(Member::Method);
            }
            let ty = self.parse_type_with(Vec::new())?;
            let name = self.parse_name()?;
            if self.check("(") {
                self.parse_method_rest(ty, name, Vec::new(), doc, modifiers, annotations)
                    .map(Member::Method)
            } else {
                self.parse_field_rest(ty, name, doc, modifiers, annotations, false)
                    .map(Member::Field)
            }
        } else {
            let ty = self.parse_type_with(Vec::new())?;
            let name = self.parse_name()?;
            if self.check("(") {
                self.parse_annotation_property_rest(ty, name, doc, modifiers, annotations)
                    .map(Member::Property)
            } else {
                self.parse_field_rest(ty, name, doc, modifiers, annotations, false)
                    .map(Member::Field)
            }
        }
    }

    // ==================== Methods, Constructors, Fields ====================

    fn parse_method_or_field_declaration(
        &mut self,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
        interface: bool,
    ) -> ParseResult<Member> {
        let typeparams = self.parse_type_parameters_opt()?;
        if let Some(typeparams) = typeparams {
            if self.check_kind(Token::Name) && self.check_at(1, "(") {
                let name = self.parse_name()?;
                return self
                    .parse_constructor_rest(name, typeparams, doc, modifiers, annotations)
                    .map(Member::Constructor);
            }
            let return_type = if self.accept("void") {
                Type::Void(VoidType)
            } else {
                self.parse_type_with(Vec::new())?
            };
            let name = self.parse_name()?;
            return self
                .parse_method_rest(return_type, name, typeparams, doc, modifiers, annotations)
                .map(Member::Method);
        }

        if self.accept("void") {
            let name = self.parse_name()?;
            return self
                .parse_method_rest(
                    Type::Void(VoidType),
                    name,
                    Vec::new(),
                    doc,
                    modifiers,
                    annotations,
                )
                .map(Member::Method);
        }

        if !interface && self.check_kind(Token::Name) && self.check_at(1, "(") {
            let name = self.parse_name()?;
            return self
                .parse_constructor_rest(name, Vec::new(), doc, modifiers, annotations)
                .map(Member::Constructor);
        }

        let ty = self.parse_type_with(Vec::new())?;
        let name = self.parse_name()?;
        if self.check("(") {
            self.parse_method_rest(ty, name, Vec::new(), doc, modifiers, annotations)
                .map(Member::Method)
        } else {
            self.parse_field_rest(ty, name, doc, modifiers, annotations, interface)
                .map(Member::Field)
        }
    }

    fn parse_method_rest(
        &mut self,
        return_type: Type,
        name: crate::ast::Name,
        typeparams: Vec<TypeParameter>,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<FunctionDeclaration> {
        let params = self.parse_parameters(true)?;

        // Trailing array dimensions after the parameter list fold into the
        // return type.
        let mut return_type = return_type;
        if self.check("[") || self.check("@") {
            let dimensions = self.parse_dimensions()?;
            return_type = match return_type {
                Type::Array(mut array) => {
                    array.dimensions.extend(dimensions);
                    Type::Array(array)
                }
                base => Type::Array(ArrayType::new(base, dimensions)),
            };
        }

        let throws = if self.accept("throws") {
            self.parse_generic_type_list()?
        } else {
            Vec::new()
        };
        let body = if self.check("{") {
            Some(self.parse_block()?)
        } else {
            self.require(";")?;
            None
        };
        Ok(FunctionDeclaration {
            name,
            return_type,
            typeparams,
            params,
            throws,
            body,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_constructor_rest(
        &mut self,
        name: crate::ast::Name,
        typeparams: Vec<TypeParameter>,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<ConstructorDeclaration> {
        let params = self.parse_parameters(true)?;
        let throws = if self.accept("throws") {
            self.parse_generic_type_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_block()?;
        Ok(ConstructorDeclaration {
            name,
            typeparams,
            params,
            throws,
            body,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_annotation_property_rest(
        &mut self,
        ty: Type,
        name: crate::ast::Name,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<AnnotationProperty> {
        self.require2("(", ")")?;
        let dimensions = self.parse_dimensions_opt()?;
        let default = if self.accept("default") {
            Some(self.parse_annotation_value()?)
        } else {
            None
        };
        self.require(";")?;
        Ok(AnnotationProperty {
            ty,
            name,
            default,
            dimensions,
            modifiers,
            annotations,
            doc,
        })
    }

    fn parse_field_rest(
        &mut self,
        ty: Type,
        name: crate::ast::Name,
        doc: Option<String>,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
        require_init: bool,
    ) -> ParseResult<FieldDeclaration> {
        let array = matches!(ty, Type::Array(_));
        let mut declarators = vec![self.parse_declarator_rest(name, require_init, array)?];
        while self.accept(",") {
            declarators.push(self.parse_declarator(require_init, array)?);
        }
        self.require(";")?;
        Ok(FieldDeclaration {
            ty,
            declarators,
            modifiers,
            annotations,
            doc,
        })
    }

    pub(crate) fn parse_declarator(
        &mut self,
        require_init: bool,
        array: bool,
    ) -> ParseResult<VariableDeclarator> {
        let name = self.parse_name()?;
        self.parse_declarator_rest(name, require_init, array)
    }

    pub(crate) fn parse_declarator_rest(
        &mut self,
        name: crate::ast::Name,
        require_init: bool,
        array: bool,
    ) -> ParseResult<VariableDeclarator> {
        let dimensions = self.parse_dimensions_opt()?;
        let has_init = if require_init {
            self.require("=")?;
            true
        } else {
            self.accept("=")
        };
        let init = if has_init {
            Some(self.parse_initializer(!dimensions.is_empty() || array)?)
        } else {
            None
        };
        Ok(VariableDeclarator {
            name,
            init,
            dimensions,
        })
    }

    // ==================== Parameters ====================

    pub(crate) fn parse_parameters(&mut self, allow_this: bool) -> ParseResult<Vec<Parameter>> {
        self.require("(")?;
        let mut params = Vec::new();
        if !self.check(")") {
            let param = if allow_this {
                self.parse_parameter_opt_this()?
            } else {
                Parameter::Formal(self.parse_parameter()?)
            };
            let variadic = param.is_variadic();
            params.push(param);
            if !variadic {
                while self.accept(",") {
                    let param = self.parse_parameter()?;
                    let variadic = param.variadic;
                    params.push(Parameter::Formal(param));
                    if variadic {
                        break;
                    }
                }
            }
        }
        self.require(")")?;
        Ok(params)
    }

    /// Parse a parameter that may be an explicit receiver (`Foo this`,
    /// `Foo Outer.this`). Receivers take no modifiers and are never
    /// variadic.
    fn parse_parameter_opt_this(&mut self) -> ParseResult<Parameter> {
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        let ty = self.parse_type_with(Vec::new())?;
        if modifiers.is_empty() && self.accept("this") {
            return Ok(Parameter::This(ThisParameter {
                ty,
                qualifier: None,
                annotations,
            }));
        }
        let variadic = self.accept("...");
        let name = self.parse_name()?;
        if !variadic && modifiers.is_empty() && self.accept2(".", "this") {
            return Ok(Parameter::This(ThisParameter {
                ty,
                qualifier: Some(name),
                annotations,
            }));
        }
        let dimensions = self.parse_dimensions_opt()?;
        Ok(Parameter::Formal(FormalParameter {
            ty,
            name,
            variadic,
            dimensions,
            modifiers,
            annotations,
        }))
    }

    pub(crate) fn parse_parameter(&mut self) -> ParseResult<FormalParameter> {
        let (modifiers, annotations) = self.parse_mods_and_annotations()?;
        let ty = self.parse_type_with(Vec::new())?;
        let variadic = self.accept("...");
        let name = self.parse_name()?;
        let dimensions = self.parse_dimensions_opt()?;
        Ok(FormalParameter {
            ty,
            name,
            variadic,
            dimensions,
            modifiers,
            annotations,
        })
    }

    /// Parse trailing `[]` pairs if any are present
    pub(crate) fn parse_dimensions_opt(&mut self) -> ParseResult<Vec<Dimension>> {
        if self.check("[") || self.check("@") {
            self.parse_dimensions()
        } else {
            Ok(Vec::new())
        }
    }
}
