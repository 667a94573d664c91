//! Type references, type parameters and annotations
//!
//! Everywhere a declared type name is syntactically required, the
//! reserved identifier `var` is rejected (`'var' cannot be used as a type
//! name`); the only placements that admit it are local variable
//! declarations, enhanced-`for` variables and try-resources, which handle
//! it before calling into these routines.

use crate::ast::{
    Annotation, AnnotationArgs, AnnotationArgument, ArrayType, BoundKind, Dimension, Expr,
    GenericType, Primitive, PrimitiveType, Type, TypeArgument, TypeIntersection, TypeParameter,
    TypeUnion, WildcardBound,
};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    // ==================== Annotations ====================

    /// Parse zero or more annotations (but never `@interface`)
    pub(crate) fn parse_annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.check("@") && !self.check_at(1, "interface") {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    pub(crate) fn parse_annotation(&mut self) -> ParseResult<Annotation> {
        self.require("@")?;
        let ty = GenericType::new(self.parse_qual_name()?, None);

        let args = if self.accept("(") {
            let args = if self.check_kind(Token::Name) && self.check_at(1, "=") {
                let mut list = vec![self.parse_annotation_arg()?];
                while self.accept(",") {
                    list.push(self.parse_annotation_arg()?);
                }
                AnnotationArgs::Named(list)
            } else if !self.check(")") {
                AnnotationArgs::Value(Box::new(self.parse_annotation_value()?))
            } else {
                AnnotationArgs::Named(Vec::new())
            };
            self.require(")")?;
            Some(args)
        } else {
            None
        };

        Ok(Annotation { ty, args })
    }

    fn parse_annotation_arg(&mut self) -> ParseResult<AnnotationArgument> {
        let name = self.parse_name()?;
        self.require("=")?;
        let value = self.parse_annotation_value()?;
        Ok(AnnotationArgument { name, value })
    }

    /// An annotation value: a nested annotation, an array initializer or
    /// a (constant) expression
    pub(crate) fn parse_annotation_value(&mut self) -> ParseResult<Expr> {
        if self.check("@") {
            Ok(Expr::Annotation(Box::new(self.parse_annotation()?)))
        } else if self.check("{") {
            Ok(Expr::ArrayInit(self.parse_annotation_array()?))
        } else {
            self.parse_expr()
        }
    }

    fn parse_annotation_array(&mut self) -> ParseResult<crate::ast::ArrayInitializer> {
        self.require("{")?;
        let mut values = Vec::new();
        if !self.check("}") && !self.accept(",") {
            loop {
                values.push(self.parse_annotation_value()?);
                if !self.accept(",") || self.check("}") {
                    break;
                }
            }
        }
        self.require("}")?;
        Ok(crate::ast::ArrayInitializer { values })
    }

    // ==================== Type Parameters ====================

    pub(crate) fn parse_type_parameters_opt(
        &mut self,
    ) -> ParseResult<Option<Vec<TypeParameter>>> {
        if self.check("<") {
            Ok(Some(self.parse_type_parameters()?))
        } else {
            Ok(None)
        }
    }

    fn parse_type_parameters(&mut self) -> ParseResult<Vec<TypeParameter>> {
        self.require("<")?;
        let mut params = vec![self.parse_type_parameter()?];
        while self.accept(",") {
            params.push(self.parse_type_parameter()?);
        }
        self.require(">")?;
        Ok(params)
    }

    fn parse_type_parameter(&mut self) -> ParseResult<TypeParameter> {
        let annotations = self.parse_annotations()?;
        let name = self.parse_name()?;
        let bound = if self.accept("extends") {
            Some(self.parse_type_union()?)
        } else {
            None
        };
        Ok(TypeParameter {
            name,
            bound,
            annotations,
        })
    }

    // ==================== Type Arguments ====================

    pub(crate) fn parse_type_args_opt(&mut self) -> ParseResult<Option<Vec<TypeArgument>>> {
        if self.check("<") {
            Ok(Some(self.parse_type_args()?))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn parse_type_args(&mut self) -> ParseResult<Vec<TypeArgument>> {
        self.require("<")?;
        let mut args = Vec::new();
        if !self.check(">") {
            args.push(self.parse_type_arg()?);
            while self.accept(",") {
                args.push(self.parse_type_arg()?);
            }
        }
        self.require(">")?;
        Ok(args)
    }

    fn parse_type_arg(&mut self) -> ParseResult<TypeArgument> {
        let annotations = self.parse_annotations()?;
        if self.accept("?") {
            let kind = if self.accept("extends") {
                Some(BoundKind::Extends)
            } else if self.accept("super") {
                Some(BoundKind::Super)
            } else {
                None
            };
            let bound = match kind {
                Some(kind) => Some(WildcardBound {
                    kind,
                    base: self.parse_type_union_with(Vec::new())?,
                }),
                None => None,
            };
            Ok(TypeArgument::Wildcard { bound, annotations })
        } else {
            Ok(TypeArgument::Concrete(
                self.parse_generic_type_or_array(annotations)?,
            ))
        }
    }

    // ==================== Types ====================

    /// Parse a type, leading annotations included
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let annotations = self.parse_annotations()?;
        self.parse_type_with(annotations)
    }

    /// Parse a type whose leading annotations were already consumed
    pub(crate) fn parse_type_with(&mut self, annotations: Vec<Annotation>) -> ParseResult<Type> {
        let ty = self.parse_base_type()?;
        if self.check("[") || self.check("@") {
            let dimensions = self.parse_dimensions()?;
            let mut array = ArrayType::new(ty, dimensions);
            array.annotations = annotations;
            Ok(Type::Array(array))
        } else {
            Ok(attach_annotations(ty, annotations))
        }
    }

    /// Parse a cast target: a type, or an `&`-joined intersection of
    /// class types (`(Runnable & Serializable) r`)
    pub(crate) fn parse_cast_type(&mut self) -> ParseResult<Type> {
        let ty = self.parse_type()?;
        match ty {
            Type::Generic(first) if self.check("&") => {
                self.next();
                let mut types = vec![first, self.parse_generic_type()?];
                while self.accept("&") {
                    types.push(self.parse_generic_type()?);
                }
                Ok(Type::Union(TypeUnion { types }))
            }
            other => Ok(other),
        }
    }

    /// Parse a primitive or class type, without array dimensions
    fn parse_base_type(&mut self) -> ParseResult<Type> {
        if let Some(primitive) = Primitive::from_keyword(self.token().text) {
            self.next();
            Ok(Type::Primitive(PrimitiveType::new(primitive)))
        } else {
            Ok(Type::Generic(self.parse_generic_type()?))
        }
    }

    /// Parse a class or interface type, rejecting `var`
    pub(crate) fn parse_generic_type(&mut self) -> ParseResult<GenericType> {
        let name = self.parse_qual_name()?;
        if name.is_var() {
            return Err(self.err_at_previous("'var' cannot be used as a type name"));
        }
        let typeargs = self.parse_type_args_opt()?;
        let mut ty = GenericType::new(name, typeargs);

        // Inner types of a parameterized type: `Outer<A>.Inner<B>`
        while self.check(".") && self.check_kind_at(1, Token::Name) {
            self.next();
            let name = self.parse_name()?;
            if name.as_str() == "var" {
                return Err(self.err_at_previous("'var' cannot be used as a type name"));
            }
            let typeargs = self.parse_type_args_opt()?;
            let mut inner = GenericType::new(name, typeargs);
            inner.container = Some(Box::new(ty));
            ty = inner;
        }

        Ok(ty)
    }

    /// Parse a type argument or `instanceof` target: a class type, or an
    /// array of a primitive or class type
    pub(crate) fn parse_generic_type_or_array(
        &mut self,
        annotations: Vec<Annotation>,
    ) -> ParseResult<Type> {
        if let Some(primitive) = Primitive::from_keyword(self.token().text) {
            self.next();
            let dimensions = self.parse_dimensions()?;
            let mut array = ArrayType::new(
                Type::Primitive(PrimitiveType::new(primitive)),
                dimensions,
            );
            array.annotations = annotations;
            return Ok(Type::Array(array));
        }

        let mut ty = self.parse_generic_type()?;
        if self.check("[") || self.check("@") {
            // The annotations migrate from the element type to the array.
            ty.annotations = Vec::new();
            let dimensions = self.parse_dimensions()?;
            let mut array = ArrayType::new(Type::Generic(ty), dimensions);
            array.annotations = annotations;
            Ok(Type::Array(array))
        } else {
            ty.annotations = annotations;
            Ok(Type::Generic(ty))
        }
    }

    /// Parse an `&`-joined type parameter bound
    pub(crate) fn parse_type_union(&mut self) -> ParseResult<Type> {
        let annotations = self.parse_annotations()?;
        self.parse_type_union_with(annotations)
    }

    fn parse_type_union_with(&mut self, annotations: Vec<Annotation>) -> ParseResult<Type> {
        let mut first = self.parse_generic_type()?;
        if self.accept("&") {
            let mut types = vec![first, self.parse_generic_type()?];
            while self.accept("&") {
                types.push(self.parse_generic_type()?);
            }
            Ok(Type::Union(TypeUnion { types }))
        } else {
            first.annotations = annotations;
            Ok(Type::Generic(first))
        }
    }

    /// Parse a `|`-joined multi-catch type
    pub(crate) fn parse_type_intersection(&mut self) -> ParseResult<Type> {
        let annotations = self.parse_annotations()?;
        let mut first = self.parse_generic_type()?;
        if self.accept("|") {
            let mut types = vec![first, self.parse_generic_type()?];
            while self.accept("|") {
                types.push(self.parse_generic_type()?);
            }
            Ok(Type::Intersection(TypeIntersection { types }))
        } else {
            first.annotations = annotations;
            Ok(Type::Generic(first))
        }
    }

    pub(crate) fn parse_generic_type_list(&mut self) -> ParseResult<Vec<GenericType>> {
        let mut types = vec![self.parse_generic_type()?];
        while self.accept(",") {
            types.push(self.parse_generic_type()?);
        }
        Ok(types)
    }

    // ==================== Dimensions ====================

    /// Parse one or more `[]` pairs, each optionally annotated
    pub(crate) fn parse_dimensions(&mut self) -> ParseResult<Vec<Dimension>> {
        let mut dimensions = vec![self.parse_dimension()?];
        while self.check("[") || self.check("@") {
            dimensions.push(self.parse_dimension()?);
        }
        Ok(dimensions)
    }

    fn parse_dimension(&mut self) -> ParseResult<Dimension> {
        let annotations = if self.check("@") {
            self.parse_annotations()?
        } else {
            Vec::new()
        };
        self.require2("[", "]")?;
        Ok(Dimension { annotations })
    }
}

/// Attach leading annotations to a non-array type
fn attach_annotations(ty: Type, annotations: Vec<Annotation>) -> Type {
    if annotations.is_empty() {
        return ty;
    }
    match ty {
        Type::Primitive(mut p) => {
            p.annotations.extend(annotations);
            Type::Primitive(p)
        }
        Type::Generic(mut g) => {
            g.annotations.extend(annotations);
            Type::Generic(g)
        }
        other => other,
    }
}
