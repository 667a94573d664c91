//! Declaration corpus tests
//!
//! Class bodies and the member-kind disambiguation: methods vs.
//! constructors vs. fields, initializer blocks, nested types, enum
//! bodies, annotation type members, parameters.

use javatree_parser::ast::{
    ClassDeclaration, CompilationUnit, Member, Modifier, Parameter, Type, TypeDeclaration,
};
use javatree_parser::parse_str;
use pretty_assertions::assert_eq;

fn parse_type_decl(source: &str) -> TypeDeclaration {
    let unit = parse_str(source, "<test>").expect("parse failed");
    match unit {
        CompilationUnit::Ordinary(mut unit) => unit.types.remove(0),
        other => panic!("expected ordinary compilation unit, got {:?}", other),
    }
}

fn parse_class(source: &str) -> ClassDeclaration {
    match parse_type_decl(source) {
        TypeDeclaration::Class(class) => class,
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_class_header() {
    let class = parse_class(
        "public final class C<T extends Number & Comparable> extends Base implements A, B {}",
    );
    assert_eq!(class.modifiers, vec![Modifier::Public, Modifier::Final]);
    assert_eq!(class.typeparams.len(), 1);
    assert!(matches!(class.typeparams[0].bound, Some(Type::Union(_))));
    assert_eq!(class.superclass.as_ref().unwrap().name.as_str(), "Base");
    assert_eq!(class.interfaces.len(), 2);
}

#[test]
fn test_generic_constructor() {
    // `<T> C(T t) {}` is a constructor with its own type parameters.
    let class = parse_class("class C { <T> C(T t){} }");
    assert_eq!(class.members.len(), 1);
    match &class.members[0] {
        Member::Constructor(ctor) => {
            assert_eq!(ctor.name.as_str(), "C");
            assert_eq!(ctor.typeparams.len(), 1);
            assert_eq!(ctor.typeparams[0].name.as_str(), "T");
            assert_eq!(ctor.params.len(), 1);
            match &ctor.params[0] {
                Parameter::Formal(param) => assert_eq!(param.name.as_str(), "t"),
                other => panic!("expected formal parameter, got {:?}", other),
            }
        }
        other => panic!("expected constructor, got {:?}", other),
    }
}

#[test]
fn test_generic_method() {
    let class = parse_class("class C { <T> T id(T t) { return t; } }");
    match &class.members[0] {
        Member::Method(method) => {
            assert_eq!(method.name.as_str(), "id");
            assert_eq!(method.typeparams.len(), 1);
            assert!(method.body.is_some());
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_void_method_and_abstract_method() {
    let class = parse_class("abstract class C { void m() {} abstract int n(); }");
    assert_eq!(class.members.len(), 2);
    match &class.members[0] {
        Member::Method(method) => {
            assert!(matches!(method.return_type, Type::Void(_)));
            assert!(method.body.is_some());
        }
        other => panic!("expected method, got {:?}", other),
    }
    match &class.members[1] {
        Member::Method(method) => {
            assert_eq!(method.modifiers, vec![Modifier::Abstract]);
            assert!(method.body.is_none());
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_method_with_trailing_return_dimensions() {
    // `int m()[] {...}` folds the trailing brackets into the return type.
    let class = parse_class("class C { int m()[] { return null; } }");
    match &class.members[0] {
        Member::Method(method) => match &method.return_type {
            Type::Array(array) => {
                assert_eq!(array.dimensions.len(), 1);
                assert!(matches!(*array.base, Type::Primitive(_)));
            }
            other => panic!("expected array return type, got {:?}", other),
        },
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_array_return_type_with_extra_trailing_dimensions() {
    let class = parse_class("class C { int[] m()[] ; }");
    match &class.members[0] {
        Member::Method(method) => match &method.return_type {
            Type::Array(array) => assert_eq!(array.dimensions.len(), 2),
            other => panic!("expected array return type, got {:?}", other),
        },
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_multi_declarator_field() {
    let class = parse_class("class C { int a = 1, b, c[] = {1, 2}; }");
    match &class.members[0] {
        Member::Field(field) => {
            assert_eq!(field.declarators.len(), 3);
            assert_eq!(field.declarators[0].name.as_str(), "a");
            assert!(field.declarators[1].init.is_none());
            assert_eq!(field.declarators[2].dimensions.len(), 1);
            assert!(field.declarators[2].init.is_some());
        }
        other => panic!("expected field, got {:?}", other),
    }
}

#[test]
fn test_initializer_blocks() {
    let class = parse_class("class C { static { x = 1; } { y = 2; } }");
    assert_eq!(class.members.len(), 2);
    assert!(
        matches!(&class.members[0], Member::Initializer(block) if block.is_static)
    );
    assert!(
        matches!(&class.members[1], Member::Initializer(block) if !block.is_static)
    );
}

#[test]
fn test_variadic_and_receiver_parameters() {
    let class = parse_class("class C { void m(C this, int a, String... rest) {} }");
    match &class.members[0] {
        Member::Method(method) => {
            assert_eq!(method.params.len(), 3);
            assert!(matches!(method.params[0], Parameter::This(_)));
            assert!(matches!(
                &method.params[2],
                Parameter::Formal(p) if p.variadic
            ));
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_qualified_receiver_parameter() {
    let class = parse_class("class Inner { Inner(Outer Outer.this) {} }");
    match &class.members[0] {
        Member::Constructor(ctor) => match &ctor.params[0] {
            Parameter::This(this) => {
                assert_eq!(this.qualifier.as_ref().unwrap().as_str(), "Outer")
            }
            other => panic!("expected receiver parameter, got {:?}", other),
        },
        other => panic!("expected constructor, got {:?}", other),
    }
}

#[test]
fn test_variadic_must_be_last() {
    assert!(parse_str("class C { void m(int... a, int b) {} }", "<test>").is_err());
}

#[test]
fn test_throws_clause() {
    let class = parse_class("class C { void m() throws IOException, SQLException; }");
    match &class.members[0] {
        Member::Method(method) => assert_eq!(method.throws.len(), 2),
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_nested_types() {
    let class = parse_class("class C { class D {} interface I {} enum E { A } }");
    assert_eq!(class.members.len(), 3);
    assert!(matches!(
        &class.members[0],
        Member::Type(TypeDeclaration::Class(_))
    ));
    assert!(matches!(
        &class.members[1],
        Member::Type(TypeDeclaration::Interface(_))
    ));
    assert!(matches!(
        &class.members[2],
        Member::Type(TypeDeclaration::Enum(_))
    ));
}

#[test]
fn test_interface_members() {
    let decl = parse_type_decl(
        "interface I extends A, B { int CONST = 1; default int m() { return CONST; } int n(); }",
    );
    let interface = match decl {
        TypeDeclaration::Interface(interface) => interface,
        other => panic!("expected interface, got {:?}", other),
    };
    assert_eq!(interface.interfaces.len(), 2);
    assert_eq!(interface.members.len(), 3);
    match &interface.members[1] {
        Member::Method(method) => assert_eq!(method.modifiers, vec![Modifier::Default]),
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_interface_field_requires_initializer() {
    assert!(parse_str("interface I { int X; }", "<test>").is_err());
}

#[test]
fn test_enum_body() {
    let decl = parse_type_decl(
        "enum Planet { MERCURY(1), EARTH(2) { void m() {} }, PLUTO; static int n; }",
    );
    let decl = match decl {
        TypeDeclaration::Enum(decl) => decl,
        other => panic!("expected enum, got {:?}", other),
    };
    assert_eq!(decl.fields.len(), 3);
    assert_eq!(decl.fields[0].name.as_str(), "MERCURY");
    assert!(decl.fields[0].args.is_some());
    assert!(decl.fields[1].members.is_some());
    assert!(decl.fields[2].args.is_none());
    assert_eq!(decl.members.len(), 1);
}

#[test]
fn test_enum_trailing_comma() {
    let decl = parse_type_decl("enum E { A, B, }");
    assert!(matches!(decl, TypeDeclaration::Enum(e) if e.fields.len() == 2));
}

#[test]
fn test_annotation_declaration() {
    let decl = parse_type_decl(
        "@interface Anno { String value() default \"x\"; int[] ids(); static int helper() { return 1; } }",
    );
    let decl = match decl {
        TypeDeclaration::Annotation(decl) => decl,
        other => panic!("expected annotation declaration, got {:?}", other),
    };
    assert_eq!(decl.name.as_str(), "Anno");
    assert_eq!(decl.members.len(), 3);
    match &decl.members[0] {
        Member::Property(property) => {
            assert_eq!(property.name.as_str(), "value");
            assert!(property.default.is_some());
        }
        other => panic!("expected annotation property, got {:?}", other),
    }
    assert!(matches!(&decl.members[1], Member::Property(_)));
    assert!(matches!(&decl.members[2], Member::Method(_)));
}

#[test]
fn test_annotations_on_members() {
    let class = parse_class("class C { @Override public String toString() { return \"\"; } }");
    match &class.members[0] {
        Member::Method(method) => {
            assert_eq!(method.annotations.len(), 1);
            assert_eq!(method.annotations[0].ty.name.as_str(), "Override");
            assert_eq!(method.modifiers, vec![Modifier::Public]);
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn test_member_javadoc() {
    let class = parse_class("class C { /** Does things. */ void m() {} int x; }");
    match &class.members[0] {
        Member::Method(method) => {
            assert_eq!(method.doc.as_deref(), Some("/** Does things. */"))
        }
        other => panic!("expected method, got {:?}", other),
    }
    match &class.members[1] {
        Member::Field(field) => assert_eq!(field.doc, None),
        other => panic!("expected field, got {:?}", other),
    }
}

#[test]
fn test_sealed_modifiers() {
    let class = parse_class("sealed class C {}");
    assert_eq!(class.modifiers, vec![Modifier::Sealed]);
    let class = parse_class("non-sealed class D {}");
    assert_eq!(class.modifiers, vec![Modifier::NonSealed]);
}
