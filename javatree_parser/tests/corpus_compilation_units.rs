//! Compilation unit corpus tests
//!
//! Packages, imports, module declarations and Javadoc attachment.

use javatree_parser::ast::{
    CompilationUnit, Directive, Modifier, OrdinaryCompilationUnit, TypeDeclaration,
};
use javatree_parser::parse_str;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> CompilationUnit {
    parse_str(source, "<test>").expect("parse failed")
}

fn parse_ordinary(source: &str) -> OrdinaryCompilationUnit {
    match parse(source) {
        CompilationUnit::Ordinary(unit) => unit,
        other => panic!("expected ordinary compilation unit, got {:?}", other),
    }
}

#[test]
fn test_package_and_class() {
    let unit = parse_ordinary("package a.b; class C {}");
    assert_eq!(unit.package.as_ref().unwrap().name.as_str(), "a.b");
    assert_eq!(unit.imports.len(), 0);
    assert_eq!(unit.types.len(), 1);
    match &unit.types[0] {
        TypeDeclaration::Class(class) => assert_eq!(class.name.as_str(), "C"),
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_empty_compilation_unit() {
    let unit = parse_ordinary("");
    assert!(unit.package.is_none());
    assert!(unit.imports.is_empty());
    assert!(unit.types.is_empty());
}

#[test]
fn test_static_wildcard_import() {
    let unit = parse_ordinary("import static a.B.*;");
    assert_eq!(unit.imports.len(), 1);
    let import = &unit.imports[0];
    assert_eq!(import.name.as_str(), "a.B");
    assert!(import.is_static);
    assert!(import.wildcard);
}

#[test]
fn test_plain_import() {
    let unit = parse_ordinary("import java.util.List; class C {}");
    let import = &unit.imports[0];
    assert_eq!(import.name.as_str(), "java.util.List");
    assert!(!import.is_static);
    assert!(!import.wildcard);
}

#[test]
fn test_annotated_package() {
    let unit = parse_ordinary("@Generated package a.b;");
    let package = unit.package.unwrap();
    assert_eq!(package.annotations.len(), 1);
    assert_eq!(package.annotations[0].ty.name.as_str(), "Generated");
}

#[test]
fn test_stray_semicolons_between_types() {
    let unit = parse_ordinary("class A {} ; class B {} ;");
    assert_eq!(unit.types.len(), 2);
}

#[test]
fn test_module_declaration() {
    let unit = parse("module m { requires transitive x; exports p to q, r; }");
    let module = match unit {
        CompilationUnit::Module(module) => module,
        other => panic!("expected module compilation unit, got {:?}", other),
    };
    assert_eq!(module.name.as_str(), "m");
    assert!(!module.open);
    assert_eq!(module.members.len(), 2);

    match &module.members[0] {
        Directive::Requires {
            name, modifiers, ..
        } => {
            assert_eq!(name.as_str(), "x");
            assert_eq!(modifiers, &[Modifier::Transitive]);
        }
        other => panic!("expected requires, got {:?}", other),
    }
    match &module.members[1] {
        Directive::Exports { name, to, .. } => {
            assert_eq!(name.as_str(), "p");
            let to: Vec<_> = to.iter().map(|n| n.as_str()).collect();
            assert_eq!(to, ["q", "r"]);
        }
        other => panic!("expected exports, got {:?}", other),
    }
}

#[test]
fn test_open_module_with_all_directives() {
    let unit = parse(
        "open module a.b {
            requires static c;
            opens p.q to m1;
            uses com.example.Service;
            provides com.example.Service with com.example.Impl, com.example.Other;
        }",
    );
    let module = match unit {
        CompilationUnit::Module(module) => module,
        other => panic!("expected module, got {:?}", other),
    };
    assert!(module.open);
    assert_eq!(module.members.len(), 4);
    match &module.members[3] {
        Directive::Provides { name, provides, .. } => {
            assert_eq!(name.as_str(), "com.example.Service");
            assert_eq!(provides.len(), 2);
        }
        other => panic!("expected provides, got {:?}", other),
    }
}

#[test]
fn test_module_with_imports() {
    let unit = parse("import a.B; module m { uses B; }");
    assert!(matches!(&unit, CompilationUnit::Module(m) if m.imports.len() == 1));
}

#[test]
fn test_javadoc_attaches_to_declaration() {
    let unit = parse_ordinary("/** The class. */ class C {}");
    match &unit.types[0] {
        TypeDeclaration::Class(class) => {
            assert_eq!(class.doc.as_deref(), Some("/** The class. */"));
        }
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_javadoc_after_package() {
    let unit = parse_ordinary("/** pkg */ package a; /** cls */ class C {}");
    assert_eq!(unit.package.as_ref().unwrap().doc.as_deref(), Some("/** pkg */"));
    match &unit.types[0] {
        TypeDeclaration::Class(class) => {
            assert_eq!(class.doc.as_deref(), Some("/** cls */"));
        }
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_plain_comments_are_not_javadoc() {
    let unit = parse_ordinary("/* nope */ class A {} /**/ class B {}");
    for ty in &unit.types {
        match ty {
            TypeDeclaration::Class(class) => assert_eq!(class.doc, None),
            other => panic!("expected class, got {:?}", other),
        }
    }
}

#[test]
fn test_line_comment_is_not_javadoc() {
    let unit = parse_ordinary("// not docs\nclass C {}");
    match &unit.types[0] {
        TypeDeclaration::Class(class) => assert_eq!(class.doc, None),
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_modifiers_before_import_rejected() {
    let err = parse_str("public import a.B; class C {}", "<test>").unwrap_err();
    assert!(err
        .message
        .contains("expected 'class', 'interface', '@interface', or 'enum'"));
}

#[test]
fn test_trailing_garbage_rejected() {
    assert!(parse_str("class C {} 42", "<test>").is_err());
}
