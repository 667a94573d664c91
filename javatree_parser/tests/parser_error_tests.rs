//! Error taxonomy tests
//!
//! Every error message family must be reachable by a concrete input, and
//! the reported position must point at the offending token.

use javatree_parser::parse_str;
use javatree_parser::SyntaxError;

fn parse_err(source: &str) -> SyntaxError {
    parse_str(source, "Bad.java").expect_err("expected a syntax error")
}

#[test]
fn test_expected_token() {
    let err = parse_err("class C { int x = 1 }");
    assert!(err.message.starts_with("expected"), "{}", err.message);
    assert!(err.message.contains("';'"), "{}", err.message);
    assert_eq!(err.got_token.as_deref(), Some("}"));
    assert!(err.to_string().contains("Bad.java"));
}

#[test]
fn test_error_position_points_at_offending_token() {
    let err = parse_err("class C {\n    int x = ;\n}");
    assert_eq!(err.line, 2);
    assert_eq!(err.col, 13);
    assert_eq!(err.line_text, "    int x = ;");
}

#[test]
fn test_illegal_start_of_expression() {
    let err = parse_err("class C { void m() { int x = %; } }");
    assert!(
        err.message.contains("illegal start of expression"),
        "{}",
        err.message
    );
}

#[test]
fn test_list_and_map_literal_stubs() {
    // `[` and `{` do not begin expressions in Java; the stubs report the
    // same error as any other bad expression start.
    let err = parse_err("class C { void m() { x = [1]; } }");
    assert!(err.message.contains("illegal start of expression"));

    let err = parse_err("class C { void m() { x = {1}; } }");
    assert!(err.message.contains("illegal start of expression"));
}

#[test]
fn test_unexpected_eof() {
    let err = parse_err("class C { void m() { return ");
    assert!(
        err.message.contains("reached end of file while parsing"),
        "{}",
        err.message
    );

    let err = parse_err("class C {");
    assert!(err.message.contains("end of file"), "{}", err.message);
    assert_eq!(err.got_token.as_deref(), Some(""));
}

#[test]
fn test_else_without_if() {
    let err = parse_err("class C { void m() { else; } }");
    assert!(err.message.contains("'else' without 'if'"), "{}", err.message);
}

#[test]
fn test_case_outside_switch() {
    let err = parse_err("class C { void m() { case 1: x(); } }");
    assert!(err.message.contains("'case' outside 'switch'"), "{}", err.message);

    let err = parse_err("class C { void m() { default: x(); } }");
    assert!(
        err.message.contains("'default' outside 'switch'"),
        "{}",
        err.message
    );
}

#[test]
fn test_super_without_member_access() {
    let err = parse_err("class C { void m() { x = super; } }");
    assert!(
        err.message
            .contains("'super' must be followed by a member-access expression"),
        "{}",
        err.message
    );
}

// ==================== 'var' as a type name ====================

#[test]
fn test_var_as_class_name() {
    let err = parse_err("class var {}");
    assert!(
        err.message.contains("'var' cannot be used as a type name"),
        "{}",
        err.message
    );
}

#[test]
fn test_var_local_declaration_is_fine() {
    assert!(parse_str("class C { void m() { var x = 1; } }", "<test>").is_ok());
}

#[test]
fn test_var_in_uses_directive() {
    let err = parse_err("module m { uses foo.var; }");
    assert!(err.message.contains("'var' cannot be used as a type name"));
}

#[test]
fn test_var_in_creator() {
    let err = parse_err("class C { void m() { x = new var(); } }");
    assert!(err.message.contains("'var' cannot be used as a type name"));
}

#[test]
fn test_var_as_parameter_type() {
    let err = parse_err("class C { void m(var x) {} }");
    assert!(err.message.contains("'var' cannot be used as a type name"));
}

#[test]
fn test_var_as_field_type() {
    let err = parse_err("class C { var x = 1; }");
    assert!(err.message.contains("'var' cannot be used as a type name"));
}

// ==================== Structural rejections ====================

#[test]
fn test_repeated_modifier() {
    let err = parse_err("class C { public public int x = 1; }");
    assert!(err.message.contains("repeated modifier"), "{}", err.message);
}

#[test]
fn test_missing_type_declaration_keyword() {
    let err = parse_err("public int x;");
    assert!(
        err.message
            .contains("expected 'class', 'interface', 'enum', or '@interface'"),
        "{}",
        err.message
    );
}

#[test]
fn test_bad_directive() {
    let err = parse_err("module m { imports x; }");
    assert!(
        err.message
            .contains("expected 'requires', 'exports', 'opens', 'uses', or 'provides'"),
        "{}",
        err.message
    );
}

#[test]
fn test_both_alternatives_failing_reports_cause() {
    // Neither a declaration nor a statement: the later error carries the
    // earlier one as its cause.
    let err = parse_err("class C { void m() { foo bar baz; } }");
    assert!(err.cause.is_some());
}

#[test]
fn test_errors_inside_speculation_do_not_leak() {
    // The failed variable-declaration attempt must not clobber a
    // successful expression-statement reparse.
    assert!(parse_str("class C { void m() { a * b; } }", "<test>").is_ok());
}
