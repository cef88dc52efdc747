//! Integration tests for the public parsing API, following an
//! `api_integration_tests.rs`-style pattern of calling the pure API surface
//! and asserting on the resulting JSON structure rather than string equality
//! against a golden file.

use es5ast::api::{parse_to_json, OutputStyle};
use serde_json::Value;

fn parse(source: &str) -> Value {
    let json = parse_to_json(source, OutputStyle::Compact).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// The `body` array of a parsed `Program`, for tests that only care about
/// the statement list.
fn body(source: &str) -> Value {
    let ast = parse(source);
    assert_eq!(ast["type"], "Program");
    ast["body"].clone()
}

#[test]
fn root_is_a_program_object() {
    let ast = parse("1;");
    assert_eq!(ast["type"], "Program");
    assert!(ast["body"].is_array());
}

#[test]
fn empty_program_has_an_empty_body() {
    let ast = parse("");
    assert_eq!(ast["type"], "Program");
    assert_eq!(ast["body"].as_array().unwrap().len(), 0);
}

#[test]
fn parses_a_binary_expression_statement() {
    let ast = body("1 + 2;");
    let expr = &ast[0]["expression"];
    assert_eq!(expr["type"], "BinaryExpression");
    assert_eq!(expr["operator"], "+");
    assert_eq!(expr["left"]["value"], 1.0);
    assert_eq!(expr["right"]["value"], 2.0);
}

#[test]
fn parses_a_var_statement_with_two_declarators() {
    let ast = body("var x = 1, y = 2;");
    assert_eq!(ast[0]["type"], "VariableDeclaration");
    assert_eq!(ast[0]["kind"], "var");
    let decls = ast[0]["declarations"].as_array().unwrap();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0]["id"]["name"], "x");
    assert_eq!(decls[1]["id"]["name"], "y");
}

#[test]
fn parses_if_else() {
    let ast = body("if (a) b(); else c();");
    assert_eq!(ast[0]["type"], "IfStatement");
    assert_eq!(ast[0]["test"]["name"], "a");
    assert!(!ast[0]["alternate"].is_null());
}

#[test]
fn parses_for_in_over_a_var_binding() {
    let ast = body("for (var k in obj) { use(k); }");
    assert_eq!(ast[0]["type"], "ForInStatement");
    assert_eq!(ast[0]["left"]["type"], "VariableDeclaration");
    assert_eq!(ast[0]["right"]["name"], "obj");
}

#[test]
fn parses_a_function_declaration_with_two_params() {
    let ast = body("function f(a, b) { return a + b; }");
    assert_eq!(ast[0]["type"], "FunctionDeclaration");
    assert_eq!(ast[0]["id"]["name"], "f");
    let params = ast[0]["params"].as_array().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0]["name"], "a");
    assert_eq!(params[1]["name"], "b");
}

#[test]
fn switch_statement_folds_cases_back_into_source_order() {
    let source = r#"
        switch (x) {
            case 1: a(); break;
            case 2: b(); break;
            default: c(); break;
            case 3: d(); break;
        }
    "#;
    let ast = body(source);
    assert_eq!(ast[0]["type"], "SwitchStatement");
    let cases = ast[0]["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 4);
    assert_eq!(cases[0]["test"]["value"], 1.0);
    assert_eq!(cases[1]["test"]["value"], 2.0);
    assert!(cases[2]["test"].is_null()); // default
    assert_eq!(cases[3]["test"]["value"], 3.0);
}

#[test]
fn automatic_semicolon_insertion_closes_a_statement_at_a_line_break() {
    let ast = body("var x = 1\nvar y = 2\n");
    assert_eq!(ast.as_array().unwrap().len(), 2);
}

#[test]
fn labeled_statement_is_distinguished_from_an_expression_statement() {
    let ast = body("outer: while (true) { break outer; }");
    assert_eq!(ast[0]["type"], "LabeledStatement");
    assert_eq!(ast[0]["label"]["name"], "outer");
    assert_eq!(ast[0]["body"]["type"], "WhileStatement");
}

#[test]
fn identifier_expression_statement_still_parses_after_disambiguation() {
    let ast = body("a.b.c();");
    let call = &ast[0]["expression"];
    assert_eq!(call["type"], "CallExpression");
    assert_eq!(call["callee"]["type"], "MemberExpression");
}

#[test]
fn division_and_regex_are_disambiguated_by_context() {
    let div = body("a = b / c / d;");
    assert_eq!(div[0]["expression"]["type"], "AssignmentExpression");

    let regex = body("var r = /abc/g;");
    assert_eq!(regex[0]["declarations"][0]["init"]["type"], "Literal");
    assert_eq!(regex[0]["declarations"][0]["init"]["regex"]["pattern"], "abc");
    assert_eq!(regex[0]["declarations"][0]["init"]["regex"]["flags"], "g");
}

#[test]
fn try_catch_finally_round_trips() {
    let ast = body("try { risky(); } catch (e) { handle(e); } finally { cleanup(); }");
    assert_eq!(ast[0]["type"], "TryStatement");
    assert_eq!(ast[0]["handler"]["param"]["name"], "e");
    assert!(!ast[0]["finalizer"].is_null());
}

#[test]
fn reports_a_syntax_error_with_a_line_number() {
    let err = parse_to_json("if (x {", OutputStyle::Compact).unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn pretty_output_is_multiline_and_compact_is_not() {
    let pretty = parse_to_json("1;", OutputStyle::Pretty).unwrap();
    let compact = parse_to_json("1;", OutputStyle::Compact).unwrap();
    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));
}
