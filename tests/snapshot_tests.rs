//! Whole-program ESTree JSON snapshots for a handful of concrete end-to-end
//! scenarios, using `insta` the way corpus-driven tests elsewhere in this
//! style of codebase point callers at `insta::assert_yaml_snapshot!` for
//! AST comparison.
//!
//! Node positions (`loc`) are redacted to a fixed placeholder before
//! snapshotting: two programs with the same shape but different source
//! spacing would otherwise produce spurious diffs on line/column alone.

use es5ast::api::{parse_to_json, OutputStyle};
use serde_json::{json, Value};

fn redact_loc(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("loc") {
                map.insert("loc".to_string(), json!("<loc>"));
            }
            for v in map.values_mut() {
                redact_loc(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                redact_loc(v);
            }
        }
        _ => {}
    }
}

fn parse_redacted(source: &str) -> String {
    let json = parse_to_json(source, OutputStyle::Pretty).unwrap();
    let mut value: Value = serde_json::from_str(&json).unwrap();
    redact_loc(&mut value);
    serde_json::to_string_pretty(&value).unwrap()
}

#[test]
fn snapshot_of_a_binary_expression_statement() {
    let ast = parse_redacted("1 + 2;");
    insta::assert_snapshot!(ast, @r#"
    {
      "body": [
        {
          "expression": {
            "left": {
              "loc": "<loc>",
              "type": "Literal",
              "value": 1.0
            },
            "loc": "<loc>",
            "operator": "+",
            "right": {
              "loc": "<loc>",
              "type": "Literal",
              "value": 2.0
            },
            "type": "BinaryExpression"
          },
          "loc": "<loc>",
          "type": "ExpressionStatement"
        }
      ],
      "loc": "<loc>",
      "type": "Program"
    }
    "#);
}

#[test]
fn snapshot_of_a_var_statement_with_two_declarators() {
    let ast = parse_redacted("var x = 1, y = 2;");
    insta::assert_snapshot!(ast, @r#"
    {
      "body": [
        {
          "declarations": [
            {
              "id": {
                "name": "x",
                "type": "Identifier"
              },
              "init": {
                "loc": "<loc>",
                "type": "Literal",
                "value": 1.0
              },
              "loc": "<loc>",
              "type": "VariableDeclarator"
            },
            {
              "id": {
                "name": "y",
                "type": "Identifier"
              },
              "init": {
                "loc": "<loc>",
                "type": "Literal",
                "value": 2.0
              },
              "loc": "<loc>",
              "type": "VariableDeclarator"
            }
          ],
          "kind": "var",
          "loc": "<loc>",
          "type": "VariableDeclaration"
        }
      ],
      "loc": "<loc>",
      "type": "Program"
    }
    "#);
}

#[test]
fn snapshot_of_an_empty_program() {
    let ast = parse_redacted("");
    insta::assert_snapshot!(ast, @r#"
    {
      "body": [],
      "loc": "<loc>",
      "type": "Program"
    }
    "#);
}
