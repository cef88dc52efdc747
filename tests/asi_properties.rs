//! Property-based coverage of Automatic Semicolon Insertion and
//! parenthesization, using `proptest` to generate small well-formed
//! expressions at bounded depth.

use es5ast::api::{parse_to_json, OutputStyle};
use proptest::prelude::*;

/// A small bounded grammar of arithmetic expressions over single-letter
/// identifiers, built depth-first so `proptest` can shrink failures.
fn arith_expr() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["a", "b", "c", "1", "2"]).prop_map(String::from);
    leaf.prop_recursive(4, 64, 4, |inner| {
        prop_oneof![
            (inner.clone(), "[+\\-*/]", inner.clone())
                .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
        ]
    })
}

/// Strips `loc` fields so two ASTs can be compared on shape alone; wrapping
/// an expression in parentheses shifts every inner position by one column,
/// so position data must be ignored for a pure "same shape" comparison.
fn strip_loc(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("loc");
            for v in map.values_mut() {
                strip_loc(v);
            }
        }
        serde_json::Value::Array(items) => {
            for v in items.iter_mut() {
                strip_loc(v);
            }
        }
        _ => {}
    }
}

proptest! {
    /// A statement built from any such expression, with or without a
    /// trailing semicolon, parses to the same AST either way: ASI treats
    /// end-of-input as an implicit statement terminator.
    #[test]
    fn asi_at_eof_matches_an_explicit_semicolon(expr in arith_expr()) {
        let with_semi = parse_to_json(&format!("{expr};"), OutputStyle::Compact).unwrap();
        let without_semi = parse_to_json(&expr, OutputStyle::Compact).unwrap();

        let mut with_semi: serde_json::Value = serde_json::from_str(&with_semi).unwrap();
        let mut without_semi: serde_json::Value = serde_json::from_str(&without_semi).unwrap();
        strip_loc(&mut with_semi);
        strip_loc(&mut without_semi);
        prop_assert_eq!(with_semi, without_semi);
    }

    /// Wrapping any such expression in an extra pair of parentheses does
    /// not change its parsed shape: parenthesization groups but never
    /// restructures a syntactically complete expression.
    #[test]
    fn redundant_parens_do_not_change_the_expression_shape(expr in arith_expr()) {
        let inner = parse_to_json(&format!("{expr};"), OutputStyle::Compact).unwrap();
        let wrapped = parse_to_json(&format!("({expr});"), OutputStyle::Compact).unwrap();

        let mut inner: serde_json::Value = serde_json::from_str(&inner).unwrap();
        let mut wrapped: serde_json::Value = serde_json::from_str(&wrapped).unwrap();
        strip_loc(&mut inner);
        strip_loc(&mut wrapped);
        prop_assert_eq!(&inner["body"][0]["expression"], &wrapped["body"][0]["expression"]);
    }
}
