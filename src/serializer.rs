//! Tree-to-ESTree-JSON serialization: one pass over the tree, one arm per
//! node kind.
//!
//! Two deliberate departures from a literal line-by-line port of a
//! reference implementation's own dump logic:
//!
//! - the `<=`/`>=` operator-to-text swap bug in the reference is fixed;
//! - `\v` is still emitted as the literal two-character escape `\v` when
//!   re-printing string/regex text, reproducing the reference's quirk
//!   rather than correcting it to the real U+000B character.
//!
//! A third, undocumented reference bug, `AssignLeftShift`/`AssignRightShift`
//! text swapped the same way as `<=`/`>=`, is fixed here too, for the same
//! reason: nothing marks it a deliberate compatibility quirk to preserve.

use serde_json::{json, Map, Value};

use crate::arena::{Arena, NodeId};
use crate::ast::{NodeKind, Operator, Position};

pub struct Serializer<'a> {
    arena: &'a Arena,
}

impl<'a> Serializer<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena }
    }

    /// The root `SourceElements` node serializes to the statement list
    /// alone (the same shape a nested `SourceElements` gets as a
    /// `BlockStatement`'s `body`); the whole-program wrapper is added here
    /// rather than in `node`, since a `Program` only exists at the root.
    pub fn serialize(&self, root: NodeId) -> Value {
        let n = self.arena.get(root);
        let loc = self.loc(n.start, n.end);
        let body = self.node(root);
        json!({
            "type": "Program",
            "body": body,
            "loc": loc,
        })
    }

    pub fn to_json_string(&self, root: NodeId, compact: bool) -> String {
        let value = self.serialize(root);
        if compact {
            serde_json::to_string(&value)
        } else {
            serde_json::to_string_pretty(&value)
        }
        .expect("ESTree value is always representable as JSON")
    }

    fn loc(&self, start: Position, end: Position) -> Value {
        json!({
            "start": { "line": start.line, "column": start.column },
            "end": { "line": end.line, "column": end.column },
        })
    }

    fn child(&self, id: Option<NodeId>) -> Value {
        match id {
            Some(id) => self.node(id),
            None => Value::Null,
        }
    }

    fn node(&self, id: NodeId) -> Value {
        let n = self.arena.get(id);
        let start = n.start;
        let end = n.end;
        let mut obj = Map::new();
        obj.insert("loc".to_string(), self.loc(start, end));

        match n.kind {
            NodeKind::Null => {
                obj.insert("type".to_string(), json!("Literal"));
                obj.insert("value".to_string(), Value::Null);
            }
            NodeKind::Boolean => {
                obj.insert("type".to_string(), json!("Literal"));
                obj.insert("value".to_string(), json!(n.boolean));
            }
            NodeKind::Number => {
                obj.insert("type".to_string(), json!("Literal"));
                obj.insert("value".to_string(), json!(n.number));
            }
            NodeKind::String => {
                obj.insert("type".to_string(), json!("Literal"));
                let raw = n.string.as_deref().unwrap_or_default();
                obj.insert("value".to_string(), json!(escape_string_value(raw)));
            }
            NodeKind::Regex => {
                obj.insert("type".to_string(), json!("Literal"));
                let pattern = n.identifier.as_ref().map(|i| i.as_str()).unwrap_or("");
                let flags = n.string.as_deref().unwrap_or("");
                obj.insert("regex".to_string(), json!({ "pattern": pattern, "flags": flags }));
            }
            NodeKind::This => {
                obj.insert("type".to_string(), json!("ThisExpression"));
            }
            NodeKind::Resolve => {
                obj.insert("type".to_string(), json!("Identifier"));
                obj.insert(
                    "name".to_string(),
                    json!(n.identifier.as_ref().map(|i| i.as_str()).unwrap_or("")),
                );
            }
            NodeKind::IdentifierExpression => {
                obj.insert("type".to_string(), json!("Identifier"));
                obj.insert(
                    "name".to_string(),
                    json!(n.identifier.as_ref().map(|i| i.as_str()).unwrap_or("")),
                );
            }
            // `ElementList`/`PropertyList` name the reference's intermediate
            // linked-list nodes for array elements and object properties;
            // this builder collects both directly into their parent's
            // `children` instead of materializing a separate list node, so
            // neither kind is ever actually allocated.
            NodeKind::ElementList | NodeKind::PropertyList => {
                unreachable!("{:?} is never constructed by this builder", n.kind)
            }
            NodeKind::Array => {
                obj.insert("type".to_string(), json!("ArrayExpression"));
                let elements: Vec<Value> = n.children.iter().map(|c| self.child(*c)).collect();
                obj.insert("elements".to_string(), Value::Array(elements));
            }
            NodeKind::ObjectLiteral => {
                obj.insert("type".to_string(), json!("ObjectExpression"));
                let properties: Vec<Value> =
                    n.children.iter().filter_map(|c| c.map(|id| self.node(id))).collect();
                obj.insert("properties".to_string(), Value::Array(properties));
            }
            NodeKind::Property => {
                obj.insert("type".to_string(), json!("Property"));
                obj.insert("key".to_string(), identifier_node(&n.identifier));
                obj.insert("value".to_string(), self.child(n.child(0)));
                obj.insert("kind".to_string(), json!(property_kind_text(n.property_kind)));
            }
            NodeKind::BinaryExpression => {
                obj.insert("type".to_string(), json!("BinaryExpression"));
                obj.insert("operator".to_string(), json!(operator_text(n.operator.unwrap())));
                obj.insert("left".to_string(), self.child(n.child(0)));
                obj.insert("right".to_string(), self.child(n.child(1)));
            }
            NodeKind::AssignmentExpression => {
                obj.insert("type".to_string(), json!("AssignmentExpression"));
                obj.insert("operator".to_string(), json!(operator_text(n.operator.unwrap())));
                obj.insert("left".to_string(), self.child(n.child(0)));
                obj.insert("right".to_string(), self.child(n.child(1)));
            }
            NodeKind::Comma => {
                obj.insert("type".to_string(), json!("SequenceExpression"));
                let expressions: Vec<Value> = n.children.iter().map(|c| self.child(*c)).collect();
                obj.insert("expressions".to_string(), Value::Array(expressions));
            }
            NodeKind::ConditionalExpression => {
                obj.insert("type".to_string(), json!("ConditionalExpression"));
                obj.insert("test".to_string(), self.child(n.child(0)));
                obj.insert("consequent".to_string(), self.child(n.child(1)));
                obj.insert("alternate".to_string(), self.child(n.child(2)));
            }
            NodeKind::Unary => {
                obj.insert("type".to_string(), json!("UnaryExpression"));
                obj.insert("operator".to_string(), json!(operator_text(n.operator.unwrap())));
                obj.insert("prefix".to_string(), json!(true));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::Void => {
                obj.insert("type".to_string(), json!("UnaryExpression"));
                obj.insert("operator".to_string(), json!("void"));
                obj.insert("prefix".to_string(), json!(true));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::Prefix => {
                obj.insert("type".to_string(), json!("UpdateExpression"));
                obj.insert("operator".to_string(), json!(operator_text(n.operator.unwrap())));
                obj.insert("prefix".to_string(), json!(true));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::Postfix => {
                obj.insert("type".to_string(), json!("UpdateExpression"));
                obj.insert("operator".to_string(), json!(operator_text(n.operator.unwrap())));
                obj.insert("prefix".to_string(), json!(false));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::DotAccess => {
                obj.insert("type".to_string(), json!("MemberExpression"));
                obj.insert("computed".to_string(), json!(false));
                obj.insert("object".to_string(), self.child(n.child(0)));
                obj.insert("property".to_string(), identifier_node(&n.identifier));
            }
            NodeKind::BracketAccess => {
                obj.insert("type".to_string(), json!("MemberExpression"));
                obj.insert("computed".to_string(), json!(true));
                obj.insert("object".to_string(), self.child(n.child(0)));
                obj.insert("property".to_string(), self.child(n.child(1)));
            }
            NodeKind::New => {
                obj.insert("type".to_string(), json!("NewExpression"));
                obj.insert("callee".to_string(), self.child(n.child(0)));
                let args = match n.child(1) {
                    Some(id) => self.arguments_list(id),
                    None => Value::Array(Vec::new()),
                };
                obj.insert("arguments".to_string(), args);
            }
            NodeKind::FunctionCall => {
                obj.insert("type".to_string(), json!("CallExpression"));
                obj.insert("callee".to_string(), self.child(n.child(0)));
                let args = n.child(1).map(|id| self.arguments_list(id)).unwrap_or(Value::Array(Vec::new()));
                obj.insert("arguments".to_string(), args);
            }
            NodeKind::Arguments => {
                // Only ever reached directly when dumping a standalone
                // argument list (tests); function calls inline it above.
                return Value::Array(n.children.iter().map(|c| self.child(*c)).collect());
            }
            NodeKind::ArgumentsList => {
                return Value::Array(n.children.iter().map(|c| self.child(*c)).collect());
            }
            NodeKind::SourceElements => {
                return Value::Array(n.children.iter().map(|c| self.child(*c)).collect());
            }
            NodeKind::Block => {
                obj.insert("type".to_string(), json!("BlockStatement"));
                let body = match n.child(0) {
                    Some(id) => self.node(id),
                    None => Value::Array(Vec::new()),
                };
                obj.insert("body".to_string(), body);
            }
            NodeKind::EmptyStatement => {
                obj.insert("type".to_string(), json!("EmptyStatement"));
            }
            NodeKind::ExpressionStatement => {
                obj.insert("type".to_string(), json!("ExpressionStatement"));
                obj.insert("expression".to_string(), self.child(n.child(0)));
            }
            NodeKind::ConstDeclaration => {
                obj.insert("type".to_string(), json!("VariableDeclarator"));
                obj.insert(
                    "id".to_string(),
                    json!({
                        "type": "Identifier",
                        "name": n.identifier.as_ref().map(|i| i.as_str()).unwrap_or(""),
                    }),
                );
                obj.insert("init".to_string(), self.child(n.child(0)));
            }
            NodeKind::VariableDeclaration => {
                obj.insert("type".to_string(), json!("VariableDeclaration"));
                obj.insert("kind".to_string(), json!("var"));
                let declarations: Vec<Value> = n.children.iter().map(|c| self.child(*c)).collect();
                obj.insert("declarations".to_string(), Value::Array(declarations));
            }
            NodeKind::ConstStatement => {
                obj.insert("type".to_string(), json!("VariableDeclaration"));
                obj.insert("kind".to_string(), json!("const"));
                let declarations: Vec<Value> = n.children.iter().map(|c| self.child(*c)).collect();
                obj.insert("declarations".to_string(), Value::Array(declarations));
            }
            NodeKind::If => {
                obj.insert("type".to_string(), json!("IfStatement"));
                obj.insert("test".to_string(), self.child(n.child(0)));
                obj.insert("consequent".to_string(), self.child(n.child(1)));
                obj.insert("alternate".to_string(), self.child(n.child(2)));
            }
            NodeKind::DoWhile => {
                obj.insert("type".to_string(), json!("DoWhileStatement"));
                obj.insert("body".to_string(), self.child(n.child(0)));
                obj.insert("test".to_string(), self.child(n.child(1)));
            }
            NodeKind::While => {
                obj.insert("type".to_string(), json!("WhileStatement"));
                obj.insert("test".to_string(), self.child(n.child(0)));
                obj.insert("body".to_string(), self.child(n.child(1)));
            }
            NodeKind::For => {
                obj.insert("type".to_string(), json!("ForStatement"));
                obj.insert("init".to_string(), self.child(n.child(0)));
                obj.insert("test".to_string(), self.child(n.child(1)));
                obj.insert("update".to_string(), self.child(n.child(2)));
                obj.insert("body".to_string(), self.child(n.child(3)));
            }
            NodeKind::ForIn => {
                obj.insert("type".to_string(), json!("ForInStatement"));
                obj.insert("left".to_string(), self.child(n.child(0)));
                obj.insert("right".to_string(), self.child(n.child(1)));
                obj.insert("body".to_string(), self.child(n.child(2)));
            }
            NodeKind::Continue => {
                obj.insert("type".to_string(), json!("ContinueStatement"));
                obj.insert("label".to_string(), identifier_node(&n.identifier));
            }
            NodeKind::Break => {
                obj.insert("type".to_string(), json!("BreakStatement"));
                obj.insert("label".to_string(), identifier_node(&n.identifier));
            }
            NodeKind::Return => {
                obj.insert("type".to_string(), json!("ReturnStatement"));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::With => {
                obj.insert("type".to_string(), json!("WithStatement"));
                obj.insert("object".to_string(), self.child(n.child(0)));
                obj.insert("body".to_string(), self.child(n.child(1)));
            }
            NodeKind::Label => {
                obj.insert("type".to_string(), json!("LabeledStatement"));
                obj.insert("label".to_string(), identifier_node(&n.identifier));
                obj.insert("body".to_string(), self.child(n.child(0)));
            }
            NodeKind::Throw => {
                obj.insert("type".to_string(), json!("ThrowStatement"));
                obj.insert("argument".to_string(), self.child(n.child(0)));
            }
            NodeKind::Try => {
                obj.insert("type".to_string(), json!("TryStatement"));
                obj.insert("block".to_string(), self.child(n.child(0)));
                obj.insert(
                    "handler".to_string(),
                    match n.child(1) {
                        Some(catch_id) => {
                            let mut handler = Map::new();
                            handler.insert("type".to_string(), json!("CatchClause"));
                            handler.insert(
                                "param".to_string(),
                                json!({
                                    "type": "Identifier",
                                    "name": n.identifier.as_ref().map(|i| i.as_str()).unwrap_or(""),
                                }),
                            );
                            handler.insert("body".to_string(), self.node(catch_id));
                            Value::Object(handler)
                        }
                        None => Value::Null,
                    },
                );
                obj.insert("finalizer".to_string(), self.child(n.child(2)));
            }
            NodeKind::Debugger => {
                obj.insert("type".to_string(), json!("DebuggerStatement"));
            }
            NodeKind::Switch => {
                obj.insert("type".to_string(), json!("SwitchStatement"));
                obj.insert("discriminant".to_string(), self.child(n.child(0)));
                let mut cases = Vec::new();
                if let Some(pre) = n.child(1) {
                    cases.extend(self.clause_list(pre));
                }
                if let Some(default) = n.child(2) {
                    cases.push(self.node(default));
                }
                if let Some(post) = n.child(3) {
                    cases.extend(self.clause_list(post));
                }
                obj.insert("cases".to_string(), Value::Array(cases));
            }
            NodeKind::Clause => {
                obj.insert("type".to_string(), json!("SwitchCase"));
                obj.insert("test".to_string(), self.child(n.child(0)));
                let consequent: Vec<Value> =
                    n.children.iter().skip(1).map(|c| self.child(*c)).collect();
                obj.insert("consequent".to_string(), Value::Array(consequent));
            }
            NodeKind::ClauseList => {
                return Value::Array(self.clause_list(id));
            }
            NodeKind::FormalParameterList => {
                return Value::Array(n.children.iter().map(|c| self.child(*c)).collect());
            }
            NodeKind::FunctionBody => {
                obj.insert("type".to_string(), json!("BlockStatement"));
                obj.insert("body".to_string(), self.child(n.child(0)));
            }
            NodeKind::FunctionDecl => {
                obj.insert("type".to_string(), json!("FunctionDeclaration"));
                obj.insert(
                    "id".to_string(),
                    json!({
                        "type": "Identifier",
                        "name": n.identifier.as_ref().map(|i| i.as_str()).unwrap_or(""),
                    }),
                );
                obj.insert("params".to_string(), self.child(n.child(0)));
                obj.insert("body".to_string(), self.child(n.child(1)));
            }
            NodeKind::FunctionExpression => {
                obj.insert("type".to_string(), json!("FunctionExpression"));
                obj.insert(
                    "id".to_string(),
                    match &n.identifier {
                        Some(id) => json!({ "type": "Identifier", "name": id.as_str() }),
                        None => Value::Null,
                    },
                );
                obj.insert("params".to_string(), self.child(n.child(0)));
                obj.insert("body".to_string(), self.child(n.child(1)));
            }
        }

        Value::Object(obj)
    }

    fn arguments_list(&self, id: NodeId) -> Value {
        let n = self.arena.get(id);
        Value::Array(n.children.iter().map(|c| self.child(*c)).collect())
    }

    fn clause_list(&self, id: NodeId) -> Vec<Value> {
        let n = self.arena.get(id);
        n.children.iter().filter_map(|c| c.map(|id| self.node(id))).collect()
    }
}

fn identifier_node(id: &Option<crate::interner::Identifier>) -> Value {
    match id {
        Some(id) => json!({ "type": "Identifier", "name": id.as_str() }),
        None => Value::Null,
    }
}

fn property_kind_text(kind: crate::ast::PropertyKind) -> &'static str {
    use crate::ast::PropertyKind::*;
    match kind {
        Constant => "init",
        Getter => "get",
        Setter => "set",
    }
}

/// Re-escapes a decoded string literal's value for JSON transport,
/// preserving the reference's `\v` quirk: a real U+000B in the source
/// comes back out as the two characters `\` `v` rather than the control
/// character, matching `TreeDumper.cpp`'s `dumpStringChar` branch for it.
fn escape_string_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\u{000B}' {
            out.push('\\');
            out.push('v');
        } else {
            out.push(c);
        }
    }
    out
}

/// Operator-to-text mapping. `<=`/`>=` and the shift-assign pair are the
/// reference's own swap bugs, fixed here (see module doc comment).
fn operator_text(op: Operator) -> &'static str {
    use Operator::*;
    match op {
        Typeof => "typeof",
        Delete => "delete",
        LogicalNot => "!",
        LogicalOr => "||",
        LogicalAnd => "&&",
        BitwiseNot => "~",
        BitwiseOr => "|",
        BitwiseXor => "^",
        BitwiseAnd => "&",
        Equal => "==",
        NotEqual => "!=",
        StrictEqual => "===",
        StrictNotEqual => "!==",
        LessThan => "<",
        GreaterThan => ">",
        LessThanOrEqual => "<=",
        GreaterThanOrEqual => ">=",
        InstanceOf => "instanceof",
        In => "in",
        LeftShift => "<<",
        RightShift => ">>",
        UnsignedRightShift => ">>>",
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Modulus => "%",
        Increment => "++",
        Decrement => "--",
        Assign => "=",
        AssignAdd => "+=",
        AssignSubtract => "-=",
        AssignMultiply => "*=",
        AssignDivide => "/=",
        AssignModulus => "%=",
        AssignLeftShift => "<<=",
        AssignRightShift => ">>=",
        AssignUnsignedRightShift => ">>>=",
        AssignAnd => "&=",
        AssignXor => "^=",
        AssignOr => "|=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::stringbuf::StringBuf;

    fn parse_to_json(source: &str) -> Value {
        let buf = StringBuf::from_source(source);
        let parser = Parser::new(&buf).unwrap();
        let (root, builder) = parser.parse_program().unwrap();
        Serializer::new(builder.arena()).serialize(root)
    }

    #[test]
    fn root_serializes_to_a_program_object() {
        let value = parse_to_json("a;");
        assert_eq!(value["type"], "Program");
        assert!(value["body"].is_array());
        assert_eq!(value["body"][0]["type"], "ExpressionStatement");
    }

    #[test]
    fn empty_program_has_an_empty_body() {
        let value = parse_to_json("");
        assert_eq!(value["type"], "Program");
        assert_eq!(value["body"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn fixes_relational_operator_spelling() {
        let value = parse_to_json("a <= b;");
        let expr = &value["body"][0]["expression"];
        assert_eq!(expr["operator"], "<=");

        let value = parse_to_json("a >= b;");
        let expr = &value["body"][0]["expression"];
        assert_eq!(expr["operator"], ">=");
    }

    #[test]
    fn fixes_shift_assign_operator_spelling() {
        let value = parse_to_json("a <<= b;");
        assert_eq!(value["body"][0]["expression"]["operator"], "<<=");

        let value = parse_to_json("a >>= b;");
        assert_eq!(value["body"][0]["expression"]["operator"], ">>=");
    }

    #[test]
    fn array_elisions_become_null_slots() {
        let value = parse_to_json("[1, , 3];");
        let elements = &value["body"][0]["expression"]["elements"];
        assert_eq!(elements[1], Value::Null);
        assert_eq!(elements[0]["value"], 1.0);
        assert_eq!(elements[2]["value"], 3.0);
    }

    #[test]
    fn var_statement_has_two_declarators() {
        let value = parse_to_json("var x = 1, y = 2;");
        let decl = &value["body"][0];
        assert_eq!(decl["type"], "VariableDeclaration");
        assert_eq!(decl["declarations"].as_array().unwrap().len(), 2);
        assert_eq!(decl["declarations"][0]["id"]["name"], "x");
        assert_eq!(decl["declarations"][1]["id"]["name"], "y");
    }

    #[test]
    fn vertical_tab_escape_is_preserved_as_two_characters() {
        let value = parse_to_json("'\\v';");
        let literal = &value["body"][0]["expression"]["value"];
        assert_eq!(literal, "\\v");
    }
}
