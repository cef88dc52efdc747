//! The pluggable tree-building surface: one factory method per grammar
//! production. The parser is generic over nothing here: this is a plain
//! struct rather than a trait, but every method name matches a single
//! production so a future alternate builder (e.g. one that only counts
//! nodes) could be dropped in by re-implementing this type.

use crate::arena::{Arena, NodeId};
use crate::ast::{Node, NodeKind, Operator, Position, PropertyKind};
use crate::interner::{Identifier, Interner};
use crate::stringbuf::number_to_string;

pub struct Builder {
    arena: Arena,
    interner: Interner,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            interner: Interner::new(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Consumes the builder, handing back just the finished node storage;
    /// the interner has done its job once parsing is complete.
    pub fn into_arena(self) -> Arena {
        self.arena
    }

    pub fn intern(&mut self, text: &str) -> Identifier {
        self.interner.intern(text)
    }

    fn leaf(&self, kind: NodeKind, start: Position, end: Position) -> NodeId {
        self.arena.alloc(Node::new(kind, start, end))
    }

    // --- Literals ---

    pub fn create_null(&self, start: Position, end: Position) -> NodeId {
        self.leaf(NodeKind::Null, start, end)
    }

    pub fn create_boolean(&self, value: bool, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Boolean, start, end);
        node.boolean = value;
        self.arena.alloc(node)
    }

    pub fn create_number(&self, value: f64, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Number, start, end);
        node.number = value;
        self.arena.alloc(node)
    }

    pub fn create_string(&self, value: String, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::String, start, end);
        node.string = Some(value);
        self.arena.alloc(node)
    }

    pub fn create_regex(
        &mut self,
        pattern: &str,
        flags: &str,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Regex, start, end);
        node.identifier = Some(self.interner.intern(pattern));
        node.string = Some(flags.to_string());
        self.arena.alloc(node)
    }

    pub fn this_expr(&self, start: Position, end: Position) -> NodeId {
        self.leaf(NodeKind::This, start, end)
    }

    pub fn create_resolve(&mut self, name: &str, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Resolve, start, end);
        node.identifier = Some(self.interner.intern(name));
        self.arena.alloc(node)
    }

    pub fn create_array(
        &self,
        elements: Vec<Option<NodeId>>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Array, start, end);
        node.children = elements;
        self.arena.alloc(node)
    }

    pub fn create_object_literal(
        &self,
        properties: Vec<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ObjectLiteral, start, end);
        node.children = properties.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    /// Canonicalizes a numeric property key the way the reference's builder
    /// does: `1.0` and `"1"` name the same property.
    pub fn create_property(
        &mut self,
        name: &str,
        value: NodeId,
        kind: PropertyKind,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Property, start, end);
        node.identifier = Some(self.interner.intern(name));
        node.property_kind = kind;
        node.push_child(Some(value));
        self.arena.alloc(node)
    }

    pub fn create_numeric_property_name(value: f64) -> String {
        number_to_string(value)
    }

    // --- Expressions ---

    pub fn make_binary_node(
        &self,
        op: Operator,
        lhs: NodeId,
        rhs: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::BinaryExpression, start, end);
        node.operator = Some(op);
        node.push_child(Some(lhs));
        node.push_child(Some(rhs));
        self.arena.alloc(node)
    }

    pub fn make_assignment_node(
        &self,
        op: Operator,
        target: NodeId,
        value: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::AssignmentExpression, start, end);
        node.operator = Some(op);
        node.push_child(Some(target));
        node.push_child(Some(value));
        self.arena.alloc(node)
    }

    pub fn make_comma_node(&self, left: NodeId, right: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Comma, start, end);
        node.push_child(Some(left));
        node.push_child(Some(right));
        self.arena.alloc(node)
    }

    pub fn create_conditional(
        &self,
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ConditionalExpression, start, end);
        node.push_child(Some(test));
        node.push_child(Some(consequent));
        node.push_child(Some(alternate));
        self.arena.alloc(node)
    }

    pub fn make_unary_node(
        &self,
        op: Operator,
        argument: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Unary, start, end);
        node.operator = Some(op);
        node.push_child(Some(argument));
        self.arena.alloc(node)
    }

    pub fn make_void_node(&self, argument: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Void, start, end);
        node.push_child(Some(argument));
        self.arena.alloc(node)
    }

    pub fn make_prefix_node(
        &self,
        op: Operator,
        argument: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Prefix, start, end);
        node.operator = Some(op);
        node.push_child(Some(argument));
        self.arena.alloc(node)
    }

    pub fn make_postfix_node(
        &self,
        op: Operator,
        argument: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Postfix, start, end);
        node.operator = Some(op);
        node.push_child(Some(argument));
        self.arena.alloc(node)
    }

    pub fn create_dot_access(
        &mut self,
        base: NodeId,
        name: &str,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::DotAccess, start, end);
        node.identifier = Some(self.interner.intern(name));
        node.push_child(Some(base));
        self.arena.alloc(node)
    }

    pub fn create_bracket_access(
        &self,
        base: NodeId,
        subscript: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::BracketAccess, start, end);
        node.push_child(Some(base));
        node.push_child(Some(subscript));
        self.arena.alloc(node)
    }

    pub fn create_new_expr(
        &self,
        callee: NodeId,
        arguments: Option<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::New, start, end);
        node.push_child(Some(callee));
        node.push_child(arguments);
        self.arena.alloc(node)
    }

    pub fn create_function_call(
        &self,
        callee: NodeId,
        arguments: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::FunctionCall, start, end);
        node.push_child(Some(callee));
        node.push_child(Some(arguments));
        self.arena.alloc(node)
    }

    pub fn create_arguments(&self, list: Vec<NodeId>, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Arguments, start, end);
        node.children = list.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    // --- Statements ---

    pub fn create_source_elements(
        &self,
        elements: Vec<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::SourceElements, start, end);
        node.children = elements.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    pub fn create_block(&self, body: Option<NodeId>, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Block, start, end);
        node.push_child(body);
        self.arena.alloc(node)
    }

    pub fn create_empty_statement(&self, start: Position, end: Position) -> NodeId {
        self.leaf(NodeKind::EmptyStatement, start, end)
    }

    pub fn create_expr_statement(&self, expr: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::ExpressionStatement, start, end);
        node.push_child(Some(expr));
        self.arena.alloc(node)
    }

    pub fn create_var_declaration(
        &mut self,
        name: &str,
        init: Option<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ConstDeclaration, start, end);
        node.identifier = Some(self.interner.intern(name));
        node.push_child(init);
        self.arena.alloc(node)
    }

    pub fn create_var_statement(
        &self,
        declarations: Vec<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::VariableDeclaration, start, end);
        node.children = declarations.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    pub fn create_const_statement(
        &self,
        declarations: Vec<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ConstStatement, start, end);
        node.children = declarations.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    pub fn create_if_statement(
        &self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::If, start, end);
        node.push_child(Some(test));
        node.push_child(Some(consequent));
        node.push_child(alternate);
        self.arena.alloc(node)
    }

    pub fn create_do_while(
        &self,
        body: NodeId,
        test: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::DoWhile, start, end);
        node.push_child(Some(body));
        node.push_child(Some(test));
        self.arena.alloc(node)
    }

    pub fn create_while(&self, test: NodeId, body: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::While, start, end);
        node.push_child(Some(test));
        node.push_child(Some(body));
        self.arena.alloc(node)
    }

    pub fn create_for_loop(
        &self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::For, start, end);
        node.push_child(init);
        node.push_child(test);
        node.push_child(update);
        node.push_child(Some(body));
        self.arena.alloc(node)
    }

    pub fn create_for_in_loop(
        &self,
        left: NodeId,
        right: NodeId,
        body: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::ForIn, start, end);
        node.push_child(Some(left));
        node.push_child(Some(right));
        node.push_child(Some(body));
        self.arena.alloc(node)
    }

    pub fn create_continue(
        &mut self,
        label: Option<&str>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Continue, start, end);
        node.identifier = label.map(|l| self.interner.intern(l));
        self.arena.alloc(node)
    }

    pub fn create_break(&mut self, label: Option<&str>, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Break, start, end);
        node.identifier = label.map(|l| self.interner.intern(l));
        self.arena.alloc(node)
    }

    pub fn create_return(&self, value: Option<NodeId>, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Return, start, end);
        node.push_child(value);
        self.arena.alloc(node)
    }

    pub fn create_with_statement(
        &self,
        object: NodeId,
        body: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::With, start, end);
        node.push_child(Some(object));
        node.push_child(Some(body));
        self.arena.alloc(node)
    }

    pub fn create_clause(
        &self,
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Clause, start, end);
        node.push_child(test);
        node.children
            .extend(consequent.into_iter().map(Some));
        self.arena.alloc(node)
    }

    pub fn create_clause_list(&self, clauses: Vec<NodeId>, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::ClauseList, start, end);
        node.children = clauses.into_iter().map(Some).collect();
        self.arena.alloc(node)
    }

    pub fn create_switch_statement(
        &self,
        discriminant: NodeId,
        pre_default: NodeId,
        default_clause: Option<NodeId>,
        post_default: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Switch, start, end);
        node.push_child(Some(discriminant));
        node.push_child(Some(pre_default));
        node.push_child(default_clause);
        node.push_child(Some(post_default));
        self.arena.alloc(node)
    }

    pub fn create_label(
        &mut self,
        name: &str,
        statement: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Label, start, end);
        node.identifier = Some(self.interner.intern(name));
        node.push_child(Some(statement));
        self.arena.alloc(node)
    }

    pub fn create_throw_statement(&self, value: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::Throw, start, end);
        node.push_child(Some(value));
        self.arena.alloc(node)
    }

    pub fn create_try_statement(
        &mut self,
        block: NodeId,
        catch_param: Option<&str>,
        catch_block: Option<NodeId>,
        finally_block: Option<NodeId>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Try, start, end);
        node.identifier = catch_param.map(|p| self.interner.intern(p));
        node.push_child(Some(block));
        node.push_child(catch_block);
        node.push_child(finally_block);
        self.arena.alloc(node)
    }

    pub fn create_debugger(&self, start: Position, end: Position) -> NodeId {
        self.leaf(NodeKind::Debugger, start, end)
    }

    pub fn create_formal_parameter_list(
        &mut self,
        names: Vec<String>,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::FormalParameterList, start, end);
        for name in names {
            let id = self.interner.intern(&name);
            let mut param = Node::new(NodeKind::IdentifierExpression, start, end);
            param.identifier = Some(id);
            let param_id = self.arena.alloc(param);
            node.push_child(Some(param_id));
        }
        self.arena.alloc(node)
    }

    pub fn create_function_body(&self, elements: NodeId, start: Position, end: Position) -> NodeId {
        let mut node = Node::new(NodeKind::FunctionBody, start, end);
        node.push_child(Some(elements));
        self.arena.alloc(node)
    }

    pub fn create_func_decl_statement(
        &mut self,
        name: &str,
        params: NodeId,
        body: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::FunctionDecl, start, end);
        node.identifier = Some(self.interner.intern(name));
        node.push_child(Some(params));
        node.push_child(Some(body));
        self.arena.alloc(node)
    }

    pub fn create_function_expr(
        &mut self,
        name: Option<&str>,
        params: NodeId,
        body: NodeId,
        start: Position,
        end: Position,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::FunctionExpression, start, end);
        node.identifier = name.map(|n| self.interner.intern(n));
        node.push_child(Some(params));
        node.push_child(Some(body));
        self.arena.alloc(node)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
