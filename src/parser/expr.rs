//! Expression grammar: comma expressions down through primary expressions,
//! via a precedence-climbing loop rather than an explicit operand/operator
//! stack pair, same algorithm family, expressed as recursion the way a
//! hand-written recursive-descent parser naturally reads.

use super::{PResult, Parser};
use crate::arena::NodeId;
use crate::ast::{Operator, Position};
use crate::token::TokenKind;

/// Binary operator precedence, highest binds tightest. `None` if `kind`
/// isn't a binary operator at all.
fn binary_precedence(kind: TokenKind, no_in: bool) -> Option<(u8, Operator)> {
    use TokenKind::*;
    Some(match kind {
        PipePipe => (1, Operator::LogicalOr),
        AmpAmp => (2, Operator::LogicalAnd),
        Pipe => (3, Operator::BitwiseOr),
        Caret => (4, Operator::BitwiseXor),
        Amp => (5, Operator::BitwiseAnd),
        Equals => (6, Operator::Equal),
        NotEquals => (6, Operator::NotEqual),
        StrictEquals => (6, Operator::StrictEqual),
        StrictNotEquals => (6, Operator::StrictNotEqual),
        Less => (7, Operator::LessThan),
        Greater => (7, Operator::GreaterThan),
        LessEquals => (7, Operator::LessThanOrEqual),
        GreaterEquals => (7, Operator::GreaterThanOrEqual),
        InstanceOf => (7, Operator::InstanceOf),
        In if !no_in => (7, Operator::In),
        LeftShift => (8, Operator::LeftShift),
        RightShift => (8, Operator::RightShift),
        UnsignedRightShift => (8, Operator::UnsignedRightShift),
        Plus => (9, Operator::Add),
        Minus => (9, Operator::Subtract),
        Star => (10, Operator::Multiply),
        Slash => (10, Operator::Divide),
        Percent => (10, Operator::Modulus),
        _ => return None,
    })
}

fn assignment_operator(kind: TokenKind) -> Option<Operator> {
    use TokenKind::*;
    Some(match kind {
        Assign => Operator::Assign,
        PlusAssign => Operator::AssignAdd,
        MinusAssign => Operator::AssignSubtract,
        StarAssign => Operator::AssignMultiply,
        SlashAssign => Operator::AssignDivide,
        PercentAssign => Operator::AssignModulus,
        LeftShiftAssign => Operator::AssignLeftShift,
        RightShiftAssign => Operator::AssignRightShift,
        UnsignedRightShiftAssign => Operator::AssignUnsignedRightShift,
        AmpAssign => Operator::AssignAnd,
        PipeAssign => Operator::AssignOr,
        CaretAssign => Operator::AssignXor,
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// `Expression[In]`: comma-separated assignment expressions.
    pub(super) fn parse_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        let first = self.parse_assignment_expression()?;
        self.finish_expression(first, start)
    }

    fn finish_expression(&mut self, first: NodeId, start: Position) -> PResult<NodeId> {
        let mut expr = first;
        while self.at(TokenKind::Comma) {
            self.bump()?;
            let rhs = self.parse_assignment_expression()?;
            let end = self.prev_end();
            expr = self.builder.make_comma_node(expr, rhs, start, end);
        }
        Ok(expr)
    }

    pub(super) fn parse_assignment_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        let lhs = self.parse_conditional_expression()?;
        self.finish_assignment_expression(lhs, start)
    }

    fn finish_assignment_expression(&mut self, lhs: NodeId, start: Position) -> PResult<NodeId> {
        if let Some(op) = assignment_operator(self.current.kind) {
            self.bump()?;
            let rhs = self.parse_assignment_expression()?;
            let end = self.prev_end();
            return Ok(self.builder.make_assignment_node(op, lhs, rhs, start, end));
        }
        Ok(lhs)
    }

    fn parse_conditional_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        let test = self.parse_binary_expression(1)?;
        self.finish_conditional_expression(test, start)
    }

    fn finish_conditional_expression(&mut self, test: NodeId, start: Position) -> PResult<NodeId> {
        if self.at(TokenKind::Question) {
            self.bump()?;
            let saved_no_in = self.no_in;
            self.no_in = false;
            let consequent = self.parse_assignment_expression()?;
            self.no_in = saved_no_in;
            self.expect(TokenKind::Colon)?;
            let alternate = self.parse_assignment_expression()?;
            let end = self.prev_end();
            return Ok(self
                .builder
                .create_conditional(test, consequent, alternate, start, end));
        }
        Ok(test)
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> PResult<NodeId> {
        let start = self.current.start;
        let lhs = self.parse_unary_expression()?;
        self.finish_binary_expression(lhs, start, min_precedence)
    }

    fn finish_binary_expression(
        &mut self,
        lhs: NodeId,
        start: Position,
        min_precedence: u8,
    ) -> PResult<NodeId> {
        let mut lhs = lhs;
        loop {
            let Some((precedence, op)) = binary_precedence(self.current.kind, self.no_in) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.bump()?;
            let rhs = self.parse_binary_expression(precedence + 1)?;
            let end = self.prev_end();
            lhs = self.builder.make_binary_node(op, lhs, rhs, start, end);
        }
        Ok(lhs)
    }

    fn parse_unary_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        let kind = self.current.kind;
        macro_rules! prefix {
            ($op:expr) => {{
                self.bump()?;
                let arg = self.parse_unary_expression()?;
                let end = self.prev_end();
                return Ok(self.builder.make_unary_node($op, arg, start, end));
            }};
        }
        match kind {
            TokenKind::Delete => prefix!(Operator::Delete),
            TokenKind::Typeof => prefix!(Operator::Typeof),
            TokenKind::Tilde => prefix!(Operator::BitwiseNot),
            TokenKind::Bang => prefix!(Operator::LogicalNot),
            TokenKind::Plus => prefix!(Operator::Add),
            TokenKind::Minus => prefix!(Operator::Subtract),
            TokenKind::Void => {
                self.bump()?;
                let arg = self.parse_unary_expression()?;
                let end = self.prev_end();
                return Ok(self.builder.make_void_node(arg, start, end));
            }
            TokenKind::PlusPlus => {
                self.bump()?;
                let arg = self.parse_unary_expression()?;
                let end = self.prev_end();
                return Ok(self
                    .builder
                    .make_prefix_node(Operator::Increment, arg, start, end));
            }
            TokenKind::MinusMinus => {
                self.bump()?;
                let arg = self.parse_unary_expression()?;
                let end = self.prev_end();
                return Ok(self
                    .builder
                    .make_prefix_node(Operator::Decrement, arg, start, end));
            }
            _ => {}
        }
        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        let expr = self.parse_lhs_expression()?;
        self.finish_postfix_expression(expr, start)
    }

    fn finish_postfix_expression(&mut self, expr: NodeId, start: Position) -> PResult<NodeId> {
        if !self.current.preceded_by_line_terminator
            && matches!(self.current.kind, TokenKind::PlusPlus | TokenKind::MinusMinus)
        {
            let op = if self.current.kind == TokenKind::PlusPlus {
                Operator::Increment
            } else {
                Operator::Decrement
            };
            self.bump()?;
            let end = self.prev_end();
            return Ok(self.builder.make_postfix_node(op, expr, start, end));
        }
        Ok(expr)
    }

    /// `LeftHandSideExpression`: `new`/member/call chains over a primary.
    fn parse_lhs_expression(&mut self) -> PResult<NodeId> {
        let expr = if self.at(TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.finish_lhs_tail(expr)
    }

    /// The member/call suffix loop (`.x`, `[x]`, `(...)`), reusable when
    /// the base expression was already parsed by the caller (e.g. a
    /// one-token-lookahead label/expression-statement disambiguation that
    /// has already consumed a leading identifier).
    fn finish_lhs_tail(&mut self, mut expr: NodeId) -> PResult<NodeId> {
        loop {
            let start = self.current.start;
            match self.current.kind {
                TokenKind::Dot => {
                    self.bump()?;
                    let name = self.expect_identifier_name()?;
                    let end = self.prev_end();
                    expr = self.builder.create_dot_access(expr, &name, start, end);
                }
                TokenKind::LBracket => {
                    self.bump()?;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    let end = self.prev_end();
                    expr = self.builder.create_bracket_access(expr, index, start, end);
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    let end = self.prev_end();
                    expr = self.builder.create_function_call(expr, args, start, end);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Resumes full expression parsing (member/call tail, postfix, binary,
    /// conditional, assignment, comma) from an `Identifier` that the
    /// statement parser already consumed while checking whether it starts
    /// a label. `name` names the identifier; `start` is its position.
    pub(super) fn continue_expression_from_identifier(
        &mut self,
        base: NodeId,
        start: Position,
    ) -> PResult<NodeId> {
        let lhs_expr = self.finish_lhs_tail(base)?;
        let postfix_expr = self.finish_postfix_expression(lhs_expr, start)?;
        let binary_expr = self.finish_binary_expression(postfix_expr, start, 1)?;
        let conditional_expr = self.finish_conditional_expression(binary_expr, start)?;
        let assignment_expr = self.finish_assignment_expression(conditional_expr, start)?;
        self.finish_expression(assignment_expr, start)
    }

    fn parse_new_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::New)?;
        let callee = if self.at(TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        let mut callee = callee;
        loop {
            let member_start = self.current.start;
            match self.current.kind {
                TokenKind::Dot => {
                    self.bump()?;
                    let name = self.expect_identifier_name()?;
                    let end = self.prev_end();
                    callee = self.builder.create_dot_access(callee, &name, member_start, end);
                }
                TokenKind::LBracket => {
                    self.bump()?;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    let end = self.prev_end();
                    callee = self.builder.create_bracket_access(callee, index, member_start, end);
                }
                _ => break,
            }
        }
        let args = if self.at(TokenKind::LParen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let end = self.prev_end();
        Ok(self.builder.create_new_expr(callee, args, start, end))
    }

    fn parse_arguments(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::LParen)?;
        let mut list = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                list.push(self.parse_assignment_expression()?);
                if self.at(TokenKind::Comma) {
                    self.bump()?;
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        let end = self.prev_end();
        Ok(self.builder.create_arguments(list, start, end))
    }

    fn expect_identifier_name(&mut self) -> PResult<String> {
        // Property names after `.` accept any identifier-shaped token,
        // including reserved and keyword spellings (`a.class`, `a.if`).
        let text = self
            .current
            .text
            .clone()
            .ok_or_else(|| self.error())?;
        self.bump()?;
        Ok(text)
    }

    fn parse_primary_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        match self.current.kind {
            TokenKind::This => {
                self.bump()?;
                Ok(self.builder.this_expr(start, self.prev_end()))
            }
            TokenKind::Identifier => {
                let name = self.current.text.clone().unwrap();
                self.bump()?;
                Ok(self.builder.create_resolve(&name, start, self.prev_end()))
            }
            TokenKind::NullLiteral => {
                self.bump()?;
                Ok(self.builder.create_null(start, self.prev_end()))
            }
            TokenKind::TrueLiteral => {
                self.bump()?;
                Ok(self.builder.create_boolean(true, start, self.prev_end()))
            }
            TokenKind::FalseLiteral => {
                self.bump()?;
                Ok(self.builder.create_boolean(false, start, self.prev_end()))
            }
            TokenKind::NumericLiteral => {
                let value = self.current.number;
                self.bump()?;
                Ok(self.builder.create_number(value, start, self.prev_end()))
            }
            TokenKind::StringLiteral => {
                let value = self.current.string_value.clone().unwrap();
                self.bump()?;
                Ok(self.builder.create_string(value, start, self.prev_end()))
            }
            TokenKind::RegexLiteral => {
                let pattern = self.current.regex_pattern.clone().unwrap();
                let flags = self.current.regex_flags.clone().unwrap();
                self.bump()?;
                Ok(self.builder.create_regex(&pattern, &flags, start, self.prev_end()))
            }
            TokenKind::LParen => {
                self.bump()?;
                let saved_no_in = self.no_in;
                self.no_in = false;
                let expr = self.parse_expression()?;
                self.no_in = saved_no_in;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_expression(),
            _ => Err(self.error()),
        }
    }

    fn parse_array_literal(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        loop {
            if self.at(TokenKind::RBracket) {
                break;
            }
            if self.at(TokenKind::Comma) {
                elements.push(None); // elision
                self.bump()?;
                continue;
            }
            elements.push(Some(self.parse_assignment_expression()?));
            if self.at(TokenKind::Comma) {
                self.bump()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RBracket)?;
        let end = self.prev_end();
        Ok(self.builder.create_array(elements, start, end))
    }

    fn parse_object_literal(&mut self) -> PResult<NodeId> {
        use crate::ast::PropertyKind;

        let start = self.current.start;
        self.expect(TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let prop_start = self.current.start;
            let is_accessor = matches!(self.current.text.as_deref(), Some("get") | Some("set"))
                && self.current.kind == TokenKind::Identifier;
            if is_accessor {
                let which = self.current.text.clone().unwrap();
                self.bump()?;
                if !self.at(TokenKind::Colon) {
                    // `get`/`set` used as the accessor keyword; `current`
                    // now sits on the property name that follows it.
                    let name = self.parse_property_name()?;
                    let params = self.parse_formal_parameters()?;
                    let body = self.parse_function_body()?;
                    let end = self.prev_end();
                    let func = self
                        .builder
                        .create_function_expr(None, params, body, prop_start, end);
                    let kind = if which == "get" {
                        PropertyKind::Getter
                    } else {
                        PropertyKind::Setter
                    };
                    properties.push(self.builder.create_property(&name, func, kind, prop_start, end));
                    if self.at(TokenKind::Comma) {
                        self.bump()?;
                    }
                    continue;
                }
                // A plain property literally named `get`/`set`: `current`
                // is already the `:` that follows it.
                self.bump()?;
                let value = self.parse_assignment_expression()?;
                let end = self.prev_end();
                properties.push(
                    self.builder
                        .create_property(&which, value, PropertyKind::Constant, prop_start, end),
                );
                if self.at(TokenKind::Comma) {
                    self.bump()?;
                    continue;
                }
                break;
            }

            let name = self.parse_property_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_assignment_expression()?;
            let end = self.prev_end();
            properties.push(
                self.builder
                    .create_property(&name, value, PropertyKind::Constant, prop_start, end),
            );
            if self.at(TokenKind::Comma) {
                self.bump()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        let end = self.prev_end();
        Ok(self.builder.create_object_literal(properties, start, end))
    }

    fn parse_property_name(&mut self) -> PResult<String> {
        match self.current.kind {
            TokenKind::StringLiteral => {
                let value = self.current.string_value.clone().unwrap();
                self.bump()?;
                Ok(value)
            }
            TokenKind::NumericLiteral => {
                let value = self.current.number;
                self.bump()?;
                Ok(crate::builder::Builder::create_numeric_property_name(value))
            }
            _ => {
                let text = self.current.text.clone().ok_or_else(|| self.error())?;
                self.bump()?;
                Ok(text)
            }
        }
    }

    pub(super) fn parse_formal_parameters(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::LParen)?;
        let mut names = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let name = self.current.text.clone().ok_or_else(|| self.error())?;
                self.expect(TokenKind::Identifier)?;
                names.push(name);
                if self.at(TokenKind::Comma) {
                    self.bump()?;
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        let end = self.prev_end();
        Ok(self.builder.create_formal_parameter_list(names, start, end))
    }

    pub(super) fn parse_function_body(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::LBrace)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBrace) {
            elements.push(self.parse_source_element()?);
        }
        let elements_end = self.current.start;
        let elements_node =
            self.builder
                .create_source_elements(elements, start, elements_end);
        self.expect(TokenKind::RBrace)?;
        let end = self.prev_end();
        Ok(self.builder.create_function_body(elements_node, start, end))
    }

    fn parse_function_expression(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Function)?;
        let name = if self.at(TokenKind::Identifier) {
            let text = self.current.text.clone().unwrap();
            self.bump()?;
            Some(text)
        } else {
            None
        };
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;
        let end = self.prev_end();
        Ok(self
            .builder
            .create_function_expr(name.as_deref(), params, body, start, end))
    }
}
