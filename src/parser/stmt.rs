//! Recursive-descent statement grammar, including Automatic Semicolon
//! Insertion: accept a missing `;` at `}`, EOF, or before a token that sits
//! on a fresh line.

use super::{PResult, Parser};
use crate::arena::NodeId;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// `SourceElement`: a function declaration or any statement.
    pub(super) fn parse_source_element(&mut self) -> PResult<NodeId> {
        if self.at(TokenKind::Function) {
            return self.parse_function_declaration();
        }
        self.parse_statement()
    }

    fn parse_function_declaration(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Function)?;
        let name = self.current.text.clone().ok_or_else(|| self.error())?;
        self.expect(TokenKind::Identifier)?;
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;
        let end = self.prev_end();
        Ok(self
            .builder
            .create_func_decl_statement(&name, params, body, start, end))
    }

    /// Consumes a trailing `;`, or applies ASI: a `}` / EOF / line-break
    /// before the next token all substitute for an explicit semicolon.
    fn consume_semicolon(&mut self) -> PResult<()> {
        if self.at(TokenKind::Semicolon) {
            self.bump()?;
            return Ok(());
        }
        if self.at(TokenKind::RBrace)
            || self.at(TokenKind::Eof)
            || self.current.preceded_by_line_terminator
        {
            return Ok(());
        }
        Err(self.error())
    }

    fn parse_statement(&mut self) -> PResult<NodeId> {
        match self.current.kind {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::Semicolon => {
                let start = self.current.start;
                self.bump()?;
                Ok(self.builder.create_empty_statement(start, self.prev_end()))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Debugger => {
                let start = self.current.start;
                self.bump()?;
                self.consume_semicolon()?;
                Ok(self.builder.create_debugger(start, self.prev_end()))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::LBrace)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBrace) {
            elements.push(self.parse_source_element()?);
        }
        let body = if elements.is_empty() {
            None
        } else {
            let body_start = elements.first().map(|_| start).unwrap_or(start);
            let body_end = self.current.start;
            Some(
                self.builder
                    .create_source_elements(elements, body_start, body_end),
            )
        };
        self.expect(TokenKind::RBrace)?;
        let end = self.prev_end();
        Ok(self.builder.create_block(body, start, end))
    }

    fn parse_var_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Var)?;
        let declarations = self.parse_var_declaration_list()?;
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_var_statement(declarations, start, end))
    }

    fn parse_var_declaration_list(&mut self) -> PResult<Vec<NodeId>> {
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.current.start;
            let name = self.current.text.clone().ok_or_else(|| self.error())?;
            self.expect(TokenKind::Identifier)?;
            let init = if self.at(TokenKind::Assign) {
                self.bump()?;
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            let end = self.prev_end();
            declarations.push(self.builder.create_var_declaration(&name, init, decl_start, end));
            if self.at(TokenKind::Comma) {
                self.bump()?;
                continue;
            }
            break;
        }
        Ok(declarations)
    }

    fn parse_if_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let consequent = self.parse_statement()?;
        let alternate = if self.at(TokenKind::Else) {
            self.bump()?;
            Some(self.parse_statement()?)
        } else {
            None
        };
        let end = self.prev_end();
        Ok(self
            .builder
            .create_if_statement(test, consequent, alternate, start, end))
    }

    fn parse_do_while_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Do)?;
        let body = self.parse_statement()?;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        // A `do-while` is followed by ASI-exempt `;`: it's always allowed
        // to be missing, even without a line break, per the grammar note.
        if self.at(TokenKind::Semicolon) {
            self.bump()?;
        }
        let end = self.prev_end();
        Ok(self.builder.create_do_while(body, test, start, end))
    }

    fn parse_while_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.builder.create_while(test, body, start, end))
    }

    fn parse_for_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        if self.at(TokenKind::Var) {
            self.bump()?;
            let decl_start = self.current.start;
            let name = self.current.text.clone().ok_or_else(|| self.error())?;
            self.expect(TokenKind::Identifier)?;
            if self.at(TokenKind::In) {
                self.bump()?;
                let decl_end = self.prev_end();
                let decl = self
                    .builder
                    .create_var_declaration(&name, None, decl_start, decl_end);
                let left = self
                    .builder
                    .create_var_statement(vec![decl], decl_start, decl_end);
                let right = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_statement()?;
                let end = self.prev_end();
                return Ok(self.builder.create_for_in_loop(left, right, body, start, end));
            }
            let init = if self.at(TokenKind::Assign) {
                self.bump()?;
                self.no_in = true;
                let value = self.parse_assignment_expression()?;
                self.no_in = false;
                Some(value)
            } else {
                None
            };
            let decl_end = self.prev_end();
            let mut declarations =
                vec![self.builder.create_var_declaration(&name, init, decl_start, decl_end)];
            if self.at(TokenKind::Comma) {
                self.bump()?;
                self.no_in = true;
                declarations.extend(self.parse_var_declaration_list()?);
                self.no_in = false;
            }
            let list_end = self.prev_end();
            let init_node = self
                .builder
                .create_var_statement(declarations, decl_start, list_end);
            return self.finish_classic_for(start, Some(init_node));
        }

        if self.at(TokenKind::Semicolon) {
            return self.finish_classic_for(start, None);
        }

        self.no_in = true;
        let expr_start = self.current.start;
        let expr = self.parse_expression()?;
        self.no_in = false;

        if self.at(TokenKind::In) {
            self.bump()?;
            let right = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            let body = self.parse_statement()?;
            let end = self.prev_end();
            return Ok(self.builder.create_for_in_loop(expr, right, body, start, end));
        }
        let _ = expr_start;
        self.finish_classic_for(start, Some(expr))
    }

    fn finish_classic_for(&mut self, start: crate::ast::Position, init: Option<NodeId>) -> PResult<NodeId> {
        self.expect(TokenKind::Semicolon)?;
        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.builder.create_for_loop(init, test, update, body, start, end))
    }

    fn parse_continue_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Continue)?;
        let label = self.parse_optional_label()?;
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_continue(label.as_deref(), start, end))
    }

    fn parse_break_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Break)?;
        let label = self.parse_optional_label()?;
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_break(label.as_deref(), start, end))
    }

    /// An identifier label is only valid here if it appears on the same
    /// source line (no ASI-triggering break between the keyword and it).
    fn parse_optional_label(&mut self) -> PResult<Option<String>> {
        if self.at(TokenKind::Identifier) && !self.current.preceded_by_line_terminator {
            let name = self.current.text.clone().unwrap();
            self.bump()?;
            return Ok(Some(name));
        }
        Ok(None)
    }

    fn parse_return_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Return)?;
        let value = if self.at(TokenKind::Semicolon)
            || self.at(TokenKind::RBrace)
            || self.at(TokenKind::Eof)
            || self.current.preceded_by_line_terminator
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_return(value, start, end))
    }

    fn parse_with_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::With)?;
        self.expect(TokenKind::LParen)?;
        let object = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_statement()?;
        let end = self.prev_end();
        Ok(self.builder.create_with_statement(object, body, start, end))
    }

    fn parse_switch_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Switch)?;
        self.expect(TokenKind::LParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let mut pre_default = Vec::new();
        let mut default_clause = None;
        let mut post_default = Vec::new();

        loop {
            match self.current.kind {
                TokenKind::Case => {
                    let clause_start = self.current.start;
                    self.bump()?;
                    let test = self.parse_expression()?;
                    self.expect(TokenKind::Colon)?;
                    let body = self.parse_clause_statements()?;
                    let end = self.prev_end();
                    let clause =
                        self.builder
                            .create_clause(Some(test), body, clause_start, end);
                    if default_clause.is_none() {
                        pre_default.push(clause);
                    } else {
                        post_default.push(clause);
                    }
                }
                TokenKind::Default => {
                    if default_clause.is_some() {
                        return Err(self.error());
                    }
                    let clause_start = self.current.start;
                    self.bump()?;
                    self.expect(TokenKind::Colon)?;
                    let body = self.parse_clause_statements()?;
                    let end = self.prev_end();
                    default_clause =
                        Some(self.builder.create_clause(None, body, clause_start, end));
                }
                _ => break,
            }
        }
        self.expect(TokenKind::RBrace)?;
        let end = self.prev_end();

        let pre_start = self.current.start;
        let pre_list = self.builder.create_clause_list(pre_default, pre_start, pre_start);
        let post_list = self.builder.create_clause_list(post_default, pre_start, pre_start);
        Ok(self.builder.create_switch_statement(
            discriminant,
            pre_list,
            default_clause,
            post_list,
            start,
            end,
        ))
    }

    fn parse_clause_statements(&mut self) -> PResult<Vec<NodeId>> {
        let mut statements = Vec::new();
        while !matches!(
            self.current.kind,
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace
        ) {
            statements.push(self.parse_source_element()?);
        }
        Ok(statements)
    }

    fn parse_throw_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Throw)?;
        if self.current.preceded_by_line_terminator {
            // `throw` followed by a line break is a syntax error (ASI does
            // not apply here per the grammar's no-LineTerminator-here rule).
            return Err(self.error());
        }
        let value = self.parse_expression()?;
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_throw_statement(value, start, end))
    }

    fn parse_try_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        self.expect(TokenKind::Try)?;
        let block = self.parse_block()?;

        let mut catch_param = None;
        let mut catch_block = None;
        if self.at(TokenKind::Catch) {
            self.bump()?;
            self.expect(TokenKind::LParen)?;
            let name = self.current.text.clone().ok_or_else(|| self.error())?;
            self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::RParen)?;
            catch_param = Some(name);
            catch_block = Some(self.parse_block()?);
        }

        let mut finally_block = None;
        if self.at(TokenKind::Finally) {
            self.bump()?;
            finally_block = Some(self.parse_block()?);
        }

        if catch_block.is_none() && finally_block.is_none() {
            return Err(self.error());
        }

        let end = self.prev_end();
        Ok(self.builder.create_try_statement(
            block,
            catch_param.as_deref(),
            catch_block,
            finally_block,
            start,
            end,
        ))
    }

    fn parse_expression_statement(&mut self) -> PResult<NodeId> {
        let start = self.current.start;
        if self.at(TokenKind::Identifier) {
            let name = self.current.text.clone().unwrap();
            let ident_start = self.current.start;
            let saved_pos_token = self.current.clone();
            self.bump()?;
            if self.at(TokenKind::Colon) {
                self.bump()?;
                let body = self.parse_statement()?;
                let end = self.prev_end();
                return Ok(self.builder.create_label(&name, body, ident_start, end));
            }
            // Not a label: re-parse this identifier as the start of an
            // expression. `self.current` already sits one token ahead, so
            // we resume the expression parser using the resolve node we
            // already have the name for rather than backtracking the
            // lexer (which cannot un-scan).
            let base = self.builder.create_resolve(&name, ident_start, saved_pos_token.end);
            let expr = self.continue_expression_from_identifier(base, ident_start)?;
            self.consume_semicolon()?;
            let end = self.prev_end();
            return Ok(self.builder.create_expr_statement(expr, start, end));
        }
        let expr = self.parse_expression()?;
        self.consume_semicolon()?;
        let end = self.prev_end();
        Ok(self.builder.create_expr_statement(expr, start, end))
    }
}
