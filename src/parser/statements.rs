/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      parser/statements.rs
 * Purpose:   Statement-level productions.
 *
 * Author:    Sam Wilcox
 * Email:     sam@pawx-lang.com
 * Website:   https://www.pawx-lang.com
 * GitHub:    https://github.com/samwilcox/pawlua
 *
 * License:
 * This file is part of the PAWLUA source tooling project.
 *
 * PAWLUA is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use super::parser::{Marker, Parser};
use crate::ast::{Node, NodeKind};
use crate::error::SyntaxError;
use crate::features::Features;
use crate::lexer::Keyword;

impl<'a> Parser<'a> {
    /// Parses statements until a block follower (`end`, `else`, `elseif`,
    /// `until` or EOF). A `return` always closes the block.
    pub(super) fn parse_block(&mut self) -> Result<Vec<Node>, SyntaxError> {
        let mut block = Vec::new();
        while !self.is_block_follow() {
            if self.token.keyword() == Some(Keyword::Return) {
                if let Some(stmt) = self.parse_stmt()? {
                    block.push(stmt);
                }
                break;
            }
            let stmt = self.parse_stmt()?;
            self.consume(";")?;
            if let Some(stmt) = stmt {
                block.push(stmt);
            }
        }
        Ok(block)
    }

    /// Dispatches one statement. Returns `None` only for an empty
    /// statement (a bare `;` where the dialect allows one).
    fn parse_stmt(&mut self) -> Result<Option<Node>, SyntaxError> {
        let marker = self.mark();

        if let Some(kw) = self.token.keyword() {
            match kw {
                Keyword::Local => {
                    self.next()?;
                    return self.parse_local_stmt(marker).map(Some);
                }
                Keyword::If => {
                    self.next()?;
                    return self.parse_if_stmt(marker).map(Some);
                }
                Keyword::Return => {
                    self.next()?;
                    return self.parse_return_stmt(marker).map(Some);
                }
                Keyword::Function => {
                    self.next()?;
                    return self.parse_function_stmt(marker).map(Some);
                }
                Keyword::While => {
                    self.next()?;
                    return self.parse_while_stmt(marker).map(Some);
                }
                Keyword::For => {
                    self.next()?;
                    return self.parse_for_stmt(marker).map(Some);
                }
                Keyword::Repeat => {
                    self.next()?;
                    return self.parse_repeat_stmt(marker).map(Some);
                }
                Keyword::Break => {
                    self.next()?;
                    return Ok(Some(self.finish(marker, NodeKind::Break)));
                }
                Keyword::Do => {
                    self.next()?;
                    return self.parse_do_stmt(marker).map(Some);
                }
                Keyword::Goto if self.goto_is_statement() => {
                    self.next()?;
                    let label = self.parse_ident()?;
                    return Ok(Some(self.finish(
                        marker,
                        NodeKind::Goto {
                            label: Box::new(label),
                        },
                    )));
                }
                _ => {}
            }
        }

        if self.token.is_punct() {
            if self.features.supports(Features::EMPTY_STATEMENT) && self.token.text() == ";" {
                self.next()?;
                return Ok(None);
            }
            if self.consume("::")? {
                return self.parse_label_stmt(marker).map(Some);
            }
        }

        self.parse_assignment_or_call_stmt(marker).map(Some)
    }

    /// With contextual `goto`, the keyword only introduces a statement
    /// when a label name follows; otherwise it reads as an identifier.
    fn goto_is_statement(&self) -> bool {
        if !self.features.supports(Features::CONTEXTUAL_GOTO) {
            return true;
        }
        self.lookahead.is_ident()
    }

    fn parse_local_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        if self.token.is_ident() {
            let mut variables = vec![self.parse_ident()?];
            while self.consume(",")? {
                variables.push(self.parse_ident()?);
            }

            let mut init = Vec::new();
            if self.consume("=")? {
                loop {
                    init.push(self.parse_expect_expr()?);
                    if !self.consume(",")? {
                        break;
                    }
                }
            }

            // The names enter scope only after the initializers, so
            // `local x = x` reads the outer x.
            for var in &mut variables {
                self.scope_ident(var);
            }

            let mut node = self.finish(marker, NodeKind::Local { variables, init });
            node.is_local = true;
            return Ok(node);
        }

        if self.consume("function")? {
            let mut name = self.parse_ident()?;
            self.scope_ident(&mut name);
            let scope = self.open_scope();
            return self.parse_function_decl(marker, Some(name), true, scope);
        }

        Err(self.expected_token("<name>"))
    }

    fn parse_label_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let label = self.parse_ident()?;
        self.expect("::")?;
        Ok(self.finish(
            marker,
            NodeKind::Label {
                label: Box::new(label),
            },
        ))
    }

    /// A statement that begins with a prefix expression is either an
    /// assignment or a bare call; anything else at that position is an
    /// error.
    fn parse_assignment_or_call_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let first = self.token.clone();
        let Some(expr) = self.parse_prefix_expr()? else {
            return Err(self.unexpected(&first));
        };

        if self.token.text() == "," || self.token.text() == "=" {
            self.validate_var(&expr)?;
            let mut variables = vec![expr];
            while self.consume(",")? {
                let var = self.parse_expect_expr()?;
                self.validate_var(&var)?;
                variables.push(var);
            }
            self.expect("=")?;

            let mut init = Vec::new();
            loop {
                init.push(self.parse_expect_expr()?);
                if !self.consume(",")? {
                    break;
                }
            }
            return Ok(self.finish(marker, NodeKind::Assignment { variables, init }));
        }

        if is_call_expr(&expr) {
            return Ok(self.finish(
                marker,
                NodeKind::CallStatement {
                    expression: Box::new(expr),
                },
            ));
        }

        Err(self.unexpected(&first))
    }

    /// Assignment targets must be names, members or index expressions.
    fn validate_var(&self, var: &Node) -> Result<(), SyntaxError> {
        match var.kind {
            NodeKind::Identifier { .. } | NodeKind::Member { .. } | NodeKind::Index { .. } => {
                Ok(())
            }
            _ => Err(SyntaxError::invalid_var(
                var.range.start,
                self.token.text(),
            )),
        }
    }

    fn parse_if_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let mut clauses = Vec::new();

        // The first clause shares the statement's start, the `if` itself.
        let condition = self.parse_expect_expr()?;
        self.expect("then")?;
        let scope = self.open_scope();
        let body = self.parse_block()?;
        self.close_scope(scope);
        clauses.push(self.finish(
            marker,
            NodeKind::IfClause {
                condition: Box::new(condition),
                body,
            },
        ));

        while self.token.keyword() == Some(Keyword::Elseif) {
            let clause_marker = self.mark();
            self.next()?;
            let condition = self.parse_expect_expr()?;
            self.expect("then")?;
            let scope = self.open_scope();
            let body = self.parse_block()?;
            self.close_scope(scope);
            clauses.push(self.finish(
                clause_marker,
                NodeKind::ElseifClause {
                    condition: Box::new(condition),
                    body,
                },
            ));
        }

        if self.token.keyword() == Some(Keyword::Else) {
            let clause_marker = self.mark();
            self.next()?;
            let scope = self.open_scope();
            let body = self.parse_block()?;
            self.close_scope(scope);
            clauses.push(self.finish(clause_marker, NodeKind::ElseClause { body }));
        }

        self.expect("end")?;
        Ok(self.finish(marker, NodeKind::If { clauses }))
    }

    fn parse_do_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let scope = self.open_scope();
        let body = self.parse_block()?;
        self.close_scope(scope);
        self.expect("end")?;
        Ok(self.finish(marker, NodeKind::Do { body }))
    }

    fn parse_while_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let condition = self.parse_expect_expr()?;
        self.expect("do")?;
        let scope = self.open_scope();
        let body = self.parse_block()?;
        self.close_scope(scope);
        self.expect("end")?;
        Ok(self.finish(
            marker,
            NodeKind::While {
                condition: Box::new(condition),
                body,
            },
        ))
    }

    /// The repeat body's scope stays open for the `until` condition: it
    /// can read locals declared inside the body.
    fn parse_repeat_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let scope = self.open_scope();
        let body = self.parse_block()?;
        self.expect("until")?;
        let condition = self.parse_expect_expr()?;
        self.close_scope(scope);
        Ok(self.finish(
            marker,
            NodeKind::Repeat {
                condition: Box::new(condition),
                body,
            },
        ))
    }

    fn parse_for_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let mut var = self.parse_ident()?;
        let scope = self.open_scope();
        self.scope_ident(&mut var);

        if self.consume("=")? {
            let start = self.parse_expect_expr()?;
            self.expect(",")?;
            let end = self.parse_expect_expr()?;
            let step = if self.consume(",")? {
                Some(Box::new(self.parse_expect_expr()?))
            } else {
                None
            };

            self.expect("do")?;
            let body = self.parse_block()?;
            self.expect("end")?;
            self.close_scope(scope);
            Ok(self.finish(
                marker,
                NodeKind::ForNumeric {
                    variable: Box::new(var),
                    start: Box::new(start),
                    end: Box::new(end),
                    step,
                    body,
                },
            ))
        } else {
            let mut variables = vec![var];
            while self.consume(",")? {
                let mut var = self.parse_ident()?;
                self.scope_ident(&mut var);
                variables.push(var);
            }
            self.expect("in")?;

            let mut iterators = Vec::new();
            loop {
                iterators.push(self.parse_expect_expr()?);
                if !self.consume(",")? {
                    break;
                }
            }

            self.expect("do")?;
            let body = self.parse_block()?;
            self.expect("end")?;
            self.close_scope(scope);
            Ok(self.finish(
                marker,
                NodeKind::ForGeneric {
                    variables,
                    iterators,
                    body,
                },
            ))
        }
    }

    fn parse_return_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let mut expressions = Vec::new();
        if self.token.text() != "end" {
            if let Some(expr) = self.parse_expr()? {
                expressions.push(expr);
            }
            while self.consume(",")? {
                expressions.push(self.parse_expect_expr()?);
            }
            self.consume(";")?;
        }
        Ok(self.finish(marker, NodeKind::Return { expressions }))
    }

    fn parse_function_stmt(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let (name, scope) = self.parse_function_name()?;
        self.parse_function_decl(marker, Some(name), false, scope)
    }

    /// `a.b.c` or `a.b:method` after the `function` keyword. A `:` name
    /// brings the implicit `self` into the function's scope.
    fn parse_function_name(&mut self) -> Result<(Node, usize), SyntaxError> {
        let marker = self.mark();
        let mut base = self.parse_ident()?;
        let local = base
            .ident_name()
            .map(|name| self.is_declared(name))
            .unwrap_or(false);
        base.is_local = local;
        let scope = self.open_scope();

        while self.consume(".")? {
            let ident = self.parse_ident()?;
            base = self.finish(
                marker,
                NodeKind::Member {
                    base: Box::new(base),
                    identifier: Box::new(ident),
                    indexer: ".".to_string(),
                },
            );
        }

        if self.consume(":")? {
            let ident = self.parse_ident()?;
            base = self.finish(
                marker,
                NodeKind::Member {
                    base: Box::new(base),
                    identifier: Box::new(ident),
                    indexer: ":".to_string(),
                },
            );
            self.declare("self");
        }

        Ok((base, scope))
    }

    /// Parameter list, body and `end`. `scope` is the mark the function's
    /// scope was opened with; it closes here in every case.
    pub(super) fn parse_function_decl(
        &mut self,
        marker: Marker,
        name: Option<Node>,
        is_local: bool,
        scope: usize,
    ) -> Result<Node, SyntaxError> {
        let mut parameters = Vec::new();
        self.expect("(")?;
        if !self.consume(")")? {
            loop {
                if self.token.is_ident() {
                    let mut param = self.parse_ident()?;
                    self.scope_ident(&mut param);
                    parameters.push(param);
                    if self.consume(",")? {
                        continue;
                    }
                    self.expect(")")?;
                    break;
                } else if self.token.is_vararg() {
                    if let Some(vararg) = self.parse_primary_expr()? {
                        parameters.push(vararg);
                    }
                    self.expect(")")?;
                    break;
                } else {
                    return Err(self.expected_token("<name> or '...'"));
                }
            }
        }

        let body = self.parse_block()?;
        self.expect("end")?;
        self.close_scope(scope);

        let mut node = self.finish(
            marker,
            NodeKind::Function {
                identifier: name.map(Box::new),
                parameters,
                body,
            },
        );
        node.is_local = is_local;
        Ok(node)
    }
}

/// Only the three call forms may stand alone as a statement.
fn is_call_expr(expr: &Node) -> bool {
    matches!(
        expr.kind,
        NodeKind::Call { .. } | NodeKind::TableCall { .. } | NodeKind::StringCall { .. }
    )
}
