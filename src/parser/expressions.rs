/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      parser/expressions.rs
 * Purpose:   Expression-level productions.
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

use super::helpers::binary_precedence;
use super::parser::{Marker, Parser};
use crate::ast::{Node, NodeKind};
use crate::error::SyntaxError;
use crate::features::Features;
use crate::lexer::Keyword;

impl<'a> Parser<'a> {
    /// An identifier, required. With contextual `goto` the keyword is
    /// accepted as a plain name.
    pub(super) fn parse_ident(&mut self) -> Result<Node, SyntaxError> {
        let tok = self.token.clone();
        let contextual_goto = tok.keyword() == Some(Keyword::Goto)
            && self.features.supports(Features::CONTEXTUAL_GOTO);
        if !tok.is_ident() && !contextual_goto {
            return Err(self.expected_token("<name>"));
        }
        let marker = self.mark();
        self.next()?;
        Ok(self.finish(
            marker,
            NodeKind::Identifier {
                name: tok.text().to_string(),
            },
        ))
    }

    /// An expression, required.
    pub(super) fn parse_expect_expr(&mut self) -> Result<Node, SyntaxError> {
        match self.parse_expr()? {
            Some(expr) => Ok(expr),
            None => Err(self.expected_token("<expression>")),
        }
    }

    /// An expression, or `None` when the current token cannot start one.
    pub(super) fn parse_expr(&mut self) -> Result<Option<Node>, SyntaxError> {
        self.parse_sub_expr(0)
    }

    /// Precedence climbing. Binds operators stronger than
    /// `min_precedence`; `^` and `..` are right-associative, expressed by
    /// recursing one level below their own precedence.
    fn parse_sub_expr(&mut self, min_precedence: u8) -> Result<Option<Node>, SyntaxError> {
        let marker = self.mark();
        let tok = self.token.clone();

        let mut expr = if self.is_unary_op(&tok) {
            self.next()?;
            let argument = match self.parse_sub_expr(10)? {
                Some(arg) => arg,
                None => return Err(self.expected_token("<expression>")),
            };
            Some(self.finish(
                marker,
                NodeKind::Unary {
                    operator: tok.text().to_string(),
                    argument: Box::new(argument),
                },
            ))
        } else {
            None
        };

        if expr.is_none() {
            expr = self.parse_primary_expr()?;
        }
        if expr.is_none() {
            expr = self.parse_prefix_expr()?;
        }
        let Some(mut expr) = expr else {
            return Ok(None);
        };

        loop {
            let operator = self.token.text().to_string();
            let mut precedence = if self.token.is_punct() || self.token.is_keyword() {
                binary_precedence(&operator)
            } else {
                0
            };
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            if operator == "^" || operator == ".." {
                precedence -= 1;
            }
            self.next()?;
            let right = match self.parse_sub_expr(precedence)? {
                Some(right) => right,
                None => return Err(self.expected_token("<expression>")),
            };
            expr = self.finish(
                marker,
                NodeKind::Binary {
                    operator,
                    left: Box::new(expr),
                    right: Box::new(right),
                },
            );
        }

        Ok(Some(expr))
    }

    /// Literals, anonymous functions and table constructors.
    pub(super) fn parse_primary_expr(&mut self) -> Result<Option<Node>, SyntaxError> {
        let marker = self.mark();
        let tok = self.token.clone();

        if tok.is_literal() {
            self.next()?;
            return Ok(Some(self.finish(
                marker,
                NodeKind::Literal {
                    value_type: tok.kind(),
                    value: tok.text().to_string(),
                },
            )));
        }

        if tok.keyword() == Some(Keyword::Function) {
            self.next()?;
            let scope = self.open_scope();
            return self.parse_function_decl(marker, None, false, scope).map(Some);
        }

        if self.consume("{")? {
            return self.parse_table_constructor(marker).map(Some);
        }

        Ok(None)
    }

    /// A name or parenthesized expression, extended by any chain of
    /// indexing, member access and calls. A `:` member must be called.
    pub(super) fn parse_prefix_expr(&mut self) -> Result<Option<Node>, SyntaxError> {
        let marker = self.mark();

        let mut base = if self.token.is_ident() {
            let name = self.token.text().to_string();
            let mut ident = self.parse_ident()?;
            ident.is_local = self.is_declared(&name);
            ident
        } else if self.consume("(")? {
            let inner = self.parse_expect_expr()?;
            self.expect(")")?;
            inner
        } else {
            return Ok(None);
        };

        loop {
            if self.token.is_punct() {
                let text = self.token.text();
                if text.len() >= 2 {
                    // A multi-character punctuator is always an operator,
                    // never part of the chain.
                    return Ok(Some(base));
                }
                match text.as_bytes()[0] {
                    b'[' => {
                        self.next()?;
                        let indexer = self.parse_expect_expr()?;
                        self.expect("]")?;
                        base = self.finish(
                            marker,
                            NodeKind::Index {
                                base: Box::new(base),
                                indexer: Box::new(indexer),
                            },
                        );
                    }
                    b'.' => {
                        self.next()?;
                        let identifier = self.parse_ident()?;
                        base = self.finish(
                            marker,
                            NodeKind::Member {
                                base: Box::new(base),
                                identifier: Box::new(identifier),
                                indexer: ".".to_string(),
                            },
                        );
                    }
                    b':' => {
                        self.next()?;
                        let identifier = self.parse_ident()?;
                        base = self.finish(
                            marker,
                            NodeKind::Member {
                                base: Box::new(base),
                                identifier: Box::new(identifier),
                                indexer: ":".to_string(),
                            },
                        );
                        // Method access only exists as part of a call.
                        base = self.parse_call_expr(marker, base)?;
                    }
                    b'(' | b'{' => {
                        base = self.parse_call_expr(marker, base)?;
                    }
                    _ => return Ok(Some(base)),
                }
            } else if self.token.is_string() {
                base = self.parse_call_expr(marker, base)?;
            } else {
                break;
            }
        }

        Ok(Some(base))
    }

    /// One of the three call forms: `f(...)`, `f{...}` or `f"..."`.
    fn parse_call_expr(&mut self, marker: Marker, base: Node) -> Result<Node, SyntaxError> {
        if self.token.is_punct() {
            match self.token.text() {
                "(" => {
                    self.next()?;
                    let mut arguments = Vec::new();
                    if let Some(expr) = self.parse_expr()? {
                        arguments.push(expr);
                    }
                    while self.consume(",")? {
                        arguments.push(self.parse_expect_expr()?);
                    }
                    self.expect(")")?;
                    return Ok(self.finish(
                        marker,
                        NodeKind::Call {
                            base: Box::new(base),
                            arguments,
                        },
                    ));
                }
                "{" => {
                    let table_marker = self.mark();
                    self.next()?;
                    let table = self.parse_table_constructor(table_marker)?;
                    return Ok(self.finish(
                        marker,
                        NodeKind::TableCall {
                            base: Box::new(base),
                            argument: Box::new(table),
                        },
                    ));
                }
                _ => {}
            }
        } else if self.token.is_string() {
            if let Some(argument) = self.parse_primary_expr()? {
                return Ok(self.finish(
                    marker,
                    NodeKind::StringCall {
                        base: Box::new(base),
                        argument: Box::new(argument),
                    },
                ));
            }
        }

        Err(self.expected_token("function arguments"))
    }

    /// Table fields in their three forms, separated by `,` or `;`. The
    /// opening `{` is already consumed; `marker` sits on it.
    pub(super) fn parse_table_constructor(&mut self, marker: Marker) -> Result<Node, SyntaxError> {
        let mut fields = Vec::new();
        loop {
            let field_marker = self.mark();

            if self.token.is_punct() && self.consume("[")? {
                let key = self.parse_expect_expr()?;
                self.expect("]")?;
                self.expect("=")?;
                let value = self.parse_expect_expr()?;
                fields.push(self.finish(
                    field_marker,
                    NodeKind::TableKey {
                        key: Box::new(key),
                        value: Box::new(value),
                    },
                ));
            } else if self.token.is_ident() {
                if self.lookahead.text() == "=" {
                    let key = self.parse_ident()?;
                    self.next()?;
                    let value = self.parse_expect_expr()?;
                    fields.push(self.finish(
                        field_marker,
                        NodeKind::TableKeyString {
                            key: Box::new(key),
                            value: Box::new(value),
                        },
                    ));
                } else {
                    let value = self.parse_expect_expr()?;
                    fields.push(self.finish(
                        field_marker,
                        NodeKind::TableValue {
                            value: Box::new(value),
                        },
                    ));
                }
            } else {
                match self.parse_expr()? {
                    Some(value) => fields.push(self.finish(
                        field_marker,
                        NodeKind::TableValue {
                            value: Box::new(value),
                        },
                    )),
                    None => break,
                }
            }

            if self.token.text() == "," || self.token.text() == ";" {
                self.next()?;
                continue;
            }
            break;
        }

        self.expect("}")?;
        Ok(self.finish(marker, NodeKind::TableConstructor { fields }))
    }
}
