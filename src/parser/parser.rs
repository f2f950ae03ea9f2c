/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      parser/parser.rs
 * Purpose:   Core control logic of the recursive-descent parser.
 *
 * The parser owns its lexer and keeps a three-token window: the current
 * token, one token of lookahead, and the previously consumed token.
 * Comment tokens are skipped transparently when the window advances, so
 * the grammar rules never see them.
 *
 * Ranges are assigned through markers: a production grabs a marker at its
 * first token and completes it with the end of the last token it consumed,
 * so a parent node's range always contains its children's.
 *
 * Parsing is all-or-nothing. The first lexical or syntactic error aborts
 * the parse; there is no resynchronization and no partial tree.
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

use crate::ast::{Node, NodeKind};
use crate::error::SyntaxError;
use crate::features::{Dialect, Features};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::lineinfo::LineIndex;
use crate::span::{Position, Range};

/// The start of a node's range, grabbed before its first token is
/// consumed and completed with the end of the last one.
#[derive(Debug, Clone, Copy)]
pub(super) struct Marker(pub(super) Position);

pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    pub(super) features: Features,
    pub(super) token: Token,
    pub(super) lookahead: Token,
    pub(super) prev: Token,
    /// Names of every local currently in scope, innermost last. Scopes
    /// are save/restore marks into this stack rather than separate maps.
    locals: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(dialect: Dialect, source: &'a str) -> Self {
        let features = dialect.features();
        let placeholder = Token::new(TokenKind::Eof, "eof", Range::default());
        Self {
            lexer: Lexer::new(features, source),
            features,
            token: placeholder.clone(),
            lookahead: placeholder.clone(),
            prev: placeholder,
            locals: Vec::new(),
        }
    }

    /// Parses the whole source unit into a chunk node, or stops at the
    /// first error.
    pub fn parse(&mut self) -> Result<Node, SyntaxError> {
        self.lookahead = self.lex_skipping_comments()?;
        self.parse_chunk()
    }

    /// The line index built while lexing. Valid for every offset the
    /// parser has consumed so far; complete after a successful `parse`.
    pub fn lineinfo(&self) -> &LineIndex {
        self.lexer.lineinfo()
    }

    fn parse_chunk(&mut self) -> Result<Node, SyntaxError> {
        self.next()?;
        let marker = self.mark();
        let scope = self.open_scope();
        let body = self.parse_block()?;
        self.close_scope(scope);
        if !self.token.is_eof() {
            let tok = self.token.clone();
            return Err(self.unexpected(&tok));
        }
        if body.is_empty() {
            // An empty chunk still gets a range that ends at EOF.
            self.prev = self.token.clone();
        }
        Ok(self.finish(marker, NodeKind::Chunk { body }))
    }

    //
    // Token window
    //

    /// Advances the window by one token, skipping comments.
    pub(super) fn next(&mut self) -> Result<(), SyntaxError> {
        let incoming = self.lex_skipping_comments()?;
        self.prev = std::mem::replace(
            &mut self.token,
            std::mem::replace(&mut self.lookahead, incoming),
        );
        Ok(())
    }

    fn lex_skipping_comments(&mut self) -> Result<Token, SyntaxError> {
        loop {
            let token = self.lexer.lex()?;
            if !token.is_comment() {
                return Ok(token);
            }
        }
    }

    /// Consumes the current token when its text matches.
    pub(super) fn consume(&mut self, value: &str) -> Result<bool, SyntaxError> {
        if self.token.text() == value {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Requires the current token's text to match, or fails with an
    /// `expected '{value}' near '{found}'` error.
    pub(super) fn expect(&mut self, value: &str) -> Result<(), SyntaxError> {
        if self.token.text() == value {
            self.next()
        } else {
            Err(SyntaxError::expected(
                self.token.range().start,
                value,
                self.token.text(),
            ))
        }
    }

    //
    // Range markers
    //

    pub(super) fn mark(&self) -> Marker {
        Marker(self.token.range().start)
    }

    /// Builds a node whose range runs from the marker to the end of the
    /// previously consumed token.
    pub(super) fn finish(&self, marker: Marker, kind: NodeKind) -> Node {
        Node::new(kind, Range::new(marker.0, self.prev.range().end))
    }

    //
    // Scope stack
    //

    pub(super) fn open_scope(&self) -> usize {
        self.locals.len()
    }

    pub(super) fn close_scope(&mut self, mark: usize) {
        self.locals.truncate(mark);
    }

    pub(super) fn is_declared(&self, name: &str) -> bool {
        self.locals.iter().any(|n| n == name)
    }

    pub(super) fn declare(&mut self, name: &str) {
        if self.is_declared(name) {
            return;
        }
        self.locals.push(name.to_string());
    }

    /// Declares the identifier node's name and flags the node local.
    pub(super) fn scope_ident(&mut self, node: &mut Node) {
        if let Some(name) = node.ident_name() {
            let name = name.to_string();
            self.declare(&name);
        }
        node.is_local = true;
    }

    //
    // Errors
    //

    /// `unexpected {kind} '{text}' near '{lookahead}'` at the token's
    /// own position.
    pub(super) fn unexpected(&self, tok: &Token) -> SyntaxError {
        SyntaxError::unexpected(
            tok.range().start,
            tok.kind().describe(),
            tok.text(),
            self.lookahead.text(),
        )
    }

    /// `unexpected {desc} near '{current}'` when a production needed
    /// something the current token cannot provide.
    pub(super) fn expected_token(&self, desc: &str) -> SyntaxError {
        SyntaxError::unexpected_token(self.token.range().start, desc, self.token.text())
    }
}
