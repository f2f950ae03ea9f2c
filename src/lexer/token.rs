/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the lexical token types shared by the lexing and
 *            parsing stages.
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

use crate::lexer::keywords::{keyword_id, Keyword};
use crate::span::Range;
use serde::Serialize;
use std::fmt;

/// Represents the **category of a lexical token**.
///
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
///
/// Each kind directly influences statement classification, operator
/// parsing and error reporting. Note that `nil`, `true`/`false`, numbers,
/// strings and `...` are all *literals* with their own kinds; `Keyword`
/// covers only the reserved-word set in `keywords.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Eof,
    Keyword,
    Identifier,
    Punctuator,
    NilLiteral,
    VarargLiteral,
    StringLiteral,
    BooleanLiteral,
    NumericLiteral,
    Comment,
}

impl TokenKind {
    /// Human-readable kind name used in `unexpected ... near ...`
    /// messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::StringLiteral => "string",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::NumericLiteral => "number",
            TokenKind::BooleanLiteral => "boolean",
            _ => "symbol",
        }
    }
}

/// A single classified unit of source code.
///
/// Carries the original source text verbatim (escapes are validated but
/// not decoded — downstream tooling wants what the user wrote), the full
/// source range, and, for keywords, a cached [`Keyword`] id.
#[derive(Debug, Clone)]
pub struct Token {
    kind: TokenKind,
    text: String,
    range: Range,
    keyword: Option<Keyword>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: Range) -> Self {
        let text = text.into();
        let keyword = if kind == TokenKind::Keyword {
            keyword_id(&text)
        } else {
            None
        };
        Self {
            kind,
            text,
            range,
            keyword,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// The cached keyword identity; `None` for every non-keyword token.
    pub fn keyword(&self) -> Option<Keyword> {
        self.keyword
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_punct(&self) -> bool {
        self.kind == TokenKind::Punctuator
    }

    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::StringLiteral
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == TokenKind::NumericLiteral
    }

    pub fn is_bool(&self) -> bool {
        self.kind == TokenKind::BooleanLiteral
    }

    pub fn is_nil(&self) -> bool {
        self.kind == TokenKind::NilLiteral
    }

    pub fn is_vararg(&self) -> bool {
        self.kind == TokenKind::VarargLiteral
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Literals are everything a `Literal` AST node can hold.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::StringLiteral
                | TokenKind::NumericLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NilLiteral
                | TokenKind::VarargLiteral
        )
    }
}

impl fmt::Display for Token {
    /// Prints only the token's source text. Error messages care about
    /// *what the user wrote*, not the internal structure; `Debug` remains
    /// available for introspection.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
