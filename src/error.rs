/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      error.rs
 * Purpose:   The syntax error type raised by the lexer and parser.
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

use crate::span::Position;
use std::fmt;

/// What went wrong, independent of the rendered message.
///
/// Lexical kinds (malformed number, the unfinished family, bad escapes)
/// and syntactic kinds (expected / unexpected / invalid assignment target)
/// are all fatal: the front end stops at the first one and never attempts
/// resynchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    Unexpected,
    Expected,
    ExpectedToken,
    UnfinishedString,
    UnfinishedLongString,
    UnfinishedLongComment,
    MalformedNumber,
    InvalidVar,
    DecimalEscapeTooLarge,
    InvalidEscape,
}

/// A fatal lexical or syntactic error with its exact source position.
///
/// Rendered as `"[{line}:{column}] {message}"`, e.g.
/// `[0:9] unfinished string near 'as3d3dd3'`.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl SyntaxError {
    fn new(kind: SyntaxErrorKind, message: String, pos: Position) -> Self {
        Self {
            kind,
            message,
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
        }
    }

    /// A required punctuator or keyword was not found.
    pub fn expected(pos: Position, expect: &str, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::Expected,
            format!("expected '{}' near '{}'", expect, near),
            pos,
        )
    }

    /// A token that cannot start any production, qualified by its kind.
    pub fn unexpected(pos: Position, kind: &str, found: &str, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::Unexpected,
            format!("unexpected {} '{}' near '{}'", kind, found, near),
            pos,
        )
    }

    /// A production needed something (`<name>`, `<expression>`, function
    /// arguments) that the current token cannot provide.
    pub fn unexpected_token(pos: Position, desc: &str, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::ExpectedToken,
            format!("unexpected {} near '{}'", desc, near),
            pos,
        )
    }

    pub fn unfinished_string(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::UnfinishedString,
            format!("unfinished string near '{}'", near),
            pos,
        )
    }

    pub fn unfinished_long_string(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::UnfinishedLongString,
            format!("unfinished long string near '{}'", near),
            pos,
        )
    }

    pub fn unfinished_long_comment(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::UnfinishedLongComment,
            format!("unfinished long comment near '{}'", near),
            pos,
        )
    }

    pub fn malformed_number(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::MalformedNumber,
            format!("malformed number near '{}'", near),
            pos,
        )
    }

    /// An assignment target that is not an identifier, member or index.
    pub fn invalid_var(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::InvalidVar,
            format!("invalid assignment target near '{}'", near),
            pos,
        )
    }

    pub fn decimal_escape_too_large(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::DecimalEscapeTooLarge,
            format!("decimal escape too large near '{}'", near),
            pos,
        )
    }

    pub fn invalid_escape(pos: Position, near: &str) -> Self {
        Self::new(
            SyntaxErrorKind::InvalidEscape,
            format!("invalid escape sequence near '{}'", near),
            pos,
        )
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_position_prefix() {
        let pos = Position::new(0, 9, 9);
        let err = SyntaxError::unfinished_string(pos, "as3d3dd3");
        assert_eq!(err.to_string(), "[0:9] unfinished string near 'as3d3dd3'");
        assert_eq!(err.kind, SyntaxErrorKind::UnfinishedString);
    }

    #[test]
    fn unexpected_carries_token_kind() {
        let pos = Position::new(0, 9, 9);
        let err = SyntaxError::unexpected(pos, "identifier", "x", "eof");
        assert_eq!(err.to_string(), "[0:9] unexpected identifier 'x' near 'eof'");
    }

    #[test]
    fn expected_names_the_missing_token() {
        let pos = Position::new(2, 4, 30);
        let err = SyntaxError::expected(pos, "end", "eof");
        assert_eq!(err.to_string(), "[2:4] expected 'end' near 'eof'");
    }
}
