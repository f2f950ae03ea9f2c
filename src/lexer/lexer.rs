/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * Core Lexer
 *
 * Pull-based scanner over a flat byte buffer. Each call to `lex()` yields
 * exactly one token and advances the internal cursor; once the input is
 * exhausted every further call yields an EOF token. The lexer reports
 * every consumed newline to its `LineIndex` exactly once, so positions
 * computed later (by the parser, for error messages) agree with what was
 * actually scanned.
 *
 * Which punctuator sequences exist at all depends on the dialect feature
 * set: `&`, `|`, `~`, `<<` and `>>` only exist with bitwise operators,
 * `//` only with integer division, `::` only with labels.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawlua
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

use crate::error::SyntaxError;
use crate::features::Features;
use crate::lexer::keywords::is_keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::lineinfo::LineIndex;
use crate::span::{Position, Range};

fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_eol(c: u8) -> bool {
    c == b'\r' || c == b'\n'
}

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_word_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

pub struct Lexer<'a> {
    input: &'a [u8],
    features: Features,
    index: usize,
    line: u32,
    line_start: usize,
    lineinfo: LineIndex,
}

impl<'a> Lexer<'a> {
    pub fn new(features: Features, source: &'a str) -> Self {
        let mut lineinfo = LineIndex::new();
        // Line 0 begins at offset 0.
        lineinfo.new_line(0);
        Self {
            input: source.as_bytes(),
            features,
            index: 0,
            line: 0,
            line_start: 0,
            lineinfo,
        }
    }

    /// Scans and returns the next token.
    ///
    /// Idempotent at end of input: once the buffer is exhausted this keeps
    /// returning EOF tokens. An unrecognized character also terminates the
    /// stream with EOF rather than an error; whether that was premature is
    /// the parser's question to answer.
    pub fn lex(&mut self) -> Result<Token, SyntaxError> {
        self.skip_space();

        if self.at_end() {
            return Ok(self.make_eof());
        }

        let c = self.peek();
        let p = self.peek_next();

        if c == b'-' && p == b'-' {
            return self.scan_comment();
        }

        if is_word_start(c) {
            return Ok(self.scan_ident_or_keyword());
        }

        match c {
            b'\'' | b'"' => return self.scan_string_literal(),

            b'0'..=b'9' => return self.scan_numeric_literal(),

            b'.' => {
                if p.is_ascii_digit() {
                    return self.scan_numeric_literal();
                }
                if p == b'.' {
                    if self.byte_at(self.index + 2) == b'.' {
                        return Ok(self.scan_vararg_literal());
                    }
                    return Ok(self.scan_punctuator("..", 2));
                }
                return Ok(self.scan_punctuator(".", 1));
            }

            b'=' => {
                if p == b'=' {
                    return Ok(self.scan_punctuator("==", 2));
                }
                return Ok(self.scan_punctuator("=", 1));
            }

            b'>' => {
                if self.features.supports(Features::BITWISE_OPERATORS) && p == b'>' {
                    return Ok(self.scan_punctuator(">>", 2));
                }
                if p == b'=' {
                    return Ok(self.scan_punctuator(">=", 2));
                }
                return Ok(self.scan_punctuator(">", 1));
            }

            b'<' => {
                if self.features.supports(Features::BITWISE_OPERATORS) && p == b'<' {
                    return Ok(self.scan_punctuator("<<", 2));
                }
                if p == b'=' {
                    return Ok(self.scan_punctuator("<=", 2));
                }
                return Ok(self.scan_punctuator("<", 1));
            }

            b'~' => {
                if p == b'=' {
                    return Ok(self.scan_punctuator("~=", 2));
                }
                if self.features.supports(Features::BITWISE_OPERATORS) {
                    return Ok(self.scan_punctuator("~", 1));
                }
            }

            b':' => {
                if self.features.supports(Features::LABELS) && p == b':' {
                    return Ok(self.scan_punctuator("::", 2));
                }
                return Ok(self.scan_punctuator(":", 1));
            }

            b'[' => {
                if p == b'[' || p == b'=' {
                    return self.scan_long_string_literal();
                }
                return Ok(self.scan_punctuator("[", 1));
            }

            b'/' => {
                if self.features.supports(Features::INTEGER_DIVISION) && p == b'/' {
                    return Ok(self.scan_punctuator("//", 2));
                }
                return Ok(self.scan_punctuator("/", 1));
            }

            b'&' | b'|' => {
                if self.features.supports(Features::BITWISE_OPERATORS) {
                    let text = (c as char).to_string();
                    return Ok(self.scan_punctuator(&text, 1));
                }
            }

            b'*' | b'^' | b'%' | b',' | b'{' | b'}' | b']' | b'(' | b')' | b';' | b'#' | b'-'
            | b'+' => {
                let text = (c as char).to_string();
                return Ok(self.scan_punctuator(&text, 1));
            }

            _ => {}
        }

        Ok(self.make_eof())
    }

    /// The line index accumulated so far.
    pub fn lineinfo(&self) -> &LineIndex {
        &self.lineinfo
    }

    pub fn into_lineinfo(self) -> LineIndex {
        self.lineinfo
    }

    //
    // Cursor primitives
    //

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn byte_at(&self, i: usize) -> u8 {
        self.input.get(i).copied().unwrap_or(0)
    }

    fn peek(&self) -> u8 {
        self.byte_at(self.index)
    }

    fn peek_next(&self) -> u8 {
        self.byte_at(self.index + 1)
    }

    fn current_position(&self) -> Position {
        Position::new(
            self.line,
            (self.index - self.line_start) as u32,
            self.index as u32,
        )
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        // The lexer only splits at ASCII boundaries.
        std::str::from_utf8(&self.input[start..end]).unwrap_or("")
    }

    fn skip_space(&mut self) {
        while !self.at_end() {
            if is_whitespace(self.peek()) {
                self.index += 1;
            } else if !self.skip_eol() {
                break;
            }
        }
    }

    /// Consumes one line break (CRLF and LFCR count as one) and records it
    /// in the line index. Returns false when the cursor is not at a break.
    fn skip_eol(&mut self) -> bool {
        let c = self.peek();
        if !is_eol(c) {
            return false;
        }
        let p = self.peek_next();
        if (c == b'\r' && p == b'\n') || (c == b'\n' && p == b'\r') {
            self.index += 1;
        }
        self.index += 1;
        self.line += 1;
        self.line_start = self.index;
        self.lineinfo.new_line(self.index as u32);
        true
    }

    fn expect_n(&self, c: u8, n: usize) -> bool {
        (0..n).all(|i| self.byte_at(self.index + i) == c)
    }

    fn make_eof(&self) -> Token {
        let pos = self.current_position();
        Token::new(TokenKind::Eof, "eof", Range::new(pos, pos))
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>, start: Position) -> Token {
        Token::new(kind, text, Range::new(start, self.current_position()))
    }

    //
    // Scanners
    //

    fn scan_ident_or_keyword(&mut self) -> Token {
        let start = self.current_position();
        let token_start = self.index;
        self.index += 1;
        while is_word_part(self.peek()) {
            self.index += 1;
        }

        let text = self.slice(token_start, self.index).to_string();
        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else if text == "true" || text == "false" {
            TokenKind::BooleanLiteral
        } else if text == "nil" {
            TokenKind::NilLiteral
        } else {
            TokenKind::Identifier
        };

        self.token(kind, text, start)
    }

    fn scan_punctuator(&mut self, text: &str, len: usize) -> Token {
        let start = self.current_position();
        self.index += len;
        self.token(TokenKind::Punctuator, text, start)
    }

    fn scan_vararg_literal(&mut self) -> Token {
        let start = self.current_position();
        self.index += 3;
        self.token(TokenKind::VarargLiteral, "...", start)
    }

    fn scan_comment(&mut self) -> Result<Token, SyntaxError> {
        let start = self.current_position();
        self.index += 2; // --

        let content_start = self.index;
        if self.peek() == b'[' {
            if let Some(text) = self.read_long_bracket(true)? {
                return Ok(self.token(TokenKind::Comment, text, start));
            }
        }

        // Single-line comment: runs to end of line, delimiter excluded.
        while !self.at_end() && !is_eol(self.peek()) {
            self.index += 1;
        }
        let text = self.slice(content_start, self.index).to_string();
        Ok(self.token(TokenKind::Comment, text, start))
    }

    fn scan_string_literal(&mut self) -> Result<Token, SyntaxError> {
        let start = self.current_position();
        let delimiter = self.peek();
        self.index += 1;
        let content_start = self.index;

        loop {
            if self.at_end() || is_eol(self.peek()) {
                return Err(SyntaxError::unfinished_string(
                    self.current_position(),
                    self.slice(content_start, self.index),
                ));
            }
            let c = self.peek();
            self.index += 1;
            if c == delimiter {
                break;
            }
            if c == b'\\' {
                self.scan_escape()?;
            }
        }

        let text = self.slice(content_start, self.index - 1).to_string();
        Ok(self.token(TokenKind::StringLiteral, text, start))
    }

    /// Validates one escape sequence; the cursor sits just past the
    /// backslash. The raw text is kept — escapes are checked, not decoded.
    fn scan_escape(&mut self) -> Result<(), SyntaxError> {
        if self.at_end() {
            // The enclosing loop reports the unfinished string.
            return Ok(());
        }

        let esc_start = self.index - 1;
        let c = self.peek();

        if is_eol(c) {
            // Escaped newline continues the string on the next line.
            self.skip_eol();
            return Ok(());
        }

        match c {
            b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' | b'"' | b'\'' => {
                self.index += 1;
                Ok(())
            }

            b'x' if self.features.supports(Features::HEX_ESCAPES) => {
                self.index += 1;
                for _ in 0..2 {
                    if !self.peek().is_ascii_hexdigit() {
                        return Err(SyntaxError::invalid_escape(
                            self.current_position(),
                            self.slice(esc_start, self.index),
                        ));
                    }
                    self.index += 1;
                }
                Ok(())
            }

            b'z' if self.features.supports(Features::SKIP_WHITESPACE_ESCAPE) => {
                self.index += 1;
                self.skip_space();
                Ok(())
            }

            b'u' if self.features.supports(Features::UNICODE_ESCAPES) => {
                self.index += 1;
                if self.peek() != b'{' {
                    return Err(SyntaxError::invalid_escape(
                        self.current_position(),
                        self.slice(esc_start, self.index),
                    ));
                }
                self.index += 1;
                let mut digits = 0;
                while self.peek().is_ascii_hexdigit() {
                    self.index += 1;
                    digits += 1;
                }
                if digits == 0 || self.peek() != b'}' {
                    return Err(SyntaxError::invalid_escape(
                        self.current_position(),
                        self.slice(esc_start, self.index),
                    ));
                }
                self.index += 1;
                Ok(())
            }

            b'0'..=b'9' => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 3 && self.peek().is_ascii_digit() {
                    value = value * 10 + u32::from(self.peek() - b'0');
                    self.index += 1;
                    digits += 1;
                }
                if value > 255 {
                    return Err(SyntaxError::decimal_escape_too_large(
                        self.current_position(),
                        self.slice(esc_start, self.index),
                    ));
                }
                Ok(())
            }

            _ => {
                if self.features.supports(Features::STRICT_ESCAPES) {
                    return Err(SyntaxError::invalid_escape(
                        self.current_position(),
                        self.slice(esc_start, self.index + 1),
                    ));
                }
                // Lenient dialects keep the unknown escape verbatim.
                self.index += 1;
                Ok(())
            }
        }
    }

    fn scan_long_string_literal(&mut self) -> Result<Token, SyntaxError> {
        let start = self.current_position();
        let open_index = self.index;
        match self.read_long_bracket(false)? {
            Some(text) => Ok(self.token(TokenKind::StringLiteral, text, start)),
            None => {
                // `[=` without a matching `[` is just an index bracket.
                self.index = open_index;
                Ok(self.scan_punctuator("[", 1))
            }
        }
    }

    /// Reads a `[=*[ ... ]=*]` body, requiring the equals counts to match.
    ///
    /// Returns `None` when the cursor is not actually at a long-bracket
    /// opener (cursor is left one past the `[`, matching how a `--[x`
    /// comment keeps scanning as a line comment). A newline immediately
    /// after the opening bracket is discarded.
    fn read_long_bracket(&mut self, is_comment: bool) -> Result<Option<String>, SyntaxError> {
        self.index += 1; // skip [

        let mut level = 0;
        while self.byte_at(self.index + level) == b'=' {
            level += 1;
        }
        if self.byte_at(self.index + level) != b'[' {
            return Ok(None);
        }
        self.index += level + 1;

        if is_eol(self.peek()) {
            self.skip_eol();
        }

        let content_start = self.index;
        loop {
            if self.at_end() {
                let err = if is_comment {
                    SyntaxError::unfinished_long_comment(self.current_position(), "<eof>")
                } else {
                    SyntaxError::unfinished_long_string(self.current_position(), "<eof>")
                };
                return Err(err);
            }

            let c = self.peek();
            if is_eol(c) {
                self.skip_eol();
                continue;
            }

            self.index += 1;
            if c == b']' && self.expect_n(b'=', level) && self.byte_at(self.index + level) == b']'
            {
                let content_end = self.index - 1;
                self.index += level + 1;
                return Ok(Some(self.slice(content_start, content_end).to_string()));
            }
        }
    }

    fn scan_numeric_literal(&mut self) -> Result<Token, SyntaxError> {
        let start = self.current_position();
        let token_start = self.index;

        if self.peek() == b'0' && (self.peek_next() == b'x' || self.peek_next() == b'X') {
            self.read_hex_literal(token_start)?;
        } else {
            self.read_dec_literal(token_start)?;
        }

        let text = self.slice(token_start, self.index).to_string();
        Ok(self.token(TokenKind::NumericLiteral, text, start))
    }

    fn read_dec_literal(&mut self, token_start: usize) -> Result<(), SyntaxError> {
        while self.peek().is_ascii_digit() {
            self.index += 1;
        }
        if self.peek() == b'.' {
            self.index += 1;
            while self.peek().is_ascii_digit() {
                self.index += 1;
            }
        }

        if self.peek() == b'e' || self.peek() == b'E' {
            self.index += 1;
            if self.peek() == b'+' || self.peek() == b'-' {
                self.index += 1;
            }
            if !self.peek().is_ascii_digit() {
                return Err(SyntaxError::malformed_number(
                    self.current_position(),
                    self.slice(token_start, self.index),
                ));
            }
            while self.peek().is_ascii_digit() {
                self.index += 1;
            }
        }
        Ok(())
    }

    fn read_hex_literal(&mut self, token_start: usize) -> Result<(), SyntaxError> {
        self.index += 2; // 0x

        // The mantissa may be integral, fractional or both, but needs at
        // least one hex digit somewhere: `0x.8` is fine, `0x` is not.
        let mut digits = 0;
        while self.peek().is_ascii_hexdigit() {
            self.index += 1;
            digits += 1;
        }
        if self.peek() == b'.' {
            self.index += 1;
            while self.peek().is_ascii_hexdigit() {
                self.index += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(SyntaxError::malformed_number(
                self.current_position(),
                self.slice(token_start, self.index),
            ));
        }

        if self.peek() == b'p' || self.peek() == b'P' {
            self.index += 1;
            if self.peek() == b'+' || self.peek() == b'-' {
                self.index += 1;
            }
            if !self.peek().is_ascii_digit() {
                return Err(SyntaxError::malformed_number(
                    self.current_position(),
                    self.slice(token_start, self.index),
                ));
            }
            while self.peek().is_ascii_digit() {
                self.index += 1;
            }
        }
        Ok(())
    }
}
