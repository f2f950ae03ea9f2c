/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      parser/helpers.rs
 * Purpose:   Token classification and the binary precedence table.
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

use super::parser::Parser;
use crate::lexer::{Keyword, Token};

impl<'a> Parser<'a> {
    /// A block runs until `else`, `elseif`, `end`, `until` or EOF.
    pub(super) fn is_block_follow(&self) -> bool {
        if self.token.is_eof() {
            return true;
        }
        matches!(
            self.token.keyword(),
            Some(Keyword::Else) | Some(Keyword::Elseif) | Some(Keyword::End) | Some(Keyword::Until)
        )
    }

    /// `not`, `-`, `#` and (with bitwise operators enabled) `~`.
    pub(super) fn is_unary_op(&self, token: &Token) -> bool {
        if token.is_punct() && token.text().len() == 1 {
            return matches!(token.text().as_bytes()[0], b'#' | b'-' | b'~');
        }
        token.keyword() == Some(Keyword::Not)
    }
}

/// Binding strength of a binary operator; 0 means "not a binary
/// operator". `^` and `..` are right-associative, handled at the call
/// site by lowering their recursion threshold by one.
pub(super) fn binary_precedence(op: &str) -> u8 {
    match op {
        "or" => 1,
        "and" => 2,
        "<" | ">" | "<=" | ">=" | "~=" | "==" => 3,
        "|" => 4,
        "~" => 5,
        "&" => 6,
        "<<" | ">>" => 7,
        ".." => 8,
        "+" | "-" => 9,
        "*" | "/" | "//" | "%" => 10,
        "^" => 12,
        _ => 0,
    }
}
