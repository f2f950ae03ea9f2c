/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   The fixed Lua keyword set and its identity tokens.
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

/// Identity of a reserved Lua keyword.
///
/// Cached on each keyword token once at construction so the parser can
/// dispatch on it without re-comparing strings. `true`, `false` and `nil`
/// are deliberately absent: they lex as literals, not keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Do,
    If,
    In,
    Or,
    And,
    End,
    For,
    Not,
    Else,
    Then,
    Goto,
    Break,
    Local,
    Until,
    While,
    Elseif,
    Repeat,
    Return,
    Function,
}

/// Maps an identifier-shaped word onto its keyword identity, if any.
pub fn keyword_id(word: &str) -> Option<Keyword> {
    let kw = match word {
        "do" => Keyword::Do,
        "if" => Keyword::If,
        "in" => Keyword::In,
        "or" => Keyword::Or,
        "and" => Keyword::And,
        "end" => Keyword::End,
        "for" => Keyword::For,
        "not" => Keyword::Not,
        "else" => Keyword::Else,
        "then" => Keyword::Then,
        "goto" => Keyword::Goto,
        "break" => Keyword::Break,
        "local" => Keyword::Local,
        "until" => Keyword::Until,
        "while" => Keyword::While,
        "elseif" => Keyword::Elseif,
        "repeat" => Keyword::Repeat,
        "return" => Keyword::Return,
        "function" => Keyword::Function,
        _ => return None,
    };
    Some(kw)
}

/// Determines whether a given word is a reserved Lua keyword.
pub fn is_keyword(word: &str) -> bool {
    keyword_id(word).is_some()
}
