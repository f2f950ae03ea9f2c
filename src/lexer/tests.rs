/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      lexer/tests.rs
 * Purpose:   Unit tests for the lexical analysis stage.
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

use crate::error::SyntaxError;
use crate::features::Dialect;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Drains the lexer, returning every token up to but excluding EOF.
fn lex_all(dialect: Dialect, source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(dialect.features(), source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex().expect("no lexical error expected");
        if token.is_eof() {
            return tokens;
        }
        tokens.push(token);
    }
}

fn lex_error(dialect: Dialect, source: &str) -> SyntaxError {
    let mut lexer = Lexer::new(dialect.features(), source);
    loop {
        match lexer.lex() {
            Ok(token) if token.is_eof() => panic!("expected a lexical error"),
            Ok(_) => {}
            Err(err) => return err,
        }
    }
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind()).collect()
}

#[test]
fn lexes_a_local_declaration() {
    let tokens = lex_all(Dialect::Lua53, "local x = 1");
    assert_eq!(texts(&tokens), vec!["local", "x", "=", "1"]);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Punctuator,
            TokenKind::NumericLiteral,
        ]
    );
    assert_eq!(tokens[0].keyword(), Some(Keyword::Local));
    assert_eq!(tokens[1].keyword(), None);
}

#[test]
fn eof_token_is_idempotent() {
    let mut lexer = Lexer::new(Dialect::Lua51.features(), "x");
    assert!(lexer.lex().unwrap().is_ident());
    for _ in 0..3 {
        let eof = lexer.lex().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.text(), "eof");
    }
}

#[test]
fn classifies_literal_words() {
    let tokens = lex_all(Dialect::Lua51, "nil true false and notnil");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::NilLiteral,
            TokenKind::BooleanLiteral,
            TokenKind::BooleanLiteral,
            TokenKind::Keyword,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(tokens[3].keyword(), Some(Keyword::And));
}

#[test]
fn positions_are_zero_based() {
    let tokens = lex_all(Dialect::Lua51, "local x\nreturn x");
    let ret = &tokens[2];
    assert_eq!(ret.text(), "return");
    assert_eq!(ret.range().start.line, 1);
    assert_eq!(ret.range().start.column, 0);
    assert_eq!(ret.range().start.offset, 8);
    let x = &tokens[3];
    assert_eq!(x.range().start.line, 1);
    assert_eq!(x.range().start.column, 7);
}

#[test]
fn crlf_counts_as_one_line_break() {
    let tokens = lex_all(Dialect::Lua51, "a\r\nb\n\rc");
    assert_eq!(tokens[1].range().start.line, 1);
    assert_eq!(tokens[2].range().start.line, 2);
    assert_eq!(tokens[2].range().start.column, 0);
}

#[test]
fn line_comment_is_a_token() {
    let tokens = lex_all(Dialect::Lua51, "-- hello\nx");
    assert_eq!(tokens[0].kind(), TokenKind::Comment);
    assert_eq!(tokens[0].text(), " hello");
    assert_eq!(tokens[1].text(), "x");
}

#[test]
fn long_comment_spans_lines() {
    let tokens = lex_all(Dialect::Lua51, "--[==[ one\ntwo ]==]\ny");
    assert_eq!(tokens[0].kind(), TokenKind::Comment);
    assert_eq!(tokens[0].text(), " one\ntwo ");
    assert_eq!(tokens[1].range().start.line, 2);
}

#[test]
fn dashed_bracket_without_opener_is_a_line_comment() {
    let tokens = lex_all(Dialect::Lua51, "--[ not long\nz");
    assert_eq!(tokens[0].kind(), TokenKind::Comment);
    assert_eq!(tokens[0].text(), "[ not long");
}

#[test]
fn long_string_discards_leading_newline() {
    let tokens = lex_all(Dialect::Lua51, "[[\nhello]]");
    assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);
    assert_eq!(tokens[0].text(), "hello");
}

#[test]
fn long_string_levels_must_match() {
    let tokens = lex_all(Dialect::Lua51, "[=[ a ]] b ]=]");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text(), " a ]] b ");
}

#[test]
fn string_keeps_raw_escapes() {
    let tokens = lex_all(Dialect::Lua53, r#"x = "a\nb\065""#);
    let s = &tokens[2];
    assert_eq!(s.kind(), TokenKind::StringLiteral);
    assert_eq!(s.text(), r"a\nb\065");
}

#[test]
fn unfinished_string_reports_scanned_text() {
    let err = lex_error(Dialect::Lua51, "\"as3d3dd3");
    assert_eq!(err.to_string(), "[0:9] unfinished string near 'as3d3dd3'");
}

#[test]
fn newline_terminates_a_short_string() {
    let err = lex_error(Dialect::Lua51, "\"ab\ncd\"");
    assert!(err.to_string().contains("unfinished string near 'ab'"));
}

#[test]
fn unfinished_long_string_reports_eof() {
    let err = lex_error(Dialect::Lua51, "[[never closed");
    assert!(err.to_string().contains("unfinished long string near '<eof>'"));
}

#[test]
fn unfinished_long_comment_reports_eof() {
    let err = lex_error(Dialect::Lua51, "--[[never closed");
    assert!(err
        .to_string()
        .contains("unfinished long comment near '<eof>'"));
}

#[test]
fn unknown_escape_is_fatal_only_with_strict_escapes() {
    let tokens = lex_all(Dialect::Lua51, r#""a\qb""#);
    assert_eq!(tokens[0].text(), r"a\qb");

    let err = lex_error(Dialect::Lua52, r#""a\qb""#);
    assert!(err.to_string().contains("invalid escape sequence"));
}

#[test]
fn decimal_escape_over_255_is_fatal() {
    let err = lex_error(Dialect::Lua51, r#""\300""#);
    assert!(err.to_string().contains("decimal escape too large"));
}

#[test]
fn hex_and_unicode_escapes_are_dialect_gated() {
    let tokens = lex_all(Dialect::Lua53, r#""\x41\u{1F600}""#);
    assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);

    // Without the feature, \x is an unknown escape; 5.1 is lenient.
    let tokens = lex_all(Dialect::Lua51, r#""\x41""#);
    assert_eq!(tokens[0].text(), r"\x41");

    let err = lex_error(Dialect::Lua53, r#""\xZZ""#);
    assert!(err.to_string().contains("invalid escape sequence"));
}

#[test]
fn numeric_literal_shapes() {
    let tokens = lex_all(Dialect::Lua53, "3 3.0 3.1416e-2 .5 0xBEBADA 0x1p4 0x.8");
    assert!(tokens.iter().all(|t| t.kind() == TokenKind::NumericLiteral));
    assert_eq!(
        texts(&tokens),
        vec!["3", "3.0", "3.1416e-2", ".5", "0xBEBADA", "0x1p4", "0x.8"]
    );
}

#[test]
fn malformed_numbers_are_fatal() {
    let err = lex_error(Dialect::Lua51, "x = 3e");
    assert!(err.to_string().contains("malformed number near '3e'"));

    let err = lex_error(Dialect::Lua53, "0x");
    assert!(err.to_string().contains("malformed number near '0x'"));
}

#[test]
fn concat_vararg_and_dot_disambiguate() {
    let tokens = lex_all(Dialect::Lua51, "a.b .. c ...");
    assert_eq!(texts(&tokens), vec!["a", ".", "b", "..", "c", "..."]);
    assert_eq!(tokens[5].kind(), TokenKind::VarargLiteral);
}

#[test]
fn bitwise_punctuators_require_the_feature() {
    let tokens = lex_all(Dialect::Lua53, "a & b | c ~ d << e >> f // g");
    assert_eq!(
        texts(&tokens),
        vec!["a", "&", "b", "|", "c", "~", "d", "<<", "e", ">>", "f", "//", "g"]
    );

    // Under 5.1 the `&` is not a token at all; the stream ends there.
    let tokens = lex_all(Dialect::Lua51, "a & b");
    assert_eq!(texts(&tokens), vec!["a"]);
}

#[test]
fn shift_like_pairs_fall_back_to_comparisons() {
    let tokens = lex_all(Dialect::Lua51, "a << b >> c");
    assert_eq!(texts(&tokens), vec!["a", "<", "<", "b", ">", ">", "c"]);
}

#[test]
fn double_colon_requires_labels() {
    let tokens = lex_all(Dialect::Lua52, "::top::");
    assert_eq!(texts(&tokens), vec!["::", "top", "::"]);

    let tokens = lex_all(Dialect::Lua51, "a:b()");
    assert_eq!(texts(&tokens), vec!["a", ":", "b", "(", ")"]);
}

#[test]
fn not_equals_lexes_in_every_dialect() {
    let tokens = lex_all(Dialect::Lua51, "a ~= b");
    assert_eq!(texts(&tokens), vec!["a", "~=", "b"]);
}

#[test]
fn escaped_newline_continues_a_string() {
    let tokens = lex_all(Dialect::Lua51, "\"one\\\ntwo\" x");
    assert_eq!(tokens[0].kind(), TokenKind::StringLiteral);
    assert_eq!(tokens[1].text(), "x");
    assert_eq!(tokens[1].range().start.line, 1);
}
