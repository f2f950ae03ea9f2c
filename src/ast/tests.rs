/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      ast/tests.rs
 * Purpose:   Unit tests for the node model and its serialized shape.
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

use super::{Node, NodeKind};
use crate::lexer::TokenKind;
use crate::span::{Position, Range};

fn span(start: u32, end: u32) -> Range {
    Range::new(Position::new(0, start, start), Position::new(0, end, end))
}

fn ident(name: &str, start: u32, end: u32) -> Node {
    Node::new(
        NodeKind::Identifier {
            name: name.to_string(),
        },
        span(start, end),
    )
}

#[test]
fn type_names_are_frozen() {
    assert_eq!(
        Node::new(NodeKind::Chunk { body: vec![] }, span(0, 0)).type_name(),
        "stmt_chunk"
    );
    assert_eq!(
        NodeKind::TableConstructor { fields: vec![] }.type_name(),
        "expr_table_constructor"
    );
    assert_eq!(NodeKind::Break.type_name(), "stmt_break");
    assert_eq!(
        NodeKind::CallStatement {
            expression: Box::new(ident("f", 0, 1)),
        }
        .type_name(),
        "stmt_call"
    );
}

#[test]
fn identifier_serializes_name_and_range() {
    let node = ident("x", 6, 7);
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "stmt_ident");
    assert_eq!(json["name"], "x");
    assert_eq!(json["range"]["start"]["offset"], 6);
    assert_eq!(json["range"]["end"]["column"], 7);
}

#[test]
fn literal_carries_its_token_kind() {
    let node = Node::new(
        NodeKind::Literal {
            value_type: TokenKind::NumericLiteral,
            value: "1".to_string(),
        },
        span(10, 11),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "stmt_literal");
    assert_eq!(json["value_type"], "numeric_literal");
    assert_eq!(json["value"], "1");
}

#[test]
fn local_uses_variables_and_init() {
    let node = Node::new(
        NodeKind::Local {
            variables: vec![ident("x", 6, 7)],
            init: vec![Node::new(
                NodeKind::Literal {
                    value_type: TokenKind::NumericLiteral,
                    value: "1".to_string(),
                },
                span(10, 11),
            )],
        },
        span(0, 11),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "stmt_local");
    assert_eq!(json["variables"][0]["name"], "x");
    assert_eq!(json["init"][0]["value"], "1");
}

#[test]
fn numeric_for_omits_absent_step() {
    let body = vec![];
    let node = Node::new(
        NodeKind::ForNumeric {
            variable: Box::new(ident("i", 4, 5)),
            start: Box::new(ident("a", 8, 9)),
            end: Box::new(ident("b", 11, 12)),
            step: None,
            body,
        },
        span(0, 16),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "stmt_for_numeric");
    assert!(json.get("step").is_none());
    assert!(json.get("body").is_some());
}

#[test]
fn anonymous_function_serializes_null_identifier() {
    let node = Node::new(
        NodeKind::Function {
            identifier: None,
            parameters: vec![],
            body: vec![],
        },
        span(0, 14),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "stmt_function");
    assert!(json["identifier"].is_null());
}

#[test]
fn member_keeps_the_indexer_text() {
    let node = Node::new(
        NodeKind::Member {
            base: Box::new(ident("t", 0, 1)),
            identifier: Box::new(ident("f", 2, 3)),
            indexer: ":".to_string(),
        },
        span(0, 3),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "expr_member");
    assert_eq!(json["indexer"], ":");
    assert_eq!(json["identifier"]["name"], "f");
}
