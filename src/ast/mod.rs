/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      ast/mod.rs
 * Purpose:   The abstract syntax tree produced by the parser.
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

mod serialize;

use crate::lexer::TokenKind;
use crate::span::Range;

/// One node of the syntax tree.
///
/// The tree is fully owned: each node holds its children by value (through
/// `Box` and `Vec`), so dropping the chunk drops everything. Every node
/// carries the source range it was parsed from, assigned exactly once when
/// the node is completed; a parent's range always contains its children's.
///
/// `is_local` is meaningful on identifiers only. The parser sets it while
/// it still knows which names are in scope, so consumers never have to
/// re-derive scoping from the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range,
    pub is_local: bool,
}

impl Node {
    pub fn new(kind: NodeKind, range: Range) -> Self {
        Self {
            kind,
            range,
            is_local: false,
        }
    }

    /// The stable name of this node's kind, as used in serialized output.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The identifier's name, when this node is one.
    pub fn ident_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

/// Every syntactic form the parser can produce, with its children.
///
/// Statements and expressions share one enum; the parser guarantees each
/// variant only ever appears where the grammar allows it. `CallStatement`
/// wraps a call expression used in statement position.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Chunk {
        body: Vec<Node>,
    },
    Label {
        label: Box<Node>,
    },
    Break,
    Goto {
        label: Box<Node>,
    },
    Return {
        expressions: Vec<Node>,
    },
    If {
        clauses: Vec<Node>,
    },
    IfClause {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ElseifClause {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ElseClause {
        body: Vec<Node>,
    },
    Do {
        body: Vec<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    Repeat {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    ForNumeric {
        variable: Box<Node>,
        start: Box<Node>,
        end: Box<Node>,
        step: Option<Box<Node>>,
        body: Vec<Node>,
    },
    ForGeneric {
        variables: Vec<Node>,
        iterators: Vec<Node>,
        body: Vec<Node>,
    },
    Local {
        variables: Vec<Node>,
        init: Vec<Node>,
    },
    Assignment {
        variables: Vec<Node>,
        init: Vec<Node>,
    },
    /// A call expression in statement position.
    CallStatement {
        expression: Box<Node>,
    },
    Function {
        /// `None` for anonymous function expressions.
        identifier: Option<Box<Node>>,
        parameters: Vec<Node>,
        body: Vec<Node>,
    },
    Identifier {
        name: String,
    },
    /// A literal keeps the raw source text; `value_type` records which
    /// token produced it.
    Literal {
        value_type: TokenKind,
        value: String,
    },
    Unary {
        operator: String,
        argument: Box<Node>,
    },
    Binary {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `base.name` or `base:name`; `indexer` is the punctuator text.
    Member {
        base: Box<Node>,
        identifier: Box<Node>,
        indexer: String,
    },
    Index {
        base: Box<Node>,
        indexer: Box<Node>,
    },
    Call {
        base: Box<Node>,
        arguments: Vec<Node>,
    },
    TableCall {
        base: Box<Node>,
        argument: Box<Node>,
    },
    StringCall {
        base: Box<Node>,
        argument: Box<Node>,
    },
    TableConstructor {
        fields: Vec<Node>,
    },
    /// `[key] = value` inside a table constructor.
    TableKey {
        key: Box<Node>,
        value: Box<Node>,
    },
    /// `name = value` inside a table constructor.
    TableKeyString {
        key: Box<Node>,
        value: Box<Node>,
    },
    /// A positional value inside a table constructor.
    TableValue {
        value: Box<Node>,
    },
}

impl NodeKind {
    /// The frozen serialization name of this kind. These names are part of
    /// the crate's output format and must never change.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Chunk { .. } => "stmt_chunk",
            NodeKind::Label { .. } => "stmt_label",
            NodeKind::Break => "stmt_break",
            NodeKind::Goto { .. } => "stmt_goto",
            NodeKind::Return { .. } => "stmt_return",
            NodeKind::If { .. } => "stmt_if",
            NodeKind::IfClause { .. } => "stmt_if_clause",
            NodeKind::ElseifClause { .. } => "stmt_elseif_clause",
            NodeKind::ElseClause { .. } => "stmt_else_clause",
            NodeKind::Do { .. } => "stmt_do",
            NodeKind::While { .. } => "stmt_while",
            NodeKind::Repeat { .. } => "stmt_repeat",
            NodeKind::Local { .. } => "stmt_local",
            NodeKind::Assignment { .. } => "stmt_assignment",
            NodeKind::CallStatement { .. } => "stmt_call",
            NodeKind::Function { .. } => "stmt_function",
            NodeKind::ForNumeric { .. } => "stmt_for_numeric",
            NodeKind::ForGeneric { .. } => "stmt_for_generic",
            NodeKind::Identifier { .. } => "stmt_ident",
            NodeKind::Literal { .. } => "stmt_literal",
            NodeKind::TableKey { .. } => "stmt_table_key",
            NodeKind::TableKeyString { .. } => "stmt_table_key_string",
            NodeKind::TableValue { .. } => "stmt_table_value",
            NodeKind::TableConstructor { .. } => "expr_table_constructor",
            NodeKind::Binary { .. } => "expr_binary",
            NodeKind::Unary { .. } => "expr_unary",
            NodeKind::Member { .. } => "expr_member",
            NodeKind::Index { .. } => "expr_index",
            NodeKind::Call { .. } => "expr_call",
            NodeKind::TableCall { .. } => "expr_table_call",
            NodeKind::StringCall { .. } => "expr_string_call",
        }
    }
}

#[cfg(test)]
mod tests;
