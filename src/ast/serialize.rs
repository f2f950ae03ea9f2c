/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      ast/serialize.rs
 * Purpose:   Stable JSON shape for syntax tree nodes.
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
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Nodes serialize as flat maps: `type` and `range` first, then the
/// kind-specific fields under their frozen names. Editor integrations
/// match on these exact keys, so the shape is part of the public contract.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        map.serialize_entry("range", &self.range)?;

        match &self.kind {
            NodeKind::Chunk { body }
            | NodeKind::Do { body }
            | NodeKind::ElseClause { body } => {
                map.serialize_entry("body", body)?;
            }
            NodeKind::Label { label } | NodeKind::Goto { label } => {
                map.serialize_entry("label", label)?;
            }
            NodeKind::Break => {}
            NodeKind::Return { expressions } => {
                map.serialize_entry("expressions", expressions)?;
            }
            NodeKind::If { clauses } => {
                map.serialize_entry("clauses", clauses)?;
            }
            NodeKind::IfClause { condition, body }
            | NodeKind::ElseifClause { condition, body }
            | NodeKind::While { condition, body }
            | NodeKind::Repeat { condition, body } => {
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("body", body)?;
            }
            NodeKind::ForNumeric {
                variable,
                start,
                end,
                step,
                body,
            } => {
                map.serialize_entry("variable", variable)?;
                map.serialize_entry("start", start)?;
                map.serialize_entry("end", end)?;
                if let Some(step) = step {
                    map.serialize_entry("step", step)?;
                }
                map.serialize_entry("body", body)?;
            }
            NodeKind::ForGeneric {
                variables,
                iterators,
                body,
            } => {
                map.serialize_entry("variables", variables)?;
                map.serialize_entry("iterators", iterators)?;
                map.serialize_entry("body", body)?;
            }
            NodeKind::Local { variables, init }
            | NodeKind::Assignment { variables, init } => {
                map.serialize_entry("variables", variables)?;
                map.serialize_entry("init", init)?;
            }
            NodeKind::CallStatement { expression } => {
                map.serialize_entry("expression", expression)?;
            }
            NodeKind::Function {
                identifier,
                parameters,
                body,
            } => {
                map.serialize_entry("identifier", identifier)?;
                map.serialize_entry("parameters", parameters)?;
                map.serialize_entry("body", body)?;
            }
            NodeKind::Identifier { name } => {
                map.serialize_entry("name", name)?;
            }
            NodeKind::Literal { value_type, value } => {
                map.serialize_entry("value_type", value_type)?;
                map.serialize_entry("value", value)?;
            }
            NodeKind::Unary { operator, argument } => {
                map.serialize_entry("operator", operator)?;
                map.serialize_entry("argument", argument)?;
            }
            NodeKind::Binary {
                operator,
                left,
                right,
            } => {
                map.serialize_entry("operator", operator)?;
                map.serialize_entry("left", left)?;
                map.serialize_entry("right", right)?;
            }
            NodeKind::Member {
                base,
                identifier,
                indexer,
            } => {
                map.serialize_entry("base", base)?;
                map.serialize_entry("identifier", identifier)?;
                map.serialize_entry("indexer", indexer)?;
            }
            NodeKind::Index { base, indexer } => {
                map.serialize_entry("base", base)?;
                map.serialize_entry("indexer", indexer)?;
            }
            NodeKind::Call { base, arguments } => {
                map.serialize_entry("base", base)?;
                map.serialize_entry("arguments", arguments)?;
            }
            NodeKind::TableCall { base, argument }
            | NodeKind::StringCall { base, argument } => {
                map.serialize_entry("base", base)?;
                map.serialize_entry("argument", argument)?;
            }
            NodeKind::TableConstructor { fields } => {
                map.serialize_entry("fields", fields)?;
            }
            NodeKind::TableKey { key, value }
            | NodeKind::TableKeyString { key, value } => {
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value)?;
            }
            NodeKind::TableValue { value } => {
                map.serialize_entry("value", value)?;
            }
        }

        map.end()
    }
}
