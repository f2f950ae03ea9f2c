/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      resolver/symbol.rs
 * Purpose:   Symbols, their inferred kinds, and human-readable rendering.
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

use crate::names::{FileId, NameId, NameTable};
use crate::resolver::env::EnvId;
use crate::span::Range;
use std::ops::{Index, IndexMut};

/// Arena handle of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Where a symbol was defined or referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    pub range: Range,
}

/// The inferred shape of a symbol.
///
/// `Ref` and `Undefined` are indirections: a `Ref` pins its target at
/// creation time, an `Undefined` stands for a name that was used before
/// anything in scope defined it and may resolve later. `ReturnsOf` is a
/// lazy handle onto the n-th return value of a named function; the walker
/// never mints one, it exists for query tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Any,
    Number,
    Str,
    Boolean,
    Table {
        fields: Vec<SymbolId>,
    },
    Function {
        params: Vec<SymbolId>,
        /// Positional return slots; a slot left `None` by unification
        /// renders as `any`.
        returns: Vec<Option<SymbolId>>,
        env: EnvId,
    },
    /// One slot holding several possible kinds, deduplicated by kind.
    Multi {
        members: Vec<SymbolId>,
    },
    /// The value list a call expression produces.
    Group {
        members: Vec<SymbolId>,
    },
    ReturnsOf {
        index: u8,
        resolved: Option<SymbolId>,
    },
    Ref {
        target: SymbolId,
    },
    Undefined {
        resolved: Option<SymbolId>,
    },
}

impl SymbolKind {
    /// True for the kinds a binding may adopt in place when the rvalue is
    /// still anonymous.
    pub fn is_adoptable(&self) -> bool {
        matches!(
            self,
            SymbolKind::Any
                | SymbolKind::Number
                | SymbolKind::Str
                | SymbolKind::Boolean
                | SymbolKind::Table { .. }
                | SymbolKind::Function { .. }
        )
    }

    /// Same-kind check used for `Multi` deduplication; payloads are
    /// ignored, two tables are "the same kind".
    pub fn same_kind(&self, other: &SymbolKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// One resolved entity: a name binding, a literal value, a callee, a
/// table field.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: Option<NameId>,
    pub env: EnvId,
    pub location: Option<Location>,
    pub references: Vec<Location>,
    pub is_local: bool,
    pub kind: SymbolKind,
}

/// Flat storage for symbols, addressed by [`SymbolId`]. Nothing is ever
/// freed; every symbol minted during a walk stays queryable.
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, name: Option<NameId>, env: EnvId, kind: SymbolKind) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name,
            env,
            location: None,
            references: Vec::new(),
            is_local: false,
            kind,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Follows `Ref` chains to the symbol they ultimately point at.
    pub fn definition(&self, id: SymbolId) -> SymbolId {
        match self[id].kind {
            SymbolKind::Ref { target } => self.definition(target),
            _ => id,
        }
    }

    /// Renders the symbol's type alone, without its name.
    ///
    /// The output is stable: it depends only on the walk order of the
    /// source, never on arena layout or map iteration.
    pub fn type_string(&self, id: SymbolId, names: &NameTable) -> String {
        match &self[id].kind {
            SymbolKind::Any => "any".to_string(),
            SymbolKind::Number => "number".to_string(),
            SymbolKind::Str => "string".to_string(),
            SymbolKind::Boolean => "boolean".to_string(),
            SymbolKind::Table { fields } => {
                if fields.is_empty() {
                    return "{...}".to_string();
                }
                let shown: Vec<String> = fields
                    .iter()
                    .take(5)
                    .map(|&f| self.display(f, names))
                    .collect();
                if fields.len() > 5 {
                    format!("{{\n{}\n...\n}}", shown.join(",\n"))
                } else {
                    format!("{{\n{}\n}}", shown.join(",\n"))
                }
            }
            SymbolKind::Function {
                params, returns, ..
            } => {
                let params: Vec<String> =
                    params.iter().map(|&p| self.display(p, names)).collect();
                let rendered_returns: Vec<String> = returns
                    .iter()
                    .map(|slot| match slot {
                        Some(r) => self.display(*r, names),
                        None => "any".to_string(),
                    })
                    .collect();
                if rendered_returns.is_empty() {
                    format!("function({}) -> void", params.join(", "))
                } else {
                    format!(
                        "function({}) -> {}",
                        params.join(", "),
                        rendered_returns.join(", ")
                    )
                }
            }
            SymbolKind::Multi { members } => members
                .iter()
                .map(|&m| self.display(m, names))
                .collect::<Vec<_>>()
                .join("|"),
            SymbolKind::Group { .. } => "{...}".to_string(),
            SymbolKind::ReturnsOf { resolved, .. } => match resolved {
                Some(r) => self.type_string(*r, names),
                None => "any".to_string(),
            },
            SymbolKind::Ref { target } => self.type_string(*target, names),
            SymbolKind::Undefined { resolved } => match resolved {
                Some(r) => self.type_string(*r, names),
                None => "any".to_string(),
            },
        }
    }

    /// Renders `name: type`, or the type alone for anonymous symbols.
    pub fn display(&self, id: SymbolId, names: &NameTable) -> String {
        let symbol = &self[id];
        match &symbol.kind {
            SymbolKind::Multi { .. } => self.type_string(id, names),
            SymbolKind::Group { .. } => "{...}".to_string(),
            _ => match symbol.name {
                Some(name) => format!("{}: {}", names.resolve(name), self.type_string(id, names)),
                None => self.type_string(id, names),
            },
        }
    }
}

impl Index<SymbolId> for SymbolArena {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }
}

impl IndexMut<SymbolId> for SymbolArena {
    fn index_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }
}
