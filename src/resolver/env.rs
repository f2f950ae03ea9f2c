/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      resolver/env.rs
 * Purpose:   Parent-linked binding environments, arena-allocated.
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

use crate::names::NameId;
use crate::resolver::symbol::SymbolId;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Arena handle of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(pub u32);

/// One lexical scope's bindings.
///
/// Environments form a chain toward the chunk's global scope. They live in
/// an [`EnvArena`] and are never freed: a function symbol keeps its
/// environment alive well past the walk, so query tooling can ask "what
/// was in scope here" at any time.
#[derive(Debug)]
pub struct Env {
    prev: Option<EnvId>,
    depth: usize,
    scope: HashMap<NameId, SymbolId>,
}

impl Env {
    /// The enclosing environment, `None` at the chunk's global scope.
    pub fn prev_env(&self) -> Option<EnvId> {
        self.prev
    }

    /// Nesting depth; 0 at the global scope.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Iterates this environment's own bindings, not the chain's.
    pub fn bindings(&self) -> impl Iterator<Item = (NameId, SymbolId)> + '_ {
        self.scope.iter().map(|(&name, &symbol)| (name, symbol))
    }
}

/// Flat storage for environments, addressed by [`EnvId`].
#[derive(Debug, Default)]
pub struct EnvArena {
    envs: Vec<Env>,
}

impl EnvArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, prev: Option<EnvId>) -> EnvId {
        let depth = prev.map(|p| self[p].depth + 1).unwrap_or(0);
        let id = EnvId(self.envs.len() as u32);
        self.envs.push(Env {
            prev,
            depth,
            scope: HashMap::new(),
        });
        id
    }

    /// Binds `name` in `env` itself, shadowing any outer binding.
    pub fn put(&mut self, env: EnvId, name: NameId, symbol: SymbolId) {
        self[env].scope.insert(name, symbol);
    }

    /// Searches `env` and then outward along the parent chain.
    pub fn get(&self, env: EnvId, name: NameId) -> Option<SymbolId> {
        let mut cursor = Some(env);
        while let Some(id) = cursor {
            if let Some(&symbol) = self[id].scope.get(&name) {
                return Some(symbol);
            }
            cursor = self[id].prev;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }
}

impl Index<EnvId> for EnvArena {
    type Output = Env;

    fn index(&self, id: EnvId) -> &Env {
        &self.envs[id.0 as usize]
    }
}

impl IndexMut<EnvId> for EnvArena {
    fn index_mut(&mut self, id: EnvId) -> &mut Env {
        &mut self.envs[id.0 as usize]
    }
}
