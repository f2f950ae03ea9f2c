/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      names.rs
 * Purpose:   Interning tables for identifier names and file paths.
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

use std::collections::HashMap;

/// Stable identity token for an interned identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(pub u32);

/// Stable identity token for an interned file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub u32);

/// Deduplicates identifier strings and hands out stable [`NameId`]s.
///
/// The table is an explicit value passed into whoever needs it — there is
/// no process-wide singleton, so independent parses (or tests) never
/// contaminate each other. Ids are dense and start at 0, which makes them
/// usable as map keys and vector indices.
#[derive(Debug, Default)]
pub struct NameTable {
    ids: HashMap<String, NameId>,
    names: Vec<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, creating one on first sight.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NameId(self.names.len() as u32);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Looks up an already-interned name without creating it.
    pub fn get(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    pub fn resolve(&self, id: NameId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Same contract as [`NameTable`], for file paths.
#[derive(Debug, Default)]
pub struct FileTable {
    ids: HashMap<String, FileId>,
    paths: Vec<String>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, path: &str) -> FileId {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = FileId(self.paths.len() as u32);
        self.ids.insert(path.to_string(), id);
        self.paths.push(path.to_string());
        id
    }

    pub fn resolve(&self, id: FileId) -> &str {
        &self.paths[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut names = NameTable::new();
        let a = names.intern("print");
        let b = names.intern("print");
        let c = names.intern("self");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(names.resolve(a), "print");
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn tables_are_independent() {
        let mut left = NameTable::new();
        let mut right = NameTable::new();
        left.intern("x");
        assert!(right.get("x").is_none());
        right.intern("y");
        assert_eq!(right.get("y"), Some(NameId(0)));
    }
}
