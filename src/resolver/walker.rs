/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      resolver/walker.rs
 * Purpose:   The AST walk that builds environments and symbols.
 *
 * Resolution order mirrors evaluation order: right-hand sides are walked
 * before their targets bind, iterator expressions before loop variables,
 * a function's name before its body. A binding adopts its rvalue's symbol
 * when that symbol is still anonymous (the literal `1` in `local x = 1`
 * simply *becomes* `x: number`); anything already named, or any compound
 * value, is wrapped in a `Ref` so provenance is never lost.
 *
 * Nothing here ever fails. Unknown names degrade to `Undefined`, chains
 * that do not lead to a table are dropped, conflicting return kinds merge
 * into `Multi`.
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

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenKind;
use crate::names::{FileId, NameId, NameTable};
use crate::resolver::env::{EnvArena, EnvId};
use crate::resolver::symbol::{Location, SymbolArena, SymbolId, SymbolKind};
use crate::span::Range;

/// Everything a walk produced, kept alive together: the arenas, the
/// interned names and the chunk's global environment.
pub struct Resolution {
    pub names: NameTable,
    pub symbols: SymbolArena,
    pub envs: EnvArena,
    pub global: EnvId,
    pub file: FileId,
}

impl Resolution {
    /// Finds `name` starting at `env` and searching outward.
    pub fn lookup(&self, env: EnvId, name: &str) -> Option<SymbolId> {
        let name = self.names.get(name)?;
        self.envs.get(env, name)
    }

    /// Finds `name` in the chunk's global environment.
    pub fn lookup_global(&self, name: &str) -> Option<SymbolId> {
        self.lookup(self.global, name)
    }

    pub fn type_string(&self, id: SymbolId) -> String {
        self.symbols.type_string(id, &self.names)
    }

    pub fn display(&self, id: SymbolId) -> String {
        self.symbols.display(id, &self.names)
    }

    /// Follows `Ref` chains to the defining symbol.
    pub fn definition(&self, id: SymbolId) -> SymbolId {
        self.symbols.definition(id)
    }

    /// Late resolution for `Undefined` and `ReturnsOf` symbols, which may
    /// become answerable once the whole chunk has been walked. Returns
    /// true when the symbol now resolves.
    pub fn try_resolve(&mut self, id: SymbolId) -> bool {
        let name = match self.symbols[id].name {
            Some(name) => name,
            None => return false,
        };
        let env = self.symbols[id].env;

        match self.symbols[id].kind {
            SymbolKind::Undefined { .. } => match self.envs.get(env, name) {
                Some(found) if found != id => {
                    self.symbols[id].kind = SymbolKind::Undefined {
                        resolved: Some(found),
                    };
                    true
                }
                _ => false,
            },
            SymbolKind::ReturnsOf { index, .. } => {
                let Some(found) = self.envs.get(env, name) else {
                    return false;
                };
                let def = self.symbols.definition(found);
                let slot = match &self.symbols[def].kind {
                    SymbolKind::Function { returns, .. } => {
                        returns.get(index as usize).copied().flatten()
                    }
                    _ => None,
                };
                match slot {
                    Some(resolved) => {
                        self.symbols[id].kind = SymbolKind::ReturnsOf {
                            index,
                            resolved: Some(resolved),
                        };
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

/// Walks one chunk for one file and yields a [`Resolution`].
pub struct Resolver<'a> {
    file: FileId,
    root: &'a Node,
    names: NameTable,
    symbols: SymbolArena,
    envs: EnvArena,
    global: EnvId,
    top: EnvId,
    /// The function whose body is being walked; `return` statements
    /// outside any function have nothing to unify into.
    current_fn: Option<SymbolId>,
    anonymous: NameId,
}

impl<'a> Resolver<'a> {
    pub fn new(file: FileId, root: &'a Node) -> Self {
        let mut names = NameTable::new();
        let anonymous = names.intern("<anonymous>");
        let mut envs = EnvArena::new();
        let global = envs.alloc(None);
        Self {
            file,
            root,
            names,
            symbols: SymbolArena::new(),
            envs,
            global,
            top: global,
            current_fn: None,
            anonymous,
        }
    }

    pub fn run(mut self) -> Resolution {
        let root = self.root;
        self.walk_node(root);
        Resolution {
            names: self.names,
            symbols: self.symbols,
            envs: self.envs,
            global: self.global,
            file: self.file,
        }
    }

    //
    // Scope plumbing
    //

    fn enter(&mut self) {
        self.top = self.envs.alloc(Some(self.top));
    }

    fn exit(&mut self) {
        if let Some(prev) = self.envs[self.top].prev_env() {
            self.top = prev;
        }
    }

    fn located(&mut self, id: SymbolId, range: Range) -> SymbolId {
        self.symbols[id].location = Some(Location {
            file: self.file,
            range,
        });
        id
    }

    //
    // The walk
    //

    fn walk_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.walk_node(node);
        }
    }

    fn walk_node(&mut self, node: &Node) -> Option<SymbolId> {
        match &node.kind {
            NodeKind::Chunk { body } => {
                self.walk_nodes(body);
                None
            }
            NodeKind::Identifier { .. } => self.walk_ident(node),
            NodeKind::Literal { value_type, .. } => {
                let kind = match value_type {
                    TokenKind::StringLiteral => SymbolKind::Str,
                    TokenKind::BooleanLiteral => SymbolKind::Boolean,
                    TokenKind::NumericLiteral => SymbolKind::Number,
                    _ => SymbolKind::Any,
                };
                Some(self.symbols.alloc(None, self.top, kind))
            }
            NodeKind::Local { variables, init } => {
                self.walk_binding_list(variables, init, true);
                None
            }
            NodeKind::Assignment { variables, init } => {
                self.walk_binding_list(variables, init, false);
                None
            }
            NodeKind::Function { .. } => self.walk_function(node),
            NodeKind::Return { expressions } => self.walk_return(expressions),
            NodeKind::If { clauses } => {
                self.walk_nodes(clauses);
                None
            }
            NodeKind::IfClause { condition, body }
            | NodeKind::ElseifClause { condition, body } => {
                self.enter();
                self.walk_node(condition);
                self.walk_nodes(body);
                self.exit();
                None
            }
            NodeKind::ElseClause { body } | NodeKind::Do { body } => {
                self.enter();
                self.walk_nodes(body);
                self.exit();
                None
            }
            NodeKind::While { condition, body } => {
                self.enter();
                self.walk_node(condition);
                self.walk_nodes(body);
                self.exit();
                None
            }
            NodeKind::Repeat { condition, body } => {
                // The until condition can read the body's locals.
                self.enter();
                self.walk_nodes(body);
                self.walk_node(condition);
                self.exit();
                None
            }
            NodeKind::ForNumeric {
                variable,
                start,
                end,
                step,
                body,
            } => {
                self.walk_node(start);
                self.walk_node(end);
                if let Some(step) = step {
                    self.walk_node(step);
                }
                self.enter();
                if let Some(name) = variable.ident_name() {
                    let name = self.names.intern(name);
                    let var = self.symbols.alloc(Some(name), self.top, SymbolKind::Number);
                    self.symbols[var].is_local = true;
                    self.located(var, variable.range);
                    self.envs.put(self.top, name, var);
                }
                self.walk_nodes(body);
                self.exit();
                None
            }
            NodeKind::ForGeneric {
                variables,
                iterators,
                body,
            } => {
                let mut rhs = Vec::new();
                for iter in iterators {
                    if let Some(s) = self.walk_node(iter) {
                        rhs.push(s);
                    }
                }
                self.enter();
                for (i, var) in variables.iter().enumerate() {
                    let rv = self.symbol_from_list(&rhs, i);
                    self.bind_target(var, rv, true);
                }
                self.walk_nodes(body);
                self.exit();
                None
            }
            NodeKind::CallStatement { expression } => self.walk_node(expression),
            NodeKind::Call { base, arguments } => self.walk_call(base, arguments),
            NodeKind::TableCall { base, argument } => {
                self.walk_call(base, std::slice::from_ref(argument.as_ref()))
            }
            NodeKind::StringCall { base, argument } => {
                self.walk_call(base, std::slice::from_ref(argument.as_ref()))
            }
            NodeKind::TableConstructor { .. } => self.walk_table_constructor(node),
            NodeKind::Unary { operator, argument } => {
                self.walk_node(argument);
                let kind = if operator == "not" {
                    SymbolKind::Boolean
                } else {
                    SymbolKind::Number
                };
                Some(self.symbols.alloc(None, self.top, kind))
            }
            NodeKind::Binary {
                operator,
                left,
                right,
            } => self.walk_binary(operator, left, right),
            NodeKind::Member { .. } => self.walk_member(node),
            NodeKind::Index { base, indexer } => {
                self.walk_node(base);
                self.walk_node(indexer);
                None
            }
            NodeKind::TableKey { key, value } => {
                self.walk_node(key);
                self.walk_node(value);
                None
            }
            NodeKind::TableKeyString { value, .. } | NodeKind::TableValue { value } => {
                self.walk_node(value)
            }
            NodeKind::Label { .. } | NodeKind::Goto { .. } | NodeKind::Break => None,
        }
    }

    /// A name in read position: record the reference, or mint an
    /// `Undefined` placeholder that may resolve later.
    fn walk_ident(&mut self, node: &Node) -> Option<SymbolId> {
        let name = node.ident_name()?;
        let name = self.names.intern(name);
        if let Some(def) = self.envs.get(self.top, name) {
            let location = Location {
                file: self.file,
                range: node.range,
            };
            self.symbols[def].references.push(location);
            return Some(def);
        }
        Some(self.symbols.alloc(
            Some(name),
            self.top,
            SymbolKind::Undefined { resolved: None },
        ))
    }

    /// Shared body of `local` declarations and plain assignments; only
    /// the locality of the bound names differs.
    fn walk_binding_list(&mut self, variables: &[Node], init: &[Node], is_local: bool) {
        let mut rhs = Vec::new();
        for expr in init {
            if let Some(s) = self.walk_node(expr) {
                rhs.push(s);
            }
        }
        for (i, var) in variables.iter().enumerate() {
            let rv = self.symbol_from_list(&rhs, i);
            self.bind_target(var, rv, is_local);
        }
    }

    fn bind_target(&mut self, var: &Node, rv: Option<SymbolId>, is_local: bool) {
        match &var.kind {
            NodeKind::Identifier { name } => {
                // `_` is the conventional discard.
                if name == "_" {
                    return;
                }
                let name = self.names.intern(name);
                let bound = match rv {
                    Some(rv) => self.bind_rvalue(rv, name, var.range, true),
                    None => {
                        let s = self.symbols.alloc(Some(name), self.top, SymbolKind::Any);
                        self.located(s, var.range);
                        self.envs.put(self.top, name, s);
                        s
                    }
                };
                if is_local {
                    self.symbols[bound].is_local = true;
                }
            }
            NodeKind::Member {
                base, identifier, ..
            } => {
                // Field assignment sticks only when the base resolves to
                // a table; otherwise the walk records what it can.
                match self.resolve_table(base) {
                    Some(owner) => {
                        if let (Some(rv), Some(fname)) = (rv, identifier.ident_name()) {
                            let fname = self.names.intern(fname);
                            let field = self.bind_rvalue(rv, fname, identifier.range, false);
                            self.attach_field(owner, field);
                        }
                    }
                    None => {
                        self.walk_node(base);
                    }
                }
            }
            NodeKind::Index { base, indexer } => {
                self.walk_node(base);
                self.walk_node(indexer);
            }
            _ => {}
        }
    }

    /// Picks the i-th rvalue of a multi-value list. A trailing call's
    /// `Group` spreads over the remaining positions; past its end there
    /// is nothing. Spread members come back behind fresh anonymous
    /// `Ref`s so a binding never adopts (renames) the callee's own
    /// return symbols.
    fn symbol_from_list(&mut self, list: &[SymbolId], i: usize) -> Option<SymbolId> {
        if list.is_empty() {
            return None;
        }
        let last = list.len() - 1;
        if i < last {
            return Some(list[i]);
        }
        let spread = match &self.symbols[list[last]].kind {
            SymbolKind::Group { members } => Some(members.get(i - last).copied()),
            _ => None,
        };
        match spread {
            Some(Some(member)) => Some(self.symbols.alloc(
                None,
                self.top,
                SymbolKind::Ref { target: member },
            )),
            Some(None) => None,
            None if i == last => Some(list[last]),
            None => None,
        }
    }

    /// Binds `name` to an rvalue: anonymous simple values are adopted in
    /// place, everything else is wrapped in a `Ref`. With `publish` the
    /// binding also enters the current environment.
    fn bind_rvalue(
        &mut self,
        rv: SymbolId,
        name: NameId,
        range: Range,
        publish: bool,
    ) -> SymbolId {
        let adoptable =
            self.symbols[rv].kind.is_adoptable() && self.symbols[rv].name.is_none();
        let bound = if adoptable {
            self.symbols[rv].name = Some(name);
            self.symbols[rv].env = self.top;
            rv
        } else {
            self.symbols
                .alloc(Some(name), self.top, SymbolKind::Ref { target: rv })
        };
        self.located(bound, range);
        if publish {
            self.envs.put(self.top, name, bound);
        }
        bound
    }

    /// Resolves a prefix chain to the table it denotes, following refs,
    /// or `None` when any link is not a table.
    fn resolve_table(&mut self, node: &Node) -> Option<SymbolId> {
        match &node.kind {
            NodeKind::Identifier { name } => {
                let name = self.names.get(name)?;
                let sym = self.envs.get(self.top, name)?;
                let def = self.symbols.definition(sym);
                matches!(self.symbols[def].kind, SymbolKind::Table { .. }).then_some(def)
            }
            NodeKind::Member {
                base, identifier, ..
            } => {
                let owner = self.resolve_table(base)?;
                let field = self.find_field(owner, identifier.ident_name()?)?;
                let def = self.symbols.definition(field);
                matches!(self.symbols[def].kind, SymbolKind::Table { .. }).then_some(def)
            }
            _ => None,
        }
    }

    fn find_field(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        let name = self.names.get(name)?;
        match &self.symbols[owner].kind {
            SymbolKind::Table { fields } => fields
                .iter()
                .copied()
                .find(|&f| self.symbols[f].name == Some(name)),
            _ => None,
        }
    }

    /// Adds or replaces the same-named field of a table symbol.
    fn attach_field(&mut self, owner: SymbolId, field: SymbolId) {
        let name = self.symbols[field].name;
        let position = match &self.symbols[owner].kind {
            SymbolKind::Table { fields } => fields
                .iter()
                .position(|&f| name.is_some() && self.symbols[f].name == name),
            _ => return,
        };
        if let SymbolKind::Table { fields } = &mut self.symbols[owner].kind {
            match position {
                Some(at) => fields[at] = field,
                None => fields.push(field),
            }
        }
    }

    fn walk_function(&mut self, node: &Node) -> Option<SymbolId> {
        let NodeKind::Function {
            identifier,
            parameters,
            body,
        } = &node.kind
        else {
            return None;
        };

        let fname = self.function_name(identifier.as_deref());
        let fenv = self.envs.alloc(Some(self.top));
        let fs = self.symbols.alloc(
            Some(fname),
            self.top,
            SymbolKind::Function {
                params: Vec::new(),
                returns: Vec::new(),
                env: fenv,
            },
        );
        self.located(fs, node.range);
        self.symbols[fs].is_local = node.is_local;

        // Register the name before the body: recursion must find it.
        match identifier.as_deref().map(|n| &n.kind) {
            Some(NodeKind::Identifier { .. }) => {
                self.envs.put(self.top, fname, fs);
            }
            Some(NodeKind::Member { base, indexer, .. }) => {
                if let Some(owner) = self.resolve_table(base) {
                    self.attach_field(owner, fs);
                    if indexer == ":" {
                        let self_name = self.names.intern("self");
                        let receiver = self.symbols.alloc(
                            Some(self_name),
                            fenv,
                            SymbolKind::Ref { target: owner },
                        );
                        self.symbols[receiver].is_local = true;
                        self.envs.put(fenv, self_name, receiver);
                    }
                }
            }
            _ => {}
        }

        let saved_top = self.top;
        self.top = fenv;

        let mut params = Vec::new();
        for param in parameters {
            if let Some(name) = param.ident_name() {
                let name = self.names.intern(name);
                let p = self.symbols.alloc(Some(name), fenv, SymbolKind::Any);
                self.symbols[p].is_local = true;
                self.located(p, param.range);
                self.envs.put(fenv, name, p);
                params.push(p);
            }
        }
        if let SymbolKind::Function { params: slot, .. } = &mut self.symbols[fs].kind {
            *slot = params;
        }

        let saved_fn = self.current_fn.replace(fs);
        self.walk_nodes(body);
        self.current_fn = saved_fn;
        self.top = saved_top;

        Some(fs)
    }

    /// The declared name of a function is the last identifier of its name
    /// chain; anonymous functions all share `<anonymous>`.
    fn function_name(&mut self, identifier: Option<&Node>) -> NameId {
        let name = match identifier.map(|n| &n.kind) {
            Some(NodeKind::Identifier { name }) => Some(name.clone()),
            Some(NodeKind::Member { identifier, .. }) => {
                identifier.ident_name().map(|n| n.to_string())
            }
            _ => None,
        };
        match name {
            Some(name) => self.names.intern(&name),
            None => self.anonymous,
        }
    }

    /// Unifies this `return`'s expressions into the enclosing function's
    /// positional return slots.
    fn walk_return(&mut self, expressions: &[Node]) -> Option<SymbolId> {
        let Some(fs) = self.current_fn else {
            self.walk_nodes(expressions);
            return None;
        };

        let mut walked = Vec::with_capacity(expressions.len());
        for expr in expressions {
            walked.push(self.walk_node(expr));
        }

        let mut returns = match &self.symbols[fs].kind {
            SymbolKind::Function { returns, .. } => returns.clone(),
            _ => return None,
        };
        if returns.len() < walked.len() {
            returns.resize(walked.len(), None);
        }

        for (i, sn) in walked.into_iter().enumerate() {
            let Some(sn) = sn else { continue };
            match returns[i] {
                None => returns[i] = Some(sn),
                Some(so) => {
                    if self.symbols[so].kind.same_kind(&self.symbols[sn].kind) {
                        continue;
                    }
                    if matches!(self.symbols[so].kind, SymbolKind::Multi { .. }) {
                        let duplicate = match &self.symbols[so].kind {
                            SymbolKind::Multi { members } => members.iter().any(|&m| {
                                self.symbols[m].kind.same_kind(&self.symbols[sn].kind)
                            }),
                            _ => false,
                        };
                        if !duplicate {
                            if let SymbolKind::Multi { members } = &mut self.symbols[so].kind {
                                members.push(sn);
                            }
                        }
                    } else {
                        let multi = self.symbols.alloc(
                            None,
                            self.top,
                            SymbolKind::Multi {
                                members: vec![so, sn],
                            },
                        );
                        returns[i] = Some(multi);
                    }
                }
            }
        }

        if let SymbolKind::Function { returns: slot, .. } = &mut self.symbols[fs].kind {
            *slot = returns;
        }
        None
    }

    /// A call yields the callee's return list as a `Group`; calling
    /// anything that is not a known function yields nothing, never an
    /// error.
    fn walk_call(&mut self, base: &Node, arguments: &[Node]) -> Option<SymbolId> {
        let callee = self.walk_node(base);
        self.walk_nodes(arguments);

        let def = self.symbols.definition(callee?);
        let members = match &self.symbols[def].kind {
            SymbolKind::Function { returns, .. } => {
                returns.iter().copied().flatten().collect::<Vec<_>>()
            }
            _ => return None,
        };
        Some(self.symbols.alloc(None, self.top, SymbolKind::Group { members }))
    }

    fn walk_binary(&mut self, operator: &str, left: &Node, right: &Node) -> Option<SymbolId> {
        let left_sym = self.walk_node(left);
        self.walk_node(right);

        let kind = match operator {
            ".." => SymbolKind::Str,
            "==" | "~=" | "<" | ">" | "<=" | ">=" => SymbolKind::Boolean,
            _ => {
                // Arithmetic and the logic operators take on the left
                // operand's basic kind.
                let def = left_sym.map(|l| self.symbols.definition(l));
                match def.map(|d| &self.symbols[d].kind) {
                    Some(SymbolKind::Number) => SymbolKind::Number,
                    Some(SymbolKind::Str) => SymbolKind::Str,
                    Some(SymbolKind::Boolean) => SymbolKind::Boolean,
                    _ => SymbolKind::Any,
                }
            }
        };
        Some(self.symbols.alloc(None, self.top, kind))
    }

    /// A member read: resolve through the base's fields and record a
    /// reference on the field if it is known.
    fn walk_member(&mut self, node: &Node) -> Option<SymbolId> {
        let NodeKind::Member {
            base, identifier, ..
        } = &node.kind
        else {
            return None;
        };

        let base_sym = self.walk_node(base)?;
        let owner = self.symbols.definition(base_sym);
        let field = self.find_field(owner, identifier.ident_name()?)?;
        let location = Location {
            file: self.file,
            range: identifier.range,
        };
        self.symbols[field].references.push(location);
        Some(field)
    }

    /// A table constructor becomes an anonymous table symbol; `name =`
    /// fields become its named fields, keyed and positional entries are
    /// walked for the references inside them.
    fn walk_table_constructor(&mut self, node: &Node) -> Option<SymbolId> {
        let NodeKind::TableConstructor { fields } = &node.kind else {
            return None;
        };

        let ts = self
            .symbols
            .alloc(None, self.top, SymbolKind::Table { fields: Vec::new() });
        self.located(ts, node.range);
        self.symbols[ts].is_local = node.is_local;

        self.enter();
        let mut field_ids = Vec::new();
        for field in fields {
            match &field.kind {
                NodeKind::TableKeyString { key, value } => {
                    let value_sym = self.walk_node(value);
                    if let (Some(v), Some(kname)) = (value_sym, key.ident_name()) {
                        let kname = self.names.intern(kname);
                        field_ids.push(self.bind_rvalue(v, kname, key.range, false));
                    }
                }
                NodeKind::TableKey { key, value } => {
                    self.walk_node(key);
                    self.walk_node(value);
                }
                NodeKind::TableValue { value } => {
                    self.walk_node(value);
                }
                _ => {}
            }
        }
        self.exit();

        if let SymbolKind::Table { fields: slot, .. } = &mut self.symbols[ts].kind {
            *slot = field_ids;
        }
        Some(ts)
    }
}
