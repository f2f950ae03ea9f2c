/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      resolver/mod.rs
 * Purpose:   Public surface of the scope-and-type resolution stage.
 *
 * The resolver walks a parsed chunk and builds a symbol table: who defines
 * what, where, with which (loosely inferred) type. It is tooling-grade
 * inference, not a type checker — resolution never fails, it only degrades
 * toward `any`.
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

mod env;
mod symbol;
mod walker;

pub use env::{Env, EnvArena, EnvId};
pub use symbol::{Location, Symbol, SymbolArena, SymbolId, SymbolKind};
pub use walker::{Resolution, Resolver};

#[cfg(test)]
mod tests;
