/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      parser/mod.rs
 * Purpose:   Root module for the PAWLUA recursive-descent parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - Core parser control logic
 *   - Statement parsing
 *   - Expression parsing
 *   - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct and token window
/// - Exposes the `parse()` entry point
/// - Range markers and the lexical scope stack
#[allow(clippy::module_inception)]
pub mod parser;

/// Statement-level parsing:
/// - local / if / while / for / repeat / return / function
/// - labels, goto, break, do blocks
/// - assignment-or-call disambiguation
mod statements;

/// Expression-level parsing:
/// - precedence climbing over the binary operator table
/// - unary operators, primary and prefix expressions
/// - table constructors and the three call forms
mod expressions;

/// Shared parser helpers:
/// - block-follow and operator classification
/// - the binary precedence table
mod helpers;

pub use parser::Parser;
