/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      lib.rs
 * Purpose:   Crate root and public surface.
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

//! A Lua source front end: lexing, parsing and scope resolution for the
//! 5.1, 5.2, 5.3 and LuaJIT dialects.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! - [`lexer::Lexer`] turns bytes into tokens, gated by the
//!   [`features::Dialect`] in effect, and records line starts as a side
//!   effect.
//! - [`parser::Parser`] drives the lexer and produces a serializable
//!   [`ast::Node`] tree. The first error wins; there is no recovery.
//! - [`resolver::Resolver`] walks a parsed chunk into arena-backed
//!   environments and symbols with loosely inferred types. Resolution
//!   never fails, it degrades toward `any`.
//!
//! ```
//! use pawlua::features::Dialect;
//! use pawlua::parser::Parser;
//!
//! let chunk = Parser::new(Dialect::Lua53, "local answer = 42").parse()?;
//! let json = serde_json::to_string(&chunk)?;
//! assert!(json.contains("\"type\":\"stmt_local\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod lexer;
pub mod lineinfo;
pub mod names;
pub mod parser;
pub mod resolver;
pub mod span;

pub use ast::{Node, NodeKind};
pub use diagnostics::DiagnosticPrinter;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use features::{Dialect, Features};
pub use lexer::{Lexer, Token, TokenKind};
pub use lineinfo::LineIndex;
pub use names::{FileId, FileTable, NameId, NameTable};
pub use parser::Parser;
pub use resolver::{Resolution, Resolver};
pub use span::{Position, Range};
