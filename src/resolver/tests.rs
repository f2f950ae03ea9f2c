/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      resolver/tests.rs
 * Purpose:   Resolver coverage: binding, adoption, scopes, inference.
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

use crate::features::Dialect;
use crate::names::{FileTable, NameTable};
use crate::parser::Parser;
use crate::resolver::{EnvArena, Resolution, Resolver, SymbolArena, SymbolId, SymbolKind};

fn resolve(source: &str) -> Resolution {
    let mut files = FileTable::new();
    let file = files.intern("chunk.lua");
    let chunk = Parser::new(Dialect::Lua53, source)
        .parse()
        .expect("source parses");
    Resolver::new(file, &chunk).run()
}

fn global_type(resolution: &Resolution, name: &str) -> String {
    let id = resolution
        .lookup_global(name)
        .unwrap_or_else(|| panic!("'{name}' is bound"));
    resolution.type_string(id)
}

#[test]
fn function_returns_infer_from_literals() {
    let r = resolve("function f() return 1 end function g() return 'a' end");
    assert_eq!(global_type(&r, "f"), "function() -> number");
    assert_eq!(global_type(&r, "g"), "function() -> string");
}

#[test]
fn local_alias_becomes_a_ref_to_the_function() {
    let r = resolve("function f() return 1 end local h = f");
    let f = r.lookup_global("f").unwrap();
    let h = r.lookup_global("h").unwrap();
    assert!(matches!(r.symbols[h].kind, SymbolKind::Ref { .. }));
    assert_eq!(r.definition(h), f);
    assert_eq!(r.type_string(h), "function() -> number");
    assert!(r.symbols[h].is_local);
    assert!(!r.symbols[f].is_local);
}

#[test]
fn conflicting_returns_unify_into_multi() {
    let r = resolve("function m(x) if x then return 1 end return 'a' end");
    assert_eq!(global_type(&r, "m"), "function(x: any) -> number|string");
}

#[test]
fn repeated_same_kind_returns_stay_single() {
    let r = resolve("function f(x) if x then return 1 end return 2 end");
    assert_eq!(global_type(&r, "f"), "function(x: any) -> number");
}

#[test]
fn trailing_call_spreads_over_remaining_targets() {
    let r = resolve(concat!(
        "local function f() return 1, 'a' end\n",
        "local x, y, z = f()\n",
    ));
    assert_eq!(global_type(&r, "x"), "number");
    assert_eq!(global_type(&r, "y"), "string");
    assert_eq!(global_type(&r, "z"), "any");
    // The spread hands out refs; the callee's return slots keep their
    // own (anonymous) symbols.
    assert_eq!(global_type(&r, "f"), "function() -> number, string");
}

#[test]
fn calling_an_unknown_name_yields_no_values() {
    let r = resolve("local q = z()");
    assert_eq!(global_type(&r, "q"), "any");
}

#[test]
fn undefined_name_resolves_after_later_binding() {
    let r = resolve("local y = x\nx = 1");
    let y = r.lookup_global("y").unwrap();
    assert_eq!(r.type_string(y), "any");

    let undefined = r.definition(y);
    assert!(matches!(
        r.symbols[undefined].kind,
        SymbolKind::Undefined { resolved: None }
    ));

    let mut r = r;
    assert!(r.try_resolve(undefined));
    assert_eq!(r.type_string(undefined), "number");
    assert_eq!(r.type_string(y), "number");
}

#[test]
fn table_constructor_fields_render_in_source_order() {
    let r = resolve("local t = { a = 1, b = 'x' }");
    assert_eq!(global_type(&r, "t"), "{\na: number,\nb: string\n}");
}

#[test]
fn empty_table_renders_folded() {
    let r = resolve("local t = {}");
    assert_eq!(global_type(&r, "t"), "{...}");
}

#[test]
fn field_assignment_extends_the_table() {
    let r = resolve("local t = {}\nt.count = 1");
    assert_eq!(global_type(&r, "t"), "{\ncount: number\n}");
}

#[test]
fn method_declaration_attaches_field_and_binds_self() {
    let r = resolve("local t = {}\nfunction t:m() return self end");
    let t = r.definition(r.lookup_global("t").unwrap());
    let fields = match &r.symbols[t].kind {
        SymbolKind::Table { fields } => fields.clone(),
        other => panic!("t is a table, got {other:?}"),
    };
    assert_eq!(fields.len(), 1);

    let m = fields[0];
    assert_eq!(r.symbols[m].name.map(|n| r.names.resolve(n)), Some("m"));

    // `return self` resolved to the receiver, a ref back to the table.
    let slot = match &r.symbols[m].kind {
        SymbolKind::Function { returns, .. } => returns[0].expect("m returns a value"),
        other => panic!("m is a function, got {other:?}"),
    };
    assert_eq!(r.definition(slot), t);
}

#[test]
fn identifier_reads_record_references() {
    let r = resolve("local a = 1\nlocal b = a + a");
    let a = r.lookup_global("a").unwrap();
    assert_eq!(r.symbols[a].references.len(), 2);
}

#[test]
fn loop_variables_do_not_leak() {
    let r = resolve(concat!(
        "for i = 1, 10 do local j = i end\n",
        "for k, v in pairs do local w = v end\n",
    ));
    assert!(r.lookup_global("i").is_none());
    assert!(r.lookup_global("j").is_none());
    assert!(r.lookup_global("k").is_none());
    assert!(r.lookup_global("v").is_none());
}

#[test]
fn block_environments_survive_the_walk() {
    let r = resolve("do local hidden = 1 end");
    assert!(r.lookup_global("hidden").is_none());
    // The block's environment is retained in the arena with the binding
    // still inside it.
    assert!(r.envs.len() >= 2);
    let found = (0..r.envs.len()).any(|i| {
        r.lookup(crate::resolver::EnvId(i as u32), "hidden").is_some()
    });
    assert!(found);
}

#[test]
fn locality_follows_the_declaration_form() {
    let r = resolve("local x = 1\ny = 2");
    assert!(r.symbols[r.lookup_global("x").unwrap()].is_local);
    assert!(!r.symbols[r.lookup_global("y").unwrap()].is_local);
}

#[test]
fn operators_pick_result_kinds() {
    let r = resolve(concat!(
        "local s = 'a' .. 'b'\n",
        "local c = 1 < 2\n",
        "local n = 1 + 2\n",
        "local inverted = not c\n",
        "local len = #s\n",
    ));
    assert_eq!(global_type(&r, "s"), "string");
    assert_eq!(global_type(&r, "c"), "boolean");
    assert_eq!(global_type(&r, "n"), "number");
    assert_eq!(global_type(&r, "inverted"), "boolean");
    assert_eq!(global_type(&r, "len"), "number");
}

#[test]
fn returns_of_resolves_against_a_named_function() {
    let mut r = resolve("function f() return 1 end");
    let name = r.names.get("f").expect("f was interned");
    let probe = r.symbols.alloc(
        Some(name),
        r.global,
        SymbolKind::ReturnsOf {
            index: 0,
            resolved: None,
        },
    );
    assert_eq!(r.type_string(probe), "any");
    assert!(r.try_resolve(probe));
    assert_eq!(r.type_string(probe), "number");
    // A slot past the return list stays unresolved.
    let past = r.symbols.alloc(
        Some(name),
        r.global,
        SymbolKind::ReturnsOf {
            index: 3,
            resolved: None,
        },
    );
    assert!(!r.try_resolve(past));
}

#[test]
fn arena_built_symbols_render_like_walked_ones() {
    let mut names = NameTable::new();
    let mut envs = EnvArena::new();
    let mut symbols = SymbolArena::new();
    let global = envs.alloc(None);
    let fenv = envs.alloc(Some(global));

    let x = names.intern("x");
    let param = symbols.alloc(Some(x), fenv, SymbolKind::Number);
    let ret_n = symbols.alloc(None, fenv, SymbolKind::Number);
    let ret_s = symbols.alloc(None, fenv, SymbolKind::Str);
    let multi = symbols.alloc(
        None,
        fenv,
        SymbolKind::Multi {
            members: vec![ret_n, ret_s],
        },
    );

    let f = names.intern("f");
    let func = symbols.alloc(
        Some(f),
        global,
        SymbolKind::Function {
            params: vec![param],
            returns: vec![Some(multi), None],
            env: fenv,
        },
    );
    assert_eq!(
        symbols.type_string(func, &names),
        "function(x: number) -> number|string, any"
    );
    assert_eq!(
        symbols.display(func, &names),
        "f: function(x: number) -> number|string, any"
    );
}

#[test]
fn wide_tables_fold_after_five_fields() {
    let mut names = NameTable::new();
    let mut envs = EnvArena::new();
    let mut symbols = SymbolArena::new();
    let global = envs.alloc(None);

    let fields: Vec<SymbolId> = (0..6)
        .map(|i| {
            let name = names.intern(&format!("f{i}"));
            symbols.alloc(Some(name), global, SymbolKind::Number)
        })
        .collect();
    let table = symbols.alloc(None, global, SymbolKind::Table { fields });
    let rendered = symbols.type_string(table, &names);
    assert!(rendered.starts_with("{\nf0: number,"));
    assert!(rendered.ends_with("\n...\n}"));
    assert!(rendered.contains("f4: number"));
    assert!(!rendered.contains("f5"));
}
