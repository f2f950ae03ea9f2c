/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawlua
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

use crate::error::SyntaxError;

/// Renders human-friendly, compiler-style diagnostics for syntax errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
///
/// The output is intentionally inspired by `rustc` diagnostics, but
/// simplified and designed to remain readable without color.
pub struct DiagnosticPrinter {
    /// Full source code of the file being analyzed, kept as a single
    /// string so individual lines can be extracted for error reporting.
    source: String,

    /// Name of the source file, used only for display.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders a diagnostic block for the given error.
    ///
    /// # Output Example
    /// ```text
    /// error: expected 'end' near 'eof'
    ///   --> example.lua:3:0
    ///    |
    ///  3 | local x = 1
    ///    | ^
    /// ```
    pub fn render(&self, error: &SyntaxError) -> String {
        let lines: Vec<&str> = self.source.lines().collect();
        let src_line = lines.get(error.line as usize).copied().unwrap_or("");

        let mut underline = String::new();
        for _ in 0..error.column {
            underline.push(' ');
        }
        underline.push('^');

        format!(
            "error: {}\n  --> {}:{}:{}\n   |\n{:>3} | {}\n   | {}",
            error.message, self.file_name, error.line, error.column, error.line, src_line, underline
        )
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &SyntaxError) {
        eprintln!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn render_points_at_the_column() {
        let printer = DiagnosticPrinter::new("demo.lua", "local x = \nprint(x)");
        let err = SyntaxError::unexpected_token(Position::new(0, 10, 10), "<expression>", "eof");
        let out = printer.render(&err);
        assert!(out.starts_with("error: unexpected <expression> near 'eof'"));
        assert!(out.contains("--> demo.lua:0:10"));
        assert!(out.contains("local x = "));
        assert!(out.ends_with(&format!("{}^", " ".repeat(10))));
    }
}
