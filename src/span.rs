/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      span.rs
 * Purpose:   Source positions and ranges shared by every pipeline stage.
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

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A fully resolved location inside one source unit.
///
/// `line` and `column` are **0-based**; `offset` is the byte distance from
/// the first character of the buffer. Two positions compare by `offset`
/// alone — a position produced by [`crate::lineinfo::LineIndex`] and one
/// produced by hand are interchangeable as long as the offsets agree.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: u32) -> Self {
        Self { line, column, offset }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ line = {}, column = {}, offset = {} }}",
            self.line, self.column, self.offset
        )
    }
}

/// A half-open-feeling but actually inclusive pair of positions.
///
/// Every AST node owns exactly one `Range`, assigned once when the node is
/// completed and never touched again. A parent's range always contains the
/// ranges of its direct children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// True when `other` lies fully inside this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ start = {}, end = {} }}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: u32) -> Position {
        Position::new(0, offset, offset)
    }

    #[test]
    fn position_orders_by_offset_only() {
        let a = Position::new(3, 0, 10);
        let b = Position::new(0, 99, 10);
        assert_eq!(a, b);
        assert!(Position::new(0, 0, 9) < a);
    }

    #[test]
    fn range_contains_itself_and_children() {
        let outer = Range::new(pos(0), pos(10));
        let inner = Range::new(pos(2), pos(8));
        assert!(outer.contains(&outer));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn range_serializes_with_stable_field_names() {
        let r = Range::new(pos(1), pos(2));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["start"]["offset"], 1);
        assert_eq!(json["end"]["column"], 2);
        assert_eq!(json["start"]["line"], 0);
    }
}
