/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      lineinfo.rs
 * Purpose:   Append-only mapping between byte offsets and line/column
 *            positions, backed by fixed-size pages.
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

use crate::span::Position;

/// Line starts per page. 512 * 4 bytes keeps one page well inside L1.
const LINES_PER_PAGE: usize = 512;

type Page = Box<[u32; LINES_PER_PAGE]>;

/// Records where every line of one source unit begins and answers
/// offset-to-position and position-to-offset queries.
///
/// The index is **append-only**: the lexer calls [`LineIndex::new_line`]
/// once for every newline it consumes, in strictly increasing offset
/// order, and nothing is ever removed. Storage is a list of fixed-size
/// pages rather than one `Vec` entry per line, so a lookup binary-searches
/// a single page after a linear scan over the (few) page headers. Unused
/// slots hold `u32::MAX` so the search never picks an unwritten slot.
pub struct LineIndex {
    pages: Vec<Page>,
    /// Next free slot in the last page.
    slot: usize,
    /// Total number of recorded line starts.
    lines: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIndex {
    pub fn new() -> Self {
        Self {
            pages: vec![Self::blank_page()],
            slot: 0,
            lines: 0,
        }
    }

    fn blank_page() -> Page {
        Box::new([u32::MAX; LINES_PER_PAGE])
    }

    /// Records the byte offset at which a new line begins.
    ///
    /// Offsets must arrive in strictly increasing order; the lexer is the
    /// only writer and reports each newline exactly once.
    pub fn new_line(&mut self, offset: u32) {
        if self.slot >= LINES_PER_PAGE || self.pages.is_empty() {
            self.pages.push(Self::blank_page());
            self.slot = 0;
        }
        let last = self.pages.len() - 1;
        self.pages[last][self.slot] = offset;
        self.slot += 1;
        self.lines += 1;
    }

    /// Number of recorded line starts.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Maps a byte offset to its full `{line, column, offset}` position.
    ///
    /// Finds the greatest recorded line start that is `<= offset`; the
    /// column is the remaining distance. Offsets before the first recorded
    /// line start fall on line 0.
    pub fn to_position(&self, offset: u32) -> Position {
        let mut line = 0u32;
        let mut column = offset;
        for (i, page) in self.pages.iter().enumerate() {
            // First slot greater than `offset`, then step back one.
            let upper = page.partition_point(|&start| start <= offset);
            if upper == 0 {
                break;
            }
            line = (i * LINES_PER_PAGE + upper - 1) as u32;
            column = offset - page[upper - 1];
            if upper < LINES_PER_PAGE {
                break;
            }
            // The whole page is at or below `offset`; a later page may
            // still hold a closer line start.
        }
        Position::new(line, column, offset)
    }

    /// Inverse of [`LineIndex::to_position`] given `{line, column}`.
    ///
    /// A line that was never recorded maps to offset 0.
    pub fn to_offset(&self, pos: Position) -> u32 {
        let page_id = pos.line as usize / LINES_PER_PAGE;
        let slot_id = pos.line as usize % LINES_PER_PAGE;
        match self.pages.get(page_id) {
            Some(page) if page[slot_id] != u32::MAX => page[slot_id] + pos.column,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn index_for(line_starts: &[u32]) -> LineIndex {
        let mut idx = LineIndex::new();
        for &s in line_starts {
            idx.new_line(s);
        }
        idx
    }

    #[test]
    fn first_line_begins_at_zero() {
        let idx = index_for(&[0]);
        let pos = idx.to_position(5);
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 5);
    }

    #[test]
    fn offset_lands_on_recorded_line() {
        // Lines begin at 0, 10, 25.
        let idx = index_for(&[0, 10, 25]);
        assert_eq!(idx.to_position(9).line, 0);
        assert_eq!(idx.to_position(10).line, 1);
        assert_eq!(idx.to_position(10).column, 0);
        assert_eq!(idx.to_position(24).line, 1);
        assert_eq!(idx.to_position(24).column, 14);
        assert_eq!(idx.to_position(30).line, 2);
    }

    #[test]
    fn to_offset_inverts_to_position() {
        let idx = index_for(&[0, 4, 9, 14]);
        for offset in 0..20u32 {
            assert_eq!(idx.to_offset(idx.to_position(offset)), offset);
        }
    }

    #[test]
    fn unknown_line_maps_to_zero() {
        let idx = index_for(&[0]);
        assert_eq!(idx.to_offset(Position::new(7, 3, 0)), 0);
    }

    #[test]
    fn spills_across_pages() {
        let mut idx = LineIndex::new();
        for i in 0..2000u32 {
            idx.new_line(i * 3);
        }
        assert!(idx.page_count() > 1);
        let pos = idx.to_position(1500 * 3 + 1);
        assert_eq!(pos.line, 1500);
        assert_eq!(pos.column, 1);
        assert_eq!(idx.to_offset(pos), 1500 * 3 + 1);
    }

    proptest! {
        #[test]
        fn round_trip_over_random_documents(widths in proptest::collection::vec(1u32..80, 1..700)) {
            // Build line starts from random line widths, line 0 at offset 0.
            let mut starts = vec![0u32];
            let mut total = 0u32;
            for w in &widths {
                total += w;
                starts.push(total);
            }
            let idx = index_for(&starts);
            for offset in 0..total {
                prop_assert_eq!(idx.to_offset(idx.to_position(offset)), offset);
            }
        }
    }
}
