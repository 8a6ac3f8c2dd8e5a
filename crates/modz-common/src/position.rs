//! Offset to line/column mapping.

use memchr::memchr_iter;
use serde::{Deserialize, Serialize};

/// A 1-based line/column pair. Columns count characters, not bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Line start table for one source text.
#[derive(Clone, Debug)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn new(text: &str) -> LineMap {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|i| i as u32 + 1));
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-based position.
    ///
    /// Offsets past the end of `text` clamp to the last position.
    pub fn position_of(&self, text: &str, offset: u32) -> Position {
        let offset = offset.min(text.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line] as usize;
        let column = text
            .get(start..offset as usize)
            .map_or(offset as usize - start, |prefix| prefix.chars().count());
        Position {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
