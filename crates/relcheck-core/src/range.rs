//! Source locations for schema elements.
//!
//! The IR stores locations as compact strings. A point is encoded as
//! `line;column;offset` and a full range as
//! `startLine;startColumn;startOffset;endLine;endColumn;endOffset`.
//! Lines and columns are 1-based, offsets are 0-based byte offsets into the
//! source document.

use std::fmt;

use log::debug;
use serde::Serialize;

/// A single position in a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    line: usize,
    column: usize,
    offset: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column number.
    pub fn column(&self) -> usize {
        self.column
    }

    /// 0-based byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

/// A start/end pair of [`Position`]s.
///
/// # Example
///
/// ```
/// # use relcheck_core::range::Range;
/// let range = Range::decode(Some("3;5;40;3;19;54"));
/// assert_eq!(range.start().line(), 3);
/// assert_eq!(range.end().column(), 19);
/// assert_eq!(range.len(), 14);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Create a range from two positions.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty range located at a single position.
    pub fn point(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Decode an IR location string.
    ///
    /// Missing or malformed encodings decode to the default range (`1;1;0`),
    /// so a diagnostic can always be attached somewhere.
    pub fn decode(loc: Option<&str>) -> Self {
        let Some(loc) = loc else {
            return Self::default();
        };

        let parts: Result<Vec<usize>, _> = loc.split(';').map(str::parse::<usize>).collect();
        match parts.as_deref() {
            Ok([line, column, offset]) => Self::point(Position::new(*line, *column, *offset)),
            Ok([sl, sc, so, el, ec, eo]) => {
                Self::new(Position::new(*sl, *sc, *so), Position::new(*el, *ec, *eo))
            }
            _ => {
                debug!(loc; "Malformed location encoding, using default range");
                Self::default()
            }
        }
    }

    /// Start position.
    pub fn start(&self) -> Position {
        self.start
    }

    /// End position.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Length in bytes, zero for points and inverted ranges.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns `true` if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{}",
            self.start.line, self.start.column, self.start.offset
        )?;
        if self.start != self.end {
            write!(
                f,
                ";{};{};{}",
                self.end.line, self.end.column, self.end.offset
            )?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn decode_never_panics(loc in "[0-9;a-z-]{0,24}") {
            let _ = Range::decode(Some(&loc));
        }

        #[test]
        fn encoded_ranges_decode_back(
            sl in 1usize..500, sc in 1usize..200, so in 0usize..10_000,
            el in 1usize..500, ec in 1usize..200, eo in 0usize..10_000,
        ) {
            let range = Range::new(Position::new(sl, sc, so), Position::new(el, ec, eo));
            prop_assert_eq!(Range::decode(Some(&range.to_string())), range);
        }
    }
}
