//! Unicode-aware cursor over template source text.
//!
//! The parser walks the source one grapheme cluster at a time so that
//! multi-byte characters in literal runs never split positions mid-character.
//! Positions are tracked as line/column/offset for error reporting.

use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

/// Position of a grapheme in the template source.
///
/// Lines and columns are 1-based; `offset` is the byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The position of the first grapheme in any source.
    pub fn start() -> Self {
        Position {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// Forward-only cursor over the graphemes of a template source.
pub struct Scanner<'input> {
    graphemes: GraphemeIndices<'input>,
    current: Option<(usize, &'input str)>,
    position: Position,
}

impl<'input> Scanner<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut graphemes = input.grapheme_indices(true);
        let current = graphemes.next();

        Scanner {
            graphemes,
            current,
            position: Position::start(),
        }
    }

    /// Position of the grapheme `advance` would consume next.
    pub fn position(&self) -> Position {
        self.position
    }

    /// True once every grapheme has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Whether the current grapheme starts with `ch`.
    pub fn current_is(&self, ch: char) -> bool {
        self.current.is_some_and(|(_, grapheme)| grapheme.starts_with(ch))
    }

    /// Whether the grapheme after the current one starts with `ch`.
    pub fn peek_is(&self, ch: char) -> bool {
        self.graphemes
            .as_str()
            .graphemes(true)
            .next()
            .is_some_and(|grapheme| grapheme.starts_with(ch))
    }

    /// Consume and return the current grapheme, updating the position.
    pub fn advance(&mut self) -> Option<&'input str> {
        let (_, grapheme) = self.current?;

        if grapheme == "\n" {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.position.offset += grapheme.len();

        self.current = self.graphemes.next();
        Some(grapheme)
    }
}
