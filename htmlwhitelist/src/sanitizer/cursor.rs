/// Byte cursor over the input shared by the scanner, the subtree skipper
/// and the attribute parser.
///
/// Every character the sanitizer stops on is ASCII, so positions handed to
/// [`Cursor::slice`] always fall on UTF-8 boundaries.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { s: input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.s.as_bytes().get(self.pos.saturating_add(offset)).copied()
    }

    pub fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Moves to the next occurrence of `byte` without consuming it.
    /// Returns `false` and stops at the end when there is none.
    pub fn seek(&mut self, byte: u8) -> bool {
        match self.rest().bytes().position(|ch| ch == byte) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.s.len();
                false
            }
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Advances while `pred` holds and returns the consumed text.
    pub fn take_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&mut pred) {
            self.pos += 1;
        }
        self.slice(start, self.pos)
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.s.get(start..end).unwrap_or("")
    }

    pub fn rest(&self) -> &'a str {
        self.s.get(self.pos..).unwrap_or("")
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.s.len());
    }
}

/// The single whitespace class used everywhere: `" \t\n\v\f\r"`.
pub fn is_whitespace(ch: u8) -> bool {
    matches!(ch, 0x20 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0D)
}

/// Quoting context while looking for the `>` that ends a tag.
///
/// A quote only opens when no other quote is open and only the same quote
/// character closes it, so an apostrophe inside a double-quoted value does
/// not desynchronise the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    None,
    Single,
    Double,
}

impl QuoteState {
    pub fn update(&mut self, ch: u8) {
        *self = match (*self, ch) {
            (QuoteState::None, b'\'') => QuoteState::Single,
            (QuoteState::None, b'"') => QuoteState::Double,
            (QuoteState::Single, b'\'') | (QuoteState::Double, b'"') => QuoteState::None,
            (state, _) => state,
        };
    }

    pub fn is_quoted(self) -> bool {
        self != QuoteState::None
    }
}
