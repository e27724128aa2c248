use super::cursor::{is_whitespace, Cursor, QuoteState};

/// One tag as found between `<` and its closing `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Tag name without the close marker. Runs to the first whitespace, so
    /// in `<br/>` the name is `br/`.
    pub name: &'a str,
    /// Text after the name, i.e. the unparsed attributes.
    pub attributes: &'a str,
    /// Inner content starts with `/`.
    pub is_close: bool,
    /// Inner content ends with `/`.
    pub self_closing: bool,
}

impl<'a> RawTag<'a> {
    /// Splits the text between `<` and `>` into its parts.
    pub fn from_inner(inner: &'a str) -> Self {
        let (is_close, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };
        let name_len = body
            .bytes()
            .position(is_whitespace)
            .unwrap_or(body.len());
        let (name, attributes) = body.split_at(name_len);

        RawTag {
            name,
            attributes,
            is_close,
            self_closing: inner.ends_with('/'),
        }
    }

    /// Whether removing this tag must also remove what follows it up to a
    /// matching close tag.
    ///
    /// Only self-closing tags are removed on their own. Stray close tags,
    /// nameless tags and markup declarations (`<!...>`, `<?...>`) all start a
    /// skip, so anything that cannot be matched strips the rest of the input.
    pub fn opens_subtree(&self) -> bool {
        !self.self_closing
    }
}

/// Reads a tag whose `<` has just been consumed, leaving the cursor after
/// its `>`.
///
/// A `>` inside a quoted region does not end the tag. Returns `None` with the
/// cursor at the end of input when the tag is never closed.
pub fn read_tag<'a>(cursor: &mut Cursor<'a>) -> Option<RawTag<'a>> {
    let start = cursor.position();
    let mut quote = QuoteState::None;

    loop {
        let ch = cursor.peek()?;
        if ch == b'>' && !quote.is_quoted() {
            let inner = cursor.slice(start, cursor.position());
            cursor.advance();
            return Some(RawTag::from_inner(inner));
        }
        quote.update(ch);
        cursor.advance();
    }
}

/// Copies text up to the next `<` into `out` and consumes the `<`.
/// Returns `false` once the input is exhausted.
pub fn copy_text(cursor: &mut Cursor<'_>, out: &mut String) -> bool {
    let start = cursor.position();
    let found = cursor.seek(b'<');
    out.push_str(cursor.slice(start, cursor.position()));
    if found {
        cursor.advance();
    }
    found
}

/// Like [`copy_text`] but discards the text.
pub fn skip_text(cursor: &mut Cursor<'_>) -> bool {
    let found = cursor.seek(b'<');
    if found {
        cursor.advance();
    }
    found
}
