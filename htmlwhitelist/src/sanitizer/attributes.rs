use std::collections::BTreeSet;

use tracing::trace;

use super::cursor::{is_whitespace, Cursor};
use super::report::SanitizeReport;
use super::scanner::RawTag;
use crate::policy::PolicyFlags;

const JAVASCRIPT_SCHEME: &[u8] = b"javascript:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Value<'a> {
    text: &'a str,
    quote: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attribute<'a> {
    name: &'a str,
    value: Option<Value<'a>>,
}

/// Writes the inner content of an allowed tag, keeping only `allowed`
/// attributes and applying the value policies in `flags`.
///
/// The close marker and tag name are copied as they are. Whitespace between
/// attributes is preserved. A kept valued attribute is written as
/// `name=` followed by its value in its original quotes, or bare if it was
/// unquoted and is not empty.
pub fn write_sanitized(
    out: &mut String,
    tag: &RawTag<'_>,
    allowed: &BTreeSet<String>,
    flags: PolicyFlags,
    report: &mut SanitizeReport,
) {
    if tag.is_close {
        out.push('/');
    }
    out.push_str(tag.name);

    let mut cursor = Cursor::new(tag.attributes);
    loop {
        out.push_str(cursor.take_while(is_whitespace));
        if cursor.at_end() {
            break;
        }

        let attribute = read_attribute(&mut cursor);
        match attribute.value {
            None => {
                let closing_slash = attribute.name == "/" && cursor.at_end();
                if closing_slash || allowed.contains(attribute.name) {
                    out.push_str(attribute.name);
                } else {
                    trace!(target: "htmlwhitelist", tag = tag.name, attribute = attribute.name, "dropped attribute");
                    report.attributes_dropped += 1;
                }
            }
            Some(value) => {
                if !allowed.contains(attribute.name) {
                    trace!(target: "htmlwhitelist", tag = tag.name, attribute = attribute.name, "dropped attribute");
                    report.attributes_dropped += 1;
                    continue;
                }
                let Some(text) = filter_value(value.text, flags, report) else {
                    trace!(target: "htmlwhitelist", tag = tag.name, attribute = attribute.name, "dropped javascript: value");
                    report.attributes_dropped += 1;
                    continue;
                };
                out.push_str(attribute.name);
                out.push('=');
                match value.quote {
                    Some(quote) => {
                        out.push(quote);
                        out.push_str(text);
                        out.push(quote);
                    }
                    // a bare `name=` would take the next attribute as its value
                    None if text.is_empty() => out.push_str("\"\""),
                    None => out.push_str(text),
                }
            }
        }
    }
}

/// Applies the query-string and then the javascript-prefix policy.
/// `None` means the whole attribute has to go.
fn filter_value<'a>(
    mut text: &'a str,
    flags: PolicyFlags,
    report: &mut SanitizeReport,
) -> Option<&'a str> {
    if !flags.contains(PolicyFlags::ALLOW_QUERYSTRING) {
        if let Some((before, _)) = text.split_once('?') {
            report.querystrings_stripped += 1;
            text = before;
        }
    }
    if !flags.contains(PolicyFlags::ALLOW_JAVASCRIPT_PREFIX) && has_javascript_prefix(text) {
        report.javascript_values_dropped += 1;
        return None;
    }
    Some(text)
}

/// Case-insensitive `javascript:` check that ignores what browsers ignore
/// in a URL: leading control characters and spaces, and tab, CR and LF
/// anywhere.
pub fn has_javascript_prefix(value: &str) -> bool {
    let mut bytes = value
        .bytes()
        .skip_while(|&ch| ch <= 0x20)
        .filter(|&ch| !matches!(ch, b'\t' | b'\n' | b'\r'));

    JAVASCRIPT_SCHEME
        .iter()
        .all(|&expected| bytes.next().is_some_and(|ch| ch.to_ascii_lowercase() == expected))
}

fn read_attribute<'a>(cursor: &mut Cursor<'a>) -> Attribute<'a> {
    let start = cursor.position();
    while let Some(ch) = cursor.peek() {
        if is_whitespace(ch) || ch == b'=' {
            break;
        }
        // a trailing `/` is the self-closing marker, not part of the name
        if ch == b'/' && cursor.position() > start && cursor.peek_at(1).is_none() {
            break;
        }
        cursor.advance();
    }
    let name = cursor.slice(start, cursor.position());

    let after_name = cursor.position();
    cursor.skip_whitespace();
    if cursor.peek() != Some(b'=') {
        cursor.reset(after_name);
        return Attribute { name, value: None };
    }
    cursor.advance();
    cursor.skip_whitespace();

    let value = match cursor.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cursor.advance();
            let text = cursor.take_while(|ch| ch != quote);
            cursor.advance();
            Value {
                text,
                quote: Some(char::from(quote)),
            }
        }
        _ => Value {
            text: cursor.take_while(is_unquoted_value_byte),
            quote: None,
        },
    };

    Attribute {
        name,
        value: Some(value),
    }
}

// An unquoted value also stops at characters that would let it be read
// differently once written back without quotes.
fn is_unquoted_value_byte(ch: u8) -> bool {
    !is_whitespace(ch) && !matches!(ch, b'"' | b'\'' | b'<' | b'>' | b'`')
}
