//! Allow-list and policy flags.
//!
//! A [`SanitizePolicy`] is the whole configuration of a sanitize call: which
//! tags survive, which attributes survive on each of them, and two global
//! switches for attribute values. Tag and attribute names are compared
//! case-sensitively, exactly as given.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::sanitizer::cursor::{is_whitespace, Cursor};

bitflags::bitflags! {
    /// Global attribute-value policies, applied to every kept attribute of
    /// every kept tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PolicyFlags: u32 {
        /// Keep values whose scheme is `javascript:`.
        const ALLOW_JAVASCRIPT_PREFIX = 1 << 0;
        /// Keep everything from the first `?` of a value onward.
        const ALLOW_QUERYSTRING = 1 << 1;
    }
}

impl Default for PolicyFlags {
    fn default() -> Self {
        PolicyFlags::empty()
    }
}

/// Tag name to allowed attribute names.
///
/// A tag that has no entry is removed together with its content. A tag with
/// an empty attribute set survives as a bare tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`AllowList::insert`].
    ///
    /// ```
    /// use htmlwhitelist::AllowList;
    ///
    /// let list = AllowList::new()
    ///     .allow("a", ["href", "title"])
    ///     .allow("b", [] as [&str; 0]);
    /// assert!(list.is_attribute_allowed("a", "href"));
    /// assert!(list.is_tag_allowed("b"));
    /// assert!(!list.is_tag_allowed("script"));
    /// ```
    pub fn allow<T, I, A>(mut self, tag: T, attributes: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.insert(tag, attributes);
        self
    }

    /// Permits `tag` with exactly `attributes`. A second entry for the same
    /// tag replaces the first; the replaced set is returned.
    pub fn insert<T, I, A>(&mut self, tag: T, attributes: I) -> Option<BTreeSet<String>>
    where
        T: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let attributes = attributes.into_iter().map(Into::into).collect();
        self.tags.insert(tag.into(), attributes)
    }

    pub fn is_tag_allowed(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn attributes(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(tag)
    }

    pub fn is_attribute_allowed(&self, tag: &str, attribute: &str) -> bool {
        self.tags
            .get(tag)
            .is_some_and(|attributes| attributes.contains(attribute))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.tags.iter().map(|(tag, attributes)| (tag.as_str(), attributes))
    }
}

impl<T, I, A> FromIterator<(T, I)> for AllowList
where
    T: Into<String>,
    I: IntoIterator<Item = A>,
    A: Into<String>,
{
    fn from_iter<E: IntoIterator<Item = (T, I)>>(entries: E) -> Self {
        let mut list = AllowList::new();
        list.extend(entries);
        list
    }
}

impl<T, I, A> Extend<(T, I)> for AllowList
where
    T: Into<String>,
    I: IntoIterator<Item = A>,
    A: Into<String>,
{
    fn extend<E: IntoIterator<Item = (T, I)>>(&mut self, entries: E) {
        for (tag, attributes) in entries {
            self.insert(tag, attributes);
        }
    }
}

/// Renders the compact syntax accepted by [`FromStr`], e.g. `a[href|title] b`.
///
/// Parsing the result gives back an equal list only when every name is
/// non-empty and free of whitespace and ``<>/='"[]|,``. Names added in code
/// that break this are written as they are, so `"a b"` reads back as two
/// tags.
impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, attributes)) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(tag)?;
            if !attributes.is_empty() {
                f.write_str("[")?;
                for (j, attribute) in attributes.iter().enumerate() {
                    if j > 0 {
                        f.write_str("|")?;
                    }
                    f.write_str(attribute)?;
                }
                f.write_str("]")?;
            }
        }
        Ok(())
    }
}

/// Error returned when parsing the compact allow-list syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyParseError {
    #[error("empty tag name at position {position}")]
    EmptyTagName { position: usize },
    #[error("empty attribute name for tag `{tag}` at position {position}")]
    EmptyAttributeName { tag: String, position: usize },
    #[error("attribute list of tag `{tag}` opened at position {position} is never closed")]
    UnterminatedAttributeList { tag: String, position: usize },
    #[error("unexpected character {ch:?} at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
}

/// Parses `tag[attr|attr] tag, tag[]`.
///
/// Entries are separated by whitespace or commas.
///
/// ```
/// use htmlwhitelist::AllowList;
///
/// let list: AllowList = "a[href|title], img[src|alt] br".parse().unwrap();
/// assert_eq!(list.len(), 3);
/// assert!(list.is_attribute_allowed("img", "alt"));
/// assert!(list.attributes("br").is_some_and(|attrs| attrs.is_empty()));
/// ```
impl FromStr for AllowList {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = AllowList::new();
        let mut cursor = Cursor::new(s);

        loop {
            cursor.take_while(is_separator);
            if cursor.at_end() {
                break;
            }

            let start = cursor.position();
            let tag = cursor.take_while(is_name_byte);
            if tag.is_empty() {
                return Err(match cursor.peek() {
                    Some(b'[') => PolicyParseError::EmptyTagName { position: start },
                    Some(ch) => PolicyParseError::UnexpectedCharacter {
                        ch: char::from(ch),
                        position: start,
                    },
                    None => PolicyParseError::EmptyTagName { position: start },
                });
            }

            let mut attributes = Vec::new();
            if cursor.peek() == Some(b'[') {
                let open = cursor.position();
                cursor.advance();
                loop {
                    cursor.skip_whitespace();
                    if attributes.is_empty() && cursor.peek() == Some(b']') {
                        cursor.advance();
                        break;
                    }
                    let attr_start = cursor.position();
                    let attribute = cursor.take_while(is_name_byte);
                    cursor.skip_whitespace();
                    match cursor.advance() {
                        None => {
                            return Err(PolicyParseError::UnterminatedAttributeList {
                                tag: tag.to_string(),
                                position: open,
                            })
                        }
                        Some(sep @ (b'|' | b']')) => {
                            if attribute.is_empty() {
                                return Err(PolicyParseError::EmptyAttributeName {
                                    tag: tag.to_string(),
                                    position: attr_start,
                                });
                            }
                            attributes.push(attribute);
                            if sep == b']' {
                                break;
                            }
                        }
                        Some(ch) => {
                            return Err(PolicyParseError::UnexpectedCharacter {
                                ch: char::from(ch),
                                position: cursor.position().saturating_sub(1),
                            })
                        }
                    }
                }
            }

            if let Some(ch) = cursor.peek() {
                if !is_separator(ch) {
                    return Err(PolicyParseError::UnexpectedCharacter {
                        ch: char::from(ch),
                        position: cursor.position(),
                    });
                }
            }

            list.insert(tag, attributes);
        }

        Ok(list)
    }
}

fn is_separator(ch: u8) -> bool {
    is_whitespace(ch) || ch == b','
}

fn is_name_byte(ch: u8) -> bool {
    !is_whitespace(ch)
        && !matches!(
            ch,
            b'<' | b'>' | b'/' | b'=' | b'\'' | b'"' | b'[' | b']' | b'|' | b','
        )
}

/// Complete configuration of one sanitize call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizePolicy {
    pub allow_list: AllowList,
    pub flags: PolicyFlags,
}

impl SanitizePolicy {
    pub fn new(allow_list: AllowList, flags: PolicyFlags) -> Self {
        SanitizePolicy { allow_list, flags }
    }

    pub fn with_flags(mut self, flags: PolicyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn allow_javascript_prefix(mut self, allow: bool) -> Self {
        self.flags.set(PolicyFlags::ALLOW_JAVASCRIPT_PREFIX, allow);
        self
    }

    pub fn allow_querystring(mut self, allow: bool) -> Self {
        self.flags.set(PolicyFlags::ALLOW_QUERYSTRING, allow);
        self
    }
}

impl From<AllowList> for SanitizePolicy {
    fn from(allow_list: AllowList) -> Self {
        SanitizePolicy::new(allow_list, PolicyFlags::default())
    }
}

/// Parses an allow-list in compact syntax; both flags stay off.
impl FromStr for SanitizePolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<AllowList>().map(SanitizePolicy::from)
    }
}

#[cfg(test)]
mod tests;
