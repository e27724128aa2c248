use core::fmt;

/// What a sanitize call removed or rewrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SanitizeReport {
    /// Allowed tags written to the output, close tags included.
    pub tags_kept: usize,
    /// Disallowed tags removed, not counting tags inside removed subtrees.
    pub tags_dropped: usize,
    /// Disallowed tags removed together with their content.
    pub subtrees_removed: usize,
    /// Attributes removed from kept tags, for any reason.
    pub attributes_dropped: usize,
    /// Attributes removed because their value is a `javascript:` URI.
    pub javascript_values_dropped: usize,
    /// Values cut at their `?`.
    pub querystrings_stripped: usize,
    /// The input ended inside a tag or inside a removed subtree, so its tail
    /// was discarded.
    pub truncated: bool,
}

impl SanitizeReport {
    /// `true` when nothing was removed or cut.
    ///
    /// Kept attributes may still have been normalized: an empty unquoted
    /// value gains quotes, spaces around `=` are dropped and an unterminated
    /// quoted value is closed.
    pub fn is_clean(&self) -> bool {
        self.tags_dropped == 0
            && self.attributes_dropped == 0
            && self.querystrings_stripped == 0
            && !self.truncated
    }
}

impl fmt::Display for SanitizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept {} tag(s), dropped {} tag(s) ({} subtree(s)), dropped {} attribute(s) ({} javascript:), stripped {} query string(s)",
            self.tags_kept,
            self.tags_dropped,
            self.subtrees_removed,
            self.attributes_dropped,
            self.javascript_values_dropped,
            self.querystrings_stripped,
        )?;
        if self.truncated {
            write!(f, ", truncated")?;
        }
        Ok(())
    }
}

/// Sanitized markup together with its [`SanitizeReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sanitized {
    pub html: String,
    pub report: SanitizeReport,
}
