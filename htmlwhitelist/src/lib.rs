#![doc = include_str!("../README.md")]
//!
//! ## API Guide
//!
//! ### For End Users
//!
//! - [`sanitize`] - Sanitize markup against a policy (recommended)
//! - [`sanitize_with_report`] - Same, plus counts of what was removed
//! - [`version`] - Library version information
//!
//! A policy is an [`AllowList`] of tags and their attributes plus
//! [`PolicyFlags`]. Anything the allow-list does not mention is removed: a
//! disallowed tag takes all of its content with it, a disallowed attribute
//! simply disappears.
//!
//! ### For Advanced Users
//!
//! - [`Sanitizer`] - Reusable sanitizer bound to one policy
//! - [`SanitizeReport`] - What a call removed or rewrote
//!
//! Sanitizing never fails. Input the scanner cannot make sense of, such as a
//! tag that is never closed, is dropped rather than reported as an error.

pub mod policy;
pub mod sanitizer;


pub use policy::{AllowList, PolicyFlags, PolicyParseError, SanitizePolicy};
pub use sanitizer::{SanitizeReport, Sanitized, Sanitizer};

/// Removes every tag, attribute and attribute value `policy` does not permit.
///
/// # Arguments
///
/// * `content` - Untrusted markup
/// * `policy` - Allowed tags, their allowed attributes, and value policies
///
/// # Examples
///
/// ```
/// use htmlwhitelist::{sanitize, AllowList, SanitizePolicy};
///
/// let policy = SanitizePolicy::from(AllowList::new().allow("a", ["href"]).allow("b", [] as [&str; 0]));
///
/// assert_eq!(
///     sanitize(r#"<b onclick="x()">hi</b><script>alert(1)</script>"#, &policy),
///     "<b >hi</b>"
/// );
/// assert_eq!(
///     sanitize(r#"<a href="/page?id=1">x</a>"#, &policy),
///     r#"<a href="/page">x</a>"#
/// );
/// assert_eq!(
///     sanitize(r#"<a href="javascript:alert(1)">x</a>"#, &policy),
///     "<a >x</a>"
/// );
/// ```
pub fn sanitize(content: &str, policy: &SanitizePolicy) -> String {
    Sanitizer::new(policy).sanitize(content)
}

/// Like [`sanitize`], also reporting what was removed.
///
/// # Examples
///
/// ```
/// use htmlwhitelist::{sanitize_with_report, SanitizePolicy};
///
/// let policy: SanitizePolicy = "p".parse().unwrap();
/// let result = sanitize_with_report("<p>a</p><div>b<div>c</div></div>", &policy);
///
/// assert_eq!(result.html, "<p>a</p>");
/// assert_eq!(result.report.tags_kept, 2);
/// assert_eq!(result.report.subtrees_removed, 1);
/// assert!(!result.report.truncated);
/// ```
pub fn sanitize_with_report(content: &str, policy: &SanitizePolicy) -> Sanitized {
    Sanitizer::new(policy).sanitize_with_report(content)
}

/// Returns the version of the htmlwhitelist library.
///
/// # Examples
///
/// ```
/// use htmlwhitelist::version;
///
/// println!("htmlwhitelist version: {}", version());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
