use tracing::{debug, trace};

use super::attributes::write_sanitized;
use super::cursor::Cursor;
use super::report::{SanitizeReport, Sanitized};
use super::scanner::{copy_text, read_tag, RawTag};
use super::skipper::skip_subtree;
use crate::policy::SanitizePolicy;

/// Applies one [`SanitizePolicy`] to any number of inputs.
///
/// Holds nothing but a borrow of the policy, so one sanitizer can be shared
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'p> {
    policy: &'p SanitizePolicy,
}

impl<'p> Sanitizer<'p> {
    pub fn new(policy: &'p SanitizePolicy) -> Self {
        Sanitizer { policy }
    }

    pub fn sanitize(&self, input: &str) -> String {
        self.sanitize_with_report(input).html
    }

    pub fn sanitize_with_report(&self, input: &str) -> Sanitized {
        let mut cursor = Cursor::new(input);
        let mut html = String::with_capacity(input.len());
        let mut report = SanitizeReport::default();

        while copy_text(&mut cursor, &mut html) {
            let Some(tag) = read_tag(&mut cursor) else {
                debug!(target: "htmlwhitelist", "input ends inside a tag");
                report.truncated = true;
                break;
            };
            self.dispatch(&tag, &mut cursor, &mut html, &mut report);
        }

        debug!(
            target: "htmlwhitelist",
            input_len = input.len(),
            output_len = html.len(),
            tags_kept = report.tags_kept,
            tags_dropped = report.tags_dropped,
            attributes_dropped = report.attributes_dropped,
            "sanitized"
        );
        Sanitized { html, report }
    }

    fn dispatch(
        &self,
        tag: &RawTag<'_>,
        cursor: &mut Cursor<'_>,
        html: &mut String,
        report: &mut SanitizeReport,
    ) {
        if let Some(allowed) = self.policy.allow_list.attributes(tag.name) {
            trace!(target: "htmlwhitelist", tag = tag.name, close = tag.is_close, "kept tag");
            report.tags_kept += 1;
            html.push('<');
            write_sanitized(html, tag, allowed, self.policy.flags, report);
            html.push('>');
            return;
        }

        report.tags_dropped += 1;
        if !tag.opens_subtree() {
            trace!(target: "htmlwhitelist", tag = tag.name, "dropped tag");
            return;
        }

        report.subtrees_removed += 1;
        let start = cursor.position();
        if skip_subtree(cursor, tag.name) {
            debug!(target: "htmlwhitelist", tag = tag.name, skipped = cursor.position().saturating_sub(start), "removed subtree");
        } else {
            debug!(target: "htmlwhitelist", tag = tag.name, "no matching close tag, discarding the rest of the input");
            report.truncated = true;
        }
    }
}
