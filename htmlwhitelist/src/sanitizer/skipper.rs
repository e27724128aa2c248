use super::cursor::Cursor;
use super::scanner::{read_tag, skip_text};

/// Discards everything up to and including the close tag matching an
/// already consumed `<target ...>`.
///
/// Only tags named exactly `target` affect the depth count. An opening tag
/// raises it even when written `<target />`; every other tag is skipped along
/// with the text. Returns `false` when the input ends before
/// the subtree is closed, in which case the rest of the input is gone.
pub fn skip_subtree(cursor: &mut Cursor<'_>, target: &str) -> bool {
    let mut depth: usize = 1;

    while skip_text(cursor) {
        let Some(tag) = read_tag(cursor) else {
            return false;
        };
        if tag.name != target {
            continue;
        }
        if tag.is_close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return true;
            }
        } else {
            depth = depth.saturating_add(1);
        }
    }

    false
}
