use std::borrow::Cow;

const COMMENT_OPEN: &str = "<!--";

/// Result of [`strip_comments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentStats {
    pub removed: usize,
    pub unterminated: bool,
    pub pass_limit_hit: bool,
}

// PCRE `\s`
fn is_pcre_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Finds the end of the first `--\s*>` close marker whose dashes start at or
/// after `from`, returning the index just past the `>`.
fn find_comment_close(s: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = s.get(pos..)?.windows(2).position(|w| w == b"--") {
        let dashes = pos + rel;
        let mut end = dashes + 2;
        while s.get(end).copied().is_some_and(is_pcre_space) {
            end += 1;
        }
        if s.get(end) == Some(&b'>') {
            return Some(end + 1);
        }
        pos = dashes + 1;
    }
    None
}

/// Removes HTML comments, scanning for the rightmost `<!--` on every pass.
///
/// A comment without a close marker swallows the rest of the string. After
/// `max_passes` passes, anything from the leftmost remaining opener onwards is
/// discarded. Input without an opener is returned borrowed.
///
/// ```
/// use htmlfilter::filter::strip_comments;
///
/// let (out, stats) = strip_comments("a<!--x-->b<!--y-->c", 16);
/// assert_eq!(out, "abc");
/// assert_eq!(stats.removed, 2);
///
/// let (out, stats) = strip_comments("keep<!-- never closed", 16);
/// assert_eq!(out, "keep");
/// assert!(stats.unterminated);
/// ```
pub fn strip_comments(input: &str, max_passes: usize) -> (Cow<'_, str>, CommentStats) {
    let mut value = Cow::Borrowed(input);
    let mut stats = CommentStats::default();
    let mut passes = 0usize;

    while let Some(pos) = value.rfind(COMMENT_OPEN) {
        if passes >= max_passes {
            // every pass shrinks the string, so this only trips on inputs
            // built from thousands of openers
            let first = value.find(COMMENT_OPEN).unwrap_or(pos);
            tracing::warn!(
                max_passes,
                discarded = value.len() - first,
                "comment pass limit reached, discarding remainder"
            );
            value.to_mut().truncate(first);
            stats.pass_limit_hit = true;
            break;
        }
        passes += 1;

        let tail = &value.as_bytes()[pos..];
        match find_comment_close(tail, COMMENT_OPEN.len()) {
            Some(end) => {
                value.to_mut().replace_range(pos..pos + end, "");
                stats.removed += 1;
            }
            None => {
                value.to_mut().truncate(pos);
                stats.unterminated = true;
            }
        }
    }

    (value, stats)
}
