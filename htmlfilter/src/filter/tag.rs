use std::borrow::Cow;

use super::attributes::write_attributes;
use crate::config::FilterConfig;
use crate::report::{FilterReport, TagDropReason};

/// Lowercases ASCII letters, borrowing when there is nothing to change.
pub fn ascii_lowercase(s: &str) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// whitespace trimmed from the ends of a tag's attribute blob
fn is_trim_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0B)
}

fn trim_blob(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && is_trim_byte(c as u8))
}

/// Structure of a raw tag segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag<'a> {
    /// `true` for `</name ...>`.
    pub closing: bool,
    /// Lowercased tag name: an ASCII letter followed by word characters.
    pub name: Cow<'a, str>,
    /// Everything between the name and the closing delimiter, untrimmed.
    pub attributes: &'a str,
    /// `true` when the tag ends with `/>`.
    pub self_closing: bool,
}

impl<'a> ParsedTag<'a> {
    /// Parses a tag segment such as `<a href="x">`, `</p>` or `<br/>`.
    ///
    /// Returns `None` when the segment does not end in `>` or the name is
    /// empty or starts with something other than an ASCII letter.
    ///
    /// ```
    /// use htmlfilter::filter::ParsedTag;
    ///
    /// let tag = ParsedTag::parse("<IMG src='a.png'/>").unwrap();
    /// assert_eq!(tag.name, "img");
    /// assert_eq!(tag.attributes, " src='a.png'");
    /// assert!(tag.self_closing && !tag.closing);
    ///
    /// assert!(ParsedTag::parse("<1invalid>").is_none());
    /// assert!(ParsedTag::parse("<b").is_none());
    /// ```
    pub fn parse(raw: &'a str) -> Option<ParsedTag<'a>> {
        let bytes = raw.as_bytes();
        let inner = bytes.strip_prefix(b"<")?.strip_suffix(b">")?;

        let (closing, name_start) = match inner.first() {
            Some(b'/') => (true, 2),
            _ => (false, 1),
        };

        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        // the name never runs past the closing `>`
        let gt = bytes.len() - 1;
        let name_len = bytes[name_start..gt]
            .iter()
            .position(|&b| !is_word_byte(b))
            .unwrap_or(gt - name_start);
        let name_end = name_start + name_len;

        let self_closing = gt > name_end && bytes[gt - 1] == b'/';
        let attr_end = if self_closing { gt - 1 } else { gt };

        Some(ParsedTag {
            closing,
            name: ascii_lowercase(&raw[name_start..name_end]),
            attributes: &raw[name_end..attr_end],
            self_closing,
        })
    }

    pub fn open_marker(&self) -> &'static str {
        if self.closing {
            "</"
        } else {
            "<"
        }
    }

    /// `" />"` for self-closing tags, `">"` otherwise.
    pub fn close_marker(&self) -> &'static str {
        if self.self_closing {
            " />"
        } else {
            ">"
        }
    }
}

/// Outcome of sanitizing one tag segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagOutcome<'a> {
    /// The tag was written to the output.
    Kept,
    Malformed,
    /// Dropped by the deny-list; carries the parsed tag so the caller can
    /// decide whether its content goes too.
    Forbidden(ParsedTag<'a>),
}

/// Sanitizes `raw` into `out`, recording drops in `report`.
pub(crate) fn write_tag<'a>(
    raw: &'a str,
    config: &FilterConfig,
    report: &mut FilterReport,
    out: &mut String,
) -> TagOutcome<'a> {
    let Some(tag) = ParsedTag::parse(raw) else {
        report.drop_tag(None, raw.len(), TagDropReason::Malformed);
        return TagOutcome::Malformed;
    };

    if config.forbidden_tags.contains(&tag.name) {
        report.drop_tag(Some(tag.name.as_ref()), raw.len(), TagDropReason::Forbidden);
        return TagOutcome::Forbidden(tag);
    }

    out.push_str(tag.open_marker());
    out.push_str(&tag.name);
    let attributes = trim_blob(tag.attributes);
    if !attributes.is_empty() {
        write_attributes(attributes, &tag.name, config, report, out);
    }
    out.push_str(tag.close_marker());
    TagOutcome::Kept
}
