use std::borrow::Cow;

use super::denylists::{find_dangerous_scheme, is_event_handler};
use super::tag::ascii_lowercase;
use crate::config::FilterConfig;
use crate::report::{DropReason, FilterReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    fn from_byte(b: u8) -> Option<Quote> {
        match b {
            b'"' => Some(Quote::Double),
            b'\'' => Some(Quote::Single),
            _ => None,
        }
    }
}

/// A quoted `name=value` pair found in an attribute blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttribute<'a> {
    /// Lowercased name.
    pub name: Cow<'a, str>,
    pub quote: Quote,
    /// Raw value between the quotes, never unescaped.
    pub value: &'a str,
}

impl ParsedAttribute<'_> {
    /// Why this attribute must be dropped; empty when it may be kept.
    pub fn drop_reasons(&self, config: &FilterConfig) -> DropReason {
        let mut reasons = DropReason::empty();
        if is_event_handler(&self.name) {
            reasons |= DropReason::EVENT_HANDLER;
        }
        if config.forbidden_attributes.contains(&self.name) {
            reasons |= DropReason::FORBIDDEN_NAME;
        }
        if find_dangerous_scheme(self.value).is_some() {
            reasons |= DropReason::DANGEROUS_SCHEME;
        }
        reasons
    }

    /// Appends ` name="value"` (or with single quotes) to `out`.
    pub fn write_to(&self, out: &mut String) {
        let quote = self.quote.as_char();
        out.push(' ');
        out.push_str(&self.name);
        out.push('=');
        out.push(quote);
        out.push_str(self.value);
        out.push(quote);
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Iterator over the well-formed attributes of a blob.
///
/// Pairs are found leftmost-first without overlapping: a name of
/// `[A-Za-z0-9_-]`, optional whitespace, `=`, optional whitespace, then a
/// value in double or single quotes ending at the next matching quote. Text
/// between matches is skipped; anything but whitespace there is counted in
/// [`skipped_bytes`](Attributes::skipped_bytes).
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    s: &'a str,
    pos: usize,
    skipped: usize,
}

impl<'a> Attributes<'a> {
    pub fn new(blob: &'a str) -> Self {
        Attributes {
            s: blob,
            pos: 0,
            skipped: 0,
        }
    }

    /// Non-whitespace bytes that were not part of any well-formed pair so
    /// far.
    pub fn skipped_bytes(&self) -> usize {
        self.skipped
    }

    fn skip_to(&mut self, end: usize) {
        let junk = self.s.as_bytes()[self.pos..end]
            .iter()
            .filter(|&&b| !is_space(b))
            .count();
        self.skipped += junk;
        self.pos = end;
    }

    fn skip_space(&self, mut pos: usize) -> usize {
        let bytes = self.s.as_bytes();
        while bytes.get(pos).copied().is_some_and(is_space) {
            pos += 1;
        }
        pos
    }

    /// Tries to match a pair whose name is the run `name_start..name_end`.
    /// Returns the attribute and the index just past its closing quote.
    fn match_pair(&self, name_start: usize, name_end: usize) -> Option<(ParsedAttribute<'a>, usize)> {
        let bytes = self.s.as_bytes();
        let mut pos = self.skip_space(name_end);
        if bytes.get(pos) != Some(&b'=') {
            return None;
        }
        pos = self.skip_space(pos + 1);
        let quote_byte = *bytes.get(pos)?;
        let quote = Quote::from_byte(quote_byte)?;
        let value_start = pos + 1;
        let value_len = bytes
            .get(value_start..)?
            .iter()
            .position(|&b| b == quote_byte)?;
        let value_end = value_start + value_len;

        let attr = ParsedAttribute {
            name: ascii_lowercase(&self.s[name_start..name_end]),
            quote,
            value: &self.s[value_start..value_end],
        };
        Some((attr, value_end + 1))
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = ParsedAttribute<'a>;

    fn next(&mut self) -> Option<ParsedAttribute<'a>> {
        let bytes: &'a [u8] = self.s.as_bytes();
        let mut scan = self.pos;

        while scan < bytes.len() {
            if !is_name_byte(bytes[scan]) {
                scan += 1;
                continue;
            }

            // a shorter name starting later in the same run fails the same way
            let name_end = bytes[scan..]
                .iter()
                .position(|&b| !is_name_byte(b))
                .map_or(bytes.len(), |rel| scan + rel);

            if let Some((attr, end)) = self.match_pair(scan, name_end) {
                self.skip_to(scan);
                self.pos = end;
                return Some(attr);
            }
            scan = name_end;
        }

        self.skip_to(bytes.len());
        None
    }
}

/// Parses the well-formed attributes of `blob`; malformed fragments are
/// skipped.
///
/// ```
/// use htmlfilter::filter::{parse_attributes, Quote};
///
/// let attrs: Vec<_> = parse_attributes(r#"HREF = "/x" bare title='it"s'"#).collect();
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].name, "href");
/// assert_eq!(attrs[0].value, "/x");
/// assert_eq!(attrs[1].quote, Quote::Single);
/// assert_eq!(attrs[1].value, "it\"s");
/// ```
pub fn parse_attributes(blob: &str) -> Attributes<'_> {
    Attributes::new(blob)
}

/// Writes the surviving attributes of `blob` to `out`, each with a leading
/// space, in their original order.
pub(crate) fn write_attributes(
    blob: &str,
    tag: &str,
    config: &FilterConfig,
    report: &mut FilterReport,
    out: &mut String,
) {
    let mut attrs = parse_attributes(blob);
    for attr in attrs.by_ref() {
        let reasons = attr.drop_reasons(config);
        if reasons.is_empty() {
            attr.write_to(out);
        } else {
            report.drop_attribute(tag, &attr.name, reasons);
        }
    }
    report.malformed_attribute_bytes += attrs.skipped_bytes();
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn sanitize(blob: &str) -> String {
        let mut out = String::new();
        let mut report = FilterReport::default();
        write_attributes(blob, "a", &FilterConfig::default(), &mut report, &mut out);
        out
    }

    fn names(blob: &str) -> Vec<String> {
        parse_attributes(blob).map(|a| a.name.into_owned()).collect()
    }

    #[test]
    fn parses_both_quote_styles() {
        let attrs: Vec<_> = parse_attributes(r#"a="1" b='2'"#).collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!((attrs[0].quote, attrs[0].value), (Quote::Double, "1"));
        assert_eq!((attrs[1].quote, attrs[1].value), (Quote::Single, "2"));
    }

    #[test]
    fn unquoted_and_valueless_attributes_are_skipped() {
        assert_eq!(names("checked src=x alt=\"y\" disabled"), vec!["alt"]);
        let mut attrs = parse_attributes("checked src=x");
        assert!(attrs.next().is_none());
        assert_eq!(attrs.skipped_bytes(), "checkedsrc=x".len());
    }

    #[test]
    fn whitespace_around_equals() {
        assert_eq!(sanitize("title \n=\t 'x'"), " title='x'");
    }

    #[test]
    fn values_may_span_lines_and_hold_other_quotes() {
        assert_eq!(sanitize("title=\"a\nb\""), " title=\"a\nb\"");
        assert_eq!(sanitize(r#"title='x" onclick="y'"#), r#" title='x" onclick="y'"#);
    }

    #[test]
    fn empty_and_zero_values_are_kept() {
        assert_eq!(sanitize(r#"alt="" title="0""#), r#" alt="" title="0""#);
    }

    #[test]
    fn unterminated_value_lets_later_pairs_match() {
        assert_eq!(names(r#"a="x b='y'"#), vec!["b"]);
    }

    #[test]
    fn names_are_lowercased_values_untouched() {
        assert_eq!(sanitize(r#"CLASS="Big Red""#), r#" class="Big Red""#);
        assert_eq!(sanitize(r#"data-X_1="&amp;""#), r#" data-x_1="&amp;""#);
    }

    #[test]
    fn event_handlers_are_dropped() {
        assert_eq!(sanitize(r#"onclick="x()" ONLOAD='y' href="/""#), r#" href="/""#);
        assert_eq!(sanitize(r#"one="1""#), "");
    }

    #[test]
    fn forbidden_names_are_dropped_case_insensitively() {
        assert_eq!(sanitize(r#"FSCOMMAND="x" seeksegmenttime="1" id="k""#), r#" id="k""#);
    }

    #[test]
    fn dangerous_schemes_are_dropped() {
        assert_eq!(sanitize(r#"href="JavaScript:alert(1)""#), "");
        assert_eq!(sanitize(r#"src=' vbscript:x'"#), "");
        assert_eq!(sanitize(r#"src="DATA:text/html,x" alt="ok""#), r#" alt="ok""#);
        assert_eq!(sanitize(r#"href="/path?q=javascript""#), r#" href="/path?q=javascript""#);
    }

    #[test]
    fn drop_reasons_accumulate() {
        let attr = ParsedAttribute {
            name: Cow::Borrowed("onfscommand"),
            quote: Quote::Double,
            value: "javascript:x",
        };
        let config = FilterConfig::default().with_forbidden_attribute("onfscommand");
        assert_eq!(attr.drop_reasons(&config), DropReason::all());
    }

    #[test]
    fn report_records_drops_and_skipped_bytes() {
        let mut out = String::new();
        let mut report = FilterReport::default();
        write_attributes(
            r#"onerror="x" junk href="/""#,
            "img",
            &FilterConfig::default(),
            &mut report,
            &mut out,
        );
        assert_eq!(out, r#" href="/""#);
        assert_eq!(report.dropped_attributes.len(), 1);
        assert_eq!(report.dropped_attributes[0].tag, "img");
        assert_eq!(report.dropped_attributes[0].name, "onerror");
        assert_eq!(report.dropped_attributes[0].reasons, DropReason::EVENT_HANDLER);
        assert_eq!(report.malformed_attribute_bytes, "junk".len());
    }
}
