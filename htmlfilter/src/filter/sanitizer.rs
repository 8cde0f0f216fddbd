use std::borrow::Cow;

use super::attributes::write_attributes;
use super::comments::strip_comments;
use super::tag::{write_tag, ParsedTag, TagOutcome};
use super::tokenizer::Tokenizer;
use crate::config::{ConfigError, FilterConfig};
use crate::report::{FilterReport, TagDropReason};

/// Deny-list HTML filter.
///
/// Holds an immutable [`FilterConfig`]; `filter` takes `&self`, so one
/// instance can serve many threads at once.
///
/// ```
/// use htmlfilter::HtmlFilter;
///
/// let filter = HtmlFilter::default();
/// assert_eq!(
///     filter.filter(r#"<a href="javascript:alert(1)" onclick="x()">link</a>"#),
///     "<a>link</a>"
/// );
/// assert_eq!(filter.filter("a<!--evil-->b"), "ab");
/// assert_eq!(filter.filter("<br/>"), "<br />");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlFilter {
    config: FilterConfig,
}

impl HtmlFilter {
    /// Builds a filter from `config` as is. Names that can never match are
    /// simply inert; use [`try_new`](Self::try_new) to reject them.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Builds a filter after [`FilterConfig::validate`] succeeds.
    pub fn try_new(config: FilterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Returns `input` with comments, forbidden tags, dangerous attributes
    /// and malformed markup removed.
    pub fn filter(&self, input: &str) -> String {
        let mut report = FilterReport::default();
        self.run(input, &mut report)
    }

    /// Like [`filter`](Self::filter), also returning what was removed.
    ///
    /// ```
    /// use htmlfilter::{DropReason, HtmlFilter};
    ///
    /// let (out, report) = HtmlFilter::default()
    ///     .filter_with_report(r#"<img src="x" onerror="alert(1)"><!-- c -->"#);
    /// assert_eq!(out, r#"<img src="x">"#);
    /// assert_eq!(report.comments_removed, 1);
    /// assert_eq!(report.dropped_attributes[0].reasons, DropReason::EVENT_HANDLER);
    /// ```
    pub fn filter_with_report(&self, input: &str) -> (String, FilterReport) {
        let mut report = FilterReport::default();
        let output = self.run(input, &mut report);
        (output, report)
    }

    /// Sanitizes a single raw tag segment such as `<a href="x">`. Returns an
    /// empty string when the tag is malformed or forbidden.
    pub fn sanitize_tag(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        write_tag(raw, &self.config, &mut FilterReport::default(), &mut out);
        out
    }

    /// Sanitizes an attribute blob such as `href="x" onclick="y"`, returning
    /// the survivors with a leading space each.
    pub fn sanitize_attributes(&self, blob: &str) -> String {
        let mut out = String::with_capacity(blob.len());
        write_attributes(blob, "", &self.config, &mut FilterReport::default(), &mut out);
        out
    }

    fn run(&self, input: &str, report: &mut FilterReport) -> String {
        let (stripped, comments) = strip_comments(input, self.config.max_comment_passes);
        report.comments_removed = comments.removed;
        report.unterminated_comment = comments.unterminated;
        report.comment_pass_limit_hit = comments.pass_limit_hit;

        let mut out = String::with_capacity(stripped.len());
        // name of the forbidden tag whose body is being skipped
        let mut skipping: Option<Cow<'_, str>> = None;

        for segment in Tokenizer::new(&stripped) {
            if let Some(name) = &skipping {
                report.stripped_content_bytes += segment.text.len();
                match ParsedTag::parse(segment.tag) {
                    Some(tag) if tag.closing && tag.name == *name => {
                        report.drop_tag(Some(tag.name.as_ref()), segment.tag.len(), TagDropReason::Forbidden);
                        skipping = None;
                    }
                    _ => report.stripped_content_bytes += segment.tag.len(),
                }
                continue;
            }

            push_text(&mut out, segment.text, report);
            if segment.tag.is_empty() {
                continue;
            }
            if let TagOutcome::Forbidden(tag) = write_tag(segment.tag, &self.config, report, &mut out) {
                if !tag.closing && self.config.strip_content_of.contains(&tag.name) {
                    skipping = Some(tag.name);
                }
            }
        }

        if let Some(name) = skipping {
            tracing::debug!(tag = %name, "no closing tag, content stripped to end of input");
        }
        if !report.is_clean() {
            tracing::debug!(
                input_len = input.len(),
                output_len = out.len(),
                comments = report.comments_removed,
                tags = report.dropped_tags.len(),
                attributes = report.dropped_attributes.len(),
                "filtered markup"
            );
        }
        out
    }
}

fn push_text(out: &mut String, text: &str, report: &mut FilterReport) {
    if !text.contains('>') {
        out.push_str(text);
        return;
    }
    for part in text.split('>') {
        out.push_str(part);
    }
    report.stray_gt_removed += text.bytes().filter(|&b| b == b'>').count();
}
