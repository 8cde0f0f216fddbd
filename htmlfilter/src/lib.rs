#![doc = include_str!("../README.md")]
//!
//! ## API Guide
//!
//! ### For End Users
//!
//! - [`filter`] - filter with the default deny-lists (recommended)
//! - [`HtmlFilter`] - filter with your own [`FilterConfig`]
//! - [`HtmlFilter::filter_with_report`] - also get a [`FilterReport`] of what was removed
//! - [`version`] - library version information
//!
//! ### For Debugging
//!
//! The passes that make up the filter are exposed in the [`filter`](mod@filter)
//! module: [`strip_comments`](filter::strip_comments),
//! [`Tokenizer`](filter::Tokenizer), [`ParsedTag`](filter::ParsedTag) and
//! [`parse_attributes`](filter::parse_attributes). They are useful for
//! understanding why a fragment was dropped; most applications should not
//! need them.

use std::sync::OnceLock;

pub mod config;
pub mod filter;
pub mod report;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, DenyList, FilterConfig, ListKind};
pub use filter::HtmlFilter;
pub use report::{DropReason, DroppedAttribute, DroppedTag, FilterReport, TagDropReason};

static DEFAULT_FILTER: OnceLock<HtmlFilter> = OnceLock::new();

/// Filters `input` with the default configuration.
///
/// Removes comments, the tags `script, form, button, input, style, meta,
/// base, xss, xml` (with the bodies of `script` and `style`), every `on*`
/// attribute, the `seekSegmentTime` and `FSCommand` attributes, and any
/// attribute whose value contains `javascript:`, `vbscript:` or `data:`.
///
/// # Examples
///
/// ```
/// use htmlfilter::filter;
///
/// assert_eq!(filter("<b>bold</b> & text"), "<b>bold</b> & text");
/// assert_eq!(filter("<script>alert(1)</script>"), "");
/// assert_eq!(filter("<1invalid>"), "");
/// ```
pub fn filter(input: &str) -> String {
    DEFAULT_FILTER.get_or_init(HtmlFilter::default).filter(input)
}

/// Returns the version of the htmlfilter library.
///
/// # Examples
///
/// ```
/// use htmlfilter::version;
///
/// println!("htmlfilter version: {}", version());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
