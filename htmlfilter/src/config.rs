//! Filter configuration: the tag and attribute deny-lists.
//!
//! A [`FilterConfig`] is built once and handed to
//! [`HtmlFilter::new`](crate::HtmlFilter::new). The filter never mutates it,
//! so a single filter can be shared between threads. To change the lists,
//! build a new filter.

use core::fmt;

use crate::filter::denylists::{
    DEFAULT_FORBIDDEN_ATTRIBUTES, DEFAULT_FORBIDDEN_TAGS, DEFAULT_STRIP_CONTENT_OF,
};

/// Upper bound on comment-stripping passes used by [`FilterConfig::default`].
pub const DEFAULT_MAX_COMMENT_PASSES: usize = 1024;

/// Which list of a [`FilterConfig`] an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    ForbiddenTags,
    ForbiddenAttributes,
    StripContentOf,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::ForbiddenTags => write!(f, "forbidden_tags"),
            ListKind::ForbiddenAttributes => write!(f, "forbidden_attributes"),
            ListKind::StripContentOf => write!(f, "strip_content_of"),
        }
    }
}

/// Errors reported by [`FilterConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{list} contains an empty name")]
    EmptyName { list: ListKind },

    #[error("{list} entry {name:?} can never match a parsed name")]
    InvalidName { list: ListKind, name: String },

    #[error("max_comment_passes must be at least 1")]
    ZeroCommentPasses,

    #[cfg(feature = "serde")]
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An insertion-ordered set of names matched without regard to ASCII case.
///
/// Names are stored lowercased; inserting a name that differs from an existing
/// entry only by case is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct DenyList {
    names: Vec<String>,
}

impl DenyList {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Adds `name`, returning `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_ascii_lowercase());
        true
    }

    /// Removes `name`, returning `false` if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| !n.eq_ignore_ascii_case(name));
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn validate(&self, list: ListKind) -> Result<(), ConfigError> {
        for name in &self.names {
            if name.is_empty() {
                return Err(ConfigError::EmptyName { list });
            }
            let matchable = match list {
                ListKind::ForbiddenAttributes => is_attribute_name(name),
                ListKind::ForbiddenTags | ListKind::StripContentOf => is_tag_name(name),
            };
            if !matchable {
                return Err(ConfigError::InvalidName {
                    list,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<S: AsRef<str>> FromIterator<S> for DenyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = DenyList::new();
        list.extend(iter);
        list
    }
}

impl<S: AsRef<str>> Extend<S> for DenyList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

impl From<Vec<String>> for DenyList {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<DenyList> for Vec<String> {
    fn from(list: DenyList) -> Self {
        list.names
    }
}

// Tag names as the tag parser accepts them: an ASCII letter followed by word
// characters.
fn is_tag_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.first().is_some_and(u8::is_ascii_alphabetic)
        && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_attribute_name(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Immutable configuration of an [`HtmlFilter`](crate::HtmlFilter).
///
/// # Examples
///
/// ```
/// use htmlfilter::{FilterConfig, HtmlFilter};
///
/// let config = FilterConfig::default()
///     .with_forbidden_tag("iframe")
///     .with_forbidden_attribute("style");
/// let filter = HtmlFilter::try_new(config).unwrap();
///
/// assert_eq!(filter.filter("<iframe src=\"x\"></iframe>ok"), "ok");
/// assert_eq!(filter.filter("<p style=\"color:red\">hi</p>"), "<p>hi</p>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FilterConfig {
    /// Tags dropped wherever they appear.
    pub forbidden_tags: DenyList,
    /// Attributes dropped in addition to every `on*` handler.
    pub forbidden_attributes: DenyList,
    /// Forbidden tags whose body is dropped up to the matching closing tag.
    pub strip_content_of: DenyList,
    /// Bound on right-to-left comment scans before the rest of the input is
    /// discarded.
    pub max_comment_passes: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            forbidden_tags: DEFAULT_FORBIDDEN_TAGS.iter().collect(),
            forbidden_attributes: DEFAULT_FORBIDDEN_ATTRIBUTES.iter().collect(),
            strip_content_of: DEFAULT_STRIP_CONTENT_OF.iter().collect(),
            max_comment_passes: DEFAULT_MAX_COMMENT_PASSES,
        }
    }
}

impl FilterConfig {
    /// A configuration with every list empty. Only `on*` handlers, script
    /// URLs, comments and malformed markup are removed.
    pub fn empty() -> Self {
        Self {
            forbidden_tags: DenyList::new(),
            forbidden_attributes: DenyList::new(),
            strip_content_of: DenyList::new(),
            max_comment_passes: DEFAULT_MAX_COMMENT_PASSES,
        }
    }

    pub fn with_forbidden_tag(mut self, name: &str) -> Self {
        self.forbidden_tags.insert(name);
        self
    }

    pub fn with_forbidden_attribute(mut self, name: &str) -> Self {
        self.forbidden_attributes.insert(name);
        self
    }

    pub fn with_strip_content_of(mut self, name: &str) -> Self {
        self.strip_content_of.insert(name);
        self
    }

    pub fn with_forbidden_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_tags = names.into_iter().collect();
        self
    }

    pub fn with_forbidden_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_attributes = names.into_iter().collect();
        self
    }

    pub fn with_strip_content_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.strip_content_of = names.into_iter().collect();
        self
    }

    pub fn with_max_comment_passes(mut self, passes: usize) -> Self {
        self.max_comment_passes = passes;
        self
    }

    /// Checks that every configured name can match something the parser
    /// produces and that the comment pass bound is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.forbidden_tags.validate(ListKind::ForbiddenTags)?;
        self.forbidden_attributes
            .validate(ListKind::ForbiddenAttributes)?;
        self.strip_content_of.validate(ListKind::StripContentOf)?;
        if self.max_comment_passes == 0 {
            return Err(ConfigError::ZeroCommentPasses);
        }
        Ok(())
    }

    /// Parses a JSON configuration; missing fields take their defaults.
    ///
    /// ```
    /// # #[cfg(feature = "serde")] {
    /// use htmlfilter::FilterConfig;
    ///
    /// let config = FilterConfig::from_json(r#"{"forbidden_tags": ["iframe"]}"#).unwrap();
    /// assert!(config.forbidden_tags.contains("IFRAME"));
    /// assert!(config.forbidden_attributes.contains("fscommand"));
    /// # }
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FilterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
