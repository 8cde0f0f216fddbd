//! Record of what a filter run removed.

use core::fmt;

bitflags::bitflags! {
    /// Why an attribute was dropped. Several reasons can hold at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DropReason: u8 {
        /// Name starts with `on`.
        const EVENT_HANDLER = 1 << 0;
        /// Name is in the configured attribute deny-list.
        const FORBIDDEN_NAME = 1 << 1;
        /// Value contains `javascript:`, `vbscript:` or `data:`.
        const DANGEROUS_SCHEME = 1 << 2;
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            first = false;
        }
        if first {
            f.write_str("NONE")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagDropReason {
    /// The fragment does not have the shape of a tag.
    Malformed,
    /// The tag name is in the configured tag deny-list.
    Forbidden,
}

impl fmt::Display for TagDropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagDropReason::Malformed => write!(f, "malformed"),
            TagDropReason::Forbidden => write!(f, "forbidden"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedTag {
    /// Lowercased tag name; `None` when the fragment did not parse.
    pub name: Option<String>,
    /// Length of the raw fragment in bytes.
    pub len: usize,
    pub reason: TagDropReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedAttribute {
    /// Tag the attribute was found on.
    pub tag: String,
    /// Lowercased attribute name.
    pub name: String,
    pub reasons: DropReason,
}

/// Everything a single [`HtmlFilter`](crate::HtmlFilter) call removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterReport {
    /// Well-formed `<!-- ... -->` spans removed.
    pub comments_removed: usize,
    /// An unterminated comment swallowed the end of the input.
    pub unterminated_comment: bool,
    /// The comment pass bound was reached and the remainder discarded.
    pub comment_pass_limit_hit: bool,
    /// `>` characters removed from literal text.
    pub stray_gt_removed: usize,
    pub dropped_tags: Vec<DroppedTag>,
    pub dropped_attributes: Vec<DroppedAttribute>,
    /// Bytes of attribute text that did not form a quoted `name=value` pair.
    pub malformed_attribute_bytes: usize,
    /// Bytes removed as the body of a stripped-content tag.
    pub stripped_content_bytes: usize,
}

impl FilterReport {
    /// `true` when the run removed nothing at all.
    pub fn is_clean(&self) -> bool {
        self.comments_removed == 0
            && !self.unterminated_comment
            && !self.comment_pass_limit_hit
            && self.stray_gt_removed == 0
            && self.dropped_tags.is_empty()
            && self.dropped_attributes.is_empty()
            && self.malformed_attribute_bytes == 0
            && self.stripped_content_bytes == 0
    }

    pub(crate) fn drop_tag(&mut self, name: Option<&str>, len: usize, reason: TagDropReason) {
        tracing::trace!(name = name.unwrap_or(""), len, %reason, "dropped tag");
        self.dropped_tags.push(DroppedTag {
            name: name.map(str::to_owned),
            len,
            reason,
        });
    }

    pub(crate) fn drop_attribute(&mut self, tag: &str, name: &str, reasons: DropReason) {
        tracing::trace!(tag, name, %reasons, "dropped attribute");
        self.dropped_attributes.push(DroppedAttribute {
            tag: tag.to_owned(),
            name: name.to_owned(),
            reasons,
        });
    }
}
