//! The filtering passes and the [`HtmlFilter`] that chains them.
//!
//! Most callers only need [`HtmlFilter::filter`]. The individual passes are
//! public for debugging and for callers that want to inspect how a given
//! input is split up:
//!
//! 1. [`strip_comments`] removes `<!-- ... -->` blocks, rightmost opener first.
//! 2. [`Tokenizer`] splits the rest into literal text and raw tag [`Segment`]s.
//! 3. [`ParsedTag::parse`] gives a tag's structure; forbidden tags are dropped.
//! 4. [`parse_attributes`] finds quoted attributes; dangerous ones are dropped.

pub use self::attributes::{parse_attributes, Attributes, ParsedAttribute, Quote};
pub use self::comments::{strip_comments, CommentStats};
pub use self::sanitizer::HtmlFilter;
pub use self::tag::ParsedTag;
pub use self::tokenizer::{tokenize, Segment, Tokenizer};

mod attributes;
mod comments;
pub mod denylists;
mod sanitizer;
mod tag;
mod tokenizer;
