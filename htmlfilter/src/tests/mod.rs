#![allow(clippy::panic)]

use crate::filter::{parse_attributes, ParsedTag, Tokenizer};
use crate::FilterConfig;

mod test_vectors;

/// Panics unless `output` is something the filter could have produced under
/// `config`: no comment openers, no stray `>`, only well-formed allowed tags
/// and only allowed quoted attributes.
pub(crate) fn assert_safe(input: &str, output: &str, config: &FilterConfig) {
    assert!(
        !output.contains("<!--"),
        "comment opener survived\ninput: {input:?}\noutput: {output:?}"
    );

    for segment in Tokenizer::new(output) {
        assert!(
            !segment.text.contains('>'),
            "stray `>` in text {:?}\ninput: {input:?}\noutput: {output:?}",
            segment.text
        );
        if segment.tag.is_empty() {
            continue;
        }

        let Some(tag) = ParsedTag::parse(segment.tag) else {
            panic!("malformed tag {:?} survived\ninput: {input:?}\noutput: {output:?}", segment.tag);
        };
        assert!(
            !config.forbidden_tags.contains(&tag.name),
            "forbidden tag {:?} survived\ninput: {input:?}\noutput: {output:?}",
            tag.name
        );

        let mut attrs = parse_attributes(tag.attributes);
        for attr in attrs.by_ref() {
            let reasons = attr.drop_reasons(config);
            assert!(
                reasons.is_empty(),
                "attribute {:?}={:?} survived ({reasons})\ninput: {input:?}\noutput: {output:?}",
                attr.name,
                attr.value
            );
        }
        assert_eq!(
            attrs.skipped_bytes(),
            0,
            "junk left in attributes of {:?}\ninput: {input:?}\noutput: {output:?}",
            segment.tag
        );
    }
}
