#![no_main]
use htmlfilter::filter::{parse_attributes, ParsedTag, Tokenizer};
use htmlfilter::{FilterConfig, HtmlFilter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let config = FilterConfig::default();
    let filter = HtmlFilter::new(config.clone());

    let output = filter.filter(&input);
    assert_eq!(filter.filter(&output), output, "filter is not idempotent");
    assert!(!output.contains("<!--"));

    for segment in Tokenizer::new(&output) {
        assert!(!segment.text.contains('>'));
        if segment.tag.is_empty() {
            continue;
        }
        let tag = ParsedTag::parse(segment.tag).expect("malformed tag in output");
        assert!(!config.forbidden_tags.contains(&tag.name));
        for attr in parse_attributes(tag.attributes) {
            assert!(attr.drop_reasons(&config).is_empty());
        }
    }
});
