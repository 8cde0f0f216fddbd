#![no_main]
use htmlfilter::{FilterConfig, HtmlFilter};
use libfuzzer_sys::fuzz_target;

// First line: space separated extra forbidden tags; the rest is the input.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (names, input) = text.split_once('\n').unwrap_or(("", text.as_ref()));

    let config = FilterConfig::default()
        .with_forbidden_tags(names.split(' ').filter(|n| !n.is_empty()))
        .with_max_comment_passes(8);
    let filter = HtmlFilter::new(config);

    let output = filter.filter(input);
    assert_eq!(filter.filter(&output), output);
});
