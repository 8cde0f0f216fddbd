#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::PathBuf;

use super::assert_safe;
use crate::{FilterConfig, HtmlFilter};

fn load_vectors() -> Vec<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/xss-vectors.txt");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            urlencoding::decode(line)
                .unwrap_or_else(|e| panic!("bad vector {line:?}: {e}"))
                .into_owned()
        })
        .collect()
}

#[test]
fn test_vectors_load() {
    let vectors = load_vectors();
    assert!(vectors.len() >= 50, "only {} vectors loaded", vectors.len());
    assert!(vectors.iter().any(|v| v.contains("<SCRIPT")));
}

#[test]
fn test_vectors_are_neutralized() {
    let config = FilterConfig::default();
    let filter = HtmlFilter::new(config.clone());

    for vector in load_vectors() {
        let output = filter.filter(&vector);
        assert_safe(&vector, &output, &config);
        assert_eq!(filter.filter(&output), output, "not idempotent for {vector:?}");
    }
}

#[test]
fn test_vectors_without_content_stripping() {
    let config = FilterConfig::default().with_strip_content_tags(Vec::<String>::new());
    let filter = HtmlFilter::new(config.clone());

    for vector in load_vectors() {
        let output = filter.filter(&vector);
        assert_safe(&vector, &output, &config);
    }
}

#[test]
fn test_vectors_report_every_change() {
    let filter = HtmlFilter::default();
    for vector in load_vectors() {
        let (output, report) = filter.filter_with_report(&vector);
        if output.to_ascii_lowercase() != vector.to_ascii_lowercase() {
            continue;
        }
        // unchanged apart from case means nothing was dropped
        assert!(report.is_clean(), "report not clean for {vector:?}: {report:?}");
    }
}

#[test]
fn test_selected_vectors() {
    let cases = [
        ("<A HREF=\"vbscript:msgbox(1)\">XSS</A>", "<a>XSS</a>"),
        ("<A HREF=\"http://66.102.7.147/\">XSS</A>", "<a href=\"http://66.102.7.147/\">XSS</a>"),
        ("<IFRAME SRC=\"javascript:alert('XSS');\"></IFRAME>", "<iframe></iframe>"),
        ("<!--[if gte IE 4]><SCRIPT>alert('XSS');</SCRIPT><![endif]-->", ""),
        ("\"><script>alert(document.cookie)</script>", "\""),
        ("<p title=\"</p><script>alert(1)</script>\">safe</p>", "<p>\"safe</p>"),
        ("<x onclick=alert(1)>click", "<x>click"),
        ("<details open ontoggle=\"alert(1)\">", "<details>"),
    ];

    for (input, expected) in cases {
        assert!(
            load_vectors().iter().any(|v| v == input),
            "{input:?} missing from the vector file"
        );
        assert_eq!(crate::filter(input), expected, "input: {input:?}");
    }
}
