use htmlfilter::{filter, FilterConfig, HtmlFilter};

fn main() {
    println!("Testing htmlfilter {}...", htmlfilter::version());

    let default_tests = [
        ("<b>bold</b> & text", "Safe HTML"),
        ("<script>alert('xss')</script>", "Script tag"),
        ("<img src=\"x\" onerror=\"alert(1)\">", "Event handler"),
        ("<a href=\"javascript:alert(1)\">link</a>", "Javascript protocol"),
        ("a<!-- hidden -->b", "Comment"),
        ("<br/>", "Self-closing tag"),
    ];

    println!("\n=== Default configuration ===");
    for (input, description) in &default_tests {
        println!("{}: {} -> {}", description, input, filter(input));
    }

    let strict = HtmlFilter::new(
        FilterConfig::default()
            .with_forbidden_tag("iframe")
            .with_forbidden_attribute("style"),
    );
    let custom_tests = [
        ("<iframe src=\"//evil\"></iframe>ok", "Extra forbidden tag"),
        ("<p style=\"color:red\" title=\"t\">x</p>", "Extra forbidden attribute"),
    ];

    println!("\n=== Custom configuration ===");
    for (input, description) in &custom_tests {
        let (output, report) = strict.filter_with_report(input);
        println!(
            "{}: {} -> {} (tags dropped: {}, attributes dropped: {})",
            description,
            input,
            output,
            report.dropped_tags.len(),
            report.dropped_attributes.len()
        );
    }
}
