use criterion::{black_box, criterion_group, criterion_main, Criterion};
use htmlfilter::{filter, FilterConfig, HtmlFilter};

fn bench_filter_simple(c: &mut Criterion) {
    let test_cases = vec![
        "<script>alert('xss')</script>",
        "<img src=x onerror=alert(1)>",
        "<iframe src=\"javascript:alert(1)\"></iframe>",
        "javascript:alert('xss')",
        "<div onclick=\"alert(1)\">click</div>",
        "Hello world",
        "<p>Safe content</p>",
        "a<!-- comment -->b",
    ];

    c.bench_function("filter", |b| {
        b.iter(|| {
            for case in &test_cases {
                black_box(filter(case));
            }
        })
    });
}

fn bench_filter_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_individual");
    let html_filter = HtmlFilter::default();

    let test_cases = vec![
        ("script_tag", "<script>alert('xss')</script>"),
        ("img_onerror", "<img src=\"x\" onerror=\"alert(1)\">"),
        ("anchor_js", "<a href=\"javascript:alert(1)\">x</a>"),
        ("comment", "a<!-- <script>x</script> -->b"),
        ("self_closing", "line<br/>next<hr class=\"x\"/>"),
        ("safe_text", "Hello world"),
        ("safe_html", "<p class=\"intro\">Safe <b>content</b></p>"),
        ("malformed", "<1invalid><>< b>x"),
    ];

    for (name, input) in test_cases {
        group.bench_function(name, |b| {
            b.iter(|| black_box(html_filter.filter(black_box(input))))
        });
    }

    group.finish();
}

fn bench_filter_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_input_sizes");
    let html_filter = HtmlFilter::default();

    let base = "<p class=\"a\" onclick=\"x()\">text</p>";
    let sizes = vec![10, 50, 100, 500, 1000, 5000, 50000];

    for size in sizes {
        let mut input = base.to_string();
        while input.len() < size {
            input.push_str("<div title='t'>content</div><!--c-->");
        }
        input.truncate(size);

        group.bench_function(format!("size_{}", size), |b| {
            b.iter(|| black_box(html_filter.filter(black_box(&input))))
        });
    }

    group.finish();
}

fn bench_filter_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_adversarial");
    let html_filter = HtmlFilter::default();
    let limited = HtmlFilter::new(FilterConfig::default().with_max_comment_passes(64));

    let comments = "x<!---->".repeat(2000);
    let openers = "<!--".repeat(2000);
    let open_tags = "<a ".repeat(10000);

    group.bench_function("many_comments", |b| {
        b.iter(|| black_box(html_filter.filter(black_box(&comments))))
    });
    group.bench_function("many_comments_limited", |b| {
        b.iter(|| black_box(limited.filter(black_box(&comments))))
    });
    group.bench_function("many_openers", |b| {
        b.iter(|| black_box(html_filter.filter(black_box(&openers))))
    });
    group.bench_function("unterminated_tags", |b| {
        b.iter(|| black_box(html_filter.filter(black_box(&open_tags))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filter_simple,
    bench_filter_individual,
    bench_filter_sizes,
    bench_filter_adversarial
);
criterion_main!(benches);
