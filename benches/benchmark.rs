//! Performance benchmarks for rs-domclean.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Small synthetic document (~1KB) through the full clean pass
//! - Whitespace normalization over generated markup of increasing size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_domclean::{clean_html, normalize_whitespace, CleanOptions};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>  Sample   Article  </title>
    <!-- tracking snippet -->
</head>
<body>
    <nav class=" menu ">
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph<!-- ad -->of the article.   It contains
        some   content with    irregular   spacing.</p>
        <div>   </div>
        <pre>
    keep   this
        exactly
        </pre>
        <p>Second paragraph with <em> emphasis </em> and <a href="#x">a link</a>.</p>
        <span></span>
    </article>
    <script>
        var  x = 1 < 2;
    </script>
</body>
</html>
"#;

fn bench_clean_default(c: &mut Criterion) {
    let options = CleanOptions::default();

    c.bench_function("clean_default", |b| {
        b.iter(|| clean_html(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_clean_minify(c: &mut Criterion) {
    let options = CleanOptions::minify();

    c.bench_function("clean_minify", |b| {
        b.iter(|| clean_html(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

/// Normalization throughput over markup of growing size
fn bench_normalize_whitespace(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_whitespace");

    for repeat in [10_usize, 100, 1000] {
        let markup = "<p>  some   text\n\n  here  </p>   \n  <div> x </div>".repeat(repeat);
        let size_kb = markup.len() / 1024;
        group.throughput(Throughput::Bytes(markup.len() as u64));

        for keep_new_lines in [false, true] {
            group.bench_with_input(
                BenchmarkId::new(
                    format!("keep_new_lines={keep_new_lines}"),
                    format!("{size_kb}KB"),
                ),
                &markup,
                |b, markup| {
                    b.iter(|| normalize_whitespace(black_box(markup), keep_new_lines));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_clean_default,
    bench_clean_minify,
    bench_normalize_whitespace
);
criterion_main!(benches);
