//! Benchmarks for the markdown → man/HTML pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use roffdown::man::rewrite;
use roffdown::{CommonMark, MarkdownRenderer, PageInfo, convert, tokenize};

/// A manual page with a long options section, nested lists and code blocks.
fn sample_page() -> String {
    let mut md = String::from(
        "# NAME\n\nbench - exercise the converter\n\n# SYNOPSIS\n\n```\nbench [OPTION...] FILE...\n```\n\n# OPTIONS\n\n",
    );
    for i in 0..200 {
        md.push_str(&format!(
            "0.  `--option-{i}`, `-o{i}`\n\n    Sets **option {i}** to the *given* value.\n\n    - first detail\n    - second detail\n      1. sub step\n      2. another\n\n"
        ));
    }
    md.push_str("# SEE ALSO\n\n**other**(1)\n");
    md
}

fn page() -> PageInfo {
    PageInfo::new("bench", "1", "01 Jan 2024").with_version("1.0")
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_convert(c: &mut Criterion) {
    let md = sample_page();
    let page = page();
    c.bench_function("convert", |b| {
        b.iter(|| convert(&md, &page).unwrap());
    });
}

fn bench_render_markdown(c: &mut Criterion) {
    let md = sample_page();
    c.bench_function("render_markdown", |b| {
        b.iter(|| CommonMark.render(&md));
    });
}

fn bench_rewrite(c: &mut Criterion) {
    let html = CommonMark.render(&sample_page());
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(&html));
    });
    let tokens = tokenize(&html);
    c.bench_function("rewrite", |b| {
        b.iter(|| rewrite(tokens.clone()).unwrap());
    });
}

criterion_group!(benches, bench_convert, bench_render_markdown, bench_rewrite);
criterion_main!(benches);
