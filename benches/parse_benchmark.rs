//! Benchmarks for wikiutil parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic wiki pages of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wikiutil::model::DocumentBuilder;
use wikiutil::render::{to_html, to_latex, HtmlRenderer, RenderOptions};
use wikiutil::wem::{CompositeWem, EventRecorder};
use wikiutil::WikiParser;

/// Creates a synthetic page with the given number of top-level sections.
fn create_test_page(sections: usize) -> String {
    let mut page = String::from(
        "#summary Benchmark page\n#labels Bench, Synthetic\n\n<wiki:toc max_depth=\"2\"/>\n\n",
    );

    for i in 0..sections {
        page.push_str(&format!("= Section {} =\n", i + 1));
        page.push_str(
            "Some *bold* and _italic_ text with a WikiWord, `code` and \
             [http://example.org/page a link].\nA second line of the same paragraph.\n\n",
        );
        page.push_str(&format!("== Details {} ==\n", i + 1));
        page.push_str("  * first entry\n    # nested one\n    # nested two\n  * second entry\n\n");
        page.push_str("||*Name*||*Value*||\n||alpha||1||\n||beta||2||\n\n");
        page.push_str("{{{\nfn main() {\n    println!(\"hello\");\n}\n}}}\n----\n");
    }

    page
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [10, 100, 1000] {
        let page = create_test_page(sections);
        group.throughput(Throughput::Bytes(page.len() as u64));
        group.bench_with_input(BenchmarkId::new("tree", sections), &page, |b, page| {
            b.iter(|| WikiParser::from_text(black_box(page.as_str())).parse())
        });
        group.bench_with_input(BenchmarkId::new("events", sections), &page, |b, page| {
            b.iter(|| {
                let mut recorder = EventRecorder::new();
                WikiParser::from_text(black_box(page.as_str())).parse_into(&mut recorder)
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let page = create_test_page(100);
    let doc = WikiParser::from_text(page.as_str()).parse().unwrap();
    let options = RenderOptions::default();

    c.bench_function("render_html", |b| b.iter(|| to_html(black_box(&doc), &options)));
    c.bench_function("render_latex", |b| b.iter(|| to_latex(black_box(&doc), &options)));

    c.bench_function("stream_html_and_tree", |b| {
        b.iter(|| {
            let mut builder = DocumentBuilder::new();
            let mut html = HtmlRenderer::new(options.clone());
            {
                let mut both = CompositeWem::new().with(&mut builder).with(&mut html);
                WikiParser::from_text(black_box(page.as_str()))
                    .parse_into(&mut both)
                    .unwrap();
            }
            (builder.finish(), html.into_html())
        })
    });
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
