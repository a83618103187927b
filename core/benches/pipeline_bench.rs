use core::{Document, TranslatorConfig};
use criterion::{Criterion, criterion_group, criterion_main};

/// Builds a representative document touching every pass: headers, a nested
/// list, a block quote, a code block, a reference-style link and a run of
/// emphasis, repeated to give the pipeline something to chew on.
fn representative_document(repeats: usize) -> String {
    let unit = "\
# Heading one

Some **bold** and _italic_ text with a [reference link][ref] and an
inline [link](http://example.com \"title\").

* item one
* item two
  * nested item
* item three

> a quoted paragraph
> that spans two lines

    a code block
    with two lines

[ref]: http://example.com/ref \"Reference title\"

";
    unit.repeat(repeats)
}

fn bench_small_document(c: &mut Criterion) {
    let content = representative_document(1);
    c.bench_function("pipeline_small_document", |b| {
        b.iter(|| {
            let mut doc = Document::new(TranslatorConfig::default());
            doc.read_str(std::hint::black_box(&content));
            std::hint::black_box(doc.to_html());
        });
    });
}

fn bench_large_document(c: &mut Criterion) {
    let content = representative_document(200);
    let mut group = c.benchmark_group("pipeline_large_document");
    group.sample_size(10);
    group.bench_function("200_repeats", |b| {
        b.iter(|| {
            let mut doc = Document::new(TranslatorConfig::default());
            doc.read_str(std::hint::black_box(&content));
            std::hint::black_box(doc.to_html());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_small_document, bench_large_document);
criterion_main!(benches);
