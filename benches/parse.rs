use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use linemark::scanner::{reference, CountingSink, Parser};
use linemark::source::SourceBuffer;

// Deterministic indented prose stand-in: cycling words, indentation walking
// up and down a few levels every few lines.
fn synthetic_document(target_size: usize) -> Vec<u8> {
    const WORDS: &[&[u8]] = &[
        b"chunk", b"carry", b"newline", b"bitmap", b"scanner", b"stride", b"window", b"offset",
    ];
    let mut doc = Vec::with_capacity(target_size + 128);
    let mut line = 0usize;
    while doc.len() < target_size {
        let indent = [0usize, 1, 2, 3, 2, 1][line / 4 % 6];
        doc.extend(std::iter::repeat(b' ').take(indent * 4));
        for w in 0..6 {
            if w > 0 {
                doc.push(b' ');
            }
            doc.extend_from_slice(WORDS[(line + w) % WORDS.len()]);
        }
        doc.push(b'\n');
        line += 1;
    }
    doc
}

fn bench_parse(c: &mut Criterion) {
    let doc = synthetic_document(1024 * 1024);
    let buf = SourceBuffer::new_from_bytes(&doc);

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(doc.len() as u64));

    group.bench_function("chunked", |b| {
        let mut parser = Parser::new(CountingSink::default());
        b.iter(|| {
            parser.reset();
            parser.parse(&buf);
            black_box(parser.counts().eol)
        })
    });

    group.bench_function("reference", |b| {
        let mut sink = CountingSink::default();
        b.iter(|| {
            sink.reset();
            reference::parse(&doc, &mut sink);
            black_box(sink.counts().eol)
        })
    });

    group.bench_function("newline_scan", |b| {
        b.iter(|| black_box(memchr::memchr_iter(b'\n', &doc).count()))
    });

    group.bench_function("byte_sum", |b| {
        b.iter(|| black_box(doc.iter().map(|&byte| byte as u64).sum::<u64>()))
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
