use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;
use tmx_corpus::{parse_tmx_str, LogReporter};

fn synthetic_tmx(units: usize) -> String {
    let mut xml = String::from("<tmx version=\"1.4\"><body>");
    for i in 0..units {
        xml.push_str(&format!(
            "<tu><tuv xml:lang=\"de\"><seg>Satz Nummer {i}</seg></tuv><tuv xml:lang=\"en\"><seg>Sentence number {i}</seg></tuv></tu>"
        ));
    }
    xml.push_str("</body></tmx>");
    xml
}

fn bench_parse(c: &mut Criterion) {
    let xml = synthetic_tmx(1_000);
    c.bench_function("parse_1k_units", |b| {
        b.iter(|| parse_tmx_str(&xml, Path::new("bench.tmx"), &LogReporter).unwrap())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
