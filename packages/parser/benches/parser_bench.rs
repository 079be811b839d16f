use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinpane_parser::{parse_document, sanitize, SanitizationPolicy};

fn sample_document(sections: usize) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html lang=\"en\"><head><title>Bench</title><style>body { margin: 0; }</style></head><body>",
    );
    for i in 0..sections {
        html.push_str(&format!(
            r#"<section id="s{i}" class="card" data-index="{i}">
                <h2 onclick="track({i})">Section {i}</h2>
                <p style="color: #333">Paragraph with <mark>unknown</mark> markup.</p>
                <script>console.log({i})</script>
            </section>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn parse_small_document(c: &mut Criterion) {
    let source = sample_document(5);

    c.bench_function("parse_small_document", |b| {
        b.iter(|| parse_document(black_box(&source)))
    });
}

fn parse_large_document(c: &mut Criterion) {
    let source = sample_document(500);

    c.bench_function("parse_large_document", |b| {
        b.iter(|| parse_document(black_box(&source)))
    });
}

fn sanitize_large_document(c: &mut Criterion) {
    let source = sample_document(500);
    let policy = SanitizationPolicy::default();

    c.bench_function("sanitize_large_document", |b| {
        b.iter(|| sanitize(black_box(&source), &policy))
    });
}

criterion_group!(
    benches,
    parse_small_document,
    parse_large_document,
    sanitize_large_document
);
criterion_main!(benches);
