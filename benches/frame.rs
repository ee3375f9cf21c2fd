use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use boxframe::{Accent, Frame, FrameCache, FrameSpec, Logger, NullSink, truncate};

fn coloured_line(cells: usize) -> String {
    (0..cells)
        .map(|i| format!("\x1b[38;5;{}m█\x1b[0m", 16 + i % 200))
        .collect()
}

fn panel_content(rows: usize) -> String {
    (0..rows)
        .map(|row| format!("row {row:>3} {}", coloured_line(90)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_coloured(c: &mut Criterion) {
    let line = coloured_line(200);
    c.bench_function("truncate_coloured_200", |b| {
        b.iter(|| truncate(black_box(&line), black_box(66)));
    });
}

fn truncate_wide_glyphs(c: &mut Criterion) {
    let line = "日本語のテキスト".repeat(20);
    c.bench_function("truncate_wide_glyphs", |b| {
        b.iter(|| truncate(black_box(&line), black_box(41)));
    });
}

fn render_panel(c: &mut Criterion) {
    let content = panel_content(20);
    let frame = Frame::new(
        FrameSpec::new(70)
            .with_label("METRICS")
            .with_color(Accent::parse("#2196F3").expect("accent")),
    )
    .with_logger(Logger::new(NullSink));
    c.bench_function("render_panel_20_rows", |b| {
        b.iter(|| frame.render(black_box(&content)));
    });
}

fn render_cached_panel(c: &mut Criterion) {
    let content = panel_content(20);
    let frame = Frame::new(FrameSpec::new(70).with_label("METRICS"));
    let mut cache = FrameCache::new();
    c.bench_function("render_cached_panel_20_rows", |b| {
        b.iter(|| cache.render("metrics", &frame, black_box(&content)).text.len());
    });
}

criterion_group!(
    frame_benches,
    truncate_coloured,
    truncate_wide_glyphs,
    render_panel,
    render_cached_panel
);
criterion_main!(frame_benches);
