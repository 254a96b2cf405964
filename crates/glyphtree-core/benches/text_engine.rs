use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use glyphtree_core::buffer::BufferDisplay;
use glyphtree_core::markup;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Screen;
use glyphtree_core::wrapping;
use glyphtree_core::wrapping::WrapMode;

fn sample_text(paragraphs: usize) -> String {
    let mut s = String::new();
    for i in 0..paragraphs {
        s.push_str("This is a long paragraph to stress wrapping. ");
        for _ in 0..12 {
            s.push_str("The quick brown fox jumps over the lazy dog, well-known and oft-quoted. ");
        }
        s.push_str(&format!("Paragraph {i} ends here.\n\n"));
    }
    s
}

fn sample_markup(spans: usize) -> String {
    let mut s = String::new();
    for i in 0..spans {
        s.push_str("plain &amp; simple ");
        s.push_str("<red>red <green,black>green on black</green,black></red> ");
        s.push_str(&format!("<invert>item {i}</invert> <underline>u</underline>\n"));
    }
    s
}

fn bench_break_offsets(c: &mut Criterion) {
    let text = sample_text(20);
    c.bench_function("wrapping/break_offsets/80", |b| {
        b.iter(|| {
            let offsets = wrapping::break_offsets(black_box(&text), black_box(80));
            black_box(offsets.len());
        })
    });
    c.bench_function("wrapping/break_offsets/17", |b| {
        b.iter(|| {
            let offsets = wrapping::break_offsets(black_box(&text), black_box(17));
            black_box(offsets.len());
        })
    });
}

fn bench_markup(c: &mut Criterion) {
    let text = sample_markup(200);
    c.bench_function("markup/formatted_string_length", |b| {
        b.iter(|| black_box(markup::formatted_string_length(black_box(&text))))
    });
    c.bench_function("markup/parse", |b| {
        b.iter(|| black_box(markup::parse(black_box(&text), Default::default()).len()))
    });
}

fn bench_draw(c: &mut Criterion) {
    let text = sample_markup(40);
    let opts = DrawOptions::default().with_wrap(WrapMode::Word);
    c.bench_function("surface/draw_formatted_string/80x50", |b| {
        let mut screen = Screen::new(BufferDisplay::new(50, 80));
        b.iter(|| {
            let rows = screen
                .surface()
                .draw_formatted_string(0, 0, black_box(&text), &opts);
            black_box(rows);
        })
    });
}

criterion_group!(benches, bench_break_offsets, bench_markup, bench_draw);
criterion_main!(benches);
