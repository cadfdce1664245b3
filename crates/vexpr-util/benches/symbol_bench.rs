use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vexpr_util::Symbol;

fn bench_intern_repeat(c: &mut Criterion) {
    c.bench_function("symbol_intern_repeat", |b| {
        b.iter(|| black_box(Symbol::intern("param")))
    });
}

fn bench_intern_unique(c: &mut Criterion) {
    let mut i = 0u32;
    c.bench_function("symbol_intern_unique", |b| {
        b.iter(|| {
            i += 1;
            black_box(Symbol::intern(&format!("ident_{i}")))
        })
    });
}

criterion_group!(benches, bench_intern_repeat, bench_intern_unique);
criterion_main!(benches);
