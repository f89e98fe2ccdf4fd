use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rhs_inspect::{render, MemValue, PayloadMode, RenderOptions};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Fixture with `buckets` slots, roughly half occupied.
fn set_fixture(buckets: u64) -> MemValue {
    let mask = buckets - 1;
    let descs: Vec<MemValue> = lcg(1)
        .take(buckets as usize)
        .enumerate()
        .map(|(i, r)| {
            let entry = if r % 2 == 0 {
                MemValue::ptr(0x5555_0000_0000 | r >> 16)
            } else {
                MemValue::null()
            };
            MemValue::record([
                ("probes", MemValue::uint(r % 8)),
                ("wanted", MemValue::uint(i as u64 & mask)),
                ("probe_bound", MemValue::int((r % 16) as i64)),
                ("in_rh", MemValue::boolean(r % 4 == 0)),
                ("entry", entry),
            ])
        })
        .collect();
    MemValue::record([(
        "map",
        MemValue::record([
            ("mask", MemValue::uint(mask)),
            ("step", MemValue::uint(1)),
            ("probe_limit", MemValue::uint(16)),
            ("n_entries", MemValue::uint(buckets / 2)),
            ("capacity", MemValue::uint(buckets)),
            ("size", MemValue::uint(buckets / 2)),
            ("max_entries", MemValue::uint(buckets / 2)),
            ("offset_mask", MemValue::uint(mask)),
            ("entries", MemValue::record([("descs", MemValue::array(descs))])),
        ]),
    )])
}

fn bench_render_4k(c: &mut Criterion) {
    let set = set_fixture(4096);
    c.bench_function("render_4k_buckets_address", |b| {
        b.iter(|| black_box(render(&set, RenderOptions::default()).unwrap()))
    });
}

fn bench_render_64k(c: &mut Criterion) {
    let set = set_fixture(65536);
    c.bench_function("render_64k_buckets_address", |b| {
        b.iter(|| black_box(render(&set, RenderOptions::default()).unwrap()))
    });
}

fn bench_render_auto_mode(c: &mut Criterion) {
    let set = set_fixture(4096);
    let opts = RenderOptions::with_payload(PayloadMode::Auto);
    c.bench_function("render_4k_buckets_auto", |b| {
        b.iter(|| black_box(render(&set, opts).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_render_4k,
    bench_render_64k,
    bench_render_auto_mode
);
criterion_main!(benches);
