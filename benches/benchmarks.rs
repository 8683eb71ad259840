criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        hashing_a_single_candidate,
        scanning_a_bounded_strict_box,
        scanning_a_bounded_scored_box,
        partitioning_a_wide_box,
}

use foliage_solver::cancel::CancelToken;
use foliage_solver::constraint::PlantKind;
use foliage_solver::hash::{packed12, HashVersion};
use foliage_solver::partition::Partitioner;
use foliage_solver::sample::{BlockPos, Placement, SampleSet};
use foliage_solver::scan::{scan, ScanMode, SearchBox};

fn hashing_a_single_candidate(c: &mut criterion::Criterion) {
    c.bench_function("packed12 for one candidate", |b| {
        b.iter(|| packed12(100, 64, 200, HashVersion::Modern))
    });
}

fn two_sample_set() -> SampleSet {
    let origin = (100, 64, 200);
    let second = (103, 64, 205);
    let packed = packed12(second.0, second.1, second.2, HashVersion::Modern);
    let placements = [
        Placement::new(BlockPos::new(origin.0, origin.1, origin.2), PlantKind::ShortGrass, 7, 15, 7),
        Placement::new(
            BlockPos::new(second.0, second.1, second.2),
            PlantKind::ShortGrass,
            (packed & 0xF) as u8,
            ((packed >> 4) & 0xF) as u8,
            ((packed >> 8) & 0xF) as u8,
        ),
    ];
    SampleSet::build(&placements).unwrap()
}

fn bounded_box() -> SearchBox {
    SearchBox { x_lo: -64, x_hi: 63, y_lo: 64, y_hi: 64, z_lo: -64, z_hi: 63, version: HashVersion::Modern }
}

fn scanning_a_bounded_strict_box(c: &mut criterion::Criterion) {
    let set = two_sample_set();
    let box_ = bounded_box();
    let cancel = CancelToken::new();
    c.bench_function("scan a 128x128 box, strict mode", |b| {
        b.iter(|| scan(&box_, &set, ScanMode::Strict, 2000, &cancel, |_| {}))
    });
}

fn scanning_a_bounded_scored_box(c: &mut criterion::Criterion) {
    let set = two_sample_set();
    let box_ = bounded_box();
    let cancel = CancelToken::new();
    let mode = ScanMode::Scored { tol: 1, max_score: 4 };
    c.bench_function("scan a 128x128 box, scored mode", |b| {
        b.iter(|| scan(&box_, &set, mode, 2000, &cancel, |_| {}))
    });
}

fn partitioning_a_wide_box(c: &mut criterion::Criterion) {
    let box_ = SearchBox { x_lo: -50_000, x_hi: 50_000, y_lo: 64, y_hi: 64, z_lo: -50_000, z_hi: 50_000, version: HashVersion::Modern };
    c.bench_function("partition a 100_000-wide box into 16 stripes", |b| {
        b.iter(|| Partitioner::stripes(&box_, 16))
    });
}
