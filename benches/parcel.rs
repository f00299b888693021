//! Run these benches with `cargo bench --bench parcel -- --verbose`

use criterion::{criterion_group, criterion_main, Criterion};
use sounding_thermo::{
    parcel::{dew_point_profile, surface_parcel, Parcel},
    parcel_profile::{lift_parcel, parcel_temperature_profile},
    Sounding,
};

mod utils;

fn build_tester() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(std::time::Duration::from_secs(10))
        .noise_threshold(0.03)
        .significance_level(0.01)
}

criterion_main!(parcel_benches);

criterion_group!(
    name = parcel_benches;
    config = build_tester();
    targets = dew_point_profile_bench, parcel_temperature_profile_bench, lift_parcel_bench
);

fn parcels(snds: &[Sounding]) -> Vec<Parcel> {
    snds.iter()
        .map(|snd| {
            let sfc = snd.surface_row().expect("oops");
            surface_parcel(snd, sfc.temperature, sfc.pressure).expect("oops")
        })
        .collect()
}

fn dew_point_profile_bench(c: &mut Criterion) {
    let snds = utils::load_all_test_soundings();

    c.bench_function("dew_point_profile", |b| {
        b.iter(|| {
            for snd in &snds {
                let _x = dew_point_profile(snd).expect("oops");
            }
        });
    });
}

// No bench for surface_parcel because it is so simple.

fn parcel_temperature_profile_bench(c: &mut Criterion) {
    let snds = utils::load_all_test_soundings();
    let pcls = parcels(&snds);

    c.bench_function("parcel_temperature_profile", |b| {
        b.iter(|| {
            for (snd, &pcl) in snds.iter().zip(&pcls) {
                let _x = parcel_temperature_profile(pcl, snd).expect("oops");
            }
        });
    });
}

fn lift_parcel_bench(c: &mut Criterion) {
    let snds = utils::load_all_test_soundings();
    let pcls = parcels(&snds);

    c.bench_function("lift_parcel", |b| {
        b.iter(|| {
            for (snd, &pcl) in snds.iter().zip(&pcls) {
                let _x = lift_parcel(pcl, snd).expect("oops");
            }
        });
    });
}
