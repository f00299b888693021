use chrono::{Duration, NaiveDate, NaiveDateTime};
use metfor::{Celsius, HectoPascal};
use sounding_thermo::{RenderConfig, Sounding};
use tempfile::TempDir;

pub mod parcel_tests;
pub mod profile_tests;
pub mod render_tests;

/// Generate a test module for a named sounding that runs every check against it.
#[allow(unused_macros)] // False alarm
macro_rules! test_sounding {
    ($test_name:ident, $make:expr) => {
        mod $test_name {
            use super::utils;

            #[test]
            fn profiles_aligned() {
                utils::profile_tests::check_profiles_aligned(&$make());
            }

            #[test]
            fn profiles_physical() {
                utils::profile_tests::check_profiles_physical(&$make());
            }

            #[test]
            fn parcel_analysis() {
                utils::parcel_tests::check_parcel_analysis(&$make());
            }

            #[test]
            fn render_all() {
                utils::render_tests::check_render_all(&$make());
            }

            #[test]
            fn inputs_unchanged() {
                utils::render_tests::check_inputs_unchanged(&$make());
            }
        }
    };
}

/// Build a sounding stored from the surface up.
pub fn make_sounding(desc: &str, p: &[f64], t: &[f64], q_g_per_kg: &[f64]) -> Sounding {
    Sounding::new()
        .with_source_description(desc.to_owned())
        .with_valid_time(start_time())
        .with_pressure_profile(p.iter().copied().map(HectoPascal).collect::<Vec<_>>())
        .with_temperature_profile(t.iter().copied().map(Celsius).collect::<Vec<_>>())
        .with_specific_humidity_g_per_kg(q_g_per_kg.to_vec())
}

/// A moist tropical sounding with a large amount of CAPE.
pub fn tropical() -> Sounding {
    make_sounding(
        "tropical",
        &[1000.0, 950.0, 900.0, 850.0, 800.0, 700.0, 600.0, 500.0, 400.0, 300.0, 250.0, 200.0],
        &[26.0, 22.5, 19.6, 17.0, 14.2, 8.6, 1.8, -6.2, -16.4, -31.6, -41.0, -50.0],
        &[18.5, 16.4, 14.5, 12.6, 10.5, 7.2, 4.6, 2.4, 1.0, 0.3, 0.12, 0.04],
    )
}

/// A cold, dry winter sounding with a surface based inversion.
pub fn winter_inversion() -> Sounding {
    make_sounding(
        "winter inversion",
        &[1000.0, 975.0, 950.0, 925.0, 900.0, 850.0, 800.0, 700.0, 600.0, 500.0, 400.0, 300.0],
        &[-12.0, -8.5, -6.0, -6.5, -8.0, -11.0, -14.5, -21.0, -28.5, -37.0, -47.0, -55.0],
        &[1.2, 1.5, 1.6, 1.4, 1.2, 0.9, 0.7, 0.45, 0.25, 0.12, 0.05, 0.02],
    )
}

/// The tropical sounding stored from the top down.
pub fn tropical_top_down() -> Sounding {
    let snd = tropical();
    let mut p = snd.pressure_profile().to_vec();
    let mut t = snd.temperature_profile().to_vec();
    let mut q = snd.specific_humidity_profile().to_vec();
    p.reverse();
    t.reverse();
    q.reverse();

    Sounding::new()
        .with_source_description("tropical, top down".to_owned())
        .with_pressure_profile(p)
        .with_temperature_profile(t)
        .with_specific_humidity_profile(q)
}

/// The first time of the synthetic time series.
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2014, 2, 14)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

/// Hourly times starting at `start_time`.
pub fn hourly_times(num: usize) -> Vec<NaiveDateTime> {
    (0..num as i64)
        .map(|i| start_time() + Duration::hours(i))
        .collect()
}

/// A render configuration writing into a fresh temporary directory. Keep the `TempDir` alive
/// until the test is done with the files.
pub fn temp_config() -> (TempDir, RenderConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::new(dir.path().join("plots"));
    (dir, config)
}

/// Values of a typed profile as plain numbers.
pub fn unpacked<Q: metfor::Quantity>(vals: &[Q]) -> Vec<f64> {
    vals.iter().map(|v| v.unpack()).collect()
}

/// Send the crate's log output to the test harness, `RUST_LOG=debug` shows the renderers at
/// work.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Check `path` exists and has something in it.
pub fn assert_non_empty_file(path: &std::path::Path) {
    let meta = std::fs::metadata(path).unwrap_or_else(|_| panic!("missing {:?}", path));
    assert!(meta.len() > 0, "empty {:?}", path);
}
