use metfor::{Celsius, HectoPascal};
use sounding_thermo::Sounding;

pub fn load_all_test_soundings() -> [Sounding; 3] {
    [tropical(), winter_inversion(), high_resolution()]
}

fn make_sounding(p: Vec<f64>, t: Vec<f64>, q: Vec<f64>) -> Sounding {
    Sounding::new()
        .with_pressure_profile(p.into_iter().map(HectoPascal).collect::<Vec<_>>())
        .with_temperature_profile(t.into_iter().map(Celsius).collect::<Vec<_>>())
        .with_specific_humidity_g_per_kg(q)
}

fn tropical() -> Sounding {
    make_sounding(
        vec![1000.0, 950.0, 900.0, 850.0, 800.0, 700.0, 600.0, 500.0, 400.0, 300.0, 250.0, 200.0],
        vec![26.0, 22.5, 19.6, 17.0, 14.2, 8.6, 1.8, -6.2, -16.4, -31.6, -41.0, -50.0],
        vec![18.5, 16.4, 14.5, 12.6, 10.5, 7.2, 4.6, 2.4, 1.0, 0.3, 0.12, 0.04],
    )
}

fn winter_inversion() -> Sounding {
    make_sounding(
        vec![1000.0, 975.0, 950.0, 925.0, 900.0, 850.0, 800.0, 700.0, 600.0, 500.0, 400.0, 300.0],
        vec![-12.0, -8.5, -6.0, -6.5, -8.0, -11.0, -14.5, -21.0, -28.5, -37.0, -47.0, -55.0],
        vec![1.2, 1.5, 1.6, 1.4, 1.2, 0.9, 0.7, 0.45, 0.25, 0.12, 0.05, 0.02],
    )
}

// A model-like sounding with 10 hPa spacing.
fn high_resolution() -> Sounding {
    let p: Vec<f64> = (0..=80).map(|i| 1000.0 - 10.0 * f64::from(i)).collect();
    let t: Vec<f64> = p
        .iter()
        .map(|p| 28.0 - 81.0 * (1000.0 / p).ln() / 5.0_f64.ln())
        .collect();
    let q: Vec<f64> = p.iter().map(|p| 19.0 * (p / 1000.0).powi(4)).collect();

    make_sounding(p, t, q)
}
