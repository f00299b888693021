use super::{assert_non_empty_file, hourly_times, init_logging, temp_config, unpacked};
use metfor::Quantity;
use sounding_thermo::{
    render_comparative_profile, render_comparative_vs_temperature, render_skew_t,
    render_time_pressure_contour, render_time_series, render_vertical_profile, PlotText,
    RenderConfig, Series, Sounding, ThermoProfiles,
};
use std::path::PathBuf;

/// Draw every kind of plot from a sounding and return the paths of the files.
fn render_all(config: &RenderConfig, snd: &Sounding, derived: &ThermoProfiles) -> Vec<PathBuf> {
    let pressure = snd.pressure_profile();
    let theta = unpacked(&derived.potential_temperature);
    let theta_v = unpacked(&derived.virtual_potential_temperature);
    let dse: Vec<f64> = derived.dry_static_energy.iter().map(|e| e.unpack() / 1000.0).collect();
    let mse: Vec<f64> = derived
        .saturated_moist_static_energy
        .iter()
        .map(|e| e.unpack() / 1000.0)
        .collect();

    // A field that changes a little with time.
    let times = hourly_times(6);
    let field: Vec<Vec<f64>> = (0..times.len())
        .map(|i| theta.iter().map(|th| th + i as f64 * 0.5).collect())
        .collect();
    let series: Vec<f64> = (0..times.len()).map(|i| (i as f64).sin()).collect();

    let sfc = snd.surface_row().unwrap();

    vec![
        render_time_pressure_contour(
            config,
            &times,
            pressure,
            &field,
            PlotText::new("Potential temperature", "Time", "Pressure (hPa)"),
            "θ (K)",
            "theta_contour.png",
        )
        .unwrap(),
        render_time_series(
            config,
            &times,
            &series,
            PlotText::new("Precipitation", "Time", "mm/h"),
            "precipitation.svg",
        )
        .unwrap(),
        render_vertical_profile(
            config,
            &theta,
            pressure,
            PlotText::new("Potential temperature", "θ (K)", "Pressure (hPa)"),
            "theta.svg",
        )
        .unwrap(),
        render_comparative_profile(
            config,
            Series::new("θ", &theta),
            Series::new("θv", &theta_v),
            pressure,
            PlotText::new("Potential temperatures", "K", "Pressure (hPa)"),
            "theta_compare.png",
        )
        .unwrap(),
        render_comparative_vs_temperature(
            config,
            Series::new("Dry static energy", &dse),
            Series::new("Saturated moist static energy", &mse),
            snd.temperature_profile(),
            PlotText::new("Static energy", "T (C)", "kJ/kg"),
            "static_energy.svg",
        )
        .unwrap(),
        render_skew_t(
            config,
            snd,
            sfc.temperature,
            sfc.pressure,
            "Skew-T",
            "skewt.svg",
        )
        .unwrap(),
    ]
}

pub fn check_render_all(snd: &Sounding) {
    init_logging();
    let (_dir, config) = temp_config();
    let derived = ThermoProfiles::new(snd).unwrap();

    let paths = render_all(&config, snd, &derived);

    assert_eq!(paths.len(), 6);
    for path in &paths {
        assert!(path.starts_with(config.output_dir()));
        assert_non_empty_file(path);
    }
}

pub fn check_inputs_unchanged(snd: &Sounding) {
    let (_dir, config) = temp_config();
    let derived = ThermoProfiles::new(snd).unwrap();

    let before_snd = snd.clone();
    let before_derived = derived.clone();

    render_all(&config, snd, &derived);

    assert_eq!(snd.pressure_profile(), before_snd.pressure_profile());
    assert_eq!(snd.temperature_profile(), before_snd.temperature_profile());
    assert_eq!(
        snd.specific_humidity_profile(),
        before_snd.specific_humidity_profile()
    );
    assert_eq!(derived, before_derived);
}
