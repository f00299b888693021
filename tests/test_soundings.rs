use metfor::{Celsius, HectoPascal, Quantity};
use sounding_thermo::{
    parcel::surface_parcel, parcel_profile::lift_parcel, render_comparative_profile,
    render_skew_t, render_vertical_profile, PlotText, RenderConfig, RenderError, Series,
    ThermoProfiles,
};

#[macro_use]
mod utils;

test_sounding!(tropical, utils::tropical);
test_sounding!(winter_inversion, utils::winter_inversion);
test_sounding!(tropical_top_down, utils::tropical_top_down);

#[test]
fn storage_order_does_not_matter() {
    let up = utils::tropical();
    let down = utils::tropical_top_down();

    let up_derived = ThermoProfiles::new(&up).unwrap();
    let mut down_derived = ThermoProfiles::new(&down).unwrap();
    down_derived.potential_temperature.reverse();
    down_derived.height.reverse();
    down_derived.dry_static_energy.reverse();
    assert_eq!(up_derived.potential_temperature, down_derived.potential_temperature);
    assert_eq!(up_derived.height, down_derived.height);
    assert_eq!(up_derived.dry_static_energy, down_derived.dry_static_energy);

    let lift = |snd: &sounding_thermo::Sounding| {
        let pcl = surface_parcel(snd, Celsius(27.0), HectoPascal(1000.0)).unwrap();
        lift_parcel(pcl, snd).unwrap()
    };
    let up_anal = lift(&up);
    let down_anal = lift(&down);

    assert_eq!(up_anal.profile(), down_anal.profile());
    assert_eq!(up_anal.cape(), down_anal.cape());
    assert_eq!(up_anal.cin(), down_anal.cin());
}

#[test]
fn tropical_sounding_is_unstable() {
    let snd = utils::tropical();
    let pcl = surface_parcel(&snd, Celsius(27.0), HectoPascal(1000.0)).unwrap();
    let anal = lift_parcel(pcl, &snd).unwrap();

    assert!(anal.lfc_pressure().is_some());
    assert!(anal.cape().unpack() > 1000.0);
}

#[test]
fn winter_sounding_is_stable() {
    let snd = utils::winter_inversion();
    let sfc = snd.surface_row().unwrap();
    let pcl = surface_parcel(&snd, sfc.temperature, sfc.pressure).unwrap();
    let anal = lift_parcel(pcl, &snd).unwrap();

    assert!(anal.lfc_pressure().is_none());
    assert_eq!(anal.cape().unpack(), 0.0);
    assert_eq!(anal.cin().unpack(), 0.0);
}

#[test]
fn comparative_legend_has_both_labels() {
    let (_dir, config) = utils::temp_config();
    let snd = utils::tropical();
    let derived = ThermoProfiles::new(&snd).unwrap();
    let theta = utils::unpacked(&derived.potential_temperature);
    let theta_e = utils::unpacked(&derived.equivalent_potential_temperature);

    let path = render_comparative_profile(
        &config,
        Series::new("Potential temperature", &theta),
        Series::new("Equivalent potential temperature", &theta_e),
        snd.pressure_profile(),
        PlotText::new("Theta", "K", "Pressure (hPa)"),
        "legend.svg",
    )
    .unwrap();

    let svg = std::fs::read_to_string(path).unwrap();
    assert_eq!(svg.matches("Potential temperature").count(), 1);
    assert_eq!(svg.matches("Equivalent potential temperature").count(), 1);
}

#[test]
fn unsupported_formats_are_rejected() {
    let (dir, config) = utils::temp_config();
    let snd = utils::tropical();
    let temps = utils::unpacked(snd.temperature_profile());

    for name in &["profile.pdf", "profile.eps", "profile"] {
        match render_vertical_profile(
            &config,
            &temps,
            snd.pressure_profile(),
            PlotText::default(),
            name,
        ) {
            Err(RenderError::UnsupportedFormat(path)) => assert!(path.ends_with(name)),
            other => panic!("expected an unsupported format error, got {:?}", other),
        }
    }

    // Nothing was written, not even the output directory.
    assert!(!config.output_dir().exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn output_dir_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("plots");
    let config_path = dir.path().join("render.toml");
    std::fs::write(
        &config_path,
        format!("output_dir = {:?}\n", out.to_string_lossy()),
    )
    .unwrap();

    let config = RenderConfig::load(&config_path).unwrap();
    let snd = utils::tropical();
    let sfc = snd.surface_row().unwrap();
    let path = render_skew_t(&config, &snd, sfc.temperature, sfc.pressure, "Skew-T", "skewt.png")
        .unwrap();

    assert_eq!(path, out.join("skewt.png"));
    utils::assert_non_empty_file(&path);
}

#[test]
fn missing_output_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::new(dir.path().join("missing")).with_create_dir(false);
    let snd = utils::tropical();
    let temps = utils::unpacked(snd.temperature_profile());

    assert!(render_vertical_profile(
        &config,
        &temps,
        snd.pressure_profile(),
        PlotText::default(),
        "temperature.svg",
    )
    .is_err());
}
