use super::unpacked;
use metfor::Quantity;
use sounding_thermo::{Sounding, ThermoProfiles};

pub fn check_profiles_aligned(snd: &Sounding) {
    let num = snd.num_levels().unwrap();
    let derived = ThermoProfiles::new(snd).unwrap();

    let lens = [
        derived.potential_temperature.len(),
        derived.vapor_pressure.len(),
        derived.virtual_potential_temperature.len(),
        derived.saturation_vapor_pressure.len(),
        derived.saturation_specific_humidity.len(),
        derived.relative_humidity.len(),
        derived.air_density.len(),
        derived.equivalent_potential_temperature.len(),
        derived.height.len(),
        derived.dry_static_energy.len(),
        derived.saturated_moist_static_energy.len(),
    ];

    for len in lens.iter() {
        assert_eq!(*len, num);
    }
}

pub fn check_profiles_physical(snd: &Sounding) {
    let derived = ThermoProfiles::new(snd).unwrap();
    let pressure = unpacked(snd.pressure_profile());
    let temperature: Vec<f64> = snd.temperature_profile().iter().map(|t| t.0 + 273.15).collect();

    for (i, &p) in pressure.iter().enumerate() {
        let theta = derived.potential_temperature[i].unpack();
        let theta_v = derived.virtual_potential_temperature[i].unpack();
        let theta_e = derived.equivalent_potential_temperature[i].unpack();
        let rh = derived.relative_humidity[i];

        // Everything in these soundings is at or above 1000 hPa
        assert!(theta >= temperature[i] - 1.0e-9, "theta below t at {}", p);
        assert!(theta_v >= theta, "theta_v below theta at {}", p);
        assert!(theta_e >= theta, "theta_e below theta at {}", p);
        assert!(rh > 0.0 && rh <= 1.0, "rh = {} at {}", rh, p);
        assert!(derived.air_density[i] > 0.0);
        assert!(derived.vapor_pressure[i] < derived.saturation_vapor_pressure[i]);
        assert!(derived.dry_static_energy[i].unpack() > 0.0);
    }

    // Height increases as pressure decreases, whatever order the levels are stored in.
    let heights = unpacked(&derived.height);
    for i in 0..pressure.len() {
        for j in 0..pressure.len() {
            if pressure[i] > pressure[j] {
                assert!(heights[i] < heights[j]);
            }
        }
    }
}
