use metfor::Quantity;
use sounding_thermo::{
    parcel::surface_parcel,
    parcel_profile::{lift_parcel, EnergyKind},
    Sounding,
};

pub fn check_parcel_analysis(snd: &Sounding) {
    let sfc = snd.surface_row().unwrap();
    let parcel = surface_parcel(snd, sfc.temperature, sfc.pressure).unwrap();
    let anal = lift_parcel(parcel, snd).unwrap();
    let profile = anal.profile();

    // The profile starts at the parcel and goes up.
    assert_eq!(profile.pressure[0], parcel.pressure);
    assert_eq!(profile.parcel_t[0], profile.environment_t[0]);
    for pair in profile.pressure.windows(2) {
        assert!(pair[0] > pair[1], "{:?}", profile.pressure);
    }
    assert_eq!(profile.pressure.len(), profile.parcel_t.len());
    assert_eq!(profile.pressure.len(), profile.environment_t.len());

    assert!(anal.lcl_pressure() <= parcel.pressure);
    assert!(anal.lcl_temperature() <= parcel.temperature);
    assert!(anal.cape().unpack() >= 0.0);
    assert!(anal.cin().unpack() <= 0.0);

    match anal.lfc_pressure().into_option() {
        None => {
            assert_eq!(anal.cape().unpack(), 0.0);
            assert_eq!(anal.cin().unpack(), 0.0);
            assert!(anal.el_pressure().is_none());
            assert!(anal.energy_layers().is_empty());
        }
        Some(lfc) => {
            assert!(lfc <= anal.lcl_pressure());
            if let Some(el) = anal.el_pressure().into_option() {
                assert!(el < lfc);
            }
        }
    }

    let mut cape = 0.0;
    let mut cin = 0.0;
    for layer in anal.energy_layers() {
        let energy = layer.energy().unpack();
        match layer.kind {
            EnergyKind::Cape => {
                assert!(energy >= 0.0);
                cape += energy;
            }
            EnergyKind::Cin => {
                assert!(energy <= 0.0);
                cin += energy;
            }
        }
    }
    assert!((cape - anal.cape().unpack()).abs() < 1.0e-6);
    assert!((cin - anal.cin().unpack()).abs() < 1.0e-6);
}
