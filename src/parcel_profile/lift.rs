use super::{energy_layers, EnergyKind, ParcelAscentAnalysis, ParcelProfile};
use crate::{
    error::{AnalysisError, Result},
    interpolation::{linear_interp, log_p_interp},
    parcel::Parcel,
    sounding::Sounding,
};
use itertools::Itertools;
use metfor::{self, Celsius, CelsiusDiff, HectoPascal, JpKg, Quantity};
use optional::{none, some, Optioned};
use std::cmp::Ordering;
use tracing::{debug, warn};

pub(crate) fn lift_parcel(parcel: Parcel, snd: &Sounding) -> Result<ParcelAscentAnalysis> {
    snd.num_levels()?;

    // Find the LCL
    let (lcl_pressure, lcl_temperature) = parcel.lcl()?;

    // How to calculate a parcel temperature for a given pressure level
    let parcel_calc_t = create_parcel_calc_t(parcel)?;

    // Start at the parcel level, where the parcel is the environment.
    let p0 = parcel.pressure;
    let start = AnalLevel {
        pressure: p0,
        pcl_t: parcel.temperature,
        env_t: parcel.temperature,
    };

    let levels: Vec<AnalLevel> = std::iter::once(start)
        .chain(
            snd.bottom_up()
                // Remove rows at or below the parcel level
                .filter(|row| row.pressure < p0)
                // Remove rows with unusable data
                .filter(|row| row.temperature.0.is_finite())
                // Calculate the parcel temperature, skip this level if there is an error
                .filter_map(|row| {
                    parcel_calc_t(row.pressure).map(|pcl_t| AnalLevel {
                        pressure: row.pressure,
                        pcl_t,
                        env_t: row.temperature,
                    })
                }),
        )
        .collect();

    let skipped = snd.bottom_up().filter(|row| row.pressure < p0).count() + 1 - levels.len();
    if skipped > 0 {
        warn!(skipped, "levels without a parcel temperature left out of the parcel profile");
    }

    if levels.len() < 2 {
        return Err(AnalysisError::NotEnoughData);
    }

    let last = *levels.last().ok_or(AnalysisError::NotEnoughData)?;
    let level_type_mapping = create_level_type_mapping(lcl_pressure, lcl_temperature);

    let mut pressure: Vec<HectoPascal> = Vec::with_capacity(levels.len() + 5);
    let mut parcel_t: Vec<Celsius> = Vec::with_capacity(levels.len() + 5);
    let mut environment_t: Vec<Celsius> = Vec::with_capacity(levels.len() + 5);

    levels
        .into_iter()
        // Look at them two levels at a time to check for crossing any special levels
        .tuple_windows::<(_, _)>()
        .flat_map(|(lvl0, lvl1)| level_type_mapping(lvl0, lvl1))
        .chain(std::iter::once(last))
        .for_each(|lvl| {
            pressure.push(lvl.pressure);
            parcel_t.push(lvl.pcl_t);
            environment_t.push(lvl.env_t);
        });

    let profile = ParcelProfile {
        pressure,
        parcel_t,
        environment_t,
    };

    let (lfc_pressure, el_pressure) = find_lfc_el(&profile, lcl_pressure);
    let energy_layers = energy_layers(&profile, lfc_pressure, el_pressure);

    let (cape, cin) = energy_layers
        .iter()
        .fold((0.0, 0.0), |(cape, cin), layer| match layer.kind {
            EnergyKind::Cape => (cape + layer.energy().unpack(), cin),
            EnergyKind::Cin => (cape, cin + layer.energy().unpack()),
        });
    let (cape, cin) = (JpKg(cape), JpKg(cin));

    debug!(
        lcl = lcl_pressure.0,
        lfc = ?lfc_pressure.into_option().map(|p| p.0),
        el = ?el_pressure.into_option().map(|p| p.0),
        cape = cape.0,
        cin = cin.0,
        "lifted parcel"
    );

    Ok(ParcelAscentAnalysis {
        parcel,
        profile,
        cape,
        cin,
        lcl_pressure,
        lcl_temperature,
        lfc_pressure,
        el_pressure,
        energy_layers,
    })
}

// A level in the analysis
#[derive(Clone, Copy, Debug)]
struct AnalLevel {
    pressure: HectoPascal,
    pcl_t: Celsius,
    env_t: Celsius,
}

impl AnalLevel {
    fn buoyancy(&self) -> CelsiusDiff {
        self.pcl_t - self.env_t
    }
}

pub(super) fn create_parcel_calc_t(
    parcel: Parcel,
) -> Result<impl Fn(HectoPascal) -> Option<Celsius>> {
    let (lcl_pressure, lcl_temperature) = parcel.lcl()?;
    let theta = parcel.theta();
    let theta_e = metfor::equiv_pot_temperature(lcl_temperature, lcl_temperature, lcl_pressure)
        .ok_or(AnalysisError::MetForError)?;

    Ok(move |tgt_pres: HectoPascal| {
        if tgt_pres >= lcl_pressure {
            // Dry adiabatic lifting
            Some(Celsius::from(metfor::temperature_from_pot_temp(
                theta, tgt_pres,
            )))
        } else {
            // Moist adiabatic lifting
            metfor::temperature_from_equiv_pot_temp_saturated_and_pressure(tgt_pres, theta_e)
        }
    })
}

// Emit the bottom level of a layer plus any LCL or crossing levels inside it, bottom up.
fn create_level_type_mapping(
    lcl_pressure: HectoPascal,
    lcl_temperature: Celsius,
) -> impl Fn(AnalLevel, AnalLevel) -> std::vec::IntoIter<AnalLevel> {
    move |lvl0: AnalLevel, lvl1: AnalLevel| {
        let mut vals = Vec::with_capacity(3);
        vals.push(lvl0);

        let AnalLevel {
            pressure: p0,
            pcl_t: pt0,
            env_t: et0,
        } = lvl0;

        let AnalLevel {
            pressure: p1,
            pcl_t: pt1,
            env_t: et1,
        } = lvl1;

        // Check to see if the parcel profile crossed over the environmental profile. Note that
        // this demarks a change in stability, either to stable or unstable.
        let (b0, b1) = (lvl0.buoyancy(), lvl1.buoyancy());
        let zero = CelsiusDiff(0.0);
        if (b0 < zero && b1 > zero) || (b0 > zero && b1 < zero) {
            let tgt_p = linear_interp(zero, b0, b1, p0, p1);
            let tgt_t = linear_interp(zero, b0, b1, pt0, pt1);

            vals.push(AnalLevel {
                pressure: tgt_p,
                pcl_t: tgt_t,
                env_t: tgt_t,
            });
        }

        // Check for the LCL, add it
        if p0 > lcl_pressure && p1 < lcl_pressure {
            vals.push(AnalLevel {
                pressure: lcl_pressure,
                pcl_t: lcl_temperature,
                env_t: log_p_interp(lcl_pressure, p0, p1, et0, et1),
            });
        }

        // Sort in decreasing order by pressure, swap order of b and a to get decreasing sort.
        vals.sort_by(|a, b| {
            b.pressure
                .partial_cmp(&a.pressure)
                .unwrap_or(Ordering::Equal)
        });

        vals.into_iter()
    }
}

// The LFC is the first level at or above the LCL where the parcel is not colder than the
// environment. The EL is where the parcel last loses its buoyancy above the LFC, missing if it is
// still buoyant at the top of the profile.
fn find_lfc_el(
    profile: &ParcelProfile,
    lcl_pressure: HectoPascal,
) -> (Optioned<HectoPascal>, Optioned<HectoPascal>) {
    let levels: Vec<AnalLevel> = profile
        .pressure
        .iter()
        .zip(profile.parcel_t.iter())
        .zip(profile.environment_t.iter())
        .map(|((&pressure, &pcl_t), &env_t)| AnalLevel {
            pressure,
            pcl_t,
            env_t,
        })
        .collect();

    let zero = CelsiusDiff(0.0);

    let lfc_idx = match levels
        .iter()
        .position(|lvl| lvl.pressure <= lcl_pressure && lvl.buoyancy() >= zero)
    {
        Some(idx) => idx,
        None => return (none(), none()),
    };

    let lfc = some(levels[lfc_idx].pressure);

    let still_buoyant = levels
        .last()
        .map(|lvl| lvl.buoyancy() > zero)
        .unwrap_or(false);
    if still_buoyant {
        return (lfc, none());
    }

    let el = levels[lfc_idx..]
        .iter()
        .tuple_windows::<(_, _)>()
        .filter(|(lvl0, lvl1)| lvl0.buoyancy() > zero && lvl1.buoyancy() <= zero)
        .map(|(_, lvl1)| lvl1.pressure)
        .last();

    (lfc, Optioned::from(el))
}
