//! Create and analyze a profile from lifting a parcel.
use crate::{constants::DRY_R, error::Result, parcel::Parcel, sounding::Sounding};
use itertools::Itertools;
use metfor::{Celsius, HectoPascal, JpKg, Quantity};
use optional::Optioned;

pub(crate) mod lift;

/// Hold profiles for a parcel and its environment.
///
/// These are ordered from the bottom up and include the levels where the parcel crosses the
/// environment and the LCL, in addition to the sounding levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParcelProfile {
    /// Pressure profile
    pub pressure: Vec<HectoPascal>,
    /// Parcel temperature profile
    pub parcel_t: Vec<Celsius>,
    /// Environment temperature profile
    pub environment_t: Vec<Celsius>,
}

/// Whether a layer adds to the convective available potential energy or to the inhibition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyKind {
    /// Positively buoyant layer between the LFC and the EL.
    Cape,
    /// Negatively buoyant layer below the LFC.
    Cin,
}

/// A layer between two adjacent levels of a `ParcelProfile` that counts towards CAPE or CIN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyLayer {
    /// Which integral this layer belongs to.
    pub kind: EnergyKind,
    /// Pressure at the bottom and top of the layer.
    pub pressure: (HectoPascal, HectoPascal),
    /// Parcel temperature at the bottom and top of the layer.
    pub parcel_t: (Celsius, Celsius),
    /// Environment temperature at the bottom and top of the layer.
    pub environment_t: (Celsius, Celsius),
}

impl EnergyLayer {
    /// The contribution of this layer to CAPE or CIN, R<sub>d</sub> &int; (T<sub>p</sub> -
    /// T<sub>e</sub>) d ln p by the trapezoid rule.
    pub fn energy(&self) -> JpKg {
        let (p0, p1) = self.pressure;
        let b0 = (self.parcel_t.0 - self.environment_t.0).unpack();
        let b1 = (self.parcel_t.1 - self.environment_t.1).unpack();

        JpKg(DRY_R * 0.5 * (b0 + b1) * (p0.unpack() / p1.unpack()).ln())
    }
}

/// Parcel analysis, this is a way to package the analysis of a parcel.
#[derive(Debug, Clone)]
pub struct ParcelAscentAnalysis {
    // The orginal parcel and profile
    parcel: Parcel,
    profile: ParcelProfile,

    // Indicies from analysis
    cape: JpKg,
    cin: JpKg,
    lcl_pressure: HectoPascal,
    lcl_temperature: Celsius,
    lfc_pressure: Optioned<HectoPascal>,
    el_pressure: Optioned<HectoPascal>,
    energy_layers: Vec<EnergyLayer>,
}

impl ParcelAscentAnalysis {
    /// Get the CAPE, zero if there is no level of free convection.
    pub fn cape(&self) -> JpKg {
        self.cape
    }

    /// Get the CIN, zero or negative.
    pub fn cin(&self) -> JpKg {
        self.cin
    }

    /// Get the LCL pressure level.
    pub fn lcl_pressure(&self) -> HectoPascal {
        self.lcl_pressure
    }

    /// Get the temperature at the LCL.
    pub fn lcl_temperature(&self) -> Celsius {
        self.lcl_temperature
    }

    /// Get the pressure at the level of free convection, if the parcel ever becomes buoyant.
    pub fn lfc_pressure(&self) -> Optioned<HectoPascal> {
        self.lfc_pressure
    }

    /// Get the pressure at the equilibrium level. Missing if there is no LFC, or if the parcel is
    /// still buoyant at the top of the sounding.
    pub fn el_pressure(&self) -> Optioned<HectoPascal> {
        self.el_pressure
    }

    /// The layers that were integrated for CAPE and CIN, bottom up.
    pub fn energy_layers(&self) -> &[EnergyLayer] {
        &self.energy_layers
    }

    /// Retrieve the parcel's profile
    #[inline]
    pub fn profile(&self) -> &ParcelProfile {
        &self.profile
    }

    /// Retrieve the original parcel.
    #[inline]
    pub fn parcel(&self) -> &Parcel {
        &self.parcel
    }
}

/// Calculate the temperature of a lifted parcel at every level of the sounding, in storage order.
///
/// The parcel follows a dry adiabat below its LCL and a saturated pseudo-adiabat above it.
/// Levels where the temperature cannot be calculated are missing.
pub fn parcel_temperature_profile(
    parcel: Parcel,
    snd: &Sounding,
) -> Result<Vec<Optioned<Celsius>>> {
    snd.num_levels()?;
    let parcel_t = lift::create_parcel_calc_t(parcel)?;

    Ok(snd
        .pressure_profile()
        .iter()
        .map(|&p| Optioned::from(parcel_t(p)))
        .collect())
}

/// Lift a parcel through the sounding and find the LCL, LFC, EL, CAPE, and CIN.
///
/// CAPE and CIN are integrated with actual, not virtual, temperatures over the levels of the
/// sounding plus the points where the parcel crosses the environment.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal, JpKg};
/// use sounding_thermo::parcel::surface_parcel;
/// use sounding_thermo::parcel_profile::lift_parcel;
/// # use sounding_thermo::doctest::make_test_sounding;
///
/// let snd = make_test_sounding();
/// let parcel = surface_parcel(&snd, Celsius(27.0), HectoPascal(1000.0)).unwrap();
/// let anal = lift_parcel(parcel, &snd).unwrap();
///
/// assert!(anal.cape() > JpKg(0.0));
/// assert!(anal.cin() <= JpKg(0.0));
/// assert!(anal.lfc_pressure().is_some());
/// assert!(anal.lcl_pressure() < HectoPascal(1000.0));
/// ```
pub fn lift_parcel(parcel: Parcel, snd: &Sounding) -> Result<ParcelAscentAnalysis> {
    lift::lift_parcel(parcel, snd)
}

// Split the profile into layers that count towards CAPE or CIN.
fn energy_layers(
    profile: &ParcelProfile,
    lfc: Optioned<HectoPascal>,
    el: Optioned<HectoPascal>,
) -> Vec<EnergyLayer> {
    let lfc = match lfc.into_option() {
        Some(lfc) => lfc,
        None => return vec![],
    };
    let el = el.unwrap_or(HectoPascal(0.0));

    profile
        .pressure
        .iter()
        .zip(profile.parcel_t.iter())
        .zip(profile.environment_t.iter())
        .map(|((&p, &pt), &et)| (p, pt, et))
        .tuple_windows::<(_, _)>()
        .filter_map(|((p0, pt0, et0), (p1, pt1, et1))| {
            let kind = if p1 >= lfc {
                EnergyKind::Cin
            } else if p0 <= lfc && p1 >= el {
                EnergyKind::Cape
            } else {
                return None;
            };

            let buoyant = pt0 >= et0 && pt1 >= et1;
            let sinking = pt0 <= et0 && pt1 <= et1;
            let counts = match kind {
                EnergyKind::Cape => buoyant && !sinking,
                EnergyKind::Cin => sinking && !buoyant,
            };

            if counts {
                Some(EnergyLayer {
                    kind,
                    pressure: (p0, p1),
                    parcel_t: (pt0, pt1),
                    environment_t: (et0, et1),
                })
            } else {
                None
            }
        })
        .collect()
}
