//! Create profiles.
//!
//! Every formula in [`formulas`](crate::formulas) has a counterpart here that is applied level by
//! level to aligned slices. The output is aligned 1:1 with the input levels, so it can be plotted
//! against the same pressure profile. Slices that are not the same length are an error, but bad
//! values at a single level are not; they just produce a `NaN` at that level.
//!
//! [`ThermoProfiles::from_sounding`] calculates all of them for a [`Sounding`] at once.
use crate::{
    constants::LATENT_HEAT_VAPORIZATION,
    error::{AnalysisError, Result},
    formulas,
    sounding::Sounding,
    utility::check_aligned,
};
use itertools::izip;
use metfor::{Celsius, HectoPascal, JpKg, Kelvin, Meters};

/// Given pressure and temperature, calculate a profile of the potential temperature.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal, Kelvin};
/// use sounding_thermo::profile::potential_temperature;
///
/// let p = [HectoPascal(1000.0), HectoPascal(500.0)];
/// let t = [Celsius(20.0), Celsius(-10.0)];
///
/// let theta = potential_temperature(&p, &t).unwrap();
/// assert_eq!(theta.len(), 2);
/// assert!(theta[1] > theta[0]);
///
/// assert!(potential_temperature(&p, &t[..1]).is_err());
/// ```
pub fn potential_temperature<T>(pressure: &[HectoPascal], temperature: &[T]) -> Result<Vec<Kelvin>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
{
    check_aligned(&[pressure.len(), temperature.len()])?;

    Ok(izip!(pressure, temperature)
        .map(|(&p, &t)| formulas::potential_temperature(p, t))
        .collect())
}

/// Given vapor pressure, pressure, and temperature, calculate a profile of the virtual potential
/// temperature.
pub fn virtual_potential_temperature<T>(
    vapor_pressure: &[HectoPascal],
    pressure: &[HectoPascal],
    temperature: &[T],
) -> Result<Vec<Kelvin>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
{
    check_aligned(&[vapor_pressure.len(), pressure.len(), temperature.len()])?;

    Ok(izip!(vapor_pressure, pressure, temperature)
        .map(|(&e, &p, &t)| formulas::virtual_potential_temperature(e, p, t))
        .collect())
}

/// Given pressure and specific humidity, calculate a profile of vapor pressure.
pub fn vapor_pressure(
    pressure: &[HectoPascal],
    specific_humidity: &[f64],
) -> Result<Vec<HectoPascal>> {
    check_aligned(&[pressure.len(), specific_humidity.len()])?;

    Ok(izip!(pressure, specific_humidity)
        .map(|(&p, &q)| formulas::vapor_pressure(p, q))
        .collect())
}

/// Given temperature, calculate a profile of saturation vapor pressure.
pub fn saturation_vapor_pressure<T>(temperature: &[T]) -> Vec<HectoPascal>
where
    T: metfor::Temperature + Copy,
    Celsius: From<T>,
{
    temperature
        .iter()
        .map(|&t| formulas::saturation_vapor_pressure(t))
        .collect()
}

/// Given saturation vapor pressure and pressure, calculate a profile of saturation specific
/// humidity.
pub fn saturation_specific_humidity(
    saturation_vapor_pressure: &[HectoPascal],
    pressure: &[HectoPascal],
) -> Result<Vec<f64>> {
    check_aligned(&[saturation_vapor_pressure.len(), pressure.len()])?;

    Ok(izip!(saturation_vapor_pressure, pressure)
        .map(|(&es, &p)| formulas::saturation_specific_humidity(es, p))
        .collect())
}

/// Given specific humidity and saturation specific humidity, calculate a profile of relative
/// humidity as a fraction.
pub fn relative_humidity(
    specific_humidity: &[f64],
    saturation_specific_humidity: &[f64],
) -> Result<Vec<f64>> {
    check_aligned(&[specific_humidity.len(), saturation_specific_humidity.len()])?;

    Ok(izip!(specific_humidity, saturation_specific_humidity)
        .map(|(&q, &qs)| formulas::relative_humidity(q, qs))
        .collect())
}

/// Given pressure, vapor pressure, and temperature, calculate a profile of air density in
/// kg m<sup>-3</sup>.
pub fn air_density<T>(
    pressure: &[HectoPascal],
    vapor_pressure: &[HectoPascal],
    temperature: &[T],
) -> Result<Vec<f64>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
{
    check_aligned(&[pressure.len(), vapor_pressure.len(), temperature.len()])?;

    Ok(izip!(pressure, vapor_pressure, temperature)
        .map(|(&p, &e, &t)| formulas::air_density(p, e, t))
        .collect())
}

/// Calculate a profile of the equivalent potential temperature. `latent_heat` is in J/kg.
pub fn equivalent_potential_temperature<T>(
    latent_heat: f64,
    saturation_specific_humidity: &[f64],
    temperature: &[T],
    potential_temperature: &[Kelvin],
) -> Result<Vec<Kelvin>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
{
    check_aligned(&[
        saturation_specific_humidity.len(),
        temperature.len(),
        potential_temperature.len(),
    ])?;

    Ok(
        izip!(saturation_specific_humidity, temperature, potential_temperature)
            .map(|(&qs, &t, &theta)| {
                formulas::equivalent_potential_temperature(latent_heat, qs, t, theta)
            })
            .collect(),
    )
}

/// Calculate the height of each pressure level with the constant lapse rate approximation.
pub fn hydrostatic_height<T>(pressure: &[HectoPascal], surface_temperature: T) -> Vec<Meters>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
{
    pressure
        .iter()
        .map(|&p| formulas::hydrostatic_height(p, surface_temperature))
        .collect()
}

/// Calculate a profile of dry static energy.
pub fn dry_static_energy<T, U>(
    pressure: &[HectoPascal],
    surface_temperature: T,
    temperature: &[U],
) -> Result<Vec<JpKg>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
    U: metfor::Temperature + Copy,
    Kelvin: From<U>,
{
    check_aligned(&[pressure.len(), temperature.len()])?;

    Ok(izip!(pressure, temperature)
        .map(|(&p, &t)| formulas::dry_static_energy(p, surface_temperature, t))
        .collect())
}

/// Calculate a profile of saturated moist static energy.
pub fn saturated_moist_static_energy<T, U>(
    saturation_specific_humidity: &[f64],
    temperature: &[T],
    specific_humidity: &[f64],
    pressure: &[HectoPascal],
    surface_temperature: U,
    latent_heat: f64,
) -> Result<Vec<JpKg>>
where
    T: metfor::Temperature + Copy,
    Kelvin: From<T>,
    U: metfor::Temperature + Copy,
    Kelvin: From<U>,
{
    check_aligned(&[
        saturation_specific_humidity.len(),
        temperature.len(),
        specific_humidity.len(),
        pressure.len(),
    ])?;

    Ok(izip!(
        saturation_specific_humidity,
        temperature,
        specific_humidity,
        pressure
    )
    .map(|(&qs, &t, &q, &p)| {
        formulas::saturated_moist_static_energy(qs, t, q, p, surface_temperature, latent_heat)
    })
    .collect())
}

/// Every derived thermodynamic profile of a sounding, aligned with its levels.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoProfiles {
    /// Potential temperature.
    pub potential_temperature: Vec<Kelvin>,
    /// Vapor pressure.
    pub vapor_pressure: Vec<HectoPascal>,
    /// Virtual potential temperature.
    pub virtual_potential_temperature: Vec<Kelvin>,
    /// Saturation vapor pressure.
    pub saturation_vapor_pressure: Vec<HectoPascal>,
    /// Saturation specific humidity, kg/kg.
    pub saturation_specific_humidity: Vec<f64>,
    /// Relative humidity as a fraction.
    pub relative_humidity: Vec<f64>,
    /// Air density, kg m<sup>-3</sup>.
    pub air_density: Vec<f64>,
    /// Equivalent potential temperature.
    pub equivalent_potential_temperature: Vec<Kelvin>,
    /// Height from the constant lapse rate approximation.
    pub height: Vec<Meters>,
    /// Dry static energy.
    pub dry_static_energy: Vec<JpKg>,
    /// Saturated moist static energy.
    pub saturated_moist_static_energy: Vec<JpKg>,
}

impl ThermoProfiles {
    /// Calculate every profile for a sounding with the default latent heat of vaporization.
    pub fn new(snd: &Sounding) -> Result<Self> {
        Self::from_sounding(snd, LATENT_HEAT_VAPORIZATION)
    }

    /// Calculate every profile for a sounding.
    ///
    /// The lowest level of the sounding is used as the surface temperature for the height and
    /// static energy profiles. `latent_heat` is in J/kg.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_thermo::{ThermoProfiles, LATENT_HEAT_VAPORIZATION};
    /// # use sounding_thermo::doctest::make_test_sounding;
    ///
    /// let snd = make_test_sounding();
    /// let profiles = ThermoProfiles::from_sounding(&snd, LATENT_HEAT_VAPORIZATION).unwrap();
    ///
    /// assert_eq!(profiles.potential_temperature.len(), snd.pressure_profile().len());
    /// assert!(profiles.relative_humidity.iter().all(|rh| *rh > 0.0));
    /// ```
    pub fn from_sounding(snd: &Sounding, latent_heat: f64) -> Result<Self> {
        snd.num_levels()?;

        let pressure = snd.pressure_profile();
        let temperature = snd.temperature_profile();
        let specific_humidity = snd.specific_humidity_profile();
        let surface_temperature = snd
            .surface_row()
            .map(|row| row.temperature)
            .ok_or(AnalysisError::NotEnoughData)?;

        let potential_temperature = potential_temperature(pressure, temperature)?;
        let vapor_pressure = vapor_pressure(pressure, specific_humidity)?;
        let virtual_potential_temperature =
            virtual_potential_temperature(&vapor_pressure, pressure, temperature)?;
        let saturation_vapor_pressure = saturation_vapor_pressure(temperature);
        let saturation_specific_humidity =
            saturation_specific_humidity(&saturation_vapor_pressure, pressure)?;
        let relative_humidity =
            relative_humidity(specific_humidity, &saturation_specific_humidity)?;
        let air_density = air_density(pressure, &vapor_pressure, temperature)?;
        let equivalent_potential_temperature = equivalent_potential_temperature(
            latent_heat,
            &saturation_specific_humidity,
            temperature,
            &potential_temperature,
        )?;
        let height = hydrostatic_height(pressure, surface_temperature);
        let dry_static_energy = dry_static_energy(pressure, surface_temperature, temperature)?;
        let saturated_moist_static_energy = saturated_moist_static_energy(
            &saturation_specific_humidity,
            temperature,
            specific_humidity,
            pressure,
            surface_temperature,
            latent_heat,
        )?;

        Ok(ThermoProfiles {
            potential_temperature,
            vapor_pressure,
            virtual_potential_temperature,
            saturation_vapor_pressure,
            saturation_specific_humidity,
            relative_humidity,
            air_density,
            equivalent_potential_temperature,
            height,
            dry_static_energy,
            saturated_moist_static_energy,
        })
    }
}
