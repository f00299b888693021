//! Parcels and the moisture profiles needed to lift them.
use crate::{
    error::{AnalysisError, Result},
    sounding::Sounding,
};
use metfor::{self, Celsius, HectoPascal, Kelvin};
use optional::Optioned;

/// Variables defining a parcel as used in parcel analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parcel {
    /// Temperature in C
    pub temperature: Celsius,
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Dew point in C
    pub dew_point: Celsius,
}

impl Parcel {
    /// Get the potential temperature of the parcel.
    pub fn theta(&self) -> Kelvin {
        metfor::potential_temperature(self.pressure, self.temperature)
    }

    /// Get the equivalent potential temperature of the parcel.
    pub fn theta_e(&self) -> Result<Kelvin> {
        metfor::equiv_pot_temperature(self.temperature, self.dew_point, self.pressure)
            .ok_or(AnalysisError::MetForError)
    }

    /// Get the pressure and temperature of the parcel's lifting condensation level.
    pub fn lcl(&self) -> Result<(HectoPascal, Celsius)> {
        metfor::pressure_and_temperature_at_lcl(self.temperature, self.dew_point, self.pressure)
            .map(|(p, t)| (p, Celsius::from(t)))
            .ok_or(AnalysisError::MetForError)
    }
}

/// Calculate the dew point at every level of a sounding from its specific humidity.
///
/// Levels where the dew point cannot be calculated, e.g. with zero humidity, are missing.
///
/// # Examples
///
/// ```rust
/// use sounding_thermo::parcel::dew_point_profile;
/// # use sounding_thermo::doctest::make_test_sounding;
///
/// let snd = make_test_sounding();
/// let dp = dew_point_profile(&snd).unwrap();
///
/// assert_eq!(dp.len(), snd.temperature_profile().len());
/// for (dp, t) in dp.iter().zip(snd.temperature_profile()) {
///     assert!(dp.unpack() <= *t);
/// }
/// ```
pub fn dew_point_profile(snd: &Sounding) -> Result<Vec<Optioned<Celsius>>> {
    snd.num_levels()?;

    Ok(snd
        .pressure_profile()
        .iter()
        .zip(snd.specific_humidity_profile())
        .map(|(&p, &q)| metfor::dew_point_from_p_and_specific_humidity(p, q))
        .map(Optioned::from)
        .collect())
}

/// Build the parcel lifted for the Skew-T convective analysis.
///
/// The parcel starts at the given surface pressure and temperature and carries the dew point of
/// the lowest level of the sounding.
pub fn surface_parcel<T, P>(
    snd: &Sounding,
    surface_temperature: T,
    surface_pressure: P,
) -> Result<Parcel>
where
    T: metfor::Temperature,
    Celsius: From<T>,
    P: metfor::Pressure,
    HectoPascal: From<P>,
{
    let bottom = snd.surface_row().ok_or(AnalysisError::NotEnoughData)?;
    let dew_point = metfor::dew_point_from_p_and_specific_humidity::<HectoPascal>(
        bottom.pressure,
        bottom.specific_humidity,
    )
    .ok_or(AnalysisError::MetForError)?;

    let temperature = Celsius::from(surface_temperature);
    let pressure = HectoPascal::from(surface_pressure);

    if !temperature.0.is_finite() || !(pressure.0 > 0.0) {
        return Err(AnalysisError::InvalidInput);
    }

    Ok(Parcel {
        temperature,
        pressure,
        dew_point,
    })
}
