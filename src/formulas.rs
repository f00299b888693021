//! Closed form thermodynamic formulas for a single level.
//!
//! Every function here is pure and carries its units in the types. Pressures are in hPa,
//! temperatures accept any `metfor` temperature type and are converted to the unit the formula
//! needs, and specific humidities are dimensionless (kg/kg).
//!
//! Nothing is validated. Physically invalid input such as a zero or negative pressure propagates
//! as `NaN` or an infinity following IEEE arithmetic, the same way a failed calculation shows up
//! in a plotted field.
use crate::constants::{
    DRY_CP, DRY_R, GRAVITY, KAPPA, LAPSE_RATE, MOLECULAR_RATIO, REFERENCE_PRESSURE,
};
use metfor::{Celsius, HectoPascal, JpKg, Kelvin, Meters, Quantity};

/// Potential temperature, θ = T (1000 / p)<sup>R/c<sub>p</sub></sup>.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal, Kelvin};
/// use sounding_thermo::formulas::potential_temperature;
///
/// let theta = potential_temperature(HectoPascal(1000.0), Kelvin(288.15));
/// assert_eq!(theta, Kelvin(288.15));
///
/// // Celsius is converted before the formula is applied.
/// let theta = potential_temperature(HectoPascal(850.0), Celsius(10.0));
/// assert!(theta > Kelvin(283.15));
/// ```
#[inline]
pub fn potential_temperature<P, T>(pressure: P, temperature: T) -> Kelvin
where
    P: metfor::Pressure,
    HectoPascal: From<P>,
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let p = HectoPascal::from(pressure);
    let t = Kelvin::from(temperature);

    Kelvin(t.unpack() * exner_inverse(p))
}

/// Virtual temperature from the vapor pressure, Tv = T / (1 - (e / p)(1 - ε)).
#[inline]
pub fn virtual_temperature<T>(
    vapor_pressure: HectoPascal,
    pressure: HectoPascal,
    temperature: T,
) -> Kelvin
where
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let t = Kelvin::from(temperature).unpack();
    let vapor_fraction = (vapor_pressure.unpack() / pressure.unpack()) * (1.0 - MOLECULAR_RATIO);

    Kelvin(t / (1.0 - vapor_fraction))
}

/// Virtual potential temperature, the potential temperature of the virtual temperature.
///
/// With no vapor this is exactly the potential temperature.
#[inline]
pub fn virtual_potential_temperature<T>(
    vapor_pressure: HectoPascal,
    pressure: HectoPascal,
    temperature: T,
) -> Kelvin
where
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let tv = virtual_temperature(vapor_pressure, pressure, temperature);

    Kelvin(tv.unpack() * exner_inverse(pressure))
}

/// Vapor pressure from specific humidity, e = p q / (q + ε).
#[inline]
pub fn vapor_pressure(pressure: HectoPascal, specific_humidity: f64) -> HectoPascal {
    HectoPascal(pressure.unpack() * (specific_humidity / (specific_humidity + MOLECULAR_RATIO)))
}

/// Saturation vapor pressure over liquid water from the Tetens approximation,
/// e<sub>s</sub> = 6.11 &times; 10<sup>7.5 T / (T + 237.3)</sup> with T in &deg;C.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal, Kelvin, Quantity};
/// use sounding_thermo::formulas::saturation_vapor_pressure;
///
/// let es = saturation_vapor_pressure(Celsius(20.0));
/// assert!((es.unpack() - 23.37).abs() < 0.05);
///
/// // Kelvin input is converted, not misread as Celsius.
/// let es_k = saturation_vapor_pressure(Kelvin(293.15));
/// assert!((es_k.unpack() - es.unpack()).abs() < 1.0e-9);
/// ```
#[inline]
pub fn saturation_vapor_pressure<T>(temperature: T) -> HectoPascal
where
    T: metfor::Temperature,
    Celsius: From<T>,
{
    let t_c = Celsius::from(temperature).unpack();
    let exponent = (7.5 * t_c) / (t_c + 237.3);

    HectoPascal(6.11 * 10f64.powf(exponent))
}

/// Saturation specific humidity, q<sub>s</sub> = ε e<sub>s</sub> / p.
#[inline]
pub fn saturation_specific_humidity(
    saturation_vapor_pressure: HectoPascal,
    pressure: HectoPascal,
) -> f64 {
    MOLECULAR_RATIO * (saturation_vapor_pressure.unpack() / pressure.unpack())
}

/// Relative humidity as a fraction, q / q<sub>s</sub>. Supersaturation is not clamped.
#[inline]
pub fn relative_humidity(specific_humidity: f64, saturation_specific_humidity: f64) -> f64 {
    specific_humidity / saturation_specific_humidity
}

/// Density of moist air in kg m<sup>-3</sup> from the ideal gas law with the virtual temperature.
#[inline]
pub fn air_density<T>(pressure: HectoPascal, vapor_pressure: HectoPascal, temperature: T) -> f64
where
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let tv = virtual_temperature(vapor_pressure, pressure, temperature);
    // hPa to Pa
    let p_pa = pressure.unpack() / 0.01;

    p_pa / (DRY_R * tv.unpack())
}

/// Equivalent potential temperature, θ<sub>e</sub> = θ exp(L q<sub>s</sub> / (c<sub>p</sub> T)).
///
/// `latent_heat` is in J kg<sup>-1</sup>, see
/// [`LATENT_HEAT_VAPORIZATION`](crate::constants::LATENT_HEAT_VAPORIZATION).
#[inline]
pub fn equivalent_potential_temperature<T>(
    latent_heat: f64,
    saturation_specific_humidity: f64,
    temperature: T,
    potential_temperature: Kelvin,
) -> Kelvin
where
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let t = Kelvin::from(temperature).unpack();
    let fraction = (latent_heat * saturation_specific_humidity) / (DRY_CP * t);

    Kelvin(potential_temperature.unpack() * fraction.exp())
}

/// Height of a pressure level above the reference pressure assuming a constant lapse rate,
/// h = (T<sub>sfc</sub> / Γ)(1 - (p / 1000)<sup>Γ R / g</sup>).
#[inline]
pub fn hydrostatic_height<T>(pressure: HectoPascal, surface_temperature: T) -> Meters
where
    T: metfor::Temperature,
    Kelvin: From<T>,
{
    let t_sfc = Kelvin::from(surface_temperature).unpack();
    let ratio =
        (pressure.unpack() / REFERENCE_PRESSURE.unpack()).powf(LAPSE_RATE * DRY_R / GRAVITY);

    Meters((t_sfc / LAPSE_RATE) * (1.0 - ratio))
}

/// Dry static energy, c<sub>p</sub> T + g h, with h from [`hydrostatic_height`].
#[inline]
pub fn dry_static_energy<T, U>(
    pressure: HectoPascal,
    surface_temperature: T,
    temperature: U,
) -> JpKg
where
    T: metfor::Temperature,
    Kelvin: From<T>,
    U: metfor::Temperature,
    Kelvin: From<U>,
{
    let height = hydrostatic_height(pressure, surface_temperature).unpack();
    let t = Kelvin::from(temperature).unpack();

    JpKg(DRY_CP * t + GRAVITY * height)
}

/// Saturated moist static energy, c<sub>p</sub> T + q h + L q<sub>s</sub>.
///
/// The height term is weighted by the specific humidity `q`, not by gravity.
#[inline]
pub fn saturated_moist_static_energy<T, U>(
    saturation_specific_humidity: f64,
    temperature: T,
    specific_humidity: f64,
    pressure: HectoPascal,
    surface_temperature: U,
    latent_heat: f64,
) -> JpKg
where
    T: metfor::Temperature,
    Kelvin: From<T>,
    U: metfor::Temperature,
    Kelvin: From<U>,
{
    let height = hydrostatic_height(pressure, surface_temperature).unpack();
    let t = Kelvin::from(temperature).unpack();

    JpKg(DRY_CP * t + specific_humidity * height + latent_heat * saturation_specific_humidity)
}

// (1000 / p)^(R/cp)
#[inline]
fn exner_inverse(pressure: HectoPascal) -> f64 {
    (REFERENCE_PRESSURE.unpack() / pressure.unpack()).powf(KAPPA)
}
