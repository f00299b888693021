//! Physical constants used by the thermodynamic formulas.
//!
//! These are the rounded textbook values; they intentionally differ slightly from the constants
//! in `metfor`, which are only used for the parcel analysis behind the Skew-T.
use metfor::HectoPascal;

/// Gas constant for dry air, J K<sup>-1</sup> kg<sup>-1</sup>.
pub const DRY_R: f64 = 287.0;

/// Specific heat of dry air at constant pressure, J K<sup>-1</sup> kg<sup>-1</sup>.
pub const DRY_CP: f64 = 1004.0;

/// Gravitational acceleration, m s<sup>-2</sup>.
pub const GRAVITY: f64 = 9.81;

/// Ratio of the molecular weight of water vapor to that of dry air.
pub const MOLECULAR_RATIO: f64 = 0.622;

/// Environmental lapse rate used for the hydrostatic height estimate, K m<sup>-1</sup>.
pub const LAPSE_RATE: f64 = 0.0098;

/// Reference pressure for potential temperatures.
pub const REFERENCE_PRESSURE: HectoPascal = HectoPascal(1000.0);

/// Latent heat of vaporization at 0&deg;C, J kg<sup>-1</sup>.
pub const LATENT_HEAT_VAPORIZATION: f64 = 2.5e6;

/// Poisson exponent R/c<sub>p</sub>.
pub(crate) const KAPPA: f64 = DRY_R / DRY_CP;
