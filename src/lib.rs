#![warn(missing_docs)]
//! Functions and data types for calculating thermodynamic profiles of atmospheric soundings and
//! rendering them as plots.
//!
//! The calculators come in two forms. The `formulas` module has scalar functions tagged with
//! [metfor](https://github.com/rnleach/metfor.git) units, and the `profile` module applies them
//! level by level to the aligned profiles of a `Sounding`. The `render` module draws time-pressure
//! contours, time series, vertical and comparative profiles, and Skew-T diagrams with the CAPE and
//! CIN of a surface parcel.
//!
//! ```rust
//! use sounding_thermo::ThermoProfiles;
//! # use sounding_thermo::doctest::make_test_sounding;
//!
//! let snd = make_test_sounding();
//! let derived = ThermoProfiles::new(&snd).unwrap();
//!
//! assert_eq!(derived.potential_temperature.len(), snd.pressure_profile().len());
//! ```

//
// API
//
pub use crate::constants::LATENT_HEAT_VAPORIZATION;
pub use crate::error::{AnalysisError, RenderError, Result};
pub use crate::parcel::Parcel;
pub use crate::parcel_profile::{ParcelAscentAnalysis, ParcelProfile};
pub use crate::profile::ThermoProfiles;
pub use crate::render::{
    render_comparative_profile, render_comparative_vs_temperature, render_skew_t,
    render_time_pressure_contour, render_time_series, render_vertical_profile, ImageFormat,
    PlotText, RenderConfig, Series,
};
pub use crate::sounding::{DataRow, Sounding};

#[doc(hidden)]
pub use crate::sounding::doctest;

pub mod constants;
pub mod formulas;
pub mod parcel;
pub mod parcel_profile;
pub mod profile;
pub mod render;

//
// Internal use only
//

// Modules
mod error;
mod interpolation;
mod sounding;
mod utility;
