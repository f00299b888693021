use metfor::{Celsius, HectoPascal};

/// A copy of a row of the sounding data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRow {
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Temperature in C
    pub temperature: Celsius,
    /// Specific humidity in kg/kg
    pub specific_humidity: f64,
}
