//! Data type and methods to store an atmospheric sounding.

use crate::error::Result;
use crate::utility::check_aligned;
use chrono::NaiveDateTime;
use metfor::{Celsius, HectoPascal};

pub use self::data_row::DataRow;

/// The upper air profiles of a sounding.
///
/// The profiles are stored in parallel vectors that must line up level by level. They may be
/// ordered from the surface up (decreasing pressure) or from the top down; `bottom_up` and
/// `top_down` hide the difference.
///
/// Specific humidity is stored in kg/kg.
#[derive(Clone, Debug, Default)]
pub struct Sounding {
    // Description of the source of the sounding.
    source: Option<String>,

    // Valid time of sounding
    valid_time: Option<NaiveDateTime>,

    // Profiles
    pressure: Vec<HectoPascal>,
    temperature: Vec<Celsius>,
    specific_humidity: Vec<f64>,
}

impl Sounding {
    /// Create a new sounding with default values. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_thermo::Sounding;
    ///
    /// let snd = Sounding::new();
    /// println!("{:?}", snd);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Sounding::default()
    }

    /// Add a source description to this sounding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_thermo::Sounding;
    ///
    /// let snd = Sounding::new().with_source_description("Station 82332, 12Z".to_owned());
    /// assert_eq!(snd.source_description().unwrap(), "Station 82332, 12Z");
    ///
    /// let snd = snd.with_source_description(None);
    /// assert!(snd.source_description().is_none());
    /// ```
    #[inline]
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Retrieve a source description for this sounding.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Builder method to set the valid time of the sounding.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_thermo::Sounding;
    /// use chrono::NaiveDate;
    ///
    /// let vtime = NaiveDate::from_ymd_opt(2014, 2, 14).unwrap().and_hms_opt(20, 0, 0).unwrap();
    /// let snd = Sounding::new().with_valid_time(vtime);
    /// assert_eq!(snd.valid_time(), Some(vtime));
    ///
    /// let snd = snd.with_valid_time(None);
    /// assert!(snd.valid_time().is_none());
    /// ```
    #[inline]
    pub fn with_valid_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.valid_time = Option::from(valid_time);
        self
    }

    /// Valid time of the sounding.
    #[inline]
    pub fn valid_time(&self) -> Option<NaiveDateTime> {
        self.valid_time
    }

    /// Builder method for the pressure profile.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_thermo::Sounding;
    /// use metfor::HectoPascal;
    ///
    /// let data = vec![1000.0, 925.0, 850.0, 700.0, 500.0, 300.0, 250.0, 200.0, 150.0, 100.0];
    /// let pressure_data: Vec<HectoPascal> = data.into_iter().map(HectoPascal).collect();
    ///
    /// let snd = Sounding::new().with_pressure_profile(pressure_data);
    /// assert_eq!(snd.pressure_profile().len(), 10);
    /// ```
    #[inline]
    pub fn with_pressure_profile<P>(self, profile: Vec<P>) -> Self
    where
        P: metfor::Pressure,
        HectoPascal: From<P>,
    {
        let pressure = profile.into_iter().map(HectoPascal::from).collect();
        Self { pressure, ..self }
    }

    /// Get the pressure profile.
    #[inline]
    pub fn pressure_profile(&self) -> &[HectoPascal] {
        &self.pressure
    }

    /// Builder method for the temperature profile. Any `metfor` temperature type is accepted
    /// and stored in Celsius.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_thermo::Sounding;
    /// use metfor::{Celsius, Kelvin};
    ///
    /// let snd = Sounding::new().with_temperature_profile(vec![Kelvin(293.15), Kelvin(283.15)]);
    /// assert!((snd.temperature_profile()[1].0 - 10.0).abs() < 1.0e-9);
    /// ```
    #[inline]
    pub fn with_temperature_profile<T>(self, profile: Vec<T>) -> Self
    where
        T: metfor::Temperature,
        Celsius: From<T>,
    {
        let temperature = profile.into_iter().map(Celsius::from).collect();
        Self {
            temperature,
            ..self
        }
    }

    /// Get the temperature profile.
    #[inline]
    pub fn temperature_profile(&self) -> &[Celsius] {
        &self.temperature
    }

    /// Builder method for the specific humidity profile in kg/kg.
    #[inline]
    pub fn with_specific_humidity_profile(self, specific_humidity: Vec<f64>) -> Self {
        Self {
            specific_humidity,
            ..self
        }
    }

    /// Builder method for a specific humidity profile given in g/kg, it is stored in kg/kg.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_thermo::Sounding;
    ///
    /// let snd = Sounding::new().with_specific_humidity_g_per_kg(vec![16.0, 12.5]);
    /// assert_eq!(snd.specific_humidity_profile(), &[0.016, 0.0125]);
    /// ```
    #[inline]
    pub fn with_specific_humidity_g_per_kg(self, profile: Vec<f64>) -> Self {
        let specific_humidity = profile.into_iter().map(|q| q / 1000.0).collect();
        Self {
            specific_humidity,
            ..self
        }
    }

    /// Get the specific humidity profile in kg/kg.
    #[inline]
    pub fn specific_humidity_profile(&self) -> &[f64] {
        &self.specific_humidity
    }

    /// The number of levels, or an error if the profiles are not aligned.
    ///
    /// # Examples
    /// ```rust
    /// use metfor::{Celsius, HectoPascal};
    /// use sounding_thermo::{AnalysisError, Sounding};
    ///
    /// let snd = Sounding::new()
    ///     .with_pressure_profile(vec![HectoPascal(1000.0), HectoPascal(850.0)])
    ///     .with_temperature_profile(vec![Celsius(25.0), Celsius(15.0)])
    ///     .with_specific_humidity_profile(vec![0.015, 0.011]);
    /// assert_eq!(snd.num_levels(), Ok(2));
    ///
    /// let snd = snd.with_specific_humidity_profile(vec![0.015]);
    /// assert_eq!(
    ///     snd.num_levels(),
    ///     Err(AnalysisError::MismatchedProfiles { expected: 2, found: 1 })
    /// );
    /// ```
    pub fn num_levels(&self) -> Result<usize> {
        check_aligned(&[
            self.pressure.len(),
            self.temperature.len(),
            self.specific_humidity.len(),
        ])
    }

    /// Get a row of data values from this sounding, in storage order.
    #[inline]
    pub fn data_row(&self, idx: usize) -> Option<DataRow> {
        Some(DataRow {
            pressure: *self.pressure.get(idx)?,
            temperature: *self.temperature.get(idx)?,
            specific_humidity: *self.specific_humidity.get(idx)?,
        })
    }

    /// Whether the profiles are stored from the top down, i.e. with increasing pressure.
    #[inline]
    pub fn is_top_down(&self) -> bool {
        match (self.pressure.first(), self.pressure.last()) {
            (Some(first), Some(last)) => first < last,
            _ => false,
        }
    }

    /// The lowest level of the sounding.
    #[inline]
    pub fn surface_row(&self) -> Option<DataRow> {
        self.bottom_up().next()
    }

    /// Get a bottom up iterator over the data rows, regardless of storage order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{HectoPascal, Celsius};
    /// use sounding_thermo::Sounding;
    ///
    /// // Stored top down
    /// let snd = Sounding::new()
    ///     .with_pressure_profile(vec![
    ///         HectoPascal(850.0),
    ///         HectoPascal(925.0),
    ///         HectoPascal(1000.0),
    ///     ])
    ///     .with_temperature_profile(vec![Celsius(17.0), Celsius(18.0), Celsius(20.0)])
    ///     .with_specific_humidity_profile(vec![0.010, 0.012, 0.014]);
    ///
    /// let mut iter = snd.bottom_up();
    ///
    /// let row = iter.next().unwrap();
    /// assert_eq!(row.pressure, HectoPascal(1000.0));
    /// assert_eq!(row.temperature, Celsius(20.0));
    ///
    /// let row = iter.next().unwrap();
    /// assert_eq!(row.pressure, HectoPascal(925.0));
    ///
    /// let row = iter.next().unwrap();
    /// assert_eq!(row.pressure, HectoPascal(850.0));
    ///
    /// assert!(iter.next().is_none());
    /// ```
    #[inline]
    pub fn bottom_up<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        let direction = if self.is_top_down() { -1 } else { 1 };
        self.rows_in_direction(direction)
    }

    /// Get a top down iterator over the data rows, regardless of storage order.
    #[inline]
    pub fn top_down<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        let direction = if self.is_top_down() { 1 } else { -1 };
        self.rows_in_direction(direction)
    }

    fn rows_in_direction(&self, direction: isize) -> ProfileIterator<'_> {
        let len = self
            .pressure
            .len()
            .min(self.temperature.len())
            .min(self.specific_humidity.len()) as isize;

        let next_idx = if direction > 0 { 0 } else { len - 1 };

        ProfileIterator {
            next_idx,
            direction,
            len,
            src: self,
        }
    }
}

struct ProfileIterator<'a> {
    next_idx: isize,
    direction: isize, // +1 for storage order, -1 for reverse
    len: isize,
    src: &'a Sounding,
}

impl<'a> Iterator for ProfileIterator<'a> {
    type Item = DataRow;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx < 0 || self.next_idx >= self.len {
            return None;
        }

        let result = self.src.data_row(self.next_idx as usize);
        self.next_idx += self.direction;
        result
    }
}

#[doc(hidden)]
pub mod doctest {
    use super::*;

    /// A tropical sounding, stored from the surface up.
    pub fn make_test_sounding() -> super::Sounding {
        let p = vec![
            1000.0, 950.0, 900.0, 850.0, 800.0, 700.0, 600.0, 500.0, 400.0, 300.0, 250.0, 200.0,
        ];
        let t = vec![26.0, 22.5, 19.6, 17.0, 14.2, 8.6, 1.8, -6.2, -16.4, -31.6, -41.0, -50.0];
        let q = vec![18.5, 16.4, 14.5, 12.6, 10.5, 7.2, 4.6, 2.4, 1.0, 0.3, 0.12, 0.04];

        Sounding::new()
            .with_source_description("Test sounding".to_owned())
            .with_pressure_profile(p.into_iter().map(HectoPascal).collect::<Vec<_>>())
            .with_temperature_profile(t.into_iter().map(Celsius).collect::<Vec<_>>())
            .with_specific_humidity_g_per_kg(q)
    }
}


mod data_row;
