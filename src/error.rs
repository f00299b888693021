//! Error types for the sounding-thermo crate.
use std::path::PathBuf;
use thiserror::Error;

/// Error type for profile calculations and parcel analysis.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum AnalysisError {
    /// Profiles that must be aligned level by level have different lengths.
    #[error("Profiles are not aligned: expected {expected} levels, found {found}.")]
    MismatchedProfiles {
        /// Length of the first profile.
        expected: usize,
        /// Length of the offending profile.
        found: usize,
    },
    /// Not enough data available for analysis.
    #[error("Not enough data available for analysis.")]
    NotEnoughData,
    /// Bad or invalid input.
    #[error("Invalid input.")]
    InvalidInput,
    /// A metfor function could not produce a value.
    #[error("Error bubbled up from the metfor crate.")]
    MetForError,
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, AnalysisError>;

/// Errors that can occur while rendering a plot to a file.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The file extension does not map to a supported image format.
    #[error(
        "Unsupported image format for {0:?}; use svg, png, jpg, jpeg or bmp. \
         For PDF, write svg and convert it with a vector tool."
    )]
    UnsupportedFormat(PathBuf),
    /// Creating the output directory failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The plotting backend failed.
    #[error("Drawing error: {0}")]
    Drawing(String),
    /// A series required for the plot has no values.
    #[error("Series '{0}' is empty.")]
    EmptySeries(&'static str),
    /// Series that share an axis have different lengths.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// The render configuration could not be parsed.
    #[error("Invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}
