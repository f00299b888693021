//! Render derived fields and soundings to image files.
//!
//! Every renderer takes its data by reference, draws a figure with fixed styling, and writes it to
//! `config.output_dir().join(file_name)`. The image format is chosen from the extension of
//! `file_name`: `svg` gives a vector image, `png`, `jpg`, `jpeg`, and `bmp` give a raster image.
//! Anything else is rejected before any file is touched.
//!
//! Text is drawn with a font bundled in the crate, so raster and vector output carry the same
//! titles, labels, and legends.
use crate::error::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, info};

mod comparative;
mod config;
mod contour;
mod skewt;
mod style;
mod time_series;
mod vertical;

pub use comparative::{render_comparative_profile, render_comparative_vs_temperature};
pub use config::RenderConfig;
pub use contour::render_time_pressure_contour;
pub use skewt::render_skew_t;
pub use time_series::render_time_series;
pub use vertical::render_vertical_profile;

/// Shorthand for results of rendering.
pub type RenderResult<T> = ::std::result::Result<T, RenderError>;

/// Caption and axis labels supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotText<'a> {
    /// Figure title.
    pub title: &'a str,
    /// Label for the x axis.
    pub x_label: &'a str,
    /// Label for the y axis.
    pub y_label: &'a str,
}

impl<'a> PlotText<'a> {
    /// Create a new set of labels.
    pub fn new(title: &'a str, x_label: &'a str, y_label: &'a str) -> Self {
        PlotText {
            title,
            x_label,
            y_label,
        }
    }
}

/// A named series for the comparative plots, the name goes in the legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Series<'a> {
    /// Legend entry for this series.
    pub label: &'a str,
    /// Values, aligned with the shared axis.
    pub values: &'a [f64],
}

impl<'a> Series<'a> {
    /// Create a new series.
    pub fn new(label: &'a str, values: &'a [f64]) -> Self {
        Series { label, values }
    }
}

/// Image formats that can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector graphics.
    Svg,
    /// Portable network graphics.
    Png,
    /// JPEG, with either the `jpg` or `jpeg` extension.
    #[strum(serialize = "jpg", serialize = "jpeg")]
    Jpeg,
    /// Windows bitmap.
    Bmp,
}

impl ImageFormat {
    /// Find the image format from the extension of a file name, case insensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_thermo::render::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_path("skewt.SVG").unwrap(), ImageFormat::Svg);
    /// assert_eq!(ImageFormat::from_path("theta.jpeg").unwrap(), ImageFormat::Jpeg);
    /// assert!(ImageFormat::from_path("theta.pdf").is_err());
    /// assert!(ImageFormat::from_path("theta").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| ImageFormat::from_str(&ext).ok())
            .ok_or_else(|| RenderError::UnsupportedFormat(path.to_path_buf()))
    }

    /// Whether this is a vector format.
    pub fn is_vector(self) -> bool {
        matches!(self, ImageFormat::Svg)
    }
}

/// A figure that knows its size and can draw itself on any plotters backend.
pub(crate) trait Plot {
    /// Figure size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw the whole figure, the root area has already been filled with the background.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> RenderResult<()>;
}

/// Draw `plot` into `config.output_dir()/file_name` with the backend for the file extension.
pub(crate) fn render<P: Plot>(
    config: &RenderConfig,
    plot: &P,
    file_name: &Path,
) -> RenderResult<PathBuf> {
    let format = ImageFormat::from_path(file_name)?;
    style::register_fonts()?;
    let path = config.output_path(file_name)?;
    let format_name: &'static str = format.into();

    debug!(path = %path.display(), format = format_name, size = ?plot.size(), "rendering plot");

    if format.is_vector() {
        let root = SVGBackend::new(&path, plot.size()).into_drawing_area();
        draw_and_present(plot, root)?;
    } else {
        let root = BitMapBackend::new(&path, plot.size()).into_drawing_area();
        draw_and_present(plot, root)?;
    }

    info!(path = %path.display(), "wrote plot");
    Ok(path)
}

fn draw_and_present<P, DB>(plot: &P, root: DrawingArea<DB, Shift>) -> RenderResult<()>
where
    P: Plot,
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;
    plot.draw(&root)?;
    root.present()?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_format_from_extension() {
        for format in ImageFormat::iter() {
            let ext: &'static str = format.into();
            let name = format!("plot.{}", ext);
            assert_eq!(ImageFormat::from_path(&name).unwrap(), format);

            let name = format!("plot.{}", ext.to_uppercase());
            assert_eq!(ImageFormat::from_path(&name).unwrap(), format);
        }

        assert_eq!(ImageFormat::from_path("plot.jpg").unwrap(), ImageFormat::Jpeg);
        assert!(ImageFormat::Svg.is_vector());
        assert!(!ImageFormat::Png.is_vector());

        let msg = ImageFormat::from_path("skewt.pdf").unwrap_err().to_string();
        assert!(msg.contains("skewt.pdf"));
        assert!(msg.contains("For PDF, write svg"));

        for bad in &["plot.pdf", "plot.eps", "plot", "plot.svg.txt"] {
            match ImageFormat::from_path(bad) {
                Err(RenderError::UnsupportedFormat(path)) => assert_eq!(path, Path::new(bad)),
                other => panic!("{} gave {:?}", bad, other),
            }
        }
    }
}
