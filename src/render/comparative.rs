//! Two series overlaid on a shared axis with a legend.
use super::{
    render,
    style::{check_series, pressure_coord, PURE_BLUE, PURE_RED},
    vertical::{ProfileLine, ProfilePlot},
    PlotText, RenderConfig, RenderResult, Series,
};
use metfor::{Celsius, HectoPascal, Quantity};
use std::path::{Path, PathBuf};

/// Render two quantities against pressure, the first in blue and the second in red, with a legend
/// holding their two labels. Pressure increases downward.
///
/// # Examples
///
/// ```rust,no_run
/// use sounding_thermo::{
///     render_comparative_profile, PlotText, RenderConfig, Series, ThermoProfiles,
/// };
/// # use sounding_thermo::doctest::make_test_sounding;
///
/// let snd = make_test_sounding();
/// let derived = ThermoProfiles::new(&snd).unwrap();
/// let theta: Vec<f64> = derived.potential_temperature.iter().map(|t| t.0).collect();
/// let theta_v: Vec<f64> = derived.virtual_potential_temperature.iter().map(|t| t.0).collect();
///
/// render_comparative_profile(
///     &RenderConfig::default(),
///     Series::new("θ", &theta),
///     Series::new("θv", &theta_v),
///     snd.pressure_profile(),
///     PlotText::new("Potential temperatures", "K", "Pressure (hPa)"),
///     "theta_compare.svg",
/// )
/// .unwrap();
/// ```
pub fn render_comparative_profile<F: AsRef<Path>>(
    config: &RenderConfig,
    first: Series,
    second: Series,
    pressure: &[HectoPascal],
    text: PlotText,
    file_name: F,
) -> RenderResult<PathBuf> {
    check_series(
        "values",
        &[pressure.len(), first.values.len(), second.values.len()],
    )?;

    let y: Vec<f64> = pressure.iter().map(|p| pressure_coord(p.unpack())).collect();

    let plot = ProfilePlot::new(
        text,
        vec![
            series_line(first, PURE_BLUE, |i, v| (v, y[i])),
            series_line(second, PURE_RED, |i, v| (v, y[i])),
        ],
    );

    render(config, &plot, file_name.as_ref())
}

/// Render two quantities against temperature on the horizontal axis, the first in blue and the
/// second in red, with a legend holding their two labels. The vertical axis increases downward.
pub fn render_comparative_vs_temperature<T, F>(
    config: &RenderConfig,
    first: Series,
    second: Series,
    temperature: &[T],
    text: PlotText,
    file_name: F,
) -> RenderResult<PathBuf>
where
    T: metfor::Temperature + Copy,
    Celsius: From<T>,
    F: AsRef<Path>,
{
    check_series(
        "values",
        &[temperature.len(), first.values.len(), second.values.len()],
    )?;

    let x: Vec<f64> = temperature
        .iter()
        .map(|&t| Celsius::from(t).unpack())
        .collect();

    let plot = ProfilePlot::new(
        text,
        vec![
            series_line(first, PURE_BLUE, |i, v| (x[i], -v)),
            series_line(second, PURE_RED, |i, v| (x[i], -v)),
        ],
    );

    render(config, &plot, file_name.as_ref())
}

fn series_line<'a, C>(
    series: Series<'a>,
    color: plotters::style::RGBColor,
    to_coords: C,
) -> ProfileLine<'a>
where
    C: Fn(usize, f64) -> (f64, f64),
{
    ProfileLine {
        label: Some(series.label),
        color,
        pnts: series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| to_coords(i, v))
            .collect(),
    }
}
