//! Colors, fonts, and axis helpers shared by the renderers.
use super::RenderResult;
use crate::{
    error::{AnalysisError, RenderError},
    utility::{check_aligned, finite_bounds, padded_range},
};
use chrono::{Duration, NaiveDateTime};
use plotters::style::{register_font, FontStyle, RGBColor};

pub(crate) const FONT: &str = "sans-serif";
const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
pub(crate) const CAPTION_SIZE: u32 = 24;
pub(crate) const LABEL_SIZE: u32 = 16;

pub(crate) const ORANGE_RED: RGBColor = RGBColor(255, 69, 0);
pub(crate) const TAB_GREEN: RGBColor = RGBColor(44, 160, 44);
pub(crate) const DODGER_BLUE: RGBColor = RGBColor(30, 144, 255);
pub(crate) const PARCEL_MAGENTA: RGBColor = RGBColor(255, 0, 255);
pub(crate) const PURE_RED: RGBColor = RGBColor(255, 0, 0);
pub(crate) const PURE_BLUE: RGBColor = RGBColor(0, 0, 255);
pub(crate) const DEW_POINT_GREEN: RGBColor = RGBColor(0, 128, 0);

// Control points of a diverging blue to red map, evenly spaced on [0, 1].
const COOL_WARM: [(u8, u8, u8); 5] = [
    (59, 76, 192),
    (141, 176, 254),
    (221, 221, 221),
    (244, 154, 123),
    (180, 4, 38),
];

/// Make the bundled font available to every backend under the name `FONT`.
pub(crate) fn register_fonts() -> RenderResult<()> {
    register_font(FONT, FontStyle::Normal, FONT_DATA)
        .map_err(|_| RenderError::Drawing(format!("unable to load the {} font", FONT)))
}

/// Map `frac` in [0, 1] onto the cool-warm color map, values outside are clamped.
pub(crate) fn cool_warm(frac: f64) -> RGBColor {
    let frac = if frac.is_finite() {
        frac.max(0.0).min(1.0)
    } else {
        0.5
    };

    let scaled = frac * (COOL_WARM.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(COOL_WARM.len() - 2);
    let w = scaled - idx as f64;

    let (r0, g0, b0) = COOL_WARM[idx];
    let (r1, g1, b1) = COOL_WARM[idx + 1];
    let mix = |a: u8, b: u8| (f64::from(a) + w * (f64::from(b) - f64::from(a))).round() as u8;

    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Hours since `start`, the coordinate used for time axes.
pub(crate) fn hours_since(start: NaiveDateTime, time: NaiveDateTime) -> f64 {
    (time - start).num_seconds() as f64 / 3600.0
}

/// Label for a time axis coordinate.
pub(crate) fn format_hours(start: NaiveDateTime, hours: f64) -> String {
    let time = start + Duration::seconds((hours * 3600.0).round() as i64);
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Time coordinates for a series along with the first time.
pub(crate) fn time_coords(times: &[NaiveDateTime]) -> RenderResult<(NaiveDateTime, Vec<f64>)> {
    let start = *times.first().ok_or(RenderError::EmptySeries("time"))?;
    let hours = times.iter().map(|&t| hours_since(start, t)).collect();

    Ok((start, hours))
}

/// Check that every series is aligned and not empty.
pub(crate) fn check_series(name: &'static str, lengths: &[usize]) -> RenderResult<usize> {
    match check_aligned(lengths)? {
        0 => Err(RenderError::EmptySeries(name)),
        len => Ok(len),
    }
}

/// Padded axis range for some values, or an error if none of them are finite.
pub(crate) fn axis_range<I>(name: &'static str, vals: I) -> RenderResult<std::ops::Range<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = finite_bounds(vals).ok_or(RenderError::EmptySeries(name))?;
    let (lo, hi) = padded_range((lo, hi), 0.05);

    Ok(lo..hi)
}

/// Split a polyline into the runs of consecutive points that are inside a box.
///
/// Non-finite points end a run as well.
pub(crate) fn clipped_runs<I>(
    points: I,
    x_range: &std::ops::Range<f64>,
    y_range: &std::ops::Range<f64>,
) -> Vec<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let inside = |&(x, y): &(f64, f64)| {
        x >= x_range.start && x <= x_range.end && y >= y_range.start && y <= y_range.end
    };

    let mut runs: Vec<Vec<(f64, f64)>> = vec![];
    let mut current: Vec<(f64, f64)> = vec![];

    for pnt in points {
        if inside(&pnt) {
            current.push(pnt);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }

    runs.retain(|run| run.len() > 1);
    runs
}

/// Pressure axis coordinate for the linear pressure plots, so pressure increases downward.
#[inline]
pub(crate) fn pressure_coord(p: f64) -> f64 {
    -p
}

/// Turn a pressure axis coordinate back into a label.
pub(crate) fn format_pressure_coord(y: &f64) -> String {
    format!("{:.0}", -y)
}

/// Number of decimals for axis labels covering `span`, about three significant figures.
pub(crate) fn decimals_for_span(span: f64) -> usize {
    if !(span.is_finite() && span > 0.0) {
        return 2;
    }

    let magnitude = span.log10().floor() as i32;
    (2 - magnitude).max(0) as usize
}

/// Label for a coordinate on an inverted axis.
pub(crate) fn format_inverted(y: f64, decimals: usize) -> String {
    // Adding zero turns -0.0 into 0.0
    format!("{:.*}", decimals, -y + 0.0)
}

/// Error for profiles that are not aligned.
pub(crate) fn mismatched(expected: usize, found: usize) -> RenderError {
    RenderError::Analysis(AnalysisError::MismatchedProfiles { expected, found })
}
