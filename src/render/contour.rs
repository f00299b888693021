//! Filled contours of a field over time and pressure.
use super::{
    render,
    style::{
        check_series, cool_warm, format_hours, format_pressure_coord, mismatched, pressure_coord,
        time_coords, CAPTION_SIZE, FONT, LABEL_SIZE,
    },
    Plot, PlotText, RenderConfig, RenderResult,
};
use crate::{
    error::RenderError,
    utility::{finite_bounds, padded_range},
};
use chrono::NaiveDateTime;
use metfor::{HectoPascal, Quantity};
use plotters::{coord::Shift, prelude::*};
use std::path::{Path, PathBuf};
use tracing::debug;

const NUM_LEVELS: usize = 10;
const COLORBAR_WIDTH: u32 = 170;
// Sub-cells per side of each grid cell.
const SUBDIVISIONS: usize = 8;

/// Render a field over time and pressure as filled contours with a color bar.
///
/// `field` is indexed by time first, so `field[i][j]` is the value at `times[i]` and
/// `pressure[j]`. The field is interpolated bilinearly between neighboring samples and shaded by
/// contour band. Grid cells with a non-finite corner are left blank. The pressure axis increases
/// downward.
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::{Duration, NaiveDate};
/// use metfor::HectoPascal;
/// use sounding_thermo::{render_time_pressure_contour, PlotText, RenderConfig};
///
/// let start = NaiveDate::from_ymd_opt(2014, 2, 14).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let times: Vec<_> = (0..4).map(|i| start + Duration::hours(6 * i)).collect();
/// let pressure: Vec<_> = vec![1000.0, 850.0, 700.0].into_iter().map(HectoPascal).collect();
/// let theta = vec![vec![300.0, 305.0, 312.0]; 4];
///
/// render_time_pressure_contour(
///     &RenderConfig::default(),
///     &times,
///     &pressure,
///     &theta,
///     PlotText::new("Potential temperature", "Time", "Pressure (hPa)"),
///     "θ (K)",
///     "theta.png",
/// )
/// .unwrap();
/// ```
pub fn render_time_pressure_contour<F: AsRef<Path>>(
    config: &RenderConfig,
    times: &[NaiveDateTime],
    pressure: &[HectoPascal],
    field: &[Vec<f64>],
    text: PlotText,
    colorbar_label: &str,
    file_name: F,
) -> RenderResult<PathBuf> {
    check_series("time", &[times.len(), field.len()])?;
    let num_levels = check_series("pressure", &[pressure.len()])?;
    if let Some(row) = field.iter().find(|row| row.len() != num_levels) {
        return Err(mismatched(num_levels, row.len()));
    }

    let (start, hours) = time_coords(times)?;
    let levels = ContourLevels::new(field.iter().flatten().copied(), NUM_LEVELS)?;

    let plot = ContourPlot {
        text,
        colorbar_label,
        start,
        hours,
        pressure: pressure.iter().map(|p| p.unpack()).collect(),
        field,
        levels,
    };

    render(config, &plot, file_name.as_ref())
}

/// Evenly spaced contour levels covering the finite values of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ContourLevels {
    lo: f64,
    hi: f64,
    num: usize,
}

impl ContourLevels {
    fn new<I: IntoIterator<Item = f64>>(vals: I, num: usize) -> RenderResult<Self> {
        let (lo, hi) = finite_bounds(vals).ok_or(RenderError::EmptySeries("field"))?;
        let (lo, hi) = if hi > lo {
            (lo, hi)
        } else {
            padded_range((lo, hi), 0.05)
        };

        Ok(ContourLevels {
            lo,
            hi,
            num: num.max(1),
        })
    }

    // Index of the band a value falls in.
    fn band(&self, val: f64) -> usize {
        let frac = (val - self.lo) / (self.hi - self.lo);
        let band = (frac * self.num as f64).floor();

        if band <= 0.0 {
            0
        } else {
            (band as usize).min(self.num - 1)
        }
    }

    fn band_bounds(&self, band: usize) -> (f64, f64) {
        let step = (self.hi - self.lo) / self.num as f64;
        (
            self.lo + step * band as f64,
            self.lo + step * (band + 1) as f64,
        )
    }

    fn band_color(&self, band: usize) -> RGBColor {
        cool_warm((band as f64 + 0.5) / self.num as f64)
    }
}

/// Grid nodes along one axis as `(coordinate, field index)`. A single sample is stretched into a
/// cell `half_width` to either side of it.
fn grid_nodes(centers: &[f64], half_width: f64) -> Vec<(f64, usize)> {
    match centers {
        [c] => vec![(c - half_width, 0), (c + half_width, 0)],
        _ => centers.iter().copied().zip(0..).collect(),
    }
}

fn node_range(nodes: &[(f64, usize)]) -> RenderResult<std::ops::Range<f64>> {
    let (lo, hi) = finite_bounds(nodes.iter().map(|&(c, _)| c))
        .ok_or(RenderError::EmptySeries("axis"))?;
    Ok(lo..hi)
}

/// Bilinear interpolation inside a cell, `corners[a][b]` is the value at x-corner `a` and
/// y-corner `b`.
fn bilinear(corners: [[f64; 2]; 2], fx: f64, fy: f64) -> f64 {
    let bottom = corners[0][0] + (corners[1][0] - corners[0][0]) * fx;
    let top = corners[0][1] + (corners[1][1] - corners[0][1]) * fx;

    bottom + (top - bottom) * fy
}

/// A shaded piece of the plot, corners in plot coordinates and the band it is filled with.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SubCell {
    corners: [(f64, f64); 2],
    band: usize,
}

/// Split every grid cell into `SUBDIVISIONS` x `SUBDIVISIONS` pieces and band the interpolated
/// value at the center of each piece.
fn sub_cells(
    x_nodes: &[(f64, usize)],
    y_nodes: &[(f64, usize)],
    field: &[Vec<f64>],
    levels: ContourLevels,
) -> Vec<SubCell> {
    let n = SUBDIVISIONS;
    let mut cells = Vec::with_capacity(
        x_nodes.len().saturating_sub(1) * y_nodes.len().saturating_sub(1) * n * n,
    );

    for (&(x0, i0), &(x1, i1)) in x_nodes.iter().zip(x_nodes.iter().skip(1)) {
        for (&(y0, j0), &(y1, j1)) in y_nodes.iter().zip(y_nodes.iter().skip(1)) {
            let corners = [[field[i0][j0], field[i0][j1]], [field[i1][j0], field[i1][j1]]];
            if !corners.iter().flatten().all(|v| v.is_finite()) {
                continue;
            }

            let dx = (x1 - x0) / n as f64;
            let dy = (y1 - y0) / n as f64;
            for a in 0..n {
                for b in 0..n {
                    let fx = (a as f64 + 0.5) / n as f64;
                    let fy = (b as f64 + 0.5) / n as f64;
                    let sx = x0 + dx * a as f64;
                    let sy = y0 + dy * b as f64;

                    cells.push(SubCell {
                        corners: [(sx, sy), (sx + dx, sy + dy)],
                        band: levels.band(bilinear(corners, fx, fy)),
                    });
                }
            }
        }
    }

    cells
}

struct ContourPlot<'a> {
    text: PlotText<'a>,
    colorbar_label: &'a str,
    start: NaiveDateTime,
    hours: Vec<f64>,
    pressure: Vec<f64>,
    field: &'a [Vec<f64>],
    levels: ContourLevels,
}

impl<'a> Plot for ContourPlot<'a> {
    fn size(&self) -> (u32, u32) {
        (1200, 1500)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let (width, _) = self.size();
        let (main, bar) = root.split_horizontally(width - COLORBAR_WIDTH);

        let x_nodes = grid_nodes(&self.hours, 0.5);
        let y_nodes: Vec<(f64, usize)> = grid_nodes(&self.pressure, 25.0)
            .into_iter()
            .map(|(p, j)| (pressure_coord(p), j))
            .collect();

        let mut chart = ChartBuilder::on(&main)
            .caption(self.text.title, (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(node_range(&x_nodes)?, node_range(&y_nodes)?)?;

        let start = self.start;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(6)
            .x_desc(self.text.x_label)
            .y_desc(self.text.y_label)
            .x_label_formatter(&|x: &f64| format_hours(start, *x))
            .y_label_formatter(&format_pressure_coord)
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        let levels = self.levels;
        let cells = sub_cells(&x_nodes, &y_nodes, self.field, levels);
        debug!(cells = cells.len(), "shading contour bands");
        chart.draw_series(cells.into_iter().map(|cell| {
            Rectangle::new(cell.corners, levels.band_color(cell.band).filled())
        }))?;

        let mut colorbar = ChartBuilder::on(&bar)
            .margin_top(50)
            .margin_bottom(80)
            .margin_left(10)
            .margin_right(10)
            .right_y_label_area_size(90)
            .build_cartesian_2d(0.0..1.0, levels.lo..levels.hi)?;

        colorbar
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .x_labels(0)
            .y_desc(self.colorbar_label)
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        colorbar.draw_series((0..levels.num).map(|band| {
            let (lo, hi) = levels.band_bounds(band);
            Rectangle::new([(0.0, lo), (1.0, hi)], levels.band_color(band).filled())
        }))?;

        Ok(())
    }
}
