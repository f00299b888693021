//! Skew-T log-P diagram with a surface parcel and its CAPE and CIN.
use super::{
    render,
    style::{
        clipped_runs, CAPTION_SIZE, DEW_POINT_GREEN, DODGER_BLUE, FONT, LABEL_SIZE, ORANGE_RED,
        PARCEL_MAGENTA, PURE_RED, TAB_GREEN,
    },
    Plot, RenderConfig, RenderResult,
};
use crate::{
    error::RenderError,
    parcel::{dew_point_profile, surface_parcel},
    parcel_profile::{lift_parcel, EnergyKind, EnergyLayer, ParcelAscentAnalysis},
    sounding::Sounding,
};
use metfor::{self, Celsius, HectoPascal, Kelvin, Quantity};
use optional::Optioned;
use plotters::{
    coord::{
        ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter},
        types::RangedCoordf64,
        CoordTranslate, Shift,
    },
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        IntoTextStyle,
    },
};
use std::{
    ops::Range,
    path::{Path, PathBuf},
};
use tracing::warn;

const T_RANGE: Range<f64> = -40.0..50.0;
const P_BOTTOM: f64 = 1050.0;
const P_TOP: f64 = 100.0;
const ISOBARS: [f64; 10] = [1000.0, 925.0, 850.0, 700.0, 500.0, 400.0, 300.0, 250.0, 200.0, 100.0];
const MIXING_RATIOS: [f64; 10] = [
    0.0004, 0.001, 0.002, 0.004, 0.007, 0.01, 0.016, 0.020, 0.024, 0.032,
];
const TITLE_HEIGHT: u32 = 50;

/// Render a Skew-T log-P diagram of a sounding.
///
/// A parcel starting at the surface temperature and pressure, with the dew point of the lowest
/// level of the sounding, is lifted through the sounding. The diagram shows dry adiabats, moist
/// adiabats, and mixing ratio lines in the background; the temperature, dew point, and parcel
/// curves; the LCL; and the CAPE and CIN areas shaded. The title goes in the top right corner.
///
/// # Examples
///
/// ```rust,no_run
/// use metfor::{Celsius, HectoPascal};
/// use sounding_thermo::{render_skew_t, RenderConfig};
/// # use sounding_thermo::doctest::make_test_sounding;
///
/// let snd = make_test_sounding();
///
/// render_skew_t(
///     &RenderConfig::default(),
///     &snd,
///     Celsius(27.0),
///     HectoPascal(1005.0),
///     "2014-02-14 20hr",
///     "skewt_2014021420.png",
/// )
/// .unwrap();
/// ```
pub fn render_skew_t<T, P, F>(
    config: &RenderConfig,
    snd: &Sounding,
    surface_temperature: T,
    surface_pressure: P,
    title: &str,
    file_name: F,
) -> RenderResult<PathBuf>
where
    T: metfor::Temperature,
    Celsius: From<T>,
    P: metfor::Pressure,
    HectoPascal: From<P>,
    F: AsRef<Path>,
{
    if snd.num_levels()? == 0 {
        return Err(RenderError::EmptySeries("sounding"));
    }

    let dew_point = dew_point_profile(snd)?;
    let missing = dew_point.iter().filter(|dp| dp.is_none()).count();
    if missing > 0 {
        warn!(missing, "levels without a dew point are left out of the dew point curve");
    }

    let parcel = surface_parcel(snd, surface_temperature, surface_pressure)?;
    let analysis = lift_parcel(parcel, snd)?;

    let plot = SkewTPlot {
        title,
        snd,
        dew_point,
        analysis,
    };

    render(config, &plot, file_name.as_ref())
}

/// Maps temperature and pressure into the skewed chart coordinates.
#[derive(Debug, Clone, Copy)]
struct SkewCoords {
    skew: f64,
}

impl SkewCoords {
    /// Skew so isotherms are drawn at 45 degrees on a plotting area of `width` by `height`
    /// pixels.
    fn for_area(width: u32, height: u32) -> Self {
        let t_span = T_RANGE.end - T_RANGE.start;
        let y_span = y_coord(P_TOP) - y_coord(P_BOTTOM);

        SkewCoords {
            skew: t_span * f64::from(height) / (f64::from(width.max(1)) * y_span),
        }
    }

    fn point(&self, t: f64, p: f64) -> (f64, f64) {
        let y = y_coord(p);
        (t + self.skew * (y - y_coord(P_BOTTOM)), y)
    }

    fn point_celsius(&self, t: Celsius, p: HectoPascal) -> (f64, f64) {
        self.point(t.unpack(), p.unpack())
    }
}

/// Vertical chart coordinate, pressure decreases upward on a log scale.
fn y_coord(p: f64) -> f64 {
    -p.ln()
}

/// Pressures from the bottom of the chart up to `top`, every `step` hPa.
fn pressure_steps(bottom: f64, top: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((bottom - top) / step).floor() as usize;
    (0..=n).map(move |i| bottom - step * i as f64)
}

/// Draw the parts of a polyline that fall inside the chart.
fn draw_clipped<DB, CT, I>(
    chart: &mut ChartContext<'_, DB, CT>,
    pnts: I,
    style: ShapeStyle,
) -> RenderResult<()>
where
    DB: DrawingBackend,
    CT: CoordTranslate<From = (f64, f64)>,
    I: IntoIterator<Item = (f64, f64)>,
{
    for run in clipped_runs(pnts, &x_range(), &y_range()) {
        chart.draw_series(LineSeries::new(run, style))?;
    }

    Ok(())
}

fn x_range() -> Range<f64> {
    T_RANGE
}

fn y_range() -> Range<f64> {
    y_coord(P_BOTTOM)..y_coord(P_TOP)
}

/// The log pressure axis, with ticks and grid lines only on the standard isobars.
struct IsobarAxis(RangedCoordf64);

impl IsobarAxis {
    fn new() -> Self {
        IsobarAxis(y_range().into())
    }
}

impl Ranged for IsobarAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // No light grid lines between the isobars
        if hint.weight().allow_light_points() {
            return vec![];
        }

        ISOBARS.iter().map(|&p| y_coord(p)).collect()
    }

    fn range(&self) -> Range<f64> {
        self.0.range()
    }
}

impl ValueFormatter<f64> for IsobarAxis {
    fn format(value: &f64) -> String {
        format!("{:.0}", (-value).exp())
    }
}

struct SkewTPlot<'a> {
    title: &'a str,
    snd: &'a Sounding,
    dew_point: Vec<Optioned<Celsius>>,
    analysis: ParcelAscentAnalysis,
}

impl<'a> SkewTPlot<'a> {
    fn energy_polygon(coords: SkewCoords, layer: &EnergyLayer) -> Vec<(f64, f64)> {
        let (p0, p1) = layer.pressure;
        let (pt0, pt1) = layer.parcel_t;
        let (et0, et1) = layer.environment_t;

        vec![
            coords.point_celsius(et0, p0),
            coords.point_celsius(pt0, p0),
            coords.point_celsius(pt1, p1),
            coords.point_celsius(et1, p1),
        ]
    }
}

impl<'a> Plot for SkewTPlot<'a> {
    fn size(&self) -> (u32, u32) {
        (827, 1400)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let (title_area, plot_area) = root.split_vertically(TITLE_HEIGHT);

        let (width, _) = title_area.dim_in_pixel();
        let title_style = (FONT, CAPTION_SIZE)
            .into_text_style(&title_area)
            .pos(Pos::new(HPos::Right, VPos::Center));
        title_area.draw(&Text::new(
            self.title.to_owned(),
            (width as i32 - 20, TITLE_HEIGHT as i32 / 2),
            title_style,
        ))?;

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range(), IsobarAxis::new())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(10)
            .x_desc("Temperature (°C)")
            .y_desc("Pressure (hPa)")
            .x_label_formatter(&|t: &f64| format!("{:.0}", t))
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        let (area_width, area_height) = chart.plotting_area().dim_in_pixel();
        let coords = SkewCoords::for_area(area_width, area_height);

        // Isotherms
        let isotherm_style = RGBColor(160, 160, 160).mix(0.6).stroke_width(1);
        for t in (-100..=50).step_by(10) {
            let t = f64::from(t);
            let pnts = pressure_steps(P_BOTTOM, P_TOP, 10.0).map(|p| coords.point(t, p));
            draw_clipped(&mut chart, pnts, isotherm_style)?;
        }

        // Dry adiabats
        let dry_style = ORANGE_RED.mix(0.6).stroke_width(1);
        for theta in (250..=450).step_by(10) {
            let theta = Kelvin(f64::from(theta));
            let pnts = pressure_steps(P_BOTTOM, P_TOP, 10.0).map(|p| {
                let t = Celsius::from(metfor::temperature_from_pot_temp(theta, HectoPascal(p)));
                coords.point(t.unpack(), p)
            });
            draw_clipped(&mut chart, pnts, dry_style)?;
        }

        // Moist adiabats, labelled by their temperature at 1000 hPa
        let moist_style = TAB_GREEN.mix(0.6).stroke_width(1);
        for t0 in (-10..=35).step_by(5) {
            let t0 = Celsius(f64::from(t0));
            let theta_e = match metfor::equiv_pot_temperature(t0, t0, HectoPascal(1000.0)) {
                Some(theta_e) => theta_e,
                None => continue,
            };

            let pnts = pressure_steps(P_BOTTOM, 200.0, 10.0).filter_map(|p| {
                metfor::temperature_from_equiv_pot_temp_saturated_and_pressure(
                    HectoPascal(p),
                    theta_e,
                )
                .map(|t| coords.point(t.unpack(), p))
            });
            draw_clipped(&mut chart, pnts, moist_style)?;
        }

        // Mixing ratio lines
        let mixing_style = DODGER_BLUE.mix(0.6).stroke_width(1);
        for &mw in MIXING_RATIOS.iter() {
            let pnts = pressure_steps(1000.0, 600.0, 10.0).filter_map(|p| {
                metfor::dew_point_from_p_and_mw(HectoPascal(p), mw)
                    .map(|dp| coords.point(dp.unpack(), p))
            });
            draw_clipped(&mut chart, pnts, mixing_style)?;
        }

        // CAPE and CIN
        let inside = |&(x, y): &(f64, f64)| {
            x_range().contains(&x) && y >= y_range().start && y <= y_range().end
        };
        for layer in self.analysis.energy_layers() {
            let polygon = Self::energy_polygon(coords, layer);
            if !polygon.iter().all(inside) {
                continue;
            }

            let fill = match layer.kind {
                EnergyKind::Cape => PURE_RED.mix(0.3).filled(),
                EnergyKind::Cin => DEW_POINT_GREEN.mix(0.3).filled(),
            };
            chart.draw_series(std::iter::once(Polygon::new(polygon, fill)))?;
        }

        // Temperature
        let temperature = self
            .snd
            .pressure_profile()
            .iter()
            .zip(self.snd.temperature_profile())
            .map(|(&p, &t)| coords.point_celsius(t, p));
        draw_clipped(&mut chart, temperature, PURE_RED.stroke_width(2))?;

        // Dew point, a missing value ends a piece of the line
        let dew_point = self
            .snd
            .pressure_profile()
            .iter()
            .zip(self.dew_point.iter())
            .map(|(&p, dp)| match dp.into_option() {
                Some(dp) => coords.point_celsius(dp, p),
                None => (std::f64::NAN, std::f64::NAN),
            });
        draw_clipped(&mut chart, dew_point, DEW_POINT_GREEN.stroke_width(2))?;

        // Parcel
        let profile = self.analysis.profile();
        let parcel = profile
            .pressure
            .iter()
            .zip(profile.parcel_t.iter())
            .map(|(&p, &t)| coords.point_celsius(t, p));
        draw_clipped(&mut chart, parcel, PARCEL_MAGENTA.stroke_width(2))?;

        // LCL
        let lcl = coords.point_celsius(
            self.analysis.lcl_temperature(),
            self.analysis.lcl_pressure(),
        );
        if inside(&lcl) {
            chart.draw_series(std::iter::once(Circle::new(lcl, 5, BLACK.filled())))?;
        }

        Ok(())
    }
}
