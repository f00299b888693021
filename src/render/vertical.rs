//! Profiles drawn against an inverted vertical axis.
use super::{
    render,
    style::{
        axis_range, check_series, decimals_for_span, format_inverted, pressure_coord,
        CAPTION_SIZE, FONT, LABEL_SIZE,
    },
    Plot, PlotText, RenderConfig, RenderResult,
};
use metfor::{HectoPascal, Quantity};
use plotters::{coord::Shift, prelude::*};
use std::path::{Path, PathBuf};

/// Render one quantity against pressure as a black line, with pressure increasing downward.
///
/// # Examples
///
/// ```rust,no_run
/// use sounding_thermo::{render_vertical_profile, PlotText, RenderConfig, ThermoProfiles};
/// # use sounding_thermo::doctest::make_test_sounding;
///
/// let snd = make_test_sounding();
/// let derived = ThermoProfiles::new(&snd).unwrap();
/// let theta: Vec<f64> = derived.potential_temperature.iter().map(|t| t.0).collect();
///
/// render_vertical_profile(
///     &RenderConfig::default(),
///     &theta,
///     snd.pressure_profile(),
///     PlotText::new("Potential temperature", "θ (K)", "Pressure (hPa)"),
///     "theta_profile.svg",
/// )
/// .unwrap();
/// ```
pub fn render_vertical_profile<F: AsRef<Path>>(
    config: &RenderConfig,
    values: &[f64],
    pressure: &[HectoPascal],
    text: PlotText,
    file_name: F,
) -> RenderResult<PathBuf> {
    check_series("values", &[pressure.len(), values.len()])?;

    let line = ProfileLine {
        label: None,
        color: BLACK,
        pnts: values
            .iter()
            .zip(pressure)
            .map(|(&v, p)| (v, pressure_coord(p.unpack())))
            .collect(),
    };

    render(config, &ProfilePlot::new(text, vec![line]), file_name.as_ref())
}

/// A line in chart coordinates, with the vertical coordinate already inverted.
pub(super) struct ProfileLine<'a> {
    pub(super) label: Option<&'a str>,
    pub(super) color: RGBColor,
    pub(super) pnts: Vec<(f64, f64)>,
}

/// A narrow figure with one or more lines against an inverted vertical axis.
pub(super) struct ProfilePlot<'a> {
    text: PlotText<'a>,
    lines: Vec<ProfileLine<'a>>,
}

impl<'a> ProfilePlot<'a> {
    pub(super) fn new(text: PlotText<'a>, lines: Vec<ProfileLine<'a>>) -> Self {
        ProfilePlot { text, lines }
    }

    fn all_points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.lines.iter().flat_map(|line| line.pnts.iter())
    }
}

impl<'a> Plot for ProfilePlot<'a> {
    fn size(&self) -> (u32, u32) {
        (400, 1000)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let x_range = axis_range("x", self.all_points().map(|&(x, _)| x))?;
        let y_range = axis_range("y", self.all_points().map(|&(_, y)| y))?;
        let decimals = decimals_for_span(y_range.end - y_range.start);

        let mut chart = ChartBuilder::on(root)
            .caption(self.text.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_labels(4)
            .y_labels(10)
            .x_desc(self.text.x_label)
            .y_desc(self.text.y_label)
            .y_label_formatter(&|y: &f64| format_inverted(*y, decimals))
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        for line in &self.lines {
            let style = line.color.stroke_width(2);
            let mut has_label = false;

            for run in line.pnts.split(|(x, y)| !(x.is_finite() && y.is_finite())) {
                if run.is_empty() {
                    continue;
                }

                let anno = chart.draw_series(LineSeries::new(run.iter().copied(), style))?;

                // One legend entry per line, however many pieces it was drawn in.
                if let (Some(label), false) = (line.label, has_label) {
                    anno.label(label)
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                    has_label = true;
                }
            }
        }

        if self.lines.iter().any(|line| line.label.is_some()) {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font((FONT, LABEL_SIZE))
                .draw()?;
        }

        Ok(())
    }
}
