//! A single scalar series over time.
use super::{
    render,
    style::{axis_range, check_series, format_hours, time_coords, CAPTION_SIZE, FONT, LABEL_SIZE},
    Plot, PlotText, RenderConfig, RenderResult,
};
use chrono::NaiveDateTime;
use plotters::{coord::Shift, prelude::*};
use std::path::{Path, PathBuf};

/// Render one series over time as a black line.
///
/// Non-finite values break the line.
pub fn render_time_series<F: AsRef<Path>>(
    config: &RenderConfig,
    times: &[NaiveDateTime],
    values: &[f64],
    text: PlotText,
    file_name: F,
) -> RenderResult<PathBuf> {
    check_series("values", &[times.len(), values.len()])?;
    let (start, hours) = time_coords(times)?;

    let plot = TimeSeriesPlot {
        text,
        start,
        hours,
        values,
    };

    render(config, &plot, file_name.as_ref())
}

struct TimeSeriesPlot<'a> {
    text: PlotText<'a>,
    start: NaiveDateTime,
    hours: Vec<f64>,
    values: &'a [f64],
}

impl<'a> Plot for TimeSeriesPlot<'a> {
    fn size(&self) -> (u32, u32) {
        (1000, 600)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> RenderResult<()> {
        let x_range = axis_range("time", self.hours.iter().copied())?;
        let y_range = axis_range("values", self.values.iter().copied())?;

        let mut chart = ChartBuilder::on(root)
            .caption(self.text.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        let start = self.start;
        chart
            .configure_mesh()
            .x_labels(5)
            .x_desc(self.text.x_label)
            .y_desc(self.text.y_label)
            .x_label_formatter(&|x: &f64| format_hours(start, *x))
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        let pnts = self.hours.iter().copied().zip(self.values.iter().copied());
        for run in pnts
            .collect::<Vec<_>>()
            .split(|(_, v)| !v.is_finite())
            .filter(|run| !run.is_empty())
        {
            chart.draw_series(LineSeries::new(run.iter().copied(), &BLACK))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::RenderError;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_time_series_svg() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new(dir.path());

        let start = NaiveDate::from_ymd_opt(2014, 2, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let times: Vec<_> = (0..8).map(|i| start + Duration::hours(3 * i)).collect();
        let precip = vec![0.0, 0.0, 1.2, 4.5, std::f64::NAN, 0.3, 0.0, 0.0];

        let path = render_time_series(
            &config,
            &times,
            &precip,
            PlotText::new("Precipitation", "Time", "mm"),
            "precip.svg",
        )
        .unwrap();

        assert_eq!(path, dir.path().join("precip.svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Precipitation"));
        assert!(svg.contains("2014-02-14"));
    }

    #[test]
    fn test_time_series_mismatched() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new(dir.path());

        let start = NaiveDate::from_ymd_opt(2014, 2, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert!(matches!(
            render_time_series(&config, &[start], &[1.0, 2.0], PlotText::default(), "p.svg"),
            Err(RenderError::Analysis(_))
        ));
        assert!(matches!(
            render_time_series(&config, &[], &[], PlotText::default(), "p.svg"),
            Err(RenderError::EmptySeries("values"))
        ));
    }
}
