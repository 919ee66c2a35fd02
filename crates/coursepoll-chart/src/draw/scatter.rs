use std::ops::Range;

use plotters::{coord::Shift, prelude::*};

use super::{DrawResult, LABEL_FONT, TITLE_FONT, palette_color};
use crate::chart::ScatterChart;

const POINT_RADIUS: i32 = 6;

fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.1).max(0.5);
    (min - pad)..(max + pad)
}

pub(super) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    scatter: &ScatterChart,
) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    let x_range = axis_range(
        scatter
            .points
            .iter()
            .map(|p| p.x)
            .chain(scatter.trend.iter().map(|(x, _)| *x)),
    );
    let y_range = axis_range(
        scatter
            .points
            .iter()
            .map(|p| p.y)
            .chain(scatter.trend.iter().map(|(_, y)| *y)),
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, TITLE_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    // x positions are ranks, so only integer ticks carry meaning
    let x_formatter = |x: &f64| {
        if (x - x.round()).abs() < 1e-6 {
            format!("{x:.0}")
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .x_desc(scatter.x_label.as_str())
        .y_desc(scatter.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(scatter.points.iter().map(|point| {
        EmptyElement::at((point.x, point.y))
            + Circle::new((0, 0), POINT_RADIUS, palette_color(0).filled())
            + Text::new(
                point.label.clone(),
                (10, -10),
                ("sans-serif", 18.0).into_font(),
            )
    }))?;

    chart.draw_series(LineSeries::new(
        scatter.trend.iter().copied(),
        palette_color(3).stroke_width(2),
    ))?;
    Ok(())
}
