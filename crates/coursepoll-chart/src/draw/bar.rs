use plotters::{coord::Shift, prelude::*};

use super::{DrawResult, LABEL_FONT, TITLE_FONT, palette_color, segment_label};
use crate::chart::BarChart;

fn value_upper_bound(bar: &BarChart) -> u64 {
    let max = bar.bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
    max + max / 10 + 1
}

fn bar_count(bar: &BarChart) -> i32 {
    i32::try_from(bar.bars.len()).unwrap_or(i32::MAX).max(1)
}

fn labels(bar: &BarChart) -> Vec<String> {
    bar.bars.iter().map(|(label, _)| label.clone()).collect()
}

fn indexed_counts(bar: &BarChart) -> impl Iterator<Item = (i32, u64)> + '_ {
    (0..).zip(bar.bars.iter().map(|(_, count)| *count))
}

pub(super) fn draw_vertical<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    bar: &BarChart,
) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    let labels = labels(bar);
    let mut chart = ChartBuilder::on(root)
        .caption(title, TITLE_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bar_count(bar)).into_segmented(), 0..value_upper_bound(bar))?;

    let formatter = |value: &SegmentValue<i32>| segment_label(&labels, value);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&formatter)
            .label_style(LABEL_FONT);
        if let Some(value_label) = &bar.value_label {
            mesh.y_desc(value_label.as_str());
        }
        mesh.draw()?;
    }

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(palette_color(0).filled())
            .margin(40)
            .data(indexed_counts(bar)),
    )?;
    Ok(())
}

pub(super) fn draw_horizontal<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    bar: &BarChart,
) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    let labels = labels(bar);
    let mut chart = ChartBuilder::on(root)
        .caption(title, TITLE_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(260)
        .build_cartesian_2d(0..value_upper_bound(bar), (0..bar_count(bar)).into_segmented())?;

    let formatter = |value: &SegmentValue<i32>| segment_label(&labels, value);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .y_labels(labels.len())
            .y_label_formatter(&formatter)
            .label_style(LABEL_FONT);
        if let Some(value_label) = &bar.value_label {
            mesh.x_desc(value_label.as_str());
        }
        mesh.draw()?;
    }

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(palette_color(0).filled())
            .margin(10)
            .data(indexed_counts(bar)),
    )?;
    Ok(())
}
