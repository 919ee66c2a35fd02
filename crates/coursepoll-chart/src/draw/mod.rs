//! Backend-independent drawing of [`Chart`]s with `plotters`.

use plotters::{coord::Shift, prelude::*};

use crate::chart::{Chart, ChartBody};

mod bar;
mod pie;
mod scatter;

pub(crate) type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

const TITLE_FONT: (&str, f64) = ("sans-serif", 32.0);
const LABEL_FONT: (&str, f64) = ("sans-serif", 20.0);

const PALETTE: [RGBColor; 12] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
    RGBColor(255, 215, 0),
    RGBColor(95, 158, 160),
];

fn palette_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// Draws `chart` onto `root`, filling the whole area.
pub(crate) fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;
    match &chart.body {
        ChartBody::Pie(pie) => pie::draw(root, &chart.title, pie),
        ChartBody::Bar(bar) => bar::draw_vertical(root, &chart.title, bar),
        ChartBody::HorizontalBar(bar) => bar::draw_horizontal(root, &chart.title, bar),
        ChartBody::Scatter(scatter) => scatter::draw(root, &chart.title, scatter),
    }
}

fn area_size<DB>(area: &DrawingArea<DB, Shift>) -> (i32, i32)
where
    DB: DrawingBackend,
{
    let (width, height) = area.dim_in_pixel();
    (
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}

/// Looks up the category label for a segmented-axis position.
fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => usize::try_from(*idx)
            .ok()
            .and_then(|idx| labels.get(idx))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}
