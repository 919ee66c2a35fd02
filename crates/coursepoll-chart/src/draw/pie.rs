use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use super::{DrawResult, LABEL_FONT, TITLE_FONT, area_size, palette_color};
use crate::chart::PieChart;

const ARC_STEPS_PER_RADIAN: f64 = 30.0;
const RADIUS_RATIO: f64 = 0.38;

/// Wedges below this percentage get their label outside the pie.
const SMALL_WEDGE_PERCENT: f64 = 5.0;
const INNER_LABEL_RADIUS: f64 = 0.65;
const OUTER_LABEL_RADIUS: f64 = 1.1;
/// Extra radial offset for every other label in a run of outside labels
const OUTER_LABEL_STAGGER: f64 = 0.1;

/// One non-empty wedge, angles in radians (screen coordinates)
#[derive(Debug, Clone, PartialEq)]
struct Wedge {
    slice: usize,
    start_angle: f64,
    sweep: f64,
    percent: f64,
}

/// Splits the pie into wedges starting at 12 o'clock and going clockwise.
fn wedges(pie: &PieChart) -> Vec<Wedge> {
    // screen y grows downwards, so increasing angles go clockwise
    let mut start_angle = -FRAC_PI_2;
    let mut wedges = Vec::new();
    for (slice, ((_, count), percent)) in pie.slices.iter().zip(pie.percentages()).enumerate() {
        if *count == 0 {
            continue;
        }
        let sweep = percent / 100.0 * TAU;
        wedges.push(Wedge {
            slice,
            start_angle,
            sweep,
            percent,
        });
        start_angle += sweep;
    }
    wedges
}

#[derive(Debug, Clone, PartialEq)]
struct WedgeLabel {
    text: String,
    /// Label anchor, relative to the pie center
    offset: (i32, i32),
    outside: bool,
}

/// Places a percentage label for every wedge.
///
/// Small wedges are labeled outside the rim; consecutive outside labels are
/// staggered radially so neighbours do not overlap.
#[expect(clippy::cast_possible_truncation)]
fn wedge_labels(wedges: &[Wedge], radius: f64) -> Vec<WedgeLabel> {
    let mut outside_run = 0;
    wedges
        .iter()
        .map(|wedge| {
            let outside = wedge.percent < SMALL_WEDGE_PERCENT;
            let ratio = if outside {
                let stagger = if outside_run % 2 == 0 {
                    0.0
                } else {
                    OUTER_LABEL_STAGGER
                };
                outside_run += 1;
                OUTER_LABEL_RADIUS + stagger
            } else {
                outside_run = 0;
                INNER_LABEL_RADIUS
            };
            let mid_angle = wedge.start_angle + wedge.sweep / 2.0;
            WedgeLabel {
                text: format!("{:.1}%", wedge.percent),
                offset: (
                    (radius * ratio * mid_angle.cos()) as i32,
                    (radius * ratio * mid_angle.sin()) as i32,
                ),
                outside,
            }
        })
        .collect()
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(super) fn draw<DB>(root: &DrawingArea<DB, Shift>, title: &str, pie: &PieChart) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    let area = root.titled(title, TITLE_FONT)?;
    let (width, height) = area_size(&area);
    let (pie_area, legend_area) = area.split_horizontally(width * 2 / 3);

    let (pie_width, _) = area_size(&pie_area);
    let center = (pie_width / 2, height / 2);
    let radius = f64::from(pie_width.min(height)) * RADIUS_RATIO;

    let wedges = wedges(pie);
    for wedge in &wedges {
        let steps = (wedge.sweep * ARC_STEPS_PER_RADIAN).ceil().max(1.0) as usize;

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let angle = wedge.start_angle + wedge.sweep * step as f64 / steps as f64;
            points.push((
                center.0 + (radius * angle.cos()) as i32,
                center.1 + (radius * angle.sin()) as i32,
            ));
        }

        let color = palette_color(wedge.slice);
        pie_area.draw(&Polygon::new(points.clone(), color.filled()))?;
        pie_area.draw(&PathElement::new(points, WHITE.stroke_width(1)))?;
    }

    for label in wedge_labels(&wedges, radius) {
        let color = if label.outside { BLACK } else { WHITE };
        let style = LABEL_FONT
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        pie_area.draw(&Text::new(
            label.text,
            (center.0 + label.offset.0, center.1 + label.offset.1),
            style,
        ))?;
    }

    draw_legend(&legend_area, pie, height)
}

fn draw_legend<DB>(area: &DrawingArea<DB, Shift>, pie: &PieChart, height: i32) -> DrawResult<DB>
where
    DB: DrawingBackend,
{
    const ROW_HEIGHT: i32 = 30;

    let rows = i32::try_from(pie.slices.len()).unwrap_or(i32::MAX);
    let top = height.saturating_sub(rows.saturating_add(1).saturating_mul(ROW_HEIGHT)).max(0) / 2;

    area.draw(&Text::new(
        pie.legend_title.as_str(),
        (10, top),
        LABEL_FONT.into_font().color(&BLACK),
    ))?;
    for (idx, (category, _)) in pie.slices.iter().enumerate() {
        let row = i32::try_from(idx + 1).unwrap_or(i32::MAX);
        let y = top.saturating_add(row.saturating_mul(ROW_HEIGHT));
        area.draw(&Rectangle::new(
            [(10, y), (30, y + 20)],
            palette_color(idx).filled(),
        ))?;
        area.draw(&Text::new(
            category.as_str(),
            (40, y),
            ("sans-serif", 18.0).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie(counts: &[u64]) -> PieChart {
        PieChart {
            legend_title: "legend".into(),
            slices: counts
                .iter()
                .enumerate()
                .map(|(idx, count)| (format!("answer {idx}"), *count))
                .collect(),
        }
    }

    #[test]
    fn test_wedges_skip_empty_slices() {
        let wedges = wedges(&pie(&[3, 0, 1]));
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].slice, 0);
        assert_eq!(wedges[1].slice, 2);
        assert_eq!(wedges[0].start_angle, -FRAC_PI_2);
        let expected = wedges[0].start_angle + wedges[0].sweep;
        assert!((wedges[1].start_angle - expected).abs() < 1e-12);
    }

    #[test]
    fn test_every_wedge_is_labeled() {
        let wedges = wedges(&pie(&[39, 1]));
        let labels = wedge_labels(&wedges, 100.0);
        let texts = labels.iter().map(|l| l.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, ["97.5%", "2.5%"]);
        assert!(!labels[0].outside);
        assert!(labels[1].outside);
    }

    #[test]
    fn test_small_labels_sit_outside_the_rim() {
        let wedges = wedges(&pie(&[96, 1, 1, 1, 1]));
        let labels = wedge_labels(&wedges, 100.0);
        assert_eq!(labels.len(), 5);

        let distance =
            |label: &WedgeLabel| f64::from(label.offset.0).hypot(f64::from(label.offset.1));
        assert!(distance(&labels[0]) < 100.0);
        for label in &labels[1..] {
            assert!(label.outside);
            assert!(distance(label) > 100.0);
        }
        // neighbouring outside labels are staggered
        assert!((distance(&labels[1]) - distance(&labels[2])).abs() > 5.0);
        assert!((distance(&labels[2]) - distance(&labels[3])).abs() > 5.0);
    }
}
