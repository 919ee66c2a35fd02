//! Chart descriptions and image rendering for the coursepoll report.
//!
//! The report pipeline shapes its results into [`Chart`] values (pie, bar,
//! horizontal bar, and scatter-with-trend charts) and hands them one by one to
//! a [`ChartSink`]. [`ImageRenderer`] is the production sink: it draws each
//! chart with `plotters` and writes a PNG or SVG file named after the chart key.
//!
//! # Examples
//!
//! Collecting charts in memory instead of drawing them:
//!
//! ```
//! use coursepoll_chart::{BarChart, Chart, ChartBody, ChartKind, ChartSink};
//!
//! let chart = Chart::new(
//!     "best_subjects",
//!     "Best subjects",
//!     ChartBody::Bar(BarChart {
//!         value_label: None,
//!         bars: vec![("Math".into(), 3), ("Physics".into(), 1)],
//!     }),
//! );
//!
//! let mut sink = Vec::new();
//! sink.render(&chart).unwrap();
//! assert_eq!(sink[0].kind(), ChartKind::Bar);
//! ```

mod chart;
mod draw;
mod error;
mod image;

pub use self::{
    chart::{BarChart, Chart, ChartBody, ChartKind, PieChart, ScatterChart, ScatterPoint},
    error::RenderError,
    image::{ImageFormat, ImageRenderer},
};

/// Destination for rendered charts.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError>;
}

/// Keeps charts in memory, in rendering order.
impl ChartSink for Vec<Chart> {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
        self.push(chart.clone());
        Ok(())
    }
}

impl<S> ChartSink for &mut S
where
    S: ChartSink + ?Sized,
{
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
        (**self).render(chart)
    }
}
