/// A fully shaped chart, ready to be handed to a [`ChartSink`](crate::ChartSink).
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Stable file-name stem; unique per chart within one report.
    pub key: String,
    /// Display title drawn above the chart.
    pub title: String,
    pub body: ChartBody,
}

impl Chart {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>, body: ChartBody) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.body.kind()
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum ChartBody {
    Pie(PieChart),
    Bar(BarChart),
    HorizontalBar(BarChart),
    Scatter(ScatterChart),
}

impl ChartBody {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartBody::Pie(_) => ChartKind::Pie,
            ChartBody::Bar(_) => ChartKind::Bar,
            ChartBody::HorizontalBar(_) => ChartKind::HorizontalBar,
            ChartBody::Scatter(_) => ChartKind::Scatter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ChartKind {
    #[display("pie")]
    Pie,
    #[display("bar")]
    Bar,
    #[display("horizontal bar")]
    HorizontalBar,
    #[display("scatter")]
    Scatter,
}

/// Pie chart of category counts; wedges are labeled with their percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub legend_title: String,
    /// `(category, count)` pairs in drawing order.
    pub slices: Vec<(String, u64)>,
}

impl PieChart {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|(_, count)| count).sum()
    }

    /// Percentage of the total for each slice, in drawing order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|(_, count)| {
                if total == 0 {
                    0.0
                } else {
                    *count as f64 * 100.0 / total as f64
                }
            })
            .collect()
    }
}

/// Bar chart of counts, used for both vertical and horizontal bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Description of the count axis, if any.
    pub value_label: Option<String>,
    /// `(category, count)` pairs in drawing order.
    pub bars: Vec<(String, u64)>,
}

/// Labeled points with an overlaid trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    /// Trend line vertices, one per point, in the same x order.
    pub trend: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}
