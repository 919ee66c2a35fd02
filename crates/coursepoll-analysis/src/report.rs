//! Report assembly: from answer series to charts
//!
//! [`Report::build`] decides how each question is charted and computes the
//! platform summaries; [`Report::render`] hands the resulting charts to a
//! [`ChartSink`] in order, stopping at the first failure.
//!
//! Chart routing by question kind:
//!
//! | Question kind | Chart |
//! |---------------|-------|
//! | single choice, free text | pie chart of answer frequencies |
//! | multi choice | bar chart of choice frequencies, fixed title |
//! | platform opinion | none per question; see the platform charts below |
//!
//! The platform-opinion block yields three charts: a horizontal bar chart of
//! positive-opinion counts and two scatter charts (median score, positive
//! share) with a least-squares trend line.

use coursepoll_chart::{
    BarChart, Chart, ChartBody, ChartSink, PieChart, RenderError, ScatterChart, ScatterPoint,
};
use coursepoll_stats::{
    frequency::FrequencyTable,
    regression::{LinearFit, RegressionError},
};

use crate::{
    extract::{AnswerSeries, SurveyAnswers},
    schema::QuestionKind,
    sentiment::{OpinionScale, PlatformSummary, SentimentError, ShareDenominator},
    summary::{QuestionSummary, ReportSummary},
};

pub const PIE_LEGEND_TITLE: &str = "Варианты ответа";
pub const BEST_SUBJECTS_TITLE: &str = "Лучшие предметы для изучения онлайн";

pub const POPULARITY_KEY: &str = "platform_popularity";
pub const POPULARITY_TITLE: &str = "Популярность разных платформ";
pub const POPULARITY_AXIS: &str = "Количество положительных отзывов";

pub const MEDIAN_KEY: &str = "platform_median_score";
pub const MEDIAN_TITLE: &str = "Медианная оценка платформ";
pub const MEDIAN_AXIS: &str = "Медианная оценка";

pub const SHARE_KEY: &str = "platform_positive_share";
pub const SHARE_TITLE: &str = "Доля положительных отзывов";
pub const SHARE_AXIS: &str = "Доля положительных отзывов";

const RANK_AXIS: &str = "Место платформы";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("{source}")]
    Sentiment { source: SentimentError },
    #[display("cannot fit trend line for chart '{chart}': {source}")]
    DegenerateFit {
        chart: &'static str,
        source: RegressionError,
    },
}

impl From<SentimentError> for ReportError {
    fn from(source: SentimentError) -> Self {
        ReportError::Sentiment { source }
    }
}

/// How one question is charted
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ChartRoute {
    Pie,
    Bar,
    /// Charted together with the rest of the platform-opinion block
    PlatformBlock,
}

impl ChartRoute {
    #[must_use]
    pub fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleChoice | QuestionKind::FreeText => ChartRoute::Pie,
            QuestionKind::MultiChoice => ChartRoute::Bar,
            QuestionKind::PlatformOpinion => ChartRoute::PlatformBlock,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub scale: OpinionScale,
    pub share_denominator: ShareDenominator,
}

/// Charts and summaries derived from one survey
#[derive(Debug, Clone)]
pub struct Report {
    pub charts: Vec<Chart>,
    pub questions: Vec<QuestionSummary>,
    pub platforms: Vec<PlatformSummary>,
    pub respondent_count: usize,
}

impl Report {
    pub fn build(answers: &SurveyAnswers, options: &ReportOptions) -> Result<Self, ReportError> {
        let mut charts = Vec::new();
        let mut questions = Vec::new();

        let denominator = options
            .share_denominator
            .resolve(answers.respondent_count);
        if options.share_denominator == ShareDenominator::Respondents {
            tracing::debug!(denominator, "positive shares use the respondent count");
        } else {
            tracing::info!(denominator, "positive shares use a fixed denominator");
        }

        for series in &answers.series {
            let question = series.question;
            let route = ChartRoute::for_kind(question.kind);
            tracing::debug!(
                key = question.key,
                header = series.header.as_str(),
                ?route,
                "routing question"
            );
            if route.is_platform_block() {
                continue;
            }
            let table = FrequencyTable::from_values(series.values.iter().cloned());
            charts.push(if route.is_pie() {
                pie_chart(series, &table)
            } else {
                bar_chart(series, &table)
            });
            questions.push(QuestionSummary::new(question, &table));
        }

        let platforms = answers
            .platform_series()
            .map(|series| {
                PlatformSummary::from_answers(
                    series.question.title,
                    series.values.iter().map(String::as_str),
                    &options.scale,
                    denominator,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !platforms.is_empty() {
            charts.push(popularity_chart(&platforms));
            charts.push(median_chart(&platforms)?);
            charts.push(share_chart(&platforms)?);
        }

        Ok(Self {
            charts,
            questions,
            platforms,
            respondent_count: answers.respondent_count,
        })
    }

    /// Renders every chart into `sink`, in order.
    pub fn render<S>(&self, mut sink: S) -> Result<(), RenderError>
    where
        S: ChartSink,
    {
        for chart in &self.charts {
            sink.render(chart)?;
        }
        tracing::info!(charts = self.charts.len(), "report rendered");
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            respondent_count: self.respondent_count,
            questions: self.questions.clone(),
            platforms: self.platforms.clone(),
        }
    }
}

fn pie_chart(series: &AnswerSeries, table: &FrequencyTable<String>) -> Chart {
    Chart::new(
        series.question.key,
        series.question.title,
        ChartBody::Pie(PieChart {
            legend_title: PIE_LEGEND_TITLE.to_owned(),
            slices: table.sorted_by_count(),
        }),
    )
}

fn bar_chart(series: &AnswerSeries, table: &FrequencyTable<String>) -> Chart {
    Chart::new(
        series.question.key,
        BEST_SUBJECTS_TITLE,
        ChartBody::Bar(BarChart {
            value_label: None,
            bars: table.sorted_by_count(),
        }),
    )
}

fn popularity_chart(platforms: &[PlatformSummary]) -> Chart {
    let mut bars = platforms
        .iter()
        .map(|p| (p.platform.clone(), p.positive_count))
        .collect::<Vec<_>>();
    bars.sort_by_key(|(_, count)| *count);
    Chart::new(
        POPULARITY_KEY,
        POPULARITY_TITLE,
        ChartBody::HorizontalBar(BarChart {
            value_label: Some(POPULARITY_AXIS.to_owned()),
            bars,
        }),
    )
}

fn median_chart(platforms: &[PlatformSummary]) -> Result<Chart, ReportError> {
    let values = platforms
        .iter()
        .filter_map(|p| {
            if p.median_score.is_none() {
                tracing::warn!(
                    platform = p.platform.as_str(),
                    "nobody has heard of the platform; left out of the median chart"
                );
            }
            p.median_score.map(|median| (p.platform.as_str(), median))
        })
        .collect::<Vec<_>>();
    ranked_scatter(MEDIAN_KEY, MEDIAN_TITLE, MEDIAN_AXIS, values)
}

fn share_chart(platforms: &[PlatformSummary]) -> Result<Chart, ReportError> {
    let values = platforms
        .iter()
        .map(|p| (p.platform.as_str(), p.positive_share))
        .collect();
    ranked_scatter(SHARE_KEY, SHARE_TITLE, SHARE_AXIS, values)
}

/// Sorts `values` ascending, places them at ranks `0..n` and overlays a
/// least-squares line through `(rank, value)`.
#[expect(clippy::cast_precision_loss)]
fn ranked_scatter(
    key: &'static str,
    title: &str,
    y_label: &str,
    mut values: Vec<(&str, f64)>,
) -> Result<Chart, ReportError> {
    values.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let xs = (0..values.len()).map(|rank| rank as f64).collect::<Vec<_>>();
    let ys = values.iter().map(|(_, value)| *value).collect::<Vec<_>>();
    let fit = LinearFit::fit(&xs, &ys)
        .map_err(|source| ReportError::DegenerateFit { chart: key, source })?;
    tracing::debug!(
        chart = key,
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        "trend line fitted"
    );

    let points = values
        .iter()
        .zip(&xs)
        .map(|((label, y), x)| ScatterPoint {
            label: (*label).to_owned(),
            x: *x,
            y: *y,
        })
        .collect();
    let trend = xs.iter().copied().zip(fit.predict_all(&xs)).collect();

    Ok(Chart::new(
        key,
        title,
        ChartBody::Scatter(ScatterChart {
            x_label: RANK_AXIS.to_owned(),
            y_label: y_label.to_owned(),
            points,
            trend,
        }),
    ))
}
