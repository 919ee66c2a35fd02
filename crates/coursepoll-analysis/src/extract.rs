//! Slicing of the survey into per-question answer series

use crate::{
    schema::{self, Question, QuestionKind, SchemaError},
    survey::Survey,
};

/// All respondents' answers to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSeries {
    pub question: &'static Question,
    /// Header text of the source column
    pub header: String,
    /// Answers in respondent order.
    ///
    /// For multi-choice questions this is the flattened list of chosen
    /// options across all respondents, so it is not position-aligned with
    /// the other series.
    pub values: Vec<String>,
}

/// Answer series for every question of the survey, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyAnswers {
    pub respondent_count: usize,
    pub series: Vec<AnswerSeries>,
}

impl SurveyAnswers {
    /// Slices `survey` into one [`AnswerSeries`] per question.
    pub fn extract(survey: &Survey) -> Result<Self, SchemaError> {
        let columns = schema::resolve_columns(survey.headers())?;
        if survey.respondent_count() == 0 {
            return Err(SchemaError::NoRespondents);
        }

        let series = columns
            .into_iter()
            .map(|resolved| {
                let raw = survey.column(resolved.column);
                let values = match resolved.question.kind {
                    QuestionKind::MultiChoice => split_choices(raw),
                    QuestionKind::SingleChoice
                    | QuestionKind::FreeText
                    | QuestionKind::PlatformOpinion => raw.map(str::to_owned).collect(),
                };
                AnswerSeries {
                    question: resolved.question,
                    header: resolved.header.to_owned(),
                    values,
                }
            })
            .collect();

        Ok(Self {
            respondent_count: survey.respondent_count(),
            series,
        })
    }

    /// Series of the platform-opinion block, in file order
    pub fn platform_series(&self) -> impl Iterator<Item = &AnswerSeries> {
        self.series
            .iter()
            .filter(|s| s.question.kind.is_platform_opinion())
    }
}

/// Flattens multi-choice answers into individual, normalized choices.
///
/// Every answer is split on `;` and each token loses its parenthetical
/// qualifier. Blank answers yield an empty token.
pub fn split_choices<'a, I>(answers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    answers
        .into_iter()
        .flat_map(|answer| answer.split(';'))
        .map(|token| normalize_choice(token).to_owned())
        .collect()
}

/// Strips a trailing parenthetical qualifier from a choice.
///
/// Returns the text before the first `" ("`, or the whole token if there is
/// none.
///
/// ```
/// use coursepoll_analysis::extract::normalize_choice;
///
/// assert_eq!(normalize_choice("Math (easy)"), "Math");
/// assert_eq!(normalize_choice("Physics"), "Physics");
/// ```
#[must_use]
pub fn normalize_choice(token: &str) -> &str {
    token.split_once(" (").map_or(token, |(head, _)| head)
}
