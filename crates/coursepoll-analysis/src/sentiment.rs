//! Opinion scoring for the platform-opinion block
//!
//! Each platform-opinion answer is one of a small set of labels. The
//! [`OpinionScale`] maps those labels to ordinal scores in `[-3, 3]`, except
//! for the "never heard of it" label, which removes the respondent from the
//! platform's sample instead of scoring it. Independently of the scores, a
//! fixed set of positive labels is used to count respondents with a positive
//! opinion.
//!
//! # Example
//!
//! ```
//! use coursepoll_analysis::sentiment::{OpinionScale, PlatformSummary};
//!
//! let scale = OpinionScale::default();
//! let answers = ["Занимался, все понравилось", "Не слышал", "Планирую заниматься"];
//! let summary = PlatformSummary::from_answers("Stepik", answers, &scale, 40.0).unwrap();
//!
//! assert_eq!(summary.scored_respondents, 2);
//! assert_eq!(summary.median_score, Some(2.0));
//! assert_eq!(summary.positive_count, 2);
//! assert_eq!(summary.positive_share, 0.05);
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    num::NonZeroU32,
};

use coursepoll_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i8 = -3;
pub const MAX_SCORE: i8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SentimentError {
    #[display("opinion label '{label}' for platform '{platform}' is not on the opinion scale")]
    UnmappedLabel { platform: String, label: String },
    #[display("invalid opinion scale: {reason}")]
    InvalidScale { reason: String },
}

/// Mapping from opinion labels to ordinal scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionScale {
    /// Label meaning "never heard of it"; excluded from scoring
    pub unheard_label: String,
    pub scores: BTreeMap<String, i8>,
    /// Labels counted as a positive opinion
    pub positive_labels: BTreeSet<String>,
}

impl Default for OpinionScale {
    fn default() -> Self {
        let scores = [
            ("Занимался, все понравилось", 3),
            ("Занимался, в основном положительный опыт", 2),
            ("Планирую заниматься", 1),
            ("Слышал, но не занимался", 0),
            ("Занимался, в основном отрицательный опыт", -2),
            ("Занимался, все не понравилось", -3),
        ];
        // "planning to take it" is positive here despite scoring only +1
        let positive_labels = [
            "Планирую заниматься",
            "Занимался, в основном положительный опыт",
            "Занимался, все понравилось",
        ];
        Self {
            unheard_label: "Не слышал".to_owned(),
            scores: scores
                .into_iter()
                .map(|(label, score)| (label.to_owned(), score))
                .collect(),
            positive_labels: positive_labels.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl OpinionScale {
    /// Parses a scale from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, SentimentError> {
        let scale = serde_json::from_str::<Self>(json).map_err(|e| SentimentError::InvalidScale {
            reason: e.to_string(),
        })?;
        scale.validate()?;
        Ok(scale)
    }

    /// Checks that scores lie in `[-3, 3]`, positive labels are scored, and
    /// the unheard label is not.
    pub fn validate(&self) -> Result<(), SentimentError> {
        let invalid = |reason: String| Err(SentimentError::InvalidScale { reason });

        if self.scores.is_empty() {
            return invalid("no scored labels".to_owned());
        }
        if let Some((label, score)) = self
            .scores
            .iter()
            .find(|(_, score)| !(MIN_SCORE..=MAX_SCORE).contains(*score))
        {
            return invalid(format!(
                "score {score} of '{label}' is outside [{MIN_SCORE}, {MAX_SCORE}]"
            ));
        }
        if self.scores.contains_key(&self.unheard_label) {
            return invalid(format!(
                "unheard label '{}' must not be scored",
                self.unheard_label
            ));
        }
        if let Some(label) = self
            .positive_labels
            .iter()
            .find(|label| !self.scores.contains_key(*label))
        {
            return invalid(format!("positive label '{label}' is not scored"));
        }
        Ok(())
    }

    /// Scores `label`.
    ///
    /// Returns `Ok(None)` for the unheard label and for blank (unanswered) cells.
    pub fn score(&self, platform: &str, label: &str) -> Result<Option<i8>, SentimentError> {
        if label.is_empty() || label == self.unheard_label {
            return Ok(None);
        }
        self.scores
            .get(label)
            .copied()
            .map(Some)
            .ok_or_else(|| SentimentError::UnmappedLabel {
                platform: platform.to_owned(),
                label: label.to_owned(),
            })
    }

    #[must_use]
    pub fn is_positive(&self, label: &str) -> bool {
        self.positive_labels.contains(label)
    }
}

/// Reference respondent count that positive counts are divided by
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShareDenominator {
    /// The number of respondents in the survey
    #[default]
    Respondents,
    /// A fixed respondent count
    Fixed(NonZeroU32),
}

impl ShareDenominator {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn resolve(self, respondent_count: usize) -> f64 {
        match self {
            ShareDenominator::Respondents => respondent_count as f64,
            ShareDenominator::Fixed(count) => f64::from(count.get()),
        }
    }
}

/// Share of positive respondents among `denominator` respondents.
///
/// ```
/// use coursepoll_analysis::sentiment::positive_share;
///
/// assert_eq!(positive_share(12, 40.0), 0.3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn positive_share(positive_count: u64, denominator: f64) -> f64 {
    positive_count as f64 / denominator
}

/// Opinion summary for one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub platform: String,
    /// Respondents who have heard of the platform and answered
    pub scored_respondents: usize,
    /// Median score; `None` when nobody has heard of the platform
    pub median_score: Option<f64>,
    pub mean_score: Option<f64>,
    pub positive_count: u64,
    pub positive_share: f64,
}

impl PlatformSummary {
    pub fn from_answers<'a, I>(
        platform: &str,
        answers: I,
        scale: &OpinionScale,
        share_denominator: f64,
    ) -> Result<Self, SentimentError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scores = Vec::new();
        let mut positive_count = 0;
        for label in answers {
            if let Some(score) = scale.score(platform, label)? {
                scores.push(f64::from(score));
            }
            if scale.is_positive(label) {
                positive_count += 1;
            }
        }

        let stats = DescriptiveStats::new(scores);
        Ok(Self {
            platform: platform.to_owned(),
            scored_respondents: stats.as_ref().map_or(0, |s| s.count),
            median_score: stats.as_ref().map(|s| s.median),
            mean_score: stats.as_ref().map(|s| s.mean),
            positive_count,
            positive_share: positive_share(positive_count, share_denominator),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM: &str = "Coursera";

    #[test]
    fn test_default_scale_is_valid() {
        let scale = OpinionScale::default();
        scale.validate().unwrap();
        assert_eq!(scale.scores.len(), 6);
        assert_eq!(scale.positive_labels.len(), 3);
    }

    #[test]
    fn test_score() {
        let scale = OpinionScale::default();
        assert_eq!(scale.score(PLATFORM, "Занимался, все понравилось"), Ok(Some(3)));
        assert_eq!(scale.score(PLATFORM, "Слышал, но не занимался"), Ok(Some(0)));
        assert_eq!(scale.score(PLATFORM, "Не слышал"), Ok(None));
        assert_eq!(scale.score(PLATFORM, ""), Ok(None));
    }

    #[test]
    fn test_unmapped_label() {
        let scale = OpinionScale::default();
        assert_eq!(
            scale.score(PLATFORM, "Что это?"),
            Err(SentimentError::UnmappedLabel {
                platform: PLATFORM.to_owned(),
                label: "Что это?".to_owned(),
            })
        );
    }

    #[test]
    fn test_planning_counts_as_positive() {
        let scale = OpinionScale::default();
        assert!(scale.is_positive("Планирую заниматься"));
        assert!(!scale.is_positive("Слышал, но не занимался"));
        assert!(!scale.is_positive("Не слышал"));
    }

    #[test]
    fn test_positive_share() {
        assert_eq!(positive_share(12, 40.0), 0.3);
        assert_eq!(positive_share(0, 40.0), 0.0);
    }

    #[test]
    fn test_share_denominator() {
        assert_eq!(ShareDenominator::Respondents.resolve(25), 25.0);
        let fixed = ShareDenominator::Fixed(NonZeroU32::new(40).unwrap());
        assert_eq!(fixed.resolve(25), 40.0);
    }

    #[test]
    fn test_summary_excludes_unheard() {
        let scale = OpinionScale::default();
        let answers = [
            "Занимался, все не понравилось",
            "Не слышал",
            "Занимался, в основном отрицательный опыт",
            "Планирую заниматься",
            "Не слышал",
            "Занимался, все понравилось",
        ];
        let summary = PlatformSummary::from_answers(PLATFORM, answers, &scale, 6.0).unwrap();
        assert_eq!(summary.scored_respondents, 4);
        // scores -3, -2, 1, 3
        assert_eq!(summary.median_score, Some(-0.5));
        assert_eq!(summary.mean_score, Some(-0.25));
        assert_eq!(summary.positive_count, 2);
        assert_eq!(summary.positive_share, 2.0 / 6.0);
    }

    #[test]
    fn test_summary_nobody_heard() {
        let scale = OpinionScale::default();
        let summary =
            PlatformSummary::from_answers(PLATFORM, ["Не слышал", "Не слышал"], &scale, 2.0)
                .unwrap();
        assert_eq!(summary.scored_respondents, 0);
        assert_eq!(summary.median_score, None);
        assert_eq!(summary.positive_count, 0);
    }

    #[test]
    fn test_summary_fails_on_unmapped_label() {
        let scale = OpinionScale::default();
        let err = PlatformSummary::from_answers(PLATFORM, ["???"], &scale, 1.0).unwrap_err();
        assert!(matches!(err, SentimentError::UnmappedLabel { .. }));
    }

    #[test]
    fn test_scale_from_json() {
        let json = r#"{
            "unheard_label": "never heard",
            "scores": {"love": 3, "meh": 0, "hate": -3},
            "positive_labels": ["love"]
        }"#;
        let scale = OpinionScale::from_json_str(json).unwrap();
        assert_eq!(scale.score(PLATFORM, "meh"), Ok(Some(0)));
        assert_eq!(scale.score(PLATFORM, "never heard"), Ok(None));
    }

    #[test]
    fn test_invalid_scales() {
        let cases = [
            r#"{"unheard_label": "x", "scores": {"a": 4}, "positive_labels": []}"#,
            r#"{"unheard_label": "a", "scores": {"a": 1}, "positive_labels": []}"#,
            r#"{"unheard_label": "x", "scores": {"a": 1}, "positive_labels": ["b"]}"#,
            r#"{"unheard_label": "x", "scores": {}, "positive_labels": []}"#,
            r#"{"scores": {"a": 1}}"#,
        ];
        for json in cases {
            let err = OpinionScale::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, SentimentError::InvalidScale { .. }),
                "{json} should be rejected"
            );
        }
    }
}
