//! Serializable summaries of a report

use std::{collections::BTreeMap, fmt};

use coursepoll_stats::frequency::FrequencyTable;
use serde::Serialize;

use crate::{schema::Question, sentiment::PlatformSummary};

/// Answer frequencies for one charted question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub key: String,
    pub title: String,
    /// Number of answers (or chosen options, for multi-choice questions)
    pub total: u64,
    pub counts: BTreeMap<String, u64>,
}

impl QuestionSummary {
    #[must_use]
    pub fn new(question: &Question, table: &FrequencyTable<String>) -> Self {
        Self {
            key: question.key.to_owned(),
            title: question.title.to_owned(),
            total: table.total(),
            counts: table
                .iter()
                .map(|(answer, count)| (answer.clone(), *count))
                .collect(),
        }
    }
}

/// Everything the report computed, apart from the chart geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub respondent_count: usize,
    pub questions: Vec<QuestionSummary>,
    pub platforms: Vec<PlatformSummary>,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Respondents: {}", self.respondent_count)?;

        for question in &self.questions {
            writeln!(f)?;
            writeln!(f, "{} [{}]", question.title, question.key)?;
            let mut counts = question.counts.iter().collect::<Vec<_>>();
            counts.sort_by(|(a_label, a), (b_label, b)| b.cmp(a).then(a_label.cmp(b_label)));
            for (answer, count) in counts {
                let answer = if answer.is_empty() {
                    "(blank)"
                } else {
                    answer.as_str()
                };
                writeln!(f, "  {count:>5}  {answer}")?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<22} {:>7} {:>7} {:>7} {:>9} {:>7}",
            "Platform", "Scored", "Median", "Mean", "Positive", "Share"
        )?;
        for platform in &self.platforms {
            let median = platform
                .median_score
                .map_or_else(|| "-".to_owned(), |m| format!("{m:.1}"));
            let mean = platform
                .mean_score
                .map_or_else(|| "-".to_owned(), |m| format!("{m:.2}"));
            writeln!(
                f,
                "{:<22} {:>7} {:>7} {:>7} {:>9} {:>7.3}",
                platform.platform,
                platform.scored_respondents,
                median,
                mean,
                platform.positive_count,
                platform.positive_share
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QUESTIONS;

    #[test]
    fn test_question_summary() {
        let table = FrequencyTable::from_values(["a", "b", "a"].map(str::to_owned));
        let summary = QuestionSummary::new(&QUESTIONS[0], &table);
        assert_eq!(summary.key, "gender");
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts["a"], 2);
        assert_eq!(summary.counts["b"], 1);
    }

    #[test]
    fn test_display_and_json() {
        let table = FrequencyTable::from_values(["x", "", "x"].map(str::to_owned));
        let summary = ReportSummary {
            respondent_count: 3,
            questions: vec![QuestionSummary::new(&QUESTIONS[0], &table)],
            platforms: vec![PlatformSummary {
                platform: "Stepik".to_owned(),
                scored_respondents: 0,
                median_score: None,
                mean_score: None,
                positive_count: 0,
                positive_share: 0.0,
            }],
        };

        let text = summary.to_string();
        assert!(text.starts_with("Respondents: 3\n"));
        assert!(text.contains("Пол [gender]"));
        assert!(text.contains("    2  x"));
        assert!(text.contains("(blank)"));
        assert!(text.contains("Stepik"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["respondent_count"], 3);
        assert_eq!(json["questions"][0]["counts"]["x"], 2);
        assert!(json["platforms"][0]["median_score"].is_null());
    }
}
