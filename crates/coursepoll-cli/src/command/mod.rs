use std::{num::NonZeroU32, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use coursepoll_analysis::{
    extract::SurveyAnswers,
    report::{Report, ReportOptions},
    sentiment::{OpinionScale, ShareDenominator},
    survey::Survey,
};

use crate::util;

use self::{render::RenderArg, summarize::SummarizeArg};

mod render;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log more details (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    /// What to do with the survey (renders the charts by default)
    #[command(subcommand)]
    mode: Option<Mode>,
}

impl CommandArgs {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Render every chart of the survey into image files
    Render(#[clap(flatten)] RenderArg),
    /// Print answer frequencies and platform summaries
    Summarize(#[clap(flatten)] SummarizeArg),
}

/// Input options shared by every mode
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SurveyArg {
    /// Survey export to read
    #[arg(long, default_value = "online_courses.csv")]
    input: PathBuf,
    /// Fixed respondent count positive shares are divided by
    /// (defaults to the number of respondents in the survey)
    #[arg(long)]
    share_denominator: Option<NonZeroU32>,
    /// JSON file with a custom opinion scale
    #[arg(long)]
    opinion_scale: Option<PathBuf>,
}

impl Default for SurveyArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from("online_courses.csv"),
            share_denominator: None,
            opinion_scale: None,
        }
    }
}

impl SurveyArg {
    /// Loads the survey and builds the report.
    pub(crate) fn build_report(&self) -> anyhow::Result<Report> {
        let options = self.report_options()?;

        let survey = Survey::from_path(&self.input)
            .with_context(|| format!("Failed to load survey: {}", self.input.display()))?;
        tracing::info!(
            path = %self.input.display(),
            respondents = survey.respondent_count(),
            "survey loaded"
        );

        let answers = SurveyAnswers::extract(&survey).with_context(|| {
            format!("Survey does not match the expected layout: {}", self.input.display())
        })?;
        let report = Report::build(&answers, &options).context("Failed to build report")?;
        tracing::info!(
            charts = report.charts.len(),
            platforms = report.platforms.len(),
            "report built"
        );
        Ok(report)
    }

    fn report_options(&self) -> anyhow::Result<ReportOptions> {
        let scale = match &self.opinion_scale {
            Some(path) => util::read_opinion_scale_file(path)?,
            None => OpinionScale::default(),
        };
        let share_denominator = self
            .share_denominator
            .map_or(ShareDenominator::Respondents, ShareDenominator::Fixed);
        Ok(ReportOptions {
            scale,
            share_denominator,
        })
    }
}

pub fn parse() -> CommandArgs {
    CommandArgs::parse()
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    match args.mode.unwrap_or(Mode::Render(RenderArg::default())) {
        Mode::Render(arg) => render::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_renders() {
        let args = CommandArgs::try_parse_from(["coursepoll"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_flags() {
        let args = CommandArgs::try_parse_from(["coursepoll", "-vv", "summarize"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::TRACE);

        let args = CommandArgs::try_parse_from(["coursepoll", "summarize", "-q"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::ERROR);

        assert!(CommandArgs::try_parse_from(["coursepoll", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_survey_options() {
        let args = CommandArgs::try_parse_from([
            "coursepoll",
            "summarize",
            "--input",
            "poll.csv",
            "--share-denominator",
            "40",
        ])
        .unwrap();
        let Some(Mode::Summarize(arg)) = args.mode else {
            panic!("expected summarize mode");
        };
        assert_eq!(arg.survey.input, PathBuf::from("poll.csv"));
        assert_eq!(
            arg.survey.report_options().unwrap().share_denominator,
            ShareDenominator::Fixed(NonZeroU32::new(40).unwrap())
        );
    }

    #[test]
    fn test_zero_share_denominator_is_rejected() {
        let result = CommandArgs::try_parse_from([
            "coursepoll",
            "render",
            "--share-denominator",
            "0",
        ]);
        assert!(result.is_err());
    }
}
