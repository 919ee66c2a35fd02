use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;

use crate::{command::SurveyArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    #[command(flatten)]
    pub(super) survey: SurveyArg,
    /// Write the summary as JSON to this file instead of printing tables
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let summary = arg.survey.build_report()?.summary();

    match &arg.output {
        Some(path) => {
            util::save_json(&summary, path)?;
            tracing::info!(path = %path.display(), "summary written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{summary}").context("Failed to write summary to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
