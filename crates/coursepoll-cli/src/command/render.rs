use std::{fs, path::PathBuf};

use anyhow::Context as _;
use coursepoll_chart::{ImageFormat, ImageRenderer};

use crate::{command::SurveyArg, util};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum FormatArg {
    #[default]
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RenderArg {
    #[command(flatten)]
    pub(super) survey: SurveyArg,
    /// Directory the chart images are written to (created if missing)
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
    /// Image format of the charts
    #[arg(long, value_enum, default_value_t)]
    format: FormatArg,
    /// Image width in pixels
    #[arg(long, default_value_t = ImageRenderer::DEFAULT_SIZE.0)]
    width: u32,
    /// Image height in pixels
    #[arg(long, default_value_t = ImageRenderer::DEFAULT_SIZE.1)]
    height: u32,
    /// Also write the JSON summary to this file
    #[arg(long)]
    summary_output: Option<PathBuf>,
}

impl Default for RenderArg {
    fn default() -> Self {
        Self {
            survey: SurveyArg::default(),
            output_dir: PathBuf::from("output"),
            format: FormatArg::default(),
            width: ImageRenderer::DEFAULT_SIZE.0,
            height: ImageRenderer::DEFAULT_SIZE.1,
            summary_output: None,
        }
    }
}

pub(crate) fn run(arg: &RenderArg) -> anyhow::Result<()> {
    let report = arg.survey.build_report()?;

    fs::create_dir_all(&arg.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            arg.output_dir.display()
        )
    })?;
    let mut renderer = ImageRenderer::new(&arg.output_dir)?
        .with_format(arg.format.into())
        .with_size(arg.width, arg.height);
    report
        .render(&mut renderer)
        .context("Failed to render charts")?;
    tracing::info!(
        dir = %renderer.output_dir().display(),
        charts = report.charts.len(),
        "charts written"
    );

    if let Some(path) = &arg.summary_output {
        util::save_json(&report.summary(), path)?;
        tracing::info!(path = %path.display(), "summary written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    fn parse(args: &[&str]) -> RenderArg {
        let args = CommandArgs::try_parse_from(args).unwrap();
        match args.mode {
            Some(Mode::Render(arg)) => arg,
            mode => panic!("expected render mode, got {mode:?}"),
        }
    }

    #[test]
    fn test_defaults_match_implicit_render() {
        let parsed = parse(&["coursepoll", "render"]);
        let default = RenderArg::default();
        assert_eq!(parsed.output_dir, default.output_dir);
        assert_eq!(parsed.format, default.format);
        assert_eq!((parsed.width, parsed.height), (default.width, default.height));
        assert_eq!(parsed.survey.input, default.survey.input);
        assert!(parsed.summary_output.is_none());
    }

    #[test]
    fn test_render_options() {
        let parsed = parse(&[
            "coursepoll",
            "render",
            "--output-dir",
            "charts",
            "--format",
            "svg",
            "--width",
            "800",
            "--height",
            "600",
            "--summary-output",
            "summary.json",
        ]);
        assert_eq!(parsed.output_dir, PathBuf::from("charts"));
        assert_eq!(ImageFormat::from(parsed.format), ImageFormat::Svg);
        assert_eq!((parsed.width, parsed.height), (800, 600));
        assert_eq!(parsed.summary_output, Some(PathBuf::from("summary.json")));
    }
}
