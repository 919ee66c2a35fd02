use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::{ChartSink, RenderError, chart::Chart, draw};

/// Image file format written by [`ImageRenderer`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ImageFormat {
    #[default]
    #[display("png")]
    Png,
    #[display("svg")]
    Svg,
}

impl ImageFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Renders each chart into its own image file inside an output directory.
///
/// Files are named `<chart key>.<extension>`. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    output_dir: PathBuf,
    format: ImageFormat,
    size: (u32, u32),
}

impl ImageRenderer {
    pub const DEFAULT_SIZE: (u32, u32) = (1500, 1000);

    /// Creates a renderer writing into `output_dir`, which must already exist.
    pub fn new<P>(output_dir: P) -> Result<Self, RenderError>
    where
        P: Into<PathBuf>,
    {
        let output_dir = output_dir.into();
        if !output_dir.is_dir() {
            return Err(RenderError::OutputDir { path: output_dir });
        }
        Ok(Self {
            output_dir,
            format: ImageFormat::default(),
            size: Self::DEFAULT_SIZE,
        })
    }

    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the file `chart` is written to.
    #[must_use]
    pub fn path_for(&self, chart: &Chart) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", chart.key, self.format.extension()))
    }
}

impl ChartSink for ImageRenderer {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
        let path = self.path_for(chart);
        let result = match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, self.size).into_drawing_area();
                draw::draw_chart(&root, chart)
                    .and_then(|()| root.present())
                    .map_err(|e| e.to_string())
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, self.size).into_drawing_area();
                draw::draw_chart(&root, chart)
                    .and_then(|()| root.present())
                    .map_err(|e| e.to_string())
            }
        };
        result.map_err(|message| RenderError::Draw {
            key: chart.key.clone(),
            path: path.clone(),
            message,
        })?;

        tracing::info!(
            kind = %chart.kind(),
            title = %chart.title,
            path = %path.display(),
            "chart written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, fs};

    use super::*;
    use crate::chart::{BarChart, ChartBody, PieChart, ScatterChart, ScatterPoint};

    fn sample_chart() -> Chart {
        Chart::new(
            "best_subjects",
            "Лучшие предметы",
            ChartBody::Bar(BarChart {
                value_label: None,
                bars: vec![("Математика".into(), 2)],
            }),
        )
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = ImageRenderer::new(&missing).unwrap_err();
        assert!(matches!(err, RenderError::OutputDir { ref path } if *path == missing));
    }

    #[test]
    fn test_output_path_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(ImageRenderer::new(&file).is_err());
    }

    #[test]
    fn test_path_uses_chart_key() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ImageRenderer::new(dir.path()).unwrap();
        assert_eq!(
            renderer.path_for(&sample_chart()),
            dir.path().join("best_subjects.png")
        );

        let renderer = renderer.with_format(ImageFormat::Svg);
        assert_eq!(
            renderer.path_for(&sample_chart()),
            dir.path().join("best_subjects.svg")
        );
    }

    fn one_chart_per_kind() -> Vec<Chart> {
        let bars = vec![("Coursera".into(), 1), ("Stepik".into(), 4)];
        vec![
            Chart::new(
                "gender",
                "Пол",
                ChartBody::Pie(PieChart {
                    legend_title: "Варианты ответа".into(),
                    slices: vec![("Женский".into(), 39), ("Мужской".into(), 1)],
                }),
            ),
            sample_chart(),
            Chart::new(
                "platform_popularity",
                "Популярность разных платформ",
                ChartBody::HorizontalBar(BarChart {
                    value_label: Some("Количество положительных отзывов".into()),
                    bars,
                }),
            ),
            Chart::new(
                "platform_median_score",
                "Медианная оценка платформ",
                ChartBody::Scatter(ScatterChart {
                    x_label: "Место".into(),
                    y_label: "Медианная оценка".into(),
                    points: vec![
                        ScatterPoint {
                            label: "Udacity".into(),
                            x: 0.0,
                            y: -1.0,
                        },
                        ScatterPoint {
                            label: "Stepik".into(),
                            x: 1.0,
                            y: 2.0,
                        },
                    ],
                    trend: vec![(0.0, -1.0), (1.0, 2.0)],
                }),
            ),
        ]
    }

    fn written_files(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                assert!(entry.metadata().unwrap().len() > 0, "{entry:?} is empty");
                entry.file_name().into_string().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_render_one_file_per_chart() {
        let charts = one_chart_per_kind();
        for format in [ImageFormat::Png, ImageFormat::Svg] {
            let dir = tempfile::tempdir().unwrap();
            let mut renderer = ImageRenderer::new(dir.path())
                .unwrap()
                .with_format(format)
                .with_size(800, 600);
            for chart in &charts {
                renderer.render(chart).unwrap();
            }

            let expected = charts
                .iter()
                .map(|chart| format!("{}.{}", chart.key, format.extension()))
                .collect::<BTreeSet<_>>();
            assert_eq!(written_files(renderer.output_dir()), expected);
        }
    }

    #[test]
    fn test_svg_pie_labels_every_wedge() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ImageRenderer::new(dir.path())
            .unwrap()
            .with_format(ImageFormat::Svg);
        let pie = &one_chart_per_kind()[0];
        renderer.render(pie).unwrap();

        let svg = fs::read_to_string(renderer.path_for(pie)).unwrap();
        assert!(svg.contains("97.5%"));
        assert!(svg.contains("2.5%"));
    }

    #[test]
    fn test_rendering_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ImageRenderer::new(dir.path())
            .unwrap()
            .with_format(ImageFormat::Svg);
        let path = renderer.path_for(&sample_chart());
        fs::write(&path, "stale").unwrap();

        renderer.render(&sample_chart()).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "stale");
    }
}
