use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use coursepoll_analysis::sentiment::OpinionScale;

/// Writes `value` as pretty-printed JSON, followed by a newline, to `path`.
pub fn save_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Reads and validates a custom opinion scale from a JSON file.
pub fn read_opinion_scale_file<P>(path: P) -> anyhow::Result<OpinionScale>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open opinion scale file: {}", path.display()))?;
    let scale = OpinionScale::from_json_str(&json)
        .with_context(|| format!("Failed to parse opinion scale file: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        labels = scale.scores.len(),
        "custom opinion scale loaded"
    );
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_save_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        save_json(&serde_json::json!({"respondents": 5}), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"respondents\": 5\n}\n");
    }

    #[test]
    fn test_save_json_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");
        let err = save_json(&serde_json::json!({}), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }

    #[test]
    fn test_read_opinion_scale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scale.json");
        fs::write(
            &path,
            r#"{"unheard_label": "no", "scores": {"yes": 3}, "positive_labels": ["yes"]}"#,
        )
        .unwrap();
        let scale = read_opinion_scale_file(&path).unwrap();
        assert!(scale.is_positive("yes"));
    }

    #[test]
    fn test_invalid_opinion_scale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scale.json");
        fs::write(
            &path,
            r#"{"unheard_label": "no", "scores": {"yes": 9}, "positive_labels": []}"#,
        )
        .unwrap();
        let err = read_opinion_scale_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("outside [-3, 3]"));
    }

    #[test]
    fn test_missing_opinion_scale_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_opinion_scale_file(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open opinion scale file"));
    }
}
