//! Loading of the raw survey export

use std::{fs::File, io, path::Path};

/// Raw tabular survey data: a header row and one row of answers per respondent.
///
/// Cells are kept as strings exactly as read; blank cells are empty strings.
/// Every row has the same number of cells as the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadSurveyError {
    #[display("failed to open survey file {path}")]
    Open { path: String, source: io::Error },
    #[display("failed to read survey data")]
    Read { source: csv::Error },
}

impl Survey {
    /// Builds a survey from already-split cells.
    #[cfg(test)]
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        assert!(
            rows.iter().all(|row| row.len() == headers.len()),
            "every row must have one cell per header"
        );
        Self { headers, rows }
    }

    /// Reads a comma-delimited export with a header row.
    pub fn from_reader<R>(reader: R) -> Result<Self, LoadSurveyError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|source| LoadSurveyError::Read { source })?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_owned).collect::<Vec<_>>())
                    .map_err(|source| LoadSurveyError::Read { source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            columns = headers.len(),
            respondents = rows.len(),
            "survey loaded"
        );
        Ok(Self { headers, rows })
    }

    pub fn from_path<P>(path: P) -> Result<Self, LoadSurveyError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadSurveyError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(io::BufReader::new(file))
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn respondent_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterates over the cells of column `column`, in respondent order.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        assert!(column < self.headers.len(), "column index out of range");
        self.rows.iter().map(move |row| row[column].as_str())
    }
}
