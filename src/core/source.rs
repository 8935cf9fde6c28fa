//! Where candidate records come from.
//!
//! The pipeline page only needs a `Vec<Candidate>`; a [`RecordSource`] hides
//! whether that came from the built-in seed list or an exported CSV file.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::{seed_candidates, AntiCheat, Candidate, CandidateStatus};

/// Display format of the `date` column (`"Feb 7, 2025"`).
pub const DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid candidate CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {message}")]
    Invalid { row: usize, message: String },
}

pub trait RecordSource {
    /// Human-readable origin, shown in the status bar.
    fn describe(&self) -> String;
    fn load(&self) -> Result<Vec<Candidate>, SourceError>;
}

// ───────────────────────────────────────── seed ──────────────

/// The built-in twelve candidates.
pub struct SeedSource;

impl RecordSource for SeedSource {
    fn describe(&self) -> String {
        "built-in sample".into()
    }

    fn load(&self) -> Result<Vec<Candidate>, SourceError> {
        Ok(seed_candidates())
    }
}

// ───────────────────────────────────────── csv ───────────────

/// One CSV row; mirrors the column order written by [`write_csv`].
#[derive(Debug, Deserialize, Serialize)]
struct CandidateRow {
    id: u32,
    name: String,
    job: String,
    score: i64,
    date: String,
    anti_cheat: String,
    status: String,
}

impl CandidateRow {
    fn into_candidate(self, row: usize) -> Result<Candidate, SourceError> {
        let invalid = |message: String| SourceError::Invalid { row, message };

        if !(0..=100).contains(&self.score) {
            return Err(invalid(format!("score {} outside 0..=100", self.score)));
        }
        if NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_err() {
            return Err(invalid(format!("date {:?} is not like \"Feb 7, 2025\"", self.date)));
        }
        let anti_cheat = AntiCheat::from_key(&self.anti_cheat)
            .ok_or_else(|| invalid(format!("unknown anti_cheat {:?}", self.anti_cheat)))?;
        let status = CandidateStatus::from_key(&self.status)
            .ok_or_else(|| invalid(format!("unknown status {:?}", self.status)))?;

        Ok(Candidate {
            id: self.id,
            name: self.name,
            job: self.job,
            score: self.score as u8,
            date: self.date,
            anti_cheat,
            status,
        })
    }
}

impl From<&Candidate> for CandidateRow {
    fn from(c: &Candidate) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            job: c.job.clone(),
            score: i64::from(c.score),
            date: c.date.clone(),
            anti_cheat: c.anti_cheat.key().into(),
            status: c.status.key().into(),
        }
    }
}

/// Parse candidates from CSV with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Candidate>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for (i, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        // Row 1 is the header.
        out.push(row?.into_candidate(i + 2)?);
    }
    Ok(out)
}

/// Write candidates as CSV (header included).
pub fn write_csv<W: std::io::Write>(writer: W, records: &[Candidate]) -> Result<(), SourceError> {
    let mut w = csv::Writer::from_writer(writer);
    for c in records {
        w.serialize(CandidateRow::from(c))?;
    }
    w.flush().map_err(|source| SourceError::Io {
        path: PathBuf::from("<output>"),
        source,
    })?;
    Ok(())
}

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Candidate>, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_csv(file)?;
        tracing::info!(path = %self.path.display(), count = records.len(), "loaded candidates");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,job,score,date,anti_cheat,status\n";

    #[test]
    fn seed_round_trips_through_csv() {
        let seed = seed_candidates();
        let mut buf = Vec::new();
        write_csv(&mut buf, &seed).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("id,name,job,score,date,anti_cheat,status"));
        assert_eq!(parse_csv(text.as_bytes()).unwrap(), seed);
    }

    #[test]
    fn rejects_out_of_range_score() {
        let data = format!("{HEADER}1,A,B,101,\"Feb 7, 2025\",clean,accepted\n");
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::Invalid { row: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_unknown_status_and_bad_date() {
        let data = format!("{HEADER}1,A,B,50,\"Feb 7, 2025\",clean,hired\n");
        assert!(matches!(
            parse_csv(data.as_bytes()),
            Err(SourceError::Invalid { .. })
        ));
        let data = format!("{HEADER}1,A,B,50,2025-02-07,clean,accepted\n");
        assert!(matches!(
            parse_csv(data.as_bytes()),
            Err(SourceError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CsvSource::new("/definitely/not/here.csv").load().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn seed_source_loads_twelve() {
        assert_eq!(SeedSource.load().unwrap().len(), 12);
    }
}
