//! CSV adapter: Implementation of DatasetSource.
//!
//! Reads the HR attrition CSV (`HR_comma_sep.csv` layout) with a header
//! row. Columns the application does not use are ignored.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::{Department, EmployeeRecord, SalaryTier};
use crate::ports::{DatasetError, DatasetSource};

/// Dataset backed by a CSV file on disk.
pub struct CsvDataset {
    path: PathBuf,
}

impl CsvDataset {
    /// Create a dataset reading from the given path.
    ///
    /// The file is opened lazily on each load.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, DatasetError> {
        File::open(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Parse records from any reader.
    ///
    /// When `unique` is set, rows identical across every CSV column are
    /// dropped after their first occurrence.
    ///
    /// # Errors
    /// Returns `DatasetError` on malformed CSV or out-of-domain values.
    pub fn read_from<R: Read>(reader: R, unique: bool) -> Result<Vec<EmployeeRecord>, DatasetError> {
        let rows = parse_rows(reader)?;
        Ok(rows
            .into_iter()
            .filter(|(_, first)| !unique || *first)
            .map(|(record, _)| record)
            .collect())
    }

    /// Read the file once and return every row plus the de-duplicated rows.
    ///
    /// # Errors
    /// Returns `DatasetError` if the file cannot be read or a row is invalid.
    pub fn load_all_and_unique(
        &self,
    ) -> Result<(Vec<EmployeeRecord>, Vec<EmployeeRecord>), DatasetError> {
        let rows = parse_rows(self.open()?)?;
        let unique: Vec<EmployeeRecord> = rows
            .iter()
            .filter(|(_, first)| *first)
            .map(|(record, _)| record.clone())
            .collect();
        let all: Vec<EmployeeRecord> = rows.into_iter().map(|(record, _)| record).collect();

        tracing::info!(
            "Loaded {} rows ({} unique) from {:?}",
            all.len(),
            unique.len(),
            self.path
        );
        Ok((all, unique))
    }
}

/// Parse every row, flagging whether it is the first occurrence of its
/// exact raw contents.
fn parse_rows<R: Read>(reader: R) -> Result<Vec<(EmployeeRecord, bool)>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let raw = result?;

        let key: Vec<String> = raw.iter().map(str::to_string).collect();
        let first = seen.insert(key);

        let record: EmployeeRecord =
            raw.deserialize(Some(&headers))
                .map_err(|e| DatasetError::InvalidRow {
                    row,
                    message: e.to_string(),
                })?;
        check_record(&record, row)?;
        rows.push((record, first));
    }

    let duplicates = rows.iter().filter(|(_, first)| !first).count();
    tracing::debug!("Found {} duplicate rows", duplicates);

    Ok(rows)
}

fn check_record(record: &EmployeeRecord, row: usize) -> Result<(), DatasetError> {
    let invalid = |message: String| DatasetError::InvalidRow { row, message };

    if record.left > 1 {
        return Err(invalid(format!("left must be 0 or 1, got {}", record.left)));
    }
    if SalaryTier::from_label(&record.salary).is_none() {
        return Err(invalid(format!("unknown salary {:?}", record.salary)));
    }
    if record.department.parse::<Department>().is_err() {
        return Err(invalid(format!("unknown department {:?}", record.department)));
    }
    Ok(())
}

impl DatasetSource for CsvDataset {
    type Error = DatasetError;

    fn load_records(&self) -> Result<Vec<EmployeeRecord>, DatasetError> {
        let records = Self::read_from(self.open()?, false)?;
        tracing::info!("Loaded {} rows from {:?}", records.len(), self.path);
        Ok(records)
    }

    fn load_unique_records(&self) -> Result<Vec<EmployeeRecord>, DatasetError> {
        let records = Self::read_from(self.open()?, true)?;
        tracing::info!("Loaded {} unique rows from {:?}", records.len(), self.path);
        Ok(records)
    }
}
