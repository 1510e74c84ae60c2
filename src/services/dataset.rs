use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Record;

/// Column headers a dataset must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["Fname", "Lname", "DOB"];

/// Cell values read as missing, alongside empty cells
pub const NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_VALUES.contains(&value)
}

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV must contain columns: Fname, Lname, DOB (missing: {})", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A loaded, shape-checked dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: Uuid,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            loaded_at: Utc::now(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, for previewing an upload
    pub fn sample(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Column positions of the required fields within a CSV header
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    first_name: usize,
    last_name: usize,
    date_of_birth: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();

        match (position("Fname"), position("Lname"), position("DOB")) {
            (Some(first_name), Some(last_name), Some(date_of_birth)) => Ok(Self {
                first_name,
                last_name,
                date_of_birth,
            }),
            _ => Err(DatasetError::MissingColumns(missing)),
        }
    }
}

/// CSV ingestion for personal-record datasets
///
/// Extra columns are ignored. Empty cells, cells holding one of
/// [`NA_VALUES`] and short rows become missing values rather than errors.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load a dataset from any CSV reader
    pub fn from_reader<R: Read>(source: &str, reader: R) -> Result<Dataset, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let layout = ColumnLayout::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        for (row_index, row) in csv_reader.records().enumerate() {
            let row = row?;
            let field = |idx: usize| row.get(idx).filter(|value| !is_missing(value));

            records.push(Record::new(
                row_index,
                field(layout.first_name),
                field(layout.last_name),
                field(layout.date_of_birth),
            ));
        }

        tracing::info!("Loaded {} records from {}", records.len(), source);

        Ok(Dataset::new(source, records))
    }

    /// Load a dataset from an in-memory CSV payload
    pub fn from_bytes(source: &str, bytes: &[u8]) -> Result<Dataset, DatasetError> {
        Self::from_reader(source, bytes)
    }

    /// Load a dataset from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(&path.display().to_string(), file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic_csv() {
        let csv = "Fname,Lname,DOB\nJohn,Smith,1990-01-01\nJane,Doe,1985-06-30\n";

        let dataset = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.source, "test.csv");
        assert_eq!(
            dataset.records[1],
            Record::new(1, Some("Jane"), Some("Doe"), Some("1985-06-30"))
        );
    }

    #[test]
    fn test_column_order_and_extras() {
        let csv = "id,DOB,Lname,city,Fname\n7,1990-01-01,Smith,Paris,John\n";

        let dataset = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap();

        assert_eq!(
            dataset.records[0],
            Record::new(0, Some("John"), Some("Smith"), Some("1990-01-01"))
        );
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let csv = "Fname,Lname,DOB\n,Smith,\nJohn\n";

        let dataset = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap();

        assert_eq!(dataset.records[0], Record::new(0, None, Some("Smith"), None));
        assert_eq!(dataset.records[1], Record::new(1, Some("John"), None, None));
    }

    #[test]
    fn test_na_markers_become_missing() {
        let csv = "Fname,Lname,DOB\nN/A,NULL,NaN\nnan,Smith,None\nNAN,Nah,na\n";

        let dataset = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap();

        assert_eq!(dataset.records[0], Record::new(0, None, None, None));
        assert_eq!(dataset.records[1], Record::new(1, None, Some("Smith"), None));
        // matching is exact, so near-misses stay as text
        assert_eq!(
            dataset.records[2],
            Record::new(2, Some("NAN"), Some("Nah"), Some("na"))
        );
    }

    #[test]
    fn test_missing_columns_rejected() {
        let csv = "Fname,Surname,Birthday\nJohn,Smith,1990-01-01\n";

        let err = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap_err();

        match &err {
            DatasetError::MissingColumns(missing) => {
                assert_eq!(missing, &vec!["Lname".to_string(), "DOB".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("CSV must contain columns: Fname, Lname, DOB"));
    }

    #[test]
    fn test_header_only_csv_is_empty_dataset() {
        let dataset = DatasetLoader::from_bytes("test.csv", b"Fname,Lname,DOB\n").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_sample_caps_at_len() {
        let csv = "Fname,Lname,DOB\nA,B,C\nD,E,F\n";
        let dataset = DatasetLoader::from_bytes("test.csv", csv.as_bytes()).unwrap();

        assert_eq!(dataset.sample(5).len(), 2);
        assert_eq!(dataset.sample(1).len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = DatasetLoader::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DatasetError::IoError(_)));
    }
}
