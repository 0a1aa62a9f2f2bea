use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::error::DomainError;
use crate::domain::features::{RawRow, RAW_FEATURES, RAW_FEATURE_COUNT};

/// A parsed comma-separated upload: one header row and its records.
///
/// Cells are kept as text until `raw_rows` is called, so columns the
/// classifier never reads may hold anything.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl ObservationTable {
    /// Parse CSV bytes with a header row
    pub fn from_csv(data: &[u8]) -> Result<Self, DomainError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| DomainError::parse(format!("Invalid CSV header: {}", e)))?
            .clone();

        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DomainError::parse("No columns to parse from file"));
        }

        let mut records = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| DomainError::parse(format!("Invalid CSV record {}: {}", index + 1, e)))?;

            if record.len() > headers.len() {
                return Err(DomainError::parse(format!(
                    "Expected {} fields in record {}, saw {}",
                    headers.len(),
                    index + 1,
                    record.len()
                )));
            }

            records.push(record);
        }

        Ok(Self { headers, records })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Required columns absent from the header, in canonical order
    pub fn missing_columns(&self) -> Vec<String> {
        RAW_FEATURES
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Fails with `MissingColumns` when any required column is absent
    pub fn ensure_required_columns(&self) -> Result<(), DomainError> {
        let missing = self.missing_columns();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::missing_columns(missing))
        }
    }

    /// Extract the required columns of every record as numbers.
    ///
    /// Empty cells and short records read as NaN. Any other unparsable
    /// cell in a required column is a parse error.
    pub fn raw_rows(&self) -> Result<Vec<RawRow>, DomainError> {
        let indices = self.required_indices()?;

        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| -> Result<RawRow, DomainError> {
                let mut values = [f64::NAN; RAW_FEATURE_COUNT];
                for ((value, &column), name) in values.iter_mut().zip(&indices).zip(RAW_FEATURES) {
                    *value = parse_cell(record.get(column), name, row)?;
                }
                Ok(RawRow::from_values(values))
            })
            .collect()
    }

    fn required_indices(&self) -> Result<[usize; RAW_FEATURE_COUNT], DomainError> {
        let mut indices = [0usize; RAW_FEATURE_COUNT];
        let mut missing = Vec::new();

        for (slot, name) in indices.iter_mut().zip(RAW_FEATURES) {
            match self.column_index(name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(DomainError::missing_columns(missing))
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Cell values read as missing, matching the pandas `read_csv` defaults
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_cell(cell: Option<&str>, column: &str, row: usize) -> Result<f64, DomainError> {
    match cell {
        None | Some("") => Ok(f64::NAN),
        Some(text) if NA_TOKENS.contains(&text) => Ok(f64::NAN),
        Some(text) => text.parse::<f64>().map_err(|_| {
            DomainError::parse(format!(
                "Could not convert '{}' to float in column '{}' (row {})",
                text,
                column,
                row + 1
            ))
        }),
    }
}
