// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product catalog input.
//!
//! The catalog is a CSV file with at least a product name column and a
//! category label column. The whole file is read and checked before the
//! seeder touches storage: one bad row fails the read.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use thiserror::Error;

/// Header of the product name column.
pub const NAME_COLUMN: &str = "nome";

/// Header of the category label column.
pub const CATEGORY_COLUMN: &str = "categoria";

const REQUIRED_HEADERS: &[&str] = &[NAME_COLUMN, CATEGORY_COLUMN];

/// Catalog read errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read catalog headers: {0}")]
    Headers(#[source] csv::Error),

    #[error("Missing required headers: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Row numbers are 1-based and exclude the header.
    #[error("Row {row}: {source}")]
    Record { row: usize, source: csv::Error },

    #[error("Row {row}: required field '{column}' is missing or empty")]
    EmptyField { row: usize, column: &'static str },
}

/// One product line of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub category: String,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CatalogError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        // First occurrence wins on duplicate headers
        header_map.entry(normalize_header(header)).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| String::from(*required))
        .collect();

    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns(missing));
    }

    Ok(header_map)
}

fn required_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &'static str,
    row: usize,
) -> Result<String, CatalogError> {
    header_map
        .get(column)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or(CatalogError::EmptyField { row, column })
}

/// Reads a catalog from any reader.
///
/// Header matching ignores case and surrounding whitespace; columns other
/// than the name and category are ignored. Rows must all have the same
/// number of fields.
///
/// # Errors
///
/// Returns an error if a required column is missing, a record cannot be
/// parsed, or a row has an empty name or category.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: StringRecord = csv_reader.headers().map_err(CatalogError::Headers)?.clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut entries: Vec<CatalogEntry> = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let row: usize = idx + 1;
        let record: StringRecord = result.map_err(|source| CatalogError::Record { row, source })?;

        entries.push(CatalogEntry {
            name: required_field(&record, &header_map, NAME_COLUMN, row)?,
            category: required_field(&record, &header_map, CATEGORY_COLUMN, row)?,
        });
    }

    Ok(entries)
}

/// Reads a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or [`read_catalog`] fails.
pub fn read_catalog_file(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_catalog(std::io::BufReader::new(file))
}
