//! Wide-format CSV loading.
//!
//! One `Dataset` per source file: the date columns detected from the
//! header (source column order preserved - it is chronological in the
//! files) and one typed `Row` per (country, province) line. All cell
//! parsing happens here, once; everything downstream works on integers.

use std::path::Path;

use crate::dates;
use crate::error::{Result, StatsError};

/// Header naming the country of a row in the JHU files.
pub const COUNTRY_HEADER: &str = "Country/Region";
/// Header naming the optional sub-region of a row in the JHU files.
pub const PROVINCE_HEADER: &str = "Province/State";

/// A date column: the raw `M/D/YY` header plus its `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub raw: String,
    pub iso: String,
}

/// One source line, typed at load time.
///
/// `values` is aligned index-for-index with `Dataset::date_columns`;
/// absent, empty and non-numeric cells are already coerced to 0.
#[derive(Debug, Clone)]
pub struct Row {
    pub country: String,
    pub province: Option<String>,
    pub values: Vec<i64>,
}

/// A fully parsed source file. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub date_columns: Vec<DateColumn>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Rows whose country column equals `country`, exact and
    /// case-sensitive. Filtering is the caller's concern; aggregation
    /// itself is grouping-agnostic.
    pub fn rows_for<'a>(&'a self, country: &str) -> Vec<&'a Row> {
        self.rows.iter().filter(|row| row.country == country).collect()
    }
}

/// Reads and parses one wide-format CSV file.
pub async fn load(path: &Path, country_header: &str, province_header: &str) -> Result<Dataset> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse(&content, country_header, province_header).map_err(|source| StatsError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses wide-format CSV content.
/// This function is DETERMINISTIC: same input = same output.
pub fn parse(
    content: &str,
    country_header: &str,
    province_header: &str,
) -> std::result::Result<Dataset, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    // Date columns in source order, plus where the identity columns sit.
    let mut date_columns = Vec::new();
    let mut date_idx = Vec::new();
    let mut country_idx = None;
    let mut province_idx = None;
    for (idx, header) in headers.iter().enumerate() {
        if dates::is_date_header(header) {
            date_columns.push(DateColumn {
                raw: header.to_string(),
                iso: dates::to_iso_date(header),
            });
            date_idx.push(idx);
        } else if header == country_header {
            country_idx = Some(idx);
        } else if header == province_header {
            province_idx = Some(idx);
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let country = country_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();
        let province = province_idx
            .and_then(|i| record.get(i))
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        // flexible(true): rows short on trailing fields are fine, the
        // missing cells read as absent and coerce to 0 like any other
        // unparseable cell.
        let values = date_idx.iter().map(|&i| parse_count(record.get(i))).collect();
        rows.push(Row {
            country,
            province,
            values,
        });
    }

    Ok(Dataset { date_columns, rows })
}

fn parse_count(cell: Option<&str>) -> i64 {
    cell.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0)
}
