//! Per-date aggregation and the latest/delta/series view.
//!
//! Grouping-agnostic: the caller decides which rows are in scope (one
//! country, or every row for Global); this module just sums them per
//! date column and reshapes the cumulative totals.

use serde::Serialize;

use crate::dataset::{DateColumn, Row};

/// One point of the reshaped series, in source column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: i64,
}

/// Latest/delta/series view of one dataset for one grouping key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesMetrics {
    pub latest: i64,
    pub new_cases: i64,
    pub timeseries: Vec<TimeSeriesPoint>,
}

/// Sums `rows` per date column. One entry per date column, source order;
/// an empty row set yields all zeros.
pub fn daily_totals(rows: &[&Row], date_columns: &[DateColumn]) -> Vec<i64> {
    let mut totals = vec![0i64; date_columns.len()];
    for row in rows {
        for (total, value) in totals.iter_mut().zip(&row.values) {
            *total += value;
        }
    }
    totals
}

/// Reshapes cumulative per-date totals into the latest value, the
/// latest-day delta and the full (date, value) series.
///
/// With fewer than two date columns the previous day defaults to the
/// latest one, so `new_cases` comes out 0 rather than an error.
pub fn series_metrics(totals: &[i64], date_columns: &[DateColumn]) -> SeriesMetrics {
    let timeseries: Vec<TimeSeriesPoint> = date_columns
        .iter()
        .zip(totals)
        .map(|(col, &value)| TimeSeriesPoint {
            date: col.iso.clone(),
            value,
        })
        .collect();

    let latest = totals.last().copied().unwrap_or(0);
    let previous = if totals.len() >= 2 {
        totals[totals.len() - 2]
    } else {
        latest
    };

    SeriesMetrics {
        latest,
        new_cases: latest - previous,
        timeseries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(raw: &[&str]) -> Vec<DateColumn> {
        raw.iter()
            .map(|r| DateColumn {
                raw: r.to_string(),
                iso: crate::dates::to_iso_date(r),
            })
            .collect()
    }

    fn row(country: &str, values: &[i64]) -> Row {
        Row {
            country: country.to_string(),
            province: None,
            values: values.to_vec(),
        }
    }

    // -------------------------------------------------------------------------
    // DAILY TOTALS TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn sums_across_provinces_per_date() {
        let cols = columns(&["1/22/20", "1/23/20", "1/24/20"]);
        let a1 = row("A", &[1, 3, 5]);
        let a2 = row("A", &[0, 1, 2]);

        let totals = daily_totals(&[&a1, &a2], &cols);
        assert_eq!(totals, vec![1, 4, 7]);
    }

    #[test]
    fn empty_row_set_sums_to_zeros() {
        let cols = columns(&["1/22/20", "1/23/20"]);
        assert_eq!(daily_totals(&[], &cols), vec![0, 0]);
    }

    #[test]
    fn short_rows_contribute_only_their_cells() {
        // A row loaded from a line with missing trailing fields has fewer
        // values than there are date columns; the tail stays untouched.
        let cols = columns(&["1/22/20", "1/23/20", "1/24/20"]);
        let short = row("A", &[2]);
        let full = row("A", &[1, 1, 1]);

        assert_eq!(daily_totals(&[&short, &full], &cols), vec![3, 1, 1]);
    }

    // -------------------------------------------------------------------------
    // SERIES METRICS TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn latest_and_delta_from_last_two_columns() {
        let cols = columns(&["1/22/20", "1/23/20", "1/24/20"]);
        let metrics = series_metrics(&[1, 4, 7], &cols);

        assert_eq!(metrics.latest, 7);
        assert_eq!(metrics.new_cases, 3);
        assert_eq!(metrics.timeseries.len(), 3);
        assert_eq!(
            metrics.timeseries[0],
            TimeSeriesPoint {
                date: "2020-01-22".to_string(),
                value: 1
            }
        );
        assert_eq!(metrics.timeseries[2].value, 7);
    }

    #[test]
    fn single_date_column_has_zero_delta() {
        let cols = columns(&["1/22/20"]);
        let metrics = series_metrics(&[9], &cols);

        assert_eq!(metrics.latest, 9);
        assert_eq!(metrics.new_cases, 0);
        assert_eq!(metrics.timeseries.len(), 1);
    }

    #[test]
    fn no_date_columns_yields_empty_metrics() {
        let metrics = series_metrics(&[], &[]);
        assert_eq!(metrics.latest, 0);
        assert_eq!(metrics.new_cases, 0);
        assert!(metrics.timeseries.is_empty());
    }

    #[test]
    fn delta_can_be_negative() {
        // Cumulative counts do get corrected downward in the source.
        let cols = columns(&["1/22/20", "1/23/20"]);
        let metrics = series_metrics(&[10, 8], &cols);
        assert_eq!(metrics.new_cases, -2);
    }
}
