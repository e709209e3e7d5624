//! Orchestrator: owns the per-process dataset cache and combines the
//! three datasets (confirmed, deaths, recovered) into the summary the
//! dashboard renders.
//!
//! Caching: one `OnceCell` per source file, populated on first use. The
//! three loads run concurrently and all must succeed before any
//! aggregation starts; a failed load is not cached, so the next request
//! retries it. Datasets are `Arc`-shared and never mutated after load.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::aggregate::{self, SeriesMetrics, TimeSeriesPoint};
use crate::catalog::{self, GLOBAL};
use crate::dataset::{self, Dataset, Row};
use crate::error::{Result, StatsError};

/// Where the three source files live and which headers identify rows.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub confirmed: PathBuf,
    pub deaths: PathBuf,
    pub recovered: PathBuf,
    pub country_header: String,
    pub province_header: String,
}

impl DataPaths {
    /// The archived JHU time-series file names under `data_dir`.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            confirmed: dir.join("time_series_19-covid-Confirmed_archived_0325.csv"),
            deaths: dir.join("time_series_19-covid-Deaths_archived_0325.csv"),
            recovered: dir.join("time_series_19-covid-Recovered_archived_0325.csv"),
            country_header: dataset::COUNTRY_HEADER.to_string(),
            province_header: dataset::PROVINCE_HEADER.to_string(),
        }
    }
}

/// The combined confirmed/deaths/recovered/active view for one country
/// (or Global). Serializes to the camelCase shape the dashboard expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    pub name: String,
    pub confirmed: i64,
    pub new_confirmed: i64,
    pub deaths: i64,
    pub new_deaths: i64,
    pub recovered: i64,
    pub new_recovered: i64,
    /// `confirmed - (deaths + recovered)`, reported as-is even when
    /// negative (recovered counts can outrun confirmed corrections).
    pub active: i64,
    pub new_active: i64,
    pub timeseries: TimeseriesBundle,
}

/// The three raw per-dataset series, untouched by the active derivation.
#[derive(Debug, Clone, Serialize)]
pub struct TimeseriesBundle {
    pub confirmed: Vec<TimeSeriesPoint>,
    pub deaths: Vec<TimeSeriesPoint>,
    pub recovered: Vec<TimeSeriesPoint>,
}

#[derive(Default)]
struct DataCache {
    confirmed: OnceCell<Arc<Dataset>>,
    deaths: OnceCell<Arc<Dataset>>,
    recovered: OnceCell<Arc<Dataset>>,
}

/// Facade the HTTP layer talks to.
pub struct StatsService {
    paths: DataPaths,
    cache: DataCache,
}

impl StatsService {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            cache: DataCache::default(),
        }
    }

    /// Country picker contents, `"Global"` first. Only needs the
    /// confirmed dataset.
    pub async fn countries(&self) -> Result<Vec<String>> {
        let confirmed = self.dataset(&self.cache.confirmed, &self.paths.confirmed).await?;
        Ok(catalog::country_catalog(&confirmed))
    }

    /// Combined summary for one country, or for every row with
    /// `"Global"`.
    ///
    /// Lookup is exact and case-sensitive. A country with zero confirmed
    /// rows is `NotFound`, even if the other datasets happen to mention
    /// it; a country missing from deaths or recovered only contributes
    /// zeroed metrics there.
    pub async fn country_data(&self, country: &str) -> Result<CountrySummary> {
        let (confirmed, deaths, recovered) = self.all_data().await?;

        if country == GLOBAL {
            let all_confirmed: Vec<&Row> = confirmed.rows.iter().collect();
            let all_deaths: Vec<&Row> = deaths.rows.iter().collect();
            let all_recovered: Vec<&Row> = recovered.rows.iter().collect();
            return Ok(compose(
                GLOBAL,
                metrics_for(&all_confirmed, &confirmed),
                metrics_for(&all_deaths, &deaths),
                metrics_for(&all_recovered, &recovered),
            ));
        }

        let confirmed_rows = confirmed.rows_for(country);
        if confirmed_rows.is_empty() {
            return Err(StatsError::NotFound {
                country: country.to_string(),
            });
        }

        Ok(compose(
            country,
            metrics_for(&confirmed_rows, &confirmed),
            metrics_for(&deaths.rows_for(country), &deaths),
            metrics_for(&recovered.rows_for(country), &recovered),
        ))
    }

    /// All three datasets, loaded concurrently on first use and cached
    /// for the life of the process.
    async fn all_data(&self) -> Result<(Arc<Dataset>, Arc<Dataset>, Arc<Dataset>)> {
        tokio::try_join!(
            self.dataset(&self.cache.confirmed, &self.paths.confirmed),
            self.dataset(&self.cache.deaths, &self.paths.deaths),
            self.dataset(&self.cache.recovered, &self.paths.recovered),
        )
    }

    async fn dataset(&self, cell: &OnceCell<Arc<Dataset>>, path: &Path) -> Result<Arc<Dataset>> {
        let ds = cell
            .get_or_try_init(|| async {
                dataset::load(path, &self.paths.country_header, &self.paths.province_header)
                    .await
                    .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(ds))
    }
}

/// Aggregates an already-filtered row set. An empty set (a country
/// absent from one dataset) yields zeroed metrics with an empty series.
fn metrics_for(rows: &[&Row], ds: &Dataset) -> SeriesMetrics {
    if rows.is_empty() {
        return SeriesMetrics::default();
    }
    let totals = aggregate::daily_totals(rows, &ds.date_columns);
    aggregate::series_metrics(&totals, &ds.date_columns)
}

fn compose(
    name: &str,
    confirmed: SeriesMetrics,
    deaths: SeriesMetrics,
    recovered: SeriesMetrics,
) -> CountrySummary {
    let active = confirmed.latest - (deaths.latest + recovered.latest);
    let new_active = confirmed.new_cases - (deaths.new_cases + recovered.new_cases);

    CountrySummary {
        name: name.to_string(),
        confirmed: confirmed.latest,
        new_confirmed: confirmed.new_cases,
        deaths: deaths.latest,
        new_deaths: deaths.new_cases,
        recovered: recovered.latest,
        new_recovered: recovered.new_cases,
        active,
        new_active,
        timeseries: TimeseriesBundle {
            confirmed: confirmed.timeseries,
            deaths: deaths.timeseries,
            recovered: recovered.timeseries,
        },
    }
}
