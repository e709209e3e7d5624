//! Country catalog: the dashboard's country picker contents.

use std::collections::BTreeSet;

use crate::dataset::Dataset;

/// Synthetic grouping key meaning "aggregate every row, no filter".
pub const GLOBAL: &str = "Global";

/// Distinct country names from the confirmed dataset, sorted by code
/// point, with `"Global"` prepended regardless of sort position.
pub fn country_catalog(confirmed: &Dataset) -> Vec<String> {
    let names: BTreeSet<&str> = confirmed
        .rows
        .iter()
        .map(|row| row.country.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    let mut catalog = Vec::with_capacity(names.len() + 1);
    catalog.push(GLOBAL.to_string());
    catalog.extend(names.into_iter().map(str::to_string));
    catalog
}
