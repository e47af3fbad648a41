use std::collections::BTreeMap;

use serde::Serialize;

use super::merge::{self, SkipReason};
use super::validate::{self, Rejection};

// ---------------------------------------------------------------------------
// Column names expected in the source tables
// ---------------------------------------------------------------------------

pub const COUNTRY_COLUMN: &str = "Country";
pub const GDP_PER_CAPITA_COLUMN: &str = "GDP per capita";
pub const POPULATION_COLUMN: &str = "Population";
pub const LIFE_EXPECTANCY_COLUMN: &str = "Life Expectancy";

// ---------------------------------------------------------------------------
// CellValue – a single cell of an ingested table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as produced by the table loaders.
/// Empty cells are never stored: the column key is simply absent from the row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// The cell as text, if it holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One row of a source table: column name → cell. No fixed schema.
pub type RawRow = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// CountryRecord – one merged, validated country
// ---------------------------------------------------------------------------

/// A country present in both sources whose numeric fields all passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    /// Display name, as spelled in the GDP table.
    pub country: String,
    pub gdp_per_capita: f64,
    pub population: f64,
    pub life_expectancy: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the canonical in-memory data for a session
// ---------------------------------------------------------------------------

/// Counts and reasons collected while building a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub gdp_rows: usize,
    pub life_rows: usize,
    /// GDP rows that produced no candidate (missing country, no match).
    pub skipped: Vec<SkipReason>,
    /// Merged candidates dropped by validation.
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "{} GDP rows, {} life expectancy rows, {} skipped at merge, {} rejected as invalid",
            self.gdp_rows,
            self.life_rows,
            self.skipped.len(),
            self.rejected.len()
        )
    }
}

/// The merged and validated records. Never mutated once built; views are
/// derived as index lists (see [`super::view`]).
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    pub report: IngestReport,
}

impl Dataset {
    /// Merge the two source tables and keep only valid records.
    pub fn build(gdp_rows: &[RawRow], life_rows: &[RawRow]) -> Self {
        let merged = merge::merge(gdp_rows, life_rows);
        let validated = validate::validate(merged.candidates);

        for reason in &merged.skipped {
            log::debug!("merge: {reason}");
        }
        for rejection in &validated.rejected {
            log::debug!("validation: {rejection}");
        }

        let report = IngestReport {
            gdp_rows: gdp_rows.len(),
            life_rows: life_rows.len(),
            skipped: merged.skipped,
            rejected: validated.rejected,
        };
        log::info!(
            "Built dataset with {} countries ({})",
            validated.records.len(),
            report.summary()
        );

        Dataset {
            records: validated.records,
            report,
        }
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve view indices (as returned by [`super::view::derive_view`]) to records.
    pub fn view<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a CountryRecord> {
        indices.iter().filter_map(|&i| self.records.get(i))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a row from `(column, value)` pairs.
    pub fn row(cells: &[(&str, CellValue)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub fn gdp_row(country: &str, gdp: &str, population: &str) -> RawRow {
        row(&[
            (COUNTRY_COLUMN, country.into()),
            (GDP_PER_CAPITA_COLUMN, gdp.into()),
            (POPULATION_COLUMN, population.into()),
        ])
    }

    pub fn life_row(country: &str, life: &str) -> RawRow {
        row(&[
            (COUNTRY_COLUMN, country.into()),
            (LIFE_EXPECTANCY_COLUMN, life.into()),
        ])
    }

    pub fn record(country: &str, gdp: f64, life: f64) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            gdp_per_capita: gdp,
            population: 1_000_000.0,
            life_expectancy: life,
        }
    }
}
