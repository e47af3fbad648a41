use std::collections::HashMap;
use std::fmt;

use super::model::{
    CellValue, RawRow, COUNTRY_COLUMN, GDP_PER_CAPITA_COLUMN, LIFE_EXPECTANCY_COLUMN,
    POPULATION_COLUMN,
};
use super::parse::{parse_currency_number, parse_float, parse_population_count};

// ---------------------------------------------------------------------------
// Merge output types
// ---------------------------------------------------------------------------

/// A joined row before validation. `None` means the cell did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub country: String,
    pub gdp_per_capita: Option<f64>,
    pub population: Option<f64>,
    pub life_expectancy: Option<f64>,
}

/// Why a GDP row did not produce a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// `Country` absent, blank or not text. `row` is 0-based in the GDP table.
    MissingCountry { row: usize },
    /// No life expectancy row shares the normalized key.
    NoMatch { row: usize, country: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCountry { row } => {
                write!(f, "GDP row {row} has no '{COUNTRY_COLUMN}' value")
            }
            SkipReason::NoMatch { row, country } => {
                write!(f, "GDP row {row}: '{country}' has no life expectancy entry")
            }
        }
    }
}

/// Outcome of joining a single GDP row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Matched(CandidateRecord),
    Skipped(SkipReason),
}

/// All candidates, in GDP row order, plus the reasons rows were skipped.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub candidates: Vec<CandidateRecord>,
    pub skipped: Vec<SkipReason>,
}

impl FromIterator<RowOutcome> for MergeReport {
    fn from_iter<I: IntoIterator<Item = RowOutcome>>(iter: I) -> Self {
        let mut report = MergeReport::default();
        for outcome in iter {
            match outcome {
                RowOutcome::Matched(candidate) => report.candidates.push(candidate),
                RowOutcome::Skipped(reason) => report.skipped.push(reason),
            }
        }
        report
    }
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Matching key for a country name: trimmed and lower-cased.
pub fn normalize_key(country: &str) -> String {
    country.trim().to_lowercase()
}

/// The row's country name, if it is non-blank text.
fn country_of(row: &RawRow) -> Option<&str> {
    row.get(COUNTRY_COLUMN)
        .and_then(CellValue::as_text)
        .filter(|name| !name.trim().is_empty())
}

/// Inner join of the GDP and life expectancy tables on the normalized country.
///
/// Output follows `gdp_rows` order. When several life rows share a key the
/// last one wins; GDP rows are never deduplicated.
pub fn merge(gdp_rows: &[RawRow], life_rows: &[RawRow]) -> MergeReport {
    let mut life_by_key: HashMap<String, &RawRow> = HashMap::with_capacity(life_rows.len());
    for row in life_rows {
        if let Some(country) = country_of(row) {
            life_by_key.insert(normalize_key(country), row);
        }
    }

    gdp_rows
        .iter()
        .enumerate()
        .map(|(i, gdp)| join_row(i, gdp, &life_by_key))
        .collect()
}

fn join_row(row: usize, gdp: &RawRow, life_by_key: &HashMap<String, &RawRow>) -> RowOutcome {
    let Some(country) = country_of(gdp) else {
        return RowOutcome::Skipped(SkipReason::MissingCountry { row });
    };
    let Some(life) = life_by_key.get(&normalize_key(country)) else {
        return RowOutcome::Skipped(SkipReason::NoMatch {
            row,
            country: country.to_string(),
        });
    };

    RowOutcome::Matched(CandidateRecord {
        country: country.to_string(),
        gdp_per_capita: parse_currency_number(gdp.get(GDP_PER_CAPITA_COLUMN)),
        population: parse_population_count(gdp.get(POPULATION_COLUMN)),
        life_expectancy: parse_float(life.get(LIFE_EXPECTANCY_COLUMN)),
    })
}
