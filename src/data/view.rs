use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use super::model::CountryRecord;

// ---------------------------------------------------------------------------
// Top-N selection
// ---------------------------------------------------------------------------

/// How many of the richest countries to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopN {
    #[default]
    All,
    Count(NonZeroUsize),
}

impl TopN {
    /// Choices offered in the UI selector.
    pub fn choices() -> Vec<TopN> {
        [5, 10, 15, 20, 50]
            .into_iter()
            .filter_map(NonZeroUsize::new)
            .map(TopN::Count)
            .chain(std::iter::once(TopN::All))
            .collect()
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopN::All => write!(f, "all"),
            TopN::Count(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for TopN {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TopN::All);
        }
        s.parse::<NonZeroUsize>()
            .map(TopN::Count)
            .map_err(|_| format!("expected 'all' or a positive integer, got '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// View filter
// ---------------------------------------------------------------------------

/// Current filter controls. Callers keep `life_min <= life_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFilter {
    pub life_min: f64,
    pub life_max: f64,
    pub top_n: TopN,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            life_min: 0.0,
            life_max: 120.0,
            top_n: TopN::All,
        }
    }
}

/// Return indices of records to display, richest first.
///
/// * Records outside `[life_min, life_max]` (inclusive) are dropped.
/// * The rest are sorted by GDP per capita, descending. The sort is stable so
///   ties keep their dataset order.
/// * With [`TopN::Count`] only the first N survive.
pub fn derive_view(records: &[CountryRecord], filter: &ViewFilter) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| (filter.life_min..=filter.life_max).contains(&r.life_expectancy))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| {
        records[b]
            .gdp_per_capita
            .total_cmp(&records[a].gdp_per_capita)
    });

    if let TopN::Count(n) = filter.top_n {
        indices.truncate(n.get());
    }
    indices
}
