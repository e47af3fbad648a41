use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::loader::SourcePaths;
use crate::data::view::{TopN, ViewFilter};

/// Bounds of the life expectancy sliders, in years.
pub const LIFE_EXPECTANCY_BOUNDS: RangeInclusive<f64> = 0.0..=120.0;

/// Which chart occupies the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartKind {
    #[default]
    Bubble,
    Bar,
}

/// Explore GDP per capita against life expectancy, by country.
#[derive(Debug, Clone, Parser)]
#[command(name = "country-lens", version, about)]
pub struct Args {
    /// Table with `Country`, `GDP per capita` and `Population` columns.
    #[arg(long, default_value = "gdp.xlsx")]
    pub gdp: PathBuf,

    /// Table with `Country` and `Life Expectancy` columns.
    #[arg(long, default_value = "life.xlsx")]
    pub life: PathBuf,

    /// Show only the N richest countries, or `all`.
    #[arg(long, default_value = "all")]
    pub top_n: TopN,

    /// Lowest life expectancy shown.
    #[arg(long, default_value_t = *LIFE_EXPECTANCY_BOUNDS.start())]
    pub life_min: f64,

    /// Highest life expectancy shown.
    #[arg(long, default_value_t = *LIFE_EXPECTANCY_BOUNDS.end())]
    pub life_max: f64,

    /// Chart shown at startup.
    #[arg(long, value_enum, default_value_t = ChartKind::Bubble)]
    pub chart: ChartKind,

    /// Print the filtered view as CSV on stdout instead of opening a window.
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            gdp: self.gdp.clone(),
            life: self.life.clone(),
        }
    }

    /// Initial filter. An inverted range snaps the maximum up to the minimum.
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter {
            life_min: self.life_min,
            life_max: self.life_max.max(self.life_min),
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["country-lens"]);
        assert_eq!(args.gdp, PathBuf::from("gdp.xlsx"));
        assert_eq!(args.life, PathBuf::from("life.xlsx"));
        assert_eq!(args.chart, ChartKind::Bubble);
        assert!(!args.headless);
        assert_eq!(args.view_filter(), ViewFilter::default());
    }

    #[test]
    fn parses_controls() {
        let args = Args::parse_from([
            "country-lens",
            "--gdp",
            "g.csv",
            "--top-n",
            "10",
            "--life-min",
            "40",
            "--life-max",
            "80",
            "--chart",
            "bar",
            "--headless",
        ]);
        let filter = args.view_filter();
        assert_eq!(filter.top_n.to_string(), "10");
        assert_eq!((filter.life_min, filter.life_max), (40.0, 80.0));
        assert_eq!(args.chart, ChartKind::Bar);
        assert_eq!(args.source_paths().gdp, PathBuf::from("g.csv"));
        assert!(args.headless);
    }

    #[test]
    fn inverted_range_is_snapped() {
        let args = Args::parse_from(["country-lens", "--life-min", "70", "--life-max", "50"]);
        let filter = args.view_filter();
        assert_eq!((filter.life_min, filter.life_max), (70.0, 70.0));
    }

    #[test]
    fn rejects_bad_top_n() {
        assert!(Args::try_parse_from(["country-lens", "--top-n", "0"]).is_err());
    }
}
