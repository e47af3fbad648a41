use crate::config::{Args, ChartKind, LIFE_EXPECTANCY_BOUNDS};
use crate::data::loader::{self, SourcePaths};
use crate::data::model::{CountryRecord, Dataset};
use crate::data::view::{derive_view, TopN, ViewFilter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Merged dataset (None until both tables have loaded).
    pub dataset: Option<Dataset>,

    /// Where the two tables are read from.
    pub sources: SourcePaths,

    /// Current filter controls.
    pub filter: ViewFilter,

    /// Indices of records passing the current filter, richest first (cached).
    pub visible_indices: Vec<usize>,

    /// Chart shown in the central panel.
    pub chart: ChartKind,

    /// Dataset index of the record under the pointer.
    pub hovered: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(sources: SourcePaths, filter: ViewFilter, chart: ChartKind) -> Self {
        Self {
            dataset: None,
            sources,
            filter,
            visible_indices: Vec::new(),
            chart,
            hovered: None,
            status_message: None,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(args.source_paths(), args.view_filter(), args.chart)
    }

    /// Load both tables from `sources`. On failure the previous dataset (if
    /// any) is kept and the error is shown.
    pub fn load_sources(&mut self) {
        match loader::load_dataset(&self.sources) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Install a freshly built dataset and derive the view for it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.status_message = if dataset.is_empty() {
            Some(format!("No countries matched ({})", dataset.report.summary()))
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.hovered = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a control change.
    pub fn refilter(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => derive_view(ds.records(), &self.filter),
            None => Vec::new(),
        };
        if self
            .hovered
            .is_some_and(|i| !self.visible_indices.contains(&i))
        {
            self.hovered = None;
        }
    }

    /// Move the lower bound; an upper bound below it snaps up to match.
    pub fn set_life_min(&mut self, value: f64) {
        let value = clamp_life(value);
        self.filter.life_min = value;
        if value > self.filter.life_max {
            self.filter.life_max = value;
        }
        self.refilter();
    }

    /// Move the upper bound; a lower bound above it snaps down to match.
    pub fn set_life_max(&mut self, value: f64) {
        let value = clamp_life(value);
        self.filter.life_max = value;
        if value < self.filter.life_min {
            self.filter.life_min = value;
        }
        self.refilter();
    }

    pub fn set_top_n(&mut self, top_n: TopN) {
        self.filter.top_n = top_n;
        self.refilter();
    }

    pub fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
        self.hovered = None;
    }

    /// Records currently displayed, richest first.
    pub fn visible_records(&self) -> Vec<&CountryRecord> {
        match &self.dataset {
            Some(ds) => ds.view(&self.visible_indices).collect(),
            None => Vec::new(),
        }
    }

    pub fn hovered_record(&self) -> Option<&CountryRecord> {
        let ds = self.dataset.as_ref()?;
        ds.records().get(self.hovered?)
    }
}

fn clamp_life(value: f64) -> f64 {
    value.clamp(*LIFE_EXPECTANCY_BOUNDS.start(), *LIFE_EXPECTANCY_BOUNDS.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{gdp_row, life_row};
    use std::path::PathBuf;

    fn state_with_data() -> AppState {
        let gdp = vec![
            gdp_row("Norway", "$89,154", "5,379,475"),
            gdp_row("Chad", "$700", "16,425,864"),
            gdp_row("Peru", "$6,000", "33,000,000"),
        ];
        let life = vec![
            life_row("norway", "83.2"),
            life_row("chad", "52.5"),
            life_row("peru", "76.7"),
        ];
        let mut state = AppState::new(
            SourcePaths {
                gdp: PathBuf::from("gdp.csv"),
                life: PathBuf::from("life.csv"),
            },
            ViewFilter::default(),
            ChartKind::Bubble,
        );
        state.set_dataset(Dataset::build(&gdp, &life));
        state
    }

    fn visible_names(state: &AppState) -> Vec<&str> {
        state
            .visible_records()
            .into_iter()
            .map(|r| r.country.as_str())
            .collect()
    }

    #[test]
    fn dataset_is_shown_richest_first() {
        let state = state_with_data();
        assert_eq!(visible_names(&state), vec!["Norway", "Peru", "Chad"]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn raising_min_above_max_snaps_max() {
        let mut state = state_with_data();
        state.set_life_max(60.0);
        state.set_life_min(75.0);
        assert_eq!((state.filter.life_min, state.filter.life_max), (75.0, 75.0));
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn lowering_max_below_min_snaps_min() {
        let mut state = state_with_data();
        state.set_life_min(80.0);
        state.set_life_max(50.0);
        assert_eq!((state.filter.life_min, state.filter.life_max), (50.0, 50.0));
    }

    #[test]
    fn range_and_top_n_combine() {
        let mut state = state_with_data();
        state.set_life_max(80.0);
        assert_eq!(visible_names(&state), vec!["Peru", "Chad"]);
        state.set_top_n("1".parse().unwrap());
        assert_eq!(visible_names(&state), vec!["Peru"]);
        state.set_top_n(TopN::All);
        assert_eq!(visible_names(&state), vec!["Peru", "Chad"]);
    }

    #[test]
    fn hover_is_cleared_when_filtered_out() {
        let mut state = state_with_data();
        state.hovered = Some(0);
        assert_eq!(state.hovered_record().map(|r| r.country.as_str()), Some("Norway"));
        state.set_life_max(80.0);
        assert!(state.hovered.is_none());
    }

    #[test]
    fn failed_load_reports_error() {
        let mut state = AppState::new(
            SourcePaths {
                gdp: PathBuf::from("/nonexistent/gdp.csv"),
                life: PathBuf::from("/nonexistent/life.csv"),
            },
            ViewFilter::default(),
            ChartKind::Bar,
        );
        state.load_sources();
        assert!(state.dataset.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
    }
}
