use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{contrast_text_color, DETAILS_BACKGROUND};
use crate::config::{ChartKind, LIFE_EXPECTANCY_BOUNDS};
use crate::data::view::TopN;
use crate::state::AppState;

use super::plot::highlight_color;
use super::scale::{format_dollars, format_grouped};

/// Skip/rejection reasons listed in the data quality section before eliding.
const MAX_LISTED_ISSUES: usize = 50;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: chart toggle, filters, details and data quality.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Chart");
            ui.horizontal(|ui: &mut Ui| {
                for (kind, label) in [(ChartKind::Bubble, "Bubble chart"), (ChartKind::Bar, "Bar chart")] {
                    if ui.selectable_label(state.chart == kind, label).clicked() {
                        state.set_chart(kind);
                    }
                }
            });
            ui.separator();

            ui.heading("Filters");
            filter_controls(ui, state);
            ui.separator();

            ui.heading("Details");
            details_box(ui, state);
            ui.separator();

            data_quality(ui, state);
        });
}

fn top_n_label(top_n: TopN) -> String {
    match top_n {
        TopN::All => "All countries".to_string(),
        TopN::Count(n) => format!("Top {n}"),
    }
}

fn filter_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Richest countries");
    egui::ComboBox::from_id_salt("top_n")
        .selected_text(top_n_label(state.filter.top_n))
        .show_ui(ui, |ui: &mut Ui| {
            for choice in TopN::choices() {
                if ui
                    .selectable_label(state.filter.top_n == choice, top_n_label(choice))
                    .clicked()
                {
                    state.set_top_n(choice);
                }
            }
        });

    ui.add_space(4.0);
    ui.strong("Life expectancy (years)");

    let mut life_min = state.filter.life_min;
    if ui
        .add(egui::Slider::new(&mut life_min, LIFE_EXPECTANCY_BOUNDS).text("min"))
        .changed()
    {
        state.set_life_min(life_min);
    }

    let mut life_max = state.filter.life_max;
    if ui
        .add(egui::Slider::new(&mut life_max, LIFE_EXPECTANCY_BOUNDS).text("max"))
        .changed()
    {
        state.set_life_max(life_max);
    }
}

/// Hovered country, on the colour it is drawn with.
fn details_box(ui: &mut Ui, state: &AppState) {
    let (background, lines) = match state.hovered_record() {
        Some(record) => (
            highlight_color(state, record),
            vec![
                RichText::new(&record.country).strong(),
                RichText::new(format!(
                    "GDP per Capita: {}",
                    format_dollars(record.gdp_per_capita)
                )),
                RichText::new(format!("Life Expectancy: {} yrs", record.life_expectancy)),
                RichText::new(format!("Population: {}", format_grouped(record.population))),
            ],
        ),
        None => (
            DETAILS_BACKGROUND,
            vec![RichText::new("Hover over the data for more details")],
        ),
    };
    let text_color = contrast_text_color(background);

    egui::Frame::default()
        .fill(background)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            for line in lines {
                ui.label(line.color(text_color));
            }
        });
}

fn data_quality(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let report = &ds.report;
    let issues = report.skipped.len() + report.rejected.len();

    egui::CollapsingHeader::new(RichText::new(format!("Data quality  ({issues} excluded)")).strong())
        .id_salt("data_quality")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(report.summary());
            let lines = report
                .skipped
                .iter()
                .map(ToString::to_string)
                .chain(report.rejected.iter().map(ToString::to_string));
            for line in lines.take(MAX_LISTED_ISSUES) {
                ui.small(line);
            }
            if issues > MAX_LISTED_ISSUES {
                ui.small(format!("… and {} more", issues - MAX_LISTED_ISSUES));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open GDP table…").clicked() {
                if let Some(path) = pick_table("Open GDP per capita table") {
                    state.sources.gdp = path;
                    state.load_sources();
                }
                ui.close_menu();
            }
            if ui.button("Open life expectancy table…").clicked() {
                if let Some(path) = pick_table("Open life expectancy table") {
                    state.sources.life = path;
                    state.load_sources();
                }
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.load_sources();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} countries loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        } else {
            ui.label(format!(
                "GDP: {}   Life expectancy: {}",
                state.sources.gdp.display(),
                state.sources.life.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_table(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
