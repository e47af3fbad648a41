use eframe::egui::{pos2, Align, Color32, Layout, Rect, Sense, Ui, Vec2};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Plot, Points};

use crate::color::{SequentialScale, BAR_FILL, BAR_FILL_HOVER};
use crate::config::ChartKind;
use crate::data::model::CountryRecord;
use crate::state::AppState;

use super::scale::{
    bubble_radius, format_dollars, format_grouped, format_si, label_stride, legend_labels,
    nearest_point, padded_extent,
};

const NO_DATA_MESSAGE: &str = "No data matches the selected life expectancy range.";

/// Hover pick radius, as a fraction of the visible plot extent.
const PICK_DISTANCE: f64 = 0.03;

/// Half the bar thickness in category units.
const BAR_HALF_WIDTH: f64 = 0.35;

/// GDP legend strip under the bubble chart.
const LEGEND_SIZE: Vec2 = Vec2::new(200.0, 10.0);
const LEGEND_STEPS: usize = 64;
/// Height kept free below the bubble plot for the legend and its labels.
const LEGEND_RESERVE: f32 = 40.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected chart and record which country is hovered.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open the GDP and life expectancy tables  (File → Open…)");
        });
        return;
    };

    // Pairs of (dataset index, record), richest first.
    let records: Vec<(usize, &CountryRecord)> = state
        .visible_indices
        .iter()
        .filter_map(|&i| dataset.records().get(i).map(|r| (i, r)))
        .collect();

    let hovered = if records.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(NO_DATA_MESSAGE);
        });
        None
    } else {
        match state.chart {
            ChartKind::Bubble => bubble_chart(ui, &records, state.hovered),
            ChartKind::Bar => bar_chart(ui, &records, state.hovered),
        }
    };
    state.hovered = hovered;
}

/// Color the hovered element is drawn with, for the details box.
pub fn highlight_color(state: &AppState, record: &CountryRecord) -> Color32 {
    match state.chart {
        ChartKind::Bubble => gdp_scale(&state.visible_records())
            .map_or(BAR_FILL, |scale| scale.color_for(record.gdp_per_capita)),
        ChartKind::Bar => BAR_FILL_HOVER,
    }
}

fn gdp_scale(records: &[&CountryRecord]) -> Option<SequentialScale> {
    SequentialScale::spanning(records.iter().map(|r| r.gdp_per_capita))
}

fn tooltip(ui: &mut Ui, record: &CountryRecord) {
    ui.strong(&record.country);
    ui.label(format!("GDP: {}", format_dollars(record.gdp_per_capita)));
    ui.label(format!("Life: {} yrs", record.life_expectancy));
    ui.label(format!("Pop: {}", format_grouped(record.population)));
}

// ---------------------------------------------------------------------------
// Bubble chart
// ---------------------------------------------------------------------------

/// GDP per capita (log axis) against life expectancy; bubble area follows
/// population and colour follows GDP.
fn bubble_chart(ui: &mut Ui, records: &[(usize, &CountryRecord)], hovered: Option<usize>) -> Option<usize> {
    let plain: Vec<&CountryRecord> = records.iter().map(|(_, r)| *r).collect();
    let color_scale = gdp_scale(&plain)?;
    let max_population = plain.iter().map(|r| r.population).fold(0.0, f64::max);
    let (life_lo, life_hi) = padded_extent(plain.iter().map(|r| r.life_expectancy))?;

    let points: Vec<[f64; 2]> = plain
        .iter()
        .map(|r| [r.gdp_per_capita.log10(), r.life_expectancy])
        .collect();

    let response = Plot::new("bubble_chart")
        .x_axis_label("GDP per capita (log scale)")
        .y_axis_label("Life expectancy (years)")
        .x_axis_formatter(|mark, _range| format_si(10f64.powf(mark.value)))
        .include_y(life_lo)
        .include_y(life_hi)
        .height((ui.available_height() - LEGEND_RESERVE).max(0.0))
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((idx, record), point) in records.iter().zip(&points) {
                let mut radius = bubble_radius(record.population, max_population);
                if hovered == Some(*idx) {
                    radius *= 1.1;
                }
                let color = color_scale
                    .color_for(record.gdp_per_capita)
                    .gamma_multiply(0.7);
                plot_ui.points(
                    Points::new(vec![*point])
                        .radius(radius)
                        .color(color)
                        .filled(true),
                );
            }

            let bounds = plot_ui.plot_bounds();
            plot_ui.pointer_coordinate().and_then(|p| {
                nearest_point(
                    &points,
                    [p.x, p.y],
                    [bounds.width(), bounds.height()],
                    PICK_DISTANCE,
                )
            })
        });
    gdp_legend(ui, &plain, &color_scale);

    let k = response.inner?;
    let (idx, record) = records[k];
    response
        .response
        .on_hover_ui_at_pointer(|ui: &mut Ui| tooltip(ui, record));
    Some(idx)
}

/// Viridis gradient strip with the view's GDP extremes at either end.
fn gdp_legend(ui: &mut Ui, records: &[&CountryRecord], scale: &SequentialScale) {
    let Some((min_label, max_label)) = legend_labels(records) else {
        return;
    };

    ui.add_space(4.0);
    let (rect, _) = ui.allocate_exact_size(LEGEND_SIZE, Sense::hover());
    let painter = ui.painter();
    let step = rect.width() / LEGEND_STEPS as f32;
    for i in 0..LEGEND_STEPS {
        let left = rect.left() + i as f32 * step;
        // Slight overlap hides seams between slices.
        let right = (left + step + 0.5).min(rect.right());
        let slice = Rect::from_min_max(pos2(left, rect.top()), pos2(right, rect.bottom()));
        let t = i as f32 / (LEGEND_STEPS - 1) as f32;
        painter.rect_filled(slice, 0.0, scale.color_at(t));
    }

    let label_row = Vec2::new(LEGEND_SIZE.x, ui.spacing().interact_size.y);
    ui.allocate_ui_with_layout(
        label_row,
        Layout::left_to_right(Align::Center),
        |ui: &mut Ui| {
            ui.label(min_label);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.label(max_label);
            });
        },
    );
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Horizontal bars of GDP per capita, richest at the top.
fn bar_chart(ui: &mut Ui, records: &[(usize, &CountryRecord)], hovered: Option<usize>) -> Option<usize> {
    let n = records.len();
    let stride = label_stride(n);
    let names: Vec<String> = records.iter().map(|(_, r)| r.country.clone()).collect();

    // Category position of the k-th record; k = 0 sits on top.
    let position = move |k: usize| (n - 1 - k) as f64;

    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .map(|(k, (idx, record))| {
            let fill = if hovered == Some(*idx) {
                BAR_FILL_HOVER
            } else {
                BAR_FILL
            };
            Bar::new(position(k), record.gdp_per_capita)
                .name(&record.country)
                .width(2.0 * BAR_HALF_WIDTH)
                .fill(fill)
        })
        .collect();

    let response = Plot::new("bar_chart")
        .x_axis_label("GDP per capita")
        .x_axis_formatter(|mark, _range| format_si(mark.value))
        .y_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 || v >= n as f64 {
                return String::new();
            }
            let k = n - 1 - v as usize;
            if k % stride == 0 {
                names[k].clone()
            } else {
                String::new()
            }
        })
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 25.0]))
        .include_x(0.0)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());

            let p = plot_ui.pointer_coordinate()?;
            let slot = p.y.round();
            if (p.y - slot).abs() > BAR_HALF_WIDTH || slot < 0.0 || slot >= n as f64 {
                return None;
            }
            let k = n - 1 - slot as usize;
            (0.0..=records[k].1.gdp_per_capita).contains(&p.x).then_some(k)
        });

    let k = response.inner?;
    let (idx, record) = records[k];
    response
        .response
        .on_hover_ui_at_pointer(|ui: &mut Ui| tooltip(ui, record));
    Some(idx)
}
