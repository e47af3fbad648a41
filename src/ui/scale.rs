//! Chart geometry and number formatting shared by the plots.

use crate::data::model::CountryRecord;

/// Bubble radius range in points.
pub const BUBBLE_RADIUS: (f32, f32) = (5.0, 30.0);

/// Years added above and below the life expectancy extent of the bubble chart.
pub const LIFE_AXIS_PADDING: f64 = 5.0;

/// Bar charts with more countries than this label only every fifth bar.
pub const DENSE_LABEL_THRESHOLD: usize = 20;

/// Square-root scale of `population` from `[0, max_population]` onto
/// [`BUBBLE_RADIUS`], so bubble area tracks population.
pub fn bubble_radius(population: f64, max_population: f64) -> f32 {
    let (lo, hi) = BUBBLE_RADIUS;
    if max_population <= 0.0 {
        return lo;
    }
    let t = (population.max(0.0) / max_population).sqrt().min(1.0) as f32;
    lo + t * (hi - lo)
}

/// Life expectancy axis extent, padded on both sides.
pub fn padded_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.into_iter().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    })?;
    Some((min - LIFE_AXIS_PADDING, max + LIFE_AXIS_PADDING))
}

/// Show every `label_stride`-th category label.
pub fn label_stride(categories: usize) -> usize {
    if categories > DENSE_LABEL_THRESHOLD {
        5
    } else {
        1
    }
}

/// Short SI form for axis ticks: `1.5k`, `20k`, `3M`.
pub fn format_si(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];
    let (scaled, suffix) = UNITS
        .iter()
        .find(|(size, _)| value.abs() >= *size)
        .map_or((value, ""), |(size, suffix)| (value / size, *suffix));

    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}

/// Thousands-separated number: `1234567.5` → `1,234,567.5`.
pub fn format_grouped(value: f64) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Currency with no decimals: `$12,346`.
pub fn format_dollars(value: f64) -> String {
    format!("${}", format_grouped(value.round()))
}

/// End labels of the GDP colour legend: the smallest and largest GDP per
/// capita in view, rounded half away from zero.
pub fn legend_labels(records: &[&CountryRecord]) -> Option<(String, String)> {
    let (min, max) = records.iter().map(|r| r.gdp_per_capita).fold(None, |acc, v| {
        Some(acc.map_or((v, v), |(lo, hi): (f64, f64)| (lo.min(v), hi.max(v))))
    })?;
    Some((format!("{:.0}", min.round()), format!("{:.0}", max.round())))
}

/// Index of the point nearest to `cursor`, if within `max_distance`.
///
/// Distances are measured after dividing each axis by `scale`, so callers
/// pass the visible plot extent to get roughly screen-proportional picking.
pub fn nearest_point(
    points: &[[f64; 2]],
    cursor: [f64; 2],
    scale: [f64; 2],
    max_distance: f64,
) -> Option<usize> {
    let norm = |d: f64, s: f64| if s > 0.0 { d / s } else { d };
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dx = norm(p[0] - cursor[0], scale[0]);
            let dy = norm(p[1] - cursor[1], scale[1]);
            (i, dx.hypot(dy))
        })
        .filter(|(_, d)| *d <= max_distance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
