//! Writes `gdp.csv` and `life.csv` sample tables into the current directory.
//!
//! Values are deliberately messy (currency symbols, thousands separators,
//! inconsistent country spelling) to exercise the merge.

use anyhow::{Context, Result};

/// (country, GDP per capita in USD, population, life expectancy)
const COUNTRIES: &[(&str, f64, f64, f64)] = &[
    ("Luxembourg", 125_000.0, 650_000.0, 82.6),
    ("Norway", 89_000.0, 5_400_000.0, 83.2),
    ("Switzerland", 92_000.0, 8_700_000.0, 83.9),
    ("United States", 76_000.0, 333_000_000.0, 76.4),
    ("Australia", 65_000.0, 26_000_000.0, 83.3),
    ("Germany", 48_000.0, 84_000_000.0, 80.7),
    ("Japan", 34_000.0, 125_000_000.0, 84.5),
    ("France", 41_000.0, 68_000_000.0, 82.3),
    ("United Kingdom", 46_000.0, 67_000_000.0, 80.7),
    ("Chile", 15_000.0, 19_600_000.0, 79.5),
    ("Brazil", 9_000.0, 215_000_000.0, 73.4),
    ("China", 12_700.0, 1_412_000_000.0, 78.2),
    ("Mexico", 11_500.0, 127_000_000.0, 75.0),
    ("India", 2_400.0, 1_417_000_000.0, 70.8),
    ("Nigeria", 2_100.0, 218_000_000.0, 53.6),
    ("Ethiopia", 1_000.0, 123_000_000.0, 65.0),
    ("Chad", 700.0, 17_700_000.0, 52.5),
    ("Niger", 590.0, 26_200_000.0, 61.6),
    ("Peru", 7_100.0, 34_000_000.0, 76.7),
    ("Viet Nam", 4_200.0, 98_000_000.0, 73.6),
];

/// Minimal deterministic PRNG (splitmix64).
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// `value` scaled by a random factor in `[1 - spread, 1 + spread]`.
    fn around(&mut self, value: f64, spread: f64) -> f64 {
        value * (1.0 + spread * (2.0 * self.next_unit() - 1.0))
    }
}

/// Integer-only twin of `ui::scale::format_grouped`; this binary does not
/// link the viewer's modules.
fn with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(d);
    }
    out
}

fn main() -> Result<()> {
    let mut jitter = Jitter(42);

    let mut gdp = csv::Writer::from_path("gdp.csv").context("creating gdp.csv")?;
    gdp.write_record(["Country", "GDP per capita", "Population"])?;
    for &(country, gdp_per_capita, population, _) in COUNTRIES {
        let gdp_per_capita = jitter.around(gdp_per_capita, 0.05);
        let population = jitter.around(population, 0.02).round() as u64;
        gdp.write_record([
            country.to_string(),
            format!("${}.{:02}", with_commas(gdp_per_capita as u64), (gdp_per_capita.fract() * 100.0) as u32),
            with_commas(population),
        ])?;
    }
    // Unparseable and unmatched rows.
    gdp.write_record(["Somalia", "N/A", "17,600,000"])?;
    gdp.write_record(["Atlantis", "$50,000", "1,000"])?;
    gdp.flush()?;

    let mut life = csv::Writer::from_path("life.csv").context("creating life.csv")?;
    life.write_record(["Country", "Life Expectancy"])?;
    for (i, &(country, _, _, life_expectancy)) in COUNTRIES.iter().enumerate().rev() {
        // Vary the spelling the merge has to normalize.
        let spelled = match i % 3 {
            0 => country.to_lowercase(),
            1 => format!(" {country} "),
            _ => country.to_uppercase(),
        };
        let life_expectancy = jitter.around(life_expectancy, 0.01);
        life.write_record([spelled, format!("{life_expectancy:.1}")])?;
    }
    life.write_record(["Somalia", "55.3"])?;
    life.write_record(["Greenland", "71.8"])?;
    life.flush()?;

    println!(
        "Wrote {} countries to gdp.csv and life.csv",
        COUNTRIES.len()
    );
    Ok(())
}
