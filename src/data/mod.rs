/// Data layer: ingestion, merge, validation and view derivation.
///
/// Architecture:
/// ```text
///  gdp.xlsx            life.xlsx        (.xlsx / .csv / .json / .parquet)
///     │                    │
///     ▼                    ▼
///   ┌──────────────────────────┐
///   │  loader   (rayon::join)  │  both tables → Vec<RawRow>, or one error
///   └──────────────────────────┘
///                │
///                ▼
///   ┌──────────┐   parse: "$1,234.50" → 1234.5
///   │  merge    │  inner join on trimmed, lower-cased Country
///   └──────────┘
///                │
///                ▼
///   ┌──────────┐
///   │ validate  │  finite GDP > 0, finite life expectancy & population
///   └──────────┘
///                │
///                ▼
///   ┌──────────────┐
///   │   Dataset     │  immutable for the session
///   └──────────────┘
///                │
///                ▼
///   ┌──────────┐
///   │   view    │  life range → sort by GDP desc → top N  → indices
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod parse;
pub mod validate;
pub mod view;
