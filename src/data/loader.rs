use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    CellValue, Dataset, RawRow, COUNTRY_COLUMN, GDP_PER_CAPITA_COLUMN, LIFE_EXPECTANCY_COLUMN,
    POPULATION_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Locations of the two source tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub gdp: PathBuf,
    pub life: PathBuf,
}

/// Load both source tables concurrently, then merge and validate them.
///
/// Neither table is used unless both load; the first failure (GDP checked
/// first) is returned with the failing path as context.
pub fn load_dataset(paths: &SourcePaths) -> Result<Dataset> {
    let (gdp_rows, life_rows) = load_sources(paths)?;
    Ok(Dataset::build(&gdp_rows, &life_rows))
}

/// Load the GDP and life expectancy tables in parallel.
pub fn load_sources(paths: &SourcePaths) -> Result<(Vec<RawRow>, Vec<RawRow>)> {
    let (gdp, life) = rayon::join(|| load_table(&paths.gdp), || load_table(&paths.life));

    let gdp = gdp.with_context(|| format!("loading GDP table {}", paths.gdp.display()))?;
    let life =
        life.with_context(|| format!("loading life expectancy table {}", paths.life.display()))?;

    warn_missing_columns(
        &gdp,
        &[COUNTRY_COLUMN, GDP_PER_CAPITA_COLUMN, POPULATION_COLUMN],
        &paths.gdp,
    );
    warn_missing_columns(&life, &[COUNTRY_COLUMN, LIFE_EXPECTANCY_COLUMN], &paths.life);

    log::info!(
        "Loaded {} GDP rows from {} and {} life expectancy rows from {}",
        gdp.len(),
        paths.gdp.display(),
        life.len(),
        paths.life.display()
    );
    Ok((gdp, life))
}

/// Load the rows of a table.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, header row first
/// * `.csv`     – header row, every cell read as text
/// * `.json`    – `[{ "Country": "Chad", "Population": 16425864 }, ...]`
/// * `.parquet` – one row per record, string / numeric / boolean columns
///
/// Empty cells never appear in the returned rows.
pub fn load_table(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn warn_missing_columns(rows: &[RawRow], required: &[&str], path: &Path) {
    for column in required {
        if !rows.iter().any(|row| row.contains_key(*column)) {
            log::warn!("{}: no values in column '{column}'", path.display());
        }
    }
}

/// Pair header names with cells, dropping empty cells and empty rows.
fn zip_row<I>(headers: &[String], cells: I) -> Option<RawRow>
where
    I: IntoIterator<Item = Option<CellValue>>,
{
    let row: RawRow = headers
        .iter()
        .zip(cells)
        .filter(|(header, _)| !header.is_empty())
        .filter_map(|(header, cell)| Some((header.clone(), cell?)))
        .collect();
    (!row.is_empty()).then_some(row)
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();

    Ok(rows
        .filter_map(|cells| zip_row(&headers, cells.iter().map(spreadsheet_cell)))
        .collect())
}

fn spreadsheet_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(CellValue::Text(s.clone()))
        }
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::Error(_) | Data::Empty => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|value| (!value.is_empty()).then(|| CellValue::Text(value.to_string())));
        rows.extend(zip_row(&headers, cells));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::NotARowArray)?;

    records
        .iter()
        .map(|rec| -> Result<RawRow, LoadError> {
            let obj = rec.as_object().ok_or(LoadError::NotARowArray)?;
            Ok(obj
                .iter()
                .filter_map(|(key, val)| Some((key.clone(), json_cell(val)?)))
                .collect())
        })
        .collect()
}

fn json_cell(val: &JsonValue) -> Option<CellValue> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(CellValue::Text(s.clone())),
        JsonValue::Number(n) => n.as_f64().map(CellValue::Number),
        JsonValue::Bool(b) => Some(CellValue::Bool(*b)),
        other => Some(CellValue::Text(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();
        let headers: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        // Numeric columns are widened to f64 once per batch.
        let columns: Vec<ArrayRef> = batch
            .columns()
            .iter()
            .map(|col| {
                if col.data_type().is_numeric() {
                    arrow::compute::cast(col, &DataType::Float64)
                } else {
                    Ok(col.clone())
                }
            })
            .collect::<Result<_, arrow::error::ArrowError>>()?;

        for row in 0..batch.num_rows() {
            let cells = columns.iter().map(|col| arrow_cell(col, row));
            rows.extend(zip_row(&headers, cells));
        }
    }
    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Option<CellValue> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Number(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => array_value_to_string(col, row).ok().map(CellValue::Text),
    }
}
