//! Lenient numeric parsing for spreadsheet cells.
//!
//! Cells come in as text or numbers. Text is read with leading-numeric-prefix
//! semantics: `"42abc"` is 42, `"abc"` is not a number. `None` is the
//! not-a-number result throughout.

use super::model::CellValue;

/// Parse a currency-like value such as `"$1,234.50"`.
///
/// Every `$` and `,` is removed before parsing. Other currency symbols are
/// left in place, so `"€12"` does not parse.
pub fn parse_currency_number(value: Option<&CellValue>) -> Option<f64> {
    match value? {
        CellValue::Number(v) => Some(*v),
        CellValue::Text(s) => {
            let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
            float_prefix(cleaned.trim())
        }
        CellValue::Bool(_) => None,
    }
}

/// Parse a head count such as `"1,000,000"`. Fractions are truncated.
pub fn parse_population_count(value: Option<&CellValue>) -> Option<f64> {
    match value? {
        CellValue::Number(v) => Some(*v),
        CellValue::Text(s) => {
            let cleaned: String = s.chars().filter(|&c| c != ',').collect();
            integer_prefix(cleaned.trim())
        }
        CellValue::Bool(_) => None,
    }
}

/// Parse a plain decimal value, without stripping any characters.
pub fn parse_float(value: Option<&CellValue>) -> Option<f64> {
    match value? {
        CellValue::Number(v) => Some(*v),
        CellValue::Text(s) => float_prefix(s),
        CellValue::Bool(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Prefix scanners
// ---------------------------------------------------------------------------

fn skip_sign(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'+') | Some(b'-') => i + 1,
        _ => i,
    }
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}

/// Longest prefix of the form `[+-]digits[.digits][e[+-]digits]`.
fn float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let int_start = skip_sign(bytes, 0);
    let int_end = skip_digits(bytes, int_start);
    let mut end = int_end;
    let mut digits = int_end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_start = skip_sign(bytes, end + 1);
        let exp_end = skip_digits(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Longest prefix of the form `[+-]digits` or `[+-]0x hexdigits`.
fn integer_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let start = skip_sign(bytes, 0);
    let negative = bytes.first() == Some(&b'-');
    if let Some(hex) = s[start..].strip_prefix("0x").or_else(|| s[start..].strip_prefix("0X")) {
        let magnitude = hex_prefix(hex)?;
        return Some(if negative { -magnitude } else { magnitude });
    }

    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }

    // f64 rather than i64 so that oversized counts degrade instead of failing.
    let magnitude: f64 = s[start..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading hex digits of `s` as a number; `None` if there are none.
fn hex_prefix(s: &str) -> Option<f64> {
    let digits: Vec<u32> = s.chars().map_while(|c| c.to_digit(16)).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.iter().fold(0.0, |acc, &d| acc * 16.0 + f64::from(d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn currency_strips_dollar_and_commas() {
        assert_eq!(parse_currency_number(Some(&text("$1,234.50"))), Some(1234.50));
        assert_eq!(parse_currency_number(Some(&text("  $ 89,154 "))), Some(89154.0));
        assert_eq!(parse_currency_number(Some(&text("-$5"))), Some(-5.0));
    }

    #[test]
    fn currency_absent_or_empty_is_nan() {
        assert_eq!(parse_currency_number(None), None);
        assert_eq!(parse_currency_number(Some(&text(""))), None);
        assert_eq!(parse_currency_number(Some(&text("$,"))), None);
        assert_eq!(parse_currency_number(Some(&CellValue::Bool(true))), None);
    }

    #[test]
    fn currency_numbers_pass_through() {
        assert_eq!(parse_currency_number(Some(&CellValue::Number(42.0))), Some(42.0));
        assert_eq!(parse_currency_number(Some(&CellValue::Number(-0.5))), Some(-0.5));
    }

    #[test]
    fn currency_other_symbols_are_not_stripped() {
        assert_eq!(parse_currency_number(Some(&text("€1,200"))), None);
        assert_eq!(parse_currency_number(Some(&text("£300"))), None);
        // Trailing symbols are just trailing garbage.
        assert_eq!(parse_currency_number(Some(&text("300 €"))), Some(300.0));
    }

    #[test]
    fn population_truncates_fractions() {
        assert_eq!(parse_population_count(Some(&text("1,000,000"))), Some(1_000_000.0));
        assert_eq!(parse_population_count(Some(&text("12.9"))), Some(12.0));
        assert_eq!(parse_population_count(Some(&text("-12.9"))), Some(-12.0));
        assert_eq!(parse_population_count(Some(&text("1e6"))), Some(1.0));
    }

    #[test]
    fn population_reads_hex_prefix() {
        assert_eq!(parse_population_count(Some(&text("0x1A"))), Some(26.0));
        assert_eq!(parse_population_count(Some(&text("-0X1a people"))), Some(-26.0));
        assert_eq!(parse_population_count(Some(&text("0x"))), None);
        assert_eq!(parse_population_count(Some(&text("0xg"))), None);
        // Only integers get the hex reading.
        assert_eq!(parse_float(Some(&text("0x1A"))), Some(0.0));
    }

    #[test]
    fn population_keeps_numeric_cells_unchanged() {
        assert_eq!(parse_population_count(Some(&CellValue::Number(12.9))), Some(12.9));
    }

    #[test]
    fn population_does_not_strip_dollar() {
        assert_eq!(parse_population_count(Some(&text("$100"))), None);
        assert_eq!(parse_population_count(Some(&text(""))), None);
        assert_eq!(parse_population_count(Some(&text("-"))), None);
    }

    #[test]
    fn float_prefix_semantics() {
        assert_eq!(parse_float(Some(&text("42abc"))), Some(42.0));
        assert_eq!(parse_float(Some(&text("  71.5 years"))), Some(71.5));
        assert_eq!(parse_float(Some(&text(".5"))), Some(0.5));
        assert_eq!(parse_float(Some(&text("5."))), Some(5.0));
        assert_eq!(parse_float(Some(&text("-.5e3"))), Some(-500.0));
        assert_eq!(parse_float(Some(&text("1e"))), Some(1.0));
        assert_eq!(parse_float(Some(&text("1e+"))), Some(1.0));
        assert_eq!(parse_float(Some(&text("2E-2x"))), Some(0.02));
        assert_eq!(parse_float(Some(&text("+7"))), Some(7.0));
    }

    #[test]
    fn float_without_prefix_is_nan() {
        assert_eq!(parse_float(Some(&text("abc42"))), None);
        assert_eq!(parse_float(Some(&text("."))), None);
        assert_eq!(parse_float(Some(&text("-"))), None);
        assert_eq!(parse_float(Some(&text("Infinity"))), None);
        assert_eq!(parse_float(Some(&text("1,234"))), Some(1.0));
    }
}
