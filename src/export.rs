use std::io::Write;

use anyhow::{Context, Result};

use crate::data::model::CountryRecord;

/// Write records as CSV with a header row, in the given order.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a CountryRecord>,
{
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(record)
            .with_context(|| format!("writing '{}'", record.country))?;
    }
    out.flush().context("flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn writes_header_and_rows() -> Result<()> {
        let records = vec![record("Norway", 89154.5, 83.2), record("Chad", 700.0, 52.5)];
        let mut buf = Vec::new();
        write_csv(&mut buf, &records)?;

        let text = String::from_utf8(buf)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "country,gdp_per_capita,population,life_expectancy",
                "Norway,89154.5,1000000.0,83.2",
                "Chad,700.0,1000000.0,52.5",
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_view_writes_nothing() -> Result<()> {
        let mut buf = Vec::new();
        write_csv(&mut buf, std::iter::empty())?;
        assert!(buf.is_empty());
        Ok(())
    }
}
