use std::fmt;

use super::merge::CandidateRecord;
use super::model::CountryRecord;

/// A single failed data-quality condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    GdpNotANumber,
    GdpNotPositive,
    LifeExpectancyNotANumber,
    PopulationNotANumber,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Defect::GdpNotANumber => "GDP per capita is not a number",
            Defect::GdpNotPositive => "GDP per capita is not positive",
            Defect::LifeExpectancyNotANumber => "life expectancy is not a number",
            Defect::PopulationNotANumber => "population is not a number",
        };
        f.write_str(text)
    }
}

/// A candidate dropped by validation, with every condition it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub country: String,
    pub defects: Vec<Defect>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defects: Vec<String> = self.defects.iter().map(Defect::to_string).collect();
        write!(f, "'{}' dropped: {}", self.country, defects.join(", "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub records: Vec<CountryRecord>,
    pub rejected: Vec<Rejection>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl TryFrom<CandidateRecord> for CountryRecord {
    type Error = Rejection;

    fn try_from(candidate: CandidateRecord) -> Result<Self, Self::Error> {
        let gdp = finite(candidate.gdp_per_capita);
        let life = finite(candidate.life_expectancy);
        let population = finite(candidate.population);

        let mut defects = Vec::new();
        match gdp {
            None => defects.push(Defect::GdpNotANumber),
            Some(v) if v <= 0.0 => defects.push(Defect::GdpNotPositive),
            Some(_) => {}
        }
        if life.is_none() {
            defects.push(Defect::LifeExpectancyNotANumber);
        }
        if population.is_none() {
            defects.push(Defect::PopulationNotANumber);
        }

        match (gdp, life, population) {
            (Some(gdp_per_capita), Some(life_expectancy), Some(population)) if defects.is_empty() => {
                Ok(CountryRecord {
                    country: candidate.country,
                    gdp_per_capita,
                    population,
                    life_expectancy,
                })
            }
            _ => Err(Rejection {
                country: candidate.country,
                defects,
            }),
        }
    }
}

/// Keep candidates with a finite positive GDP, a finite life expectancy and
/// a finite population. Order is preserved.
pub fn validate(candidates: Vec<CandidateRecord>) -> ValidationReport {
    let mut report = ValidationReport::default();
    for candidate in candidates {
        match CountryRecord::try_from(candidate) {
            Ok(record) => report.records.push(record),
            Err(rejection) => report.rejected.push(rejection),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(gdp: Option<f64>, population: Option<f64>, life: Option<f64>) -> CandidateRecord {
        CandidateRecord {
            country: "X".to_string(),
            gdp_per_capita: gdp,
            population,
            life_expectancy: life,
        }
    }

    #[test]
    fn keeps_valid_records() {
        let report = validate(vec![candidate(Some(1.0), Some(0.0), Some(-3.0))]);
        assert_eq!(report.records.len(), 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn rejects_zero_and_negative_gdp() {
        let report = validate(vec![
            candidate(Some(0.0), Some(10.0), Some(70.0)),
            candidate(Some(-5.0), Some(10.0), Some(70.0)),
        ]);
        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 2);
        assert!(report
            .rejected
            .iter()
            .all(|r| r.defects == vec![Defect::GdpNotPositive]));
    }

    #[test]
    fn rejects_non_finite_values() {
        let report = validate(vec![
            candidate(Some(100.0), Some(10.0), None),
            candidate(Some(100.0), Some(10.0), Some(f64::NAN)),
            candidate(Some(f64::INFINITY), Some(10.0), Some(70.0)),
            candidate(Some(100.0), None, Some(70.0)),
        ]);
        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 4);
    }

    #[test]
    fn multiple_defects_are_one_rejection() {
        let report = validate(vec![
            candidate(None, Some(1.0), None),
            candidate(Some(10.0), Some(1.0), Some(60.0)),
        ]);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(
            report.rejected[0].defects,
            vec![Defect::GdpNotANumber, Defect::LifeExpectancyNotANumber]
        );
    }
}
