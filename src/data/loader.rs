//! CSV Dataset Loader Module
//! Reads the CoWIN statewise export into typed records using Polars.

use polars::prelude::*;
use thiserror::Error;

use crate::data::record::{normalize_date, Dataset, RollupBoundary, VaccinationRecord};

/// Header columns the source file must carry, in schema order.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "State",
    "Updated On",
    "Total",
    "First Dose",
    "Second Dose",
    "Sites",
    "Sessions",
    "CoviShield",
    "Covaxin",
    "Sputnik V",
    "Male",
    "Female",
    "Transgender",
    "18-44 Years",
    "45-60 Years",
    "60+ Years",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Rollup offset {offset} is beyond the table ({rows} rows)")]
    OffsetOutOfRange { offset: usize, rows: usize },
    #[error("Rollup marker {0:?} does not appear in the State column")]
    MarkerNotFound(String),
}

/// Loads the vaccination CSV and builds the immutable [`Dataset`].
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load a CSV file using Polars and convert it into a [`Dataset`].
    ///
    /// Individual malformed cells never abort the load: numeric cells that
    /// are missing, empty, or non-numeric coerce to 0. A missing required
    /// column or an invalid rollup boundary is fatal.
    pub fn load_csv(file_path: &str, boundary: &RollupBoundary) -> Result<Dataset, LoadError> {
        // Lazy scan, then collect; ignore_errors keeps malformed cells as nulls
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let dataset = Self::from_dataframe(&df, boundary)?;
        log::info!(
            "loaded {}: {} rows, {} regions, rollup segment at row {}",
            file_path,
            dataset.len(),
            dataset.regions().len(),
            dataset.rollup_start()
        );
        Ok(dataset)
    }

    /// Convert an already-parsed DataFrame into a [`Dataset`].
    pub fn from_dataframe(df: &DataFrame, boundary: &RollupBoundary) -> Result<Dataset, LoadError> {
        for required in REQUIRED_COLUMNS {
            if df.column(required).is_err() {
                return Err(LoadError::MissingColumn(required.to_string()));
            }
        }

        let states = Self::text_column(df, "State")?;
        let dates = Self::text_column(df, "Updated On")?;
        let total = Self::numeric_column(df, "Total")?;
        let first_dose = Self::numeric_column(df, "First Dose")?;
        let second_dose = Self::numeric_column(df, "Second Dose")?;
        let sites = Self::numeric_column(df, "Sites")?;
        let sessions = Self::numeric_column(df, "Sessions")?;
        let covishield = Self::numeric_column(df, "CoviShield")?;
        let covaxin = Self::numeric_column(df, "Covaxin")?;
        let sputnik_v = Self::numeric_column(df, "Sputnik V")?;
        let male = Self::numeric_column(df, "Male")?;
        let female = Self::numeric_column(df, "Female")?;
        let transgender = Self::numeric_column(df, "Transgender")?;
        let age_18_44 = Self::numeric_column(df, "18-44 Years")?;
        let age_45_60 = Self::numeric_column(df, "45-60 Years")?;
        let age_60_plus = Self::numeric_column(df, "60+ Years")?;

        let records: Vec<VaccinationRecord> = (0..df.height())
            .map(|i| VaccinationRecord {
                state: states[i].clone(),
                // Normalize parseable dates so matching is plain string
                // equality; anything unparseable stays as-is and simply
                // never matches a selection.
                updated_on: normalize_date(&dates[i]).unwrap_or_else(|| dates[i].clone()),
                total: total[i],
                first_dose: first_dose[i],
                second_dose: second_dose[i],
                sites: sites[i],
                sessions: sessions[i],
                covishield: covishield[i],
                covaxin: covaxin[i],
                sputnik_v: sputnik_v[i],
                male: male[i],
                female: female[i],
                transgender: transgender[i],
                age_18_44: age_18_44[i],
                age_45_60: age_45_60[i],
                age_60_plus: age_60_plus[i],
            })
            .collect();

        Dataset::new(records, boundary)
    }

    /// Extract a text column; nulls become empty strings.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, LoadError> {
        let series = df.column(name)?;
        Ok((0..series.len())
            .map(|i| match series.get(i) {
                Ok(value) if !value.is_null() => value.to_string().trim_matches('"').to_string(),
                _ => String::new(),
            })
            .collect())
    }

    /// Extract a numeric column, coercing missing/empty/non-numeric cells
    /// (and anything negative) to 0.
    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<u64>, LoadError> {
        let series = df.column(name)?;
        let as_f64 = series.cast(&DataType::Float64)?;
        let values = as_f64.f64()?;
        Ok((0..values.len())
            .map(|i| match values.get(i) {
                Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
                _ => 0,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "State,Updated On,Total,First Dose,Second Dose,Sites,Sessions,CoviShield,Covaxin,Sputnik V,Male,Female,Transgender,18-44 Years,45-60 Years,60+ Years";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn load(lines: &[&str], boundary: &RollupBoundary) -> Result<Dataset, LoadError> {
        let file = write_csv(lines);
        DatasetLoader::load_csv(file.path().to_str().unwrap(), boundary)
    }

    #[test]
    fn loads_well_formed_rows() {
        let dataset = load(
            &[
                "Alpha,01/01/2021,100,70,30,5,8,60,35,5,50,49,1,40,35,25",
                "Alpha,02/01/2021,200,140,60,6,9,120,70,10,100,98,2,80,70,50",
            ],
            &RollupBoundary::Offset(2),
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.state, "Alpha");
        assert_eq!(first.updated_on, "01/01/2021");
        assert_eq!(first.total, 100);
        assert_eq!(first.sputnik_v, 5);
        assert_eq!(first.age_60_plus, 25);
    }

    #[test]
    fn empty_cell_coerces_to_zero() {
        let dataset = load(
            &["Alpha,01/01/2021,100,70,30,5,8,,35,5,50,49,1,40,35,25"],
            &RollupBoundary::Offset(1),
        )
        .unwrap();
        assert_eq!(dataset.records()[0].covishield, 0);
    }

    #[test]
    fn non_numeric_and_negative_cells_coerce_to_zero() {
        let dataset = load(
            &[
                "Alpha,01/01/2021,oops,70,30,5,8,60,35,5,50,49,1,40,35,25",
                "Alpha,02/01/2021,-7,70,30,5,8,60,35,5,50,49,1,40,35,25",
            ],
            &RollupBoundary::Offset(2),
        )
        .unwrap();
        assert_eq!(dataset.records()[0].total, 0);
        assert_eq!(dataset.records()[1].total, 0);
    }

    #[test]
    fn dates_are_normalized_at_load() {
        let dataset = load(
            &["Alpha,1/1/2021,100,70,30,5,8,60,35,5,50,49,1,40,35,25"],
            &RollupBoundary::Offset(1),
        )
        .unwrap();
        assert_eq!(dataset.records()[0].updated_on, "01/01/2021");
    }

    #[test]
    fn missing_required_column_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "State,Updated On,Total").unwrap();
        writeln!(file, "Alpha,01/01/2021,100").unwrap();
        file.flush().unwrap();

        let err = DatasetLoader::load_csv(
            file.path().to_str().unwrap(),
            &RollupBoundary::Offset(0),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }

    #[test]
    fn unreadable_source_fails() {
        let err = DatasetLoader::load_csv(
            "/nonexistent/cowin_vaccine_data_statewise.csv",
            &RollupBoundary::Offset(0),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn every_numeric_field_is_loaded_non_negative() {
        let dataset = load(
            &[
                "Alpha,01/01/2021,,,,,,,,,,,,,,",
                "Alpha,02/01/2021,-1,-2,-3,-4,-5,-6,-7,-8,-9,-10,-11,-12,-13,-14",
            ],
            &RollupBoundary::Offset(2),
        )
        .unwrap();
        for record in dataset.records() {
            let fields = [
                record.total,
                record.first_dose,
                record.second_dose,
                record.sites,
                record.sessions,
                record.covishield,
                record.covaxin,
                record.sputnik_v,
                record.male,
                record.female,
                record.transgender,
                record.age_18_44,
                record.age_45_60,
                record.age_60_plus,
            ];
            assert!(fields.iter().all(|&v| v == 0));
        }
    }
}
