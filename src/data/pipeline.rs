//! Filter & Reshape Pipeline Module
//! Pure functions that slice the dataset into chart-ready tables.

use thiserror::Error;

use crate::data::record::{normalize_date, Dataset, VaccinationRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No data for the selected date and region")]
    NoDataForSelection,
}

/// Small fixed-category table derived from one snapshot record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub entries: Vec<(&'static str, u64)>,
}

impl Breakdown {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }
}

/// Stateless filter/reshape operations over a borrowed [`Dataset`].
///
/// Every function is pure: same dataset and selection in, same table out,
/// and the dataset is never mutated.
pub struct Pipeline;

impl Pipeline {
    /// All records for one region, in source order.
    ///
    /// Source order is chronologically ascending by external data contract;
    /// the pipeline preserves it and does not re-sort.
    pub fn region_series<'a>(dataset: &'a Dataset, region: &str) -> Vec<&'a VaccinationRecord> {
        dataset
            .records()
            .iter()
            .filter(|record| record.state == region)
            .collect()
    }

    /// Rollup-segment rows for one date: one row per region, nationwide.
    ///
    /// Per-region history rows before the configured boundary are never
    /// included. An unparseable date is `NoDataForSelection`; a parseable
    /// date with no rollup rows yields an empty table.
    pub fn nationwide_snapshot<'a>(
        dataset: &'a Dataset,
        date: &str,
    ) -> Result<Vec<&'a VaccinationRecord>, PipelineError> {
        let date = normalize_date(date).ok_or(PipelineError::NoDataForSelection)?;
        Ok(dataset.records()[dataset.rollup_start()..]
            .iter()
            .filter(|record| record.updated_on == date)
            .collect())
    }

    /// The single record matching both region and date, if any.
    ///
    /// A date that does not parse, or that is absent for the region, is the
    /// expected no-data outcome rather than an error worth panicking over.
    pub fn region_snapshot<'a>(
        dataset: &'a Dataset,
        region: &str,
        date: &str,
    ) -> Result<&'a VaccinationRecord, PipelineError> {
        let date = normalize_date(date).ok_or(PipelineError::NoDataForSelection)?;
        dataset
            .records()
            .iter()
            .find(|record| record.state == region && record.updated_on == date)
            .ok_or(PipelineError::NoDataForSelection)
    }

    /// Doses by vaccine brand for one snapshot.
    pub fn brand_breakdown(snapshot: &VaccinationRecord) -> Breakdown {
        Breakdown {
            entries: vec![
                ("CoviShield", snapshot.covishield),
                ("Covaxin", snapshot.covaxin),
                ("Sputnik V", snapshot.sputnik_v),
            ],
        }
    }

    /// Doses by recipient gender for one snapshot.
    pub fn gender_breakdown(snapshot: &VaccinationRecord) -> Breakdown {
        Breakdown {
            entries: vec![
                ("Male", snapshot.male),
                ("Female", snapshot.female),
                ("Transgender", snapshot.transgender),
            ],
        }
    }

    /// Doses by age band for one snapshot.
    pub fn age_breakdown(snapshot: &VaccinationRecord) -> Breakdown {
        Breakdown {
            entries: vec![
                ("18-44 Years", snapshot.age_18_44),
                ("45-60 Years", snapshot.age_45_60),
                ("60+ Years", snapshot.age_60_plus),
            ],
        }
    }
}
