//! Vaccination Records Module
//! Typed rows of the CoWIN statewise export and the in-memory dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadError;

/// Date format used throughout the CoWIN export, e.g. "25/06/2021".
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a date string and re-format it to the canonical `DD/MM/YYYY` form.
///
/// Returns `None` for anything chrono cannot parse; record matching is exact
/// string equality on the normalized form, so "1/6/2021" and "01/06/2021"
/// compare equal after passing through here.
pub fn normalize_date(text: &str) -> Option<String> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .ok()
        .map(|date| date.format(DATE_FORMAT).to_string())
}

/// One row of the source table. Every numeric field is coerced to 0 at load
/// time when the cell is missing, empty, or non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaccinationRecord {
    pub state: String,
    pub updated_on: String,
    pub total: u64,
    pub first_dose: u64,
    pub second_dose: u64,
    pub sites: u64,
    pub sessions: u64,
    pub covishield: u64,
    pub covaxin: u64,
    pub sputnik_v: u64,
    pub male: u64,
    pub female: u64,
    pub transgender: u64,
    pub age_18_44: u64,
    pub age_45_60: u64,
    pub age_60_plus: u64,
}

/// Where the nationwide rollup segment starts in the source table.
///
/// The segment holds one row per region for each date, after all the
/// per-region history rows. The boundary comes from configuration and is
/// validated when the dataset is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum RollupBoundary {
    /// Row index of the first rollup row.
    Offset(usize),
    /// State value whose first occurrence starts the segment, for sources
    /// that carry a sentinel row instead of a known row count.
    Marker(String),
}

impl Default for RollupBoundary {
    fn default() -> Self {
        // Layout of the published CoWIN statewise export.
        RollupBoundary::Offset(290)
    }
}

/// Immutable, ordered sequence of vaccination records.
///
/// Built once at load time and only ever read afterwards; the pipeline
/// functions borrow it and never mutate it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<VaccinationRecord>,
    regions: Vec<String>,
    rollup_start: usize,
}

impl Dataset {
    /// Build a dataset, resolving and validating the rollup boundary.
    pub fn new(
        records: Vec<VaccinationRecord>,
        boundary: &RollupBoundary,
    ) -> Result<Self, LoadError> {
        let rollup_start = match boundary {
            RollupBoundary::Offset(offset) => {
                if *offset > records.len() {
                    return Err(LoadError::OffsetOutOfRange {
                        offset: *offset,
                        rows: records.len(),
                    });
                }
                *offset
            }
            RollupBoundary::Marker(marker) => records
                .iter()
                .position(|record| record.state == *marker)
                .ok_or_else(|| LoadError::MarkerNotFound(marker.clone()))?,
        };

        let mut regions: Vec<String> = Vec::new();
        for record in &records {
            if !regions.contains(&record.state) {
                regions.push(record.state.clone());
            }
        }

        Ok(Self {
            records,
            regions,
            rollup_start,
        })
    }

    /// All records in source order.
    pub fn records(&self) -> &[VaccinationRecord] {
        &self.records
    }

    /// Distinct `state` values in first-seen order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Index of the first row of the nationwide rollup segment.
    pub fn rollup_start(&self) -> usize {
        self.rollup_start
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, date: &str) -> VaccinationRecord {
        VaccinationRecord {
            state: state.to_string(),
            updated_on: date.to_string(),
            ..VaccinationRecord::default()
        }
    }

    #[test]
    fn normalize_date_pads_day_and_month() {
        assert_eq!(normalize_date("1/6/2021"), Some("01/06/2021".to_string()));
        assert_eq!(normalize_date("25/06/2021"), Some("25/06/2021".to_string()));
        assert_eq!(normalize_date(" 25/06/2021 "), Some("25/06/2021".to_string()));
    }

    #[test]
    fn normalize_date_rejects_garbage() {
        assert_eq!(normalize_date("2021-06-25"), None);
        assert_eq!(normalize_date("32/01/2021"), None);
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn regions_keep_first_seen_order() {
        let records = vec![
            record("Beta", "01/01/2021"),
            record("Alpha", "01/01/2021"),
            record("Beta", "02/01/2021"),
            record("Alpha", "02/01/2021"),
        ];
        let dataset = Dataset::new(records, &RollupBoundary::Offset(4)).unwrap();
        assert_eq!(dataset.regions(), ["Beta".to_string(), "Alpha".to_string()]);
    }

    #[test]
    fn offset_beyond_table_is_rejected() {
        let records = vec![record("Alpha", "01/01/2021")];
        let err = Dataset::new(records, &RollupBoundary::Offset(2)).unwrap_err();
        assert!(matches!(err, LoadError::OffsetOutOfRange { offset: 2, rows: 1 }));
    }

    #[test]
    fn marker_resolves_to_first_occurrence() {
        let records = vec![
            record("Alpha", "01/01/2021"),
            record("Rollup", "01/01/2021"),
            record("Rollup", "02/01/2021"),
        ];
        let dataset = Dataset::new(records, &RollupBoundary::Marker("Rollup".to_string())).unwrap();
        assert_eq!(dataset.rollup_start(), 1);
    }

    #[test]
    fn absent_marker_is_rejected() {
        let records = vec![record("Alpha", "01/01/2021")];
        let err =
            Dataset::new(records, &RollupBoundary::Marker("Rollup".to_string())).unwrap_err();
        assert!(matches!(err, LoadError::MarkerNotFound(_)));
    }
}
