//! Data module - dataset loading and the filter/reshape pipeline

mod loader;
mod pipeline;
mod record;

pub use loader::{DatasetLoader, LoadError};
pub use pipeline::{Breakdown, Pipeline, PipelineError};
pub use record::{normalize_date, Dataset, RollupBoundary, VaccinationRecord};
