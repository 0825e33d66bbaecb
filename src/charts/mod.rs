//! Charts module - Chart rendering

mod plotter;

pub use plotter::{
    format_count, ChartPlotter, AGE_BAR_COLOR, PIE_PALETTE, SESSIONS_COLOR, SITES_COLOR,
};
