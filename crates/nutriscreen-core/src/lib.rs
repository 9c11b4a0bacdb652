//! nutriscreen-core
//!
//! Pure domain types for the growth standards engine: sex, measurements,
//! classification labels and the indicator/assessment result shapes.
//! No table data and no calculation logic lives here.

pub mod error;
pub mod models;
