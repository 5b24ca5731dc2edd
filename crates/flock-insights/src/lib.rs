//! Discipleship diagnostics for congregation surveys.
//!
//! The [`diagnostics`] module turns raw questionnaire answers into sub-scores, composite
//! indices, and a single profile label per person, then folds those results into cohort
//! statistics for the dashboard. Every surface (dashboard, member analysis, printable report)
//! calls the same engine so identical answers always produce identical results.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod surveys;
pub mod telemetry;
