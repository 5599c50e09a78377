//! Domain Layer - Core entities and value objects
//!
//! Pure business data for the compliance report engine: issues, grouped
//! issues, statistics, grades and the correction lifecycle value objects.

pub mod report;

pub use report::*;
