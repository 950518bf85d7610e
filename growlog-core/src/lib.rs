//! Entity store and time-series analytics for tracked plants.
//!
//! Everything in here is synchronous and free of shared state: the analysis
//! functions are pure over slices of records, so distinct plants can be
//! processed concurrently as long as each slice is assembled before the call.

pub mod analysis;
pub mod error;
pub mod export;
pub mod store;
