//! Temperature time-series smoothing pipeline.
//!
//! The crate takes a timestamped temperature series, runs it through a
//! moving-average-family filter, and pairs the original and smoothed
//! series into two aligned CSV artifacts for external rendering.
//!
//! Fetching raw data over HTTP and plotting the result are external
//! collaborators; they only meet this crate through the CSV artifacts
//! described in [`data::loader`] and [`data::export`].

pub mod data;
pub mod error;
