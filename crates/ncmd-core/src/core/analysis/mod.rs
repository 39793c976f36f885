//! # Cluster Statistics
//!
//! The numeric core of NCMD: component isolation, per-component radial distributions
//! and their normalized aggregate, and cluster-size reporting.
//!
//! ## Pipeline
//!
//! 1. [`isolation::isolate`] partitions a configuration into connected components.
//! 2. [`histogram::radial_distribution`] bins each component's pairwise distances.
//! 3. [`aggregate::aggregate`] sums the aligned histograms and divides by the maximum.
//! 4. [`clusters::cluster_sizes`] reports the particle count of every component.
//!
//! Every stage is pure and synchronous. Failures are reported through
//! [`error::AnalysisError`] at the point of violation.

pub mod aggregate;
pub mod clusters;
pub mod error;
pub mod histogram;
pub mod isolation;
