//! # Workflows Module
//!
//! End-to-end procedures built on the core layer. Each workflow validates its
//! parameters, reports progress through a [`ProgressReporter`](crate::engine::progress::ProgressReporter),
//! and returns an [`EngineError`](crate::engine::error::EngineError) on failure.
//!
//! - **Cluster analysis** ([`analyze`]) - isolation, cluster sizes and the normalized
//!   aggregate radial distribution of one configuration
//! - **Scene assembly** ([`scene`]) - repeated attachment of a guest to a growing scene
//! - **Dynamics** ([`simulate`]) - Langevin runs with periodic trajectory output
//! - **Conversion** ([`convert`]) - streaming trajectory format conversion to XYZ

pub mod analyze;
pub mod convert;
pub mod scene;
pub mod simulate;
