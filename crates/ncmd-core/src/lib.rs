//! # NCMD Core Library
//!
//! Convenience layer for atomistic simulation studies of nanoclusters: building composite
//! scenes, driving Langevin dynamics through an external engine, converting trajectories,
//! and computing cluster statistics over atomic configurations.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Configuration`, `ComponentPartition`),
//!   the numeric analysis core (histogramming, aggregation, cluster sizes), trajectory I/O, and
//!   the collaborator interfaces (`GeometryProvider`, `SceneBuilder`, `DynamicsRunner`) behind
//!   which the physics engine lives.
//!
//! - **[`engine`]: The Plumbing.** Configuration types and builders, the crate-wide error type,
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures (cluster analysis, scene assembly,
//!   dynamics runs, trajectory conversion) that tie `core` and `engine` together.

pub mod core;
pub mod engine;
pub mod workflows;
