//! # Core Module
//!
//! The stateless foundation of NCMD.
//!
//! ## Architecture
//!
//! - **Atomic Representation** ([`models`]) - Atoms, configurations and component partitions
//! - **Cluster Statistics** ([`analysis`]) - Histogram engine, component aggregator and
//!   cluster size reporter
//! - **File I/O** ([`io`]) - Trajectory frame readers/writers and CSV reports
//! - **Collaborators** ([`providers`]) - Interfaces to the geometry, scene-assembly and
//!   dynamics engines, with lightweight default implementations where they are in scope
//! - **Utilities** ([`utils`]) - Geometric helpers shared by the layers above
//!
//! Nothing here integrates equations of motion or evaluates interatomic potentials; those
//! concerns are reached only through [`providers::dynamics::DynamicsRunner`].

pub mod analysis;
pub mod io;
pub mod models;
pub mod providers;
pub mod utils;
