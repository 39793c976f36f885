//! Interfaces to the external simulation engine.
//!
//! The analysis core never talks to a physics library directly. It consumes the
//! capabilities below through traits, so a different engine can be slotted in without
//! touching the numeric code:
//!
//! - [`geometry::GeometryProvider`] - pairwise distances and connected-component isolation
//! - [`scene::SceneBuilder`] - attaching one configuration to another at a minimum distance
//! - [`dynamics::DynamicsRunner`] - Langevin dynamics with a Maxwell-Boltzmann start
//!
//! Lightweight default implementations ship for geometry ([`geometry::CutoffConnectivity`])
//! and scene assembly ([`scene::RandomAttachment`]). Dynamics has no bundled engine.

pub mod dynamics;
pub mod geometry;
pub mod scene;
