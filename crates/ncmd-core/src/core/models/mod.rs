//! # Core Models Module
//!
//! Data structures describing atomic configurations and their decomposition into
//! connected components.
//!
//! ## Key Components
//!
//! - [`atom`] - A point particle with a species label and a Cartesian position
//! - [`configuration`] - An ordered collection of atoms, the subject of every analysis
//! - [`partition`] - Connected components of a configuration grouped by dimensionality
//! - [`element`] - Static per-element data (atomic masses)
//!
//! ## Usage
//!
//! ```ignore
//! use ncmd::core::models::{atom::Atom, configuration::Configuration};
//! use nalgebra::Point3;
//!
//! let mut dimer = Configuration::new();
//! dimer.push(Atom::new("Ar", Point3::new(0.0, 0.0, 0.0)));
//! dimer.push(Atom::new("Ar", Point3::new(3.8, 0.0, 0.0)));
//! ```

pub mod atom;
pub mod configuration;
pub mod element;
pub mod partition;
