//! # Engine Module
//!
//! Shared plumbing for the workflows: typed configuration with builders, the
//! top-level error type that wraps every core failure, and progress reporting.
//!
//! - **Configuration** ([`config`]) - analysis, dynamics and scene parameters
//! - **Error Handling** ([`error`]) - [`error::EngineError`] and its conversions
//! - **Progress Monitoring** ([`progress`]) - phase/task events for front ends

pub mod config;
pub mod error;
pub mod progress;
