//! Cinegrade - snapshot & export toolkit for AI color-grading sessions.
//!
//! Captures snapshots of color-transfer results together with the exact
//! parameters that produced them, regenerates 3D-LUT artifacts on demand,
//! and bundles everything into a single downloadable archive.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
