//! Shared test fixtures and utilities for armature crates.
//!
//! Provides deterministic RNG setup and reusable kinematic chain fixtures.

pub mod chains;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use chains::{planar_two_link, random_chain, single_hinge};
pub use rng::seeded_rng;
