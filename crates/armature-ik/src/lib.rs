//! Jacobian-based inverse kinematics for armature chains.
//!
//! Computes the joint-angle adjustment that best moves a chain's end
//! effector toward a target pose. The Jacobian relating joint angular
//! velocities to effector velocity is generally non-square and often
//! near-singular, so several inversion strategies are provided: plain
//! transpose, damped algebraic pseudo-inverse, damped least squares, and
//! three SVD-derived variants.
//!
//! # Architecture
//!
//! ```text
//! KinematicChain ──► residual + Jacobian ──► IkSolver strategy ──► joint deltas
//! ```
//!
//! The solver never mutates the chain: the caller applies the returned
//! deltas (via [`KinematicChain::apply_deltas`](armature_chain::KinematicChain::apply_deltas)),
//! re-reads the chain, and iterates.

pub mod jacobian;
pub mod residual;
pub mod solver;
pub mod svd;

pub use solver::{IkSolver, Strategy};
pub use svd::{NalgebraSvd, SvdBackend, SvdTriple};
