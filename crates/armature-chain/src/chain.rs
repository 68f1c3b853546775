//! Ordered kinematic chain and its walker.
//!
//! The chain stores joints root-first. The solver-facing views
//! ([`KinematicChain::joint_axes`], [`KinematicChain::apply_deltas`]) walk
//! it from the end effector toward the root, so the joint nearest the
//! effector contributes the earliest Jacobian columns.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use armature_core::ChainError;

use crate::joint::Joint;

/// World-space geometry behind one Jacobian column: where the joint sits
/// and the world direction of the rotation axis driving that column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAxis {
    /// Joint origin in world coordinates.
    pub position: Vector3<f32>,
    /// Rotation axis as a world direction (unit length).
    pub axis: Vector3<f32>,
}

/// An ordered kinematic chain from root to end effector.
///
/// The last joint is the end effector; give it an empty
/// [`AxisMask`](crate::AxisMask) when the effector frame itself does not
/// articulate.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    joints: Vec<Joint>,
}

impl KinematicChain {
    /// Build a chain from joints ordered root to end effector.
    pub fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    /// Access the joint definitions, root first.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Total active rotational axes across the chain.
    ///
    /// Recomputed on every call; the chain's structure may change between
    /// solves and the solver must never cache this.
    pub fn joint_dofs(&self) -> usize {
        self.joints.iter().map(Joint::dofs).sum()
    }

    /// Composed world transform of every joint, root first.
    ///
    /// Each entry includes the joint's own current rotation:
    /// `world[i] = world[i-1] * offset[i] * rotation[i]`.
    pub fn world_transforms(&self) -> Vec<Isometry3<f32>> {
        let mut transforms = Vec::with_capacity(self.joints.len());
        let mut world = Isometry3::identity();
        for joint in &self.joints {
            world = world
                * joint.offset
                * Isometry3::from_parts(Translation3::identity(), joint.rotation);
            transforms.push(world);
        }
        transforms
    }

    /// World pose of the end effector (identity for an empty chain).
    pub fn effector_pose(&self) -> Isometry3<f32> {
        self.world_transforms()
            .last()
            .copied()
            .unwrap_or_else(Isometry3::identity)
    }

    /// Active joint axes in Jacobian column order: the joint nearest the
    /// effector contributes the earliest entries, axes in x, y, z order
    /// within a joint.
    pub fn joint_axes(&self) -> Vec<JointAxis> {
        let worlds = self.world_transforms();
        let mut columns = Vec::with_capacity(self.joint_dofs());
        for (joint, world) in self.joints.iter().zip(worlds.iter()).rev() {
            for axis in joint.axes.unit_axes() {
                columns.push(JointAxis {
                    position: world.translation.vector,
                    axis: world.rotation * axis.into_inner(),
                });
            }
        }
        columns
    }

    /// Apply a joint-delta vector, one axis-angle rotation per active axis,
    /// in the same order as [`KinematicChain::joint_axes`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DeltaDimMismatch`] when the slice length does
    /// not match the live joint-DOF count; the chain is left untouched.
    pub fn apply_deltas(&mut self, deltas: &[f32]) -> Result<(), ChainError> {
        let expected = self.joint_dofs();
        if deltas.len() != expected {
            return Err(ChainError::DeltaDimMismatch {
                expected,
                got: deltas.len(),
            });
        }

        let mut next = 0;
        for joint in self.joints.iter_mut().rev() {
            for axis in joint.axes.unit_axes() {
                joint.rotation *= UnitQuaternion::from_axis_angle(&axis, deltas[next]);
                next += 1;
            }
        }
        Ok(())
    }

    /// Reset every joint to its rest rotation.
    pub fn reset_pose(&mut self) {
        for joint in &mut self.joints {
            joint.rotation = UnitQuaternion::identity();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
