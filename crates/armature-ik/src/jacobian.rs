//! Task-space Jacobian assembly.

use armature_chain::KinematicChain;
use nalgebra::DMatrix;

/// Assemble the `task_dofs x joint_dofs` Jacobian for the chain's current
/// state.
///
/// One column per active joint axis, in the chain's column order (joint
/// nearest the effector first; x, then y, then z within a joint). Rows 0-2
/// are the linear velocity response `axis x (effector - joint)`, rows 3-5
/// the angular response (the world axis itself); only the first `task_dofs`
/// rows are kept, matching the residual layout.
///
/// A chain with no active axes yields a `task_dofs x 0` matrix.
pub fn build_jacobian(task_dofs: usize, chain: &KinematicChain) -> DMatrix<f32> {
    let columns = chain.joint_axes();
    let effector = chain.effector_pose().translation.vector;

    let mut jacobian = DMatrix::zeros(task_dofs, columns.len());
    for (j, column) in columns.iter().enumerate() {
        let linear = column.axis.cross(&(effector - column.position));
        if task_dofs > 0 {
            jacobian[(0, j)] = linear.x;
        }
        if task_dofs > 1 {
            jacobian[(1, j)] = linear.y;
        }
        if task_dofs > 2 {
            jacobian[(2, j)] = linear.z;
        }
        if task_dofs > 3 {
            jacobian[(3, j)] = column.axis.x;
        }
        if task_dofs > 4 {
            jacobian[(4, j)] = column.axis.y;
        }
        if task_dofs > 5 {
            jacobian[(5, j)] = column.axis.z;
        }
    }
    jacobian
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use armature_chain::{AxisMask, Joint};
    use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

    fn translation(x: f32, y: f32, z: f32) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::new(x, y, z), UnitQuaternion::identity())
    }

    #[test]
    fn single_joint_column_is_axis_cross_lever() {
        // One z-hinge at the origin, effector frame at (2, 0, 0).
        let chain = KinematicChain::new(vec![
            Joint::new("hinge", Isometry3::identity(), AxisMask::Z),
            Joint::new("tip", translation(2.0, 0.0, 0.0), AxisMask::NONE),
        ]);
        let jacobian = build_jacobian(3, &chain);
        assert_eq!(jacobian.shape(), (3, 1));

        let expected = Vector3::z().cross(&Vector3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(jacobian[(0, 0)], expected.x, epsilon = 1e-6);
        assert_relative_eq!(jacobian[(1, 0)], expected.y, epsilon = 1e-6);
        assert_relative_eq!(jacobian[(2, 0)], expected.z, epsilon = 1e-6);
    }

    #[test]
    fn angular_rows_hold_the_world_axis() {
        let chain = KinematicChain::new(vec![
            Joint::new("hinge", Isometry3::identity(), AxisMask::Y),
            Joint::new("tip", translation(1.0, 0.0, 0.0), AxisMask::NONE),
        ]);
        let jacobian = build_jacobian(6, &chain);
        assert_eq!(jacobian.shape(), (6, 1));
        assert_relative_eq!(jacobian[(3, 0)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[(4, 0)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[(5, 0)], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn column_count_tracks_live_joint_dofs() {
        let mut joints = vec![
            Joint::new("ball", Isometry3::identity(), AxisMask::ALL),
            Joint::new("hinge", translation(1.0, 0.0, 0.0), AxisMask::Z),
        ];
        let chain = KinematicChain::new(joints.clone());
        assert_eq!(build_jacobian(3, &chain).ncols(), 4);

        // Structure change: deactivate the ball joint's y axis.
        joints[0].axes = AxisMask::new(true, false, true);
        let chain = KinematicChain::new(joints);
        assert_eq!(build_jacobian(3, &chain).ncols(), 3);
    }

    #[test]
    fn degenerate_chain_yields_zero_columns() {
        let chain = KinematicChain::new(vec![Joint::new(
            "frame",
            translation(0.0, 1.0, 0.0),
            AxisMask::NONE,
        )]);
        let jacobian = build_jacobian(3, &chain);
        assert_eq!(jacobian.shape(), (3, 0));
    }

    #[test]
    fn truncated_rows_match_task_dofs() {
        let chain = KinematicChain::new(vec![
            Joint::new("hinge", Isometry3::identity(), AxisMask::Z),
            Joint::new("tip", translation(1.0, 1.0, 0.0), AxisMask::NONE),
        ]);
        let jacobian = build_jacobian(2, &chain);
        assert_eq!(jacobian.shape(), (2, 1));
        let expected = Vector3::z().cross(&Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(jacobian[(0, 0)], expected.x, epsilon = 1e-6);
        assert_relative_eq!(jacobian[(1, 0)], expected.y, epsilon = 1e-6);
    }
}
