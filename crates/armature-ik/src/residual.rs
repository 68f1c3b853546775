//! Task-space residual between a target pose and the effector's pose.

use nalgebra::{DVector, Isometry3, Quaternion, UnitQuaternion, Vector3};

/// Compute the task-space error vector.
///
/// Layout matches the Jacobian rows: slots 0-2 hold the world position
/// error (desired minus current), slots 3-5 hold the orientation error as
/// the roll/pitch/yaw decomposition of the shortest rotation from current
/// to desired. Only the first `task_dofs` slots exist.
///
/// The desired quaternion is normalized before use.
pub fn task_residual(
    task_dofs: usize,
    target_position: &Vector3<f32>,
    target_rotation: &Quaternion<f32>,
    effector: &Isometry3<f32>,
) -> DVector<f32> {
    let mut residual = DVector::zeros(task_dofs);

    let delta_pos = target_position - effector.translation.vector;
    if task_dofs > 0 {
        residual[0] = delta_pos.x;
    }
    if task_dofs > 1 {
        residual[1] = delta_pos.y;
    }
    if task_dofs > 2 {
        residual[2] = delta_pos.z;
    }

    if task_dofs > 3 {
        let desired = UnitQuaternion::new_normalize(*target_rotation);
        let mut diff = (desired * effector.rotation.inverse()).into_inner();
        // q and -q encode the same rotation; keep the scalar part
        // non-negative (shortest-path convention).
        if diff.w < 0.0 {
            diff = -diff;
        }
        let (roll, pitch, yaw) = UnitQuaternion::new_normalize(diff).euler_angles();

        residual[3] = roll;
        if task_dofs > 4 {
            residual[4] = pitch;
        }
        if task_dofs > 5 {
            residual[5] = yaw;
        }
    }

    residual
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
