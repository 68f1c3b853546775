//! Reusable kinematic chain fixtures.

use armature_chain::{AxisMask, Joint, KinematicChain};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rand::Rng;

fn translation(x: f32, y: f32, z: f32) -> Isometry3<f32> {
    Isometry3::from_parts(Translation3::new(x, y, z), UnitQuaternion::identity())
}

/// One z-hinge at the origin with a rigid effector frame at `(reach, 0, 0)`.
pub fn single_hinge(reach: f32) -> KinematicChain {
    KinematicChain::new(vec![
        Joint::new("hinge", Isometry3::identity(), AxisMask::Z),
        Joint::new("tip", translation(reach, 0.0, 0.0), AxisMask::NONE),
    ])
}

/// Two unit links in the xy plane, both hinged about z, rigid hand frame.
///
/// At rest the effector sits at `(2, 0, 0)`.
pub fn planar_two_link() -> KinematicChain {
    KinematicChain::new(vec![
        Joint::new("shoulder", Isometry3::identity(), AxisMask::Z),
        Joint::new("elbow", translation(1.0, 0.0, 0.0), AxisMask::Z),
        Joint::new("hand", translation(1.0, 0.0, 0.0), AxisMask::NONE),
    ])
}

/// Random chain of `joints` articulated joints plus a rigid effector frame.
///
/// Offsets are unit-scale, every joint keeps at least one active axis, and
/// each joint starts at a random rotation, so the resulting Jacobians are
/// well away from the all-zero rest case.
pub fn random_chain(rng: &mut impl Rng, joints: usize) -> KinematicChain {
    let mut out = Vec::with_capacity(joints + 1);
    for i in 0..joints {
        let axes = loop {
            let mask = AxisMask::new(rng.gen(), rng.gen(), rng.gen());
            if !mask.is_empty() {
                break mask;
            }
        };
        let offset = Isometry3::from_parts(
            Translation3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ),
            UnitQuaternion::identity(),
        );
        let mut joint = Joint::new(format!("joint_{i}"), offset, axes);
        joint.rotation = UnitQuaternion::from_scaled_axis(Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
        out.push(joint);
    }
    out.push(Joint::new(
        "effector",
        translation(rng.gen_range(0.2..1.0), 0.0, 0.0),
        AxisMask::NONE,
    ));
    KinematicChain::new(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn fixtures_have_expected_dofs() {
        assert_eq!(single_hinge(1.0).joint_dofs(), 1);
        assert_eq!(planar_two_link().joint_dofs(), 2);
    }

    #[test]
    fn random_chain_is_reproducible() {
        let a = random_chain(&mut seeded_rng(7), 4);
        let b = random_chain(&mut seeded_rng(7), 4);
        assert_eq!(a.joint_dofs(), b.joint_dofs());
        let pa = a.effector_pose().translation.vector;
        let pb = b.effector_pose().translation.vector;
        assert!((pa - pb).norm() < f32::EPSILON);
    }

    #[test]
    fn random_chain_joints_always_articulate() {
        let chain = random_chain(&mut seeded_rng(3), 6);
        // 6 articulated joints plus the rigid effector frame.
        assert_eq!(chain.len(), 7);
        assert!(chain.joint_dofs() >= 6);
    }
}
