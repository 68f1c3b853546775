use nalgebra::{Isometry3, UnitQuaternion, UnitVector3, Vector3};
use serde::{Deserialize, Serialize};

/// Set of local axes a joint is allowed to rotate about.
///
/// Any subset of {x, y, z}, including the empty set. A joint with an empty
/// mask contributes no Jacobian columns; the solver treats it as a rigid
/// frame (e.g. an end-effector marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMask {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisMask {
    /// All three rotation axes active.
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };

    /// No active axes (rigid frame).
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };

    /// Only the local x axis.
    pub const X: Self = Self {
        x: true,
        y: false,
        z: false,
    };

    /// Only the local y axis.
    pub const Y: Self = Self {
        x: false,
        y: true,
        z: false,
    };

    /// Only the local z axis.
    pub const Z: Self = Self {
        x: false,
        y: false,
        z: true,
    };

    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Number of active axes (0-3).
    pub const fn count(self) -> usize {
        self.x as usize + self.y as usize + self.z as usize
    }

    pub const fn is_empty(self) -> bool {
        self.count() == 0
    }

    /// Active unit axes in x, y, z order.
    pub fn unit_axes(self) -> impl Iterator<Item = UnitVector3<f32>> {
        [
            (self.x, Vector3::x_axis()),
            (self.y, Vector3::y_axis()),
            (self.z, Vector3::z_axis()),
        ]
        .into_iter()
        .filter(|(active, _)| *active)
        .map(|(_, axis)| axis)
    }
}

/// A single joint in a kinematic chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joint {
    /// Name of this joint (for diagnostics).
    pub name: String,
    /// Static transform from the parent joint's frame to this joint's frame.
    pub offset: Isometry3<f32>,
    /// Local axes this joint may rotate about.
    pub axes: AxisMask,
    /// Current joint rotation, applied after `offset`.
    pub rotation: UnitQuaternion<f32>,
}

impl Joint {
    /// Create a joint at its rest pose (identity rotation).
    pub fn new(name: impl Into<String>, offset: Isometry3<f32>, axes: AxisMask) -> Self {
        Self {
            name: name.into(),
            offset,
            axes,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Number of rotational DOFs this joint contributes.
    pub const fn dofs(&self) -> usize {
        self.axes.count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Translation3;

    #[test]
    fn axis_mask_counts() {
        assert_eq!(AxisMask::ALL.count(), 3);
        assert_eq!(AxisMask::NONE.count(), 0);
        assert_eq!(AxisMask::X.count(), 1);
        assert_eq!(AxisMask::new(true, false, true).count(), 2);
        assert!(AxisMask::NONE.is_empty());
        assert!(!AxisMask::Z.is_empty());
    }

    #[test]
    fn unit_axes_in_xyz_order() {
        let axes: Vec<_> = AxisMask::ALL.unit_axes().collect();
        assert_eq!(axes.len(), 3);
        assert_eq!(axes[0], Vector3::x_axis());
        assert_eq!(axes[1], Vector3::y_axis());
        assert_eq!(axes[2], Vector3::z_axis());

        let xz: Vec<_> = AxisMask::new(true, false, true).unit_axes().collect();
        assert_eq!(xz.len(), 2);
        assert_eq!(xz[0], Vector3::x_axis());
        assert_eq!(xz[1], Vector3::z_axis());
    }

    #[test]
    fn unit_axes_empty_mask() {
        assert_eq!(AxisMask::NONE.unit_axes().count(), 0);
    }

    #[test]
    fn joint_starts_at_rest() {
        let joint = Joint::new(
            "elbow",
            Isometry3::from_parts(Translation3::new(1.0, 0.0, 0.0), UnitQuaternion::identity()),
            AxisMask::Z,
        );
        assert_eq!(joint.name, "elbow");
        assert_eq!(joint.dofs(), 1);
        assert_eq!(joint.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn axis_mask_serde_roundtrip() {
        let mask = AxisMask::new(true, false, true);
        let json = serde_json::to_string(&mask).unwrap();
        let mask2: AxisMask = serde_json::from_str(&json).unwrap();
        assert_eq!(mask, mask2);
    }

    #[test]
    fn joint_serde_roundtrip() {
        let joint = Joint::new(
            "wrist",
            Isometry3::from_parts(Translation3::new(0.0, 0.5, 0.0), UnitQuaternion::identity()),
            AxisMask::ALL,
        );
        let json = serde_json::to_string(&joint).unwrap();
        let joint2: Joint = serde_json::from_str(&json).unwrap();
        assert_eq!(joint2.name, "wrist");
        assert_eq!(joint2.axes, AxisMask::ALL);
    }
}
