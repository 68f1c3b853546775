//! Kinematic chain representation for the armature IK stack.
//!
//! A [`KinematicChain`] is an ordered list of rotational joints from the
//! root to the end effector. Each [`Joint`] carries a static offset from its
//! parent frame, a mask of active local rotation axes, and its current
//! rotation. The chain composes world transforms, reports the live
//! joint-space DOF count, and applies solver deltas back onto the joints.

pub mod chain;
pub mod joint;

pub use chain::{JointAxis, KinematicChain};
pub use joint::{AxisMask, Joint};
