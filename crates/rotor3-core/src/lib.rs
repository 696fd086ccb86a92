//! # rotor3-core
//!
//! Rotation representations for SO(3), the group of 3D rotations.
//!
//! A rotation can be held as an orthogonal 3x3 matrix ([`Rotation3`]) or as a
//! unit quaternion ([`UnitQuaternion`]); the two convert losslessly into each
//! other (up to the global quaternion sign, since q and -q encode the same
//! rotation). Both convert to and from axis-angle pairs and rotation vectors
//! (the logarithm map of SO(3)).
//!
//! ## Modules
//!
//! - [`rotation`]: matrix representation, frame construction, composition
//! - [`quaternion`]: quaternion representation, powers, conversions

pub mod quaternion;
pub mod rotation;

pub use quaternion::UnitQuaternion;
pub use rotation::{Rotation3, RotationError};

use nalgebra::{Matrix3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// Tolerance shared by equality tests, degeneracy guards, and the
/// orthogonality check in the two-axis frame constructors.
pub const EPSILON: f64 = 1e-9;
