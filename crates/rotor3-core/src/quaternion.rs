//! Unit quaternions
//!
//! [`UnitQuaternion`] represents a rotation as four scalars (w, x, y, z),
//! scalar part first. q and -q encode the same rotation; conversions from
//! matrix form pick the representative with non-negative scalar part.
//! Continuous powers of a quaternion realize spherical interpolation as
//! exponentiation instead of explicit sine blending.

use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::rotation::{Rotation3, RotationError};
use crate::{Mat3, Vec3, EPSILON};

/// A quaternion held as scalar part `w` and vector part `v`.
///
/// Unit norm is an invariant by convention: every derived constructor
/// produces unit norm, [`UnitQuaternion::new`] takes the components as
/// given, and [`UnitQuaternion::normalize`] re-establishes the invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitQuaternion {
    w: f64,
    v: Vec3,
}

impl UnitQuaternion {
    /// The identity rotation (1, 0, 0, 0).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            v: Vec3::zeros(),
        }
    }

    /// Build from the four components, scalar part first.
    ///
    /// The components are taken as given; call
    /// [`UnitQuaternion::normalize`] (or use a derived constructor) to get
    /// unit norm.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            w,
            v: Vec3::new(x, y, z),
        }
    }

    /// Build from a slice of four components `[w, x, y, z]`.
    ///
    /// Fails with [`RotationError::InvalidShape`] for any other length.
    pub fn from_slice(elems: &[f64]) -> Result<Self, RotationError> {
        if elems.len() != 4 {
            return Err(RotationError::InvalidShape {
                expected: 4,
                got: elems.len(),
            });
        }
        Ok(Self::new(elems[0], elems[1], elems[2], elems[3]))
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// The axis is divided by its norm before use; a near-zero axis fails
    /// with [`RotationError::DegenerateAxis`].
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Result<Self, RotationError> {
        let norm = axis.norm();
        if norm < EPSILON {
            return Err(RotationError::DegenerateAxis);
        }
        Ok(Self::from_unit_axis_angle(&(axis / norm), angle))
    }

    /// Rotation described by a rotation vector (angle = norm, axis =
    /// normalized vector). A near-zero vector yields the identity.
    pub fn from_rotation_vector(v: &Vec3) -> Self {
        let angle = v.norm();
        if angle < EPSILON {
            return Self::identity();
        }
        Self::from_unit_axis_angle(&(v / angle), angle)
    }

    /// Extract the quaternion of a rotation matrix.
    ///
    /// Branches on the largest of {trace, m00, m11, m22} so no divisor is
    /// near zero; of the two equivalent representatives, the one with
    /// non-negative scalar part is returned.
    pub fn from_rotation(r: &Rotation3) -> Self {
        let m = r.matrix();
        let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

        let (w, x, y, z) = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            (
                0.25 * s,
                (m[(2, 1)] - m[(1, 2)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * 2.0;
            (
                (m[(2, 1)] - m[(1, 2)]) / s,
                0.25 * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            let s = (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * 2.0;
            (
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                0.25 * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
            )
        } else {
            let s = (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * 2.0;
            (
                (m[(1, 0)] - m[(0, 1)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                0.25 * s,
            )
        };

        let q = Self {
            w,
            v: Vec3::new(x, y, z),
        };
        let q = if q.w < 0.0 { -q } else { q };
        q.normalized()
    }

    /// Matrix form of this rotation.
    pub fn to_rotation(&self) -> Rotation3 {
        let q = self.normalized();
        let (w, x, y, z) = (q.w, q.v.x, q.v.y, q.v.z);
        Rotation3::from_matrix_unchecked(Mat3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        ))
    }

    /// Equivalent axis-angle pair.
    ///
    /// The axis is the normalized vector part and the angle is
    /// `2·atan2(‖v‖, w)`, in [0, 2π). A near-zero vector part is the
    /// identity rotation: the axis is undefined and (0, 0, 0) with angle 0
    /// is returned.
    pub fn to_axis_angle(&self) -> (Vec3, f64) {
        let q = self.normalized();
        let n = q.v.norm();
        if n < EPSILON {
            return (Vec3::zeros(), 0.0);
        }
        (q.v / n, 2.0 * n.atan2(q.w))
    }

    /// Equivalent rotation vector: axis scaled by angle.
    pub fn to_rotation_vector(&self) -> Vec3 {
        let (axis, angle) = self.to_axis_angle();
        axis * angle
    }

    /// Continuous power: the rotation scaled to `t` times its angle.
    ///
    /// `t` is any real scalar; range restriction is the interpolator's
    /// concern. The identity raised to any power is the identity.
    pub fn powf(&self, t: f64) -> Self {
        let (axis, angle) = self.to_axis_angle();
        if angle.abs() < EPSILON {
            return Self::identity();
        }
        Self::from_unit_axis_angle(&axis, angle * t)
    }

    /// The conjugate: negated vector part. Equals the inverse for a unit
    /// quaternion.
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            v: -self.v,
        }
    }

    /// Scale to unit norm in place. The norm must be non-zero.
    pub fn normalize(&mut self) {
        let n = self.norm();
        self.w /= n;
        self.v /= n;
    }

    /// A normalized copy.
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Euclidean distance over the four components.
    ///
    /// Used to pick the shorter of {q, -q} toward a target: the nearer
    /// representative is the rotation requiring at most π of arc.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.w - other.w).powi(2) + (self.v - other.v).norm_squared()).sqrt()
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.w * other.w + self.v.dot(&other.v)
    }

    /// Squared norm over the four components.
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Norm over the four components.
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scalar part.
    pub fn w(&self) -> f64 {
        self.w
    }

    /// First vector component.
    pub fn x(&self) -> f64 {
        self.v.x
    }

    /// Second vector component.
    pub fn y(&self) -> f64 {
        self.v.y
    }

    /// Third vector component.
    pub fn z(&self) -> f64 {
        self.v.z
    }

    /// Scalar part.
    pub fn scalar(&self) -> f64 {
        self.w
    }

    /// Vector part.
    pub fn vector(&self) -> Vec3 {
        self.v
    }

    fn from_unit_axis_angle(axis: &Vec3, angle: f64) -> Self {
        let (s, c) = (angle / 2.0).sin_cos();
        Self { w: c, v: axis * s }
    }
}

impl Default for UnitQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product. Not commutative; composition order matches the matrix
/// product of the corresponding rotations.
impl Mul for UnitQuaternion {
    type Output = UnitQuaternion;

    fn mul(self, rhs: UnitQuaternion) -> UnitQuaternion {
        UnitQuaternion {
            w: self.w * rhs.w - self.v.dot(&rhs.v),
            v: self.v.cross(&rhs.v) + rhs.v * self.w + self.v * rhs.w,
        }
    }
}

/// The antipodal representative; the same rotation.
impl Neg for UnitQuaternion {
    type Output = UnitQuaternion;

    fn neg(self) -> UnitQuaternion {
        UnitQuaternion {
            w: -self.w,
            v: -self.v,
        }
    }
}

/// Tolerant equality: the component-wise sum of squared differences must be
/// below [`EPSILON`]. Note q and -q compare unequal even though they encode
/// the same rotation.
impl PartialEq for UnitQuaternion {
    fn eq(&self, other: &Self) -> bool {
        (self.w - other.w).powi(2) + (self.v - other.v).norm_squared() < EPSILON
    }
}

impl From<Rotation3> for UnitQuaternion {
    fn from(r: Rotation3) -> Self {
        Self::from_rotation(&r)
    }
}
