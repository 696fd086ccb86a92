//! SO(3) rotation matrices
//!
//! [`Rotation3`] keeps an orientation as an orthogonal 3x3 matrix with
//! determinant +1. Composition is the matrix product, inversion is the
//! transpose, and conversions to axis-angle and rotation-vector form go
//! through the quaternion representation.

use std::ops::Mul;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quaternion::UnitQuaternion;
use crate::{Mat3, Vec3, EPSILON};

/// Rotation construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    /// A rotation axis with near-zero norm cannot define a direction.
    #[error("rotation axis has near-zero norm")]
    DegenerateAxis,
    /// Two parallel directions span no plane, so no frame can be derived.
    #[error("direction vectors are parallel; cannot derive an orthonormal frame")]
    DegenerateFrame,
    /// A slice constructor was handed the wrong number of elements.
    #[error("expected {expected} elements, got {got}")]
    InvalidShape { expected: usize, got: usize },
}

/// A member of SO(3), usable both as an orientation in 3D and as a
/// rotational transformation of vectors.
///
/// Invariant: the columns are mutually orthogonal unit vectors. Every
/// derived constructor (`from_axis_angle`, `from_rotation_vector`,
/// `from_xy`, ...) upholds this; the raw constructors
/// ([`Rotation3::from_matrix_unchecked`], [`Rotation3::from_columns`],
/// [`Rotation3::from_row_major`]) and the per-column setters take the
/// caller's data as-is and perform no checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rotation3 {
    m: Mat3,
}

impl Rotation3 {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self {
            m: Mat3::identity(),
        }
    }

    /// Take over a matrix without verifying orthogonality.
    pub fn from_matrix_unchecked(m: Mat3) -> Self {
        Self { m }
    }

    /// Build from three column vectors. No orthogonality checks.
    pub fn from_columns(x: &Vec3, y: &Vec3, z: &Vec3) -> Self {
        Self {
            m: Mat3::from_columns(&[*x, *y, *z]),
        }
    }

    /// Build from nine scalars in row-major order. No orthogonality checks.
    pub fn from_row_major(elems: [f64; 9]) -> Self {
        Self {
            m: Mat3::from_row_slice(&elems),
        }
    }

    /// Build from a row-major slice of nine scalars.
    ///
    /// Fails with [`RotationError::InvalidShape`] when the slice does not
    /// hold exactly nine elements. No orthogonality checks.
    pub fn from_row_major_slice(elems: &[f64]) -> Result<Self, RotationError> {
        if elems.len() != 9 {
            return Err(RotationError::InvalidShape {
                expected: 9,
                got: elems.len(),
            });
        }
        Ok(Self {
            m: Mat3::from_row_slice(elems),
        })
    }

    /// Rotation of `angle` radians around `axis`, via Rodrigues' formula.
    ///
    /// The axis is divided by its norm before use; a near-zero axis fails
    /// with [`RotationError::DegenerateAxis`].
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Result<Self, RotationError> {
        let norm = axis.norm();
        if norm < EPSILON {
            return Err(RotationError::DegenerateAxis);
        }
        Ok(Self {
            m: rodrigues(&(axis / norm), angle),
        })
    }

    /// Rotation described by a rotation vector (direction = axis,
    /// magnitude = angle), i.e. the exponential map of SO(3).
    ///
    /// A near-zero vector yields the identity rotation, the limit of the
    /// exponential map at the origin.
    pub fn from_rotation_vector(v: &Vec3) -> Self {
        let angle = v.norm();
        if angle < EPSILON {
            return Self::identity();
        }
        Self {
            m: rodrigues(&(v / angle), angle),
        }
    }

    /// Matrix form of a unit quaternion.
    pub fn from_quaternion(q: &UnitQuaternion) -> Self {
        q.to_rotation()
    }

    /// Orthonormal frame conforming with the given x and y directions.
    ///
    /// The z column is the normalized cross product `cx × cy`, and the x
    /// column is then recomputed as `y × z` so the frame is exactly
    /// orthogonal; when `cx` and `cy` are not orthogonal to begin with, the
    /// input x direction is advisory only. Inputs far from orthogonal get a
    /// warning on stderr and are corrected. Parallel inputs fail with
    /// [`RotationError::DegenerateFrame`].
    pub fn from_xy(cx: &Vec3, cy: &Vec3) -> Result<Self, RotationError> {
        let dot = cx.dot(cy);
        if dot.abs() > EPSILON {
            eprintln!(
                "rotor3: from_xy directions not orthogonal (dot = {:.3e}); orthogonalizing",
                dot
            );
        }
        let z = cx.cross(cy);
        if z.norm() < EPSILON {
            return Err(RotationError::DegenerateFrame);
        }
        let z = z.normalize();
        let y = cy.normalize();
        let x = y.cross(&z);
        Ok(Self::from_columns(&x, &y, &z))
    }

    /// Orthonormal frame conforming with the given x and z directions.
    ///
    /// The y column is the normalized cross product `cz × cx`, and the x
    /// column is recomputed as `y × z`. Same warning and failure behavior
    /// as [`Rotation3::from_xy`].
    pub fn from_xz(cx: &Vec3, cz: &Vec3) -> Result<Self, RotationError> {
        let dot = cx.dot(cz);
        if dot.abs() > EPSILON {
            eprintln!(
                "rotor3: from_xz directions not orthogonal (dot = {:.3e}); orthogonalizing",
                dot
            );
        }
        let y = cz.cross(cx);
        if y.norm() < EPSILON {
            return Err(RotationError::DegenerateFrame);
        }
        let y = y.normalize();
        let z = cz.normalize();
        let x = y.cross(&z);
        Ok(Self::from_columns(&x, &y, &z))
    }

    /// Replace this rotation by a rotation of `angle` radians around x.
    pub fn rot_x(&mut self, angle: f64) {
        let (sa, ca) = angle.sin_cos();
        self.m = Mat3::new(
            1.0, 0.0, 0.0, //
            0.0, ca, -sa, //
            0.0, sa, ca,
        );
    }

    /// Replace this rotation by a rotation of `angle` radians around y.
    pub fn rot_y(&mut self, angle: f64) {
        let (sa, ca) = angle.sin_cos();
        self.m = Mat3::new(
            ca, 0.0, sa, //
            0.0, 1.0, 0.0, //
            -sa, 0.0, ca,
        );
    }

    /// Replace this rotation by a rotation of `angle` radians around z.
    pub fn rot_z(&mut self, angle: f64) {
        let (sa, ca) = angle.sin_cos();
        self.m = Mat3::new(
            ca, -sa, 0.0, //
            sa, ca, 0.0, //
            0.0, 0.0, 1.0,
        );
    }

    /// In-place rotation around `axis` perceived in the rotated (body)
    /// frame: `R <- R * dR`.
    pub fn rotate_in_body(&mut self, axis: &Vec3, angle: f64) -> Result<(), RotationError> {
        let delta = Rotation3::from_axis_angle(axis, angle)?;
        *self = *self * delta;
        Ok(())
    }

    /// In-place rotation around `axis` perceived in the fixed (base)
    /// frame: `R <- dR * R`.
    ///
    /// Base-frame and body-frame composition are distinct: the increment is
    /// expressed in different reference systems, and the products do not
    /// commute in general.
    pub fn rotate_in_base(&mut self, axis: &Vec3, angle: f64) -> Result<(), RotationError> {
        let delta = Rotation3::from_axis_angle(axis, angle)?;
        *self = delta * *self;
        Ok(())
    }

    /// In-place inversion; the transpose, since the matrix is orthogonal.
    pub fn invert(&mut self) {
        self.m.transpose_mut();
    }

    /// The inverse rotation.
    pub fn inverse(&self) -> Self {
        Self {
            m: self.m.transpose(),
        }
    }

    /// Equivalent axis-angle pair, via the quaternion representation.
    pub fn to_axis_angle(&self) -> (Vec3, f64) {
        self.to_quaternion().to_axis_angle()
    }

    /// Equivalent rotation vector, the logarithm of the rotation matrix.
    pub fn to_rotation_vector(&self) -> Vec3 {
        self.to_quaternion().to_rotation_vector()
    }

    /// Quaternion form of this rotation.
    pub fn to_quaternion(&self) -> UnitQuaternion {
        UnitQuaternion::from_rotation(self)
    }

    /// Square of the angular distance to `other`.
    ///
    /// Avoids the outer square root of [`Rotation3::angular_distance`]
    /// where only comparison is needed.
    pub fn angular_distance_squared(&self, other: &Self) -> f64 {
        (self.inverse() * *other).to_rotation_vector().norm_squared()
    }

    /// Angle of the relative rotation `self⁻¹ · other`, in [0, π].
    pub fn angular_distance(&self, other: &Self) -> f64 {
        self.angular_distance_squared(other).sqrt()
    }

    /// x column of the matrix.
    pub fn col_x(&self) -> Vec3 {
        self.m.column(0).into_owned()
    }

    /// y column of the matrix.
    pub fn col_y(&self) -> Vec3 {
        self.m.column(1).into_owned()
    }

    /// z column of the matrix.
    pub fn col_z(&self) -> Vec3 {
        self.m.column(2).into_owned()
    }

    /// Overwrite the x column. Does not re-orthogonalize; callers that need
    /// an orthogonal frame from directions use [`Rotation3::from_xy`] or
    /// [`Rotation3::from_xz`].
    pub fn set_col_x(&mut self, v: &Vec3) {
        self.m.set_column(0, v);
    }

    /// Overwrite the y column. Does not re-orthogonalize.
    pub fn set_col_y(&mut self, v: &Vec3) {
        self.m.set_column(1, v);
    }

    /// Overwrite the z column. Does not re-orthogonalize.
    pub fn set_col_z(&mut self, v: &Vec3) {
        self.m.set_column(2, v);
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Mat3 {
        &self.m
    }

    /// Consume into the underlying matrix.
    pub fn into_matrix(self) -> Mat3 {
        self.m
    }
}

/// Rodrigues' rotation formula for a unit axis.
fn rodrigues(axis: &Vec3, angle: f64) -> Mat3 {
    let (st, ct) = angle.sin_cos();
    let c1 = 1.0 - ct;
    let (x, y, z) = (axis.x, axis.y, axis.z);
    Mat3::new(
        ct + c1 * x * x,
        c1 * x * y - st * z,
        c1 * x * z + st * y,
        c1 * x * y + st * z,
        ct + c1 * y * y,
        c1 * y * z - st * x,
        c1 * x * z - st * y,
        c1 * y * z + st * x,
        ct + c1 * z * z,
    )
}

impl Default for Rotation3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition: `a * b` rotates by `b` first, then by `a`, when applied to
/// vectors on the right.
impl Mul for Rotation3 {
    type Output = Rotation3;

    fn mul(self, rhs: Rotation3) -> Rotation3 {
        Rotation3 { m: self.m * rhs.m }
    }
}

/// Application: map a vector through the rotation.
impl Mul<Vec3> for Rotation3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.m * rhs
    }
}

/// Tolerant equality: the element-wise sum of squared differences must be
/// below [`EPSILON`]. Comparison against anything that is not a
/// `Rotation3` does not type-check.
impl PartialEq for Rotation3 {
    fn eq(&self, other: &Self) -> bool {
        (self.m - other.m).norm_squared() < EPSILON
    }
}

impl From<UnitQuaternion> for Rotation3 {
    fn from(q: UnitQuaternion) -> Self {
        q.to_rotation()
    }
}
