//! SO(3) Property Tests
//!
//! Validates the group structure over randomized inputs:
//! 1. Every constructor and composition lands in SO(3)
//! 2. Matrix <-> quaternion conversion is the identity map on matrices
//! 3. Axis-angle and rotation-vector round trips recover their inputs

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use rotor3_core::{Mat3, Rotation3, UnitQuaternion, Vec3};

/// Random unit axis from a seeded generator.
fn random_axis(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let n = v.norm();
        if n > 0.1 {
            return v / n;
        }
    }
}

/// Random rotation with angle drawn from the open interval (0, π).
fn random_rotation(rng: &mut StdRng) -> Rotation3 {
    let axis = random_axis(rng);
    let angle = rng.gen_range(1e-3..PI - 1e-3);
    Rotation3::from_axis_angle(&axis, angle).unwrap()
}

mod orthonormality {
    use super::*;

    #[test]
    fn test_constructors_land_in_so3() {
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..100 {
            let r = random_rotation(&mut rng);
            let m = *r.matrix();

            assert_relative_eq!(m.transpose() * m, Mat3::identity(), epsilon = 1e-9);
            assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_composition_preserves_so3() {
        let mut rng = StdRng::seed_from_u64(23);

        let mut acc = Rotation3::identity();
        for _ in 0..100 {
            acc = acc * random_rotation(&mut rng);
            let m = *acc.matrix();

            assert_relative_eq!(m.transpose() * m, Mat3::identity(), epsilon = 1e-9);
            assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_both_sides() {
        let mut rng = StdRng::seed_from_u64(31);

        for _ in 0..100 {
            let r = random_rotation(&mut rng);

            assert_relative_eq!(*(r * r.inverse()).matrix(), Mat3::identity(), epsilon = 1e-9);
            assert_relative_eq!(*(r.inverse() * r).matrix(), Mat3::identity(), epsilon = 1e-9);
        }
    }
}

mod round_trips {
    use super::*;

    #[test]
    fn test_matrix_quaternion_matrix_is_identity() {
        let mut rng = StdRng::seed_from_u64(41);

        for _ in 0..100 {
            let r = random_rotation(&mut rng);
            let back = UnitQuaternion::from_rotation(&r).to_rotation();

            // The global quaternion sign cancels in the matrix
            assert_relative_eq!(*back.matrix(), *r.matrix(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let mut rng = StdRng::seed_from_u64(43);

        for _ in 0..100 {
            let axis = random_axis(&mut rng);
            let angle = rng.gen_range(1e-3..PI - 1e-3);

            let (axis2, angle2) = Rotation3::from_axis_angle(&axis, angle)
                .unwrap()
                .to_axis_angle();

            assert_relative_eq!(angle2, angle, epsilon = 1e-8);
            assert_relative_eq!(axis2, axis, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_rotation_vector_round_trip() {
        let mut rng = StdRng::seed_from_u64(47);

        for _ in 0..100 {
            let v = random_axis(&mut rng) * rng.gen_range(1e-3..PI - 1e-3);

            let v2 = Rotation3::from_rotation_vector(&v).to_rotation_vector();

            assert_relative_eq!(v2, v, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_quaternion_distance_consistent_with_angle() {
        let mut rng = StdRng::seed_from_u64(53);

        for _ in 0..100 {
            let a = random_rotation(&mut rng);
            let b = random_rotation(&mut rng);

            // The relative angle measured on matrices equals the one
            // measured through quaternions
            let rel = (a.inverse() * b).to_quaternion();
            let (_, angle) = rel.to_axis_angle();

            assert_relative_eq!(a.angular_distance(&b), angle, epsilon = 1e-8);
        }
    }
}
