//! SLERP between two orientations
//!
//! The interpolator precomputes the relative rotation
//! `conjugate(start) · end` once; each query raises it to the fractional
//! power `t` and applies it to the start. Queries are pure and the
//! interpolator is immutable after construction, so a single instance can
//! be shared across threads.

use thiserror::Error;

use rotor3_core::{Rotation3, UnitQuaternion};

/// Interpolation query errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// The time parameter fell outside the interpolation interval.
    #[error("interpolation time must lie in [0, 1], was {0}")]
    TimeOutOfRange(f64),
}

/// Constant-angular-velocity interpolator between two orientations.
///
/// Endpoints are accepted as [`Rotation3`] or [`UnitQuaternion`]; both are
/// normalized at construction. With shortest-path selection on (the
/// default), the end quaternion is replaced by its antipode whenever that
/// halves the arc, so the traversed angle never exceeds π.
#[derive(Debug, Clone, Copy)]
pub struct SlerpInterpolator {
    start: UnitQuaternion,
    relative: UnitQuaternion,
}

impl SlerpInterpolator {
    /// Interpolator from `start` to `end` along the shortest arc.
    pub fn new(start: impl Into<UnitQuaternion>, end: impl Into<UnitQuaternion>) -> Self {
        Self::with_shortest_path(start, end, true)
    }

    /// Interpolator with explicit shortest-path control.
    ///
    /// With `shortest` false the arc is taken as given, which for
    /// endpoints more than π apart means the long way around.
    pub fn with_shortest_path(
        start: impl Into<UnitQuaternion>,
        end: impl Into<UnitQuaternion>,
        shortest: bool,
    ) -> Self {
        let start = start.into().normalized();
        let mut end = end.into().normalized();
        if shortest && start.distance(&end) > start.distance(&-end) {
            end = -end;
        }
        let relative = (start.conjugate() * end).normalized();
        Self { start, relative }
    }

    /// Quaternion at `time` in [0, 1].
    ///
    /// Fails with [`InterpolationError::TimeOutOfRange`] outside the
    /// interval. At 0 this is the start; at 1 the (possibly sign-flipped)
    /// end.
    pub fn quaternion_at(&self, time: f64) -> Result<UnitQuaternion, InterpolationError> {
        if !(0.0..=1.0).contains(&time) {
            return Err(InterpolationError::TimeOutOfRange(time));
        }
        Ok(self.quaternion_at_unchecked(time))
    }

    /// Quaternion at `time` without the range check; the arc is simply
    /// extrapolated beyond [0, 1].
    pub fn quaternion_at_unchecked(&self, time: f64) -> UnitQuaternion {
        self.start * self.relative.powf(time)
    }

    /// Orientation at `time` in [0, 1].
    pub fn rotation_at(&self, time: f64) -> Result<Rotation3, InterpolationError> {
        Ok(self.quaternion_at(time)?.to_rotation())
    }

    /// Orientation at `time` without the range check.
    pub fn rotation_at_unchecked(&self, time: f64) -> Rotation3 {
        self.quaternion_at_unchecked(time).to_rotation()
    }

    /// The normalized start quaternion.
    pub fn start(&self) -> &UnitQuaternion {
        &self.start
    }

    /// The precomputed relative rotation `conjugate(start) · end`.
    pub fn relative(&self) -> &UnitQuaternion {
        &self.relative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rotor3_core::Vec3;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn rot_z(angle: f64) -> Rotation3 {
        let mut r = Rotation3::identity();
        r.rot_z(angle);
        r
    }

    #[test]
    fn test_boundaries() {
        let a = rot_z(FRAC_PI_4);
        let mut b = Rotation3::identity();
        b.rot_x(FRAC_PI_2);
        let interp = SlerpInterpolator::new(a, b);

        assert_relative_eq!(
            interp.rotation_at(0.0).unwrap().angular_distance(&a),
            0.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            interp.rotation_at(1.0).unwrap().angular_distance(&b),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_midpoint_half_angle() {
        let interp = SlerpInterpolator::new(Rotation3::identity(), rot_z(FRAC_PI_2));

        let mid = interp.rotation_at(0.5).unwrap();

        assert_relative_eq!(mid.angular_distance(&rot_z(FRAC_PI_4)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quaternion_endpoints() {
        let qa = UnitQuaternion::from_axis_angle(&Vec3::new(1.0, 0.0, 0.0), 0.3).unwrap();
        let qb = UnitQuaternion::from_axis_angle(&Vec3::new(0.0, 1.0, 0.0), 1.1).unwrap();
        let interp = SlerpInterpolator::new(qa, qb);

        assert_eq!(interp.quaternion_at(0.0).unwrap(), qa);
        assert_eq!(interp.quaternion_at(1.0).unwrap(), qb);
    }

    #[test]
    fn test_range_check() {
        let interp = SlerpInterpolator::new(Rotation3::identity(), rot_z(1.0));

        assert_eq!(
            interp.quaternion_at(-0.1),
            Err(InterpolationError::TimeOutOfRange(-0.1))
        );
        assert_eq!(
            interp.quaternion_at(1.1),
            Err(InterpolationError::TimeOutOfRange(1.1))
        );
        assert_eq!(
            interp.rotation_at(2.0),
            Err(InterpolationError::TimeOutOfRange(2.0))
        );
    }

    #[test]
    fn test_range_check_disabled() {
        let interp = SlerpInterpolator::new(Rotation3::identity(), rot_z(1.0));

        // Extrapolation continues along the same arc
        let past = interp.rotation_at_unchecked(1.5);
        assert_relative_eq!(past.angular_distance(&rot_z(1.5)), 0.0, epsilon = 1e-9);

        let before = interp.rotation_at_unchecked(-0.5);
        assert_relative_eq!(before.angular_distance(&rot_z(-0.5)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shortest_path_sign_flip() {
        // End given as a 3π/2 turn: its quaternion has negative scalar part,
        // and the short way there is the π/2 turn in the other direction.
        let start = UnitQuaternion::identity();
        let end =
            UnitQuaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), 1.5 * PI).unwrap();
        assert!(end.w() < 0.0);

        let interp = SlerpInterpolator::new(start, end);

        let total = interp
            .rotation_at(0.0)
            .unwrap()
            .angular_distance(&interp.rotation_at(1.0).unwrap());
        assert!(total <= PI + 1e-9);
        assert_relative_eq!(total, FRAC_PI_2, epsilon = 1e-9);
        // The endpoint still agrees with the requested end rotation
        assert_relative_eq!(
            interp
                .rotation_at(1.0)
                .unwrap()
                .angular_distance(&end.to_rotation()),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_long_path_when_disabled() {
        let start = UnitQuaternion::identity();
        let end =
            UnitQuaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), 1.5 * PI).unwrap();

        let interp = SlerpInterpolator::with_shortest_path(start, end, false);

        // Halfway along the long arc is a 3π/4 turn
        let mid = interp.rotation_at(0.5).unwrap();
        assert_relative_eq!(
            mid.angular_distance(&Rotation3::identity()),
            0.75 * PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_queries_are_independent() {
        let interp = SlerpInterpolator::new(Rotation3::identity(), rot_z(1.0));

        let first = interp.quaternion_at(0.3).unwrap();
        let _ = interp.quaternion_at(0.9).unwrap();
        let again = interp.quaternion_at(0.3).unwrap();

        assert_eq!(first, again);
    }
}
