//! # rotor3-interp
//!
//! Spherical interpolation over SO(3).
//!
//! [`SlerpInterpolator`] blends two orientations along the great-circle arc
//! on the unit-quaternion sphere, at constant angular velocity, optionally
//! picking the shorter of the two arcs connecting them.

pub mod slerp;

pub use slerp::{InterpolationError, SlerpInterpolator};
