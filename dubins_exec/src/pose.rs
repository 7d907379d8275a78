//! # Pose
//!
//! Planar pose (position and heading) of the vehicle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use util::maths::normalize_angle;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The pose of the vehicle in the plane.
///
/// The heading is the angle to the positive X axis in radians, always in the range [0, 2pi). Use
/// [`Pose::new`] to build a pose so that the heading is normalised.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    /// X position in meters
    pub x_m: f64,

    /// Y position in meters
    pub y_m: f64,

    /// Heading in radians
    pub heading_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Pose {
    /// Create a new pose, normalising the heading into [0, 2pi).
    ///
    /// Non-finite headings are kept as they are so that the planner can reject them.
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            x_m,
            y_m,
            heading_rad: if heading_rad.is_finite() {
                normalize_angle(heading_rad)
            } else {
                heading_rad
            },
        }
    }

    /// Create a new pose with the heading given in degrees.
    pub fn from_degrees(x_m: f64, y_m: f64, heading_deg: f64) -> Self {
        Self::new(x_m, y_m, heading_deg.to_radians())
    }

    /// The position of the pose as a vector.
    pub fn position2(&self) -> Vector2<f64> {
        Vector2::new(self.x_m, self.y_m)
    }

    /// True if every component of the pose is finite.
    pub fn is_finite(&self) -> bool {
        self.x_m.is_finite() && self.y_m.is_finite() && self.heading_rad.is_finite()
    }

    /// Reflect the pose about the X axis, turning a left-handed manoeuvre into a right-handed one.
    pub fn mirrored(&self) -> Self {
        Self::new(self.x_m, -self.y_m, -self.heading_rad)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_heading_normalised() {
        let pose = Pose::new(1.0, 2.0, -FRAC_PI_2);
        assert!((pose.heading_rad - 3.0 * FRAC_PI_2).abs() < 1e-12);

        let pose = Pose::from_degrees(0.0, 0.0, 45.0);
        assert!((pose.heading_rad - FRAC_PI_4).abs() < 1e-12);

        let pose = Pose::from_degrees(0.0, 0.0, -30.0);
        assert!((pose.heading_rad - 330f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored() {
        let pose = Pose::new(3.0, 4.0, FRAC_PI_4).mirrored();
        assert_eq!(pose.x_m, 3.0);
        assert_eq!(pose.y_m, -4.0);
        assert!((pose.heading_rad - 7.0 * FRAC_PI_4).abs() < 1e-12);

        let pose = Pose::new(0.0, 0.0, PI).mirrored();
        assert!((pose.heading_rad - PI).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite() {
        assert!(Pose::new(0.0, 0.0, 1.0).is_finite());
        assert!(!Pose::new(f64::NAN, 0.0, 1.0).is_finite());
        assert!(!Pose::new(0.0, 0.0, f64::INFINITY).is_finite());
    }
}
