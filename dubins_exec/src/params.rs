//! # Dubins Executable Parameters
//!
//! This module provides parameters for the dubins executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{dubins::DEFAULT_STEP_RADIUS_FRACTION, pose::Pose};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A planning request as read from a parameter file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerParams {
    /// The pose to plan from
    pub start: PoseParams,

    /// The pose to plan to
    pub end: PoseParams,

    /// Minimum turning radius of the vehicle in meters
    pub turn_radius_m: f64,

    /// Trajectory sampling step in meters.
    ///
    /// If not given a tenth of the turning radius is used.
    #[serde(default)]
    pub step_m: Option<f64>,
}

/// A pose with the heading given in degrees, which is easier to write by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PoseParams {
    pub x_m: f64,
    pub y_m: f64,
    pub heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl PlannerParams {
    /// The sampling step to use, falling back to the default fraction of the turning radius.
    pub fn step_m(&self) -> f64 {
        self.step_m
            .unwrap_or(self.turn_radius_m * DEFAULT_STEP_RADIUS_FRACTION)
    }
}

impl PoseParams {
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match *values {
            [x_m, y_m, heading_deg] => Some(Self {
                x_m,
                y_m,
                heading_deg,
            }),
            _ => None,
        }
    }
}

impl From<PoseParams> for Pose {
    fn from(p: PoseParams) -> Self {
        Pose::from_degrees(p.x_m, p.y_m, p.heading_deg)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
