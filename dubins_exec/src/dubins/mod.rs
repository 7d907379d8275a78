//! # Dubins path planning
//!
//! Shortest paths for a vehicle with a minimum turning radius which can only drive forwards. Every
//! such path is made of at most three segments, each either a full-lock arc or a straight line,
//! in one of six families (LSL, RSR, LSR, RSL, RLR, LRL).
//!
//! Planning is split into:
//! - [`primitives`] - closed-form solutions of each family in the canonical frame.
//! - [`selector`] - normalisation of a pose pair into the canonical frame and selection of the
//!   shortest feasible family.
//! - [`tracer`] - forward simulation of the selected path into a sampled [`Path`](crate::path::Path).
//!
//! All functions are pure, no state is kept between planning requests.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod primitives;
pub mod selector;
pub mod tracer;

pub use selector::{find_shortest_path, find_shortest_path_with_step};
pub use tracer::trace;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use util::maths::normalize_angle;

use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default trajectory sampling step as a fraction of the turning radius.
pub const DEFAULT_STEP_RADIUS_FRACTION: f64 = 0.1;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The type of a single segment in a Dubins path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    /// Full-lock turn to the left (anticlockwise)
    Left,
    /// Straight line
    Straight,
    /// Full-lock turn to the right (clockwise)
    Right,
}

/// One of the six Dubins path families, named by its segment types in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathFamily {
    LSL,
    RSR,
    LSR,
    RSL,
    RLR,
    LRL,
}

/// Errors which can occur when planning a Dubins path.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DubinsError {
    #[error("No feasible Dubins path exists between the poses")]
    NoPathFound,

    #[error("Invalid planner input: {0}")]
    InvalidInput(InvalidInputKind),
}

/// The reason planner input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidInputKind {
    #[error("the turning radius must be finite and greater than zero, got {0}")]
    Radius(f64),

    #[error("the sampling step must be finite and greater than zero, got {0}")]
    Step(f64),

    #[error("the start pose contains a non-finite value")]
    StartPose,

    #[error("the end pose contains a non-finite value")]
    EndPose,

    #[error("no path families were given to search")]
    NoFamilies,
}

/// Error returned when a string is not the name of a path family.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown path family \"{0}\", expected one of LSL, RSR, LSR, RSL, RLR, LRL")]
pub struct ParseFamilyError(pub String);

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A planning problem expressed in the canonical frame.
///
/// The start pose is at the origin, the goal lies on the positive X axis and distances are in
/// units of the turning radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProblem {
    /// Start heading relative to the start-goal line, in [0, 2pi)
    pub alpha: f64,

    /// Goal heading relative to the start-goal line, in [0, 2pi)
    pub beta: f64,

    /// Start-goal separation in turning radii
    pub d: f64,
}

/// The result of evaluating one family's primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathCandidate {
    pub family: PathFamily,

    /// Segment parameters `[t, p, q]` in family order. Turns are in radians, straights in turning
    /// radii. All zero if the candidate is infeasible.
    pub params: [f64; 3],

    /// False if the family has no solution for the problem.
    pub feasible: bool,
}

/// A complete Dubins path from a start pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DubinsPath {
    /// The pose the path starts from
    pub start: Pose,

    /// The turning radius in meters
    pub radius_m: f64,

    pub family: PathFamily,

    /// Segment parameters `[t, p, q]`, see [`PathCandidate::params`]
    pub params: [f64; 3],

    /// Total length of the path in meters
    pub length_m: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SegmentType {
    /// The turn direction of the segment: +1 for left, -1 for right and 0 for straight.
    pub fn direction(&self) -> f64 {
        match self {
            SegmentType::Left => 1.0,
            SegmentType::Straight => 0.0,
            SegmentType::Right => -1.0,
        }
    }

    pub fn is_turn(&self) -> bool {
        *self != SegmentType::Straight
    }
}

impl PathFamily {
    /// All families, in the order used to break ties between paths of equal length.
    pub const ALL: [PathFamily; 6] = [
        PathFamily::LSL,
        PathFamily::RSR,
        PathFamily::LSR,
        PathFamily::RSL,
        PathFamily::RLR,
        PathFamily::LRL,
    ];

    /// The segment types making up the family, in order.
    pub const fn segments(&self) -> [SegmentType; 3] {
        use SegmentType::*;

        match self {
            PathFamily::LSL => [Left, Straight, Left],
            PathFamily::RSR => [Right, Straight, Right],
            PathFamily::LSR => [Left, Straight, Right],
            PathFamily::RSL => [Right, Straight, Left],
            PathFamily::RLR => [Right, Left, Right],
            PathFamily::LRL => [Left, Right, Left],
        }
    }

    /// Solve this family for the canonical problem.
    pub fn solve(&self, problem: &CanonicalProblem) -> PathCandidate {
        let f = match self {
            PathFamily::LSL => primitives::lsl,
            PathFamily::RSR => primitives::rsr,
            PathFamily::LSR => primitives::lsr,
            PathFamily::RSL => primitives::rsl,
            PathFamily::RLR => primitives::rlr,
            PathFamily::LRL => primitives::lrl,
        };

        f(problem.alpha, problem.beta, problem.d)
    }

    /// The family obtained by reflecting the plane, swapping left and right turns.
    pub fn mirror(&self) -> Self {
        match self {
            PathFamily::LSL => PathFamily::RSR,
            PathFamily::RSR => PathFamily::LSL,
            PathFamily::LSR => PathFamily::RSL,
            PathFamily::RSL => PathFamily::LSR,
            PathFamily::RLR => PathFamily::LRL,
            PathFamily::LRL => PathFamily::RLR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathFamily::LSL => "LSL",
            PathFamily::RSR => "RSR",
            PathFamily::LSR => "LSR",
            PathFamily::RSL => "RSL",
            PathFamily::RLR => "RLR",
            PathFamily::LRL => "LRL",
        }
    }
}

impl fmt::Display for PathFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathFamily {
    type Err = ParseFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathFamily::ALL
            .iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseFamilyError(s.to_string()))
    }
}

impl CanonicalProblem {
    /// Transform a start and end pose into the canonical frame of the given radius.
    ///
    /// The caller must ensure the radius is positive and the poses finite, see [`validate`].
    pub fn new(start: &Pose, end: &Pose, radius_m: f64) -> Self {
        let dx = end.x_m - start.x_m;
        let dy = end.y_m - start.y_m;

        // atan2(0, 0) is 0, so coincident poses are measured from the X axis
        let theta = normalize_angle(dy.atan2(dx));

        Self {
            alpha: normalize_angle(start.heading_rad - theta),
            beta: normalize_angle(end.heading_rad - theta),
            d: dx.hypot(dy) / radius_m,
        }
    }
}

impl PathCandidate {
    pub(crate) fn feasible(family: PathFamily, params: [f64; 3]) -> Self {
        Self {
            family,
            params,
            feasible: true,
        }
    }

    pub(crate) fn infeasible(family: PathFamily) -> Self {
        Self {
            family,
            params: [0.0; 3],
            feasible: false,
        }
    }

    /// Length of the candidate in turning radii, or `None` if it is infeasible.
    ///
    /// Absolute values are taken so that a negative parameter can never shorten a path.
    pub fn normalised_length(&self) -> Option<f64> {
        if self.feasible {
            Some(self.params.iter().map(|p| p.abs()).sum())
        } else {
            None
        }
    }

    /// Length of the candidate in meters for the given turning radius, or `None` if it is
    /// infeasible.
    pub fn length(&self, radius_m: f64) -> Option<f64> {
        self.normalised_length().map(|l| l * radius_m)
    }
}

impl DubinsPath {
    /// Build a path from a feasible candidate.
    ///
    /// Returns `None` if the candidate is infeasible.
    pub fn from_candidate(start: Pose, radius_m: f64, candidate: &PathCandidate) -> Option<Self> {
        Some(Self {
            start,
            radius_m,
            family: candidate.family,
            params: candidate.params,
            length_m: candidate.length(radius_m)?,
        })
    }

    /// The segment types of the path, in order.
    pub fn segments(&self) -> [SegmentType; 3] {
        self.family.segments()
    }

    /// The length of the `i`th segment in meters, or `None` if `i > 2`.
    pub fn segment_length(&self, i: usize) -> Option<f64> {
        self.params.get(i).map(|p| p.abs() * self.radius_m)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Check planner inputs before any trigonometry is evaluated.
pub fn validate(start: &Pose, end: &Pose, radius_m: f64) -> Result<(), DubinsError> {
    if !(radius_m.is_finite() && radius_m > 0.0) {
        return Err(DubinsError::InvalidInput(InvalidInputKind::Radius(radius_m)));
    }
    if !start.is_finite() {
        return Err(DubinsError::InvalidInput(InvalidInputKind::StartPose));
    }
    if !end.is_finite() {
        return Err(DubinsError::InvalidInput(InvalidInputKind::EndPose));
    }

    Ok(())
}

/// Check a trajectory sampling step.
pub fn validate_step(step_m: f64) -> Result<(), DubinsError> {
    if step_m.is_finite() && step_m > 0.0 {
        Ok(())
    } else {
        Err(DubinsError::InvalidInput(InvalidInputKind::Step(step_m)))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_family_segments() {
        assert_eq!(
            PathFamily::RSL.segments(),
            [SegmentType::Right, SegmentType::Straight, SegmentType::Left]
        );
        assert_eq!(
            PathFamily::RLR.segments(),
            [SegmentType::Right, SegmentType::Left, SegmentType::Right]
        );

        // Mirroring a family mirrors each of its segments
        for family in PathFamily::ALL.iter() {
            for (seg, mirrored) in family
                .segments()
                .iter()
                .zip(family.mirror().segments().iter())
            {
                assert_eq!(seg.direction(), -mirrored.direction());
            }
            assert_eq!(family.mirror().mirror(), *family);
        }
    }

    #[test]
    fn test_family_parse() {
        for family in PathFamily::ALL.iter() {
            assert_eq!(family.to_string().parse::<PathFamily>(), Ok(*family));
        }
        assert_eq!("rsl".parse::<PathFamily>(), Ok(PathFamily::RSL));
        assert_eq!(
            "SSS".parse::<PathFamily>(),
            Err(ParseFamilyError("SSS".to_string()))
        );
    }

    #[test]
    fn test_canonical_problem() {
        let start = Pose::new(1.0, 1.0, FRAC_PI_2);
        let end = Pose::new(1.0, 5.0, PI);

        let problem = CanonicalProblem::new(&start, &end, 2.0);

        // The goal lies straight up so the frame is rotated by pi/2
        assert!((problem.d - 2.0).abs() < 1e-12);
        assert!(problem.alpha.abs() < 1e-12);
        assert!((problem.beta - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_length() {
        let c = PathCandidate::feasible(PathFamily::LSL, [1.0, 2.0, 0.5]);
        assert_eq!(c.normalised_length(), Some(3.5));
        assert_eq!(c.length(2.0), Some(7.0));

        let c = PathCandidate::feasible(PathFamily::LSL, [-1.0, 2.0, 0.5]);
        assert_eq!(c.normalised_length(), Some(3.5));

        let c = PathCandidate::infeasible(PathFamily::RLR);
        assert_eq!(c.length(2.0), None);
        assert!(DubinsPath::from_candidate(Pose::default(), 2.0, &c).is_none());
    }

    #[test]
    fn test_validate() {
        let pose = Pose::default();

        assert!(validate(&pose, &pose, 1.0).is_ok());
        assert_eq!(
            validate(&pose, &pose, 0.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(0.0)))
        );
        assert_eq!(
            validate(&pose, &pose, -1.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(-1.0)))
        );
        assert!(validate(&pose, &pose, f64::NAN).is_err());
        assert!(validate(&pose, &pose, f64::INFINITY).is_err());
        assert_eq!(
            validate(&Pose::new(f64::NAN, 0.0, 0.0), &pose, 1.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::StartPose))
        );
        assert_eq!(
            validate(&pose, &Pose::new(0.0, f64::INFINITY, 0.0), 1.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::EndPose))
        );

        assert!(validate_step(0.1).is_ok());
        assert!(validate_step(0.0).is_err());
        assert!(validate_step(f64::NAN).is_err());
    }
}
