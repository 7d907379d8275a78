//! # Path tracer
//!
//! Forward simulation of a Dubins path from the real start pose, producing either a sampled
//! [`Path`] or the exact pose at a given distance along the path.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use util::maths::normalize_angle;

use super::{validate_step, DubinsError, DubinsPath, InvalidInputKind, PathFamily, SegmentType};
use crate::path::Path;
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Largest number of points a single trace may produce.
///
/// Steps which would need more points than this are rejected.
pub const MAX_TRACE_POINTS: usize = 10_000_000;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The state of the vehicle during tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TraceState {
    position_m: Vector2<f64>,
    heading_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TraceState {
    fn from_pose(pose: &Pose) -> Self {
        Self {
            position_m: pose.position2(),
            heading_rad: pose.heading_rad,
        }
    }

    fn to_pose(self) -> Pose {
        Pose::new(self.position_m.x, self.position_m.y, self.heading_rad)
    }

    /// Advance the state by `distance_m` along a segment of the given type.
    fn advance(self, segment: SegmentType, distance_m: f64, radius_m: f64) -> Self {
        let h = self.heading_rad;

        if !segment.is_turn() {
            return Self {
                position_m: self.position_m + Vector2::new(h.cos(), h.sin()) * distance_m,
                heading_rad: h,
            };
        }

        let dir = segment.direction();
        let dtheta = dir * distance_m / radius_m;

        let delta = Vector2::new(
            radius_m * ((h + dtheta).sin() - h.sin()) * dir,
            radius_m * (h.cos() - (h + dtheta).cos()) * dir,
        );

        Self {
            position_m: self.position_m + delta,
            heading_rad: normalize_angle(h + dtheta),
        }
    }
}

impl DubinsPath {
    /// Sample the path every `step_m` meters, see [`trace`].
    ///
    /// Returns `InvalidInput(Step)` if the step is not finite and positive, or if it is so small
    /// that the trace would need more than [`MAX_TRACE_POINTS`] points.
    pub fn trace(&self, step_m: f64) -> Result<Path, DubinsError> {
        validate_step(step_m)?;

        if step_counts(self.family, &self.params, self.radius_m, step_m).is_none() {
            return Err(DubinsError::InvalidInput(InvalidInputKind::Step(step_m)));
        }

        Ok(trace(
            &self.start,
            self.family,
            &self.params,
            self.radius_m,
            step_m,
        ))
    }

    /// The exact pose at `distance_m` along the path.
    ///
    /// The distance is clamped to `[0, length_m]`.
    pub fn sample(&self, distance_m: f64) -> Pose {
        let mut remaining_m = distance_m.max(0.0).min(self.length_m);

        let state = self
            .segments()
            .iter()
            .enumerate()
            .fold(TraceState::from_pose(&self.start), |state, (i, seg)| {
                let seg_length_m = self.segment_length(i).unwrap_or(0.0);
                let travel_m = remaining_m.min(seg_length_m);
                remaining_m -= travel_m;

                if travel_m > 0.0 {
                    state.advance(*seg, travel_m, self.radius_m)
                } else {
                    state
                }
            });

        state.to_pose()
    }

    /// The exact pose at the end of the path.
    pub fn endpoint(&self) -> Pose {
        self.sample(self.length_m)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Trace a path from `start` by stepping `step_m` meters at a time along each segment.
///
/// Each segment of length `l` contributes `ceil(l / step_m)` points after the start point. The
/// final step of a segment is a full step, so each segment may overshoot by up to one step and
/// the last point is not exactly on the goal. Use [`DubinsPath::endpoint`] for the exact goal.
///
/// If `step_m` is not finite and positive, or the trace would need more than
/// [`MAX_TRACE_POINTS`] points, only the start point is returned.
pub fn trace(
    start: &Pose,
    family: PathFamily,
    params: &[f64; 3],
    radius_m: f64,
    step_m: f64,
) -> Path {
    let (steps, num_points) = match step_counts(family, params, radius_m, step_m) {
        Some(counts) => counts,
        None => {
            let mut path = Path::with_capacity(1);
            path.points_m.push(start.position2());
            return path;
        }
    };

    let mut path = Path::with_capacity(num_points);
    path.points_m.push(start.position2());

    steps
        .iter()
        .flat_map(|(seg, n)| std::iter::repeat(*seg).take(*n))
        .fold(TraceState::from_pose(start), |state, seg| {
            let next = state.advance(seg, step_m, radius_m);
            path.points_m.push(next.position_m);
            next
        });

    path
}

/// Number of steps in each segment and the total number of points of a trace.
///
/// Returns `None` for an invalid step or if the total exceeds [`MAX_TRACE_POINTS`].
fn step_counts(
    family: PathFamily,
    params: &[f64; 3],
    radius_m: f64,
    step_m: f64,
) -> Option<([(SegmentType, usize); 3], usize)> {
    if !(step_m.is_finite() && step_m > 0.0) {
        return None;
    }

    let segments = family.segments();
    let mut steps = [(SegmentType::Straight, 0); 3];
    let mut num_points: usize = 1;

    for (i, (seg, param)) in segments.iter().zip(params.iter()).enumerate() {
        let n = num_steps(param.abs() * radius_m, step_m)?;
        steps[i] = (*seg, n);
        num_points = num_points.checked_add(n)?;
    }

    if num_points > MAX_TRACE_POINTS {
        None
    } else {
        Some((steps, num_points))
    }
}

/// Number of steps needed to cover a segment, or `None` if it exceeds [`MAX_TRACE_POINTS`].
fn num_steps(length_m: f64, step_m: f64) -> Option<usize> {
    let n = (length_m / step_m).ceil();

    if n.is_nan() || n <= 0.0 {
        Some(0)
    } else if n > MAX_TRACE_POINTS as f64 {
        None
    } else {
        Some(n as usize)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
