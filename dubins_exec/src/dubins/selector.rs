//! # Path selection
//!
//! Normalises a start/goal pose pair into the canonical frame, evaluates the requested families
//! and keeps the shortest feasible one.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace};

use super::{
    validate, validate_step, CanonicalProblem, DubinsError, DubinsPath, InvalidInputKind,
    PathCandidate, PathFamily,
};
use crate::path::Path;
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Find the shortest Dubins path between two poses.
///
/// All six families are evaluated. If several share the minimum length the earliest in
/// [`PathFamily::ALL`] is returned.
pub fn find_shortest_path(
    start: &Pose,
    end: &Pose,
    radius_m: f64,
) -> Result<DubinsPath, DubinsError> {
    DubinsPath::shortest_in(start, end, radius_m, &PathFamily::ALL)
}

/// Find the shortest Dubins path between two poses and sample it every `step_m` meters.
pub fn find_shortest_path_with_step(
    start: &Pose,
    end: &Pose,
    radius_m: f64,
    step_m: f64,
) -> Result<(DubinsPath, Path), DubinsError> {
    // Poses and radius are checked first so a bad radius isn't reported through the step
    // derived from it
    validate(start, end, radius_m)?;
    validate_step(step_m)?;

    let path = find_shortest_path(start, end, radius_m)?;
    let traj = path.trace(step_m)?;

    Ok((path, traj))
}

/// Evaluate every family for the given poses, in [`PathFamily::ALL`] order.
///
/// Infeasible families are included with `feasible` set to false.
pub fn all_candidates(
    start: &Pose,
    end: &Pose,
    radius_m: f64,
) -> Result<Vec<PathCandidate>, DubinsError> {
    validate(start, end, radius_m)?;

    let problem = CanonicalProblem::new(start, end, radius_m);

    Ok(PathFamily::ALL.iter().map(|f| f.solve(&problem)).collect())
}

/// Select the shortest feasible candidate.
///
/// The fold only replaces the current best on a strictly shorter length, so ties resolve to the
/// first candidate in iteration order.
fn select_shortest<'a, I>(candidates: I) -> Option<(PathCandidate, f64)>
where
    I: IntoIterator<Item = &'a PathCandidate>,
{
    candidates
        .into_iter()
        .filter_map(|c| c.normalised_length().map(|l| (*c, l)))
        .fold(None, |best, (c, l)| match best {
            Some((_, best_l)) if l >= best_l => best,
            _ => Some((c, l)),
        })
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DubinsPath {
    /// Find the shortest path between two poses using only the given families.
    ///
    /// Ties go to the family appearing first in `families`.
    pub fn shortest_in(
        start: &Pose,
        end: &Pose,
        radius_m: f64,
        families: &[PathFamily],
    ) -> Result<Self, DubinsError> {
        validate(start, end, radius_m)?;

        if families.is_empty() {
            return Err(DubinsError::InvalidInput(InvalidInputKind::NoFamilies));
        }

        let problem = CanonicalProblem::new(start, end, radius_m);
        trace!("Canonical problem: {:?}", problem);

        let candidates: Vec<PathCandidate> =
            families.iter().map(|f| f.solve(&problem)).collect();

        for c in candidates.iter() {
            trace!(
                "{}: feasible = {}, params = {:?}",
                c.family,
                c.feasible,
                c.params
            );
        }

        match select_shortest(candidates.iter()) {
            Some((best, _)) => {
                // Feasible by construction of select_shortest
                let path = DubinsPath::from_candidate(*start, radius_m, &best)
                    .ok_or(DubinsError::NoPathFound)?;

                debug!(
                    "Shortest path is {} with length {:.4} m",
                    path.family, path.length_m
                );

                Ok(path)
            }
            None => {
                debug!(
                    "No feasible path among {:?} from {:?} to {:?} with radius {} m",
                    families, start, end, radius_m
                );
                Err(DubinsError::NoPathFound)
            }
        }
    }

    /// Build the path of a single family between two poses.
    ///
    /// Returns [`DubinsError::NoPathFound`] if the family is infeasible for these poses.
    pub fn with_family(
        start: &Pose,
        end: &Pose,
        radius_m: f64,
        family: PathFamily,
    ) -> Result<Self, DubinsError> {
        Self::shortest_in(start, end, radius_m, &[family])
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn scenario() -> (Pose, Pose, f64) {
        (
            Pose::from_degrees(0.0, 0.0, 45.0),
            Pose::from_degrees(10.0, 5.0, -30.0),
            2.0,
        )
    }

    #[test]
    fn test_scenario() {
        let (start, end, radius) = scenario();

        let candidates = all_candidates(&start, &end, radius).unwrap();
        assert_eq!(candidates.len(), 6);

        let path = find_shortest_path(&start, &end, radius).unwrap();

        // The winner is no longer than any other feasible candidate
        for c in candidates.iter() {
            if let Some(l) = c.length(radius) {
                assert!(path.length_m <= l + 1e-12, "{} is shorter", c.family);
            }
        }

        // And is a plausible detour over the straight line distance
        let euclid = (10.0f64).hypot(5.0);
        assert!(path.length_m >= euclid);
        assert!(path.length_m <= 2.0 * euclid);

        let segs: f64 = (0..3).filter_map(|i| path.segment_length(i)).sum();
        assert_relative_eq!(segs, path.length_m, epsilon = 1e-9);
    }

    #[test]
    fn test_straight_line() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let end = Pose::new(5.0, 0.0, 0.0);

        let path = find_shortest_path(&start, &end, 1.0).unwrap();

        // LSL and RSR both degenerate to a straight line, LSL is first
        assert_eq!(path.family, PathFamily::LSL);
        assert_relative_eq!(path.length_m, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_poses() {
        for heading in [0.0, FRAC_PI_2, PI, 4.0].iter() {
            for radius in [0.1, 1.0, 100.0].iter() {
                let pose = Pose::new(3.0, -2.0, *heading);
                let path = find_shortest_path(&pose, &pose, *radius);
                assert!(path.is_ok(), "heading {}, radius {}", heading, radius);
            }
        }

        let pose = Pose::new(3.0, -2.0, 0.0);
        let path = find_shortest_path(&pose, &pose, 1.0).unwrap();
        assert!(path.length_m.abs() < 1e-12);
    }

    #[test]
    fn test_large_radius() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let end = Pose::new(1.0, 1.0, FRAC_PI_2);

        let path = find_shortest_path(&start, &end, 1000.0).unwrap();
        assert!(path.length_m > 0.0);
        assert!(path.length_m.is_finite());
    }

    #[test]
    fn test_invalid_input() {
        let pose = Pose::default();

        assert_eq!(
            find_shortest_path(&pose, &pose, 0.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(0.0)))
        );
        assert_eq!(
            find_shortest_path(&Pose::new(f64::NAN, 0.0, 0.0), &pose, 1.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::StartPose))
        );
        assert_eq!(
            find_shortest_path_with_step(&pose, &pose, 1.0, 0.0).map(|(p, _)| p),
            Err(DubinsError::InvalidInput(InvalidInputKind::Step(0.0)))
        );
        // A bad radius is reported as such even when the step derived from it is also bad
        assert_eq!(
            find_shortest_path_with_step(&pose, &pose, -1.0, -0.1).map(|(p, _)| p),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(-1.0)))
        );
        assert_eq!(
            find_shortest_path_with_step(&pose, &pose, 0.0, 0.0).map(|(p, _)| p),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(0.0)))
        );
        assert_eq!(
            all_candidates(&pose, &pose, 0.0),
            Err(DubinsError::InvalidInput(InvalidInputKind::Radius(0.0)))
        );
        assert_eq!(
            DubinsPath::shortest_in(&pose, &pose, 1.0, &[]),
            Err(DubinsError::InvalidInput(InvalidInputKind::NoFamilies))
        );
    }

    #[test]
    fn test_with_family() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let end = Pose::new(0.5, 0.0, PI);

        // Facing poses closer than two radii have no inner tangent
        assert_eq!(
            DubinsPath::with_family(&start, &end, 1.0, PathFamily::LSR),
            Err(DubinsError::NoPathFound)
        );
        assert_eq!(
            DubinsPath::with_family(&start, &end, 1.0, PathFamily::RSL),
            Err(DubinsError::NoPathFound)
        );
        assert_eq!(
            DubinsPath::shortest_in(&start, &end, 1.0, &[PathFamily::LSR, PathFamily::RSL]),
            Err(DubinsError::NoPathFound)
        );

        let path = DubinsPath::with_family(&start, &end, 1.0, PathFamily::LSL).unwrap();
        assert_eq!(path.family, PathFamily::LSL);
    }

    #[test]
    fn test_named_families() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let end = Pose::new(5.0, 0.0, 0.0);

        // As given with `--family RSR LSL`, the tie goes to the first named family
        let families: Vec<PathFamily> = ["RSR", "lsl"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let path = DubinsPath::shortest_in(&start, &end, 1.0, &families).unwrap();
        assert_eq!(path.family, PathFamily::RSR);

        let traj = path.trace(0.5).unwrap();
        assert_eq!(traj.get_num_points(), 11);
        assert_relative_eq!(traj.get_length().unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(traj.max_separation().unwrap(), 0.5, epsilon = 1e-9);
        assert!((traj.last().unwrap() - end.position2()).norm() < 1e-9);
    }

    #[test]
    fn test_tie_break() {
        let candidates = [
            PathCandidate::infeasible(PathFamily::LSL),
            PathCandidate::feasible(PathFamily::RSR, [1.0, 1.0, 1.0]),
            PathCandidate::feasible(PathFamily::LSR, [0.5, 1.0, 1.0]),
            PathCandidate::feasible(PathFamily::RSL, [1.0, 0.5, 1.0]),
        ];

        let (best, length) = select_shortest(candidates.iter()).unwrap();
        assert_eq!(best.family, PathFamily::LSR);
        assert_relative_eq!(length, 2.5);

        assert!(select_shortest([PathCandidate::infeasible(PathFamily::RLR)].iter()).is_none());
    }

    #[test]
    fn test_deterministic() {
        let (start, end, radius) = scenario();

        let first = find_shortest_path(&start, &end, radius).unwrap();
        for _ in 0..10 {
            assert_eq!(find_shortest_path(&start, &end, radius).unwrap(), first);
        }
    }

    #[test]
    fn test_mirror_symmetry() {
        let (start, end, radius) = scenario();

        let path = find_shortest_path(&start, &end, radius).unwrap();
        let mirrored =
            find_shortest_path(&start.mirrored(), &end.mirrored(), radius).unwrap();

        assert_eq!(mirrored.family, path.family.mirror());
        assert_relative_eq!(mirrored.length_m, path.length_m, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn shortest_is_minimal(
            x in -50.0f64..50.0,
            y in -50.0f64..50.0,
            h0 in -10.0f64..10.0,
            h1 in -10.0f64..10.0,
            radius in 0.1f64..20.0,
        ) {
            let start = Pose::new(0.0, 0.0, h0);
            let end = Pose::new(x, y, h1);

            let path = find_shortest_path(&start, &end, radius).unwrap();
            let candidates = all_candidates(&start, &end, radius).unwrap();

            for c in candidates.iter() {
                if let Some(l) = c.length(radius) {
                    prop_assert!(path.length_m <= l);
                }
            }

            prop_assert!(path.length_m >= x.hypot(y) - 1e-9);
        }
    }
}
