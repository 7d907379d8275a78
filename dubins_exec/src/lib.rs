//! # Dubins library
//!
//! Shortest forward-only paths between two planar poses for a vehicle with a minimum turning
//! radius. This library allows the `dubins_exec` executable, the benchmarks and other crates in
//! the workspace to access the planner.
//!
//! ```no_run
//! use dubins_lib::{find_shortest_path_with_step, Pose};
//!
//! let start = Pose::from_degrees(0.0, 0.0, 45.0);
//! let end = Pose::from_degrees(10.0, 5.0, -30.0);
//!
//! let (path, traj) = find_shortest_path_with_step(&start, &end, 2.0, 0.2).unwrap();
//! println!("{} {:.3} m, {} points", path.family, path.length_m, traj.get_num_points());
//! ```

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Dubins path planner - primitives, selection and tracing
pub mod dubins;

/// Executable parameters
pub mod params;

/// Sampled trajectory container
pub mod path;

/// Planar pose of the vehicle
pub mod pose;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use dubins::{
    find_shortest_path, find_shortest_path_with_step, trace, DubinsError, DubinsPath,
    InvalidInputKind, PathCandidate, PathFamily, SegmentType,
};
pub use path::Path;
pub use pose::Pose;
pub use util::maths::normalize_angle;
