//! # Path
//!
//! This module defines the sampled trajectory produced by the planner.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An ordered sequence of points describing the trajectory of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Path {
    pub points_m: Vec<Vector2<f64>>,
}

/// A single row of a trajectory archive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PathPointRecord {
    pub x_m: f64,
    pub y_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path with space for the given number of points.
    pub fn with_capacity(num_points: usize) -> Self {
        Path {
            points_m: Vec::with_capacity(num_points),
        }
    }

    /// Return the length of the path in meters, i.e. the length of the polyline through all
    /// points.
    ///
    /// If the path is empty (not enough points) then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        Some(self.separations().sum())
    }

    /// Return the largest distance between two consecutive points in the path.
    ///
    /// If the path is empty (not enough points) then `None` is returned.
    pub fn max_separation(&self) -> Option<f64> {
        self.separations().fold(None, |max, sep| match max {
            Some(m) if m >= sep => Some(m),
            _ => Some(sep),
        })
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    /// The last point in the path
    pub fn last(&self) -> Option<&Vector2<f64>> {
        self.points_m.last()
    }

    /// Iterate over the points as archive records.
    pub fn records(&self) -> impl Iterator<Item = PathPointRecord> + '_ {
        self.points_m.iter().map(|p| PathPointRecord { x_m: p.x, y_m: p.y })
    }

    fn separations(&self) -> impl Iterator<Item = f64> + '_ {
        self.points_m
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square_path() -> Path {
        Path {
            points_m: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(1.0, 1.0),
            ],
        }
    }

    #[test]
    fn test_length() {
        let path = square_path();
        assert_eq!(path.get_length(), Some(2.0));
        assert_eq!(path.max_separation(), Some(1.0));
        assert_eq!(path.get_num_points(), 4);
        assert_eq!(path.last(), Some(&Vector2::new(1.0, 1.0)));

        let empty = Path::with_capacity(8);
        assert_eq!(empty.get_num_points(), 0);
        assert_eq!(empty.get_length(), None);
        assert_eq!(empty.max_separation(), None);
        assert_eq!(empty.last(), None);

        let single = Path {
            points_m: vec![Vector2::new(3.0, 4.0)],
        };
        assert_eq!(single.get_length(), None);
        assert_eq!(single.max_separation(), None);
    }

    #[test]
    fn test_serialize() {
        let path = square_path();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        let records: Vec<PathPointRecord> = path.records().collect();
        assert_eq!(records[2], PathPointRecord { x_m: 1.0, y_m: 1.0 });
    }
}
