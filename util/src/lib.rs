//! Utility library for the Dubins planner workspace
//!
//! Provides the ambient services shared by the executables: session directories, logging,
//! parameter loading, CSV archives and angle maths.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod host;
pub mod logger;
pub mod maths;
pub mod params;
pub mod session;
pub mod time;
