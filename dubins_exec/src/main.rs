//! # Dubins Executable
//!
//! Plans the shortest Dubins path for a single request read from a parameter file and/or the
//! command line, writing the sampled trajectory and the result into a new session directory.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info, warn};
use serde::Serialize;
use structopt::StructOpt;

use dubins_lib::{
    dubins::{selector::all_candidates, DubinsError, DEFAULT_STEP_RADIUS_FRACTION},
    find_shortest_path_with_step,
    params::{PlannerParams, PoseParams},
    DubinsPath, Path, PathFamily, Pose,
};
use util::{
    archive::Archiver,
    host,
    logger::{logger_init, ConsoleStream, LoggerParams},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the trajectory archive inside the session's archive directory.
const TRAJECTORY_ARCHIVE: &str = "trajectory.csv";

/// Name of the result file inside the session directory.
const RESULT_FILE: &str = "result.json";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Plan the shortest path between two poses for a vehicle with a minimum turning radius.
#[derive(Debug, StructOpt)]
#[structopt(name = "dubins_exec")]
struct ExecArgs {
    /// Parameter file, relative to the `params` directory of the software root.
    ///
    /// Only read if the start, end and radius are not all given on the command line.
    #[structopt(long, default_value = "dubins_exec.toml")]
    params: String,

    /// Start pose as `x_m y_m heading_deg`.
    #[structopt(long, number_of_values = 3, allow_hyphen_values = true)]
    start: Option<Vec<f64>>,

    /// End pose as `x_m y_m heading_deg`.
    #[structopt(long, number_of_values = 3, allow_hyphen_values = true)]
    end: Option<Vec<f64>>,

    /// Minimum turning radius in meters.
    #[structopt(long)]
    radius: Option<f64>,

    /// Trajectory sampling step in meters.
    #[structopt(long)]
    step: Option<f64>,

    /// Only search these path families, e.g. `--family LSL RSR`. All families are searched if
    /// not given.
    #[structopt(long = "family")]
    families: Vec<PathFamily>,

    /// Log every path family, not just the shortest.
    #[structopt(long)]
    all: bool,

    /// Print the result as JSON on stdout. Logs go to stderr instead.
    #[structopt(long)]
    json: bool,

    /// Increase log verbosity, once for debug and twice for trace.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

/// The outcome of a planning request, as saved into the session.
#[derive(Debug, Clone, Serialize)]
struct PlanResult {
    start: Pose,
    end: Pose,
    turn_radius_m: f64,
    step_m: f64,

    /// The shortest path, or `None` if no path exists.
    path: Option<DubinsPath>,

    /// The sampled trajectory of the path.
    trajectory: Option<Path>,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = ExecArgs::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("dubins_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger, keeping stdout clean for the JSON result
    let console = if args.json {
        ConsoleStream::Stderr
    } else {
        ConsoleStream::Stdout
    };
    logger_init(&LoggerParams::from_verbosity(args.verbose, console), &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Dubins Executable\n");
    debug!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", args);

    // ---- LOAD PARAMETERS ----

    let params = build_params(&args)?;

    let start = Pose::from(params.start);
    let end = Pose::from(params.end);
    let radius_m = params.turn_radius_m;
    let step_m = params.step_m();

    info!(
        "Planning from {:?} to {:?} with a turning radius of {} m and a step of {} m",
        start, end, radius_m, step_m
    );

    // ---- PLAN ----

    if args.all {
        let candidates =
            all_candidates(&start, &end, radius_m).wrap_err("Invalid planning request")?;

        info!("Path families:");
        for c in candidates.iter() {
            match c.length(radius_m) {
                Some(l) => info!("    {}: {:.4} m, params = {:.4?}", c.family, l, c.params),
                None => info!("    {}: infeasible", c.family),
            }
        }
    }

    let mut result = PlanResult {
        start,
        end,
        turn_radius_m: radius_m,
        step_m,
        path: None,
        trajectory: None,
    };

    let planned = if args.families.is_empty() {
        find_shortest_path_with_step(&start, &end, radius_m, step_m)
    } else {
        info!("Restricting the search to {:?}", args.families);
        DubinsPath::shortest_in(&start, &end, radius_m, &args.families)
            .and_then(|path| path.trace(step_m).map(|traj| (path, traj)))
    };

    match planned {
        Ok((path, traj)) => {
            info!(
                "Shortest path is {} ({:.4} m, {:.4} m, {:.4} m), total length {:.4} m",
                path.family,
                path.segment_length(0).unwrap_or(0.0),
                path.segment_length(1).unwrap_or(0.0),
                path.segment_length(2).unwrap_or(0.0),
                path.length_m
            );

            let endpoint = path.endpoint();
            debug!("Path endpoint: {:?}", endpoint);

            if let (Some(length_m), Some(spacing_m)) = (traj.get_length(), traj.max_separation()) {
                debug!(
                    "Trajectory polyline length {:.4} m, largest spacing {:.4} m",
                    length_m, spacing_m
                );
            }
            if let Some(last) = traj.last() {
                debug!(
                    "Last trajectory point is {:.6} m from the goal",
                    (last - end.position2()).norm()
                );
            }

            // ---- ARCHIVE ----

            let mut archiver = Archiver::from_path(&session, TRAJECTORY_ARCHIVE)
                .wrap_err("Failed to create the trajectory archive")?;
            archiver
                .serialise_all(traj.records())
                .wrap_err("Failed to write the trajectory archive")?;

            info!(
                "Wrote {} trajectory points to {:?}",
                traj.get_num_points(),
                archiver.path()
            );

            result.path = Some(path);
            result.trajectory = Some(traj);
        }
        Err(DubinsError::NoPathFound) => {
            warn!("No path exists between the given poses");
        }
        Err(e) => return Err(e).wrap_err("Invalid planning request"),
    }

    // ---- OUTPUT ----

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).wrap_err("Failed to serialise the result")?
        );
    }

    session.save(RESULT_FILE, result);

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the planning request from the parameter file and any command line overrides.
fn build_params(args: &ExecArgs) -> Result<PlannerParams> {
    let start = args.start.as_deref().map(parse_pose).transpose()?;
    let end = args.end.as_deref().map(parse_pose).transpose()?;

    let mut params = match (start, end, args.radius) {
        (Some(start), Some(end), Some(turn_radius_m)) => {
            debug!("Request fully given on the command line, not loading parameters");
            PlannerParams {
                start,
                end,
                turn_radius_m,
                step_m: None,
            }
        }
        _ => {
            let mut p: PlannerParams = util::params::load(&args.params)
                .wrap_err_with(|| format!("Could not load params from \"{}\"", args.params))?;

            if let Some(start) = start {
                p.start = start;
            }
            if let Some(end) = end {
                p.end = end;
            }
            if let Some(r) = args.radius {
                p.turn_radius_m = r;
            }

            p
        }
    };

    if args.step.is_some() {
        params.step_m = args.step;
    }

    if params.step_m.is_none() {
        debug!(
            "No step given, using {} of the turning radius",
            DEFAULT_STEP_RADIUS_FRACTION
        );
    }

    Ok(params)
}

fn parse_pose(values: &[f64]) -> Result<PoseParams> {
    PoseParams::from_slice(values)
        .ok_or_else(|| eyre!("Expected a pose as `x_m y_m heading_deg`, got {:?}", values))
}
