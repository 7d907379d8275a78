//! Closed-form solutions of the six Dubins path families.
//!
//! Every primitive works in the canonical frame: the start pose sits at the origin facing along
//! the line to the goal, `alpha` and `beta` are the start and goal headings relative to that
//! line, and `d` is the separation in units of the turning radius. Turning parameters are the
//! arc subtended in radians, straight parameters are a length in turning radii.
//!
//! A primitive never produces NaN: when its discriminant is outside the domain of `sqrt` or
//! `acos` the candidate is returned with `feasible = false` and zeroed parameters.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::f64::consts::TAU;

use log::trace;
use util::maths::normalize_angle as norm;

use super::{PathCandidate, PathFamily};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Round-off allowed on a discriminant before the family is treated as infeasible.
///
/// Coincident poses put several discriminants exactly on the boundary, where `sin^2 + cos^2`
/// round-off can push them a few ULPs outside the domain.
const DISCRIMINANT_TOL: f64 = 1e-10;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Trigonometric terms shared by all families.
struct Terms {
    alpha: f64,
    beta: f64,
    d: f64,
    sa: f64,
    sb: f64,
    ca: f64,
    cb: f64,

    /// `cos(alpha - beta)`, i.e. `ca * cb + sa * sb`
    c_ab: f64,
}

impl Terms {
    /// Compute the shared terms, or `None` if any input is not finite.
    fn new(alpha: f64, beta: f64, d: f64) -> Option<Self> {
        if !(alpha.is_finite() && beta.is_finite() && d.is_finite()) {
            return None;
        }

        // Angles are taken modulo 2pi before any transcendental function sees them
        let alpha = norm(alpha);
        let beta = norm(beta);

        let (sa, ca) = alpha.sin_cos();
        let (sb, cb) = beta.sin_cos();

        Some(Self {
            alpha,
            beta,
            d,
            sa,
            sb,
            ca,
            cb,
            c_ab: ca * cb + sa * sb,
        })
    }
}

/// `sqrt` of a discriminant, or `None` if it is negative beyond round-off.
fn checked_sqrt(p_sq: f64) -> Option<f64> {
    if p_sq < -DISCRIMINANT_TOL {
        None
    } else {
        Some(p_sq.max(0.0).sqrt())
    }
}

/// `acos` of a discriminant, or `None` if it lies outside [-1, 1] beyond round-off.
fn checked_acos(cos_p: f64) -> Option<f64> {
    if cos_p.abs() > 1.0 + DISCRIMINANT_TOL {
        None
    } else {
        Some(cos_p.max(-1.0).min(1.0).acos())
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Left, Straight, Left.
pub fn lsl(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::LSL;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let p_sq = 2.0 + tr.d * tr.d - 2.0 * tr.c_ab + 2.0 * tr.d * (tr.sa - tr.sb);
    trace!("LSL: p^2 = {:.6}", p_sq);

    let p = match checked_sqrt(p_sq) {
        Some(p) => p,
        None => return PathCandidate::infeasible(family),
    };

    let phi = (tr.cb - tr.ca).atan2(tr.d + tr.sa - tr.sb);

    PathCandidate::feasible(
        family,
        [norm(phi - tr.alpha), p, norm(tr.beta - phi)],
    )
}

/// Right, Straight, Right.
pub fn rsr(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::RSR;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let p_sq = 2.0 + tr.d * tr.d - 2.0 * tr.c_ab + 2.0 * tr.d * (tr.sb - tr.sa);
    trace!("RSR: p^2 = {:.6}", p_sq);

    let p = match checked_sqrt(p_sq) {
        Some(p) => p,
        None => return PathCandidate::infeasible(family),
    };

    let phi = (tr.ca - tr.cb).atan2(tr.d - tr.sa + tr.sb);

    PathCandidate::feasible(
        family,
        [norm(tr.alpha - phi), p, norm(phi - tr.beta)],
    )
}

/// Left, Straight, Right.
///
/// Mirror image of [`rsl`]: the straight segment is the inner tangent between a left circle at
/// the start and a right circle at the goal.
pub fn lsr(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::LSR;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let p_sq = -2.0 + tr.d * tr.d + 2.0 * tr.c_ab + 2.0 * tr.d * (tr.sa + tr.sb);
    trace!("LSR: p^2 = {:.6}", p_sq);

    let p = match checked_sqrt(p_sq) {
        Some(p) => p,
        None => return PathCandidate::infeasible(family),
    };
    let phi = (-tr.ca - tr.cb).atan2(tr.d + tr.sa + tr.sb) - (-2.0f64).atan2(p);

    PathCandidate::feasible(family, [norm(phi - tr.alpha), p, norm(phi - tr.beta)])
}

/// Right, Straight, Left.
pub fn rsl(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::RSL;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let p_sq = -2.0 + tr.d * tr.d + 2.0 * tr.c_ab - 2.0 * tr.d * (tr.sa + tr.sb);
    trace!("RSL: p^2 = {:.6}", p_sq);

    let p = match checked_sqrt(p_sq) {
        Some(p) => p,
        None => return PathCandidate::infeasible(family),
    };
    let phi = (tr.ca + tr.cb).atan2(tr.d - tr.sa - tr.sb) - 2.0f64.atan2(p);

    PathCandidate::feasible(family, [norm(tr.alpha - phi), p, norm(tr.beta - phi)])
}

/// Right, Left, Right.
///
/// Only feasible when the start and goal circles are close enough (`d < 4` for aligned
/// headings) for a third tangent circle to touch both.
pub fn rlr(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::RLR;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let cos_p = (6.0 - tr.d * tr.d + 2.0 * tr.c_ab + 2.0 * tr.d * (tr.sa - tr.sb)) / 8.0;
    trace!("RLR: cos(p) = {:.6}", cos_p);

    let p = match checked_acos(cos_p) {
        Some(acos_p) => norm(TAU - acos_p),
        None => return PathCandidate::infeasible(family),
    };
    let phi = (tr.ca - tr.cb).atan2(tr.d - tr.sa + tr.sb);
    let t = norm(tr.alpha - phi + p / 2.0);

    PathCandidate::feasible(family, [t, p, norm(tr.alpha - tr.beta - t + p)])
}

/// Left, Right, Left.
pub fn lrl(alpha: f64, beta: f64, d: f64) -> PathCandidate {
    let family = PathFamily::LRL;
    let tr = match Terms::new(alpha, beta, d) {
        Some(t) => t,
        None => return PathCandidate::infeasible(family),
    };

    let cos_p = (6.0 - tr.d * tr.d + 2.0 * tr.c_ab + 2.0 * tr.d * (tr.sb - tr.sa)) / 8.0;
    trace!("LRL: cos(p) = {:.6}", cos_p);

    let p = match checked_acos(cos_p) {
        Some(acos_p) => norm(TAU - acos_p),
        None => return PathCandidate::infeasible(family),
    };
    let phi = (tr.ca - tr.cb).atan2(tr.d + tr.sa - tr.sb);
    let t = norm(-tr.alpha - phi + p / 2.0);

    PathCandidate::feasible(family, [t, p, norm(tr.beta - tr.alpha - t + p)])
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
