//! Closed-form gear pair analysis: operating pressure angle, contact ratio and undercut.
use std::f64::consts::PI;
use std::fmt;

use tracing::{debug, warn};

/// Newton steps allowed when solving for the operating pressure angle
pub const MAX_SOLVER_ITERATIONS: usize = 10;
/// Below this the Newton derivative is treated as zero
pub const MIN_DERIVATIVE: f64 = 1e-9;
/// Largest |inv(a) - target| accepted as converged
pub const SOLVER_TOLERANCE: f64 = 1e-12;

/// Involute function, inv(a) = tan(a) - a
pub fn inv(alpha: f64) -> f64 {
    alpha.tan() - alpha
}

/// Square root of a radicand that is allowed to dip below zero through rounding or odd
/// parameters. Negative radicands give zero, and say so.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampedRoot {
    pub value: f64,
    pub clamped: bool,
}

pub fn sqrt_clamped(radicand: f64) -> ClampedRoot {
    if radicand < 0.0 {
        ClampedRoot {
            value: 0.0,
            clamped: true,
        }
    } else {
        ClampedRoot {
            value: radicand.sqrt(),
            clamped: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    Converged,
    MaxIterationsExceeded,
    /// The derivative vanished before the residual did
    Stalled,
}

/// Result of the operating pressure angle solve. `angle` is the final estimate whatever the
/// status.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverOutcome {
    /// Operating pressure angle, in radians
    pub angle: f64,
    pub residual: f64,
    pub iterations: usize,
    pub status: SolverStatus,
}

impl SolverOutcome {
    pub fn converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// Solve inv(a_w) = inv(a_0) + 2 (x1 + x2) tan(a_0) / (z1 + z2) for the operating pressure
/// angle a_w of a meshing pair, by Newton iteration from a_0.
pub fn operating_pressure_angle(
    z1: f64,
    z2: f64,
    x1: f64,
    x2: f64,
    alpha_deg: f64,
) -> SolverOutcome {
    let alpha_0 = alpha_deg.to_radians();
    let target = inv(alpha_0) + 2.0 * (x1 + x2) * alpha_0.tan() / (z1 + z2);

    let mut alpha_w = alpha_0;
    let mut iterations = 0;
    let mut stalled = false;
    while iterations < MAX_SOLVER_ITERATIONS {
        let f = inv(alpha_w) - target;
        if f.abs() <= SOLVER_TOLERANCE {
            break;
        }
        // d/da (tan a - a) = tan^2 a
        let f_prime = alpha_w.tan().powi(2);
        if f_prime.abs() < MIN_DERIVATIVE {
            stalled = true;
            break;
        }
        alpha_w -= f / f_prime;
        iterations += 1;
        debug!(iterations, alpha_w, "operating pressure angle step");
    }

    let residual = inv(alpha_w) - target;
    let status = if residual.abs() <= SOLVER_TOLERANCE {
        SolverStatus::Converged
    } else if stalled {
        SolverStatus::Stalled
    } else {
        SolverStatus::MaxIterationsExceeded
    };
    if status != SolverStatus::Converged {
        warn!(
            ?status,
            residual, alpha_w, "operating pressure angle did not converge"
        );
    }

    SolverOutcome {
        angle: alpha_w,
        residual,
        iterations,
        status,
    }
}

/// Contact ratio and center distance of a meshing pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GearPairAnalysis {
    /// Transverse contact ratio. Zero when an addendum circle lies inside its base circle and
    /// the path of contact is undefined. Negative values mean interference and are not clamped.
    pub contact_ratio: f64,
    /// Operating center distance, in the unit of the module
    pub center_distance: f64,
    pub operating_pressure_angle: SolverOutcome,
}

/// Contact ratio of a spur pair sharing module `m` and pressure angle `alpha_deg`. `a1` is the
/// addendum factor applied to both gears.
pub fn contact_ratio(
    m: f64,
    z1: f64,
    z2: f64,
    x1: f64,
    x2: f64,
    alpha_deg: f64,
    a1: f64,
) -> GearPairAnalysis {
    let alpha_0 = alpha_deg.to_radians();
    let solved = operating_pressure_angle(z1, z2, x1, x2, alpha_deg);
    let alpha_w = solved.angle;

    // Profile shift spreads the centers apart
    let center_distance = m * (z1 + z2) / 2.0 * (alpha_0.cos() / alpha_w.cos());

    let rb1 = m * z1 * alpha_0.cos() / 2.0;
    let rb2 = m * z2 * alpha_0.cos() / 2.0;
    let ra1 = m * (z1 / 2.0 + a1 + x1);
    let ra2 = m * (z2 / 2.0 + a1 + x2);

    let val1 = ra1 * ra1 - rb1 * rb1;
    let val2 = ra2 * ra2 - rb2 * rb2;
    if val1 < 0.0 || val2 < 0.0 {
        warn!(
            ra1,
            rb1, ra2, rb2, "addendum circle inside base circle, contact ratio undefined"
        );
        return GearPairAnalysis {
            contact_ratio: 0.0,
            center_distance,
            operating_pressure_angle: solved,
        };
    }

    let path_of_contact = val1.sqrt() + val2.sqrt() - center_distance * alpha_w.sin();
    let base_pitch = m * PI * alpha_0.cos();

    GearPairAnalysis {
        contact_ratio: path_of_contact / base_pitch,
        center_distance,
        operating_pressure_angle: solved,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UndercutStatus {
    Ok,
    /// Profile shift below the minimum that avoids undercut
    Risk { min_shift: f64 },
    /// The check only covers external gears
    NotApplicable,
}

impl fmt::Display for UndercutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndercutStatus::Ok => write!(f, "OK"),
            UndercutStatus::Risk { min_shift } => {
                write!(f, "Warning: Risk of undercut (x < {min_shift:.3})")
            }
            UndercutStatus::NotApplicable => {
                write!(f, "Not applicable for internal gears in this context")
            }
        }
    }
}

/// Check a gear for undercut. `z` is the raw, signed teeth count; zero or negative means an
/// internal gear, which the check doesn't cover.
pub fn check_undercut(z: f64, alpha_deg: f64, x: f64, a: f64) -> UndercutStatus {
    if z <= 0.0 {
        return UndercutStatus::NotApplicable;
    }
    let alpha_0 = alpha_deg.to_radians();
    let min_shift = a - (z / 2.0) * alpha_0.sin().powi(2);
    if x < min_shift {
        warn!(z, x, min_shift, "risk of undercut");
        UndercutStatus::Risk { min_shift }
    } else {
        UndercutStatus::Ok
    }
}
