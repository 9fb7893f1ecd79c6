//! Angular constants of a single tooth, derived from a normalized spec.
//!
//! The tooth is laid out with its space centered on the +x axis: the root arc starts at angle
//! zero and the outer arc ends on the tooth centerline at `alpha_m`. Angles are in radians.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::{debug, warn};

use crate::math::sqrt_clamped;
use crate::spec::NormalizedSpec;

#[derive(Clone, Debug, PartialEq)]
pub struct AngularConstants {
    /// Reference pressure angle
    pub alpha_0: f64,
    pub tooth_center_angle: f64,
    pub pitch_angle: f64,
    /// Angle of the tooth centerline, where the outer arc ends
    pub alpha_m: f64,
    /// Polar offset of the involute's base point
    pub alpha_is: f64,
    /// Involute roll angle where the flank meets the root fillet
    pub theta_is: f64,
    /// Involute roll angle where the flank meets the tip round
    pub theta_ie: f64,
    /// Angle of the tip point, where the edge round meets the outer arc
    pub alpha_e: f64,
    /// Angle where the root arc meets the trochoid
    pub alpha_ts: f64,
    /// Rolling parameter at the end of the trochoid
    pub theta_te: f64,
    /// Rotation that brings the tooth centerline onto the reference axis
    pub align_angle: f64,
    /// Edge round factor after tip relief
    pub edge_round: f64,
    /// The involute would have run past the centerline, so the edge round was shrunk
    pub tip_relief_applied: bool,
    /// The tip radicand went negative and was clamped to zero
    pub tip_radicand_clamped: bool,
}

impl AngularConstants {
    pub fn new(spec: &NormalizedSpec) -> Self {
        let z = spec.teeth;
        let x = spec.profile_shift;
        let b = spec.backlash;
        let a = spec.addendum;
        let d = spec.dedendum;
        let c = spec.hob_tip_radius;
        let mut e = spec.edge_round;

        let alpha_0 = spec.pressure_angle.to_radians();
        let (sin_a0, cos_a0) = alpha_0.sin_cos();

        let tooth_center_angle = PI / z;
        let pitch_angle = TAU / z;
        let alpha_m = tooth_center_angle;

        let alpha_is = alpha_0 + tooth_center_angle / 2.0 + b / (z * cos_a0)
            - (1.0 + 2.0 * x / z) * sin_a0 / cos_a0;
        let theta_is = alpha_0.tan() + 2.0 * (c * (1.0 - sin_a0) + x - d) / (z * cos_a0 * sin_a0);

        let tip = sqrt_clamped(((z + 2.0 * (x + a - e)) / (z * cos_a0)).powi(2) - 1.0);
        if tip.clamped {
            warn!(z, "tip circle inside base circle, tip radicand clamped to zero");
        }
        let theta_ie = 2.0 * e / (z * cos_a0) + tip.value;
        let alpha_e = alpha_is + theta_ie - tip.value.atan();

        // Keep the involute from crossing the tooth centerline
        let tip_relief_applied =
            alpha_e > alpha_m && alpha_m > alpha_is + theta_ie - theta_ie.atan();
        if tip_relief_applied {
            let overrun = sqrt_clamped((1.0 / (alpha_is + theta_ie - alpha_m).cos()).powi(2) - 1.0);
            let relieved = (e / 2.0) * cos_a0 * (theta_ie - overrun.value);
            warn!(from = e, to = relieved, "edge round reduced by tip relief");
            e = relieved;
        }

        let alpha_ts = (2.0 * (c * (1.0 - sin_a0) - d) * sin_a0 + b) / (z * cos_a0)
            - 2.0 * c * cos_a0 / z
            + PI / (2.0 * z);
        let theta_te =
            2.0 * c * cos_a0 / z - 2.0 * (d - x - c * (1.0 - sin_a0)) * cos_a0 / (z * sin_a0);

        let align_angle = FRAC_PI_2 - tooth_center_angle;

        let constants = AngularConstants {
            alpha_0,
            tooth_center_angle,
            pitch_angle,
            alpha_m,
            alpha_is,
            theta_is,
            theta_ie,
            alpha_e,
            alpha_ts,
            theta_te,
            align_angle,
            edge_round: e,
            tip_relief_applied,
            tip_radicand_clamped: tip.clamped,
        };
        debug!(?constants, "derived tooth constants");
        constants
    }
}
