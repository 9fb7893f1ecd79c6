//! Tooth profiles for meshing pairs of involute spur and internal gears.
//!
//! A tooth is built from five curves (involute flank, tip edge round, trochoidal root fillet,
//! addendum arc and dedendum arc) and their mirror images. Everything here is pure computation;
//! writing outlines to CAD formats is left to the caller.
use thiserror::Error;

pub mod curves;
pub mod math;
pub mod pair;
pub mod patterns;
pub mod profile;
pub mod spec;
pub mod tooth;
pub mod transform;

pub use math::{GearPairAnalysis, SolverOutcome, SolverStatus, UndercutStatus};
pub use pair::{generate_gear_pair, GearPair, GearResult};
pub use profile::{generate_tooth_profile, ToothProfile};
pub use spec::{GearKind, GearSpec, SegmentCounts};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GearError {
    /// Parameters that can't describe a gear. Degenerate but valid geometry is not an error.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidSpec { name: String, reason: String },
}

impl GearError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        GearError::InvalidSpec {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GearError>;
