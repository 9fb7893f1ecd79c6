//! A meshing pair of gears: both tooth profiles plus the mesh analysis.
use tracing::info;

use crate::math::{check_undercut, contact_ratio, GearPairAnalysis, UndercutStatus};
use crate::profile::{generate_tooth_profile, ToothProfile};
use crate::spec::{GearSpec, SegmentCounts};
use crate::{GearError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct GearResult {
    pub profile: ToothProfile,
    pub undercut: UndercutStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GearPair {
    pub gear1: GearResult,
    pub gear2: GearResult,
    pub analysis: GearPairAnalysis,
}

/// Generate both gears of a meshing pair and analyse the mesh.
///
/// Mating gears must share module and pressure angle. The contact ratio uses the first gear's
/// addendum for both, and sees the signed teeth counts, so an internal gear enters it with a
/// negative count. Undercut is checked on each gear as given, before normalization.
pub fn generate_gear_pair(
    gear1: &GearSpec,
    gear2: &GearSpec,
    segments: &SegmentCounts,
) -> Result<GearPair> {
    gear1.validate()?;
    gear2.validate()?;
    if gear1.module != gear2.module {
        return Err(GearError::invalid(
            "module",
            format!(
                "mating gears must share a module, got {} and {}",
                gear1.module, gear2.module
            ),
        ));
    }
    if gear1.pressure_angle != gear2.pressure_angle {
        return Err(GearError::invalid(
            "pressure_angle",
            format!(
                "mating gears must share a pressure angle, got {} and {}",
                gear1.pressure_angle, gear2.pressure_angle
            ),
        ));
    }

    // An internal gear with as many teeth as its pinion has no center distance
    if gear1.signed_teeth() + gear2.signed_teeth() == 0.0 {
        return Err(GearError::invalid(
            "teeth",
            format!(
                "teeth counts {} and {} cancel out, the pair has no center distance",
                gear1.signed_teeth(),
                gear2.signed_teeth()
            ),
        ));
    }

    let analysis = contact_ratio(
        gear1.module,
        gear1.signed_teeth(),
        gear2.signed_teeth(),
        gear1.profile_shift,
        gear2.profile_shift,
        gear1.pressure_angle,
        gear1.addendum,
    );
    info!(
        contact_ratio = analysis.contact_ratio,
        center_distance = analysis.center_distance,
        "analysed gear pair"
    );

    let gear1 = GearResult {
        profile: generate_tooth_profile(gear1, segments)?,
        undercut: undercut(gear1),
    };
    let gear2 = GearResult {
        profile: generate_tooth_profile(gear2, segments)?,
        undercut: undercut(gear2),
    };

    Ok(GearPair {
        gear1,
        gear2,
        analysis,
    })
}

fn undercut(spec: &GearSpec) -> UndercutStatus {
    check_undercut(
        spec.signed_teeth(),
        spec.pressure_angle,
        spec.profile_shift,
        spec.addendum,
    )
}
