//! Gear parameters as supplied by the user, and their normalized form.
use crate::{GearError, Result};

/// Whether the teeth point outwards (spur) or inwards (ring gear)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GearKind {
    External,
    Internal,
}

/// Manufacturing parameters for one gear. Everything except `module` and `pressure_angle` is
/// a factor of the module.
#[derive(Clone, Debug, PartialEq)]
pub struct GearSpec {
    /// Module, in mm
    pub module: f64,
    pub kind: GearKind,
    pub teeth: u32,
    /// Pressure angle, in degrees
    pub pressure_angle: f64,
    pub profile_shift: f64,
    pub backlash: f64,
    pub addendum: f64,
    pub dedendum: f64,
    /// Tip radius of the hob, which cuts the root fillet
    pub hob_tip_radius: f64,
    /// Radius of the round on the tooth tip edge
    pub edge_round: f64,
}

impl Default for GearSpec {
    fn default() -> Self {
        GearSpec::new(1.0, GearKind::External, 20)
    }
}

impl GearSpec {
    /// A gear with standard proportions: 20 degree pressure angle, no shift or backlash,
    /// addendum 1, dedendum 1.25.
    pub fn new(module: f64, kind: GearKind, teeth: u32) -> Self {
        GearSpec {
            module,
            kind,
            teeth,
            pressure_angle: 20.0,
            profile_shift: 0.0,
            backlash: 0.0,
            addendum: 1.0,
            dedendum: 1.25,
            hob_tip_radius: 0.25,
            edge_round: 0.1,
        }
    }

    /// Build a spec from the legacy encoding, where a negative teeth count marks an internal gear
    #[allow(clippy::too_many_arguments)]
    pub fn from_signed_teeth(
        module: f64,
        teeth: i32,
        pressure_angle: f64,
        profile_shift: f64,
        backlash: f64,
        addendum: f64,
        dedendum: f64,
        hob_tip_radius: f64,
        edge_round: f64,
    ) -> Result<Self> {
        if teeth == 0 {
            return Err(GearError::invalid("teeth", "must not be zero"));
        }
        let kind = if teeth < 0 {
            GearKind::Internal
        } else {
            GearKind::External
        };
        Ok(GearSpec {
            module,
            kind,
            teeth: teeth.unsigned_abs(),
            pressure_angle,
            profile_shift,
            backlash,
            addendum,
            dedendum,
            hob_tip_radius,
            edge_round,
        })
    }

    /// Teeth count in the legacy encoding: negative for internal gears
    pub fn signed_teeth(&self) -> f64 {
        match self.kind {
            GearKind::External => self.teeth as f64,
            GearKind::Internal => -(self.teeth as f64),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.module.is_finite() && self.module > 0.0) {
            return Err(GearError::invalid(
                "module",
                format!("must be positive, got {}", self.module),
            ));
        }
        if self.teeth == 0 {
            return Err(GearError::invalid("teeth", "must not be zero"));
        }
        let factors = [
            ("pressure_angle", self.pressure_angle),
            ("profile_shift", self.profile_shift),
            ("backlash", self.backlash),
            ("addendum", self.addendum),
            ("dedendum", self.dedendum),
            ("hob_tip_radius", self.hob_tip_radius),
            ("edge_round", self.edge_round),
        ];
        for (name, value) in factors {
            if !value.is_finite() {
                return Err(GearError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Resolve the internal gear convention. An internal gear is cut as the negative of an
    /// external one: shift and backlash change sign, addendum swaps with dedendum and the hob
    /// tip radius swaps with the edge round.
    pub fn normalize(&self) -> NormalizedSpec {
        let (profile_shift, backlash, addendum, dedendum, hob_tip_radius, edge_round) =
            match self.kind {
                GearKind::External => (
                    self.profile_shift,
                    self.backlash,
                    self.addendum,
                    self.dedendum,
                    self.hob_tip_radius,
                    self.edge_round,
                ),
                GearKind::Internal => (
                    -self.profile_shift,
                    -self.backlash,
                    self.dedendum,
                    self.addendum,
                    self.edge_round,
                    self.hob_tip_radius,
                ),
            };
        NormalizedSpec {
            module: self.module,
            kind: self.kind,
            teeth: self.teeth as f64,
            pressure_angle: self.pressure_angle,
            profile_shift,
            backlash,
            addendum,
            dedendum,
            hob_tip_radius,
            edge_round,
        }
    }
}

/// A spec with the internal gear convention resolved. All tooth geometry is computed from this,
/// as if the gear were external.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedSpec {
    pub module: f64,
    /// The kind of the gear this was normalized from
    pub kind: GearKind,
    pub teeth: f64,
    pub pressure_angle: f64,
    pub profile_shift: f64,
    pub backlash: f64,
    pub addendum: f64,
    pub dedendum: f64,
    pub hob_tip_radius: f64,
    pub edge_round: f64,
}

/// Number of points sampled along each of the five curves of a half tooth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentCounts {
    pub involute: usize,
    pub edge_round: usize,
    pub root_round: usize,
    pub outer: usize,
    pub root: usize,
}

impl Default for SegmentCounts {
    fn default() -> Self {
        SegmentCounts {
            involute: 20,
            edge_round: 10,
            root_round: 10,
            outer: 5,
            root: 5,
        }
    }
}

impl SegmentCounts {
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("involute segments", self.involute),
            ("edge round segments", self.edge_round),
            ("root round segments", self.root_round),
            ("outer arc segments", self.outer),
            ("root arc segments", self.root),
        ];
        for (name, n) in counts {
            if n == 0 {
                return Err(GearError::invalid(name, "must be at least 1"));
            }
        }
        Ok(())
    }

    /// Points in an assembled tooth: every curve twice, less the nine shared joints
    pub fn profile_len(&self) -> usize {
        2 * (self.involute + self.edge_round + self.root_round + self.outer + self.root) - 9
    }
}
