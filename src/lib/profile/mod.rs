//! Assembly of a complete tooth outline from its curves.
use nalgebra::geometry::Point2;
use tracing::debug;

use crate::curves;
use crate::spec::{GearKind, GearSpec, SegmentCounts};
use crate::tooth::AngularConstants;
use crate::transform::mirror;
use crate::Result;

/// One tooth pitch of a gear outline. The points run from the centerline of one tooth,
/// through the space centered on the +x axis, to the centerline of the next.
#[derive(Clone, Debug, PartialEq)]
pub struct ToothProfile {
    pub points: Vec<Point2<f64>>,
    pub kind: GearKind,
    /// Teeth count after normalization; always positive
    pub teeth: u32,
    pub pitch_angle: f64,
    pub align_angle: f64,
}

/// The half-tooth curves, each running away from the middle of the tooth space
pub struct HalfTooth {
    pub root_arc: Vec<Point2<f64>>,
    pub root_round: Vec<Point2<f64>>,
    pub involute: Vec<Point2<f64>>,
    pub edge_round: Vec<Point2<f64>>,
    pub outer_arc: Vec<Point2<f64>>,
}

/// Join the half tooth with its mirror image. Every curve after the first starts on the
/// point the previous one ended on, so that point is dropped. This includes the root arc,
/// whose first point repeats the last point of its mirror, so the outline holds no duplicate
/// vertices and needs no further de-duplication.
pub fn assemble(half: &HalfTooth) -> Vec<Point2<f64>> {
    let mirrored = [
        mirror(&half.outer_arc),
        mirror(&half.edge_round),
        mirror(&half.involute),
        mirror(&half.root_round),
        mirror(&half.root_arc),
    ];
    let segments = mirrored.iter().map(Vec::as_slice).chain([
        half.root_arc.as_slice(),
        half.root_round.as_slice(),
        half.involute.as_slice(),
        half.edge_round.as_slice(),
        half.outer_arc.as_slice(),
    ]);

    let mut points: Vec<Point2<f64>> = Vec::new();
    for (i, segment) in segments.enumerate() {
        let skip = if i == 0 { 0 } else { 1 };
        points.extend(segment.iter().skip(skip));
    }
    points
}

/// Generate the profile of one tooth of `spec`
pub fn generate_tooth_profile(spec: &GearSpec, segments: &SegmentCounts) -> Result<ToothProfile> {
    spec.validate()?;
    segments.validate()?;

    let normalized = spec.normalize();
    let k = AngularConstants::new(&normalized);

    let involute = curves::involute(&normalized, &k, segments.involute);
    // Validated above, so the involute has at least one point
    let involute_end = involute[involute.len() - 1];
    let half = HalfTooth {
        root_arc: curves::root_arc(&normalized, &k, segments.root),
        root_round: curves::root_round(&normalized, &k, segments.root_round),
        edge_round: curves::edge_round(&normalized, &k, involute_end, segments.edge_round),
        outer_arc: curves::outer_arc(&normalized, &k, segments.outer),
        involute,
    };

    let points = assemble(&half);
    debug!(
        teeth = spec.teeth,
        kind = ?spec.kind,
        points = points.len(),
        "assembled tooth profile"
    );

    Ok(ToothProfile {
        points,
        kind: spec.kind,
        teeth: spec.teeth,
        pitch_angle: k.pitch_angle,
        align_angle: k.align_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GearError;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn points_equal(p1: Point2<f64>, p2: Point2<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    fn line(from: f64, to: f64, n: usize) -> Vec<Point2<f64>> {
        curves::linspace(from, to, n)
            .map(|x| Point2::new(x, x / 10.0))
            .collect()
    }

    #[test]
    fn test_assemble_order_and_shared_points() {
        let half = HalfTooth {
            root_arc: line(0.0, 1.0, 2),
            root_round: line(1.0, 2.0, 3),
            involute: line(2.0, 3.0, 4),
            edge_round: line(3.0, 4.0, 2),
            outer_arc: line(4.0, 5.0, 3),
        };
        let points = assemble(&half);
        assert_eq!(points.len(), 2 * (2 + 3 + 4 + 2 + 3) - 9);
        // Starts on the mirrored end of the outer arc and finishes on the outer arc
        assert!(points_equal(points[0], Point2::new(5.0, -0.5)));
        assert!(points_equal(points[points.len() - 1], Point2::new(5.0, 0.5)));
        // x runs down to the root and back out again
        let turn = points.iter().position(|p| p.x == 0.0).unwrap();
        assert!(points[..=turn].windows(2).all(|w| w[1].x < w[0].x));
        assert!(points[turn..].windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_profile_length_and_metadata() {
        let segments = SegmentCounts::default();
        let profile = generate_tooth_profile(&GearSpec::default(), &segments).unwrap();
        assert_eq!(profile.points.len(), segments.profile_len());
        assert_eq!(profile.teeth, 20);
        assert_eq!(profile.kind, GearKind::External);
        assert!((profile.pitch_angle - PI / 10.0).abs() < EPSILON);
        assert!((profile.align_angle - (PI / 2.0 - PI / 20.0)).abs() < EPSILON);
        assert!(profile
            .points
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_profile_is_symmetric() {
        let profile = generate_tooth_profile(&GearSpec::default(), &SegmentCounts::default())
            .unwrap();
        let first = profile.points[0];
        let last = profile.points[profile.points.len() - 1];
        assert!(points_equal(first, Point2::new(last.x, -last.y)));
        // Both ends sit on tooth centerlines
        assert!((last.y.atan2(last.x) - PI / 20.0).abs() < EPSILON);
        assert!((first.y.atan2(first.x) + PI / 20.0).abs() < EPSILON);
        assert!(points_equal(last, Point2::new(10.864571746546515, 1.7207791154425396)));
    }

    #[test]
    fn test_profile_is_continuous() {
        let spec = GearSpec {
            teeth: 18,
            profile_shift: 0.2,
            backlash: 0.05,
            hob_tip_radius: 0.2,
            ..GearSpec::default()
        };
        let profile = generate_tooth_profile(&spec, &SegmentCounts::default()).unwrap();
        let max_step = profile
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .fold(0.0, f64::max);
        assert!(max_step < 0.2, "gap of {max_step} in profile");
    }

    #[test]
    fn test_internal_gear_profile() {
        let spec = GearSpec::new(1.0, GearKind::Internal, 40);
        let profile = generate_tooth_profile(&spec, &SegmentCounts::default()).unwrap();
        assert_eq!(profile.kind, GearKind::Internal);
        assert_eq!(profile.teeth, 40);
        let last = profile.points[profile.points.len() - 1];
        assert!(points_equal(last, Point2::new(21.18449334182897, 1.667255784216705)));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let spec = GearSpec {
            module: 0.0,
            ..GearSpec::default()
        };
        let err = generate_tooth_profile(&spec, &SegmentCounts::default());
        assert!(matches!(err, Err(GearError::InvalidSpec { .. })));

        let segments = SegmentCounts {
            involute: 0,
            ..SegmentCounts::default()
        };
        let err = generate_tooth_profile(&GearSpec::default(), &segments);
        assert!(matches!(err, Err(GearError::InvalidSpec { .. })));
    }
}
