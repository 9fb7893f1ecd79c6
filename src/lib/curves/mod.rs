//! The five curves that make up one half of a tooth space. Each one is sampled at evenly
//! spaced values of its own parameter, endpoints included.
use nalgebra::geometry::Point2;

use crate::spec::NormalizedSpec;
use crate::tooth::AngularConstants;

/// `n` evenly spaced values from `start` to `end` inclusive. A single sample sits on `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| {
        // Pin the last sample so arcs close exactly
        if n > 1 && i == n - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

fn arc(radius: f64, center: Point2<f64>, start: f64, end: f64, n: usize) -> Vec<Point2<f64>> {
    linspace(start, end, n)
        .map(|t| Point2::new(center.x + radius * t.cos(), center.y + radius * t.sin()))
        .collect()
}

/// Working flank, unwound from the base circle over roll angles `theta_is..theta_ie`
pub fn involute(spec: &NormalizedSpec, k: &AngularConstants, n: usize) -> Vec<Point2<f64>> {
    let base_radius = 0.5 * spec.module * spec.teeth * k.alpha_0.cos();
    linspace(k.theta_is, k.theta_ie, n)
        .map(|theta| {
            let r = base_radius * (1.0 + theta * theta).sqrt();
            let phi = k.alpha_is + theta - theta.atan();
            Point2::new(r * phi.cos(), r * phi.sin())
        })
        .collect()
}

/// Tip point, where the tip round meets the outer arc
pub fn tip_point(spec: &NormalizedSpec, k: &AngularConstants) -> Point2<f64> {
    let r = spec.module * (spec.teeth / 2.0 + spec.profile_shift + spec.addendum);
    Point2::new(r * k.alpha_e.cos(), r * k.alpha_e.sin())
}

/// Center of the tip round, one edge-round radius inside the tip point
pub fn tip_round_center(spec: &NormalizedSpec, k: &AngularConstants) -> Point2<f64> {
    let r = spec.module * (spec.teeth / 2.0 + spec.profile_shift + spec.addendum - k.edge_round);
    Point2::new(r * k.alpha_e.cos(), r * k.alpha_e.sin())
}

/// Round on the tip edge, from the end of the involute to the tip point
pub fn edge_round(
    spec: &NormalizedSpec,
    k: &AngularConstants,
    involute_end: Point2<f64>,
    n: usize,
) -> Vec<Point2<f64>> {
    let center = tip_round_center(spec, k);
    let tip = tip_point(spec, k);
    let start = (involute_end.y - center.y).atan2(involute_end.x - center.x);
    let end = (tip.y - center.y).atan2(tip.x - center.x);
    arc(spec.module * k.edge_round, center, start, end, n)
}

/// Root fillet: the trochoid swept by the hob tip radius as it rolls out of the tooth space
pub fn root_round(spec: &NormalizedSpec, k: &AngularConstants, n: usize) -> Vec<Point2<f64>> {
    let m = spec.module;
    let z = spec.teeth;
    let x = spec.profile_shift;
    let d = spec.dedendum;
    let c = spec.hob_tip_radius;
    let denom = m * d - m * x - m * c;

    linspace(0.0, k.theta_te, n)
        .map(|theta| {
            let theta_s = if denom != 0.0 {
                ((m * z * theta / 2.0) / denom).atan()
            } else if c != 0.0 {
                std::f64::consts::FRAC_PI_2
            } else {
                0.0
            };
            let phi = theta + k.alpha_ts;
            let reach = z / 2.0 + x - d + c;
            Point2::new(
                m * (reach * phi.cos() + (z / 2.0) * theta * phi.sin() - c * (theta_s + phi).cos()),
                m * (reach * phi.sin() - (z / 2.0) * theta * phi.cos() - c * (theta_s + phi).sin()),
            )
        })
        .collect()
}

/// Addendum circle, from the tip point to the tooth centerline
pub fn outer_arc(spec: &NormalizedSpec, k: &AngularConstants, n: usize) -> Vec<Point2<f64>> {
    let r = spec.module * (spec.teeth / 2.0 + spec.addendum + spec.profile_shift);
    arc(r, Point2::origin(), k.alpha_e, k.alpha_m, n)
}

/// Dedendum circle, from the middle of the tooth space to the start of the fillet
pub fn root_arc(spec: &NormalizedSpec, k: &AngularConstants, n: usize) -> Vec<Point2<f64>> {
    let r = spec.module * (spec.teeth / 2.0 - spec.dedendum + spec.profile_shift);
    arc(r, Point2::origin(), 0.0, k.alpha_ts, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::GearSpec;

    const EPSILON: f64 = 1e-9;

    fn points_equal(p1: Point2<f64>, p2: Point2<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    fn standard() -> (NormalizedSpec, AngularConstants) {
        let spec = GearSpec::default().normalize();
        let k = AngularConstants::new(&spec);
        (spec, k)
    }

    #[test]
    fn test_linspace() {
        let v: Vec<f64> = linspace(1.0, 2.0, 5).collect();
        assert_eq!(v, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
        let v: Vec<f64> = linspace(3.0, 7.0, 1).collect();
        assert_eq!(v, vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
        // Descending ranges are fine
        let v: Vec<f64> = linspace(0.0, -1.0, 3).collect();
        assert_eq!(v, vec![0.0, -0.5, -1.0]);
    }

    #[test]
    fn test_linspace_strictly_monotonic() {
        let (_, k) = standard();
        let v: Vec<f64> = linspace(k.theta_is, k.theta_ie, 37).collect();
        assert!(v.windows(2).all(|w| w[1] > w[0]));
        let v: Vec<f64> = linspace(0.0, k.theta_te, 23).collect();
        assert!(v.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_curve_lengths_match_counts() {
        let (spec, k) = standard();
        for n in [1, 2, 7, 20] {
            let inv = involute(&spec, &k, n);
            assert_eq!(inv.len(), n);
            assert_eq!(edge_round(&spec, &k, inv[n - 1], n).len(), n);
            assert_eq!(root_round(&spec, &k, n).len(), n);
            assert_eq!(outer_arc(&spec, &k, n).len(), n);
            assert_eq!(root_arc(&spec, &k, n).len(), n);
        }
    }

    #[test]
    fn test_involute_starts_on_base_circle_roll() {
        let (spec, k) = standard();
        let inv = involute(&spec, &k, 20);
        let base_radius = 0.5 * spec.module * spec.teeth * k.alpha_0.cos();
        let r0 = base_radius * (1.0 + k.theta_is * k.theta_is).sqrt();
        assert!((inv[0].coords.norm() - r0).abs() < EPSILON);
        // Radius grows monotonically along the flank
        assert!(inv
            .windows(2)
            .all(|w| w[1].coords.norm() > w[0].coords.norm()));
    }

    #[test]
    fn test_arcs_have_constant_radius() {
        let (spec, k) = standard();
        let outer = spec.module * (spec.teeth / 2.0 + spec.addendum + spec.profile_shift);
        for p in outer_arc(&spec, &k, 5) {
            assert!((p.coords.norm() - outer).abs() < EPSILON);
        }
        let root = spec.module * (spec.teeth / 2.0 - spec.dedendum + spec.profile_shift);
        let arc = root_arc(&spec, &k, 5);
        assert!(points_equal(arc[0], Point2::new(root, 0.0)));
        for p in &arc {
            assert!((p.coords.norm() - root).abs() < EPSILON);
        }
        assert!((arc[4].y.atan2(arc[4].x) - k.alpha_ts).abs() < EPSILON);
    }

    #[test]
    fn test_curves_meet_at_joints() {
        let (spec, k) = standard();
        let inv = involute(&spec, &k, 20);
        let edge = edge_round(&spec, &k, inv[19], 10);
        let fillet = root_round(&spec, &k, 10);
        let outer = outer_arc(&spec, &k, 5);
        let root = root_arc(&spec, &k, 5);

        assert!(points_equal(root[4], fillet[0]));
        assert!(points_equal(fillet[9], inv[0]));
        assert!(points_equal(inv[19], edge[0]));
        assert!(points_equal(edge[9], outer[0]));
        assert!(points_equal(outer[0], tip_point(&spec, &k)));
    }

    #[test]
    fn test_edge_round_radius() {
        let (spec, k) = standard();
        let inv = involute(&spec, &k, 20);
        let center = tip_round_center(&spec, &k);
        for p in edge_round(&spec, &k, inv[19], 10) {
            assert!(((p - center).norm() - spec.module * k.edge_round).abs() < EPSILON);
        }
    }

    #[test]
    fn test_root_round_without_hob_radius() {
        let spec = GearSpec {
            hob_tip_radius: 0.0,
            dedendum: 0.0,
            ..GearSpec::default()
        }
        .normalize();
        let k = AngularConstants::new(&spec);
        let fillet = root_round(&spec, &k, 10);
        assert!(fillet.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
