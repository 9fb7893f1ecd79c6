use std::f64::consts::PI;

use nalgebra::geometry::Point2;
use nalgebra::Vector2;

use crate::profile::ToothProfile;
use crate::transform::{rotate, translate};

/// Copy a tooth around the gear. The profile is first turned by its alignment angle, then each
/// of the `teeth` copies is turned by a further multiple of the pitch angle.
pub fn circular_pattern(profile: &ToothProfile) -> Vec<Vec<Point2<f64>>> {
    circular_pattern_turned(profile, 0.0)
}

/// As `circular_pattern`, with the whole gear turned a further `turn` radians
pub fn circular_pattern_turned(profile: &ToothProfile, turn: f64) -> Vec<Vec<Point2<f64>>> {
    let aligned = rotate(&profile.points, profile.align_angle + turn);
    (0..profile.teeth)
        .map(|i| rotate(&aligned, profile.pitch_angle * i as f64))
        .collect()
}

/// The whole gear as one closed outline. Each tooth starts where the last one finished, so the
/// first point of every tooth after the first is dropped.
pub fn full_outline(profile: &ToothProfile) -> Vec<Point2<f64>> {
    full_outline_turned(profile, 0.0)
}

pub fn full_outline_turned(profile: &ToothProfile, turn: f64) -> Vec<Point2<f64>> {
    let mut outline = Vec::with_capacity(profile.points.len() * profile.teeth as usize);
    for (i, tooth) in circular_pattern_turned(profile, turn).into_iter().enumerate() {
        let skip = if i == 0 { 0 } else { 1 };
        outline.extend(tooth.into_iter().skip(skip));
    }
    outline
}

/// Move an outline to its place in the drawing
pub fn place(outline: &[Point2<f64>], x: f64, y: f64) -> Vec<Point2<f64>> {
    translate(outline, Vector2::new(x, y))
}

/// Turn that brings the second gear of a pair into mesh with the first. Half a turn faces it
/// back along the center line, and half a pitch puts a tooth space where the first gear's
/// tooth points.
pub fn mesh_rotation(teeth: u32) -> f64 {
    PI + PI / teeth as f64
}

/// Both full outlines of a meshing pair. The first gear is centered on `(x, y)`, the second
/// one `center_distance` further along +x and turned into mesh.
pub fn mesh_outlines(
    gear1: &ToothProfile,
    gear2: &ToothProfile,
    center_distance: f64,
    x: f64,
    y: f64,
) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
    let outline1 = place(&full_outline(gear1), x, y);
    let outline2 = place(
        &full_outline_turned(gear2, mesh_rotation(gear2.teeth)),
        x + center_distance,
        y,
    );
    (outline1, outline2)
}
