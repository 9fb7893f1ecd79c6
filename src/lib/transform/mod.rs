use nalgebra::geometry::{Point2, Rotation2};
use nalgebra::Vector2;

/// Reflect a curve across the x axis, the tooth's symmetry axis. Point order is reversed so
/// the mirrored curve runs in the same direction around the outline.
pub fn mirror(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    points.iter().rev().map(|p| Point2::new(p.x, -p.y)).collect()
}

/// Rotate about the origin by `angle` radians, counter-clockwise
pub fn rotate(points: &[Point2<f64>], angle: f64) -> Vec<Point2<f64>> {
    let rotation = Rotation2::new(angle);
    points.iter().map(|p| rotation * p).collect()
}

pub fn translate(points: &[Point2<f64>], offset: Vector2<f64>) -> Vec<Point2<f64>> {
    points.iter().map(|p| p + offset).collect()
}
