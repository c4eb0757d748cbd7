//! Angle and distance primitives in the image plane
//!
//! Only x/y participate. Depth is carried by landmarks but reference
//! angles are 2D projections, so angles stay 2D too.

use nalgebra::{Point2, Vector2};

/// Polar angle of a ray in radians
fn heading(v: Vector2<f32>) -> f32 {
    v.y.atan2(v.x)
}

/// Angle at vertex `b` between rays b→a and b→c, in degrees [0, 180]
///
/// Difference of the two rays' `atan2` headings, folded so anything
/// above 180° becomes `360° - angle`. Collinear or coincident points
/// give 0° or 180°, never an error. NaN input gives NaN.
pub fn angle_between(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> f32 {
    let radians = heading(c - b) - heading(a - b);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Euclidean distance in normalized coordinates
pub fn distance(p: &Point2<f32>, q: &Point2<f32>) -> f32 {
    (q - p).norm()
}

pub fn midpoint(p: &Point2<f32>, q: &Point2<f32>) -> Point2<f32> {
    nalgebra::center(p, q)
}
