//! Small 2D helpers shared by the collider system.
//!
//! Everything here works on plain [`Vec2`] values and never produces NaN:
//! degenerate inputs return `None` or leave the vector unchanged.

use glam::Vec2;

/// Parameters where segment `p0 -> p1` meets segment `q0 -> q1`.
///
/// Returns `(t1, t2)` with the crossing at `p0 + t1 * (p1 - p0)` and
/// `q0 + t2 * (q1 - q0)`. Segments whose determinant is within `epsilon` of
/// zero (parallel or zero length) never intersect.
pub fn segment_params(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2, epsilon: f32) -> Option<(f32, f32)> {
    let r = p1 - p0;
    let s = q1 - q0;
    let h = r.perp_dot(s);
    if h.abs() < epsilon || !h.is_finite() {
        return None;
    }
    let d = q0 - p0;
    Some((d.perp_dot(s) / h, d.perp_dot(r) / h))
}

/// Half-open test used by the narrow phase: both parameters in `[0, 1)`.
pub fn segments_cross(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2, epsilon: f32) -> Option<f32> {
    let (t1, t2) = segment_params(p0, p1, q0, q1, epsilon)?;
    ((0.0..1.0).contains(&t1) && (0.0..1.0).contains(&t2)).then_some(t1)
}

/// Unit normal of an edge, rotated a quarter turn counter-clockwise.
pub fn edge_normal(edge: Vec2) -> Option<Vec2> {
    edge.perp().try_normalize()
}

/// Reflect the component of `v` along the unit `normal`, scaled by `bounce`.
pub fn reflect(v: Vec2, normal: Vec2, bounce: f32) -> Vec2 {
    v - 2.0 * bounce * v.dot(normal) * normal
}

/// Move `value` toward zero by `amount` without crossing it.
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_crossing_segments() {
        let (t1, t2) = segment_params(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
            EPS,
        )
        .unwrap();
        assert!(approx_eq(t1, 0.5));
        assert!(approx_eq(t2, 0.5));
    }

    #[test]
    fn test_parallel_segments_never_cross() {
        assert!(
            segment_params(
                Vec2::ZERO,
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                EPS
            )
            .is_none()
        );
    }

    #[test]
    fn test_degenerate_segment_never_crosses() {
        assert!(segments_cross(Vec2::ONE, Vec2::ONE, Vec2::ZERO, Vec2::new(2.0, 2.0), EPS).is_none());
    }

    #[test]
    fn test_cross_is_half_open() {
        // Ray ends exactly on the edge: t1 == 1 is not a hit.
        assert!(
            segments_cross(
                Vec2::ZERO,
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(2.0, 1.0),
                EPS
            )
            .is_none()
        );
        let t1 = segments_cross(
            Vec2::ZERO,
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.5),
            Vec2::new(2.0, 0.5),
            EPS,
        )
        .unwrap();
        assert!(approx_eq(t1, 0.5));
    }

    #[test]
    fn test_edge_normal() {
        let n = edge_normal(Vec2::new(4.0, 0.0)).unwrap();
        assert!(approx_eq(n.x, 0.0) && approx_eq(n.y, 1.0));
        assert!(edge_normal(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_reflect_full_bounce() {
        let v = reflect(Vec2::new(3.0, -5.0), Vec2::Y, 1.0);
        assert_eq!(v, Vec2::new(3.0, 5.0));
        let v = reflect(Vec2::new(3.0, -5.0), Vec2::Y, 0.5);
        assert!(approx_eq(v.y, 0.0));
    }

    #[test]
    fn test_approach_zero_stops() {
        assert_eq!(approach_zero(1.0, 0.25), 0.75);
        assert_eq!(approach_zero(-0.1, 0.25), 0.0);
        assert_eq!(approach_zero(0.0, 0.25), 0.0);
    }
}
