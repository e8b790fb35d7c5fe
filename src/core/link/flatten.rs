//! Polylinien-Approximation von Bézier-Kurven und der Segment-Box-Hit-Test.

use glam::Vec2;

/// Maximale Abweichung der Kontrollpunkte von der Sehne beim Abflachen.
pub const FLATTENING_TOLERANCE: f32 = 0.8;
/// Aufweitung schmaler Segment-Boxen beim Hit-Test.
pub const HIT_INSET: f32 = 4.0;
/// Maximale Rekursionstiefe der Unterteilung.
const MAX_SUBDIVISION_DEPTH: u32 = 10;

/// B(t) = (1-t)²·P0 + 2(1-t)t·P1 + t²·P2
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    inv * inv * p0 + 2.0 * inv * t * p1 + t * t * p2
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Quadrierter Abstand von `p` zur Strecke `a`–`b`.
fn point_segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Zerlegt eine quadratische Kurve in eine Polylinie (inkl. Start- und Endpunkt).
pub fn flatten_quadratic(p0: Vec2, p1: Vec2, p2: Vec2, tolerance: f32) -> Vec<Vec2> {
    let mut points = vec![p0];
    subdivide_quadratic(p0, p1, p2, tolerance * tolerance, 0, &mut points);
    points
}

fn subdivide_quadratic(p0: Vec2, p1: Vec2, p2: Vec2, tol_sq: f32, depth: u32, out: &mut Vec<Vec2>) {
    if depth >= MAX_SUBDIVISION_DEPTH || point_segment_distance_sq(p1, p0, p2) < tol_sq {
        out.push(p2);
        return;
    }
    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let mid = (p01 + p12) * 0.5;
    subdivide_quadratic(p0, p01, mid, tol_sq, depth + 1, out);
    subdivide_quadratic(mid, p12, p2, tol_sq, depth + 1, out);
}

/// Zerlegt eine kubische Kurve in eine Polylinie (inkl. Start- und Endpunkt).
pub fn flatten_cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, tolerance: f32) -> Vec<Vec2> {
    let mut points = vec![p0];
    subdivide_cubic(p0, p1, p2, p3, tolerance * tolerance, 0, &mut points);
    points
}

fn subdivide_cubic(
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Vec2,
    tol_sq: f32,
    depth: u32,
    out: &mut Vec<Vec2>,
) {
    let flatness_sq =
        point_segment_distance_sq(p1, p0, p3).max(point_segment_distance_sq(p2, p0, p3));
    if depth >= MAX_SUBDIVISION_DEPTH || flatness_sq < tol_sq {
        out.push(p3);
        return;
    }
    // De Casteljau bei t = 0.5
    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let p23 = (p2 + p3) * 0.5;
    let p012 = (p01 + p12) * 0.5;
    let p123 = (p12 + p23) * 0.5;
    let mid = (p012 + p123) * 0.5;
    subdivide_cubic(p0, p01, p012, mid, tol_sq, depth + 1, out);
    subdivide_cubic(mid, p123, p23, p3, tol_sq, depth + 1, out);
}

/// Prüft `point` gegen die Bounding-Boxen aller Polylinien-Segmente.
///
/// Ist eine Box schmaler oder niedriger als `inset`, wird sie in beide
/// Richtungen um `inset` aufgeweitet. Die Kanten zählen als Treffer.
pub fn polyline_hit(points: &[Vec2], point: Vec2, inset: f32) -> bool {
    points.windows(2).any(|seg| {
        let mut min = seg[0].min(seg[1]);
        let mut max = seg[0].max(seg[1]);
        if max.x - min.x < inset || max.y - min.y < inset {
            min -= Vec2::splat(inset);
            max += Vec2::splat(inset);
        }
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    })
}
