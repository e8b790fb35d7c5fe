//! Vektor-Hilfsfunktionen auf `glam::Vec2` und ein achsen-aligniertes Rechteck.
//!
//! Alle Winkel sind in Grad, das Koordinatensystem ist das des Bildschirms
//! (+X nach rechts, +Y nach unten).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotiert einen Vektor um `degrees` Grad.
///
/// ±90° werden exakt per Koordinatentausch gerechnet, damit senkrechte
/// Offsets keine Rundungsfehler tragen.
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    if degrees == 90.0 {
        Vec2::new(-v.y, v.x)
    } else if degrees == -90.0 {
        Vec2::new(v.y, -v.x)
    } else {
        Vec2::from_angle(degrees.to_radians()).rotate(v)
    }
}

/// Setzt die Länge eines Vektors bei gleicher Richtung.
///
/// Der Nullvektor bleibt Nullvektor. Eine negative Länge kehrt die Richtung um.
pub fn with_length(v: Vec2, length: f32) -> Vec2 {
    let old = v.length();
    if old == 0.0 {
        Vec2::ZERO
    } else {
        v / old * length
    }
}

/// 2D-Kreuzprodukt (z-Komponente): `a.x * b.y - a.y * b.x`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Vorzeichen des Kreuzprodukts: -1, 0 oder 1.
pub fn cross_sign(a: Vec2, b: Vec2) -> f32 {
    let c = cross(a, b);
    if c == 0.0 {
        0.0
    } else {
        c.signum()
    }
}

/// Achsen-alignierter Rahmen mit Ursprung oben links.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Erstellt ein Rechteck aus Ursprung und Größe; negative Größen werden normalisiert.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rechteck, das von zwei beliebigen Eckpunkten aufgespannt wird.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Rechteck mit gegebener Größe, zentriert auf `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Ein Rechteck ohne Fläche (Breite oder Höhe ≤ 0).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Kleinstes Rechteck, das beide umschließt.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Echte Überlappung. Leere Rechtecke schneiden nie.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Halboffener Punkttest: linke/obere Kante inklusive, rechte/untere exklusive.
    pub fn contains(&self, p: Vec2) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.y >= self.y
            && p.x < self.x + self.width
            && p.y < self.y + self.height
    }

    /// Vergrößert das Rechteck um `amount` in alle Richtungen.
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Verkleinert das Rechteck um `amount` in alle Richtungen.
    pub fn inset(&self, amount: f32) -> Rect {
        self.inflate(-amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_quarter_turns_are_exact() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(rotate_deg(v, 90.0), Vec2::new(-4.0, 3.0));
        assert_eq!(rotate_deg(v, -90.0), Vec2::new(4.0, -3.0));
    }

    #[test]
    fn test_rotate_arbitrary_angle() {
        let v = rotate_deg(Vec2::new(1.0, 0.0), 45.0);
        assert_relative_eq!(v.x, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_relative_eq!(v.y, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_with_length_keeps_zero_and_flips_on_negative() {
        assert_eq!(with_length(Vec2::ZERO, 10.0), Vec2::ZERO);
        let v = with_length(Vec2::new(0.0, 2.0), -5.0);
        assert_relative_eq!(v.y, -5.0);
        assert_relative_eq!(v.x, 0.0);
    }

    #[test]
    fn test_cross_sign() {
        assert_eq!(cross_sign(Vec2::X, Vec2::Y), 1.0);
        assert_eq!(cross_sign(Vec2::Y, Vec2::X), -1.0);
        assert_eq!(cross_sign(Vec2::X, Vec2::X * 3.0), 0.0);
    }

    #[test]
    fn test_rect_normalizes_negative_size() {
        let r = Rect::new(10.0, 10.0, -4.0, -6.0);
        assert_eq!(r, Rect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn test_rect_union_and_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 15.0));
        assert!(a.intersects(&b));
        // Nur berührende Kanten zählen nicht als Überlappung
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_empty_rect_never_intersects_or_contains() {
        let empty = Rect::new(0.0, 0.0, 0.0, 10.0);
        let big = Rect::new(-100.0, -100.0, 200.0, 200.0);
        assert!(!empty.intersects(&big));
        assert!(!empty.contains(Vec2::ZERO));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }
}
