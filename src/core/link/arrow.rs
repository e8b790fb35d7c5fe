//! Pfeilspitze an einem Kurvenende.

use crate::core::geometry::{rotate_deg, with_length};
use glam::Vec2;

/// Standardlänge der Pfeilflügel.
pub const ARROW_LENGTH: f32 = 10.0;
/// Standard-Öffnungswinkel in Grad.
pub const ARROW_ANGLE: f32 = 45.0;

/// Pfeilspitze: Ankerpunkt plus Blickrichtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub anchor: Option<Vec2>,
    pub direction: Option<Vec2>,
    pub length: f32,
    pub angle: f32,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            anchor: None,
            direction: None,
            length: ARROW_LENGTH,
            angle: ARROW_ANGLE,
        }
    }
}

impl Arrow {
    pub fn set(&mut self, anchor: Vec2, direction: Vec2) {
        self.anchor = Some(anchor);
        self.direction = Some(direction);
    }

    /// Die zwei Flügel als (Anker, Flügelspitze); `None` solange ungesetzt.
    pub fn wings(&self) -> Option<[(Vec2, Vec2); 2]> {
        let anchor = self.anchor?;
        let direction = with_length(self.direction?, self.length);
        let first = rotate_deg(direction, self.angle * 0.5);
        let second = rotate_deg(first, -self.angle);
        Some([(anchor, anchor + first), (anchor, anchor + second)])
    }
}
