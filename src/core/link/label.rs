//! Beschriftung eines Links und geschätzte Textmetrik.

use crate::core::geometry::Rect;
use crate::core::shape::{Color, COLOR_BLACK};
use glam::Vec2;

/// Geschätzte Breite eines Zeichens.
pub const LABEL_CHAR_WIDTH: f32 = 7.0;
/// Geschätzte Zeilenhöhe.
pub const LABEL_LINE_HEIGHT: f32 = 14.0;

/// Rahmen eines einzeiligen, auf `center` zentrierten Texts.
pub fn centered_text_frame(text: &str, center: Vec2) -> Rect {
    let width = text.chars().count() as f32 * LABEL_CHAR_WIDTH;
    Rect::centered(center, width, LABEL_LINE_HEIGHT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkLabel {
    pub text: Option<String>,
    /// Mittelpunkt, von `ArcCurve::update` gesetzt
    pub position: Option<Vec2>,
    pub color: Color,
    pub visible: bool,
}

impl Default for LinkLabel {
    fn default() -> Self {
        Self {
            text: None,
            position: None,
            color: COLOR_BLACK,
            visible: true,
        }
    }
}

impl LinkLabel {
    pub fn frame(&self) -> Option<Rect> {
        Some(centered_text_frame(self.text.as_deref()?, self.position?))
    }
}
