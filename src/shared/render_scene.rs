//! Render-Szene als expliziter Übergabevertrag zwischen App und Host-Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und der Host sie konsumiert.
//! Die Befehle liegen in Zeichenreihenfolge (hinten nach vorne) vor.

use crate::core::{Color, Rect};
use glam::Vec2;

/// Linienstil eines Zeichenbefehls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Ein einzelnes Zeichen-Primitiv in Weltkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Ellipse {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    /// Auf `center` zentrierter Text
    Text {
        text: String,
        center: Vec2,
        color: Color,
    },
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScene {
    /// Zoom-Faktor, mit dem der Host die Weltkoordinaten skaliert
    pub zoom: f32,
    /// Shapes, Links und Hervorhebungen
    pub commands: Vec<DrawCommand>,
    /// Gesten-Overlays (Marquee, Link-Vorschau), über allem gezeichnet
    pub overlay: Vec<DrawCommand>,
}

impl RenderScene {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.overlay.is_empty()
    }

    /// Alle Befehle in Zeichenreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().chain(self.overlay.iter())
    }
}
