//! Links: gekrümmte Verbindungen zwischen zwei Shapes.
//!
//! `LinkShape` hält die Endpunkt-IDs und Anker-Schlüssel; die eigentliche
//! Geometrie liegt in `ArcCurve`. Die Endpunkt-Anker setzt
//! `ShapeTree::update_link`, bevor die Kurve neu abgeleitet wird.

pub mod arrow;
pub mod curve;
pub mod flatten;
pub mod label;

#[cfg(test)]
mod tests;

pub use arrow::Arrow;
pub use curve::{ArcCurve, CurveGeometry};
pub use label::{centered_text_frame, LinkLabel};

use super::anchor::{Anchor, AnchorKey, DIRECTION_BOTTOM};
use super::geometry::Rect;
use super::shape::{Shape, ShapeId};
use anyhow::Result;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Art der Verbindungslinie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkKind {
    /// Quadratischer Bogen bzw. kubische Schleife
    #[default]
    Arc,
}

/// Verbindung zwischen `source` und `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkShape {
    pub source: ShapeId,
    pub target: ShapeId,
    pub source_anchor_key: AnchorKey,
    pub target_anchor_key: AnchorKey,
    pub kind: LinkKind,
    pub pattern: String,
    pub curve: ArcCurve,
}

impl LinkShape {
    /// Erstellt einen Link zwischen zwei Shapes.
    ///
    /// Schleifen starten mit Richtung BOTTOM, sonst `source - target`.
    /// Die Tangenten-Offsets kommen aus den Standard-Offsets der Endpunkte.
    pub fn new(
        source: &Shape,
        source_anchor_key: AnchorKey,
        target: &Shape,
        target_anchor_key: AnchorKey,
        kind: LinkKind,
        pattern: impl Into<String>,
        flatness: f32,
    ) -> Self {
        let has_loop = source.id() == target.id();
        let direction = if has_loop {
            DIRECTION_BOTTOM
        } else {
            source.position() - target.position()
        };
        let pattern = pattern.into();

        let mut curve = ArcCurve::new();
        curve.set_has_loop(has_loop);
        curve.set_direction(direction);
        curve.set_flatness(flatness);
        curve.start_tangent_offset = source.default_anchor_offset(source_anchor_key);
        curve.end_tangent_offset = target.default_anchor_offset(target_anchor_key);
        curve.label.text = Some(pattern.clone());
        if let Some(anchor) = source.anchors().get(source_anchor_key) {
            curve.set_start_anchor(*anchor);
        }
        if let Some(anchor) = target.anchors().get(target_anchor_key) {
            curve.set_end_anchor(*anchor);
        }

        Self {
            source: source.id(),
            target: target.id(),
            source_anchor_key,
            target_anchor_key,
            kind,
            pattern,
            curve,
        }
    }

    /// Wie `new`, aber die Richtung zeigt vom Ziel zum Zeiger.
    #[allow(clippy::too_many_arguments)]
    pub fn with_pointer(
        source: &Shape,
        source_anchor_key: AnchorKey,
        target: &Shape,
        target_anchor_key: AnchorKey,
        kind: LinkKind,
        pattern: impl Into<String>,
        pointer: Vec2,
        flatness: f32,
    ) -> Self {
        let mut link = Self::new(
            source,
            source_anchor_key,
            target,
            target_anchor_key,
            kind,
            pattern,
            flatness,
        );
        // Zeiger genau auf dem Ziel: Startrichtung behalten
        let direction = pointer - target.position();
        if direction != Vec2::ZERO {
            link.curve.set_direction(direction);
        }
        link
    }

    /// Mittelpunkt-zu-Mittelpunkt-Link ohne Text und ohne Krümmung.
    pub fn default_link(source: &Shape, target: &Shape) -> Self {
        Self::new(
            source,
            AnchorKey::Center,
            target,
            AnchorKey::Center,
            LinkKind::Arc,
            "",
            0.0,
        )
    }

    pub fn has_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
        self.curve.label.text = Some(self.pattern.clone());
    }

    pub fn set_source_offset(&mut self, offset: Option<Vec2>) {
        self.curve.set_start_offset(offset);
    }

    pub fn set_target_offset(&mut self, offset: Option<Vec2>) {
        self.curve.set_end_offset(offset);
    }

    /// Übernimmt frische Endpunkt-Anker und leitet die Kurve neu ab.
    pub(crate) fn apply_endpoints(&mut self, start: Anchor, end: Anchor) -> Result<()> {
        self.curve.set_start_anchor(start);
        self.curve.set_end_anchor(end);
        self.curve.set_has_loop(self.has_loop());
        self.curve.update()
    }

    /// Interaktives Umformen: Richtung relativ zum Ziel, dann Bauch zum Zeiger.
    pub fn set_mouse_position(&mut self, pointer: Vec2, target_position: Vec2) {
        self.curve.set_direction(pointer - target_position);
        self.curve.set_mouse_position(pointer);
    }

    pub fn frame(&self) -> Rect {
        self.curve.frame()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.curve.contains(point)
    }
}
