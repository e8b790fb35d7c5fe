//! Bogen-Geometrie eines Links: quadratisch zwischen zwei Shapes,
//! kubisch als Schleife zurück auf dieselbe Shape.

use super::arrow::Arrow;
use super::flatten::{flatten_cubic, flatten_quadratic, polyline_hit, FLATTENING_TOLERANCE, HIT_INSET};
use super::label::LinkLabel;
use crate::core::anchor::{Anchor, DIRECTION_BOTTOM};
use crate::core::geometry::{cross_sign, rotate_deg, with_length, Rect};
use crate::core::shape::{Color, COLOR_BLACK};
use anyhow::{anyhow, Result};
use glam::Vec2;

// ── Schleifen-Konstanten ────────────────────────────────────────────

/// Streckung der Richtung für die Schleifen-Kontrollpunkte
pub const LOOP_STRETCH: f32 = 1.7;
/// Mindestlänge des gestreckten Richtungsvektors
pub const LOOP_MIN_LENGTH: f32 = 100.0;
/// Halber Öffnungswinkel der Schleife in Grad
pub const LOOP_HALF_ANGLE: f32 = 40.0;
/// Verlängerung des Label-Vektors einer Schleife
pub const LOOP_LABEL_EXTRA: f32 = 15.0;
/// Mindestabstand des Labels einer Schleife vom Start
pub const LOOP_LABEL_MIN: f32 = 75.0;

// ── Bogen-Konstanten ────────────────────────────────────────────────

/// Ersatz-Höhe für `flatness == 0`
pub const ZERO_FLATNESS_HEIGHT: f32 = 0.01;
/// Grundabstand des Labels von der Sehne
pub const LABEL_CLEARANCE: f32 = 20.0;
/// Skalierung des Senkrechtabstands beim interaktiven Umformen
pub const RESHAPE_SCALE: f32 = 2.0;

/// Aktive Kontrollpunkte nach `ArcCurve::update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveGeometry {
    Quadratic {
        start: Vec2,
        control: Vec2,
        end: Vec2,
    },
    Cubic {
        start: Vec2,
        control1: Vec2,
        control2: Vec2,
        end: Vec2,
    },
}

impl CurveGeometry {
    /// Polylinien-Approximation mit fester Toleranz.
    pub fn flatten(&self) -> Vec<Vec2> {
        match *self {
            CurveGeometry::Quadratic {
                start,
                control,
                end,
            } => flatten_quadratic(start, control, end, FLATTENING_TOLERANCE),
            CurveGeometry::Cubic {
                start,
                control1,
                control2,
                end,
            } => flatten_cubic(start, control1, control2, end, FLATTENING_TOLERANCE),
        }
    }
}

/// Kurve eines Bogen-Links.
///
/// Eingaben sind die beiden Anker, Offsets, Richtung und `flatness`.
/// `update()` leitet daraus Kontrollpunkte, Pfeile und Label-Position ab.
/// Die Ableitung ist idempotent: gleiche Eingaben, gleiche Ausgaben.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCurve {
    start: Option<Anchor>,
    end: Option<Anchor>,
    start_offset: Option<Vec2>,
    end_offset: Option<Vec2>,
    pub start_tangent_offset: f32,
    pub end_tangent_offset: f32,
    direction: Vec2,
    flatness: f32,
    has_loop: bool,
    pub start_arrow: Arrow,
    pub end_arrow: Arrow,
    pub start_arrow_visible: bool,
    pub end_arrow_visible: bool,
    pub label: LinkLabel,
    pub editable: bool,
    pub color: Color,
    geometry: Option<CurveGeometry>,
}

impl Default for ArcCurve {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            start_offset: None,
            end_offset: None,
            start_tangent_offset: 0.0,
            end_tangent_offset: 0.0,
            direction: DIRECTION_BOTTOM,
            flatness: 0.0,
            has_loop: false,
            start_arrow: Arrow::default(),
            end_arrow: Arrow::default(),
            // Links sind gerichtet: nur das Ziel bekommt einen Pfeil.
            // Beide Flags auf `false` ergibt ungerichtete Kanten.
            start_arrow_visible: false,
            end_arrow_visible: true,
            label: LinkLabel::default(),
            editable: true,
            color: COLOR_BLACK,
            geometry: None,
        }
    }
}

impl ArcCurve {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Eingaben ────────────────────────────────────────────────────

    pub fn set_start_anchor(&mut self, anchor: Anchor) {
        self.start = Some(anchor);
    }

    pub fn set_end_anchor(&mut self, anchor: Anchor) {
        self.end = Some(anchor);
    }

    /// Setzt das Ende auf einen freien Punkt (Vorschau beim Link-Erstellen).
    pub fn set_end_point(&mut self, position: Vec2, direction: Vec2) {
        self.end = Some(Anchor::new(position, direction));
    }

    pub fn start_anchor(&self) -> Option<&Anchor> {
        self.start.as_ref()
    }

    pub fn end_anchor(&self) -> Option<&Anchor> {
        self.end.as_ref()
    }

    pub fn set_start_offset(&mut self, offset: Option<Vec2>) {
        self.start_offset = offset;
    }

    pub fn set_end_offset(&mut self, offset: Option<Vec2>) {
        self.end_offset = offset;
    }

    /// Startposition inklusive freiem Offset.
    pub fn start_with_offset(&self) -> Option<Vec2> {
        let anchor = self.start?;
        Some(anchor.position + self.start_offset.unwrap_or(Vec2::ZERO))
    }

    /// Endposition inklusive freiem Offset.
    pub fn end_with_offset(&self) -> Option<Vec2> {
        let anchor = self.end?;
        Some(anchor.position + self.end_offset.unwrap_or(Vec2::ZERO))
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Richtung relativ zum Ende: `mouse - end`.
    pub fn set_mouse(&mut self, mouse: Vec2) {
        if let Some(end) = self.end {
            self.direction = mouse - end.position;
        }
    }

    pub fn flatness(&self) -> f32 {
        self.flatness
    }

    pub fn set_flatness(&mut self, flatness: f32) {
        self.flatness = flatness;
    }

    pub fn has_loop(&self) -> bool {
        self.has_loop
    }

    pub fn set_has_loop(&mut self, has_loop: bool) {
        self.has_loop = has_loop;
    }

    /// Formt den Bogen so um, dass sein Bauch dem Zeiger folgt.
    ///
    /// Der Zeiger wird auf die Sehne projiziert; `flatness` wird der
    /// doppelte Senkrechtabstand mit dem Gegen-Vorzeichen des Kreuzprodukts.
    /// Die Kontrollpunkte bleiben bis zum nächsten `update()` stehen.
    pub fn set_mouse_position(&mut self, position: Vec2) {
        let (Some(start), Some(end)) = (self.start_with_offset(), self.end_with_offset()) else {
            return;
        };
        let chord = end - start;
        let along = (position - start).dot(chord.normalize_or_zero());
        let projected = with_length(chord, along);
        let foot = start + projected;
        let normal = position - foot;
        self.flatness = -RESHAPE_SCALE * normal.length() * cross_sign(projected, normal);
    }

    // ── Ableitung ───────────────────────────────────────────────────

    /// Leitet Kontrollpunkte, Pfeile und Label-Position neu ab.
    ///
    /// Schlägt fehl, solange einer der beiden Anker fehlt.
    pub fn update(&mut self) -> Result<()> {
        let start = self
            .start_with_offset()
            .ok_or_else(|| anyhow!("Kurve ohne Startanker"))?;
        let end = self
            .end_with_offset()
            .ok_or_else(|| anyhow!("Kurve ohne Endanker"))?;
        if self.has_loop {
            self.update_loop(start, end);
        } else {
            self.update_arc(start, end);
        }
        Ok(())
    }

    fn update_loop(&mut self, start: Vec2, end: Vec2) {
        let mut chord = self.direction * LOOP_STRETCH;
        if chord.length() < LOOP_MIN_LENGTH {
            chord = with_length(chord, LOOP_MIN_LENGTH);
        }
        chord = rotate_deg(chord, -LOOP_HALF_ANGLE);
        let control1 = start + chord;
        chord = rotate_deg(chord, 2.0 * LOOP_HALF_ANGLE);
        let control2 = start + chord;

        let p0 = start + (control1 - start).normalize_or_zero() * self.start_tangent_offset;
        let p3 = end + (control2 - start).normalize_or_zero() * self.end_tangent_offset;

        let mut label_vec = with_length(self.direction, self.direction.length() + LOOP_LABEL_EXTRA);
        if label_vec.length() < LOOP_LABEL_MIN {
            label_vec = with_length(label_vec, LOOP_LABEL_MIN);
        }
        self.label.position = Some(start + label_vec);

        self.start_arrow.set(p0, control1 - p0);
        self.end_arrow.set(p3, control2 - p3);

        self.geometry = Some(CurveGeometry::Cubic {
            start: p0,
            control1,
            control2,
            end: p3,
        });
    }

    fn update_arc(&mut self, start: Vec2, end: Vec2) {
        let half = (end - start) * 0.5;
        let normal = rotate_deg(half.normalize_or_zero(), -90.0);
        let height = if self.flatness == 0.0 {
            ZERO_FLATNESS_HEIGHT
        } else {
            self.flatness
        };
        let control = start + half + with_length(normal, height);

        let p0 = start + (control - start).normalize_or_zero() * self.start_tangent_offset;
        let p2 = end + (control - end).normalize_or_zero() * self.end_tangent_offset;

        let middle = p0 + (p2 - p0) * 0.5;
        let side = if self.flatness < 0.0 { 90.0 } else { -90.0 };
        let label_vec = with_length(
            rotate_deg(p2 - p0, side),
            self.flatness.abs() * 0.5 + LABEL_CLEARANCE,
        );
        self.label.position = Some(middle + label_vec);

        self.start_arrow.set(p0, control - start);
        self.end_arrow.set(p2, control - end);

        self.geometry = Some(CurveGeometry::Quadratic {
            start: p0,
            control,
            end: p2,
        });
    }

    // ── Abfragen ────────────────────────────────────────────────────

    pub fn geometry(&self) -> Option<&CurveGeometry> {
        self.geometry.as_ref()
    }

    /// Rahmen aus den rohen Anker-Positionen (ohne Offsets und Bauch).
    pub fn frame(&self) -> Rect {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Rect::from_corners(s.position, e.position),
            _ => Rect::default(),
        }
    }

    /// Trifft `point` die abgeflachte Kurve (Segment-Boxen, Inset 4)?
    pub fn contains(&self, point: Vec2) -> bool {
        self.geometry
            .is_some_and(|g| polyline_hit(&g.flatten(), point, HIT_INSET))
    }
}
