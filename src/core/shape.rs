//! Shape-Knoten des Diagramms und die Geometrie-Tabelle pro Shape-Art.
//!
//! Eine Shape kennt nur ihre eigenen Daten. Die Baumstruktur (Eltern,
//! Kinder, Einhängen) verwaltet `ShapeTree`.

use super::anchor::{
    AnchorKey, AnchorRegistry, DIRECTION_BOTTOM, DIRECTION_FREE, DIRECTION_LEFT, DIRECTION_RIGHT,
    DIRECTION_TOP,
};
use super::geometry::Rect;
use super::link::{centered_text_frame, LinkShape};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Eindeutige ID einer Shape innerhalb eines `ShapeTree`.
pub type ShapeId = u64;

/// RGBA-Farbe (0.0–1.0 pro Kanal).
pub type Color = [f32; 4];

pub const COLOR_BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const COLOR_WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const COLOR_GRAY: Color = [0.5, 0.5, 0.5, 1.0];
pub const COLOR_BLUE: Color = [0.0, 0.0, 1.0, 1.0];

/// Standard-Radius eines Kreises.
pub const DEFAULT_CIRCLE_RADIUS: f32 = 30.0;
/// Standard-Größe eines Rechtecks.
pub const DEFAULT_RECT_SIZE: (f32, f32) = (40.0, 40.0);
/// Standard-Größe eines Ovals.
pub const DEFAULT_OVAL_SIZE: (f32, f32) = (50.0, 30.0);

/// Art einer Shape samt art-spezifischer Geometrie.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// Rahmenloser Container (z.B. die Wurzel)
    Group,
    Circle { radius: f32 },
    Oval { width: f32, height: f32 },
    Rectangle { width: f32, height: f32 },
    /// Freistehender Text, Rahmen aus geschätzter Textmetrik
    Label,
    /// Gekrümmte Verbindung zwischen zwei Shapes
    Link(Box<LinkShape>),
}

impl ShapeKind {
    pub fn circle(radius: f32) -> Self {
        ShapeKind::Circle { radius }
    }

    pub fn oval(width: f32, height: f32) -> Self {
        ShapeKind::Oval { width, height }
    }

    pub fn rectangle(width: f32, height: f32) -> Self {
        ShapeKind::Rectangle { width, height }
    }

    /// Kurzname für Logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Group => "group",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Oval { .. } => "oval",
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Label => "label",
            ShapeKind::Link(_) => "link",
        }
    }
}

/// Darstellungs-Attribute einer Shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub text: Option<String>,
    pub text_color: Color,
    pub border_color: Color,
    pub background: Color,
    pub border_size: f32,
    pub text_visible: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            text: None,
            text_color: COLOR_BLACK,
            border_color: COLOR_BLACK,
            background: COLOR_WHITE,
            border_size: 1.0,
            text_visible: true,
        }
    }
}

/// Ein Knoten des Shape-Baums.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub(crate) kind: ShapeKind,
    pub(crate) position: Vec2,
    pub(crate) parent: Option<ShapeId>,
    pub(crate) children: Vec<ShapeId>,
    /// Gesetzt, solange die Shape von der Wurzel aus erreichbar ist
    pub(crate) attached: bool,
    pub(crate) anchors: AnchorRegistry,
    /// Letzter Punkt des inkrementellen Drag-Protokolls
    pub(crate) last_drag_point: Option<Vec2>,
    pub selected: bool,
    pub focused: bool,
    pub draggable: bool,
    pub accepts_incoming_links: bool,
    pub accepts_outgoing_links: bool,
    pub style: ShapeStyle,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, kind: ShapeKind, position: Vec2) -> Self {
        let mut shape = Self {
            id,
            kind,
            position,
            parent: None,
            children: Vec::new(),
            attached: false,
            anchors: AnchorRegistry::new(),
            last_drag_point: None,
            selected: false,
            focused: false,
            draggable: false,
            accepts_incoming_links: false,
            accepts_outgoing_links: false,
            style: ShapeStyle::default(),
        };
        shape.update_anchors();
        shape
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Link(link) => Some(link.pattern.as_str()),
            _ => self.style.text.as_deref(),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, ShapeKind::Link(_))
    }

    pub fn as_link(&self) -> Option<&LinkShape> {
        match &self.kind {
            ShapeKind::Link(link) => Some(link.as_ref()),
            _ => None,
        }
    }

    pub fn as_link_mut(&mut self) -> Option<&mut LinkShape> {
        match &mut self.kind {
            ShapeKind::Link(link) => Some(link.as_mut()),
            _ => None,
        }
    }

    /// Eigener Rahmen ohne Kinder.
///
/// `None` für Gruppen, Labels ohne Text und Links ohne aufgelöste Anker.
    pub fn frame(&self) -> Option<Rect> {
        let p = self.position;
        match &self.kind {
            ShapeKind::Group => None,
            ShapeKind::Circle { radius } => {
                Some(Rect::centered(p, radius * 2.0, radius * 2.0))
            }
            ShapeKind::Oval { width, height } | ShapeKind::Rectangle { width, height } => {
                Some(Rect::centered(p, *width, *height))
            }
            ShapeKind::Label => self.style.text.as_deref().map(|t| centered_text_frame(t, p)),
            // ohne beide Anker keine Ausdehnung
            ShapeKind::Link(link) => {
                let curve = &link.curve;
                (curve.start_anchor().is_some() && curve.end_anchor().is_some())
                    .then(|| link.frame())
            }
        }
    }

    /// Art-spezifischer Punkttest.
    ///
    /// Kreis, Oval und Rechteck prüfen achsenweise mit striktem `<` gegen
    /// Radius bzw. halbe Ausdehnung, Links testen gegen ihre Kurve.
    pub fn is_inside(&self, point: Vec2) -> bool {
        let d = (point - self.position).abs();
        match &self.kind {
            ShapeKind::Group => false,
            ShapeKind::Circle { radius } => d.x < *radius && d.y < *radius,
            ShapeKind::Oval { width, height } | ShapeKind::Rectangle { width, height } => {
                d.x < width * 0.5 && d.y < height * 0.5
            }
            ShapeKind::Label => self.frame().is_some_and(|f| f.contains(point)),
            ShapeKind::Link(link) => link.contains(point),
        }
    }

    /// Abstand vom Mittelpunkt, um den Link-Tangenten am Anker zurückgezogen werden.
    pub fn default_anchor_offset(&self, key: AnchorKey) -> f32 {
        if key != AnchorKey::Center {
            return 0.0;
        }
        match &self.kind {
            ShapeKind::Circle { radius } => *radius,
            ShapeKind::Rectangle { width, .. } => width * 0.5,
            ShapeKind::Oval { height, .. } => height * 0.5,
            _ => 0.0,
        }
    }

    /// Baut die fünf Standard-Anker aus Position und Größe neu auf.
    pub fn update_anchors(&mut self) {
        let (half_w, half_h) = match &self.kind {
            ShapeKind::Circle { radius } => (*radius, *radius),
            ShapeKind::Oval { width, height } | ShapeKind::Rectangle { width, height } => {
                (width * 0.5, height * 0.5)
            }
            _ => return,
        };
        let p = self.position;
        self.anchors.set_anchor(AnchorKey::Center, p, DIRECTION_FREE);
        self.anchors
            .set_anchor(AnchorKey::Top, p + Vec2::new(0.0, -half_h), DIRECTION_TOP);
        self.anchors
            .set_anchor(AnchorKey::Bottom, p + Vec2::new(0.0, half_h), DIRECTION_BOTTOM);
        self.anchors
            .set_anchor(AnchorKey::Left, p + Vec2::new(-half_w, 0.0), DIRECTION_LEFT);
        self.anchors
            .set_anchor(AnchorKey::Right, p + Vec2::new(half_w, 0.0), DIRECTION_RIGHT);
    }
}
