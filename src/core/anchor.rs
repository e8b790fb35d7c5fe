//! Benannte Anker einer Shape: Position plus Austrittsrichtung.

use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Freie Richtung (kein bevorzugter Austritt, z.B. Mittelpunkt)
pub const DIRECTION_FREE: Vec2 = Vec2::new(0.0, 0.0);
/// Nach oben
pub const DIRECTION_TOP: Vec2 = Vec2::new(0.0, -1.0);
/// Nach unten
pub const DIRECTION_BOTTOM: Vec2 = Vec2::new(0.0, 1.0);
/// Nach links
pub const DIRECTION_LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Nach rechts
pub const DIRECTION_RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Schlüssel der fünf Standard-Anker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorKey {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl AnchorKey {
    /// Alle Schlüssel in Registrierungsreihenfolge.
    pub const ALL: [AnchorKey; 5] = [
        AnchorKey::Center,
        AnchorKey::Top,
        AnchorKey::Bottom,
        AnchorKey::Left,
        AnchorKey::Right,
    ];

    /// Austrittsrichtung, die zu diesem Schlüssel gehört.
    pub fn direction(self) -> Vec2 {
        match self {
            AnchorKey::Center => DIRECTION_FREE,
            AnchorKey::Top => DIRECTION_TOP,
            AnchorKey::Bottom => DIRECTION_BOTTOM,
            AnchorKey::Left => DIRECTION_LEFT,
            AnchorKey::Right => DIRECTION_RIGHT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorKey::Center => "CENTER",
            AnchorKey::Top => "TOP",
            AnchorKey::Bottom => "BOTTOM",
            AnchorKey::Left => "LEFT",
            AnchorKey::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ein Anker: Position und Richtung. Gleichheit ist strukturell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub position: Vec2,
    pub direction: Vec2,
}

impl Anchor {
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Hat der Anker keine bevorzugte Richtung?
    pub fn is_free(&self) -> bool {
        self.direction == DIRECTION_FREE
    }
}

/// Anker-Tabelle einer Shape.
///
/// Die Einfügereihenfolge bleibt erhalten (`IndexMap`), damit die
/// Nächster-Anker-Suche bei Gleichstand deterministisch den zuerst
/// registrierten Anker liefert.
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    anchors: IndexMap<AnchorKey, Anchor>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt oder aktualisiert einen Anker. Bestehende Schlüssel behalten ihren Platz.
    pub fn set_anchor(&mut self, key: AnchorKey, position: Vec2, direction: Vec2) {
        self.anchors.insert(key, Anchor::new(position, direction));
    }

    pub fn get(&self, key: AnchorKey) -> Option<&Anchor> {
        self.anchors.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    /// Iterator über (Schlüssel, Anker) in Registrierungsreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (AnchorKey, &Anchor)> {
        self.anchors.iter().map(|(k, a)| (*k, a))
    }

    /// Nächster Anker (euklidisch) samt Schlüssel; `None` bei leerer Tabelle.
    ///
    /// Striktes `<`: bei gleicher Distanz gewinnt der zuerst registrierte Anker.
    pub fn nearest(&self, point: Vec2) -> Option<(AnchorKey, &Anchor)> {
        let mut best: Option<(AnchorKey, &Anchor, f32)> = None;
        for (key, anchor) in &self.anchors {
            let d = anchor.position.distance(point);
            match best {
                Some((_, _, best_d)) if d >= best_d => {}
                _ => best = Some((*key, anchor, d)),
            }
        }
        best.map(|(key, anchor, _)| (key, anchor))
    }

    /// Nächster Anker zu `point`.
    pub fn nearest_anchor(&self, point: Vec2) -> Option<&Anchor> {
        self.nearest(point).map(|(_, anchor)| anchor)
    }

    /// Schlüssel des nächsten Ankers zu `point`.
    pub fn nearest_anchor_key(&self, point: Vec2) -> Option<AnchorKey> {
        self.nearest(point).map(|(key, _)| key)
    }
}
