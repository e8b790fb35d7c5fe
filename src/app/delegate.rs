//! Verträge zwischen Gesten und der Host-Zeichenfläche.

use crate::core::{AnchorKey, LinkKind, Rect, ShapeId, ShapeTree};
use crate::shared::CanvasOptions;
use glam::Vec2;

/// Alles, was Gesten von der Zeichenfläche brauchen.
///
/// Gesten halten den Delegate nie fest; sie bekommen ihn pro Aufruf
/// über den `GestureContext` geliehen.
pub trait CanvasDelegate {
    fn tree(&self) -> &ShapeTree;
    fn tree_mut(&mut self) -> &mut ShapeTree;
    fn options(&self) -> &CanvasOptions;

    /// Oberste Shape unter `point`.
    fn hit_test(&self, point: Vec2) -> Option<ShapeId> {
        let tree = self.tree();
        tree.hit_test(tree.root(), point)
    }

    fn root(&self) -> ShapeId {
        self.tree().root()
    }

    // ── Anwendungs-Callbacks ────────────────────────────────────────
    fn create_shape(&mut self, point: Vec2, double_click: bool);
    fn remove_shape(&mut self, shape: ShapeId);
    fn edit_shape(&mut self, shape: ShapeId);
    fn create_link(
        &mut self,
        source: ShapeId,
        source_key: AnchorKey,
        target: ShapeId,
        target_key: AnchorKey,
        kind: LinkKind,
        pointer: Vec2,
    );
    fn allows_link_creation(&self) -> bool;

    // ── Auswahl & Fokus ─────────────────────────────────────────────
    fn is_selected(&self, shape: ShapeId) -> bool;
    fn add_to_selection(&mut self, shape: ShapeId);
    fn remove_from_selection(&mut self, shape: ShapeId);
    fn add_focus_candidate(&mut self, shape: ShapeId);
    fn remove_focus_candidate(&mut self, shape: ShapeId);
    fn move_selection(&mut self, delta: Vec2);
    fn select_within_rect(&mut self, rect: Rect);
    fn select_all(&mut self, select: bool);

    fn request_repaint(&mut self);
}

/// Anwendungsspezifische Reaktionen der Standard-Zeichenfläche.
///
/// Alle Methoden haben neutrale Defaults.
pub trait CanvasHooks {
    fn create_shape(&mut self, _tree: &mut ShapeTree, _point: Vec2, _double_click: bool) {}

    fn remove_shape(&mut self, _tree: &mut ShapeTree, _shape: ShapeId) {}

    fn edit_shape(&mut self, _tree: &mut ShapeTree, _shape: ShapeId) {}

    fn allows_link_creation(&self) -> bool {
        false
    }
}

/// Hooks ohne Verhalten.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl CanvasHooks for NoHooks {}
