//! Gesture-Trait und der pro Aufruf geliehene Kontext.

use super::{ExclusiveLock, ExclusiveLocks};
use crate::app::delegate::CanvasDelegate;
use crate::app::events::{KeyEvent, PointerEvent};
use crate::core::{ShapeId, ShapeTree};
use crate::shared::{CanvasOptions, DrawCommand};
use glam::Vec2;

/// Schnittstelle für alle Gesten (Ziehen, Marquee, Link erstellen, …).
///
/// Gesten sind zustandsbehaftet und sehen jedes Event. Gegenseitiger
/// Ausschluss läuft ausschließlich über die `ExclusiveLocks` im Kontext.
pub trait Gesture {
    /// Name für Logs und Tests
    fn name(&self) -> &str;

    fn on_press(&mut self, _ctx: &mut GestureContext<'_>, _event: &PointerEvent) {}

    fn on_release(&mut self, _ctx: &mut GestureContext<'_>, _event: &PointerEvent) {}

    fn on_drag(&mut self, _ctx: &mut GestureContext<'_>, _event: &PointerEvent) {}

    fn on_move(&mut self, _ctx: &mut GestureContext<'_>, _event: &PointerEvent) {}

    fn on_key_pressed(&mut self, _ctx: &mut GestureContext<'_>, _event: &KeyEvent) {}

    fn on_key_typed(&mut self, _ctx: &mut GestureContext<'_>, _ch: char) {}

    /// Overlay-Geometrie über allen Shapes (Marquee, Link-Vorschau).
    fn paint_overlay(&self, _tree: &ShapeTree, _options: &CanvasOptions, _out: &mut Vec<DrawCommand>) {}

    /// Stimme dieser Geste, ob `shape` den Fokus bekommen darf.
    fn allows_focus(&self, _tree: &ShapeTree, _shape: ShapeId) -> bool {
        true
    }

    /// Zustand verwerfen, ohne Locks anzufassen.
    fn reset(&mut self) {}

    /// Läuft gerade eine Interaktion dieser Geste?
    fn is_active(&self) -> bool {
        false
    }
}

/// Geliehener Zugriff einer Geste auf Zeichenfläche, Locks und die übrigen Gesten.
pub struct GestureContext<'a> {
    pub delegate: &'a mut dyn CanvasDelegate,
    locks: &'a mut ExclusiveLocks,
    before: &'a [Box<dyn Gesture>],
    after: &'a [Box<dyn Gesture>],
}

impl<'a> GestureContext<'a> {
    pub(crate) fn new(
        delegate: &'a mut dyn CanvasDelegate,
        locks: &'a mut ExclusiveLocks,
        before: &'a [Box<dyn Gesture>],
        after: &'a [Box<dyn Gesture>],
    ) -> Self {
        Self {
            delegate,
            locks,
            before,
            after,
        }
    }

    pub fn tree(&self) -> &ShapeTree {
        self.delegate.tree()
    }

    pub fn tree_mut(&mut self) -> &mut ShapeTree {
        self.delegate.tree_mut()
    }

    pub fn options(&self) -> &CanvasOptions {
        self.delegate.options()
    }

    pub fn hit_test(&self, point: Vec2) -> Option<ShapeId> {
        self.delegate.hit_test(point)
    }

    /// `false`, wenn der Lock schon gehalten wird.
    pub fn acquire(&mut self, lock: ExclusiveLock) -> bool {
        self.locks.acquire(lock)
    }

    pub fn release(&mut self, lock: ExclusiveLock) -> bool {
        self.locks.release(lock)
    }

    pub fn is_held(&self, lock: ExclusiveLock) -> bool {
        self.locks.is_held(lock)
    }

    /// Stimmen aller anderen Gesten; die aufrufende Geste prüft ihre eigene selbst.
    pub fn can_focus(&self, shape: ShapeId) -> bool {
        let tree = self.delegate.tree();
        self.before
            .iter()
            .chain(self.after.iter())
            .all(|g| g.allows_focus(tree, shape))
    }
}
