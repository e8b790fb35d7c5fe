//! Trait-basiertes Gesten-System der Zeichenfläche.
//!
//! Jede Geste implementiert den `Gesture`-Trait und wird beim
//! `GestureManager` registriert. Der Manager reicht jedes Event in
//! Registrierungsreihenfolge an alle Gesten weiter; keine Geste kann ein
//! Event verschlucken. Ausschluss entsteht nur über `ExclusiveLocks`.

/// Link erstellen per Shift-Klick mit Live-Vorschau.
pub mod create_link;
/// Neue Shape per Klick ins Leere.
pub mod create_shape;
/// Shape oder ganze Auswahl ziehen.
pub mod drag_shape;
/// Gesamten Baum verschieben (Shift + Ziehen im Leeren).
pub mod drag_root;
/// Bogen eines Links umformen.
pub mod edit_link;
/// Doppelklick auf eine Shape.
pub mod edit_shape;
/// Fokus folgt dem Zeiger.
pub mod focus;
/// Gesture-Trait und Kontext.
mod gesture;
/// Auswahlrechteck.
pub mod marquee;

pub use create_link::CreateLinkGesture;
pub use create_shape::CreateShapeGesture;
pub use drag_root::DragRootGesture;
pub use drag_shape::DragShapeGesture;
pub use edit_link::EditLinkGesture;
pub use edit_shape::EditShapeGesture;
pub use focus::FocusGesture;
pub use gesture::{Gesture, GestureContext};
pub use marquee::MarqueeGesture;

use super::delegate::CanvasDelegate;
use super::events::InputEvent;
use crate::core::{ShapeId, ShapeTree};
use crate::shared::{CanvasOptions, DrawCommand};
use std::collections::HashSet;

// ── Locks ────────────────────────────────────────────────────────────

/// Benannte Exklusiv-Locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusiveLock {
    /// Zeiger-Ziehen (Shape, Wurzel, Marquee, Link umformen)
    Drag,
    /// Ein Link wird gerade erstellt
    CreateLink,
}

/// Menge der aktuell gehaltenen Locks.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveLocks {
    held: HashSet<ExclusiveLock>,
}

impl ExclusiveLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nimmt den Lock; `false`, wenn er bereits gehalten wird.
    pub fn acquire(&mut self, lock: ExclusiveLock) -> bool {
        let acquired = self.held.insert(lock);
        if acquired {
            log::debug!("Lock {:?} genommen", lock);
        }
        acquired
    }

    pub fn release(&mut self, lock: ExclusiveLock) -> bool {
        let released = self.held.remove(&lock);
        if released {
            log::debug!("Lock {:?} freigegeben", lock);
        }
        released
    }

    pub fn is_held(&self, lock: ExclusiveLock) -> bool {
        self.held.contains(&lock)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

// ── GestureManager ───────────────────────────────────────────────────

/// Verwaltet die registrierten Gesten und die gemeinsamen Locks.
pub struct GestureManager {
    gestures: Vec<Box<dyn Gesture>>,
    locks: ExclusiveLocks,
}

impl Default for GestureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureManager {
    /// Erstellt einen Manager mit den Standard-Gesten in kanonischer Reihenfolge.
    pub fn new() -> Self {
        let mut manager = Self::empty();
        manager.register(Box::new(DragShapeGesture::new()));
        manager.register(Box::new(DragRootGesture::new()));
        manager.register(Box::new(MarqueeGesture::new()));
        manager.register(Box::new(EditShapeGesture::new()));
        manager.register(Box::new(CreateLinkGesture::new()));
        manager.register(Box::new(CreateShapeGesture::new()));
        manager.register(Box::new(FocusGesture::new()));
        manager.register(Box::new(EditLinkGesture::new()));
        manager
    }

    /// Manager ohne Gesten.
    pub fn empty() -> Self {
        Self {
            gestures: Vec::new(),
            locks: ExclusiveLocks::new(),
        }
    }

    /// Hängt eine Geste hinten an.
    pub fn register(&mut self, gesture: Box<dyn Gesture>) {
        self.gestures.push(gesture);
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Namen in Registrierungsreihenfolge.
    pub fn names(&self) -> Vec<&str> {
        self.gestures.iter().map(|g| g.name()).collect()
    }

    pub fn locks(&self) -> &ExclusiveLocks {
        &self.locks
    }

    /// Name aller Gesten mit laufender Interaktion.
    pub fn active_gestures(&self) -> Vec<&str> {
        self.gestures
            .iter()
            .filter(|g| g.is_active())
            .map(|g| g.name())
            .collect()
    }

    /// Reicht ein Event an alle Gesten weiter.
    ///
    /// Rad und Enter/Exit betreffen nur die Zeichenfläche und werden hier ignoriert.
    pub fn dispatch(&mut self, delegate: &mut dyn CanvasDelegate, event: &InputEvent) {
        for i in 0..self.gestures.len() {
            let (before, rest) = self.gestures.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = GestureContext::new(&mut *delegate, &mut self.locks, before, after);
            match event {
                InputEvent::PointerPressed(e) => current.on_press(&mut ctx, e),
                InputEvent::PointerReleased(e) => current.on_release(&mut ctx, e),
                InputEvent::PointerDragged(e) => current.on_drag(&mut ctx, e),
                InputEvent::PointerMoved(e) => current.on_move(&mut ctx, e),
                InputEvent::KeyPressed(e) => current.on_key_pressed(&mut ctx, e),
                InputEvent::KeyTyped(ch) => current.on_key_typed(&mut ctx, *ch),
                InputEvent::Wheel { .. } | InputEvent::PointerEntered | InputEvent::PointerExited => {
                    return;
                }
            }
        }
    }

    /// `true` nur, wenn keine Geste Einspruch erhebt.
    pub fn can_focus(&self, tree: &ShapeTree, shape: ShapeId) -> bool {
        self.gestures.iter().all(|g| g.allows_focus(tree, shape))
    }

    /// Overlays aller Gesten in Registrierungsreihenfolge.
    pub fn paint_overlay(&self, tree: &ShapeTree, options: &CanvasOptions, out: &mut Vec<DrawCommand>) {
        for gesture in &self.gestures {
            gesture.paint_overlay(tree, options, out);
        }
    }

    /// Verwirft alle laufenden Interaktionen und gibt alle Locks frei.
    pub fn reset(&mut self) {
        for gesture in &mut self.gestures {
            gesture.reset();
        }
        self.locks.clear();
    }
}
