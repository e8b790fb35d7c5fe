//! Zieht eine einzelne Shape oder die gesamte Auswahl.

use super::{ExclusiveLock, Gesture, GestureContext};
use crate::app::events::PointerEvent;
use crate::core::ShapeId;
use glam::Vec2;

/// Klick auf eine ausgewählte Shape zieht die ganze Auswahl inkrementell,
/// Klick auf eine ziehbare Shape zieht nur diese, mit festem Greif-Offset.
#[derive(Debug, Default)]
pub struct DragShapeGesture {
    /// Einzeln gezogene Shape; `None` beim Ziehen der Auswahl
    target: Option<ShapeId>,
    /// Zeiger minus Shape-Position beim Greifen
    offset: Vec2,
    last_point: Option<Vec2>,
    active: bool,
}

impl DragShapeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    fn blocked(ctx: &GestureContext<'_>, event: &PointerEvent) -> bool {
        ctx.is_held(ExclusiveLock::Drag)
            || ctx.is_held(ExclusiveLock::CreateLink)
            || event.click_count != 1
            || event.modifiers.shift
            || event.is_secondary_only()
            || event.is_middle_only()
    }
}

impl Gesture for DragShapeGesture {
    fn name(&self) -> &str {
        "drag-shape"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if Self::blocked(ctx, event) {
            return;
        }
        let Some(hit) = ctx.hit_test(event.position) else {
            return;
        };

        if ctx.delegate.is_selected(hit) {
            if !ctx.acquire(ExclusiveLock::Drag) {
                return;
            }
            self.target = None;
            self.last_point = Some(event.position);
            self.active = true;
            log::debug!("Auswahl-Drag gestartet bei {:?}", event.position);
            return;
        }

        let Some(position) = ctx
            .tree()
            .get(hit)
            .filter(|s| s.draggable)
            .map(|s| s.position())
        else {
            return;
        };
        if !ctx.acquire(ExclusiveLock::Drag) {
            return;
        }
        self.target = Some(hit);
        self.offset = event.position - position;
        self.last_point = Some(event.position);
        self.active = true;
        log::debug!("Shape-Drag gestartet: {hit}");
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if !self.active {
            return;
        }
        match self.target {
            Some(id) => {
                let target = event.position - self.offset;
                ctx.tree_mut().move_to_position(id, target);
            }
            None => {
                let last = self.last_point.unwrap_or(event.position);
                ctx.delegate.move_selection(event.position - last);
            }
        }
        self.last_point = Some(event.position);
        ctx.delegate.request_repaint();
    }

    fn on_release(&mut self, ctx: &mut GestureContext<'_>, _event: &PointerEvent) {
        ctx.release(ExclusiveLock::Drag);
        if self.active {
            log::debug!("Drag beendet");
            self.reset();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
