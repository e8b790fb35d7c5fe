//! Fokus folgt dem Zeiger.

use super::{Gesture, GestureContext};
use crate::app::events::PointerEvent;
use crate::core::ShapeId;
use glam::Vec2;

/// Bei jeder Bewegung wird die Shape unter dem Zeiger neu bestimmt.
/// Wechselt sie, verliert die alte den Fokus; die neue bekommt ihn nur,
/// wenn alle Gesten zustimmen. Zeiger im Leeren löscht den Fokus.
#[derive(Debug, Default)]
pub struct FocusGesture {
    focused: Option<ShapeId>,
}

impl FocusGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<ShapeId> {
        self.focused
    }

    fn refocus(&mut self, ctx: &mut GestureContext<'_>, point: Vec2) {
        let hit = ctx.hit_test(point);
        if hit == self.focused {
            return;
        }
        if let Some(old) = self.focused.take() {
            ctx.delegate.remove_focus_candidate(old);
        }
        if let Some(shape) = hit {
            if ctx.can_focus(shape) {
                ctx.delegate.add_focus_candidate(shape);
                self.focused = Some(shape);
            }
        }
        ctx.delegate.request_repaint();
    }
}

impl Gesture for FocusGesture {
    fn name(&self) -> &str {
        "focus"
    }

    fn on_move(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        self.refocus(ctx, event.position);
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        self.refocus(ctx, event.position);
    }

    fn reset(&mut self) {
        self.focused = None;
    }
}
