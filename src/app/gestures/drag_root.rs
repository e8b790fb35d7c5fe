//! Verschiebt den gesamten Baum (Shift + Primärtaste im Leeren).

use super::{ExclusiveLock, Gesture, GestureContext};
use crate::app::events::PointerEvent;

#[derive(Debug, Default)]
pub struct DragRootGesture {
    active: bool,
}

impl DragRootGesture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Gesture for DragRootGesture {
    fn name(&self) -> &str {
        "drag-root"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if ctx.is_held(ExclusiveLock::Drag) || event.click_count != 1 {
            return;
        }
        if !event.is_shift_primary() || ctx.hit_test(event.position).is_some() {
            return;
        }
        if !ctx.acquire(ExclusiveLock::Drag) {
            return;
        }
        let root = ctx.delegate.root();
        ctx.tree_mut().start_drag(root);
        ctx.tree_mut().drag_to(root, event.position);
        self.active = true;
        log::debug!("Wurzel-Drag gestartet bei {:?}", event.position);
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if !self.active {
            return;
        }
        let root = ctx.delegate.root();
        ctx.tree_mut().drag_to(root, event.position);
        ctx.delegate.request_repaint();
    }

    fn on_release(&mut self, ctx: &mut GestureContext<'_>, _event: &PointerEvent) {
        ctx.release(ExclusiveLock::Drag);
        self.active = false;
        ctx.delegate.request_repaint();
    }

    fn reset(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
