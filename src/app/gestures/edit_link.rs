//! Umformen eines Bogen-Links durch Ziehen an seinem Bauch.

use super::{ExclusiveLock, Gesture, GestureContext};
use crate::app::events::PointerEvent;
use crate::core::{ShapeId, ShapeTree};

#[derive(Debug, Default)]
pub struct EditLinkGesture {
    link: Option<ShapeId>,
}

impl EditLinkGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<ShapeId> {
        self.link
    }
}

impl Gesture for EditLinkGesture {
    fn name(&self) -> &str {
        "edit-link"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if ctx.is_held(ExclusiveLock::Drag)
            || event.click_count != 1
            || event.is_secondary_only()
            || event.is_middle_only()
        {
            return;
        }
        let Some(hit) = ctx.hit_test(event.position) else {
            return;
        };
        let editable = ctx.tree().link(hit).is_some_and(|l| l.curve.editable);
        if editable && ctx.acquire(ExclusiveLock::Drag) {
            self.link = Some(hit);
            log::debug!("Link {hit} wird umgeformt");
        }
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        let Some(link) = self.link else {
            return;
        };
        if let Err(e) = ctx.tree_mut().reshape_link(link, event.position) {
            log::warn!("Link {link} nicht umformbar: {e}");
        }
        ctx.delegate.request_repaint();
    }

    fn on_release(&mut self, ctx: &mut GestureContext<'_>, _event: &PointerEvent) {
        ctx.release(ExclusiveLock::Drag);
        self.link = None;
    }

    /// Während des Umformens bekommt keine Shape den Fokus.
    fn allows_focus(&self, _tree: &ShapeTree, _shape: ShapeId) -> bool {
        self.link.is_none()
    }

    fn reset(&mut self) {
        self.link = None;
    }

    fn is_active(&self) -> bool {
        self.link.is_some()
    }
}
