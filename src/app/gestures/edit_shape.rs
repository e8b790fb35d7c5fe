//! Doppelklick auf eine Shape fordert das Bearbeiten beim Host an.

use super::{Gesture, GestureContext};
use crate::app::events::PointerEvent;

#[derive(Debug, Default)]
pub struct EditShapeGesture;

impl EditShapeGesture {
    pub fn new() -> Self {
        Self
    }
}

impl Gesture for EditShapeGesture {
    fn name(&self) -> &str {
        "edit-shape"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if event.click_count != 2 {
            return;
        }
        if let Some(hit) = ctx.hit_test(event.position) {
            log::debug!("Shape {hit} bearbeiten");
            ctx.delegate.edit_shape(hit);
        }
    }
}
