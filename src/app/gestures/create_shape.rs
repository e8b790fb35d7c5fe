//! Klick ins Leere mit genau der Primärtaste erzeugt eine Shape.

use super::{Gesture, GestureContext};
use crate::app::events::PointerEvent;

#[derive(Debug, Default)]
pub struct CreateShapeGesture;

impl CreateShapeGesture {
    pub fn new() -> Self {
        Self
    }
}

impl Gesture for CreateShapeGesture {
    fn name(&self) -> &str {
        "create-shape"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if !event.is_primary_only() || ctx.hit_test(event.position).is_some() {
            return;
        }
        ctx.delegate
            .create_shape(event.position, event.click_count != 1);
        ctx.delegate.request_repaint();
    }
}
