//! Auswahlrechteck: Primärtaste im Leeren, Ziehen wählt alle geschnittenen Shapes.

use super::{ExclusiveLock, Gesture, GestureContext};
use crate::app::events::PointerEvent;
use crate::core::{Rect, ShapeTree};
use crate::shared::{CanvasOptions, DrawCommand, Stroke};
use glam::Vec2;

#[derive(Debug, Default)]
pub struct MarqueeGesture {
    origin: Option<Vec2>,
    current: Vec2,
}

impl MarqueeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelles Auswahlrechteck, solange die Geste läuft.
    pub fn rect(&self) -> Option<Rect> {
        self.origin.map(|o| Rect::from_corners(o, self.current))
    }
}

impl Gesture for MarqueeGesture {
    fn name(&self) -> &str {
        "marquee"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        if ctx.is_held(ExclusiveLock::Drag) || event.click_count != 1 {
            return;
        }
        if !event.buttons.primary || ctx.hit_test(event.position).is_some() {
            return;
        }
        if !ctx.acquire(ExclusiveLock::Drag) {
            return;
        }
        ctx.delegate.select_all(false);
        self.origin = Some(event.position);
        self.current = event.position;
        ctx.delegate.request_repaint();
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        let Some(origin) = self.origin else {
            return;
        };
        self.current = event.position;
        ctx.delegate
            .select_within_rect(Rect::from_corners(origin, event.position));
        ctx.delegate.request_repaint();
    }

    fn on_release(&mut self, ctx: &mut GestureContext<'_>, _event: &PointerEvent) {
        ctx.release(ExclusiveLock::Drag);
        if self.origin.take().is_some() {
            ctx.delegate.request_repaint();
        }
    }

    fn paint_overlay(&self, _tree: &ShapeTree, options: &CanvasOptions, out: &mut Vec<DrawCommand>) {
        if let Some(rect) = self.rect() {
            out.push(DrawCommand::Rect {
                rect,
                fill: Some(options.marquee_fill_color),
                stroke: Some(Stroke::new(options.marquee_outline_color, 1.0)),
            });
        }
    }

    fn reset(&mut self) {
        self.origin = None;
    }

    fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}
