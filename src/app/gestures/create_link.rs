//! Link erstellen: erster Klick wählt die Quelle, der Zeiger zieht eine
//! Vorschau-Kurve hinter sich her, der nächste Klick schließt ab.

use super::{ExclusiveLock, Gesture, GestureContext};
use crate::app::events::{Key, KeyEvent, PointerEvent};
use crate::app::render_scene::curve_commands;
use crate::core::anchor::DIRECTION_BOTTOM;
use crate::core::{AnchorKey, ArcCurve, LinkKind, ShapeId, ShapeTree};
use crate::shared::{CanvasOptions, DrawCommand};
use glam::Vec2;

/// Angefangener Link.
#[derive(Debug, Clone)]
struct PendingLink {
    source: ShapeId,
    source_key: AnchorKey,
    preview: ArcCurve,
}

#[derive(Debug, Default)]
pub struct CreateLinkGesture {
    pending: Option<PendingLink>,
}

impl CreateLinkGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quelle und Vorschau-Kurve, solange ein Link angefangen ist.
    pub fn preview(&self) -> Option<(ShapeId, &ArcCurve)> {
        self.pending.as_ref().map(|p| (p.source, &p.preview))
    }

    fn cancel(&mut self, ctx: &mut GestureContext<'_>) {
        self.pending = None;
        ctx.release(ExclusiveLock::CreateLink);
        ctx.delegate.request_repaint();
    }

    fn finish(&mut self, ctx: &mut GestureContext<'_>, pending: PendingLink, point: Vec2) {
        let target = ctx.hit_test(point).and_then(|hit| {
            let shape = ctx.tree().get(hit)?;
            if !shape.accepts_incoming_links {
                return None;
            }
            let key = shape.anchors().nearest_anchor_key(point)?;
            Some((hit, key))
        });
        match target {
            Some((target, target_key)) => {
                log::debug!("Link {} → {target} abgeschlossen", pending.source);
                ctx.delegate.create_link(
                    pending.source,
                    pending.source_key,
                    target,
                    target_key,
                    LinkKind::Arc,
                    point,
                );
            }
            None => log::debug!("Link von {} verworfen", pending.source),
        }
        self.cancel(ctx);
    }

    fn start(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        let Some(hit) = ctx.hit_test(event.position) else {
            return;
        };
        let allowed = event.is_shift_primary() || ctx.delegate.allows_link_creation();
        let Some((key, anchor, tangent_offset)) = ctx
            .tree()
            .get(hit)
            .filter(|s| s.accepts_outgoing_links && allowed)
            .and_then(|s| {
                let (key, anchor) = s.anchors().nearest(event.position)?;
                Some((key, *anchor, s.default_anchor_offset(key)))
            })
        else {
            return;
        };
        if !ctx.acquire(ExclusiveLock::CreateLink) {
            return;
        }

        let mut preview = ArcCurve::new();
        preview.set_start_anchor(anchor);
        preview.start_tangent_offset = tangent_offset;
        preview.set_flatness(ctx.options().default_link_flatness);
        let mut pending = PendingLink {
            source: hit,
            source_key: key,
            preview,
        };
        update_preview(ctx.tree(), &mut pending, event.position);
        self.pending = Some(pending);
        log::debug!("Link-Erstellung gestartet an {hit}:{key}");
        ctx.delegate.request_repaint();
    }

    fn follow(&mut self, ctx: &mut GestureContext<'_>, point: Vec2) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        update_preview(ctx.tree(), pending, point);
        ctx.delegate.request_repaint();
    }
}

/// Richtet das Vorschau-Ende am Zeiger oder am nächsten Anker der Shape darunter aus.
fn update_preview(tree: &ShapeTree, pending: &mut PendingLink, point: Vec2) {
    let source_offset = tree
        .get(pending.source)
        .map_or(0.0, |s| s.default_anchor_offset(pending.source_key));
    let target = tree
        .hit_test(tree.root(), point)
        .and_then(|hit| tree.get(hit))
        .filter(|s| !s.is_link())
        .and_then(|s| {
            let (key, anchor) = s.anchors().nearest(point)?;
            Some((s, key, *anchor))
        });

    let preview = &mut pending.preview;
    let has_loop = match target {
        None => {
            preview.set_end_point(point, DIRECTION_BOTTOM);
            preview.set_mouse(point);
            preview.end_tangent_offset = 0.0;
            false
        }
        Some((shape, key, anchor)) => {
            preview.set_end_point(anchor.position, anchor.direction);
            if shape.id() == pending.source {
                if anchor.is_free() {
                    preview.set_mouse(point);
                } else {
                    preview.set_mouse(anchor.position + anchor.direction);
                }
                preview.end_tangent_offset = source_offset;
                true
            } else {
                preview.set_mouse(point);
                preview.end_tangent_offset = shape.default_anchor_offset(key);
                false
            }
        }
    };
    preview.set_has_loop(has_loop);
    if let Err(e) = preview.update() {
        log::warn!("Link-Vorschau nicht ableitbar: {e}");
    }
}

impl Gesture for CreateLinkGesture {
    fn name(&self) -> &str {
        "create-link"
    }

    fn on_press(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        match self.pending.take() {
            Some(pending) => self.finish(ctx, pending, event.position),
            None => self.start(ctx, event),
        }
    }

    fn on_move(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        self.follow(ctx, event.position);
    }

    fn on_drag(&mut self, ctx: &mut GestureContext<'_>, event: &PointerEvent) {
        self.follow(ctx, event.position);
    }

    fn on_key_pressed(&mut self, ctx: &mut GestureContext<'_>, event: &KeyEvent) {
        if event.key == Key::Escape && self.pending.is_some() {
            log::debug!("Link-Erstellung abgebrochen");
            self.cancel(ctx);
        }
    }

    fn paint_overlay(&self, _tree: &ShapeTree, _options: &CanvasOptions, out: &mut Vec<DrawCommand>) {
        if let Some(pending) = &self.pending {
            curve_commands(&pending.preview, out);
        }
    }

    /// Solange ein Link angefangen ist, dürfen nur mögliche Ziele den Fokus bekommen.
    fn allows_focus(&self, tree: &ShapeTree, shape: ShapeId) -> bool {
        self.pending.is_none() || tree.get(shape).is_some_and(|s| s.accepts_incoming_links)
    }

    fn reset(&mut self) {
        self.pending = None;
    }

    fn is_active(&self) -> bool {
        self.pending.is_some()
    }
}
