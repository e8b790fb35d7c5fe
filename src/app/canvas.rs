//! Standard-Zeichenfläche: besitzt den Shape-Baum, Auswahl, Fokus,
//! Zoom und die Hervorhebungs-Timer.

use super::delegate::{CanvasDelegate, CanvasHooks, NoHooks};
use super::events::TimerKind;
use super::highlight::{AlphaVariator, HighlightTimer};
use crate::core::{AnchorKey, LinkKind, LinkShape, Rect, ShapeId, ShapeTree};
use crate::shared::CanvasOptions;
use glam::Vec2;
use std::time::Instant;

pub struct Canvas {
    tree: ShapeTree,
    options: CanvasOptions,
    hooks: Box<dyn CanvasHooks>,
    selected_timer: HighlightTimer,
    focused_timer: HighlightTimer,
    selected_alpha: AlphaVariator,
    focused_alpha: AlphaVariator,
    zoom: f32,
    repaint_requested: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasOptions::default())
    }
}

impl Canvas {
    pub fn new(options: CanvasOptions) -> Self {
        Self::with_hooks(options, Box::new(NoHooks))
    }

    pub fn with_hooks(options: CanvasOptions, hooks: Box<dyn CanvasHooks>) -> Self {
        let interval = options.highlight_interval();
        Self {
            tree: ShapeTree::new(),
            options,
            hooks,
            selected_timer: HighlightTimer::new(interval),
            focused_timer: HighlightTimer::new(interval),
            selected_alpha: AlphaVariator::default(),
            focused_alpha: AlphaVariator::default(),
            zoom: 1.0,
            repaint_requested: false,
        }
    }

    pub fn set_options(&mut self, options: CanvasOptions) {
        let interval = options.highlight_interval();
        self.selected_timer.set_interval(interval);
        self.focused_timer.set_interval(interval);
        self.zoom = options.clamp_zoom(self.zoom);
        self.options = options;
    }

    // ── Zoom ────────────────────────────────────────────────────────

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Positive Rotation zoomt hinein, negative heraus, jeweils um einen Schritt.
    pub fn zoom_by_wheel(&mut self, rotation: i32) {
        let step = self.options.zoom_step;
        if rotation > 0 {
            if self.zoom < self.options.zoom_max {
                self.zoom = (self.zoom + step).min(self.options.zoom_max);
            }
        } else if rotation < 0 && self.zoom > self.options.zoom_min {
            self.zoom = (self.zoom - step).max(self.options.zoom_min);
        }
        self.request_repaint();
    }

    /// Fensterkoordinaten → Zeichenflächen-Koordinaten.
    pub fn to_canvas_space(&self, point: Vec2) -> Vec2 {
        if self.zoom == 1.0 {
            point
        } else {
            point / self.zoom
        }
    }

    // ── Auswahl & Fokus ─────────────────────────────────────────────

    /// Ausgewählte Shapes in Auswahlreihenfolge.
    pub fn selected_shapes(&self) -> Vec<ShapeId> {
        self.selected_timer.shapes().collect()
    }

    pub fn focused_shapes(&self) -> Vec<ShapeId> {
        self.focused_timer.shapes().collect()
    }

    pub fn selected_alpha(&self) -> f32 {
        self.selected_alpha.value()
    }

    pub fn focused_alpha(&self) -> f32 {
        self.focused_alpha.value()
    }

    fn set_selected_flag(&mut self, shape: ShapeId, selected: bool) {
        if let Some(s) = self.tree.get_mut(shape) {
            s.selected = selected;
        }
        if selected {
            self.selected_timer.add(shape);
        } else {
            self.selected_timer.remove(shape);
        }
    }

    /// Streicht Shapes, die nicht mehr im Baum liegen, aus Auswahl und Fokus.
    fn forget_removed_shapes(&mut self) {
        let tree = &self.tree;
        let dropped = self.selected_timer.retain(|id| tree.contains(id))
            + self.focused_timer.retain(|id| tree.contains(id));
        if dropped > 0 {
            log::debug!("{dropped} entfernte Shape(s) aus Auswahl/Fokus gestrichen");
            self.request_repaint();
        }
    }

    // ── Timer ───────────────────────────────────────────────────────

    pub fn pointer_entered(&mut self) {
        self.selected_timer.refresh();
        self.focused_timer.refresh();
    }

    pub fn pointer_exited(&mut self) {
        self.selected_timer.stop();
        self.focused_timer.stop();
    }

    pub fn timer(&self, kind: TimerKind) -> &HighlightTimer {
        match kind {
            TimerKind::Selected => &self.selected_timer,
            TimerKind::Focused => &self.focused_timer,
        }
    }

    /// Fällige Timer zum Zeitpunkt `now`.
    pub fn due_timers(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due = Vec::new();
        if self.selected_timer.poll(now) {
            due.push(TimerKind::Selected);
        }
        if self.focused_timer.poll(now) {
            due.push(TimerKind::Focused);
        }
        due
    }

    /// Ein Animationsschritt des zugehörigen Alpha-Werts.
    pub fn timer_fired(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Selected => self.selected_alpha.run(),
            TimerKind::Focused => self.focused_alpha.run(),
        }
        self.request_repaint();
    }

    // ── Repaint ─────────────────────────────────────────────────────

    pub fn repaint_requested(&self) -> bool {
        self.repaint_requested
    }

    /// Liefert und löscht die Repaint-Anforderung.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }
}

impl CanvasDelegate for Canvas {
    fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut ShapeTree {
        &mut self.tree
    }

    fn options(&self) -> &CanvasOptions {
        &self.options
    }

    fn create_shape(&mut self, point: Vec2, double_click: bool) {
        self.hooks.create_shape(&mut self.tree, point, double_click);
    }

    fn remove_shape(&mut self, shape: ShapeId) {
        self.hooks.remove_shape(&mut self.tree, shape);
        self.forget_removed_shapes();
    }

    fn edit_shape(&mut self, shape: ShapeId) {
        self.hooks.edit_shape(&mut self.tree, shape);
    }

    /// Hängt einen neuen Bogen-Link vorne an die Wurzel.
    fn create_link(
        &mut self,
        source: ShapeId,
        source_key: AnchorKey,
        target: ShapeId,
        target_key: AnchorKey,
        kind: LinkKind,
        pointer: Vec2,
    ) {
        let (Some(source_shape), Some(target_shape)) = (self.tree.get(source), self.tree.get(target))
        else {
            log::warn!("Link {source} → {target} verworfen: Endpunkt existiert nicht");
            return;
        };
        let link = LinkShape::with_pointer(
            source_shape,
            source_key,
            target_shape,
            target_key,
            kind,
            "",
            pointer,
            self.options.default_link_flatness,
        );
        let id = self.tree.create_link(link);
        let root = self.tree.root();
        self.tree.add_shape(root, id);
        log::debug!("Link {id} erstellt: {source}:{source_key} → {target}:{target_key}");
        self.request_repaint();
    }

    fn allows_link_creation(&self) -> bool {
        self.options.allow_free_link_creation || self.hooks.allows_link_creation()
    }

    fn is_selected(&self, shape: ShapeId) -> bool {
        self.selected_timer.contains(shape)
    }

    fn add_to_selection(&mut self, shape: ShapeId) {
        self.set_selected_flag(shape, true);
    }

    fn remove_from_selection(&mut self, shape: ShapeId) {
        self.set_selected_flag(shape, false);
    }

    fn add_focus_candidate(&mut self, shape: ShapeId) {
        if let Some(s) = self.tree.get_mut(shape) {
            s.focused = true;
        }
        self.focused_timer.add(shape);
    }

    fn remove_focus_candidate(&mut self, shape: ShapeId) {
        if let Some(s) = self.tree.get_mut(shape) {
            s.focused = false;
        }
        self.focused_timer.remove(shape);
    }

    fn move_selection(&mut self, delta: Vec2) {
        for shape in self.selected_shapes() {
            self.tree.move_shape(shape, delta);
        }
    }

    /// Wählt genau die direkten Kinder der Wurzel, deren Bounds `rect` schneiden.
    fn select_within_rect(&mut self, rect: Rect) {
        let root = self.tree.root();
        let children = self.tree.children(root).to_vec();
        for child in children {
            let hit = self
                .tree
                .bounds(child)
                .is_some_and(|bounds| rect.intersects(&bounds));
            self.set_selected_flag(child, hit);
        }
    }

    fn select_all(&mut self, select: bool) {
        let root = self.tree.root();
        let children = self.tree.children(root).to_vec();
        for child in children {
            self.set_selected_flag(child, select);
        }
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }
}
