//! Arena-basierter Shape-Baum.
//!
//! Alle Shapes liegen flach in einer `HashMap`, Eltern und Kinder sind
//! ID-Listen. Die Wurzel ist eine rahmenlose Gruppe. Eine Shape gilt als
//! eingehängt, solange sie von der Wurzel aus erreichbar ist.

use super::anchor::{Anchor, AnchorKey};
use super::geometry::Rect;
use super::link::LinkShape;
use super::shape::{Shape, ShapeId, ShapeKind};
use anyhow::{anyhow, ensure, Result};
use glam::Vec2;
use std::collections::HashMap;

#[cfg(test)]
mod tests;

/// Der Shape-Baum eines Diagramms.
#[derive(Debug, Clone)]
pub struct ShapeTree {
    shapes: HashMap<ShapeId, Shape>,
    root: ShapeId,
    next_id: ShapeId,
}

impl Default for ShapeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTree {
    /// Erstellt einen Baum, der nur aus der Wurzel-Gruppe besteht.
    pub fn new() -> Self {
        let root_id = 1;
        let mut root = Shape::new(root_id, ShapeKind::Group, Vec2::ZERO);
        root.attached = true;
        let mut shapes = HashMap::new();
        shapes.insert(root_id, root);
        Self {
            shapes,
            root: root_id,
            next_id: root_id + 1,
        }
    }

    pub fn root(&self) -> ShapeId {
        self.root
    }

    /// Anzahl aller Shapes in der Arena (inkl. Wurzel und nicht eingehängter).
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.len() <= 1
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Mutabler Zugriff auf Flags und Stil. Geometrie nur über die Baum-Methoden ändern.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.shapes
            .get(&id)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_child(&self, id: ShapeId) -> Option<ShapeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: ShapeId) -> Option<ShapeId> {
        self.children(id).last().copied()
    }

    pub fn is_attached(&self, id: ShapeId) -> bool {
        self.shapes.get(&id).is_some_and(|s| s.attached)
    }

    pub fn link(&self, id: ShapeId) -> Option<&LinkShape> {
        self.shapes.get(&id).and_then(Shape::as_link)
    }

    /// Mutabler Link-Zugriff. Danach `update_link` aufrufen.
    pub fn link_mut(&mut self, id: ShapeId) -> Option<&mut LinkShape> {
        self.shapes.get_mut(&id).and_then(Shape::as_link_mut)
    }

    // ── Erzeugen ────────────────────────────────────────────────────

    /// Legt eine neue, noch nicht eingehängte Shape an.
    pub fn create(&mut self, kind: ShapeKind, position: Vec2) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        self.shapes.insert(id, Shape::new(id, kind, position));
        id
    }

    pub fn create_circle(&mut self, position: Vec2, radius: f32) -> ShapeId {
        self.create(ShapeKind::circle(radius), position)
    }

    pub fn create_oval(&mut self, position: Vec2, width: f32, height: f32) -> ShapeId {
        self.create(ShapeKind::oval(width, height), position)
    }

    pub fn create_rectangle(&mut self, position: Vec2, width: f32, height: f32) -> ShapeId {
        self.create(ShapeKind::rectangle(width, height), position)
    }

    pub fn create_label(&mut self, position: Vec2, text: impl Into<String>) -> ShapeId {
        let id = self.create(ShapeKind::Label, position);
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.style.text = Some(text.into());
        }
        id
    }

    /// Legt einen Link als Shape an. Position ist bedeutungslos und bleibt bei (0, 0).
    pub fn create_link(&mut self, link: LinkShape) -> ShapeId {
        self.create(ShapeKind::Link(Box::new(link)), Vec2::ZERO)
    }

    // ── Struktur ────────────────────────────────────────────────────

    /// Fügt `child` als erstes Kind von `parent` ein.
    pub fn add_shape(&mut self, parent: ShapeId, child: ShapeId) -> bool {
        self.insert_shape(parent, 0, child)
    }

    /// Fügt `child` als letztes Kind von `parent` ein.
    pub fn add_shape_at_back(&mut self, parent: ShapeId, child: ShapeId) -> bool {
        let index = self.children(parent).len();
        self.insert_shape(parent, index, child)
    }

    /// Fügt `child` an Position `index` (geklemmt) in die Kinderliste ein.
    ///
    /// Ist `child` bereits Kind von `parent`, passiert nichts. Hängt es an
    /// einem anderen Elternteil, wird es dort zuerst entfernt. Zyklen und
    /// unbekannte IDs werden abgelehnt.
    pub fn insert_shape(&mut self, parent: ShapeId, index: usize, child: ShapeId) -> bool {
        if parent == child
            || !self.shapes.contains_key(&parent)
            || !self.shapes.contains_key(&child)
            || child == self.root
            || self.is_ancestor(child, parent)
        {
            return false;
        }
        if self.children(parent).contains(&child) {
            return false;
        }
        if let Some(old_parent) = self.shapes.get(&child).and_then(|s| s.parent) {
            self.unlink_child(old_parent, child);
        }

        let parent_attached = match self.shapes.get_mut(&parent) {
            Some(p) => {
                let at = index.min(p.children.len());
                p.children.insert(at, child);
                p.attached
            }
            None => return false,
        };
        if let Some(c) = self.shapes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.set_attached_recursive(child, parent_attached);
        if parent_attached {
            self.refresh_links();
        }
        true
    }

    /// Entfernt `child` aus der Kinderliste von `parent` und verwirft den Teilbaum.
    ///
    /// Liefert `false`, wenn `child` kein direktes Kind von `parent` ist.
    pub fn remove_shape(&mut self, parent: ShapeId, child: ShapeId) -> bool {
        if !self.unlink_child(parent, child) {
            return false;
        }
        for id in self.subtree(child) {
            self.shapes.remove(&id);
        }
        true
    }

    /// Hängt `child` aus, ohne es zu verwerfen.
    fn unlink_child(&mut self, parent: ShapeId, child: ShapeId) -> bool {
        let Some(p) = self.shapes.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return false;
        };
        p.children.remove(pos);
        if let Some(c) = self.shapes.get_mut(&child) {
            c.parent = None;
        }
        self.set_attached_recursive(child, false);
        true
    }

    fn set_attached_recursive(&mut self, id: ShapeId, attached: bool) {
        for sid in self.subtree(id) {
            if let Some(s) = self.shapes.get_mut(&sid) {
                s.attached = attached;
            }
        }
    }

    /// Ist `ancestor` gleich `id` oder einer seiner Vorfahren?
    fn is_ancestor(&self, ancestor: ShapeId, id: ShapeId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.shapes.get(&cid).and_then(|s| s.parent);
        }
        false
    }

    /// Alle IDs des Teilbaums unter `id` (inkl. `id`) in Tiefensuche-Reihenfolge.
    pub fn subtree(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(sid) = stack.pop() {
            let Some(shape) = self.shapes.get(&sid) else {
                continue;
            };
            result.push(sid);
            stack.extend(shape.children.iter().rev());
        }
        result
    }

    // ── Geometrie ───────────────────────────────────────────────────

    /// Verschiebt `id` samt aller Nachfahren um `delta`.
    pub fn move_shape(&mut self, id: ShapeId, delta: Vec2) {
        if !self.shapes.contains_key(&id) {
            return;
        }
        for sid in self.subtree(id) {
            if let Some(s) = self.shapes.get_mut(&sid) {
                s.position += delta;
                s.update_anchors();
            }
        }
        self.refresh_links();
    }

    /// Verschiebt `id` so, dass seine Position `target` ist (ein einziger `move_shape`).
    pub fn move_to_position(&mut self, id: ShapeId, target: Vec2) {
        if let Some(current) = self.shapes.get(&id).map(|s| s.position) {
            self.move_shape(id, target - current);
        }
    }

    /// Setzt nur die eigene Position; Kinder bleiben stehen.
    pub fn set_position(&mut self, id: ShapeId, position: Vec2) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.position = position;
            s.update_anchors();
            self.refresh_links();
        }
    }

    pub fn set_radius(&mut self, id: ShapeId, radius: f32) -> bool {
        let Some(s) = self.shapes.get_mut(&id) else {
            return false;
        };
        let ShapeKind::Circle { radius: r } = &mut s.kind else {
            return false;
        };
        *r = radius;
        s.update_anchors();
        self.refresh_links();
        true
    }

    /// Setzt Breite und Höhe eines Rechtecks oder Ovals.
    pub fn set_size(&mut self, id: ShapeId, width: f32, height: f32) -> bool {
        let Some(s) = self.shapes.get_mut(&id) else {
            return false;
        };
        match &mut s.kind {
            ShapeKind::Oval {
                width: w,
                height: h,
            }
            | ShapeKind::Rectangle {
                width: w,
                height: h,
            } => {
                *w = width;
                *h = height;
            }
            _ => return false,
        }
        s.update_anchors();
        self.refresh_links();
        true
    }

    /// Setzt den Text; bei Links das Muster samt Label.
    pub fn set_text(&mut self, id: ShapeId, text: impl Into<String>) {
        let Some(s) = self.shapes.get_mut(&id) else {
            return;
        };
        match &mut s.kind {
            ShapeKind::Link(link) => link.set_pattern(text),
            _ => s.style.text = Some(text.into()),
        }
    }

    /// Rahmen von `id` vereinigt mit den Rahmen aller Nachfahren.
    pub fn bounds(&self, id: ShapeId) -> Option<Rect> {
        let shape = self.shapes.get(&id)?;
        let mut bounds = shape.frame();
        for &child in &shape.children {
            if let Some(cb) = self.bounds(child) {
                bounds = Some(match bounds {
                    Some(b) => b.union(&cb),
                    None => cb,
                });
            }
        }
        bounds
    }

    /// Oberste Shape unter `point` im Teilbaum von `id`.
    ///
    /// Kinder werden in Listenreihenfolge zuerst geprüft (das vorderste
    /// Kind gewinnt), danach die Shape selbst.
    pub fn hit_test(&self, id: ShapeId, point: Vec2) -> Option<ShapeId> {
        let shape = self.shapes.get(&id)?;
        shape
            .children
            .iter()
            .find_map(|&child| self.hit_test(child, point))
            .or_else(|| shape.is_inside(point).then_some(id))
    }

    /// Tiefensuche nach dem ersten Knoten mit exakt diesem Text.
    pub fn search_by_text(&self, id: ShapeId, text: &str) -> Option<ShapeId> {
        self.subtree(id)
            .into_iter()
            .find(|sid| self.shapes.get(sid).and_then(Shape::text) == Some(text))
    }

    /// Zeichenreihenfolge (hinten nach vorne): Kinder von letztem zu erstem, dann der Knoten.
    pub fn paint_order(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut order = Vec::new();
        self.collect_paint_order(id, &mut order);
        order
    }

    fn collect_paint_order(&self, id: ShapeId, out: &mut Vec<ShapeId>) {
        let Some(shape) = self.shapes.get(&id) else {
            return;
        };
        for &child in shape.children.iter().rev() {
            self.collect_paint_order(child, out);
        }
        out.push(id);
    }

    // ── Inkrementelles Ziehen ───────────────────────────────────────

    /// Beginnt eine Drag-Sitzung: vergisst den letzten Punkt.
    pub fn start_drag(&mut self, id: ShapeId) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.last_drag_point = None;
        }
    }

    /// Verschiebt um die Differenz zum letzten Punkt (erster Aufruf: keine Bewegung).
    pub fn drag_to(&mut self, id: ShapeId, point: Vec2) {
        let Some(s) = self.shapes.get_mut(&id) else {
            return;
        };
        let delta = s.last_drag_point.map_or(Vec2::ZERO, |last| point - last);
        s.last_drag_point = Some(point);
        if delta != Vec2::ZERO {
            self.move_shape(id, delta);
        }
    }

    // ── Links ───────────────────────────────────────────────────────

    /// Frischt die Endpunkt-Anker auf und leitet die Kurve von `id` neu ab.
    ///
    /// Beide Endpunkte müssen existieren, eingehängt sein und den
    /// jeweiligen Anker besitzen.
    pub fn update_link(&mut self, id: ShapeId) -> Result<()> {
        let link = self
            .link(id)
            .ok_or_else(|| anyhow!("Shape {id} ist kein Link"))?;
        let (source, source_key) = (link.source, link.source_anchor_key);
        let (target, target_key) = (link.target, link.target_anchor_key);

        let start = self.endpoint_anchor(source, source_key)?;
        let end = self.endpoint_anchor(target, target_key)?;

        self.link_mut(id)
            .ok_or_else(|| anyhow!("Shape {id} ist kein Link"))?
            .apply_endpoints(start, end)
    }

    fn endpoint_anchor(&mut self, id: ShapeId, key: AnchorKey) -> Result<Anchor> {
        let shape = self
            .shapes
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Link-Endpunkt {id} existiert nicht"))?;
        ensure!(shape.attached, "Link-Endpunkt {id} ist nicht eingehängt");
        shape.update_anchors();
        shape
            .anchors
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("Link-Endpunkt {id} hat keinen Anker {key}"))
    }

    /// Leitet alle eingehängten Links neu ab. Fehler werden übersprungen.
    pub fn refresh_links(&mut self) {
        let link_ids: Vec<ShapeId> = self
            .shapes
            .values()
            .filter(|s| s.attached && s.is_link())
            .map(|s| s.id)
            .collect();
        for id in link_ids {
            if let Err(e) = self.update_link(id) {
                log::debug!("Link {id} übersprungen: {e}");
            }
        }
    }

    /// Interaktives Umformen eines Links zum Zeiger hin.
    pub fn reshape_link(&mut self, id: ShapeId, pointer: Vec2) -> Result<()> {
        let target = self
            .link(id)
            .map(|l| l.target)
            .ok_or_else(|| anyhow!("Shape {id} ist kein Link"))?;
        let target_position = self
            .get(target)
            .map(Shape::position)
            .ok_or_else(|| anyhow!("Link-Ziel {target} existiert nicht"))?;
        if let Some(link) = self.link_mut(id) {
            link.set_mouse_position(pointer, target_position);
        }
        self.update_link(id)
    }
}
