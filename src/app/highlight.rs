//! Hervorhebungs-Animation für ausgewählte und fokussierte Shapes.
//!
//! `HighlightTimer` hält die betroffenen Shapes und läuft nur, solange die
//! Menge nicht leer ist. Der Host fragt ihn per `poll` ab; jeder fällige
//! Tick wird als `CanvasTask::Tick` in die Dispatch-Queue gestellt.

use crate::core::ShapeId;
use indexmap::IndexSet;
use std::time::{Duration, Instant};

/// Pendelt einen Alpha-Wert zwischen 0 und 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaVariator {
    value: f32,
    speed: f32,
    step: f32,
}

impl Default for AlphaVariator {
    fn default() -> Self {
        Self::new(crate::shared::options::HIGHLIGHT_ALPHA_STEP)
    }
}

impl AlphaVariator {
    pub fn new(step: f32) -> Self {
        Self {
            value: 0.0,
            speed: 1.0,
            step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Ein Schritt; an den Grenzen wird geklemmt und die Richtung umgekehrt.
    pub fn run(&mut self) {
        self.value += self.speed * self.step;
        if self.value > 1.0 {
            self.value = 1.0;
            self.speed = -self.speed;
        } else if self.value < 0.0 {
            self.value = 0.0;
            self.speed = -self.speed;
        }
    }
}

/// Periodischer Timer über einer geordneten Shape-Menge.
#[derive(Debug, Clone)]
pub struct HighlightTimer {
    shapes: IndexSet<ShapeId>,
    interval: Duration,
    running: bool,
    last_fire: Option<Instant>,
}

impl HighlightTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            shapes: IndexSet::new(),
            interval,
            running: false,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Fügt eine Shape hinzu; `false`, wenn sie schon enthalten war.
    pub fn add(&mut self, shape: ShapeId) -> bool {
        if !self.shapes.insert(shape) {
            return false;
        }
        self.refresh();
        true
    }

    pub fn remove(&mut self, shape: ShapeId) -> bool {
        let removed = self.shapes.shift_remove(&shape);
        self.refresh();
        removed
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.refresh();
    }

    /// Behält nur Shapes, für die `keep` gilt; gibt die Anzahl entfernter zurück.
    pub fn retain(&mut self, mut keep: impl FnMut(ShapeId) -> bool) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|&shape| keep(shape));
        self.refresh();
        before - self.shapes.len()
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.shapes.contains(&shape)
    }

    /// Shapes in Einfügereihenfolge.
    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Startet bei nicht-leerer Menge, stoppt sonst.
    pub fn refresh(&mut self) {
        if self.shapes.is_empty() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ist ein Tick fällig? Der erste Aufruf nach dem Start setzt nur den Takt.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_fire = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}
