//! Canvas-Controller: serielle Dispatch-Queue für Eingaben und Timer-Ticks.

use super::canvas::Canvas;
use super::events::{CanvasTask, InputEvent, TimerKind};
use super::gestures::GestureManager;
use super::render_scene;
use crate::shared::RenderScene;
use anyhow::ensure;
use std::collections::VecDeque;
use std::time::Instant;

/// Orchestriert Eingaben, Gesten und Timer-Ticks auf der Zeichenfläche.
///
/// Alles läuft über eine FIFO-Queue auf einem Thread; Ticks und Eingaben
/// sehen den Shape-Baum daher nie gleichzeitig.
#[derive(Default)]
pub struct CanvasController {
    gestures: GestureManager,
    queue: VecDeque<CanvasTask>,
}

impl CanvasController {
    /// Erstellt einen Controller mit den Standard-Gesten.
    pub fn new() -> Self {
        Self::with_gestures(GestureManager::new())
    }

    pub fn with_gestures(gestures: GestureManager) -> Self {
        Self {
            gestures,
            queue: VecDeque::new(),
        }
    }

    pub fn gestures(&self) -> &GestureManager {
        &self.gestures
    }

    pub fn gestures_mut(&mut self) -> &mut GestureManager {
        &mut self.gestures
    }

    /// Stellt eine Aufgabe hinten in die Queue.
    pub fn post(&mut self, task: CanvasTask) {
        self.queue.push_back(task);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stellt ein Event ein und arbeitet die Queue ab.
    pub fn handle_event(&mut self, canvas: &mut Canvas, event: InputEvent) -> anyhow::Result<()> {
        self.post(CanvasTask::Input(event));
        self.process(canvas)
    }

    /// Stellt fällige Timer-Ticks ein und arbeitet die Queue ab.
    pub fn poll_timers(&mut self, canvas: &mut Canvas, now: Instant) -> anyhow::Result<()> {
        for kind in canvas.due_timers(now) {
            self.post(CanvasTask::Tick(kind));
        }
        self.process(canvas)
    }

    /// Arbeitet alle Aufgaben in Ankunftsreihenfolge ab.
    ///
    /// Bei einem Fehler bleiben die übrigen Aufgaben in der Queue.
    pub fn process(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        while let Some(task) = self.queue.pop_front() {
            match task {
                CanvasTask::Input(event) => self.handle_input(canvas, event)?,
                CanvasTask::Tick(kind) => self.handle_tick(canvas, kind),
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, canvas: &mut Canvas, event: InputEvent) -> anyhow::Result<()> {
        if let Some(pointer) = event.pointer() {
            ensure!(
                pointer.position.is_finite(),
                "Ungültige Zeigerposition: {:?}",
                pointer.position
            );
        }
        match event {
            InputEvent::Wheel { rotation } => canvas.zoom_by_wheel(rotation),
            InputEvent::PointerEntered => canvas.pointer_entered(),
            InputEvent::PointerExited => canvas.pointer_exited(),
            _ => {
                let event = event.map_position(|p| canvas.to_canvas_space(p));
                self.gestures.dispatch(canvas, &event);
            }
        }
        Ok(())
    }

    fn handle_tick(&mut self, canvas: &mut Canvas, kind: TimerKind) {
        canvas.timer_fired(kind);
    }

    /// Baut die Render-Szene für den aktuellen Zustand.
    pub fn render_scene(&self, canvas: &Canvas) -> RenderScene {
        render_scene::build(canvas, &self.gestures)
    }

    /// Verwirft laufende Gesten und die Queue.
    pub fn reset(&mut self) {
        self.gestures.reset();
        self.queue.clear();
    }
}
