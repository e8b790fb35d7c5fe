//! Diagram Canvas Demo.
//!
//! Spielt eine kurze Gesten-Sitzung gegen die Standard-Zeichenfläche ab
//! und protokolliert den entstandenen Diagramm-Zustand.

use diagram_canvas::app::{CanvasHooks, Key};
use diagram_canvas::core::{ShapeId, ShapeKind, ShapeTree};
use diagram_canvas::{
    Canvas, CanvasController, CanvasDelegate, CanvasOptions, InputEvent, KeyEvent, PointerEvent,
};
use glam::Vec2;
use std::time::{Duration, Instant};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Diagram Canvas Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let options = CanvasOptions::load_from_file(&CanvasOptions::config_path());
    let hooks = DemoHooks::new(&options);
    let mut canvas = Canvas::with_hooks(options, Box::new(hooks));
    let mut controller = CanvasController::new();

    Session::new(&mut controller, &mut canvas).run()?;

    log_diagram(canvas.tree());
    let scene = controller.render_scene(&canvas);
    log::info!(
        "Render-Szene: {} Befehle, {} Overlay, Zoom {:.1}",
        scene.commands.len(),
        scene.overlay.len(),
        scene.zoom
    );
    Ok(())
}

/// Erzeugt Kreise per Klick, Rechtecke per Doppelklick und nummeriert sie.
struct DemoHooks {
    circle_radius: f32,
    rect_size: [f32; 2],
    counter: usize,
}

impl DemoHooks {
    fn new(options: &CanvasOptions) -> Self {
        Self {
            circle_radius: options.default_circle_radius,
            rect_size: options.default_rect_size,
            counter: 0,
        }
    }
}

impl CanvasHooks for DemoHooks {
    fn create_shape(&mut self, tree: &mut ShapeTree, point: Vec2, double_click: bool) {
        let id = if double_click {
            tree.create_rectangle(point, self.rect_size[0], self.rect_size[1])
        } else {
            tree.create_circle(point, self.circle_radius)
        };
        self.counter += 1;
        if let Some(shape) = tree.get_mut(id) {
            shape.draggable = true;
            shape.accepts_incoming_links = true;
            shape.accepts_outgoing_links = true;
            shape.style.text = Some(format!("S{}", self.counter));
        }
        let root = tree.root();
        tree.add_shape(root, id);
        log::info!("Shape {id} erstellt bei {:?}", point);
    }

    fn edit_shape(&mut self, tree: &mut ShapeTree, shape: ShapeId) {
        let text = tree.get(shape).and_then(|s| s.text()).unwrap_or("").to_owned();
        tree.set_text(shape, format!("{text}*"));
        log::info!("Shape {shape} bearbeitet");
    }
}

/// Skriptbare Folge von Zeiger- und Tastatur-Events.
struct Session<'a> {
    controller: &'a mut CanvasController,
    canvas: &'a mut Canvas,
}

impl<'a> Session<'a> {
    fn new(controller: &'a mut CanvasController, canvas: &'a mut Canvas) -> Self {
        Self { controller, canvas }
    }

    fn send(&mut self, event: InputEvent) -> anyhow::Result<()> {
        self.controller.handle_event(self.canvas, event)
    }

    fn click(&mut self, pointer: PointerEvent) -> anyhow::Result<()> {
        self.send(InputEvent::PointerPressed(pointer))?;
        self.send(InputEvent::PointerReleased(pointer))
    }

    fn drag(&mut self, pointer: PointerEvent, to: Vec2) -> anyhow::Result<()> {
        self.send(InputEvent::PointerPressed(pointer))?;
        let steps = 4;
        for i in 1..=steps {
            let p = pointer.position.lerp(to, i as f32 / steps as f32);
            self.send(InputEvent::PointerDragged(pointer.at(p)))?;
        }
        self.send(InputEvent::PointerReleased(pointer.at(to)))
    }

    fn hover(&mut self, position: Vec2) -> anyhow::Result<()> {
        self.send(InputEvent::PointerMoved(PointerEvent::hover(position)))
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.send(InputEvent::PointerEntered)?;

        // Drei Shapes, die dritte per Doppelklick als Rechteck
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(300.0, 100.0);
        let c = Vec2::new(200.0, 260.0);
        self.click(PointerEvent::primary(a))?;
        self.click(PointerEvent::primary(b))?;
        self.click(PointerEvent::primary(c).with_click_count(2))?;

        // Einzelne Shape ziehen, dann Doppelklick zum Bearbeiten
        self.drag(PointerEvent::primary(c), c + Vec2::new(0.0, 20.0))?;
        let c = c + Vec2::new(0.0, 20.0);
        self.click(PointerEvent::primary(c).with_click_count(2))?;

        // Link a → b per Shift-Klick, Vorschau folgt dem Zeiger
        self.click(PointerEvent::primary(a).with_shift())?;
        self.hover(Vec2::new(200.0, 60.0))?;
        self.hover(b)?;
        self.click(PointerEvent::primary(b))?;

        // Schleife auf c
        self.click(PointerEvent::primary(c).with_shift())?;
        self.hover(c + Vec2::new(5.0, 5.0))?;
        self.click(PointerEvent::primary(c))?;

        // Abgebrochener Link
        self.click(PointerEvent::primary(b).with_shift())?;
        self.hover(Vec2::new(400.0, 400.0))?;
        self.send(InputEvent::KeyPressed(KeyEvent::new(Key::Escape)))?;

        // Link a → b umformen: am Bauch greifen und nach oben ziehen
        if let Some(belly) = self.link_belly() {
            self.drag(PointerEvent::primary(belly), belly + Vec2::new(0.0, -40.0))?;
        }

        // Marquee über a und b, dann Auswahl verschieben
        self.drag(PointerEvent::primary(Vec2::new(40.0, 40.0)), Vec2::new(360.0, 160.0))?;
        log::info!("Ausgewählt: {:?}", self.canvas.selected_shapes());
        self.drag(PointerEvent::primary(a), a + Vec2::new(30.0, 30.0))?;

        // Wurzel verschieben und zoomen
        self.drag(
            PointerEvent::primary(Vec2::new(500.0, 500.0)).with_shift(),
            Vec2::new(520.0, 510.0),
        )?;
        self.send(InputEvent::Wheel { rotation: 1 })?;

        // Ein paar Hervorhebungs-Ticks
        let start = Instant::now();
        for i in 0..5 {
            self.controller
                .poll_timers(self.canvas, start + Duration::from_millis(60 * i))?;
        }

        self.send(InputEvent::PointerExited)
    }

    /// Mittlerer Punkt der ersten Kurve zwischen zwei verschiedenen Shapes.
    fn link_belly(&self) -> Option<Vec2> {
        let tree = self.canvas.tree();
        tree.children(tree.root()).iter().find_map(|&id| {
            let link = tree.link(id).filter(|l| !l.has_loop())?;
            let points = link.curve.geometry()?.flatten();
            points.get(points.len() / 2).copied()
        })
    }
}

fn log_diagram(tree: &ShapeTree) {
    for &id in tree.children(tree.root()) {
        let Some(shape) = tree.get(id) else {
            continue;
        };
        match shape.kind() {
            ShapeKind::Link(link) => log::info!(
                "Link {id}: {}:{} → {}:{}, Krümmung {:.1}, Schleife {}",
                link.source,
                link.source_anchor_key,
                link.target,
                link.target_anchor_key,
                link.curve.flatness(),
                link.has_loop()
            ),
            kind => log::info!(
                "{} {id} \"{}\" bei ({:.0}, {:.0})",
                kind.name(),
                shape.text().unwrap_or(""),
                shape.position().x,
                shape.position().y
            ),
        }
    }
}
