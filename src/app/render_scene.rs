//! Builder für Render-Szenen aus der Zeichenfläche.

use super::canvas::Canvas;
use super::delegate::CanvasDelegate;
use super::gestures::GestureManager;
use crate::core::{ArcCurve, Color, Shape, ShapeKind};
use crate::shared::{DrawCommand, RenderScene, Stroke};

/// Linienstärke von Kurven und Pfeilen.
const CURVE_STROKE_WIDTH: f32 = 1.0;

/// Baut eine RenderScene aus dem aktuellen Zustand der Zeichenfläche.
pub fn build(canvas: &Canvas, gestures: &GestureManager) -> RenderScene {
    let tree = canvas.tree();
    let options = canvas.options();
    let mut commands = Vec::new();

    for id in tree.paint_order(tree.root()) {
        let Some(shape) = tree.get(id) else {
            continue;
        };
        paint_shape(shape, &mut commands);

        let highlight = if shape.selected {
            Some(with_alpha(options.selected_highlight_color, canvas.selected_alpha()))
        } else if shape.focused {
            Some(with_alpha(options.focused_highlight_color, canvas.focused_alpha()))
        } else {
            None
        };
        if let Some(color) = highlight {
            paint_outline(shape, Stroke::new(color, options.highlight_stroke_width), &mut commands);
        }
    }

    let mut overlay = Vec::new();
    gestures.paint_overlay(tree, options, &mut overlay);

    RenderScene {
        zoom: canvas.zoom(),
        commands,
        overlay,
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Zeichentabelle pro Shape-Art.
fn paint_shape(shape: &Shape, out: &mut Vec<DrawCommand>) {
    let style = &shape.style;
    let stroke = Some(Stroke::new(style.border_color, style.border_size));
    let fill = Some(style.background);
    match shape.kind() {
        ShapeKind::Group => return,
        ShapeKind::Circle { .. } | ShapeKind::Oval { .. } => {
            if let Some(rect) = shape.frame() {
                out.push(DrawCommand::Ellipse { rect, fill, stroke });
            }
        }
        ShapeKind::Rectangle { .. } => {
            if let Some(rect) = shape.frame() {
                out.push(DrawCommand::Rect { rect, fill, stroke });
            }
        }
        ShapeKind::Label => {}
        ShapeKind::Link(link) => {
            curve_commands(&link.curve, out);
            return;
        }
    }

    if let Some(text) = style.text.as_ref().filter(|t| style.text_visible && !t.is_empty()) {
        out.push(DrawCommand::Text {
            text: text.clone(),
            center: shape.position(),
            color: style.text_color,
        });
    }
}

/// Nur der Umriss, für die Hervorhebung.
fn paint_outline(shape: &Shape, stroke: Stroke, out: &mut Vec<DrawCommand>) {
    match shape.kind() {
        ShapeKind::Group => {}
        ShapeKind::Circle { .. } | ShapeKind::Oval { .. } => {
            if let Some(rect) = shape.frame() {
                out.push(DrawCommand::Ellipse {
                    rect,
                    fill: None,
                    stroke: Some(stroke),
                });
            }
        }
        ShapeKind::Rectangle { .. } | ShapeKind::Label => {
            if let Some(rect) = shape.frame() {
                out.push(DrawCommand::Rect {
                    rect,
                    fill: None,
                    stroke: Some(stroke),
                });
            }
        }
        ShapeKind::Link(link) => {
            if let Some(geometry) = link.curve.geometry() {
                out.push(DrawCommand::Polyline {
                    points: geometry.flatten(),
                    stroke,
                });
            }
        }
    }
}

/// Kurve, sichtbare Pfeile und Label einer Bogen-Kurve.
pub(crate) fn curve_commands(curve: &ArcCurve, out: &mut Vec<DrawCommand>) {
    let Some(geometry) = curve.geometry() else {
        return;
    };
    let stroke = Stroke::new(curve.color, CURVE_STROKE_WIDTH);
    out.push(DrawCommand::Polyline {
        points: geometry.flatten(),
        stroke,
    });

    let arrows = [
        (curve.start_arrow_visible, &curve.start_arrow),
        (curve.end_arrow_visible, &curve.end_arrow),
    ];
    for (visible, arrow) in arrows {
        let Some(wings) = arrow.wings().filter(|_| visible) else {
            continue;
        };
        for (from, to) in wings {
            out.push(DrawCommand::Line { from, to, stroke });
        }
    }

    let label = &curve.label;
    if let (true, Some(text), Some(center)) = (label.visible, label.text.as_ref(), label.position) {
        if !text.is_empty() {
            out.push(DrawCommand::Text {
                text: text.clone(),
                center,
                color: label.color,
            });
        }
    }
}
