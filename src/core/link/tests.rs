use super::*;
use crate::core::anchor::DIRECTION_FREE;
use crate::core::shape::ShapeKind;
use approx::assert_relative_eq;

fn arc_between(start: Vec2, end: Vec2, flatness: f32) -> ArcCurve {
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(start, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(end, DIRECTION_FREE));
    curve.set_flatness(flatness);
    curve.update().unwrap();
    curve
}

fn quadratic(curve: &ArcCurve) -> (Vec2, Vec2, Vec2) {
    match curve.geometry() {
        Some(CurveGeometry::Quadratic {
            start,
            control,
            end,
        }) => (*start, *control, *end),
        other => panic!("Quadratischer Bogen erwartet, erhalten: {other:?}"),
    }
}

// ── Bogen ──

#[test]
fn test_arc_control_point_offset_by_flatness() {
    let curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 20.0);
    let (start, control, end) = quadratic(&curve);
    assert_eq!(start, Vec2::ZERO);
    assert_eq!(end, Vec2::new(100.0, 0.0));
    assert_relative_eq!(control.x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(control.y, -20.0, epsilon = 1e-4);
}

#[test]
fn test_zero_flatness_uses_minimal_height() {
    let curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.0);
    let (_, control, _) = quadratic(&curve);
    assert_relative_eq!(control.y, -curve::ZERO_FLATNESS_HEIGHT, epsilon = 1e-6);
}

#[test]
fn test_flatness_sign_mirrors_label_side() {
    let up = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 20.0);
    let down = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), -20.0);
    let up_label = up.label.position.unwrap();
    let down_label = down.label.position.unwrap();

    // |flatness| / 2 + 20 = 30 senkrecht zur Sehne
    assert_relative_eq!(up_label.x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(up_label.y, -30.0, epsilon = 1e-4);
    assert_relative_eq!(down_label.x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(down_label.y, 30.0, epsilon = 1e-4);
}

#[test]
fn test_tangent_offsets_pull_endpoints_toward_control() {
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(Vec2::new(100.0, 0.0), DIRECTION_FREE));
    curve.start_tangent_offset = 10.0;
    curve.end_tangent_offset = 10.0;
    curve.set_flatness(20.0);
    curve.update().unwrap();

    let (start, control, end) = quadratic(&curve);
    assert_relative_eq!(start.length(), 10.0, epsilon = 1e-4);
    assert_relative_eq!(end.distance(Vec2::new(100.0, 0.0)), 10.0, epsilon = 1e-4);
    // Endpunkte liegen auf der Geraden Anker → Kontrollpunkt
    assert_relative_eq!(crate::core::geometry::cross(start, control), 0.0, epsilon = 1e-3);
}

#[test]
fn test_update_is_idempotent() {
    let mut curve = arc_between(Vec2::new(10.0, 20.0), Vec2::new(140.0, 90.0), 35.0);
    let first = curve.clone();
    curve.update().unwrap();
    assert_eq!(curve, first);
}

#[test]
fn test_update_without_anchors_fails() {
    let mut curve = ArcCurve::new();
    assert!(curve.update().is_err());
    curve.set_start_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    assert!(curve.update().is_err());
    assert!(curve.geometry().is_none());
}

#[test]
fn test_offsets_shift_endpoints() {
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(Vec2::new(100.0, 0.0), DIRECTION_FREE));
    curve.set_start_offset(Some(Vec2::new(0.0, 10.0)));
    curve.update().unwrap();
    let (start, _, _) = quadratic(&curve);
    assert_eq!(start, Vec2::new(0.0, 10.0));
    // Rahmen ignoriert Offsets
    assert_eq!(curve.frame(), Rect::new(0.0, 0.0, 100.0, 0.0));
}

// ── Umformen ──

#[test]
fn test_set_mouse_position_sets_flatness_from_perpendicular_offset() {
    let mut curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.0);
    curve.set_mouse_position(Vec2::new(50.0, -10.0));
    assert_relative_eq!(curve.flatness(), 20.0, epsilon = 1e-4);
    curve.set_mouse_position(Vec2::new(30.0, 15.0));
    assert_relative_eq!(curve.flatness(), -30.0, epsilon = 1e-4);
    curve.set_mouse_position(Vec2::new(70.0, 0.0));
    assert_eq!(curve.flatness(), 0.0);
}

#[test]
fn test_reshaped_belly_passes_through_pointer() {
    let mut curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.0);
    curve.set_mouse_position(Vec2::new(50.0, -10.0));
    curve.update().unwrap();
    assert!(curve.contains(Vec2::new(50.0, -10.0)));
}

// ── Hit-Test ──

#[test]
fn test_contains_follows_curve_not_chord_area() {
    let curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 20.0);
    assert!(curve.contains(Vec2::new(50.0, -10.0)));
    assert!(curve.contains(Vec2::new(0.0, 0.0)));
    assert!(!curve.contains(Vec2::new(50.0, -30.0)));
    assert!(!curve.contains(Vec2::new(50.0, 10.0)));
}

#[test]
fn test_contains_without_geometry_is_false() {
    assert!(!ArcCurve::new().contains(Vec2::ZERO));
}

// ── Schleife ──

#[test]
fn test_loop_controls_mirror_across_vertical_axis() {
    let center = Vec2::new(100.0, 100.0);
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(center, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(center, DIRECTION_FREE));
    curve.set_has_loop(true);
    curve.set_direction(Vec2::new(0.0, 1.0));
    curve.update().unwrap();

    let Some(CurveGeometry::Cubic {
        start,
        control1,
        control2,
        end,
    }) = curve.geometry().copied()
    else {
        panic!("Schleife muss kubisch sein");
    };
    assert_eq!(start, center);
    assert_eq!(end, center);
    assert_relative_eq!(control1.x - center.x, center.x - control2.x, epsilon = 1e-3);
    assert_relative_eq!(control1.y, control2.y, epsilon = 1e-3);
    // Gestreckte Richtung auf Mindestlänge 100 angehoben
    assert_relative_eq!(control1.distance(center), 100.0, epsilon = 1e-3);
    assert!(control1.x > center.x);

    let label = curve.label.position.unwrap();
    assert_relative_eq!(label.x, 100.0, epsilon = 1e-4);
    assert_relative_eq!(label.y, 175.0, epsilon = 1e-4);
}

#[test]
fn test_long_loop_direction_is_stretched() {
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_has_loop(true);
    curve.set_direction(Vec2::new(100.0, 0.0));
    curve.start_tangent_offset = 30.0;
    curve.end_tangent_offset = 30.0;
    curve.update().unwrap();

    let Some(CurveGeometry::Cubic {
        start,
        control1,
        control2,
        end,
    }) = curve.geometry().copied()
    else {
        panic!("Schleife muss kubisch sein");
    };
    assert_relative_eq!(control1.length(), 170.0, epsilon = 1e-3);
    assert_relative_eq!(control2.length(), 170.0, epsilon = 1e-3);
    assert_relative_eq!(start.length(), 30.0, epsilon = 1e-3);
    assert_relative_eq!(end.length(), 30.0, epsilon = 1e-3);
    // Label: Länge + 15
    assert_relative_eq!(curve.label.position.unwrap().x, 115.0, epsilon = 1e-3);
}

#[test]
fn test_loop_arrows_point_at_controls() {
    let mut curve = ArcCurve::new();
    curve.set_start_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_end_anchor(Anchor::new(Vec2::ZERO, DIRECTION_FREE));
    curve.set_has_loop(true);
    curve.update().unwrap();
    let Some(CurveGeometry::Cubic {
        control1, control2, ..
    }) = curve.geometry().copied()
    else {
        panic!("Schleife muss kubisch sein");
    };
    assert_eq!(curve.start_arrow.direction, Some(control1));
    assert_eq!(curve.end_arrow.direction, Some(control2));
}

// ── LinkShape ──

#[test]
fn test_link_shape_loop_iff_same_endpoint() {
    let a = Shape::new(1, ShapeKind::circle(30.0), Vec2::new(0.0, 0.0));
    let b = Shape::new(2, ShapeKind::circle(30.0), Vec2::new(200.0, 0.0));

    let self_loop = LinkShape::default_link(&a, &a);
    assert!(self_loop.has_loop());
    assert!(self_loop.curve.has_loop());
    assert_eq!(self_loop.curve.direction(), DIRECTION_BOTTOM);

    let edge = LinkShape::default_link(&a, &b);
    assert!(!edge.has_loop());
    assert_eq!(edge.curve.direction(), Vec2::new(-200.0, 0.0));
    assert_eq!(edge.curve.start_tangent_offset, 30.0);
    assert_eq!(edge.curve.end_tangent_offset, 30.0);
}

#[test]
fn test_link_shape_with_pointer_seeds_direction() {
    let a = Shape::new(1, ShapeKind::rectangle(40.0, 40.0), Vec2::new(0.0, 0.0));
    let link = LinkShape::with_pointer(
        &a,
        AnchorKey::Top,
        &a,
        AnchorKey::Top,
        LinkKind::Arc,
        "a|b",
        Vec2::new(10.0, -50.0),
        20.0,
    );
    assert_eq!(link.curve.direction(), Vec2::new(10.0, -50.0));
    assert_eq!(link.curve.flatness(), 20.0);
    // Nur der Mittelpunkt-Anker hat einen Tangenten-Offset
    assert_eq!(link.curve.start_tangent_offset, 0.0);
    assert_eq!(link.curve.label.text.as_deref(), Some("a|b"));
}

#[test]
fn test_link_shape_set_mouse_position_updates_direction() {
    let a = Shape::new(1, ShapeKind::circle(10.0), Vec2::new(0.0, 0.0));
    let b = Shape::new(2, ShapeKind::circle(10.0), Vec2::new(100.0, 0.0));
    let mut link = LinkShape::default_link(&a, &b);
    link.curve.start_tangent_offset = 0.0;
    link.curve.end_tangent_offset = 0.0;
    link.set_mouse_position(Vec2::new(50.0, -10.0), b.position());
    assert_eq!(link.curve.direction(), Vec2::new(-50.0, -10.0));
    assert_relative_eq!(link.curve.flatness(), 20.0, epsilon = 1e-4);
}

#[test]
fn test_loop_with_pointer_on_target_keeps_bottom_direction() {
    let a = Shape::new(1, ShapeKind::circle(30.0), Vec2::new(100.0, 100.0));
    let link = LinkShape::with_pointer(
        &a,
        AnchorKey::Center,
        &a,
        AnchorKey::Center,
        LinkKind::Arc,
        "",
        Vec2::new(100.0, 100.0),
        20.0,
    );
    assert_eq!(link.curve.direction(), Vec2::new(0.0, 1.0));
}

#[test]
fn test_new_curve_shows_only_end_arrow() {
    let curve = arc_between(Vec2::ZERO, Vec2::new(100.0, 0.0), 20.0);
    assert!(!curve.start_arrow_visible);
    assert!(curve.end_arrow_visible);
    assert!(curve.end_arrow.wings().is_some());
}
