use approx::assert_relative_eq;
use diagram_canvas::core::{CurveGeometry, ShapeTree};
use diagram_canvas::{AnchorKey, LinkKind, LinkShape, Rect};
use glam::Vec2;

fn tree_with_pair() -> (ShapeTree, u64, u64) {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let a = tree.create_circle(Vec2::new(100.0, 100.0), 30.0);
    let b = tree.create_rectangle(Vec2::new(300.0, 200.0), 40.0, 40.0);
    tree.add_shape_at_back(root, a);
    tree.add_shape_at_back(root, b);
    (tree, a, b)
}

fn attach_link(tree: &mut ShapeTree, source: u64, target: u64, flatness: f32) -> u64 {
    let link = LinkShape::new(
        tree.get(source).unwrap(),
        AnchorKey::Center,
        tree.get(target).unwrap(),
        AnchorKey::Center,
        LinkKind::Arc,
        "x",
        flatness,
    );
    let id = tree.create_link(link);
    let root = tree.root();
    tree.add_shape(root, id);
    id
}

#[test]
fn test_hit_test_outside_all_bounds_is_none() {
    let (mut tree, a, b) = tree_with_pair();
    let _link = attach_link(&mut tree, a, b, 25.0);
    let root = tree.root();
    let union = tree.bounds(root).unwrap();
    let outside = union.max() + Vec2::new(10.0, 10.0);
    assert!(tree.hit_test(root, outside).is_none());
    assert_eq!(tree.hit_test(root, Vec2::new(100.0, 100.0)), Some(a));
    assert_eq!(tree.hit_test(root, Vec2::new(300.0, 200.0)), Some(b));
}

#[test]
fn test_flatness_sign_mirrors_label_side() {
    let (mut tree, a, b) = tree_with_pair();
    let up = attach_link(&mut tree, a, b, 30.0);
    let down = attach_link(&mut tree, a, b, -30.0);

    let up = tree.link(up).unwrap().curve.label.position.unwrap();
    let down = tree.link(down).unwrap().curve.label.position.unwrap();
    // Spiegelbilder an der Sehne: Mitte liegt auf der Sehne, Seiten verschieden
    let start = Vec2::new(100.0, 100.0);
    let chord = (Vec2::new(300.0, 200.0) - start).normalize();
    let middle = (up + down) * 0.5;
    assert_relative_eq!(chord.perp_dot(middle - start), 0.0, epsilon = 1e-3);
    assert!(chord.perp_dot(up - start) * chord.perp_dot(down - start) < 0.0);
}

#[test]
fn test_update_is_idempotent_after_moves() {
    let (mut tree, a, b) = tree_with_pair();
    let link = attach_link(&mut tree, a, b, 15.0);
    tree.move_shape(b, Vec2::new(-50.0, 40.0));
    let first = *tree.link(link).unwrap().curve.geometry().unwrap();
    tree.update_link(link).unwrap();
    let second = *tree.link(link).unwrap().curve.geometry().unwrap();
    assert_eq!(first, second);
    match first {
        CurveGeometry::Quadratic { .. } => {}
        other => panic!("Quadratische Kurve erwartet, erhalten: {other:?}"),
    }
}

#[test]
fn test_detached_endpoint_fails_update() {
    let (mut tree, a, b) = tree_with_pair();
    let link = attach_link(&mut tree, a, b, 15.0);
    let root = tree.root();
    assert!(tree.remove_shape(root, b));
    assert!(tree.update_link(link).is_err());
}

#[test]
fn test_self_loop_control_points_are_mirrored() {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let a = tree.create_oval(Vec2::new(100.0, 100.0), 50.0, 30.0);
    tree.add_shape(root, a);
    let link = attach_link(&mut tree, a, a, 0.0);

    match *tree.link(link).unwrap().curve.geometry().unwrap() {
        CurveGeometry::Cubic {
            control1, control2, ..
        } => {
            assert_relative_eq!(control1.x - 100.0, 100.0 - control2.x, epsilon = 1e-3);
            assert_relative_eq!(control1.y, control2.y, epsilon = 1e-3);
        }
        other => panic!("Kubische Schleife erwartet, erhalten: {other:?}"),
    }
}

#[test]
fn test_link_frame_spans_raw_anchor_positions() {
    let (mut tree, a, b) = tree_with_pair();
    let link = attach_link(&mut tree, a, b, 40.0);
    let frame = tree.get(link).unwrap().frame().unwrap();
    assert_eq!(frame, Rect::from_corners(Vec2::new(100.0, 100.0), Vec2::new(300.0, 200.0)));
}
