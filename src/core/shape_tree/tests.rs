use super::*;
use crate::core::anchor::AnchorKey;
use crate::core::link::{CurveGeometry, LinkKind};
use approx::assert_relative_eq;

fn tree_with_two_circles() -> (ShapeTree, ShapeId, ShapeId) {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let a = tree.create_circle(Vec2::new(100.0, 100.0), 30.0);
    let b = tree.create_circle(Vec2::new(300.0, 100.0), 30.0);
    assert!(tree.add_shape(root, a));
    assert!(tree.add_shape(root, b));
    (tree, a, b)
}

// ── Struktur ──

#[test]
fn test_add_shape_inserts_at_front_and_back() {
    let (mut tree, a, b) = tree_with_two_circles();
    let root = tree.root();
    assert_eq!(tree.children(root), &[b, a]);

    let c = tree.create_rectangle(Vec2::ZERO, 40.0, 40.0);
    assert!(tree.add_shape_at_back(root, c));
    assert_eq!(tree.last_child(root), Some(c));
    assert_eq!(tree.first_child(root), Some(b));
}

#[test]
fn test_duplicate_insertion_is_noop() {
    let (mut tree, a, _) = tree_with_two_circles();
    let root = tree.root();
    assert!(!tree.add_shape_at_back(root, a));
    assert!(!tree.add_shape(root, a));
    assert_eq!(tree.children(root).len(), 2);
}

#[test]
fn test_insert_rejects_cycles_and_unknown_ids() {
    let (mut tree, a, _) = tree_with_two_circles();
    let root = tree.root();
    assert!(!tree.add_shape(a, root));
    assert!(!tree.add_shape(a, a));
    assert!(!tree.add_shape(root, 999));

    let inner = tree.create_circle(Vec2::ZERO, 5.0);
    assert!(tree.add_shape(a, inner));
    assert!(!tree.add_shape(inner, a));
}

#[test]
fn test_insert_reparents_and_propagates_attachment() {
    let (mut tree, a, b) = tree_with_two_circles();
    let loose = tree.create_circle(Vec2::ZERO, 5.0);
    let grandchild = tree.create_circle(Vec2::ZERO, 2.0);
    assert!(tree.add_shape(loose, grandchild));
    assert!(!tree.is_attached(loose));
    assert!(!tree.is_attached(grandchild));

    assert!(tree.add_shape(a, loose));
    assert!(tree.is_attached(grandchild));

    assert!(tree.insert_shape(b, 0, loose));
    assert!(tree.children(a).is_empty());
    assert_eq!(tree.get(loose).unwrap().parent(), Some(b));
}

#[test]
fn test_remove_shape_only_direct_children() {
    let (mut tree, a, b) = tree_with_two_circles();
    let root = tree.root();
    let inner = tree.create_circle(Vec2::ZERO, 5.0);
    tree.add_shape(a, inner);

    assert!(!tree.remove_shape(root, inner));
    assert!(!tree.remove_shape(b, a));
    assert!(tree.remove_shape(root, a));
    assert!(!tree.contains(a));
    assert!(!tree.contains(inner));
    assert_eq!(tree.children(root), &[b]);
    assert!(!tree.remove_shape(root, a));
}

// ── Geometrie ──

#[test]
fn test_move_is_rigid_for_descendants() {
    let (mut tree, a, _) = tree_with_two_circles();
    let inner = tree.create_circle(Vec2::new(110.0, 110.0), 5.0);
    tree.add_shape(a, inner);

    tree.move_shape(a, Vec2::new(10.0, -5.0));
    assert_eq!(tree.get(a).unwrap().position(), Vec2::new(110.0, 95.0));
    assert_eq!(tree.get(inner).unwrap().position(), Vec2::new(120.0, 105.0));
    assert_eq!(
        tree.get(a).unwrap().anchors().get(AnchorKey::Top).unwrap().position,
        Vec2::new(110.0, 65.0)
    );
}

#[test]
fn test_move_to_position_moves_subtree_by_delta() {
    let (mut tree, a, _) = tree_with_two_circles();
    let inner = tree.create_circle(Vec2::new(90.0, 100.0), 5.0);
    tree.add_shape(a, inner);

    tree.move_to_position(a, Vec2::new(0.0, 0.0));
    assert_eq!(tree.get(a).unwrap().position(), Vec2::ZERO);
    assert_eq!(tree.get(inner).unwrap().position(), Vec2::new(-10.0, 0.0));
}

#[test]
fn test_bounds_unions_descendants() {
    let (tree, _, _) = tree_with_two_circles();
    let bounds = tree.bounds(tree.root()).unwrap();
    assert_eq!(bounds, Rect::new(70.0, 70.0, 260.0, 60.0));
}

#[test]
fn test_bounds_of_empty_group_is_none() {
    let tree = ShapeTree::new();
    assert!(tree.bounds(tree.root()).is_none());
    assert!(tree.bounds(12345).is_none());
}

#[test]
fn test_hit_test_center_and_outside() {
    let (tree, a, b) = tree_with_two_circles();
    let root = tree.root();
    assert_eq!(tree.hit_test(root, Vec2::new(100.0, 100.0)), Some(a));
    assert_eq!(tree.hit_test(root, Vec2::new(300.0, 100.0)), Some(b));
    assert_eq!(tree.hit_test(root, Vec2::new(200.0, 100.0)), None);
    assert_eq!(tree.hit_test(root, Vec2::new(-500.0, 900.0)), None);
}

#[test]
fn test_hit_test_prefers_front_child_and_nested_child() {
    let mut tree = ShapeTree::new();
    let root = tree.root();
    let back = tree.create_rectangle(Vec2::new(50.0, 50.0), 100.0, 100.0);
    let front = tree.create_rectangle(Vec2::new(60.0, 60.0), 40.0, 40.0);
    tree.add_shape(root, back);
    tree.add_shape(root, front);
    assert_eq!(tree.hit_test(root, Vec2::new(60.0, 60.0)), Some(front));

    let nested = tree.create_circle(Vec2::new(20.0, 20.0), 5.0);
    tree.add_shape(back, nested);
    assert_eq!(tree.hit_test(root, Vec2::new(20.0, 20.0)), Some(nested));
    assert_eq!(tree.hit_test(root, Vec2::new(30.0, 20.0)), Some(back));
}

#[test]
fn test_search_by_text_depth_first() {
    let (mut tree, a, b) = tree_with_two_circles();
    let root = tree.root();
    assert_eq!(tree.search_by_text(root, "start"), None);

    let inner = tree.create_label(Vec2::ZERO, "start");
    tree.add_shape(b, inner);
    tree.set_text(a, "start");
    // b steht vorne in der Kinderliste der Wurzel
    assert_eq!(tree.search_by_text(root, "start"), Some(inner));
}

#[test]
fn test_paint_order_is_back_to_front() {
    let (mut tree, a, b) = tree_with_two_circles();
    let root = tree.root();
    let inner = tree.create_circle(Vec2::ZERO, 5.0);
    tree.add_shape(b, inner);
    assert_eq!(tree.paint_order(root), vec![a, inner, b, root]);
}

#[test]
fn test_resize_rebuilds_anchors() {
    let (mut tree, a, _) = tree_with_two_circles();
    assert!(tree.set_radius(a, 50.0));
    assert_eq!(
        tree.get(a).unwrap().anchors().get(AnchorKey::Right).unwrap().position,
        Vec2::new(150.0, 100.0)
    );
    assert!(!tree.set_size(a, 10.0, 10.0));

    let r = tree.create_rectangle(Vec2::ZERO, 40.0, 40.0);
    assert!(tree.set_size(r, 80.0, 20.0));
    assert_eq!(tree.get(r).unwrap().frame(), Some(Rect::new(-40.0, -10.0, 80.0, 20.0)));
}

#[test]
fn test_bounds_ignore_frameless_label_and_unresolved_link() {
    let (mut tree, a, _) = tree_with_two_circles();
    let group = tree.create(ShapeKind::Group, Vec2::ZERO);
    let circle = tree.create_circle(Vec2::new(500.0, 500.0), 10.0);
    let label = tree.create_label(Vec2::new(500.0, 500.0), "");
    tree.get_mut(label).unwrap().style.text = None;
    let link = tree.create_link(LinkShape {
        source: a,
        target: circle,
        source_anchor_key: AnchorKey::Center,
        target_anchor_key: AnchorKey::Center,
        kind: LinkKind::Arc,
        pattern: String::new(),
        curve: crate::core::link::ArcCurve::new(),
    });
    tree.add_shape(group, circle);
    tree.add_shape(group, label);
    tree.add_shape(group, link);

    assert!(tree.get(label).unwrap().frame().is_none());
    assert!(tree.get(link).unwrap().frame().is_none());
    assert_eq!(tree.bounds(group), Some(Rect::new(490.0, 490.0, 20.0, 20.0)));
}

// ── Drag ──

#[test]
fn test_drag_first_call_has_zero_delta() {
    let (mut tree, a, _) = tree_with_two_circles();
    tree.start_drag(a);
    tree.drag_to(a, Vec2::new(500.0, 500.0));
    assert_eq!(tree.get(a).unwrap().position(), Vec2::new(100.0, 100.0));
    tree.drag_to(a, Vec2::new(510.0, 495.0));
    assert_eq!(tree.get(a).unwrap().position(), Vec2::new(110.0, 95.0));

    tree.start_drag(a);
    tree.drag_to(a, Vec2::ZERO);
    assert_eq!(tree.get(a).unwrap().position(), Vec2::new(110.0, 95.0));
}

// ── Links ──

#[test]
fn test_update_link_requires_attached_endpoints() {
    let mut tree = ShapeTree::new();
    let a = tree.create_circle(Vec2::ZERO, 10.0);
    let b = tree.create_circle(Vec2::new(100.0, 0.0), 10.0);
    let link = LinkShape::default_link(tree.get(a).unwrap(), tree.get(b).unwrap());
    let link_id = tree.create_link(link);
    assert!(tree.update_link(link_id).is_err());
    assert!(tree.update_link(a).is_err());

    let root = tree.root();
    tree.add_shape(root, a);
    tree.add_shape(root, b);
    assert!(tree.update_link(link_id).is_ok());
}

#[test]
fn test_link_follows_moved_endpoint() {
    let (mut tree, a, b) = tree_with_two_circles();
    let link = LinkShape::new(
        tree.get(a).unwrap(),
        AnchorKey::Center,
        tree.get(b).unwrap(),
        AnchorKey::Center,
        LinkKind::Arc,
        "x",
        20.0,
    );
    let link_id = tree.create_link(link);
    let root = tree.root();
    tree.add_shape(root, link_id);

    tree.move_shape(b, Vec2::new(0.0, 100.0));
    let curve = &tree.link(link_id).unwrap().curve;
    assert_eq!(
        curve.end_anchor().unwrap().position,
        Vec2::new(300.0, 200.0)
    );
    let Some(CurveGeometry::Quadratic { end, .. }) = curve.geometry().copied() else {
        panic!("Bogen erwartet");
    };
    // Ende um den Radius zurückgezogen
    assert_relative_eq!(end.distance(Vec2::new(300.0, 200.0)), 30.0, epsilon = 1e-3);
}

#[test]
fn test_self_loop_link_hit_testable_through_tree() {
    let (mut tree, a, _) = tree_with_two_circles();
    let link = LinkShape::default_link(tree.get(a).unwrap(), tree.get(a).unwrap());
    let link_id = tree.create_link(link);
    let root = tree.root();
    tree.add_shape(root, link_id);

    let shape = tree.get(link_id).unwrap();
    assert!(shape.as_link().unwrap().has_loop());
    let Some(CurveGeometry::Cubic { start, .. }) = shape.as_link().unwrap().curve.geometry().copied()
    else {
        panic!("Schleife erwartet");
    };
    assert!(shape.is_inside(start));
    assert_eq!(tree.hit_test(root, start), Some(link_id));
}

#[test]
fn test_removed_endpoint_is_skipped_on_refresh() {
    let (mut tree, a, b) = tree_with_two_circles();
    let link = LinkShape::default_link(tree.get(a).unwrap(), tree.get(b).unwrap());
    let link_id = tree.create_link(link);
    let root = tree.root();
    tree.add_shape(root, link_id);

    let before = tree.link(link_id).unwrap().curve.clone();
    assert!(tree.remove_shape(root, b));
    tree.move_shape(a, Vec2::new(5.0, 5.0));
    assert_eq!(tree.link(link_id).unwrap().curve, before);
    assert!(tree.update_link(link_id).is_err());
}

#[test]
fn test_reshape_link_updates_flatness() {
    let (mut tree, a, b) = tree_with_two_circles();
    let link = LinkShape::default_link(tree.get(a).unwrap(), tree.get(b).unwrap());
    let link_id = tree.create_link(link);
    let root = tree.root();
    tree.add_shape(root, link_id);

    tree.reshape_link(link_id, Vec2::new(200.0, 60.0)).unwrap();
    let curve = &tree.link(link_id).unwrap().curve;
    assert_relative_eq!(curve.flatness(), 80.0, epsilon = 1e-3);
    assert_eq!(curve.direction(), Vec2::new(-100.0, -40.0));
}
