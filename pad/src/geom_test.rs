#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(2.0, 1.0));
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap_or_default();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- ClientRect ---

#[test]
fn to_local_subtracts_origin() {
    let rect = ClientRect::new(100.0, 50.0);
    assert_eq!(rect.to_local(110.0, 60.0), Point::new(10.0, 10.0));
}

#[test]
fn to_local_at_origin_is_identity() {
    let rect = ClientRect::default();
    assert_eq!(rect.to_local(12.5, 7.25), Point::new(12.5, 7.25));
}

#[test]
fn to_local_does_not_clamp() {
    let rect = ClientRect::new(100.0, 50.0);
    let p = rect.to_local(90.0, 300.0);
    assert_eq!(p, Point::new(-10.0, 250.0));
}

#[test]
fn client_rect_ignores_size_fields() {
    let rect: ClientRect =
        serde_json::from_str(r#"{ "left": 4, "top": 8, "width": 400, "height": 200 }"#).unwrap();
    assert_eq!(rect, ClientRect::new(4.0, 8.0));
}

// --- PixelRect ---

#[test]
fn pixel_rect_edges_and_area() {
    let r = PixelRect::new(10, 20, 30, 5);
    assert_eq!(r.right(), 40);
    assert_eq!(r.bottom(), 25);
    assert_eq!(r.area(), 150);
}

#[test]
fn pixel_rect_union_covers_both() {
    let a = PixelRect::new(10, 10, 10, 10);
    let b = PixelRect::new(15, 5, 20, 8);
    assert_eq!(a.union(b), PixelRect::new(10, 5, 25, 15));
    assert_eq!(b.union(a), a.union(b));
}

#[test]
fn pixel_rect_union_with_contained_is_identity() {
    let outer = PixelRect::new(0, 0, 100, 50);
    assert_eq!(outer.union(PixelRect::new(10, 10, 5, 5)), outer);
}
