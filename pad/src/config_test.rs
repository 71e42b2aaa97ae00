#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_is_400_by_200_enabled_blank() {
    let c = WidgetConfig::default();
    assert_eq!(c.width, 400.0);
    assert_eq!(c.height, 200.0);
    assert!(c.initial_value.is_empty());
    assert!(!c.disabled);
    assert_eq!(c.device_pixel_ratio, 1.0);
}

#[test]
fn from_json_empty_object_is_default() {
    let c = WidgetConfig::from_json("{}").unwrap();
    assert_eq!(c, WidgetConfig::default());
}

#[test]
fn from_json_reads_camel_case() {
    let c = WidgetConfig::from_json(
        r#"{"width":320,"height":120,"initialValue":"data:image/png;base64,AAAA","disabled":true,"devicePixelRatio":2}"#,
    )
    .unwrap();
    assert_eq!(c.width, 320.0);
    assert_eq!(c.height, 120.0);
    assert_eq!(c.initial_value, "data:image/png;base64,AAAA");
    assert!(c.disabled);
    assert_eq!(c.device_pixel_ratio, 2.0);
}

#[test]
fn from_json_rejects_mistyped_field() {
    assert!(WidgetConfig::from_json(r#"{"width":"wide"}"#).is_err());
}

#[test]
fn builders_set_fields() {
    let c = WidgetConfig::default()
        .with_size(10.0, 20.0)
        .with_initial_value("x")
        .with_disabled(true)
        .with_dpr(3.0);
    assert_eq!((c.width, c.height), (10.0, 20.0));
    assert_eq!(c.initial_value, "x");
    assert!(c.disabled);
    assert_eq!(c.device_pixel_ratio, 3.0);
}

#[test]
fn sanitized_replaces_unusable_values() {
    let c = WidgetConfig::default()
        .with_size(0.0, f64::NAN)
        .with_dpr(-1.0)
        .sanitized();
    assert_eq!(c.width, 400.0);
    assert_eq!(c.height, 200.0);
    assert_eq!(c.device_pixel_ratio, 1.0);
}

#[test]
fn sanitized_keeps_usable_values() {
    let c = WidgetConfig::default().with_size(123.0, 45.0).with_dpr(1.5).sanitized();
    assert_eq!((c.width, c.height, c.device_pixel_ratio), (123.0, 45.0, 1.5));
}
