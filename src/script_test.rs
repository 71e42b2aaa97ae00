use super::*;

const SINGLE_STROKE: &str = r#"{
    "config": { "width": 400, "height": 200 },
    "events": [
        { "type": "mouse_down", "client_x": 10, "client_y": 10 },
        { "type": "mouse_move", "client_x": 50, "client_y": 50 },
        { "type": "mouse_up", "client_x": 50, "client_y": 50 }
    ]
}"#;

#[test]
fn parses_script_with_defaults() {
    let script = Script::from_json(r#"{ "events": [] }"#).unwrap();
    assert_eq!(script.config, WidgetConfig::default());
    assert_eq!(script.rect, ClientRect::default());
}

#[test]
fn rejects_script_without_events() {
    assert!(Script::from_json("{}").is_err());
}

#[test]
fn replay_single_stroke() {
    let script = Script::from_json(SINGLE_STROKE).unwrap();
    let replay = replay(&script).unwrap();
    assert_eq!(replay.changes.len(), 1);
    assert!(replay.changes[0].starts_with("data:image/png;base64,"));
    assert!(!replay.core.is_empty());
    assert_eq!(replay.core.encoded(), replay.changes[0]);
}

#[test]
fn replay_respects_rect_offset() {
    let json = r#"{
        "rect": { "left": 100, "top": 100 },
        "events": [
            { "type": "touch_start", "changed": [{ "identifier": 1, "client_x": 110, "client_y": 110 }] },
            { "type": "touch_move", "touches": [{ "identifier": 1, "client_x": 150, "client_y": 150 }] },
            { "type": "touch_end", "changed": [{ "identifier": 1, "client_x": 150, "client_y": 150 }] }
        ]
    }"#;
    let replay = replay(&Script::from_json(json).unwrap()).unwrap();
    assert_eq!(replay.changes.len(), 1);
    // Logical (30, 30) on the diagonal from (10, 10) to (50, 50).
    let px = replay.core.surface().pixmap().pixel(30, 30).unwrap();
    assert_eq!(px.alpha(), 255);
}

#[test]
fn replay_disabled_produces_nothing() {
    let json = SINGLE_STROKE.replace(r#""height": 200 }"#, r#""height": 200, "disabled": true }"#);
    let replay = replay(&Script::from_json(&json).unwrap()).unwrap();
    assert!(replay.changes.is_empty());
    assert!(replay.core.is_empty());
}

#[test]
fn replay_second_finger_resting() {
    let json = r#"{
        "events": [
            { "type": "touch_start", "changed": [{ "identifier": 1, "client_x": 20, "client_y": 20 }] },
            { "type": "touch_move", "touches": [
                { "identifier": 7, "client_x": 900, "client_y": 900 },
                { "identifier": 1, "client_x": 80, "client_y": 60 }
            ] },
            { "type": "touch_end",
              "changed": [{ "identifier": 1, "client_x": 80, "client_y": 60 }],
              "touches": [{ "identifier": 7, "client_x": 900, "client_y": 900 }] }
        ]
    }"#;
    let replay = replay(&Script::from_json(json).unwrap()).unwrap();
    assert_eq!(replay.changes.len(), 1);
    assert!(!replay.core.is_drawing());
}
