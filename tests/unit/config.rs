use super::*;

#[test]
fn empty_objects_take_stock_defaults() {
    let cfg = SceneConfig::from_json_str(r#"{ "field": { "ambient": {} } }"#).unwrap();
    assert_eq!(cfg.seed, 0);
    assert_eq!(cfg.field, FieldConfig::Ambient(AmbientConfig::default()));

    let cfg = SceneConfig::from_json_str(r#"{ "seed": 9, "field": { "text": {} } }"#).unwrap();
    let FieldConfig::Text(t) = cfg.field else {
        panic!("expected text field");
    };
    assert_eq!(t.text, "N");
    assert_eq!(t.stride, 6);
    assert_eq!(t.layers.count, 6);
    assert_eq!(t.explosion.speed, 15.0);
}

#[test]
fn nested_overrides_keep_sibling_defaults() {
    let json = r##"{
        "field": { "ambient": { "color": "#00ff00", "links": { "enabled": false } } }
    }"##;
    let cfg = SceneConfig::from_json_str(json).unwrap();
    let FieldConfig::Ambient(a) = cfg.field else {
        panic!("expected ambient field");
    };
    assert!(!a.links.enabled);
    assert_eq!(a.links.fade_dist_sq, 20_000.0);
    assert_eq!(a.color.to_rgba8().g, 255);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SceneConfig::from_json_str(r#"{ "field": { "ambient": { "densty": 1 } } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn out_of_range_values_fail_validation() {
    for json in [
        r#"{ "field": { "ambient": { "density_area": 0 } } }"#,
        r#"{ "field": { "ambient": { "links": { "range_divisor": -1 } } } }"#,
        r#"{ "field": { "text": { "stride": 0 } } }"#,
        r#"{ "field": { "text": { "ease": 0 } } }"#,
        r#"{ "field": { "text": { "ease": 1.5 } } }"#,
        r#"{ "field": { "text": { "text": "  " } } }"#,
        r#"{ "field": { "text": { "layers": { "count": 0 } } } }"#,
        r#"{ "field": { "text": { "layers": { "density": 1.2 } } } }"#,
        r#"{ "field": { "text": { "explosion": { "scroll_scale": 0 } } } }"#,
    ] {
        let err = SceneConfig::from_json_str(json).unwrap_err();
        assert!(
            err.to_string().contains("validation error:"),
            "{json}: {err}"
        );
    }
}

#[test]
fn stock_configs_validate() {
    AmbientConfig::default().validate().unwrap();
    TextConfig::default().validate().unwrap();
}
