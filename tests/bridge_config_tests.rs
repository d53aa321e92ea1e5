use chart_embed::api::{ExportOptions, ModelOverrides, OriginPolicy};
use chart_embed::core::{ChartFamily, SeriesType};
use chart_embed::{BridgeConfig, BridgeError};

#[test]
fn defaults_match_the_embed_contract() {
    let config = BridgeConfig::default();

    assert_eq!(config.family, ChartFamily::Xy);
    assert_eq!(config.overrides.series_type, SeriesType::Line);
    assert_eq!(config.overrides.max_label_length, 7);
    assert_eq!(config.svg_wrapper_class_name, "render-svg-mobile");
    assert_eq!(config.svg_class_name, "rendered-svg-class-name");
    assert!(!config.export.enable_json_export);
    assert_eq!(config.origin_policy, OriginPolicy::AnyOrigin);
    config.validate().expect("defaults are valid");
}

#[test]
fn json_roundtrip_preserves_every_field() {
    let config = BridgeConfig::new(ChartFamily::Chartgrid)
        .with_overrides(ModelOverrides {
            series_type: SeriesType::Area,
            max_label_length: 12,
        })
        .with_svg_wrapper_class_name("embed-svg")
        .with_export_options(ExportOptions {
            enable_json_export: true,
            fallback_file_stem: "figure".to_owned(),
        })
        .with_origin_policy(OriginPolicy::AllowList(vec![
            "https://cms.example".to_owned(),
        ]));

    let text = config.to_json_pretty().expect("serialize");
    assert!(text.contains("\"svgWrapperClassName\": \"embed-svg\""));
    let parsed = BridgeConfig::from_json_str(&text).expect("parse");

    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let parsed = BridgeConfig::from_json_str(r#"{ "family": "chartgrid" }"#).expect("parse");

    assert_eq!(parsed.family, ChartFamily::Chartgrid);
    assert_eq!(parsed.svg_wrapper_class_name, "render-svg-mobile");
    assert_eq!(parsed.export, ExportOptions::default());
}

#[test]
fn validation_rejects_unusable_values() {
    let cases = [
        BridgeConfig::default().with_svg_wrapper_class_name(""),
        BridgeConfig {
            svg_class_name: " ".to_owned(),
            ..BridgeConfig::default()
        },
        BridgeConfig::default().with_overrides(ModelOverrides {
            series_type: SeriesType::Line,
            max_label_length: 0,
        }),
        BridgeConfig::default().with_origin_policy(OriginPolicy::AllowList(Vec::new())),
        BridgeConfig::default().with_export_options(ExportOptions {
            enable_json_export: false,
            fallback_file_stem: String::new(),
        }),
    ];

    for config in cases {
        let err = config.validate().expect_err("invalid config");
        assert!(matches!(err, BridgeError::InvalidConfig(_)), "{err}");
    }
}

#[test]
fn parse_errors_and_invalid_values_are_config_errors() {
    let err = BridgeConfig::from_json_str("{").expect_err("syntax");
    assert!(matches!(err, BridgeError::InvalidConfig(_)));

    let err = BridgeConfig::from_json_str(r#"{ "overrides": { "maxLabelLength": 0 } }"#)
        .expect_err("zero label length");
    assert!(matches!(err, BridgeError::InvalidConfig(_)));
}
