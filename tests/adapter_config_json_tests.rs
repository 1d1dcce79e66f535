use chart_view::api::AdapterConfig;
use chart_view::core::{Dimension, RendererKind, Theme};
use chart_view::{ChartError, ErrorPolicy};

#[test]
fn empty_json_yields_engine_defaults() {
    let config = AdapterConfig::from_json_str("{}").expect("parse defaults");

    assert!(config.auto_resize);
    assert_eq!(config.renderer, RendererKind::Canvas);
    assert_eq!(config.theme, Theme::named("default"));
    assert_eq!(config.width, Dimension::Auto);
    assert_eq!(config.height, Dimension::Auto);
    assert_eq!(config.error_policy, ErrorPolicy::LogAndContinue);
    assert_eq!(config, AdapterConfig::default());
}

#[test]
fn explicit_fields_are_honored() {
    let config = AdapterConfig::from_json_str(
        r#"{
            "auto_resize": false,
            "renderer": "svg",
            "theme": {"backgroundColor": "black"},
            "width": 500,
            "height": "auto",
            "error_policy": "propagate"
        }"#,
    )
    .expect("parse config");

    assert!(!config.auto_resize);
    assert_eq!(config.renderer, RendererKind::Svg);
    assert!(matches!(config.theme, Theme::Custom(_)));
    assert_eq!(config.width, Dimension::Pixels(500));
    assert_eq!(config.height, Dimension::Auto);
    assert_eq!(config.error_policy, ErrorPolicy::Propagate);

    let restored =
        AdapterConfig::from_json_str(&config.to_json_pretty().expect("serialize")).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn unknown_dimension_keyword_is_invalid_data() {
    let result = AdapterConfig::from_json_str(r#"{"width": "fill"}"#);

    assert!(matches!(result, Err(ChartError::InvalidData(message)) if message.contains("adapter config")));
}
