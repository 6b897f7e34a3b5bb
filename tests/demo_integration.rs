//! Integration tests: the Game walkthrough and demo configuration.

use laminate::config::{DemoConfig, LaminateConfig};
use laminate::demo::{self, Demo};
use laminate::{CapabilityModule, Error, LayerOptions};
use serde_json::json;

fn layers(names: &[&str], combined: bool) -> DemoConfig {
    DemoConfig {
        id: 123,
        layers: names.iter().map(|s| s.to_string()).collect(),
        combined,
    }
}

// ===========================================================================
// Game walkthrough
// ===========================================================================

#[test]
fn chained_layers_report() {
    let demo = Demo::new().unwrap();
    let game = demo.load(&DemoConfig::default(), &LayerOptions::default()).unwrap();
    assert_eq!(
        demo::report(&game).unwrap(),
        vec![
            "Game::WithLpis::WithBrainAreas",
            "123",
            "some_game_data",
            "some_lpi_data",
            "some_brain_area_data",
        ]
    );
}

#[test]
fn combined_layer_report() {
    let demo = Demo::new().unwrap();
    let game = demo
        .load(&layers(&["Lpis", "BrainAreas"], true), &LayerOptions::default())
        .unwrap();
    let report = demo::report(&game).unwrap();
    assert_eq!(report[0], "Game::WithLpisAndBrainAreas");
    assert_eq!(report.len(), 5);
}

#[test]
fn no_layers_reports_plain_record() {
    let demo = Demo::new().unwrap();
    let game = demo.load(&layers(&[], false), &LayerOptions::default()).unwrap();
    assert_eq!(demo::report(&game).unwrap(), vec!["Game", "123", "some_game_data"]);
}

#[test]
fn repeated_loads_share_wrapper_types() {
    let demo = Demo::new().unwrap();
    let a = demo.load(&DemoConfig::default(), &LayerOptions::default()).unwrap();
    let b = demo.load(&DemoConfig::default(), &LayerOptions::default()).unwrap();
    assert_eq!(a.type_ref(), b.type_ref());
    assert_eq!(demo.game().composer().cache().len(), 1);
}

#[test]
fn unknown_layer_is_invalid_argument() {
    let demo = Demo::new().unwrap();
    let err = demo
        .load(&layers(&["Lpis", "Hippocampus"], false), &LayerOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("Hippocampus"));
}

#[test]
fn overriding_layer_needs_opt_in() {
    let mut demo = Demo::new().unwrap();
    demo.registry_mut().register(
        CapabilityModule::builder("Cached")
            .method("get_some_game_data", |_, _| Ok(json!("cached_game_data")))
            .build()
            .unwrap(),
    );
    let config = layers(&["Cached"], false);

    let err = demo.load(&config, &LayerOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Collision { .. }));
    assert!(err.to_string().contains("`#get_some_game_data' is already defined by Game"));

    let game = demo.load(&config, &LayerOptions::allow_overrides()).unwrap();
    assert_eq!(game.invoke("get_some_game_data").unwrap(), json!("cached_game_data"));
    assert_eq!(demo.find(123).invoke("get_some_game_data").unwrap(), json!("some_game_data"));
}

// ===========================================================================
// Configuration
// ===========================================================================

#[test]
fn config_defaults() {
    let config = LaminateConfig::default();
    assert!(!config.layer.allow_overrides);
    assert_eq!(config.demo.id, 123);
    assert_eq!(config.demo.layers, vec!["Lpis", "BrainAreas"]);
    assert!(!config.demo.combined);
}

#[test]
fn config_parses_toml() {
    let config = LaminateConfig::from_toml_str(
        r#"
[layer]
allow_overrides = true

[demo]
id = 7
layers = ["BrainAreas"]
combined = true
"#,
    )
    .unwrap();
    assert!(config.layer.allow_overrides);
    assert_eq!(config.demo.id, 7);
    assert_eq!(config.demo.layers, vec!["BrainAreas"]);
    assert!(config.demo.combined);
}

#[test]
fn config_partial_sections_use_defaults() {
    let config = LaminateConfig::from_toml_str("[demo]\nid = 9\n").unwrap();
    assert_eq!(config.demo.id, 9);
    assert_eq!(config.demo.layers, vec!["Lpis", "BrainAreas"]);
    assert!(!config.layer.allow_overrides);
}

#[test]
fn config_unknown_layer_option_is_unsupported() {
    let err = LaminateConfig::from_toml_str("[layer]\nstrategy = \"prepend\"\n").unwrap_err();
    let err = err.downcast_ref::<Error>().expect("laminate error");
    assert!(err.is_unsupported());
}

#[test]
fn config_dump_round_trips() {
    let dumped = LaminateConfig::default().to_toml().unwrap();
    let parsed = LaminateConfig::from_toml_str(&dumped).unwrap();
    assert_eq!(parsed.demo.layers, LaminateConfig::default().demo.layers);
    assert_eq!(parsed.layer, LayerOptions::default());
}

#[test]
fn config_load_from_file_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laminate.toml");

    let missing = LaminateConfig::load(&path).unwrap();
    assert_eq!(missing.demo.id, 123);

    std::fs::write(&path, "[demo]\nid = 42\n").unwrap();
    let loaded = LaminateConfig::load(&path).unwrap();
    assert_eq!(loaded.demo.id, 42);
}
