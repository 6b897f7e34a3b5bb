//! Tests for laminate-core: error taxonomy, collisions, layer options

use laminate_core::*;
use serde_json::json;

// ===========================================================================
// Error taxonomy
// ===========================================================================

#[test]
fn invalid_argument_display() {
    let err = Error::invalid_argument("layers must all be modules");
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "invalid argument: layers must all be modules");
}

#[test]
fn unsupported_configuration_is_distinct() {
    let err = Error::unsupported("strategy `weave`");
    assert!(err.is_unsupported());
    assert!(!err.is_invalid_argument());
    assert!(!err.is_collision());
}

#[test]
fn no_method_display() {
    let err = Error::no_method("Person::WithRunner", "fly");
    assert!(err.is_no_method());
    assert_eq!(err.to_string(), "undefined method `fly' for Person::WithRunner");
}

#[test]
fn method_error_display() {
    let err = Error::method("run", "out of breath");
    assert_eq!(err.to_string(), "method error: run - out of breath");
}

#[test]
fn json_error_converts() {
    let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
    let err: Error = bad.unwrap_err().into();
    assert!(matches!(err, Error::JsonError(_)));
}

// ===========================================================================
// Collision errors
// ===========================================================================

#[test]
fn single_collision_message() {
    let err = Error::Collision { collisions: vec![Collision::new("jog", "Person")] };
    assert!(err.is_collision());
    assert_eq!(
        err.to_string(),
        "Unable to add layer (pass `allow_overrides: true` if intentional):\n  `#jog' is already defined by Person"
    );
}

#[test]
fn multiple_collisions_listed_together() {
    let err = Error::Collision {
        collisions: vec![Collision::new("jog", "Person"), Collision::new("run", "Runner")],
    };
    let msg = err.to_string();
    assert!(msg.starts_with("Unable to add layers"));
    assert!(msg.contains("`#jog' is already defined by Person"));
    assert!(msg.contains("`#run' is already defined by Runner"));
    assert_eq!(err.collisions().len(), 2);
}

#[test]
fn collisions_empty_for_other_kinds() {
    assert!(Error::invalid_argument("x").collisions().is_empty());
}

#[test]
fn collision_display() {
    assert_eq!(Collision::new("run", "Runner").to_string(), "#run (Runner)");
}

// ===========================================================================
// Reserved names
// ===========================================================================

#[test]
fn reserved_names() {
    assert!(is_reserved("with_layer"));
    assert!(is_reserved("with_layers"));
    assert!(!is_reserved("run"));
}

// ===========================================================================
// LayerOptions
// ===========================================================================

#[test]
fn options_default_disallows_overrides() {
    assert!(!LayerOptions::default().allow_overrides);
    assert!(LayerOptions::allow_overrides().allow_overrides);
}

#[test]
fn options_from_json() {
    let opts = LayerOptions::from_value(json!({"allow_overrides": true})).unwrap();
    assert!(opts.allow_overrides);
    let opts = LayerOptions::from_value(json!({})).unwrap();
    assert!(!opts.allow_overrides);
    let opts = LayerOptions::from_value(serde_json::Value::Null).unwrap();
    assert_eq!(opts, LayerOptions::new());
}

#[test]
fn options_unknown_key_is_unsupported() {
    let err = LayerOptions::from_value(json!({"strategy": "prepend"})).unwrap_err();
    assert!(err.is_unsupported(), "got {err}");
}

#[test]
fn options_wrong_type_is_unsupported() {
    let err = LayerOptions::from_value(json!({"allow_overrides": "yes"})).unwrap_err();
    assert!(err.is_unsupported());
}
