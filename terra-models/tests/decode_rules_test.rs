use serde_json::{Map, Value, json};
use terra_core::{Catalog, CodecError, FieldValue, ModelExt, ModelType, codec};
use terra_models::v2::activity::Activity;
use terra_models::v2::user::User;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("fixture is an object")
}

#[test]
fn test_unknown_key_with_safe_flag() {
    let catalog = terra_models::catalog();
    let payload = object(json!({"user_id": "u-1", "not_a_field": true}));

    let user = User::decode(&catalog, &payload, true).unwrap();
    assert_eq!(user.user_id.as_str(), Some("u-1"));

    let user = User::decode_api(&payload, true).unwrap();
    assert_eq!(user.user_id.as_str(), Some("u-1"));
}

#[test]
fn test_unknown_key_without_safe_flag() {
    let catalog = terra_models::catalog();
    let payload = object(json!({"user_id": "u-1", "not_a_field": true}));

    let err = User::decode(&catalog, &payload, false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'terra.models.user.User' has no attribute 'not_a_field'"
    );

    assert!(matches!(
        User::decode_api(&payload, false),
        Err(CodecError::MissingAttribute { .. })
    ));
}

#[test]
fn test_populated_scalar_is_not_overwritten() {
    let mut user = User::default();
    user.provider = "GARMIN".into();

    let mut target: Box<dyn terra_core::Model> = Box::new(user);
    let payload = object(json!({"provider": "FITBIT", "user_id": "u-2"}));
    codec::decode_dyn(&terra_models::catalog(), target.as_mut(), &payload, false).unwrap();

    let user = target.downcast_ref::<User>().unwrap();
    assert_eq!(user.provider.as_str(), Some("GARMIN"));
    assert_eq!(user.user_id.as_str(), Some("u-2"));
}

#[test]
fn test_unregistered_element_type_is_assigned_as_is() {
    let payload = object(json!({"distance_samples": [{"timestamp": "t", "distance_meters": 1.0}]}));
    let activity = Activity::decode(&Catalog::new(), &payload, false).unwrap();

    let samples = activity.distance_samples.as_list().unwrap();
    assert!(samples[0].as_map().is_some());
}

#[test]
fn test_list_element_with_unknown_key_fails() {
    let payload = object(json!({"distance_samples": [{"timestamp": "t", "pace": 4.2}]}));

    let err = Activity::decode(&terra_models::catalog(), &payload, true).unwrap_err();
    assert!(matches!(
        err,
        CodecError::MissingAttribute { model: "terra.models.v2.samples.DistanceSample", .. }
    ));
}

#[test]
fn test_nested_model_expects_a_mapping() {
    let payload = object(json!({"metadata": ["not", "a", "mapping"]}));

    let err = Activity::decode(&terra_models::catalog(), &payload, false).unwrap_err();
    assert!(matches!(
        err,
        CodecError::ExpectedMapping { model: "terra.models.v2.activity.Activity", found: "a list", .. }
    ));
}

#[test]
fn test_empty_incoming_list() {
    let payload = object(json!({"distance_samples": [], "device_tags": []}));
    let activity = Activity::decode(&terra_models::catalog(), &payload, false).unwrap();

    assert!(activity.distance_samples.is_empty_list());
    assert!(activity.device_tags.is_empty_list());
}

#[test]
fn test_missing_keys_keep_defaults() {
    let activity = Activity::decode(&terra_models::catalog(), &Map::new(), false).unwrap();

    assert_eq!(activity, Activity::default());
    assert!(activity.calories.is_null());
    assert!(activity.metadata.is_model());
}

#[test]
fn test_reserved_fields_can_be_decoded() {
    let payload = object(json!({"_etag": "v1"}));
    let activity = Activity::decode_api(&payload, false).unwrap();

    assert_eq!(activity._etag.as_str(), Some("v1"));
    assert!(!activity.keys().any(|k| k == "_etag"));
}

#[test]
fn test_opaque_maps_are_not_interpreted() {
    let payload = object(json!({"raw": {"metadata": {"activity_type": "x"}}}));
    let activity = Activity::decode(&terra_models::catalog(), &payload, false).unwrap();

    assert_eq!(
        activity.raw,
        FieldValue::Map(object(json!({"metadata": {"activity_type": "x"}})))
    );
}
