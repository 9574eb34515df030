// ABOUTME: Integration tests for compact profile and preference strings
// ABOUTME: Round trips, block routing, and failure without side effects

use pretty_assertions::assert_eq;
use profilekit_core::{compress_data, encode_transport, insert_newlines};
use profilekit_settings::{
    preferences_string, profile_string, set_profile_from_string, CodecError, Registry, Setting,
    ValueType,
};

fn registry() -> Registry {
    let mut registry = Registry::with_defaults().unwrap();
    registry
        .register(Setting::new("scan_name", "untitled", ValueType::Str, "basic", "Output"))
        .unwrap();
    registry
}

/// Build a transport string from a raw payload
fn pack(payload: &str) -> String {
    encode_transport(&compress_data(payload.as_bytes()).unwrap())
}

fn snapshot(registry: &Registry) -> Vec<(String, String)> {
    registry
        .iter()
        .map(|s| (s.name().to_string(), registry.value(s.name()).unwrap().to_string()))
        .collect()
}

#[test]
fn test_profile_round_trip() {
    let mut source = registry();
    source.put_profile_setting("step_degrees", "0.9");
    source.put_profile_setting("step_delay", 1200);
    source.put_profile_setting("scan_name", "owl = statue");

    let encoded = profile_string(&source).unwrap();

    let mut target = registry();
    let applied = set_profile_from_string(&mut target, &encoded).unwrap();

    assert_eq!(applied, 3);
    assert_eq!(target.profile_setting("step_degrees"), "0.9");
    assert_eq!(target.profile_setting("step_delay"), "1200");
    assert_eq!(target.profile_setting("scan_name"), "owl = statue");
}

#[test]
fn test_profile_string_excludes_other_categories() {
    let mut source = registry();
    source.put_preference("language", "French");
    source.put_machine_setting("machine_name", "Ciclop");

    let mut target = registry();
    set_profile_from_string(&mut target, &profile_string(&source).unwrap()).unwrap();

    assert_eq!(target.preference("language"), "English");
    assert_eq!(target.machine_setting("machine_name", None), "");
}

#[test]
fn test_wrapped_string_decodes() {
    let mut source = registry();
    source.put_profile_setting("step_delay", 640);
    let wrapped = insert_newlines(&profile_string(&source).unwrap(), 8);

    let mut target = registry();
    set_profile_from_string(&mut target, &wrapped).unwrap();
    assert_eq!(target.profile_setting("step_delay"), "640");
}

#[test]
fn test_primary_block_only_touches_profile_settings() {
    let mut target = registry();
    let encoded = pack("language=German\x08machine_name=Rogue\x08step_delay=300\x0c");

    let applied = set_profile_from_string(&mut target, &encoded).unwrap();

    assert_eq!(applied, 1);
    assert_eq!(target.preference("language"), "English");
    assert_eq!(target.machine_setting("machine_name", None), "");
    assert_eq!(target.profile_setting("step_delay"), "300");
}

#[test]
fn test_alt_block_touches_any_known_setting() {
    let mut target = registry();
    let encoded = pack("\x0clanguage=German\x08machine_name=Ciclop\x08bogus=1");

    let applied = set_profile_from_string(&mut target, &encoded).unwrap();

    assert_eq!(applied, 2);
    assert_eq!(target.preference("language"), "German");
    assert_eq!(target.machine_setting("machine_name", None), "Ciclop");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut target = registry();
    let encoded = pack("no_such_setting=1\x08step_delay=450\x0c");
    assert_eq!(set_profile_from_string(&mut target, &encoded).unwrap(), 1);
    assert_eq!(target.profile_setting("step_delay"), "450");
}

#[test]
fn test_missing_block_separator_fails_without_side_effects() {
    let mut target = registry();
    let before = snapshot(&target);
    let encoded = pack("step_delay=300\x08step_degrees=0.9");

    let err = set_profile_from_string(&mut target, &encoded).unwrap_err();

    assert!(matches!(err, CodecError::MissingBlockSeparator));
    assert_eq!(snapshot(&target), before);
}

#[test]
fn test_malformed_pair_fails_without_side_effects() {
    let mut target = registry();
    let before = snapshot(&target);
    let encoded = pack("step_delay=300\x08garbage\x0c");

    let err = set_profile_from_string(&mut target, &encoded).unwrap_err();

    assert!(matches!(err, CodecError::MalformedPair(_)));
    assert_eq!(snapshot(&target), before);
}

#[test]
fn test_bad_transport_is_reported() {
    let mut target = registry();
    assert!(matches!(
        set_profile_from_string(&mut target, "!!not base64!!"),
        Err(CodecError::Base64(_))
    ));
    assert!(matches!(
        set_profile_from_string(&mut target, &encode_transport(b"plain bytes")),
        Err(CodecError::Compression(_))
    ));
}

#[test]
fn test_preferences_string_holds_only_preferences() {
    let mut registry = registry();
    registry.put_preference("language", "Spanish");
    let encoded = preferences_string(&registry).unwrap();

    // A preferences string has no block separator, so it is not a profile string
    let mut target = Registry::with_defaults().unwrap();
    assert!(matches!(
        set_profile_from_string(&mut target, &encoded),
        Err(CodecError::MissingBlockSeparator)
    ));
}
