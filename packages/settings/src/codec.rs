// ABOUTME: Compact, shareable encoding of profile and preference settings
// ABOUTME: name=value pairs joined by control bytes, zlib-compressed, base64-encoded

//! Wire format:
//!
//! - preferences: `pref=value` pairs joined by `0x08`
//! - profile: profile pairs joined by `0x08`, then `0x0C`, then "alt" pairs
//!   joined by `0x08`
//!
//! The text is UTF-8 encoded, zlib-compressed and base64-encoded. Values are
//! not escaped, so a value containing `0x08` or `0x0C` does not survive a round
//! trip.

use profilekit_core::{compress_data, decode_transport, decompress_data, encode_transport};
use tracing::{debug, info};

use crate::error::{CodecError, CodecResult};
use crate::registry::Registry;
use crate::setting::Setting;

pub const PAIR_SEPARATOR: char = '\x08';
pub const BLOCK_SEPARATOR: char = '\x0c';

/// Encode every profile setting of the current instance
pub fn profile_string(registry: &Registry) -> CodecResult<String> {
    let profile = join_pairs(registry, |s| s.is_profile());
    // The alt block carries extra pairs; nothing populates it yet.
    let alt = String::new();
    encode(&format!("{}{}{}", profile, BLOCK_SEPARATOR, alt))
}

/// Encode every preference
pub fn preferences_string(registry: &Registry) -> CodecResult<String> {
    encode(&join_pairs(registry, |s| s.is_preference()))
}

/// Apply a string produced by [`profile_string`].
///
/// Pairs in the primary block only touch profile settings; pairs in the alt
/// block may touch any known setting. Unknown names are skipped. The input is
/// fully decoded and parsed before anything is written, so an error leaves the
/// registry untouched. Returns the number of values written.
pub fn set_profile_from_string(registry: &mut Registry, text: &str) -> CodecResult<usize> {
    let payload = decode(text)?;
    let (profile, alt) = payload
        .split_once(BLOCK_SEPARATOR)
        .ok_or(CodecError::MissingBlockSeparator)?;
    let profile_pairs = parse_pairs(profile)?;
    let alt_pairs = parse_pairs(alt)?;

    let mut applied = 0;
    for (name, value) in profile_pairs {
        if registry.setting(name).is_some_and(|s| s.is_profile()) {
            registry.set_value(name, value)?;
            applied += 1;
        } else {
            debug!("Skipping {} from profile block", name);
        }
    }
    for (name, value) in alt_pairs {
        if registry.contains(name) {
            registry.set_value(name, value)?;
            applied += 1;
        } else {
            debug!("Skipping unknown {} from alt block", name);
        }
    }

    info!("Applied {} values from profile string", applied);
    Ok(applied)
}

fn join_pairs(registry: &Registry, include: impl Fn(&Setting) -> bool) -> String {
    let current = registry.current_index();
    registry
        .iter()
        .filter(|s| include(*s))
        .map(|s| format!("{}={}", s.name(), s.value_at(s.index_for(current))))
        .collect::<Vec<_>>()
        .join(&PAIR_SEPARATOR.to_string())
}

fn parse_pairs(block: &str) -> CodecResult<Vec<(&str, &str)>> {
    block
        .split(PAIR_SEPARATOR)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| CodecError::MalformedPair(pair.to_string()))
        })
        .collect()
}

fn encode(payload: &str) -> CodecResult<String> {
    let compressed = compress_data(payload.as_bytes()).map_err(CodecError::Compression)?;
    Ok(encode_transport(&compressed))
}

fn decode(text: &str) -> CodecResult<String> {
    let compressed = decode_transport(text)?;
    let raw = decompress_data(&compressed).map_err(CodecError::Compression)?;
    Ok(String::from_utf8(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;
    use pretty_assertions::assert_eq;

    fn registry() -> Registry {
        let mut registry = Registry::with_defaults().unwrap();
        registry
            .register(Setting::new("laser_threshold", 120, ValueType::Int, "advanced", "Laser"))
            .unwrap();
        registry
    }

    #[test]
    fn test_profile_payload_layout() {
        let mut registry = registry();
        registry.set_value("step_delay", 900).unwrap();

        let encoded = profile_string(&registry).unwrap();
        let payload = decode(&encoded).unwrap();
        assert_eq!(
            payload,
            "step_degrees=0.45\x08step_delay=900\x08laser_threshold=120\x0c"
        );
    }

    #[test]
    fn test_preferences_payload_layout() {
        let registry = registry();
        let payload = decode(&preferences_string(&registry).unwrap()).unwrap();
        assert_eq!(payload, "language=English");
    }

    #[test]
    fn test_parse_pairs_splits_on_first_equals() {
        let pairs = parse_pairs("a=b=c\x08\x08d=").unwrap();
        assert_eq!(pairs, vec![("a", "b=c"), ("d", "")]);
    }

    #[test]
    fn test_parse_pairs_rejects_missing_equals() {
        let err = parse_pairs("a=1\x08broken").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPair(p) if p == "broken"));
    }

    #[test]
    fn test_encoding_uses_current_instance() {
        let mut registry = registry();
        registry.select_machine(1).unwrap();
        registry.set_value("step_delay", 1500).unwrap();

        let payload = decode(&profile_string(&registry).unwrap()).unwrap();
        assert!(payload.contains("step_delay=1500"));

        registry.select_machine(0).unwrap();
        let payload = decode(&profile_string(&registry).unwrap()).unwrap();
        assert!(payload.contains("step_delay=800"));
    }
}
