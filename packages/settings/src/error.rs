// ABOUTME: Error types for the settings registry and the compact string codec
// ABOUTME: Registration failures and decode failures that callers must see

use profilekit_config::MAX_MACHINES;
use thiserror::Error;

/// Registry errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Duplicate setting name: {0}")]
    DuplicateName(String),
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
    #[error("Machine index {0} out of range (must be below {max})", max = MAX_MACHINES)]
    MachineOutOfRange(usize),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Compact string decode/encode errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("Decoded payload is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Profile string has no block separator")]
    MissingBlockSeparator,
    #[error("Malformed key/value pair: {0:?}")]
    MalformedPair(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type CodecResult<T> = Result<T, CodecError>;
