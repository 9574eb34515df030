// ABOUTME: Error types for settings file persistence
// ABOUTME: I/O failures on save and INI syntax errors

use thiserror::Error;

/// INI syntax errors, reported with 1-based line numbers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: option found before any section header")]
    MissingSectionHeader { line: usize },
    #[error("line {line}: cannot parse {text:?}")]
    Syntax { line: usize, text: String },
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Ini(#[from] IniError),
}

pub type StorageResult<T> = Result<T, StorageError>;
