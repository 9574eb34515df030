// ABOUTME: Configuration constants shared by all profilekit packages
// ABOUTME: Environment variable names, settings file names and INI section names

pub mod constants;

pub use constants::*;
