// ABOUTME: Minimal INI document compatible with the classic ConfigParser dialect
// ABOUTME: Ordered sections and options, lowercase keys, continuation lines and comments

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{IniError, StorageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    options: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: String, value: String) {
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
    }
}

/// Sections and options keep insertion order. Option names are case-folded
/// to lowercase on both read and write; section names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a file, decoding it as UTF-8 with lossy replacement
    pub fn load(path: &Path) -> StorageResult<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes))?)
    }

    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut document = Self::new();
        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;
        let mut first_error: Option<IniError> = None;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim_end_matches('\r');

            if line.trim().is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let indented = line.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(key)) = (current, last_key.as_ref()) {
                    let extra = line.trim();
                    if !extra.is_empty() {
                        let options = &mut document.sections[section].options;
                        if let Some((_, value)) = options.iter_mut().find(|(k, _)| k == key) {
                            value.push('\n');
                            value.push_str(extra);
                        }
                    }
                    continue;
                }
            }

            if let Some(name) = parse_header(line) {
                current = Some(document.section_index_or_insert(name));
                last_key = None;
                continue;
            }

            let Some(section) = current else {
                return Err(IniError::MissingSectionHeader { line: line_no });
            };

            match parse_option(line) {
                Some((key, value)) => {
                    document.sections[section].set(key.clone(), value);
                    last_key = Some(key);
                }
                None => {
                    // Keep reading like ConfigParser does, report the first bad line
                    if first_error.is_none() {
                        first_error = Some(IniError::Syntax {
                            line: line_no,
                            text: line.to_string(),
                        });
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(document),
        }
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.section_index(name) {
            Some(i) => i,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_index(name).is_some()
    }

    /// Add an empty section; existing sections are left as they are
    pub fn add_section(&mut self, name: &str) {
        self.section_index_or_insert(name);
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let index = self.section_index(section)?;
        self.sections[index].get(&key.to_lowercase())
    }

    /// Set an option, creating the section when needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key.to_lowercase(), value.into());
    }
}

fn parse_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    let name = &rest[..end];
    (!name.is_empty()).then_some(name)
}

fn parse_option(line: &str) -> Option<(String, String)> {
    let split = line.find([':', '='])?;
    let key = line[..split].trim_end();
    if key.is_empty() || key.starts_with(char::is_whitespace) {
        return None;
    }

    let mut value = line[split + 1..].trim_start();
    // Inline comments need whitespace in front of the semicolon
    if let Some(pos) = value.find(';') {
        if pos > 0 && value[..pos].ends_with(char::is_whitespace) {
            value = &value[..pos];
        }
    }
    let value = value.trim();
    let value = if value == "\"\"" { "" } else { value };

    Some((key.to_lowercase(), value.to_string()))
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.options {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
