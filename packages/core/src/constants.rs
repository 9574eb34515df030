// ABOUTME: Base directory and settings file path resolution
// ABOUTME: Honors PROFILEKIT_HOME, then HOME, then the platform home directory

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use profilekit_config::{
    BASE_DIR_NAME, HOME, MACHINE_FILE, PREFERENCES_FILE, PROFILEKIT_HOME, PROFILE_FILE,
};
use tracing::debug;

/// Get the path to the profilekit directory (~/.profilekit)
pub fn base_dir() -> PathBuf {
    resolve_base_dir(env::var(PROFILEKIT_HOME).ok(), env::var(HOME).ok())
}

fn resolve_base_dir(override_dir: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    // HOME first (useful for tests), then the dirs crate for normal usage
    let home = home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(BASE_DIR_NAME)
}

/// Resolve the base directory and create it if it does not exist yet
pub fn ensure_base_dir() -> io::Result<PathBuf> {
    let dir = base_dir();
    create_dir_if_missing(&dir)?;
    Ok(dir)
}

fn create_dir_if_missing(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        debug!("Creating settings directory at {:?}", dir);
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Path of the profile that is loaded on start and saved on exit
pub fn default_profile_path() -> PathBuf {
    base_dir().join(PROFILE_FILE)
}

/// Path of the preferences file (preferences plus every known machine)
pub fn preferences_path() -> PathBuf {
    base_dir().join(PREFERENCES_FILE)
}

/// Path of the single-machine settings file
pub fn machine_settings_path() -> PathBuf {
    base_dir().join(MACHINE_FILE)
}

/// Find other installations next to `base` that carry their own preferences file.
///
/// Both `<parent>/<sibling>` and `<parent>/<sibling>/profilekit` are probed, so
/// settings from an older install can be offered for import.
pub fn alternative_base_paths(base: &Path) -> Vec<PathBuf> {
    let Some(parent) = base.parent() else {
        return Vec::new();
    };
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {:?}: {}", parent, e);
            return Vec::new();
        }
    };

    let mut paths = Vec::new();
    for entry in entries.flatten() {
        let sibling = entry.path();
        for candidate in [sibling.clone(), sibling.join("profilekit")] {
            if candidate.is_dir()
                && candidate.join(PREFERENCES_FILE).is_file()
                && candidate != base
            {
                paths.push(candidate);
            }
        }
    }
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let dir = resolve_base_dir(Some("/opt/pk".to_string()), Some("/home/u".to_string()));
        assert_eq!(dir, PathBuf::from("/opt/pk"));
    }

    #[test]
    fn test_home_is_used_without_override() {
        let dir = resolve_base_dir(None, Some("/home/u".to_string()));
        assert_eq!(dir, PathBuf::from("/home/u").join(BASE_DIR_NAME));

        let dir = resolve_base_dir(Some(String::new()), Some("/home/u".to_string()));
        assert_eq!(dir, PathBuf::from("/home/u").join(BASE_DIR_NAME));
    }

    #[test]
    fn test_create_dir_if_missing() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("a").join(BASE_DIR_NAME);

        create_dir_if_missing(&dir).unwrap();
        assert!(dir.is_dir());
        // existing directory is left alone
        fs::write(dir.join(PREFERENCES_FILE), "[preference]\n").unwrap();
        create_dir_if_missing(&dir).unwrap();
        assert!(dir.join(PREFERENCES_FILE).is_file());

        let file = root.path().join("plain");
        fs::write(&file, "").unwrap();
        assert!(create_dir_if_missing(&file).is_err());
    }

    #[test]
    fn test_alternative_base_paths() {
        let root = TempDir::new().unwrap();
        let current = root.path().join("current");
        let old = root.path().join("old");
        let nested = root.path().join("vendor").join("profilekit");
        let empty = root.path().join("empty");
        for dir in [&current, &old, &nested, &empty] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(current.join(PREFERENCES_FILE), "").unwrap();
        fs::write(old.join(PREFERENCES_FILE), "").unwrap();
        fs::write(nested.join(PREFERENCES_FILE), "").unwrap();

        let found = alternative_base_paths(&current);
        assert_eq!(found, vec![old, nested]);
    }
}
