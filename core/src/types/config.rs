//! FrameKeep settings — storage path, attribute policy, frame ceiling.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which frame attributes capture stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKeyPolicy {
    /// Store no frame attributes at all.
    None,
    /// Store only the listed attribute names, when present.
    Only(Vec<String>),
    /// Store every attribute except the transient exclusions.
    #[default]
    All,
}

impl fmt::Display for FrameKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKeyPolicy::None => write!(f, "none"),
            FrameKeyPolicy::Only(keys) => write!(f, "only [{}]", keys.join(" ")),
            FrameKeyPolicy::All => write!(f, "all"),
        }
    }
}

/// Runtime settings, loaded from `config.yaml` in the FrameKeep config
/// directory. A missing file or missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepSettings {
    /// Storage file for the serialized snapshot.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
    /// Attribute filtering policy applied during capture.
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub store_frame_keys: FrameKeyPolicy,
    /// Ceiling on the number of frames restore will create or reuse.
    #[serde(default = "default_max_frame_num")]
    pub max_frame_num: usize,
}

fn default_snapshot_file() -> PathBuf {
    config_dir().join("frames.json")
}

fn default_max_frame_num() -> usize {
    5
}

impl Default for KeepSettings {
    fn default() -> KeepSettings {
        KeepSettings {
            snapshot_file: default_snapshot_file(),
            store_frame_keys: FrameKeyPolicy::default(),
            max_frame_num: default_max_frame_num(),
        }
    }
}

impl KeepSettings {
    /// Load settings from a YAML file. A missing file yields defaults; an
    /// unparseable file is reported and also yields defaults.
    pub fn from_file(path: &Path) -> KeepSettings {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return KeepSettings::default(),
        };
        match serde_yaml::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable settings file, using defaults");
                KeepSettings::default()
            }
        }
    }

    /// Load from `config.yaml` in the FrameKeep config directory.
    pub fn from_default_path() -> KeepSettings {
        KeepSettings::from_file(&config_dir().join("config.yaml"))
    }
}

/// Per-user configuration directory: `$FKEEP_CONFIG_DIR` when set, else
/// `~/.config/framekeep`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FKEEP_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config").join("framekeep")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = KeepSettings::default();
        assert_eq!(settings.max_frame_num, 5);
        assert_eq!(settings.store_frame_keys, FrameKeyPolicy::All);
        assert!(settings.snapshot_file.ends_with("frames.json"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = KeepSettings::from_file(Path::new("/nonexistent/fkeep/config.yaml"));
        assert_eq!(settings, KeepSettings::default());
    }

    #[test]
    fn yaml_fields_override_defaults() {
        let settings: KeepSettings = serde_yaml::from_str(
            "snapshot_file: /tmp/fk/frames.json\nmax_frame_num: 9\n",
        )
        .unwrap();
        assert_eq!(settings.snapshot_file, PathBuf::from("/tmp/fk/frames.json"));
        assert_eq!(settings.max_frame_num, 9);
        assert_eq!(settings.store_frame_keys, FrameKeyPolicy::All);
    }

    #[test]
    fn policy_parses_all_three_forms() {
        let all: KeepSettings = serde_yaml::from_str("store_frame_keys: all\n").unwrap();
        assert_eq!(all.store_frame_keys, FrameKeyPolicy::All);

        let none: KeepSettings = serde_yaml::from_str("store_frame_keys: none\n").unwrap();
        assert_eq!(none.store_frame_keys, FrameKeyPolicy::None);

        let only: KeepSettings =
            serde_yaml::from_str("store_frame_keys:\n  only:\n    - top\n    - left\n").unwrap();
        assert_eq!(
            only.store_frame_keys,
            FrameKeyPolicy::Only(vec!["top".to_string(), "left".to_string()])
        );
    }

    #[test]
    fn policy_display_is_compact() {
        assert_eq!(FrameKeyPolicy::All.to_string(), "all");
        assert_eq!(FrameKeyPolicy::None.to_string(), "none");
        assert_eq!(
            FrameKeyPolicy::Only(vec!["top".to_string(), "left".to_string()]).to_string(),
            "only [top left]"
        );
    }
}
