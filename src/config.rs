//! Shared helpers for loading/saving JSON config files.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{EngineError, Result};

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                info!("[{}] Loaded config from {}", label, path.display());
                config
            }
            Err(e) => {
                warn!(
                    "[{}] Failed to parse config {}: {}, using defaults",
                    label,
                    path.display(),
                    e
                );
                T::default()
            }
        },
        Err(_) => {
            info!(
                "[{}] No config file at {}, using defaults",
                label,
                path.display()
            );
            T::default()
        }
    }
}

/// Generic save for any Serde config type, creating parent directories.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            EngineError::ConfigIo(format!("create {}: {}", parent.display(), e))
        })?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| EngineError::ConfigIo(format!("serialize: {}", e)))?;
    std::fs::write(path, json)
        .map_err(|e| EngineError::ConfigIo(format!("write {}: {}", path.display(), e)))?;
    info!("[{}] Saved config to {}", label, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        retries: u32,
    }

    #[test]
    fn roundtrip_through_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("sample.json");
        let sample = Sample {
            name: "hf".to_string(),
            retries: 3,
        };
        save_json_config(&path, &sample, "Test").unwrap();
        assert_eq!(load_json_config::<Sample>(&path, "Test"), sample);
    }

    #[test]
    fn missing_or_broken_file_yields_default() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        assert_eq!(load_json_config::<Sample>(&missing, "Test"), Sample::default());

        let broken = tmp.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        assert_eq!(load_json_config::<Sample>(&broken, "Test"), Sample::default());
    }

    #[test]
    fn save_into_file_path_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = save_json_config(&blocker.join("sample.json"), &Sample::default(), "Test")
            .unwrap_err();
        assert!(matches!(err, EngineError::ConfigIo(_)));
    }
}
