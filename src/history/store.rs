use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Keyed whole-file JSON store. Each key lives in `<dir>/<key>.json`.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

        Ok(Self { dir })
    }

    /// Load a value; a missing file is `None`
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.path_for(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        debug!("Loaded {}", file_path.display());
        Ok(Some(data))
    }

    /// Rewrite the whole file for `key`. The new content goes to a uniquely
    /// named file in the same directory, which is then renamed over the target.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.path_for(key);

        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;

        let mut temp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to create temp file in {}", self.dir.display()))?;
        temp.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", temp.path().display()))?;
        temp.persist(&file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Saved {}", file_path.display());
        Ok(())
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
