use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Abstract persistence interface for the rotation index
pub trait StateStorage {
    /// Return the stored index. If none is stored, returns Ok(None)
    fn load(&self) -> Result<Option<u64>>;
    /// Persist the index, replacing whatever was stored
    fn save(&self, index: u64) -> Result<()>;
}

/// File-based persistence holding a single decimal integer
pub struct FileStateStorage {
    path: PathBuf,
}

impl FileStateStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStateStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStateStorage {
    fn load(&self) -> Result<Option<u64>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).context("Failed to read state file")?;
        let index = content
            .trim()
            .parse::<u64>()
            .with_context(|| format!("State file contains {:?}, not an index", content.trim()))?;
        Ok(Some(index))
    }

    fn save(&self, index: u64) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }
        let mut file = File::create(&self.path).context("Failed to open state file for writing")?;
        file.write_all(index.to_string().as_bytes())
            .context("Failed to write index to state file")?;
        Ok(())
    }
}

/// Reads the last processed index, falling back to 0.
///
/// An absent or unparseable state file is logged as a warning, not an error.
pub fn read_last_index(storage: &dyn StateStorage) -> u64 {
    match storage.load() {
        Ok(Some(index)) => {
            tracing::info!(index, "Last processed index read from state");
            index
        }
        Ok(None) => {
            tracing::warn!("No state stored yet, defaulting to index 0");
            0
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "Could not read state, defaulting to index 0");
            0
        }
    }
}

/// Persists `index` and reports whether it stuck.
///
/// A failure here happens after the issue was already created, so it is
/// logged and swallowed; the next run may then repeat the same file.
pub fn write_last_index(storage: &dyn StateStorage, index: u64) -> bool {
    match storage.save(index) {
        Ok(()) => {
            tracing::info!(index, "State updated");
            true
        }
        Err(err) => {
            tracing::error!(index, error = %format!("{err:#}"), "Failed to write state");
            false
        }
    }
}
