// Seen-alert storage: a JSON array of alert IDs in a single file.
//
// Loads are forgiving: a missing, unreadable, or corrupt file is an empty
// set (with a warning for the latter two) so a bad file can't wedge every
// future run. Saves go through a temp file + rename so a crash mid-write
// leaves the previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::SeenSet;

/// File name used under the platform data directory.
const SEEN_FILE_NAME: &str = "seen_alerts.json";

/// Returns the default seen-file location.
/// Uses the platform data directory: ~/.local/share/hamsalert/ on Linux.
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hamsalert")
        .join(SEEN_FILE_NAME)
}

/// Storage port for the seen set.
pub trait SeenStore {
    /// Load the previously-notified IDs. Never fails; see module docs.
    fn load(&self) -> SeenSet;

    /// Replace the stored set with `seen`.
    fn save(&self, seen: &SeenSet) -> Result<()>;
}

/// Seen set persisted as a JSON array in one file.
pub struct FileSeenStore {
    path: PathBuf,
    reset_mode: bool,
}

impl FileSeenStore {
    /// `reset_mode` makes every load return an empty set, regardless of
    /// what's on disk. The next save then overwrites the file.
    pub fn new(path: impl Into<PathBuf>, reset_mode: bool) -> Self {
        Self {
            path: path.into(),
            reset_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file as-is, ignoring reset mode. Used by `status`.
    pub fn read_persisted(&self) -> Result<Option<SeenSet>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let seen = serde_json::from_str(&text)
            .with_context(|| format!("Malformed seen-alerts file {}", self.path.display()))?;
        Ok(Some(seen))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SEEN_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SeenStore for FileSeenStore {
    fn load(&self) -> SeenSet {
        if self.reset_mode {
            info!("RESET MODE: ignoring previously seen alerts");
            return SeenSet::new();
        }

        match self.read_persisted() {
            Ok(Some(seen)) => {
                debug!(count = seen.len(), path = %self.path.display(), "Loaded seen alerts");
                seen
            }
            Ok(None) => SeenSet::new(),
            Err(e) => {
                let chain = format!("{e:#}");
                warn!(error = %chain, "Treating seen-alerts file as empty");
                SeenSet::new()
            }
        }
    }

    fn save(&self, seen: &SeenSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string(seen).context("Failed to encode seen alerts")?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!(
                "Failed to move {} into place at {}",
                tmp.display(),
                self.path.display()
            )
        })?;

        debug!(count = seen.len(), path = %self.path.display(), "Saved seen alerts");
        Ok(())
    }
}
