use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::MediumError;

use super::Medium;

/// Extension given to every stored key
const ITEM_EXTENSION: &str = "json";

/// Directory-backed medium: each key is a text file under `<root>/<origin>/`.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileMedium {
    pub fn open(root: impl AsRef<Path>, origin: &str) -> Result<Self, MediumError> {
        validate_key(origin)?;
        let dir = root.as_ref().join(origin);
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(Self { dir, quota: None })
    }

    /// Limit the total size of stored values, in bytes.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, MediumError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, ITEM_EXTENSION)))
    }

    fn used_bytes_excluding(&self, skip: &Path) -> Result<usize, MediumError> {
        let mut total = 0usize;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path == skip {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) == Some(ITEM_EXTENSION) {
                total += entry.metadata()?.len() as usize;
            }
        }
        Ok(total)
    }

    fn ensure_dir(&self) -> Result<(), MediumError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(MediumError::Unavailable(format!(
                "storage directory missing: {}",
                self.dir.display()
            )))
        }
    }
}

fn validate_key(key: &str) -> Result<(), MediumError> {
    let bad = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(MediumError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl Medium for FileMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        self.ensure_dir()?;
        let path = self.item_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        self.ensure_dir()?;
        let path = self.item_path(key)?;
        if let Some(quota) = self.quota {
            let used = self.used_bytes_excluding(&path)?;
            if used + value.len() > quota {
                return Err(MediumError::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }
        std::fs::write(&path, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        self.ensure_dir()?;
        let path = self.item_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
