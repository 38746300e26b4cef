use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Chrome user-data directory for a shopping session.
///
/// A named profile keeps the shop's login cookies between runs; a
/// temporary one is removed when dropped.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    pub fn temporary() -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("courses-profile-")
            .tempdir()?
            .keep();

        tracing::debug!("Using temporary profile at {}", path.display());

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// Profile stored under `~/.courses/profiles/<name>`
    pub fn named(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(Error::Browser(format!("Invalid profile name: '{}'", name)));
        }

        let path = Self::profiles_root()?.join(name);
        Self::persistent(path)
    }

    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
            tracing::info!("Created profile directory {}", path.display());
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn profiles_root() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Browser("Could not determine home directory".to_string()))?;
        Ok(home.join(".courses").join("profiles"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
