//! Name and path the auto-start entry is registered under.

use std::path::{Path, PathBuf};

use crate::error::NudgeError;

/// The running application as the run-at-login list should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    name: String,
    path: PathBuf,
}

impl AppIdentity {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Identity of the current executable: its file stem and full path.
    pub fn current() -> Result<Self, NudgeError> {
        let path = std::env::current_exe()?;
        Self::from_executable(path)
    }

    /// Identity derived from an executable path.
    pub fn from_executable(path: impl Into<PathBuf>) -> Result<Self, NudgeError> {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("executable path {} has no file name", path.display()))?;
        Ok(Self { name, path })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_file_stem() {
        let id = AppIdentity::from_executable(r"C:\Tools\display-nudge.exe").unwrap();
        // Backslashes are only separators on Windows.
        if cfg!(windows) {
            assert_eq!(id.name(), "display-nudge");
        }
        let id = AppIdentity::from_executable("/opt/tools/display-nudge").unwrap();
        assert_eq!(id.name(), "display-nudge");
        assert_eq!(id.path(), Path::new("/opt/tools/display-nudge"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(AppIdentity::from_executable("").is_err());
    }

    #[test]
    fn current_executable_resolves() {
        let id = AppIdentity::current().unwrap();
        assert!(!id.name().is_empty());
        assert!(id.path().is_absolute());
    }
}
