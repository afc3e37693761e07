//! Application service: write and clean up provisioning artifacts.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::{Path, PathBuf};

use crate::application::ports::{LocalFs, Reporter};
use crate::domain::artifacts::render_inventory;
use crate::domain::{ArtifactLayout, GroupVars, ProvisionError, ProvisioningRequest};

/// Writes the inventory and variables document for one run.
pub struct ArtifactWriter<'a, F: LocalFs> {
    fs: &'a F,
    layout: &'a ArtifactLayout,
}

impl<'a, F: LocalFs> ArtifactWriter<'a, F> {
    #[must_use]
    pub fn new(fs: &'a F, layout: &'a ArtifactLayout) -> Self {
        Self { fs, layout }
    }

    /// Write the inventory for `address` and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::ArtifactWrite`] on any I/O failure.
    pub fn write_inventory(
        &self,
        request: &ProvisioningRequest,
        address: &str,
        user: &str,
    ) -> Result<PathBuf, ProvisionError> {
        let base = self.layout.base_dir();
        self.fs
            .create_dir_all(&base)
            .map_err(|e| ProvisionError::artifact_write(base.display().to_string(), e))?;

        let path = self.layout.inventory_path();
        self.fs
            .write(&path, &render_inventory(request, address, user))
            .map_err(|e| ProvisionError::artifact_write(path.display().to_string(), e))?;
        Ok(path)
    }

    /// Create the variables directory, write `all.yml` and return
    /// `(directory, file)`.
    ///
    /// The file carries credentials, so it is made owner-only.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::ArtifactWrite`] on any I/O or serialization
    /// failure.
    pub fn write_variables(
        &self,
        request: &ProvisioningRequest,
    ) -> Result<(PathBuf, PathBuf), ProvisionError> {
        let dir = self.layout.variables_dir();
        self.fs
            .create_dir_all(&dir)
            .map_err(|e| ProvisionError::artifact_write(dir.display().to_string(), e))?;

        let path = self.layout.variables_path();
        let content = GroupVars::from_request(request)
            .to_yaml()
            .map_err(|e| ProvisionError::artifact_write(path.display().to_string(), e))?;
        self.fs
            .write_private(&path, &content)
            .map_err(|e| ProvisionError::artifact_write(path.display().to_string(), e))?;
        Ok((dir, path))
    }

    /// Parse the variables document back from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn read_variables(&self) -> anyhow::Result<GroupVars> {
        let content = self.fs.read_to_string(&self.layout.variables_path())?;
        GroupVars::from_yaml(&content)
    }
}

/// Removes every artifact of a run when dropped.
///
/// Create it before the first artifact is written; whatever exists at drop
/// time is removed, so early returns, errors and panics all clean up.
/// Removal is best-effort: each path is checked first, and failures are
/// reported as warnings rather than raised.
pub struct ArtifactGuard<'a, F: LocalFs, R: Reporter> {
    fs: &'a F,
    reporter: &'a R,
    layout: &'a ArtifactLayout,
}

impl<'a, F: LocalFs, R: Reporter> ArtifactGuard<'a, F, R> {
    #[must_use]
    pub fn new(fs: &'a F, reporter: &'a R, layout: &'a ArtifactLayout) -> Self {
        Self {
            fs,
            reporter,
            layout,
        }
    }

    fn remove_file(&self, path: &Path) {
        if self.fs.exists(path) {
            if let Err(e) = self.fs.remove_file(path) {
                self.reporter.warn(&format!("Failed to remove {}: {e:#}", path.display()));
            }
        }
    }

    fn remove_dir(&self, path: &Path) {
        if self.fs.exists(path) {
            if let Err(e) = self.fs.remove_dir(path) {
                self.reporter.warn(&format!("Failed to remove {}: {e:#}", path.display()));
            }
        }
    }
}

impl<F: LocalFs, R: Reporter> Drop for ArtifactGuard<'_, F, R> {
    fn drop(&mut self) {
        self.remove_file(&self.layout.variables_path());
        self.remove_file(&self.layout.inventory_path());
        self.remove_dir(&self.layout.variables_dir());
        if let Some(run_dir) = self.layout.run_dir() {
            self.remove_dir(&run_dir);
        }
    }
}
