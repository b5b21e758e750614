use crate::domain::ports::BlobStore;
use crate::utils::error::{RegistryError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed object store. Objects land directly under the base
/// directory; writing an existing name overwrites it.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    base_path: PathBuf,
}

impl FsBlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Caller-supplied names are reduced to their final path component so an
    /// upload filename cannot escape the base directory.
    fn object_path(&self, name: &str) -> PathBuf {
        let file_name = Path::new(name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "upload".into());
        self.base_path.join(file_name)
    }
}

impl BlobStore for FsBlobStore {
    async fn put_object(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RegistryError::storage(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, data).map_err(|e| {
            RegistryError::storage(format!("cannot write {}: {}", path.display(), e))
        })?;

        tracing::debug!(object = %path.display(), bytes = data.len(), "raw file stored");
        Ok(())
    }
}
