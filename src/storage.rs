use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub async fn open(root: &str) -> Result<Self, AppError> {
        fs::create_dir_all(root).await.map_err(|error| {
            AppError::Internal(format!("Failed to create storage root: {error}"))
        })?;

        let root = fs::canonicalize(root).await.map_err(|error| {
            AppError::Internal(format!("Failed to canonicalize storage root: {error}"))
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn create(&self, dir: &Path, batch: &[UploadFile]) -> Result<(), AppError> {
        if fs::try_exists(dir).await? {
            return Err(AppError::DirectoryExists);
        }

        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::create_dir(dir).await?;

        for file in batch {
            let safe_name = sanitize_filename::sanitize(&file.name);
            fs::write(dir.join(safe_name), &file.bytes).await?;
        }

        tracing::debug!(directory = %dir.display(), files = batch.len(), "Created directory");
        Ok(())
    }

    pub async fn update(&self, dir: &Path, batch: &[UploadFile]) -> Result<(), AppError> {
        // A path addressed through an existing file counts as missing.
        match fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(AppError::DirectoryMissing),
            Err(error)
                if matches!(
                    error.kind(),
                    ErrorKind::NotFound | ErrorKind::NotADirectory
                ) =>
            {
                return Err(AppError::DirectoryMissing)
            }
            Err(error) => return Err(error.into()),
        }

        for file in batch {
            let safe_name = sanitize_filename::sanitize(&file.name);
            let target = dir.join(safe_name);

            // Delete then write; a crash between the two leaves the name
            // absent.
            match fs::remove_file(&target).await {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
            fs::write(&target, &file.bytes).await?;
        }

        tracing::debug!(directory = %dir.display(), files = batch.len(), "Updated directory");
        Ok(())
    }
}
