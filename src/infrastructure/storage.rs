// src/infrastructure/storage.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::storage::{ImageKind, ImageStore, UploadedImage},
    },
    domain::issue::ImageRef,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Stores evidence photos as plain files below `root`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lowercased extension of `file_name` when it is one of the accepted image types.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, kind: ImageKind, upload: UploadedImage) -> ApplicationResult<ImageRef> {
        let ext = allowed_extension(&upload.file_name).ok_or_else(|| {
            ApplicationError::validation(format!(
                "unsupported image type '{}', expected one of {}",
                upload.file_name,
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;
        if upload.bytes.is_empty() {
            return Err(ApplicationError::validation("uploaded image is empty"));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(ApplicationError::validation(format!(
                "uploaded image exceeds {} bytes",
                self.max_bytes
            )));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let path = self
            .root
            .join(format!("{}_{}.{ext}", kind.as_str(), Uuid::new_v4().simple()));
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        debug!(path = %path.display(), size = upload.bytes.len(), "image stored");

        Ok(ImageRef::new(path.to_string_lossy().into_owned())?)
    }

    async fn discard(&self, image: &ImageRef) -> ApplicationResult<()> {
        match tokio::fs::remove_file(image.as_str()).await {
            Ok(()) => {
                debug!(path = image.as_str(), "image discarded");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApplicationError::infrastructure(err.to_string())),
        }
    }
}
