// src/application/ports/storage.rs
use crate::{application::ApplicationResult, domain::issue::ImageRef};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Before,
    After,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Before => "before",
            ImageKind::After => "after",
        }
    }
}

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the upload and return the stored path.
    async fn save(&self, kind: ImageKind, upload: UploadedImage) -> ApplicationResult<ImageRef>;

    /// Remove a stored image whose record was never written. Missing files are fine.
    async fn discard(&self, image: &ImageRef) -> ApplicationResult<()>;
}
