// src/presentation/http/controllers/multipart.rs
use crate::application::ports::storage::UploadedImage;
use crate::presentation::http::error::HttpError;
use axum::extract::{Multipart, multipart::MultipartError};
use std::collections::HashMap;

/// Text fields and file parts of a `multipart/form-data` body.
#[derive(Debug, Default)]
pub(super) struct FormData {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedImage>,
}

fn malformed(err: &MultipartError) -> HttpError {
    HttpError::bad_request(format!("malformed multipart body: {}", err.body_text()))
}

impl FormData {
    pub(super) async fn read(mut multipart: Multipart) -> Result<Self, HttpError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| malformed(&e))? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await.map_err(|e| malformed(&e))?;
                    // browsers send an empty part when no file was chosen
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(name, UploadedImage { file_name, bytes });
                }
                None => {
                    let text = field.text().await.map_err(|e| malformed(&e))?;
                    form.texts.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Text value, or `None` when absent or blank.
    pub(super) fn text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name).filter(|v| !v.trim().is_empty())
    }

    pub(super) fn required(&mut self, name: &str) -> Result<String, HttpError> {
        self.text(name)
            .ok_or_else(|| HttpError::bad_request(format!("{name} is required")))
    }

    pub(super) fn file(&mut self, name: &str) -> Option<UploadedImage> {
        self.files.remove(name)
    }
}
