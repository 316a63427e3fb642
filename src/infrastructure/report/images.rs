// src/infrastructure/report/images.rs
use super::layout::{ImageSource, RasterImage};
use crate::domain::issue::ImageRef;
use std::path::Path;
use tracing::{debug, warn};

/// Longest edge kept for an embedded photo; an 80 mm slot at roughly 200 dpi.
pub const MAX_EDGE_PX: u32 = 640;

/// Reads evidence photos from the local filesystem with the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn load(&self, image: &ImageRef) -> Option<RasterImage> {
        let path = Path::new(image.as_str());
        if !path.is_file() {
            debug!(path = %path.display(), "evidence image missing, leaving slot empty");
            return None;
        }

        match image::open(path) {
            Ok(decoded) => {
                let decoded = if decoded.width().max(decoded.height()) > MAX_EDGE_PX {
                    decoded.thumbnail(MAX_EDGE_PX, MAX_EDGE_PX)
                } else {
                    decoded
                };
                let rgb = decoded.to_rgb8();
                Some(RasterImage {
                    width: rgb.width(),
                    height: rgb.height(),
                    rgb: rgb.into_raw(),
                })
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "evidence image unreadable, leaving slot empty");
                None
            }
        }
    }
}
