//! Image loading.
//!
//! Loading never fails loudly: a frame that is missing or cannot be decoded
//! is reported as `None` and the walker moves on to the next record.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::warn;

/// Decodes the image file paired with a matching record.
pub trait ImageLoader {
    /// Decode `path`, or `None` when the file is missing or unreadable.
    fn load(&self, path: &Path) -> Option<DynamicImage>;
}

/// [`ImageLoader`] backed by the `image` crate, format guessed from content.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageFileLoader;

impl ImageLoader for ImageFileLoader {
    fn load(&self, path: &Path) -> Option<DynamicImage> {
        if !path.is_file() {
            return None;
        }
        match image::ImageReader::open(path).and_then(|reader| reader.with_guessed_format()) {
            Ok(reader) => match reader.decode() {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!(path = %path.display(), "failed to decode frame: {err}");
                    None
                }
            },
            Err(err) => {
                warn!(path = %path.display(), "failed to open frame: {err}");
                None
            }
        }
    }
}

impl<L: ImageLoader + ?Sized> ImageLoader for &L {
    fn load(&self, path: &Path) -> Option<DynamicImage> {
        (**self).load(path)
    }
}

/// One decoded frame produced by a traversal.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Scene folder the frame belongs to.
    pub scene: PathBuf,
    /// Image file the pixels were decoded from.
    pub source: PathBuf,
    pub image: DynamicImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
