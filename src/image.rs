//! Selected Image
//!
//! The single binary file the user has picked or captured for analysis.

use std::fmt;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// An image ready to be sent as the `image` multipart field
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Wrap a camera frame as `camera-capture-<millis>.jpg`.
    pub fn captured(bytes: Vec<u8>, timestamp_millis: i64) -> Self {
        Self::new(capture_file_name(timestamp_millis), JPEG_CONTENT_TYPE, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read an image from disk, guessing the content type from the extension.
    #[cfg(feature = "native")]
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let content_type = content_type_for(&name);
        Ok(Self::new(name, content_type, bytes))
    }
}

// Prints the byte count instead of the bytes
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn capture_file_name(timestamp_millis: i64) -> String {
    format!("camera-capture-{}.jpg", timestamp_millis)
}

/// MIME type for a file name, by extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => JPEG_CONTENT_TYPE,
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
