use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Raw upload as received from the client, before any conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingImage {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// HEIC is recognised by MIME type or by a `.heic` name, whatever the MIME says.
    pub fn is_heic(&self) -> bool {
        self.content_type.trim().eq_ignore_ascii_case("image/heic")
            || self.filename.to_ascii_lowercase().ends_with(".heic")
    }

    pub fn kind(&self) -> Option<ImageKind> {
        if self.is_heic() {
            return Some(ImageKind::Heic);
        }
        match self.content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Heic,
}

/// Where a processed image ends up. Each target has its own size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageTarget {
    Thumbnail,
    EditorImage,
}

impl ImageTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageTarget::Thumbnail => "thumbnail",
            ImageTarget::EditorImage => "editor_image",
        }
    }
}

impl fmt::Display for ImageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image target: {0}")]
pub struct UnknownImageTarget(pub String);

impl FromStr for ImageTarget {
    type Err = UnknownImageTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thumbnail" => Ok(ImageTarget::Thumbnail),
            "editor_image" | "editor" => Ok(ImageTarget::EditorImage),
            other => Err(UnknownImageTarget(other.to_string())),
        }
    }
}

/// Pipeline output. Always JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// HEIC strategy that produced the bytes, if any.
    pub strategy: Option<&'static str>,
}

impl ProcessedImage {
    pub fn content_type(&self) -> &'static str {
        JPEG_CONTENT_TYPE
    }

    pub fn extension(&self) -> &'static str {
        "jpg"
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Renames `photo.HEIC` / `shot.png` to `photo.jpg` / `shot.jpg`. JPEG names are kept.
pub fn jpeg_filename(original: &str) -> String {
    let name = original.trim();
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        return name.to_string();
    }

    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{stem}.jpg")
}
