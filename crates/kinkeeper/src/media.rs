//! Embedded media payloads.
//!
//! Photos and voice recordings travel inside the member record itself as
//! `data:` URIs, the same shape the persisted JSON documents use. This
//! module owns that encoding plus the file-reading seam used to attach
//! media from disk.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed extension-to-mime table for media attached from disk.
///
/// Anything not listed falls back to `application/octet-stream`, which the
/// wizard then rejects as neither image nor audio.
const MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("flac", "audio/flac"),
    ("webm", "audio/webm"),
];

/// Fallback mime type for unrecognized extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Look up the mime type for a file path by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext {
        Some(ext) => MIME_TABLE
            .iter()
            .find(|(e, _)| *e == ext)
            .map_or(OCTET_STREAM, |&(_, mime)| mime),
        None => OCTET_STREAM,
    }
}

/// A media payload embedded in a member record.
///
/// Serializes as a `data:<mime>;base64,<payload>` string so persisted and
/// exported documents stay interchangeable with the original app's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedMedia {
    /// Mime type of the payload (e.g. `image/png`, `audio/wav`).
    pub mime: String,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

impl EmbeddedMedia {
    /// Create a new payload from a mime type and raw bytes.
    #[must_use]
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Whether this payload is an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Whether this payload is audio.
    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio/")
    }

    /// Size of the raw payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as a `data:` URI string.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MediaDecode`] if the string is not a base64 data URI.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::media_decode("missing data: prefix"))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| Error::media_decode("missing ;base64, marker"))?;
        if mime.is_empty() {
            return Err(Error::media_decode("empty mime type"));
        }
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| Error::media_decode(format!("invalid base64 payload: {e}")))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}

impl fmt::Display for EmbeddedMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.mime, self.bytes.len())
    }
}

impl Serialize for EmbeddedMedia {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for EmbeddedMedia {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DataUriVisitor;

        impl Visitor<'_> for DataUriVisitor {
            type Value = EmbeddedMedia;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a base64 data: URI string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                EmbeddedMedia::from_data_uri(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DataUriVisitor)
    }
}

/// Reads a local file into an embeddable media payload.
///
/// This is the seam between the domain logic and the filesystem, so the
/// wizard and repository can be tested without touching disk.
#[async_trait::async_trait]
pub trait MediaReader: Send + Sync {
    /// Read the file at `path` into an [`EmbeddedMedia`] payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    async fn read(&self, path: &Path) -> Result<EmbeddedMedia>;
}

/// [`MediaReader`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMediaReader;

#[async_trait::async_trait]
impl MediaReader for FsMediaReader {
    async fn read(&self, path: &Path) -> Result<EmbeddedMedia> {
        let bytes = tokio::fs::read(path).await?;
        Ok(EmbeddedMedia::new(mime_for_path(path), bytes))
    }
}
