//! Media relay: forwards uploaded images to the external store and
//! releases them when their owning record is replaced or deleted.
//!
//! The relay never decodes pixels. Sizing (bound to 1920x1080, no
//! upscaling) and quality adjustment are requested as upload parameters
//! and performed by the store itself.
//!
//! URL-based public-id derivation lives here, behind the relay, so that
//! swapping the store backend never leaks URL-parsing assumptions into
//! the repositories.

mod cloudinary;

use thiserror::Error;

use crate::config::MediaStoreConfig;
use cloudinary::CloudinaryClient;

/// Upload folder for all site media.
pub const MEDIA_FOLDER: &str = "site-vitrine";

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Media types accepted for upload, validated before any bytes are
/// transferred.
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];

/// Errors that can occur when relaying media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Declared content type is not an accepted image type.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Upload exceeds the size cap.
    #[error("image exceeds the maximum size of {max} bytes")]
    TooLarge {
        /// The enforced cap in bytes.
        max: usize,
    },

    /// No store credentials are configured.
    #[error("media store is not configured")]
    NotConfigured,

    /// HTTP request to the store failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request.
    #[error("media store error: {status} - {message}")]
    Api {
        /// HTTP status returned by the store.
        status: u16,
        /// Response body, for the log.
        message: String,
    },

    /// Failed to parse the store's response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A stored asset: the public URL embedded into the owning record, and
/// the store's opaque id used transiently for replace/delete.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Public URL of the stored image.
    pub url: String,
    /// The store's internal handle for the asset.
    pub public_id: String,
}

enum Backend {
    Cloudinary(CloudinaryClient),
    Disabled,
    #[cfg(test)]
    Recording(std::sync::Arc<RecordingStore>),
}

/// Relay between admin uploads and the external media store.
pub struct MediaRelay {
    backend: Backend,
}

impl MediaRelay {
    /// Build a relay from optional store credentials.
    ///
    /// Without credentials the relay still constructs: uploads fail with
    /// [`MediaError::NotConfigured`] and releases are skipped, so the
    /// rest of the admin panel keeps working.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Http` if the HTTP client fails to build.
    pub fn from_config(config: Option<&MediaStoreConfig>) -> Result<Self, MediaError> {
        match config {
            Some(config) => Ok(Self {
                backend: Backend::Cloudinary(CloudinaryClient::new(config)?),
            }),
            None => {
                tracing::warn!("no media store credentials; image uploads are disabled");
                Ok(Self {
                    backend: Backend::Disabled,
                })
            }
        }
    }

    /// Validate and forward image bytes to the external store.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedMediaType` for non-image content
    /// types, `MediaError::TooLarge` past the size cap,
    /// `MediaError::NotConfigured` without credentials, and
    /// `MediaError::Http`/`Api`/`Parse` when the store call fails.
    pub async fn store(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
        folder: &str,
    ) -> Result<StoredMedia, MediaError> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(MediaError::UnsupportedMediaType(content_type.to_owned()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge {
                max: MAX_IMAGE_BYTES,
            });
        }

        match &self.backend {
            Backend::Cloudinary(client) => {
                client.upload(bytes, content_type, file_name, folder).await
            }
            Backend::Disabled => Err(MediaError::NotConfigured),
            #[cfg(test)]
            Backend::Recording(store) => Ok(store.store(file_name, folder)),
        }
    }

    /// Release a stored asset, best-effort.
    ///
    /// Deletes directly when the opaque id is known, otherwise derives
    /// it from the URL. References without the store's `upload` path
    /// marker, or that are not remote http(s) URLs, are treated as
    /// non-owned legacy data and skipped. Store failures are logged and
    /// swallowed; this never fails the enclosing request.
    pub async fn release(&self, url: &str, public_id: Option<&str>) {
        let target = match public_id {
            Some(id) => id.to_owned(),
            None => {
                if !is_remote(url) {
                    tracing::debug!(url, "skipping release of non-remote image reference");
                    return;
                }
                match derive_public_id(url) {
                    Some(id) => id,
                    None => {
                        tracing::debug!(url, "skipping release of non-owned image reference");
                        return;
                    }
                }
            }
        };

        let result = match &self.backend {
            Backend::Cloudinary(client) => client.destroy(&target).await,
            Backend::Disabled => {
                tracing::warn!(public_id = %target, "media store not configured; release skipped");
                return;
            }
            #[cfg(test)]
            Backend::Recording(store) => {
                store.destroy(&target);
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, public_id = %target, "best-effort media release failed");
        }
    }

    #[cfg(test)]
    pub(crate) fn recording(store: std::sync::Arc<RecordingStore>) -> Self {
        Self {
            backend: Backend::Recording(store),
        }
    }
}

/// Whether a reference points at a remote store at all.
fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Derive the store's opaque id from a delivery URL.
///
/// The id is everything after the `upload` path segment, minus an
/// optional version segment (starting with `v`) and the file extension.
/// Returns `None` when the URL has no `upload` segment, i.e. the asset
/// is not owned by the store.
fn derive_public_id(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').collect();
    let upload_idx = segments.iter().position(|s| *s == "upload")?;

    let mut rest = segments.get(upload_idx + 1..)?;
    if let Some(first) = rest.first()
        && first.starts_with('v')
    {
        rest = rest.get(1..)?;
    }

    let joined = rest.join("/");
    let public_id = joined.rfind('.').map_or_else(
        || joined.clone(),
        |idx| {
            let ext = joined.get(idx + 1..).unwrap_or("");
            if ext.is_empty() || ext.contains('/') {
                joined.clone()
            } else {
                joined.get(..idx).unwrap_or("").to_owned()
            }
        },
    );

    if public_id.is_empty() {
        None
    } else {
        Some(public_id)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    pub stored: std::sync::Mutex<Vec<String>>,
    pub released: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
impl RecordingStore {
    fn store(&self, file_name: &str, folder: &str) -> StoredMedia {
        let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
        let public_id = format!("{folder}/{stem}");
        self.stored.lock().unwrap().push(public_id.clone());
        StoredMedia {
            url: format!("https://res.cloudinary.test/demo/image/upload/v1/{public_id}.jpg"),
            public_id,
        }
    }

    fn destroy(&self, public_id: &str) {
        self.released.lock().unwrap().push(public_id.to_owned());
    }
}
