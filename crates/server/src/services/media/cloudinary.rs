//! Cloudinary REST client.
//!
//! Talks to the upload and destroy endpoints of the Cloudinary admin
//! API using signed requests. The signature is the SHA-1 hex digest of
//! the alphabetically sorted request parameters concatenated with the
//! API secret.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{MediaError, StoredMedia};
use crate::config::MediaStoreConfig;

const API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Incoming transformation applied by the store at upload time: bound
/// to 1920x1080 without upscaling, then automatic quality.
const INCOMING_TRANSFORMATION: &str = "c_limit,w_1920,h_1080/q_auto";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Signed HTTP client for one Cloudinary account.
pub struct CloudinaryClient {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
}

impl CloudinaryClient {
    /// Build a client from store credentials.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Http` if the HTTP client fails to build.
    pub fn new(config: &MediaStoreConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    /// Upload image bytes, returning the delivery URL and opaque id.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Http` on transport failure, `MediaError::Api`
    /// when the store rejects the upload, and `MediaError::Parse` when
    /// the response body is not the expected shape.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
        folder: &str,
    ) -> Result<StoredMedia, MediaError> {
        let timestamp = unix_timestamp();
        let to_sign = format!(
            "folder={folder}&timestamp={timestamp}&transformation={INCOMING_TRANSFORMATION}"
        );
        let signature = self.sign(&to_sign);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_owned())
            .text("transformation", INCOMING_TRANSFORMATION)
            .text("signature", signature);

        let url = format!("{API_BASE_URL}/{}/image/upload", self.cloud_name);
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Parse(e.to_string()))?;

        Ok(StoredMedia {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    /// Delete an asset by its opaque id.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Http` on transport failure and
    /// `MediaError::Api` when the store rejects the request.
    pub async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = unix_timestamp();
        let to_sign = format!("public_id={public_id}&timestamp={timestamp}");
        let signature = self.sign(&to_sign);

        let params = [
            ("public_id", public_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", &timestamp.to_string()),
            ("signature", &signature),
        ];

        let url = format!("{API_BASE_URL}/{}/image/destroy", self.cloud_name);
        let response = self.http.post(&url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// SHA-1 hex digest of the sorted parameter string plus the secret.
    fn sign(&self, params: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(params.as_bytes());
        hasher.update(self.api_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> CloudinaryClient {
        CloudinaryClient::new(&MediaStoreConfig {
            cloud_name: "demo".to_owned(),
            api_key: "1234".to_owned(),
            api_secret: SecretString::from("abcd"),
        })
        .unwrap()
    }

    #[test]
    fn test_signature_is_sha1_of_params_and_secret() {
        // sha1("public_id=folder/pic&timestamp=1700000000" + "abcd")
        let signature = client().sign("public_id=folder/pic&timestamp=1700000000");

        let mut hasher = Sha1::new();
        hasher.update(b"public_id=folder/pic&timestamp=1700000000abcd");
        let expected = hex::encode(hasher.finalize());

        assert_eq!(signature, expected);
        assert_eq!(signature.len(), 40);
    }

    #[test]
    fn test_signature_changes_with_params() {
        let c = client();
        assert_ne!(
            c.sign("timestamp=1"),
            c.sign("timestamp=2"),
        );
    }
}
