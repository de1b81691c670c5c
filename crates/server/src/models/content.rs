//! Managed content domain types.
//!
//! Four record kinds back the public site: generic content items
//! (discriminated by `kind`), services, gallery entries, and contact
//! messages. Image-bearing records store the media URL; the external
//! store's opaque id is derived on release and never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitrine_core::{ContentId, GalleryId, MessageId, ServiceId};

/// A generic content item (carousel slide, about section, ...).
///
/// `kind` serializes as `type` to match the public API and the admin
/// form field names.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub order_index: i64,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or replacing a content item.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub order_index: i64,
    pub visible: bool,
}

/// A service/product card.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceItem {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Free-text price label, not a numeric amount.
    pub price: String,
    pub order_index: i64,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or replacing a service.
#[derive(Debug, Clone)]
pub struct NewServiceItem {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub price: String,
    pub order_index: i64,
    pub visible: bool,
}

/// A gallery entry. The image is mandatory; entries are created and
/// deleted, never updated.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryItem {
    pub id: GalleryId,
    pub title: Option<String>,
    pub image: String,
    pub description: String,
    pub order_index: i64,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a gallery entry.
#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub title: Option<String>,
    pub image: String,
    pub description: String,
    pub order_index: i64,
    pub visible: bool,
}

/// A contact form submission. Created by the public form, mutated only
/// by the mark-read operation.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
