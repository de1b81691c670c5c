//! Domain types serialized by the API.

pub mod admin;
pub mod content;

pub use admin::{Admin, AdminCredentials, CurrentAdmin};
pub use content::{
    ContactMessage, ContentItem, GalleryItem, NewContentItem, NewGalleryItem, NewServiceItem,
    ServiceItem,
};
