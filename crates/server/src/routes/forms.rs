//! Typed boundary parsing for admin multipart forms.
//!
//! The admin panel submits content through multipart forms so a record
//! edit and its image upload travel together. Field coercion rules are
//! enumerated here once: `order_index` parses as an integer or defaults
//! to 0, `visible` is true only for the literal string `"true"`.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::AppError;

/// An uploaded file pulled out of a multipart form.
#[derive(Debug)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// All text fields plus the optional `image` file of one form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<FilePart>,
}

impl FormData {
    /// A text field, defaulting to empty when absent.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// A text field, `None` when absent or empty.
    #[must_use]
    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.fields.get(name).filter(|v| !v.is_empty()).cloned()
    }

    /// The `order_index` field, defaulting to 0 when absent or
    /// non-numeric.
    #[must_use]
    pub fn order_index(&self) -> i64 {
        self.fields
            .get("order_index")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// The `visible` field: true only for the literal `"true"`.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.fields.get("visible").is_some_and(|v| v == "true")
    }

    #[cfg(test)]
    fn with_fields<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            file: None,
        }
    }
}

/// Drain a multipart stream into [`FormData`].
///
/// The `image` field is treated as the file upload; an empty file part
/// (no bytes, no filename) counts as absent, which is how browsers
/// submit an untouched file input.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the multipart stream is malformed.
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut form = FormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "image" {
            let content_type = field.content_type().map(ToOwned::to_owned);
            let file_name = field.file_name().map(ToOwned::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid file upload: {e}")))?;

            if bytes.is_empty() && file_name.is_none() {
                continue;
            }

            form.file = Some(FilePart {
                bytes: bytes.to_vec(),
                content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_owned()),
                file_name: file_name.unwrap_or_else(|| "upload".to_owned()),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid form field {name}: {e}")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_index_defaults_to_zero() {
        assert_eq!(FormData::with_fields([]).order_index(), 0);
        assert_eq!(FormData::with_fields([("order_index", "")]).order_index(), 0);
        assert_eq!(
            FormData::with_fields([("order_index", "abc")]).order_index(),
            0
        );
        assert_eq!(
            FormData::with_fields([("order_index", "7")]).order_index(),
            7
        );
        assert_eq!(
            FormData::with_fields([("order_index", " 12 ")]).order_index(),
            12
        );
    }

    #[test]
    fn test_visible_requires_literal_true() {
        assert!(FormData::with_fields([("visible", "true")]).visible());
        assert!(!FormData::with_fields([("visible", "TRUE")]).visible());
        assert!(!FormData::with_fields([("visible", "1")]).visible());
        assert!(!FormData::with_fields([("visible", "yes")]).visible());
        assert!(!FormData::with_fields([]).visible());
    }

    #[test]
    fn test_opt_text_treats_empty_as_absent() {
        let form = FormData::with_fields([("link", ""), ("title", "Hello")]);
        assert_eq!(form.opt_text("link"), None);
        assert_eq!(form.opt_text("title").as_deref(), Some("Hello"));
        assert_eq!(form.opt_text("missing"), None);
    }
}
