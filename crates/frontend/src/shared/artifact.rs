//! Client-owned binary artifacts (report charts, spreadsheets).
//!
//! A blob URL keeps its bytes alive until it is revoked, so every URL this
//! client creates has exactly one owner that revokes it.

use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

/// Creates and releases object URLs for byte payloads.
pub trait ObjectUrls {
    fn create(&self, bytes: &[u8], mime: &str) -> Result<String, String>;
    fn revoke(&self, url: &str);
}

/// [`ObjectUrls`] over `URL.createObjectURL`
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobUrls;

pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

impl ObjectUrls for BlobUrls {
    fn create(&self, bytes: &[u8], mime: &str) -> Result<String, String> {
        let blob = bytes_to_blob(bytes, mime)?;
        Url::create_object_url_with_blob(&blob)
            .map_err(|e: JsValue| format!("Failed to create object URL: {:?}", e))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {:?}", url, e);
        }
    }
}

/// Holds at most one live object URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSlot {
    url: Option<String>,
}

impl ArtifactSlot {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Release the held URL (if any), then expose `bytes` under a new one.
    pub fn replace(
        &mut self,
        urls: &dyn ObjectUrls,
        bytes: &[u8],
        mime: &str,
    ) -> Result<String, String> {
        self.release(urls);
        let url = urls.create(bytes, mime)?;
        self.url = Some(url.clone());
        Ok(url)
    }

    pub fn release(&mut self, urls: &dyn ObjectUrls) {
        if let Some(url) = self.url.take() {
            urls.revoke(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{RecordingUrls, UrlEvent};

    #[test]
    fn test_second_artifact_releases_first_before_creation() {
        let urls = RecordingUrls::default();
        let mut slot = ArtifactSlot::default();

        let first = slot.replace(&urls, b"one", "image/png").unwrap();
        let second = slot.replace(&urls, b"two", "image/png").unwrap();

        assert_ne!(first, second);
        assert_eq!(slot.url(), Some(second.as_str()));
        assert_eq!(
            urls.events(),
            vec![
                UrlEvent::Created(first.clone()),
                UrlEvent::Revoked(first),
                UrlEvent::Created(second),
            ]
        );
    }

    #[test]
    fn test_release_is_idempotent() {
        let urls = RecordingUrls::default();
        let mut slot = ArtifactSlot::default();
        slot.replace(&urls, b"png", "image/png").unwrap();

        slot.release(&urls);
        slot.release(&urls);

        assert_eq!(slot.url(), None);
        assert_eq!(urls.live(), 0);
    }

    #[test]
    fn test_failed_creation_leaves_slot_empty() {
        let urls = RecordingUrls::failing();
        let mut slot = ArtifactSlot::default();
        assert!(slot.replace(&urls, b"png", "image/png").is_err());
        assert_eq!(slot.url(), None);
    }
}
