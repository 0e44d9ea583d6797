use std::collections::HashMap;

use super::image::ImagePayload;
use crate::constants::PREVIEW_URL_SCHEME;

/// Display handle for one loaded image.
///
/// The handle stays valid until the registry that issued it releases it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: u64,
    url: String,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Owns the display data behind every live [`PreviewHandle`]
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: HashMap<u64, String>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, image: &ImagePayload) -> PreviewHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(id, image.data_url());
        PreviewHandle {
            id,
            url: format!("{}://{}/{}", PREVIEW_URL_SCHEME, id, image.file_name),
        }
    }

    /// Display data for a live handle, `None` once released
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<&str> {
        self.live.get(&handle.id).map(String::as_str)
    }

    /// Returns false if the handle was already released
    pub fn release(&mut self, handle: &PreviewHandle) -> bool {
        self.live.remove(&handle.id).is_some()
    }

    pub fn release_all(&mut self) -> usize {
        let released = self.live.len();
        self.live.clear();
        released
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> ImagePayload {
        ImagePayload::from_bytes(name, "image/png", b"png")
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = PreviewRegistry::new();
        let handle = registry.register(&payload("a.png"));

        assert_eq!(handle.url(), "preview://1/a.png");
        assert_eq!(registry.resolve(&handle), Some("data:image/png;base64,cG5n"));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_release_is_final() {
        let mut registry = PreviewRegistry::new();
        let first = registry.register(&payload("a.png"));
        let second = registry.register(&payload("a.png"));
        assert_ne!(first, second);

        assert!(registry.release(&first));
        assert!(!registry.release(&first));
        assert_eq!(registry.resolve(&first), None);
        assert!(registry.resolve(&second).is_some());
    }

    #[test]
    fn test_ids_are_not_reused_after_release_all() {
        let mut registry = PreviewRegistry::new();
        let old = registry.register(&payload("a.png"));
        assert_eq!(registry.release_all(), 1);

        let new = registry.register(&payload("a.png"));
        assert_ne!(old.id(), new.id());
        assert_eq!(registry.resolve(&old), None);
    }
}
