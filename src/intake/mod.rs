// Gateway module for image intake - follows the Train Station Pattern
// All external access must go through this gateway

mod image;
mod preview;

pub use image::{load_image, load_images, media_type_for, ImagePayload};
pub use preview::{PreviewHandle, PreviewRegistry};

/// An image owned by the session: payload plus its live preview
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub payload: ImagePayload,
    pub preview: PreviewHandle,
}
