use base64::Engine as _;
use std::path::Path;
use tracing::debug;

use crate::utils::AnalysisError;

/// One image read into memory, ready to travel inline in a model request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    /// Declared media type, e.g. `image/jpeg`
    pub media_type: String,
    /// Standard base64 of the file contents
    pub data: String,
}

impl ImagePayload {
    pub fn from_bytes(file_name: impl Into<String>, media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// `data:` URL suitable for display
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Media type of an image file, guessed from its extension
pub fn media_type_for(path: &Path) -> Result<String, AnalysisError> {
    let mime = mime_guess::from_path(path).first().ok_or_else(|| {
        AnalysisError::InvalidInput(format!("unknown file type: {}", path.display()))
    })?;

    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(AnalysisError::InvalidInput(format!(
            "{} is not an image ({})",
            path.display(),
            mime
        )));
    }

    Ok(mime.essence_str().to_string())
}

/// Read one image file
pub async fn load_image(path: &Path) -> Result<ImagePayload, AnalysisError> {
    let media_type = media_type_for(path)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AnalysisError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!("Loaded {} ({}, {} bytes)", file_name, media_type, bytes.len());
    Ok(ImagePayload::from_bytes(file_name, media_type, &bytes))
}

/// Read a selection of image files; an empty selection is invalid input
pub async fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ImagePayload>, AnalysisError> {
    if paths.is_empty() {
        return Err(AnalysisError::InvalidInput("no file selected".to_string()));
    }

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path.as_ref()).await?);
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_media_type_for_common_photos() {
        assert_eq!(media_type_for(Path::new("scena.JPG")).unwrap(), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a/b/macchia.png")).unwrap(), "image/png");
        assert_eq!(media_type_for(Path::new("parete.webp")).unwrap(), "image/webp");
    }

    #[test]
    fn test_media_type_rejects_non_images() {
        assert!(matches!(
            media_type_for(Path::new("notes.txt")),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            media_type_for(Path::new("no_extension")),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_payload_encoding() {
        let payload = ImagePayload::from_bytes("x.png", "image/png", b"\x89PNG");
        assert_eq!(payload.data, "iVBORw==");
        assert_eq!(payload.data_url(), "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_load_images_empty_selection() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(
            load_images(&paths).await,
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reperto.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let images = load_images(&[path]).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_name, "reperto.jpg");
        assert_eq!(images[0].media_type, "image/jpeg");
        assert_eq!(images[0].data, "/9j/4A==");
    }

    #[tokio::test]
    async fn test_load_image_missing_file() {
        let result = load_image(Path::new("/definitely/not/here.png")).await;
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }
}
