//! Media file handed to the client for submission

use docgen_common::document::{validate_media_filename, validate_media_mime};

/// A file selected in the browser, fully buffered
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Original file name, display-only once submitted
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// MIME type declared by the browser, if any
    pub mime: Option<String>,
}

impl MediaUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, mime: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reject empty files and anything outside the audio/video class
    pub fn validate(&self) -> docgen_common::Result<()> {
        if self.filename.trim().is_empty() {
            return Err(docgen_common::Error::InvalidInput(
                "No file selected".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(docgen_common::Error::InvalidInput(format!(
                "File '{}' is empty",
                self.filename
            )));
        }
        validate_media_filename(&self.filename)?;
        if let Some(mime) = self.mime.as_deref().filter(|m| !m.trim().is_empty()) {
            validate_media_mime(mime)?;
        }
        Ok(())
    }

    /// MIME type sent to the backend
    pub fn effective_mime(&self) -> &str {
        self.mime
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("application/octet-stream")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_audio_upload() {
        let upload = MediaUpload::new("demo.mp3", vec![0xFF, 0xFB, 0x90], Some("audio/mpeg".into()));
        assert!(upload.validate().is_ok());
        assert_eq!(upload.len(), 3);
    }

    #[test]
    fn test_empty_file_rejected() {
        let upload = MediaUpload::new("demo.mp3", Vec::new(), None);
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_missing_name_rejected() {
        let upload = MediaUpload::new("", vec![1, 2, 3], None);
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let upload = MediaUpload::new("minutes.pdf", vec![1, 2, 3], None);
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_wrong_mime_rejected_even_with_media_extension() {
        let upload = MediaUpload::new("clip.mp4", vec![1, 2, 3], Some("text/html".into()));
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_effective_mime_falls_back_to_octet_stream() {
        let upload = MediaUpload::new("clip.mov", vec![1], Some(String::new()));
        assert_eq!(upload.effective_mime(), "application/octet-stream");
        assert!(upload.validate().is_ok());
    }
}
