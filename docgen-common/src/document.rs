//! Document vocabulary shared between the client service and its tests
//!
//! Provides the closed enumerations the backend accepts:
//! - `DocType`: which kind of document to generate (BRD, SOW, FRD)
//! - `DocLevel`: requested depth of detail (Simple, Intermediate, Advanced)
//! - `ArtifactFormat`: download formats for generated artifacts
//!
//! Plus the media rules applied to uploads before anything leaves the client.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upload extensions accepted by the client (audio and video only)
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["mp3", "wav", "mp4", "avi", "mov", "m4a", "ogg"];

/// Category of document requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// Business Requirements Document
    #[serde(rename = "BRD")]
    Brd,
    /// Statement of Work
    #[serde(rename = "SOW")]
    Sow,
    /// Functional Requirements Document
    #[serde(rename = "FRD")]
    Frd,
}

impl DocType {
    /// Wire representation sent as the `doc_type` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Brd => "BRD",
            DocType::Sow => "SOW",
            DocType::Frd => "FRD",
        }
    }

    /// Help text shown next to the selector
    pub fn description(&self) -> &'static str {
        match self {
            DocType::Brd => "Business Requirements Document (BRD): Defines the business needs and requirements for a project.",
            DocType::Sow => "Statement of Work (SOW): Details the specific work to be performed, deliverables, and timeline.",
            DocType::Frd => "Functional Requirements Document (FRD): Specifies the functional requirements and system behavior.",
        }
    }

    /// All variants in selector order
    pub fn all_variants() -> [DocType; 3] {
        [DocType::Brd, DocType::Sow, DocType::Frd]
    }
}

impl Default for DocType {
    fn default() -> Self {
        DocType::Brd
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "BRD" => Ok(DocType::Brd),
            "SOW" => Ok(DocType::Sow),
            "FRD" => Ok(DocType::Frd),
            other => Err(Error::InvalidInput(format!(
                "Unknown document type '{}' (expected BRD, SOW or FRD)",
                other
            ))),
        }
    }
}

/// Requested detail tier for the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocLevel {
    Simple,
    Intermediate,
    Advanced,
}

impl DocLevel {
    /// Wire representation sent as the `doc_level` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            DocLevel::Simple => "Simple",
            DocLevel::Intermediate => "Intermediate",
            DocLevel::Advanced => "Advanced",
        }
    }

    /// Help text shown next to the selector
    pub fn description(&self) -> &'static str {
        match self {
            DocLevel::Simple => "Simple: Concise document with fundamental project information. Suitable for initial discussions.",
            DocLevel::Intermediate => "Intermediate: Detailed document with comprehensive requirements and process flows. Suitable for project development.",
            DocLevel::Advanced => "Advanced: Exhaustive document with in-depth analysis and specifications. Suitable for complex enterprise projects.",
        }
    }

    /// All variants in selector order
    pub fn all_variants() -> [DocLevel; 3] {
        [DocLevel::Simple, DocLevel::Intermediate, DocLevel::Advanced]
    }
}

impl Default for DocLevel {
    fn default() -> Self {
        DocLevel::Intermediate
    }
}

impl std::fmt::Display for DocLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Simple" => Ok(DocLevel::Simple),
            "Intermediate" => Ok(DocLevel::Intermediate),
            "Advanced" => Ok(DocLevel::Advanced),
            other => Err(Error::InvalidInput(format!(
                "Unknown documentation level '{}' (expected Simple, Intermediate or Advanced)",
                other
            ))),
        }
    }
}

/// Artifact formats the backend can serve for a finished document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Pdf,
    Docx,
    Html,
    Json,
}

impl ArtifactFormat {
    /// Value of the `format` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "pdf",
            ArtifactFormat::Docx => "docx",
            ArtifactFormat::Html => "html",
            ArtifactFormat::Json => "json",
        }
    }

    /// Button label used on the download links
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "Download PDF",
            ArtifactFormat::Docx => "Download DOCX",
            ArtifactFormat::Html => "Download HTML",
            ArtifactFormat::Json => "Download JSON",
        }
    }

    /// Content type the backend serves this format with
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "application/pdf",
            ArtifactFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ArtifactFormat::Html => "text/html",
            ArtifactFormat::Json => "application/json",
        }
    }

    /// All formats in download-row order
    pub fn all_variants() -> [ArtifactFormat; 4] {
        [
            ArtifactFormat::Pdf,
            ArtifactFormat::Docx,
            ArtifactFormat::Html,
            ArtifactFormat::Json,
        ]
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtifactFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ArtifactFormat::Pdf),
            "docx" => Ok(ArtifactFormat::Docx),
            "html" => Ok(ArtifactFormat::Html),
            "json" => Ok(ArtifactFormat::Json),
            other => Err(Error::InvalidInput(format!(
                "Unsupported artifact format '{}' (expected pdf, docx, html or json)",
                other
            ))),
        }
    }
}

/// Extract the lowercase extension of a file name, if any
pub fn file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Check that a file name carries one of the supported media extensions
pub fn validate_media_filename(filename: &str) -> Result<()> {
    match file_extension(filename) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(Error::InvalidInput(format!(
            "Unsupported file type '.{}' (supported: {})",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        ))),
        None => Err(Error::InvalidInput(format!(
            "File '{}' has no extension (supported: {})",
            filename,
            SUPPORTED_EXTENSIONS.join(", ")
        ))),
    }
}

/// Check a declared MIME type against the audio/video class
///
/// Browsers fall back to `application/octet-stream` for types they do not
/// recognise, so that value is accepted and the extension check decides.
pub fn validate_media_mime(mime: &str) -> Result<()> {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence.starts_with("audio/")
        || essence.starts_with("video/")
        || essence == "application/octet-stream"
    {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "Unsupported media type '{}' (audio or video required)",
            mime
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_parse_round_trips_wire_names() {
        for doc_type in DocType::all_variants() {
            assert_eq!(doc_type.as_str().parse::<DocType>().unwrap(), doc_type);
        }
    }

    #[test]
    fn test_doc_type_rejects_unknown_and_lowercase() {
        assert!("PRD".parse::<DocType>().is_err());
        assert!("brd".parse::<DocType>().is_err());
        assert!("".parse::<DocType>().is_err());
    }

    #[test]
    fn test_doc_level_rejects_unknown() {
        assert_eq!("Advanced".parse::<DocLevel>().unwrap(), DocLevel::Advanced);
        assert!("Expert".parse::<DocLevel>().is_err());
    }

    #[test]
    fn test_defaults_match_form_preselection() {
        assert_eq!(DocType::default(), DocType::Brd);
        assert_eq!(DocLevel::default(), DocLevel::Intermediate);
    }

    #[test]
    fn test_doc_type_serializes_as_wire_name() {
        let json = serde_json::to_string(&DocType::Sow).unwrap();
        assert_eq!(json, "\"SOW\"");
    }

    #[test]
    fn test_artifact_format_parse_is_case_insensitive() {
        assert_eq!("PDF".parse::<ArtifactFormat>().unwrap(), ArtifactFormat::Pdf);
        assert_eq!("docx".parse::<ArtifactFormat>().unwrap(), ArtifactFormat::Docx);
        assert!("txt".parse::<ArtifactFormat>().is_err());
    }

    #[test]
    fn test_supported_extensions_accepted() {
        for ext in SUPPORTED_EXTENSIONS {
            let name = format!("meeting.{}", ext);
            assert!(validate_media_filename(&name).is_ok(), "{} should be accepted", name);
        }
        assert!(validate_media_filename("Standup.MP3").is_ok());
    }

    #[test]
    fn test_unsupported_extensions_rejected() {
        assert!(validate_media_filename("notes.txt").is_err());
        assert!(validate_media_filename("archive.mp3.zip").is_err());
        assert!(validate_media_filename("no_extension").is_err());
    }

    #[test]
    fn test_mime_class_validation() {
        assert!(validate_media_mime("audio/mpeg").is_ok());
        assert!(validate_media_mime("video/mp4").is_ok());
        assert!(validate_media_mime("audio/ogg; codecs=opus").is_ok());
        assert!(validate_media_mime("application/octet-stream").is_ok());
        assert!(validate_media_mime("text/plain").is_err());
        assert!(validate_media_mime("image/png").is_err());
    }
}
