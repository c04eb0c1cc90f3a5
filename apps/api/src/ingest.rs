//! Resume document ingestion: multipart upload to normalized plain text.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::ats::sections::detect_sections;
use crate::ats::text::clean_display_text;
use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("invalid multipart body: {0}")]
    Multipart(String),

    #[error("upload exceeds the configured size limit")]
    TooLarge,

    #[error("no file uploaded")]
    MissingFile,

    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("document contains no readable text")]
    EmptyDocument,

    #[error("extraction task failed: {0}")]
    Join(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Content type wins; the file extension is the fallback for generic uploads.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, IngestError> {
        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());

        match content_type.as_deref() {
            Some("application/pdf") => return Ok(DocumentKind::Pdf),
            Some("text/plain") => return Ok(DocumentKind::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(IngestError::UnsupportedType(
                content_type
                    .or_else(|| file_name.map(str::to_string))
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub resume_text: String,
    pub char_count: usize,
    pub word_count: usize,
    pub sections_found: Vec<String>,
    pub sections_missing: Vec<String>,
}

/// Extracts raw text from the document bytes. PDF parsing is CPU-bound and
/// runs on the blocking pool.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, IngestError> {
    match kind {
        DocumentKind::PlainText => String::from_utf8(data.to_vec()).map_err(|_| IngestError::InvalidUtf8),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| IngestError::Join(e.to_string()))?
            .map_err(|e| IngestError::Pdf(e.to_string())),
    }
}

/// Cleans extracted text and builds the response body.
pub fn build_response(raw_text: &str) -> Result<IngestResponse, IngestError> {
    let resume_text = clean_display_text(raw_text);
    if resume_text.is_empty() {
        return Err(IngestError::EmptyDocument);
    }

    let sections = detect_sections(raw_text);
    Ok(IngestResponse {
        char_count: resume_text.chars().count(),
        word_count: resume_text.split_whitespace().count(),
        resume_text,
        sections_found: sections.found,
        sections_missing: sections.missing,
    })
}

/// Keeps the body-limit rejection distinct from malformed multipart input.
fn multipart_error(e: MultipartError) -> IngestError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IngestError::TooLarge
    } else {
        IngestError::Multipart(e.body_text())
    }
}

async fn read_file_field(field: Field<'_>) -> Result<(DocumentKind, Bytes), IngestError> {
    let kind = DocumentKind::detect(field.content_type(), field.file_name())?;
    let data = field
        .bytes()
        .await
        .map_err(multipart_error)?;
    Ok((kind, data))
}

/// POST /api/v1/resumes/ingest
///
/// Accepts a multipart upload with a `file` field (PDF or plain text).
pub async fn handle_ingest(mut multipart: Multipart) -> Result<Json<IngestResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some(FILE_FIELD) {
            upload = Some(read_file_field(field).await?);
            break;
        }
        debug!("Skipping multipart field {:?}", field.name());
    }

    let (kind, data) = upload.ok_or(IngestError::MissingFile)?;
    let byte_len = data.len();
    let raw_text = extract_text(kind, data).await?;
    let response = build_response(&raw_text)?;

    info!(
        "Ingested {:?} document: {} bytes -> {} words",
        kind, byte_len, response.word_count
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(
            DocumentKind::detect(Some("application/pdf"), None).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(Some("text/plain; charset=utf-8"), Some("x.bin")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("CV.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(None, Some("resume.txt")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_detect_rejects_other_types() {
        let err = DocumentKind::detect(Some("application/msword"), Some("resume.doc")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedType(ref t) if t == "application/msword"));
        assert!(matches!(
            DocumentKind::detect(None, None),
            Err(IngestError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let text = extract_text(DocumentKind::PlainText, Bytes::from_static(b"hello world"))
            .await
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let err = extract_text(DocumentKind::PlainText, Bytes::from_static(&[0xff, 0xfe, 0x00]))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidUtf8));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error() {
        let err = extract_text(DocumentKind::Pdf, Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Pdf(_) | IngestError::Join(_)));
    }

    #[test]
    fn test_build_response_counts_and_sections() {
        let raw = "Jane Doe\n\nEXPERIENCE\n  Built   APIs\nEducation\nBSc";
        let response = build_response(raw).unwrap();
        assert_eq!(response.resume_text, "Jane Doe EXPERIENCE Built APIs Education BSc");
        assert_eq!(response.word_count, 7);
        assert_eq!(response.char_count, response.resume_text.len());
        assert!(response.sections_found.contains(&"Experience".to_string()));
        assert!(response.sections_found.contains(&"Education".to_string()));
        assert!(response.sections_missing.contains(&"Skills".to_string()));
    }

    #[test]
    fn test_build_response_rejects_empty_text() {
        assert!(matches!(build_response("  \n\t "), Err(IngestError::EmptyDocument)));
        assert!(matches!(build_response("©®™"), Err(IngestError::EmptyDocument)));
    }
}
