//! Uploaded document handling: text extraction, page counting, and storage
//! of the original file.

pub mod storage;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF text extraction failed: {0}")]
    Extraction(String),

    #[error("Document processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Plain text and page count of an uploaded PDF.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
}

/// Accepts a file as PDF by extension or declared content type.
pub fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    let by_extension = file_name.to_ascii_lowercase().ends_with(".pdf");
    let by_content_type = content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
    by_extension || by_content_type
}

pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Extraction(e.to_string()))
}

/// Number of pages in the document; 0 when it cannot be parsed.
pub fn count_pages(bytes: &[u8]) -> usize {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => doc.get_pages().len(),
        Err(e) => {
            debug!("Could not count PDF pages: {e}");
            0
        }
    }
}

/// Extracts text and counts pages on the blocking pool.
///
/// A PDF that yields no text (e.g. a scanned image) is not an error; the
/// caller gets an empty string and the classifier takes its empty-text path.
pub async fn read_document(bytes: Bytes) -> Result<ExtractedDocument, DocumentError> {
    let doc = tokio::task::spawn_blocking(move || -> Result<ExtractedDocument, DocumentError> {
        let text = extract_text(&bytes)?;
        let page_count = count_pages(&bytes);
        Ok(ExtractedDocument { text, page_count })
    })
    .await??;

    if doc.text.trim().is_empty() {
        warn!(
            "PDF with {} page(s) produced no extractable text",
            doc.page_count
        );
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    fn one_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal("Education")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf("Resume.PDF", None));
        assert!(is_pdf("upload", Some("application/pdf")));
        assert!(!is_pdf("resume.docx", Some("application/msword")));
        assert!(!is_pdf("resume", None));
    }

    #[test]
    fn test_count_pages() {
        assert_eq!(count_pages(&one_page_pdf()), 1);
    }

    #[test]
    fn test_count_pages_garbage_is_zero() {
        assert_eq!(count_pages(b"definitely not a pdf"), 0);
    }

    #[test]
    fn test_extract_text_rejects_garbage() {
        assert!(matches!(
            extract_text(b"definitely not a pdf"),
            Err(DocumentError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_read_document_rejects_garbage() {
        let result = read_document(Bytes::from_static(b"%PDF-broken")).await;
        assert!(result.is_err());
    }
}
