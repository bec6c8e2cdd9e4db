//! Raw text extraction from supported file formats
//!
//! Readers return raw, non-normalized text; normalization is applied by the
//! pipeline afterwards.

use crate::error::{Error, Result};

/// Supported input file types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    /// Plain text file
    Txt,
    /// Microsoft Word document (.docx)
    Docx,
    /// PDF document
    Pdf,
}

impl FileType {
    /// Detect file type from a filename, failing fast on anything outside
    /// the supported set and naming the offending extension.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        match extension.as_str() {
            "txt" => Ok(Self::Txt),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(Error::UnsupportedFileType(extension)),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Txt => "Text File",
            Self::Docx => "Word Document (.docx)",
            Self::Pdf => "PDF",
        }
    }
}

/// Multi-format file reader
pub struct FileParser;

impl FileParser {
    /// Extract raw text from a file based on its extension
    pub fn parse(filename: &str, data: &[u8]) -> Result<String> {
        match FileType::from_filename(filename)? {
            FileType::Txt => Ok(Self::parse_text(data)),
            FileType::Docx => Self::parse_docx(filename, data),
            FileType::Pdf => Self::parse_pdf(filename, data),
        }
    }

    /// Decode plain text as UTF-8, falling back to Latin-1
    fn parse_text(data: &[u8]) -> String {
        match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(_) => data.iter().map(|&b| b as char).collect(),
        }
    }

    /// Extract text from a DOCX document, including table cells
    fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut parts: Vec<String> = Vec::new();
        for child in doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    let text = Self::paragraph_text(&p);
                    if !text.trim().is_empty() {
                        parts.push(text);
                    }
                }
                docx_rs::DocumentChild::Table(table) => {
                    for row in &table.rows {
                        let docx_rs::TableChild::TableRow(row) = row;
                        for cell in &row.cells {
                            let docx_rs::TableRowChild::TableCell(cell) = cell;
                            for content in &cell.children {
                                if let docx_rs::TableCellContent::Paragraph(p) = content {
                                    let text = Self::paragraph_text(p);
                                    if !text.trim().is_empty() {
                                        parts.push(text);
                                    }
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(parts.join("\n"))
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut text = String::new();
        for child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = child {
                for child in &run.children {
                    if let docx_rs::RunChild::Text(t) = child {
                        text.push_str(&t.text);
                    }
                }
            }
        }
        text
    }

    /// Extract text from a PDF with a sync timeout to prevent hangs on
    /// problematic fonts, falling back to lopdf
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result);
        });

        let content = match rx.recv_timeout(Duration::from_secs(60)) {
            Ok(Ok(text)) => {
                let _ = handle.join();
                text
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed: {}, trying lopdf fallback", e);
                Self::parse_pdf_fallback(filename, data)?
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!("PDF extraction timed out after 60s, trying lopdf fallback");
                Self::parse_pdf_fallback(filename, data)?
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::warn!("PDF extraction thread crashed, trying lopdf fallback");
                Self::parse_pdf_fallback(filename, data)?
            }
        };

        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF",
            ));
        }
        Ok(content)
    }

    fn parse_pdf_fallback(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let text = doc
            .extract_text(&page_numbers)
            .map_err(|e| Error::file_parse(filename, format!("PDF text extraction failed: {}", e)))?;

        if text.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }
        Ok(text)
    }
}
