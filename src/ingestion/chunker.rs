//! Paragraph-aware chunking with overlap and offset tracking

use crate::config::ChunkingConfig;
use crate::types::{Chunk, DocId};

/// Splits normalized text into overlapping, size-bounded chunks.
///
/// Paragraphs are the atomic unit: a chunk is always a contiguous run of
/// whole paragraphs, and a paragraph longer than `chunk_size` becomes its
/// own chunk rather than being split. Each chunk records the index of its
/// first paragraph and the running character offset (separators included)
/// at which its buffer was opened, so offsets are non-decreasing and the
/// first chunk always starts at 0.
pub struct ParagraphChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Trailing paragraphs carried into the next chunk for continuity
    overlap_paragraphs: usize,
}

impl ParagraphChunker {
    pub fn new(chunk_size: usize, overlap_paragraphs: usize) -> Self {
        Self {
            chunk_size,
            overlap_paragraphs,
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.overlap_paragraphs)
    }

    /// Chunk already-normalized text.
    ///
    /// Lengths and offsets are measured in characters, with each paragraph
    /// boundary counting the two characters of its blank-line separator.
    /// Degenerate input (no non-empty paragraph) yields exactly one chunk
    /// covering the whole text at paragraph index 0, offset 0.
    pub fn chunk(&self, text: &str, doc_id: &DocId) -> Vec<Chunk> {
        let paragraphs: Vec<&str> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut chunks = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        // Characters in buffered paragraphs, separators excluded
        let mut buffer_len = 0usize;
        // Characters consumed from document start, separators included
        let mut consumed = 0usize;
        let mut buffer_start_index = 0usize;
        let mut buffer_offset = 0usize;

        for (para_idx, para) in paragraphs.iter().enumerate() {
            let para_chars = para.chars().count();

            if buffer_len + para_chars > self.chunk_size && !buffer.is_empty() {
                chunks.push(self.emit(&buffer, doc_id, buffer_start_index, buffer_offset));

                if self.overlap_paragraphs > 0 && buffer.len() > self.overlap_paragraphs {
                    // Retain the tail of the closed buffer for continuity
                    // across the boundary.
                    buffer.drain(..buffer.len() - self.overlap_paragraphs);
                    buffer_len = buffer.iter().map(|p| p.chars().count()).sum();
                    buffer_start_index = para_idx - self.overlap_paragraphs;
                    buffer_offset =
                        consumed - buffer.iter().map(|p| p.chars().count() + 2).sum::<usize>();
                } else {
                    // Closed buffer too small to overlap: the next buffer
                    // opens at the paragraph about to be consumed.
                    buffer.clear();
                    buffer_len = 0;
                    buffer_start_index = para_idx;
                    buffer_offset = consumed;
                }
            }

            buffer.push(para);
            buffer_len += para_chars;
            consumed += para_chars + 2;
        }

        if !buffer.is_empty() {
            chunks.push(self.emit(&buffer, doc_id, buffer_start_index, buffer_offset));
        }

        if chunks.is_empty() {
            chunks.push(Chunk {
                text: text.to_string(),
                doc_id: doc_id.clone(),
                paragraph_index: 0,
                char_offset: 0,
            });
        }

        chunks
    }

    fn emit(
        &self,
        buffer: &[&str],
        doc_id: &DocId,
        paragraph_index: usize,
        char_offset: usize,
    ) -> Chunk {
        Chunk {
            text: buffer.join("\n\n"),
            doc_id: doc_id.clone(),
            paragraph_index,
            char_offset,
        }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::from_config(&ChunkingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_id() -> DocId {
        DocId::from("D1")
    }

    fn paragraph(c: char, len: usize) -> String {
        std::iter::repeat(c).take(len).collect()
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = ParagraphChunker::default().chunk("Name: Alice\n\nAge: 30", &doc_id());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Name: Alice\n\nAge: 30");
        assert_eq!(chunks[0].paragraph_index, 0);
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn test_two_oversized_paragraphs_split() {
        let text = format!("{}\n\n{}", paragraph('a', 1500), paragraph('b', 1500));
        let chunks = ParagraphChunker::new(2000, 1).chunk(&text, &doc_id());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].paragraph_index, 0);
        assert_eq!(chunks[0].char_offset, 0);
        // The closed buffer held a single paragraph, so no overlap is
        // retained and the second chunk opens after 1500 chars + separator.
        assert_eq!(chunks[1].paragraph_index, 1);
        assert_eq!(chunks[1].char_offset, 1502);
        assert_eq!(chunks[1].text, paragraph('b', 1500));
    }

    #[test]
    fn test_overlap_retains_last_paragraph() {
        let text = format!(
            "{}\n\n{}\n\n{}",
            paragraph('a', 800),
            paragraph('b', 800),
            paragraph('c', 800)
        );
        let chunks = ParagraphChunker::new(2000, 1).chunk(&text, &doc_id());

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0].text,
            format!("{}\n\n{}", paragraph('a', 800), paragraph('b', 800))
        );
        // Second buffer is seeded with the closed buffer's last paragraph.
        assert_eq!(
            chunks[1].text,
            format!("{}\n\n{}", paragraph('b', 800), paragraph('c', 800))
        );
        assert_eq!(chunks[1].paragraph_index, 1);
        assert_eq!(chunks[1].char_offset, 802);
    }

    #[test]
    fn test_oversized_paragraph_is_never_split() {
        let big = paragraph('x', 5000);
        let text = format!("small\n\n{}\n\ntail", big);
        let chunks = ParagraphChunker::new(2000, 1).chunk(&text, &doc_id());

        assert!(chunks.iter().any(|c| c.text.contains(&big)));
        for chunk in &chunks {
            for para in chunk.text.split("\n\n") {
                assert!(para == "small" || para == big || para == "tail");
            }
        }
    }

    #[test]
    fn test_coverage_reconstructs_paragraph_sequence() {
        let paragraphs: Vec<String> = (0..12)
            .map(|i| format!("paragraph {} {}", i, paragraph('p', 40 * (i % 4 + 1))))
            .collect();
        let text = paragraphs.join("\n\n");
        let chunks = ParagraphChunker::new(150, 1).chunk(&text, &doc_id());

        // Deduplicate the single-paragraph overlap while rebuilding the
        // original sequence in order.
        let mut rebuilt: Vec<&str> = Vec::new();
        for chunk in &chunks {
            for para in chunk.text.split("\n\n") {
                if rebuilt.last() != Some(&para) {
                    rebuilt.push(para);
                }
            }
        }
        let expected: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_offsets_are_non_decreasing() {
        let paragraphs: Vec<String> = (0..20)
            .map(|i| paragraph(char::from(b'a' + (i % 26) as u8), 30 + 17 * i))
            .collect();
        let text = paragraphs.join("\n\n");
        for overlap in [0, 1, 2] {
            let chunks = ParagraphChunker::new(200, overlap).chunk(&text, &doc_id());
            let offsets: Vec<usize> = chunks.iter().map(|c| c.char_offset).collect();
            let mut sorted = offsets.clone();
            sorted.sort_unstable();
            assert_eq!(offsets, sorted, "offsets regressed with overlap {}", overlap);
            assert_eq!(chunks[0].char_offset, 0);
        }
    }

    #[test]
    fn test_degenerate_input_single_empty_chunk() {
        let chunks = ParagraphChunker::default().chunk("", &doc_id());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
        assert_eq!(chunks[0].paragraph_index, 0);
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        // Multibyte paragraphs: offsets advance by char count + separator.
        let text = format!("{}\n\n{}", paragraph('é', 30), paragraph('ü', 30));
        let chunks = ParagraphChunker::new(40, 1).chunk(&text, &doc_id());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].char_offset, 32);
    }

    #[test]
    fn test_zero_overlap_never_repeats() {
        let text = (0..6)
            .map(|i| format!("para {} {}", i, paragraph('z', 60)))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = ParagraphChunker::new(100, 0).chunk(&text, &doc_id());
        let total: usize = chunks.iter().map(|c| c.text.split("\n\n").count()).sum();
        assert_eq!(total, 6);
    }
}
