//! Prompt templates for key-value record extraction

use crate::types::Chunk;

/// System instruction defining the record contract
pub const SYSTEM_PROMPT: &str = r#"You are an extraction assistant. Given an input text chunk, return a JSON array of objects. Each object must have the fields:
- key (string): canonical name for the data point
- value (string): extracted value (preserve original words if possible)
- raw_value (string): exact substring from the input that supports this pair
- comments (string): DETAILED contextual commentary including: temporal context (as of what date/year), format notes (ISO dates, currency format), units of measurement, how this data point relates to other information, ambiguity notes, transformations applied, and analytical significance. Write 1-3 sentences of meaningful context.
- provenance (string): locator of the form <doc_id>:<paragraph_index>:<char_start>-<char_end> for where this fact was found
- confidence (number): 0.0-1.0

IMPORTANT: The 'comments' field must be descriptive and informative, providing rich context about the data point. Never leave it empty.

Return only valid JSON. If no key/value pairs are present, return an empty array: []"#;

/// Build the per-chunk user prompt, carrying the chunk's document identity
/// and an optional priority-key hint.
pub fn build_user_prompt(chunk: &Chunk, priority_keys: Option<&[String]>) -> String {
    let keys_hint = match priority_keys {
        Some(keys) if !keys.is_empty() => format!(
            "\nPrioritize extracting these keys if present: {}",
            keys.join(", ")
        ),
        _ => String::new(),
    };

    format!(
        r#"doc_id: {doc_id}
paragraph_index: {paragraph_index}
text: """
{text}
"""

Rules:
1. Create separate objects for each distinct factual item (date, amount, name, address, phone, product, status, etc.). Do not omit any factual statements.
2. If a single sentence implies multiple keys (e.g., "John Doe, 42, lives at 12 Main St, pays $1200/month"), create separate objects for name, age, address, rent.
3. If a value is ambiguous, include both candidate values in 'value' separated by " | " and explain in comments.
4. Normalize dates to ISO (YYYY-MM-DD) in comments or raw_value only if you can be certain; otherwise keep original in value and note attempts in comments.
5. Do not hallucinate missing facts.{keys_hint}

Return only the JSON array."#,
        doc_id = chunk.doc_id,
        paragraph_index = chunk.paragraph_index,
        text = chunk.text,
        keys_hint = keys_hint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocId;

    fn chunk() -> Chunk {
        Chunk {
            text: "Name: Alice".to_string(),
            doc_id: DocId::from("D2"),
            paragraph_index: 3,
            char_offset: 145,
        }
    }

    #[test]
    fn test_prompt_carries_chunk_identity() {
        let prompt = build_user_prompt(&chunk(), None);
        assert!(prompt.contains("doc_id: D2"));
        assert!(prompt.contains("paragraph_index: 3"));
        assert!(prompt.contains("Name: Alice"));
        assert!(!prompt.contains("Prioritize extracting"));
    }

    #[test]
    fn test_priority_keys_hint() {
        let keys = vec!["name".to_string(), "email".to_string()];
        let prompt = build_user_prompt(&chunk(), Some(&keys));
        assert!(prompt.contains("Prioritize extracting these keys if present: name, email"));
    }

    #[test]
    fn test_empty_priority_keys_omit_hint() {
        let prompt = build_user_prompt(&chunk(), Some(&[]));
        assert!(!prompt.contains("Prioritize extracting"));
    }
}
