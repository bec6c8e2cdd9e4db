//! Text normalization applied to all extracted text before chunking

use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw extracted text into a stable, whitespace-consistent form.
///
/// - NFKC normalization collapses visually equivalent code points
///   (full-width digits, ligatures) to one representation
/// - Non-printable control characters are stripped, keeping `\n`, `\t`, `\r`
/// - All line terminators become `\n`
/// - Within each line, runs of spaces/tabs collapse to a single space and
///   leading/trailing whitespace is trimmed
/// - Runs of blank lines collapse to a single blank line, so paragraph
///   separators never exceed one empty line
/// - The whole document is trimmed
///
/// Pure and idempotent: `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let text: String = text
        .nfkc()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect();

    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    // Line-local whitespace cleanup, then collapse blank-line runs so a
    // paragraph separator is at most one empty line.
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;
    for line in text.split('\n') {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}
