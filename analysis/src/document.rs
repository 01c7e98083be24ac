use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable text document handed over by the extraction collaborator.
///
/// The engine never mutates document text; every derived view
/// (paragraphs, sections) is recomputed from `text` on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document id.
    pub id: Uuid,
    /// Human-readable title, usually derived from the source filename.
    pub title: String,
    /// Full `\n`-separated UTF-8 text.
    pub text: String,
}

impl Document {
    /// Creates a document with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
        }
    }

    /// Splits the text into paragraphs on blank-line boundaries,
    /// keeping only paragraphs of at least `min_chars` characters.
    #[must_use]
    pub fn paragraphs(&self, min_chars: usize) -> Vec<String> {
        split_paragraphs(&self.text, min_chars)
    }
}

/// Splits raw text into blank-line-delimited paragraphs, dropping
/// paragraphs shorter than `min_chars` characters. Character counts
/// are Unicode scalar counts, not byte lengths.
#[must_use]
pub fn split_paragraphs(text: &str, min_chars: usize) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&mut current, &mut paragraphs, min_chars);
        } else {
            current.push(line);
        }
    }
    flush_paragraph(&mut current, &mut paragraphs, min_chars);
    paragraphs
}

fn flush_paragraph(current: &mut Vec<&str>, paragraphs: &mut Vec<String>, min_chars: usize) {
    if current.is_empty() {
        return;
    }
    let paragraph = current.join("\n").trim().to_string();
    current.clear();
    if paragraph.chars().count() >= min_chars {
        paragraphs.push(paragraph);
    }
}

/// Derives a display title from an uploaded filename by stripping the
/// final extension ("proposal.pdf" → "proposal").
#[must_use]
pub fn title_from_filename(filename: &str) -> String {
    let trimmed = filename.trim();
    match trimmed.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.trim().to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_split_on_blank_lines_and_honor_min_length() {
        let text = "first paragraph long enough to pass the cutoff\n\nshort\n\n두 번째 문단은 충분히 긴 한국어 문장입니다 정말로 확실히 길어요";
        let paragraphs = split_paragraphs(text, 30);
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|p| p.chars().count() >= 30));
    }

    #[test]
    fn paragraphs_keep_interior_lines_together() {
        let text = "line one of the same paragraph\nline two of the same paragraph";
        let paragraphs = split_paragraphs(text, 10);
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].contains('\n'));
    }

    #[test]
    fn document_exposes_its_paragraph_view() {
        let document = Document::new(
            title_from_filename("제안서_최종.pdf"),
            "첫 번째 문단은 충분히 긴 한국어 문장으로 구성되어 있습니다\n\n짧음",
        );
        assert_eq!(document.title, "제안서_최종");
        let paragraphs = document.paragraphs(30);
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].contains("첫 번째 문단"));
    }

    #[test]
    fn title_strips_extension() {
        assert_eq!(title_from_filename("제안서_최종.pdf"), "제안서_최종");
        assert_eq!(title_from_filename("  report.v2.txt "), "report.v2");
        assert_eq!(title_from_filename("no_extension"), "no_extension");
    }
}
