use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Heading grammar: arabic dotted numbering ("3", "3.1", "3.1.2."),
/// Roman numerals Ⅰ–Ⅸ with an optional sub-level ("Ⅱ-4"), or the
/// chapter form "제N장". The marker may be followed directly by the
/// title text.
const HEADING_PATTERN: &str =
    r"^(제\d+장|[ⅠⅡⅢⅣⅤⅥⅦⅧⅨ](?:[-.]\d+)*[.)]?|\d+(?:\.\d+)*[.)]?)[ \t]*(\S.*)$";

/// Minimum trimmed heading length in characters; shorter matches are
/// noise (page numbers, list markers) and stay in the body.
pub const DEFAULT_MIN_HEADING_CHARS: usize = 5;

/// One titled, numbered span of a requirement document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Ordinal heading marker ("3.1", "Ⅱ-4", "제3장"), if any.
    pub number: Option<String>,
    /// Heading text after the marker.
    pub title: String,
    /// Body lines up to the next heading, `\n`-joined and trimmed.
    pub body: String,
}

impl Section {
    /// Display label: `"<number> <title>"`, or the bare title when no
    /// marker was captured. Non-empty for any segmented section.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.number {
            Some(number) => format!("{number} {}", self.title),
            None => self.title.clone(),
        }
    }

    /// Title and body as one span, the query text for scoring.
    #[must_use]
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }
}

/// Ordered segmentation output. Sections are keyed by position; the
/// label index is a convenience lookup that retains every occurrence
/// of a duplicated label instead of overwriting earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentedDocument {
    sections: Vec<Section>,
    label_index: IndexMap<String, Vec<usize>>,
}

impl SegmentedDocument {
    fn push(&mut self, section: Section) {
        let label = section.label();
        let position = self.sections.len();
        self.sections.push(section);
        self.label_index.entry(label).or_default().push(position);
    }

    /// Sections in heading order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when no heading was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Positions of every section carrying `label`, in document order.
    #[must_use]
    pub fn positions_for_label(&self, label: &str) -> &[usize] {
        self.label_index
            .get(label)
            .map_or(&[], |positions| positions.as_slice())
    }

    /// All distinct labels in first-occurrence order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.label_index.keys().map(String::as_str)
    }
}

/// Single-pass heading segmenter for requirement documents.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    heading: Regex,
    min_heading_chars: usize,
}

impl SectionSegmenter {
    /// Creates a segmenter with a custom minimum heading length.
    #[must_use]
    pub fn new(min_heading_chars: usize) -> Self {
        Self {
            heading: Regex::new(HEADING_PATTERN).expect("valid heading pattern"),
            min_heading_chars,
        }
    }

    /// Segments `text` into titled sections.
    ///
    /// Lines before the first heading are dropped. A blank line never
    /// terminates a section on its own; bodies may span blank lines up
    /// to the next heading. Zero recognized headings yields an empty
    /// result, not an error.
    #[must_use]
    pub fn segment(&self, text: &str) -> SegmentedDocument {
        let mut result = SegmentedDocument::default();
        let mut open: Option<(Section, Vec<String>)> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if let Some((number, title)) = self.match_heading(line) {
                if let Some((section, body)) = open.take() {
                    result.push(close_section(section, body));
                }
                open = Some((
                    Section {
                        number: Some(number),
                        title,
                        body: String::new(),
                    },
                    Vec::new(),
                ));
            } else if let Some((_, body)) = open.as_mut() {
                body.push(line.to_string());
            }
        }
        if let Some((section, body)) = open.take() {
            result.push(close_section(section, body));
        }
        result
    }

    fn match_heading(&self, line: &str) -> Option<(String, String)> {
        if line.chars().count() < self.min_heading_chars {
            return None;
        }
        let captures = self.heading.captures(line)?;
        let number = captures[1].trim().to_string();
        let title = captures[2].trim().to_string();
        if title.is_empty() {
            return None;
        }
        Some((number, title))
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_HEADING_CHARS)
    }
}

fn close_section(mut section: Section, body: Vec<String>) -> Section {
    section.body = body.join("\n").trim().to_string();
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_dotted_numbering() {
        let segmenter = SectionSegmenter::default();
        let result = segmenter.segment("3.1 보안 기술 명시\n3.2 데이터 수집 방법\n3.3 유지보수 방안");
        assert_eq!(result.len(), 3);
        let numbers: Vec<_> = result
            .sections()
            .iter()
            .map(|s| s.number.clone().unwrap())
            .collect();
        assert_eq!(numbers, vec!["3.1", "3.2", "3.3"]);
        assert!(result.sections().iter().all(|s| !s.label().is_empty()));
    }

    #[test]
    fn zero_headings_yield_empty_result() {
        let segmenter = SectionSegmenter::default();
        let result = segmenter.segment("그냥 본문 텍스트\n항목 구분 기호 없음");
        assert!(result.is_empty());
    }

    #[test]
    fn preamble_is_dropped_and_bodies_accumulate() {
        let segmenter = SectionSegmenter::default();
        let text = "표지 내용은 버려진다\n\n1. 사업 개요 소개\n본 사업은 교통정보 시스템 구축이다.\n\n계속되는 본문 단락.\n2. 추진 일정 안내\n일정은 6개월로 진행한다.";
        let result = segmenter.segment(text);
        assert_eq!(result.len(), 2);
        let first = &result.sections()[0];
        assert_eq!(first.number.as_deref(), Some("1."));
        assert!(first.body.contains("교통정보"));
        assert!(first.body.contains("계속되는 본문"));
        assert_eq!(result.sections()[1].body, "일정은 6개월로 진행한다.");
    }

    #[test]
    fn short_marker_lines_stay_in_body() {
        let segmenter = SectionSegmenter::default();
        let text = "1. 사업 개요 소개\n3. 끝\n이어지는 본문";
        let result = segmenter.segment(text);
        assert_eq!(result.len(), 1);
        assert!(result.sections()[0].body.contains("3. 끝"));
    }

    #[test]
    fn roman_and_chapter_markers_are_recognized() {
        let segmenter = SectionSegmenter::default();
        let text = "Ⅱ-4 시스템 기능 요구사항\n기능 목록 본문\n제3장 사업관리 방안\n관리 본문";
        let result = segmenter.segment(text);
        assert_eq!(result.len(), 2);
        assert_eq!(result.sections()[0].number.as_deref(), Some("Ⅱ-4"));
        assert_eq!(result.sections()[1].number.as_deref(), Some("제3장"));
    }

    #[test]
    fn duplicate_labels_retain_both_occurrences() {
        let segmenter = SectionSegmenter::default();
        let text = "3.1 보안 기술 명시\n첫 번째 본문\n3.1 보안 기술 명시\n두 번째 본문";
        let result = segmenter.segment(text);
        assert_eq!(result.len(), 2);
        assert_eq!(result.positions_for_label("3.1 보안 기술 명시"), &[0, 1]);
        assert_eq!(result.labels().collect::<Vec<_>>(), ["3.1 보안 기술 명시"]);
        assert_eq!(result.sections()[0].body, "첫 번째 본문");
        assert_eq!(result.sections()[1].body, "두 번째 본문");
    }

    #[test]
    fn segmentation_is_idempotent() {
        let segmenter = SectionSegmenter::default();
        let text = "1. 사업 개요 소개\n본문입니다\n\n2.1 기능 요구사항 정의\n상세 기능";
        let first = segmenter.segment(text);
        let second = segmenter.segment(text);
        assert_eq!(first.sections(), second.sections());
    }
}
