//! Printed-page estimation for display metadata.

use crate::types::Section;

/// Characters of section text that fit on one printed page.
const CHARS_PER_PAGE: usize = 3000;

/// Estimates the printed page count from total section text length.
/// Always at least 1.
pub fn estimate_pages(sections: &[Section]) -> u32 {
    let total: usize = sections
        .iter()
        .map(|section| section.title.chars().count() + section.content.chars().count())
        .sum();
    (total.div_ceil(CHARS_PER_PAGE)).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(content: &str) -> Section {
        Section {
            title: "T".to_string(),
            content: content.to_string(),
            section_number: 1,
            subsection_number: None,
        }
    }

    #[test]
    fn test_small_document_is_one_page() {
        assert_eq!(estimate_pages(&[section("short body")]), 1);
    }

    #[test]
    fn test_empty_section_list_is_one_page() {
        assert_eq!(estimate_pages(&[]), 1);
    }

    #[test]
    fn test_long_content_rounds_up() {
        let long = "x".repeat(CHARS_PER_PAGE * 2 + 1);
        assert_eq!(estimate_pages(&[section(&long)]), 3);
    }

    #[test]
    fn test_adding_content_never_decreases_estimate() {
        let base = "x".repeat(CHARS_PER_PAGE);
        let more = "x".repeat(CHARS_PER_PAGE * 3);
        let small = estimate_pages(&[section(&base)]);
        let large = estimate_pages(&[section(&base), section(&more)]);
        assert!(large >= small);
    }
}
