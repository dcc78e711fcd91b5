//! Property-based tests for the contract engine.
//!
//! Exercises parser totality, positional numbering, renderer determinism and
//! estimator monotonicity over generated inputs.

use contract_engine::types::ContractType;
use contract_engine::{estimate_pages, parse_sections, render_html, Section};
use proptest::prelude::*;

fn section(title: &str, content: &str, number: u32, sub: Option<u32>) -> Section {
    Section {
        title: title.to_string(),
        content: content.to_string(),
        section_number: number,
        subsection_number: sub,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Parser Totality
    // ============================================================

    #[test]
    fn parser_never_panics_and_returns_at_least_one_section(input in any::<String>()) {
        let sections = parse_sections(&input);
        prop_assert!(!sections.is_empty());
    }

    #[test]
    fn parser_tolerates_malformed_markup(
        fragments in proptest::collection::vec("[<>/a-z1-6\" =]{0,30}", 0..20)
    ) {
        let input = fragments.concat();
        let sections = parse_sections(&input);
        prop_assert!(!sections.is_empty());
    }

    // ============================================================
    // Positional Numbering
    // ============================================================

    #[test]
    fn well_formed_headings_number_one_to_n(
        titles in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,24}", 1..8)
    ) {
        let mut text = String::new();
        for (index, title) in titles.iter().enumerate() {
            text.push_str(&format!("<h1>{}</h1><p>Body {} text.</p>", title, index));
        }

        let sections = parse_sections(&text);
        prop_assert_eq!(sections.len(), titles.len());
        for (index, section) in sections.iter().enumerate() {
            prop_assert_eq!(section.section_number, (index + 1) as u32);
            prop_assert!(section.subsection_number.is_none());
        }
    }

    #[test]
    fn number_pairs_are_unique(
        shape in proptest::collection::vec(0usize..4, 1..6)
    ) {
        // shape[i] = number of subsections under top-level section i
        let mut text = String::new();
        for (index, subs) in shape.iter().enumerate() {
            text.push_str(&format!("<h1>Section {}</h1><p>body</p>", index));
            for sub in 0..*subs {
                text.push_str(&format!("<h2>Sub {}</h2><p>sub body</p>", sub));
            }
        }

        let sections = parse_sections(&text);
        let mut pairs: Vec<_> = sections
            .iter()
            .map(|s| (s.section_number, s.subsection_number))
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        prop_assert_eq!(pairs.len(), before);
    }

    // ============================================================
    // Renderer Determinism
    // ============================================================

    #[test]
    fn renderer_is_deterministic(
        id in "[0-9a-f]{8}",
        titles in proptest::collection::vec("[A-Za-z ]{1,20}", 1..5)
    ) {
        let sections: Vec<Section> = titles
            .iter()
            .enumerate()
            .map(|(index, title)| section(title, "<p>body</p>", (index + 1) as u32, None))
            .collect();

        let first = render_html(ContractType::TermsOfService, &id, &sections);
        let second = render_html(ContractType::TermsOfService, &id, &sections);
        prop_assert_eq!(first, second);
    }

    // ============================================================
    // Estimator
    // ============================================================

    #[test]
    fn estimate_is_positive(content in "[a-z ]{0,5000}") {
        let sections = vec![section("Title", &content, 1, None)];
        prop_assert!(estimate_pages(&sections) >= 1);
    }

    #[test]
    fn estimate_never_decreases_with_more_content(
        base in "[a-z ]{0,2000}",
        extra in "[a-z ]{1,2000}"
    ) {
        let small = vec![section("Title", &base, 1, None)];
        let large = vec![
            section("Title", &base, 1, None),
            section("More", &extra, 2, None),
        ];
        prop_assert!(estimate_pages(&large) >= estimate_pages(&small));
    }
}
