//! Contract text processing
//!
//! This crate holds the pure half of the generation pipeline: once a
//! completion stream has been accumulated, the text is parsed into numbered
//! sections, rendered into a standalone HTML document, and sized for display.
//! Nothing here performs I/O and every function is deterministic.

pub mod pagination;
pub mod parser;
pub mod renderer;
pub mod types;

pub use pagination::estimate_pages;
pub use parser::parse_sections;
pub use renderer::render_html;
pub use types::{BusinessDescription, ContractType, Section, ValidationError};

/// ContractEngine entry point
pub struct ContractEngine;

impl ContractEngine {
    pub fn new() -> Self {
        Self
    }

    /// Parses raw generated text into an ordered flat section list.
    pub fn parse(&self, raw: &str) -> Vec<Section> {
        parser::parse_sections(raw)
    }

    /// Renders sections into a standalone HTML document.
    pub fn render(
        &self,
        contract_type: ContractType,
        document_id: &str,
        sections: &[Section],
    ) -> String {
        renderer::render_html(contract_type, document_id, sections)
    }

    /// Estimates the printed page count of a section list.
    pub fn estimate_pages(&self, sections: &[Section]) -> u32 {
        pagination::estimate_pages(sections)
    }
}

impl Default for ContractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_runs_full_pipeline() {
        let engine = ContractEngine::new();
        let raw = "<h1>Introduction</h1><p>These terms govern use of the service.</p>\
                   <h2>Acceptance</h2><p>Use constitutes acceptance.</p>\
                   <h1>Liability</h1><p>Liability is limited.</p>";

        let sections = engine.parse(raw);
        assert_eq!(sections.len(), 3);

        let html = engine.render(ContractType::TermsOfService, "doc-1", &sections);
        assert!(html.contains("1. Introduction"));
        assert!(html.contains("1.1 Acceptance"));
        assert!(html.contains("2. Liability"));

        assert!(engine.estimate_pages(&sections) >= 1);
    }

    #[test]
    fn test_engine_handles_unstructured_text() {
        let engine = ContractEngine::new();
        let sections = engine.parse("just a blob of text with no headings at all in it");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_number, 1);
    }
}
