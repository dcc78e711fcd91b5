//! Section parsing for generated contract text.
//!
//! The generation prompt instructs the model to emit HTML headings per
//! section and subsection, but the output is untrusted and may deviate.
//! Parsing is total: any input yields at least one section, degrading to a
//! single catch-all section when no headings can be found.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Section;

/// Title used when the text carries no recognizable headings.
pub const DEFAULT_SECTION_TITLE: &str = "Full Document";

lazy_static! {
    // Closing tag level is intentionally loose: unbalanced output like
    // <h2>...</h3> still delimits a heading.
    static ref HEADING_RE: Regex =
        Regex::new(r"(?is)<h([1-6])[^>]*>(.*?)</h[1-6]\s*>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
}

#[derive(Debug)]
struct Heading {
    level: u8,
    title: String,
    start: usize,
    end: usize,
}

#[derive(Debug)]
struct ParsedSection {
    title: String,
    content: String,
    subsections: Vec<(String, String)>,
}

/// Parses generated text into an ordered, flat section list.
///
/// The shallowest heading level present is the top level; headings exactly
/// one level deeper open subsections, anything deeper stays embedded in
/// content. Numbering is positional and ignores any numbering literally
/// present in the heading text.
pub fn parse_sections(raw: &str) -> Vec<Section> {
    let headings = scan_headings(raw);
    if headings.is_empty() {
        return vec![catch_all(raw)];
    }

    let top_level = headings.iter().map(|h| h.level).min().unwrap_or(1);
    let sub_level = top_level + 1;

    // Only top-level and subsection headings delimit content; deeper
    // headings remain part of the enclosing section's markup.
    let tracked: Vec<&Heading> = headings.iter().filter(|h| h.level <= sub_level).collect();

    let mut parsed: Vec<ParsedSection> = Vec::new();
    for (index, heading) in tracked.iter().enumerate() {
        let content_end = tracked
            .get(index + 1)
            .map(|next| next.start)
            .unwrap_or(raw.len());
        let content = raw[heading.end..content_end].trim().to_string();

        if heading.level == top_level {
            parsed.push(ParsedSection {
                title: heading.title.clone(),
                content,
                subsections: Vec::new(),
            });
        } else {
            // A subsection ahead of any top-level heading gets an implicit
            // parent so numbering invariants hold.
            if parsed.is_empty() {
                parsed.push(ParsedSection {
                    title: DEFAULT_SECTION_TITLE.to_string(),
                    content: String::new(),
                    subsections: Vec::new(),
                });
            }
            let current = parsed.last_mut().unwrap();
            current.subsections.push((heading.title.clone(), content));
        }
    }

    prune_and_number(parsed)
}

fn scan_headings(raw: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(raw)
        .map(|captures| {
            let matched = captures.get(0).unwrap();
            let level: u8 = captures[1].parse().unwrap_or(1);
            Heading {
                level,
                title: strip_tags(&captures[2]),
                start: matched.start(),
                end: matched.end(),
            }
        })
        .collect()
}

/// Removes nested markup from heading text and collapses whitespace.
fn strip_tags(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn catch_all(raw: &str) -> Section {
    Section {
        title: DEFAULT_SECTION_TITLE.to_string(),
        content: raw.trim().to_string(),
        section_number: 1,
        subsection_number: None,
    }
}

/// Drops empty sections and assigns positional numbers over what remains.
/// When every section is empty the first one is kept, so the parser always
/// returns at least one section.
fn prune_and_number(parsed: Vec<ParsedSection>) -> Vec<Section> {
    let first_title = parsed
        .first()
        .map(|section| section.title.clone())
        .unwrap_or_else(|| DEFAULT_SECTION_TITLE.to_string());

    let kept: Vec<ParsedSection> = parsed
        .into_iter()
        .map(|mut section| {
            section
                .subsections
                .retain(|(_, content)| !content.is_empty());
            section
        })
        .filter(|section| !section.content.is_empty() || !section.subsections.is_empty())
        .collect();

    if kept.is_empty() {
        return vec![Section {
            title: first_title,
            content: String::new(),
            section_number: 1,
            subsection_number: None,
        }];
    }

    let mut sections = Vec::new();
    for (section_index, section) in kept.into_iter().enumerate() {
        let section_number = (section_index + 1) as u32;
        sections.push(Section {
            title: section.title,
            content: section.content,
            section_number,
            subsection_number: None,
        });
        for (sub_index, (title, content)) in section.subsections.into_iter().enumerate() {
            sections.push(Section {
                title,
                content,
                section_number,
                subsection_number: Some((sub_index + 1) as u32),
            });
        }
    }
    sections
}
