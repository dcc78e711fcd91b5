//! HTML rendering of parsed contract sections.
//!
//! Produces a complete standalone document: embedded styling, no external
//! assets, and nothing non-deterministic beyond the supplied document id.

use crate::types::{ContractType, Section};

const STYLE: &str = r#"    body {
      font-family: Georgia, 'Times New Roman', serif;
      color: #1a1a1a;
      background: #ffffff;
      margin: 0;
      padding: 40px 20px;
      line-height: 1.6;
    }
    .document {
      max-width: 820px;
      margin: 0 auto;
    }
    .document-title {
      font-size: 28px;
      text-align: center;
      margin-bottom: 4px;
    }
    .document-id {
      text-align: center;
      color: #6b6b6b;
      font-size: 12px;
      margin-bottom: 36px;
    }
    .section-heading {
      font-size: 20px;
      border-bottom: 1px solid #d0d0d0;
      padding-bottom: 4px;
      margin-top: 32px;
    }
    .subsection-heading {
      font-size: 16px;
      margin-top: 20px;
    }
    .section-body {
      font-size: 14px;
      text-align: justify;
    }
    .section-body p {
      margin: 10px 0;
    }
    .section-body ul, .section-body ol {
      margin: 10px 0;
      padding-left: 28px;
    }
    .section-body li {
      margin: 4px 0;
    }
    .document-footer {
      margin-top: 48px;
      padding-top: 12px;
      border-top: 1px solid #d0d0d0;
      color: #6b6b6b;
      font-size: 11px;
      text-align: center;
    }"#;

/// Renders the ordered section list into a self-contained HTML document.
///
/// Re-rendering the same inputs produces byte-identical output.
pub fn render_html(contract_type: ContractType, document_id: &str, sections: &[Section]) -> String {
    let title = contract_type.display_name();
    let mut body = String::new();

    for section in sections {
        match section.subsection_number {
            None => {
                body.push_str(&format!(
                    "      <h2 class=\"section-heading\">{}. {}</h2>\n",
                    section.section_number, section.title
                ));
            }
            Some(subsection_number) => {
                body.push_str(&format!(
                    "      <h3 class=\"subsection-heading\">{}.{} {}</h3>\n",
                    section.section_number, subsection_number, section.title
                ));
            }
        }
        if !section.content.is_empty() {
            body.push_str(&format!(
                "      <div class=\"section-body\">{}</div>\n",
                section.content
            ));
        }
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n{STYLE}\n</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"document\">\n\
         <h1 class=\"document-title\">{title}</h1>\n\
         <p class=\"document-id\">Document ID: {document_id}</p>\n\
         {body}\
         <div class=\"document-footer\">Document {document_id}</div>\n\
         </div>\n\
         </body>\n\
         </html>\n"
    )
}
