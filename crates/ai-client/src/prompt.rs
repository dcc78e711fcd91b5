//! Fixed prompt template for contract generation.
//!
//! The persona and instruction structure are not configurable per call; the
//! only variable input is the business description.

/// System persona attached to every generation request.
pub const SYSTEM_PROMPT: &str = "You are a transactional attorney with over 15+ years of \
experience, specializing in drafting precise, enforceable legal documents. You have extensive \
experience in contract law, regulatory compliance, and risk allocation strategies across \
multiple industries.";

const INSTRUCTIONS: &str = r#"Instructions: Generate a highly comprehensive and exhaustive Legal Terms of Service document for a company (e.g OpenAI, Zoom Inc.). The document should be structured with clear headings and subheadings, use formal legal language, and cover all essential legal and operational considerations.

Guidelines:
- Include proper section numbering and formatting.
- Document should be at least 10 pages long.
- Ensure the language is clear, unambiguous, and covers potential legal risks comprehensively, mirroring the depth and detail found in professional legal documents like those from Google. Avoid overly simplistic or conversational language. BE VERY PROFESSIONAL
- Identify and explain all applicable laws and regulations, including data privacy, intellectual property, and antitrust laws.
- The Terms of Service should ideally include, but not be limited to, the following sections and detailed clauses within each:
    Introduction & Acceptance of Terms: effective date; agreement to terms upon access/use; capacity to contract; modifications to terms.
    Definitions: key terms like "Service," "User," "Content," "Platform," "We," "You."
    User Accounts & Registration: account creation requirements; account security; accuracy of information; suspension or termination of accounts.
    License to Use the Service: grant of limited, non-exclusive, non-transferable license; restrictions on use.
    User Responsibilities & Conduct: acceptable use policy; compliance with applicable laws; responsibility for user-generated content; interaction with other users.
    Intellectual Property Rights: ownership of the platform; ownership of user content; license granted by user; copyright infringement policy (DMCA); trademarks.
    Content Disclaimers & Limitations: accuracy and reliability disclaimers; no endorsement of user-generated content.
    Privacy Policy: incorporation by reference; brief statement on data collection and use.
    Fees, Payments, & Subscriptions (if applicable): pricing, billing cycles; payment methods; refund policies; cancellations; taxes.
    Third-Party Services & Links: disclaimer of responsibility for third-party services.
    Disclaimers of Warranties: "AS IS" and "AS AVAILABLE" basis; no express or implied warranties.
    Limitation of Liability: exclusion of indirect and consequential damages; cap on total liability; applicability to all theories of liability.
    Indemnification: user indemnifies the service provider for claims arising from use or breach.
    Termination: right to suspend or terminate access for breach; user's right to terminate; survival of clauses.
    Governing Law & Jurisdiction: applicable law; exclusive jurisdiction for disputes.
    Dispute Resolution: arbitration clause; class action waiver; informal resolution first.
    General Provisions: entire agreement; severability; waiver; assignment; force majeure; headings for convenience only.
- IMPORTANT!: Any section not relevant to the customer's request can be omitted as long as it's not a legal requirement but make sure to add any field that might be missing but important to this request.
- IMPORTANT!: When a company's location, jurisdiction or industry is specified in the user request, make sure to include the relevant laws and regulations in the document.

Output Format:
- IMPORTANT!: Ensure the document generated is structured in HTML format that is correct and can be displayed in a browser.
- Use proper HTML tags (<h1>, <h2>, <h3>, <p>, <ul>, <li>)
- Include CSS classes for styling
- Structure with clear sections and subsections
- Ensure readability and clarity
- DO NOT start with ```html."#;

/// Builds the full instruction prompt for one generation request.
pub fn base_prompt(description: &str) -> String {
    format!("{INSTRUCTIONS}\n\nUser request: {description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_description() {
        let prompt = base_prompt("A SaaS company providing project management tools");
        assert!(prompt.ends_with("User request: A SaaS company providing project management tools"));
    }

    #[test]
    fn test_prompt_requests_html_structure() {
        let prompt = base_prompt("Any business");
        assert!(prompt.contains("<h1>, <h2>, <h3>"));
        assert!(prompt.contains("DO NOT start with ```html"));
    }

    #[test]
    fn test_system_prompt_is_the_attorney_persona() {
        assert!(SYSTEM_PROMPT.starts_with("You are a transactional attorney"));
    }
}
