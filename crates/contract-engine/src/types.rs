//! Domain types shared across the contract generation pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum trimmed length of a business description.
pub const MIN_DESCRIPTION_CHARS: usize = 10;
/// Maximum trimmed length of a business description.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("business description must be at least {MIN_DESCRIPTION_CHARS} characters long")]
    DescriptionTooShort,

    #[error("business description must be at most {MAX_DESCRIPTION_CHARS} characters long")]
    DescriptionTooLong,

    #[error("language must be a two-letter lowercase code, got {0:?}")]
    InvalidLanguage(String),
}

/// Available contract types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    TermsOfService,
    PrivacyPolicy,
}

impl ContractType {
    pub const ALL: [ContractType; 2] = [ContractType::TermsOfService, ContractType::PrivacyPolicy];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::TermsOfService => "terms_of_service",
            ContractType::PrivacyPolicy => "privacy_policy",
        }
    }

    /// Human-readable document title.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContractType::TermsOfService => "Terms of Service",
            ContractType::PrivacyPolicy => "Privacy Policy",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated business description: trimmed on construction, between
/// [`MIN_DESCRIPTION_CHARS`] and [`MAX_DESCRIPTION_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct BusinessDescription(String);

impl BusinessDescription {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let chars = trimmed.chars().count();
        if chars < MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort);
        }
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BusinessDescription {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<BusinessDescription> for String {
    fn from(description: BusinessDescription) -> Self {
        description.0
    }
}

/// ISO 639-1 language codes: exactly two lowercase ASCII letters.
pub fn is_valid_language_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase())
}

/// One structural unit of a parsed contract.
///
/// Parent sections carry `subsection_number: None`; subsection rows repeat
/// their parent's `section_number` with a 1-based `subsection_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    pub section_number: u32,
    pub subsection_number: Option<u32>,
}
