use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A tracked company and the vocabulary the synthetic generator draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    /// Hashtags without the leading `#`.
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Product or topic names substituted for `{product}` in phrases.
    pub topics: Vec<String>,
    pub positive_phrases: Vec<String>,
    pub negative_phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyConfig>,
}

/// Load and validate the tracked companies from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_companies(path: &Path) -> Result<CompaniesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompaniesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_companies(&content)
}

/// Parse and validate companies YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_companies(content: &str) -> Result<CompaniesFile, ConfigError> {
    let companies_file: CompaniesFile =
        serde_yaml::from_str(content).map_err(ConfigError::CompaniesFileParse)?;

    validate_companies(&companies_file)?;

    Ok(companies_file)
}

fn validate_companies(companies_file: &CompaniesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for company in &companies_file.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }

        if company.topics.is_empty() {
            return Err(ConfigError::Validation(format!(
                "company '{}' must list at least one topic",
                company.name
            )));
        }

        if company.positive_phrases.is_empty() || company.negative_phrases.is_empty() {
            return Err(ConfigError::Validation(format!(
                "company '{}' needs both positive and negative phrases",
                company.name
            )));
        }

        if let Some(tag) = company.hashtags.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "company '{}' has a blank hashtag '{tag}'",
                company.name
            )));
        }
    }

    Ok(())
}
