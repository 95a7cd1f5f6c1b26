use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_FEED_URL: &str = "https://techcrunch.com/category/artificial-intelligence/feed/";
pub const DEFAULT_ARXIV_URL: &str = "http://export.arxiv.org/api/query";
pub const DEFAULT_KEYWORDS: &str = "Embodied AI\nAutonomous Driving\nHumanoid Robot\nEnd-to-end Driving";

pub const MISSING_KEY_WARNING: &str = "No API key detected, AI summaries are unavailable";

/// Raw values as the user typed them into the settings panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsInput {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// Configuration in effect for one user action.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
    pub keywords: Vec<String>,
}

impl Settings {
    /// Combine the server's provisioned secret with what the user entered.
    pub fn resolve(provisioned_key: Option<&str>, input: &SettingsInput) -> Self {
        Self {
            api_key: resolve_api_key(provisioned_key, input.api_key.as_deref()),
            base_url: non_blank(input.base_url.as_deref()).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model_name: non_blank(input.model_name.as_deref()).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            keywords: parse_keywords(input.keywords.as_deref().unwrap_or(DEFAULT_KEYWORDS)),
        }
    }

    pub fn summaries_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// The keyword summaries are written about.
    pub fn subject(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }

    pub fn warning(&self) -> Option<&'static str> {
        (!self.summaries_enabled()).then_some(MISSING_KEY_WARNING)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url(&self.base_url).map(|_| ())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, &SettingsInput::default())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("keywords", &self.keywords)
            .finish()
    }
}

/// A provisioned secret beats the entered key; blank values count as absent.
pub fn resolve_api_key(provisioned: Option<&str>, entered: Option<&str>) -> Option<String> {
    non_blank(provisioned).or_else(|| non_blank(entered))
}

/// One keyword per line, trimmed, blank lines dropped.
pub fn parse_keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::Config(format!("unsupported URL scheme `{}` in {}", scheme, url))),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_trims_and_drops_blanks() {
        let keywords = parse_keywords("  Embodied AI \n\n\t\nHumanoid Robot\r\n   ");
        assert_eq!(keywords, vec!["Embodied AI", "Humanoid Robot"]);
    }

    #[test]
    fn test_parse_keywords_empty_input() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords("\n  \n").is_empty());
    }

    #[test]
    fn test_provisioned_key_wins() {
        assert_eq!(
            resolve_api_key(Some("sk-server"), Some("sk-user")),
            Some("sk-server".to_string())
        );
        assert_eq!(resolve_api_key(None, Some("sk-user")), Some("sk-user".to_string()));
        assert_eq!(resolve_api_key(Some("  "), Some("sk-user")), Some("sk-user".to_string()));
        assert_eq!(resolve_api_key(None, Some("")), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn test_defaults_apply_when_input_blank() {
        let input = SettingsInput {
            api_key: None,
            base_url: Some("   ".to_string()),
            model_name: None,
            keywords: None,
        };
        let settings = Settings::resolve(None, &input);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.model_name, DEFAULT_MODEL);
        assert_eq!(settings.keywords.len(), 4);
        assert_eq!(settings.subject(), Some("Embodied AI"));
        assert_eq!(settings.warning(), Some(MISSING_KEY_WARNING));
    }

    #[test]
    fn test_user_overrides() {
        let input = SettingsInput {
            api_key: Some("sk-user".to_string()),
            base_url: Some(" https://api.openai.com/v1 ".to_string()),
            model_name: Some("gpt-4o-mini".to_string()),
            keywords: Some("Robotics".to_string()),
        };
        let settings = Settings::resolve(None, &input);
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.model_name, "gpt-4o-mini");
        assert_eq!(settings.keywords, vec!["Robotics"]);
        assert!(settings.summaries_enabled());
        assert!(settings.warning().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_keyword_box_means_no_keywords() {
        let input = SettingsInput {
            keywords: Some(String::new()),
            ..Default::default()
        };
        let settings = Settings::resolve(None, &input);
        assert!(settings.keywords.is_empty());
        assert_eq!(settings.subject(), None);
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings::resolve(Some("sk-secret"), &SettingsInput::default());
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://api.deepseek.com").is_ok());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }
}
