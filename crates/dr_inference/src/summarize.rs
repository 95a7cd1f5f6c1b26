use serde::Serialize;
use dr_core::{CompletionModel, Settings};

use crate::models::create_model;

/// Only this many characters of the source text go into the prompt.
pub const SUMMARY_CHAR_LIMIT: usize = 1000;

/// Result of one summarization request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum SummaryOutcome {
    /// No API key configured; nothing was sent.
    Unavailable,
    Completed(String),
    /// The request failed; carries the message shown in place of the summary.
    Failed(String),
}

impl SummaryOutcome {
    fn failed(error: impl std::fmt::Display) -> Self {
        SummaryOutcome::Failed(format!("AI summary failed: {}", error))
    }

    /// Text to display, `None` when summaries are unavailable.
    pub fn into_text(self) -> Option<String> {
        match self {
            SummaryOutcome::Unavailable => None,
            SummaryOutcome::Completed(text) | SummaryOutcome::Failed(text) => Some(text),
        }
    }
}

/// The first `limit` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn build_prompt(subject: &str, text: &str) -> String {
    format!(
        "请用中文一句话总结这篇关于{}的文章核心，并列出3个关键点。\n\n原文：{}",
        subject,
        truncate_chars(text, SUMMARY_CHAR_LIMIT)
    )
}

/// Summarize `text` about `subject`. Errors are turned into a displayable outcome, never returned.
pub async fn summarize(
    model: Option<&dyn CompletionModel>,
    subject: Option<&str>,
    text: &str,
) -> SummaryOutcome {
    let Some(model) = model else {
        return SummaryOutcome::Unavailable;
    };
    let Some(subject) = subject else {
        return SummaryOutcome::failed("no keywords configured");
    };

    let prompt = build_prompt(subject, text);
    tracing::debug!("Requesting summary from {} ({} prompt chars)", model.name(), prompt.chars().count());
    match model.complete(&prompt).await {
        Ok(summary) => SummaryOutcome::Completed(summary),
        Err(e) => {
            tracing::warn!("Summary request to {} failed: {}", model.name(), e);
            SummaryOutcome::failed(e)
        }
    }
}

/// Resolve the model from `settings` and summarize about its first keyword.
pub async fn summarize_with_settings(settings: &Settings, text: &str) -> SummaryOutcome {
    match create_model(settings) {
        Ok(model) => summarize(model.as_deref(), settings.subject(), text).await,
        Err(e) => SummaryOutcome::failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dr_core::{Error, Result, SettingsInput};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(Error::Inference("quota exceeded".to_string()))
            } else {
                Ok("核心总结".to_string())
            }
        }
    }

    fn source_text(prompt: &str) -> &str {
        prompt.split_once("原文：").unwrap().1
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("短文本", 10), "短文本");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let text = "A".repeat(1500);
        let prompt = build_prompt("Robotics", &text);
        assert!(prompt.starts_with("请用中文一句话总结这篇关于Robotics的文章核心"));
        let quoted = source_text(&prompt);
        assert_eq!(quoted.chars().count(), 1000);
        assert_eq!(quoted, &text[..1000]);
    }

    #[test]
    fn test_prompt_truncates_multibyte_text() {
        let text = "机".repeat(1200);
        let prompt = build_prompt("Embodied AI", &text);
        assert_eq!(source_text(&prompt).chars().count(), 1000);
    }

    #[tokio::test]
    async fn test_unavailable_without_model() {
        let outcome = summarize(None, Some("Robotics"), "text").await;
        assert_eq!(outcome, SummaryOutcome::Unavailable);
        assert_eq!(outcome.into_text(), None);
    }

    #[tokio::test]
    async fn test_empty_key_makes_no_request() {
        let input = SettingsInput { api_key: Some(String::new()), ..Default::default() };
        // The base URL points at a closed port; any request would fail instead of being skipped.
        let mut settings = Settings::resolve(None, &input);
        settings.base_url = "http://127.0.0.1:9".to_string();
        let long = "x".repeat(5000);
        for text in ["", "short", long.as_str()] {
            assert_eq!(summarize_with_settings(&settings, text).await, SummaryOutcome::Unavailable);
        }
    }

    #[tokio::test]
    async fn test_blank_key_with_schemeless_base_url_is_unavailable() {
        let input = SettingsInput {
            api_key: Some(String::new()),
            base_url: Some("api.deepseek.com".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(None, &input);
        assert_eq!(summarize_with_settings(&settings, "text").await, SummaryOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_completed_uses_first_keyword() {
        let model = RecordingModel::default();
        let outcome = summarize(Some(&model as &dyn CompletionModel), Some("Embodied AI"), "Robots that walk.").await;
        assert_eq!(outcome, SummaryOutcome::Completed("核心总结".to_string()));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("关于Embodied AI的文章"));
        assert!(prompts[0].ends_with("原文：Robots that walk."));
    }

    #[tokio::test]
    async fn test_failure_becomes_text() {
        let model = RecordingModel { fail: true, ..Default::default() };
        let outcome = summarize(Some(&model as &dyn CompletionModel), Some("Robotics"), "text").await;
        let text = outcome.into_text().unwrap();
        assert!(text.starts_with("AI summary failed:"));
        assert!(text.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_no_keywords_is_reported_without_request() {
        let model = RecordingModel::default();
        let outcome = summarize(Some(&model as &dyn CompletionModel), None, "text").await;
        assert!(matches!(outcome, SummaryOutcome::Failed(ref m) if m.contains("no keywords")));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_caught() {
        let input = SettingsInput {
            api_key: Some("sk-test".to_string()),
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(None, &input);
        let outcome = summarize_with_settings(&settings, "text").await;
        assert!(matches!(outcome, SummaryOutcome::Failed(_)));
    }
}
