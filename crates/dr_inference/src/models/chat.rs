use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use dr_core::{CompletionModel, Error, Result, Settings};

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Any OpenAI-compatible `/chat/completions` endpoint (DeepSeek by default).
pub struct ChatCompletionModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl ChatCompletionModel {
    pub fn new(api_key: String, base_url: &str, model_name: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name: model_name.to_string(),
        }
    }

    /// `None` when the settings carry no API key.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some(key) = settings.api_key.clone() else {
            return Ok(None);
        };
        settings.validate()?;
        Ok(Some(Self::new(key, &settings.base_url, &settings.model_name)))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl fmt::Debug for ChatCompletionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for ChatCompletionModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self.client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let response = response.json::<ChatResponse>().await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| Error::Inference("completion returned no choices".to_string()))
    }
}
