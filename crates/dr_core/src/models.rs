use async_trait::async_trait;
use std::fmt;

use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    /// Name shown in logs
    fn name(&self) -> &str;

    /// Send a single user prompt and return the text of the first choice
    async fn complete(&self, prompt: &str) -> Result<String>;
}
