use std::sync::Arc;
use dr_core::{CompletionModel, Result, Settings};

pub mod chat;

pub use chat::ChatCompletionModel;

/// Build the completion model for `settings`, or `None` when summaries are unavailable.
pub fn create_model(settings: &Settings) -> Result<Option<Arc<dyn CompletionModel>>> {
    let model = ChatCompletionModel::from_settings(settings)?;
    if let Some(model) = &model {
        tracing::debug!("🧠 Using completion model {:?}", model);
    }
    Ok(model.map(|m| Arc::new(m) as Arc<dyn CompletionModel>))
}
