pub mod models;
pub mod summarize;

pub use models::create_model;
pub use summarize::{summarize, summarize_with_settings, SummaryOutcome};

pub mod prelude {
    pub use super::models::{create_model, ChatCompletionModel};
    pub use super::summarize::{build_prompt, summarize, summarize_with_settings, SummaryOutcome};
    pub use dr_core::{CompletionModel, Error, Result, Settings};
}
