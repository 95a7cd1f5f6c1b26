pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use config::{Settings, SettingsInput};
pub use error::{Error, Result};
pub use models::CompletionModel;
pub use sources::{NewsFeed, PaperSearch};
pub use types::{NewsEntry, Paper, MAX_RESULTS};
