use std::collections::VecDeque;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Prefixes every message with the emoji and name of the source it came from.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Install the global fmt subscriber once. `RUST_LOG` overrides the INFO default.
pub fn init_logging() {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt().with_env_filter(filter).init();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_joined_in_order() {
        let logger = Logger::new().with_prefix("📄").with_prefix("arXiv");
        assert_eq!(logger.prefix(), "📄 arXiv ");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        Logger::new().with_prefix("🌍").debug("subscriber installed once");
    }
}
