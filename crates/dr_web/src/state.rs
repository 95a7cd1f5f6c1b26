use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dr_core::{NewsFeed, PaperSearch, Settings};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::session::Session;

/// Sessions kept at once before the least recently used one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;
/// Sessions untouched for this long are dropped on the next insert.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

pub struct AppState {
    pub papers: Arc<dyn PaperSearch>,
    pub news: Arc<dyn NewsFeed>,
    /// Secret provisioned by the host; beats whatever a user types in.
    pub provisioned_key: Option<String>,
    pub sessions: RwLock<HashMap<Uuid, Session>>,
    pub max_sessions: usize,
    pub session_idle: Duration,
}

impl AppState {
    pub fn new(papers: Arc<dyn PaperSearch>, news: Arc<dyn NewsFeed>, provisioned_key: Option<String>) -> Self {
        Self {
            papers,
            news,
            provisioned_key,
            sessions: RwLock::new(HashMap::new()),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle: DEFAULT_SESSION_IDLE,
        }
    }

    /// A cap of zero is treated as one.
    pub fn with_session_limits(mut self, max_sessions: usize, session_idle: Duration) -> Self {
        self.max_sessions = max_sessions.max(1);
        self.session_idle = session_idle;
        self
    }

    pub fn resolve(&self, session: &Session) -> Settings {
        Settings::resolve(self.provisioned_key.as_deref(), &session.input)
    }

    /// Store a new session, first dropping idle ones and then evicting the least
    /// recently used until there is room.
    pub async fn insert_session(&self, session: Session) -> Uuid {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen.elapsed() < self.session_idle);
        let expired = before - sessions.len();
        if expired > 0 {
            info!("🧹 Dropped {} idle sessions", expired);
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions.iter().min_by_key(|(_, s)| s.last_seen).map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    info!("🧹 Evicted session {} to stay under {} sessions", id, self.max_sessions);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(id, session);
        id
    }

    pub async fn remove_session(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
