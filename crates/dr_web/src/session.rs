use std::collections::HashMap;
use std::time::Instant;

use dr_core::{NewsEntry, Paper, Settings, SettingsInput};
use serde::Serialize;
use uuid::Uuid;

/// Which list a summarized item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Paper,
    News,
}

/// Displayed summaries, one map per list so a link shared by both never collides.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summaries {
    pub papers: HashMap<String, String>,
    pub news: HashMap<String, String>,
}

impl Summaries {
    fn map_mut(&mut self, kind: ItemKind) -> &mut HashMap<String, String> {
        match kind {
            ItemKind::Paper => &mut self.papers,
            ItemKind::News => &mut self.news,
        }
    }

    pub fn insert(&mut self, kind: ItemKind, link: String, summary: String) {
        self.map_mut(kind).insert(link, summary);
    }

    pub fn get(&self, kind: ItemKind, link: &str) -> Option<&str> {
        let map = match kind {
            ItemKind::Paper => &self.papers,
            ItemKind::News => &self.news,
        };
        map.get(link).map(String::as_str)
    }
}

/// One browser's settings and the results of its last actions.
#[derive(Debug, Clone)]
pub struct Session {
    pub input: SettingsInput,
    pub papers: Vec<Paper>,
    pub news: Vec<NewsEntry>,
    pub summaries: Summaries,
    /// Last time any request touched this session; idle sessions are dropped.
    pub last_seen: Instant,
}

impl Session {
    pub fn new(input: SettingsInput) -> Self {
        Self {
            input,
            papers: Vec::new(),
            news: Vec::new(),
            summaries: Summaries::default(),
            last_seen: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub fn paper(&self, link: &str) -> Option<&Paper> {
        self.papers.iter().find(|p| p.link == link)
    }

    pub fn news_entry(&self, link: &str) -> Option<&NewsEntry> {
        self.news.iter().find(|n| n.link == link)
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub api_key_set: bool,
    pub api_key_provisioned: bool,
    pub base_url: String,
    pub model_name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsView {
    #[serde(flatten)]
    pub entry: NewsEntry,
    pub published_label: String,
}

impl From<&NewsEntry> for NewsView {
    fn from(entry: &NewsEntry) -> Self {
        Self {
            published_label: entry.published_label(),
            entry: entry.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub settings: SettingsView,
    pub warning: Option<&'static str>,
    pub papers: Vec<Paper>,
    pub news: Vec<NewsView>,
    pub summaries: Summaries,
}

impl SessionView {
    pub fn new(id: Uuid, session: &Session, settings: &Settings, provisioned: bool) -> Self {
        Self {
            id,
            settings: SettingsView {
                api_key_set: settings.summaries_enabled(),
                api_key_provisioned: provisioned,
                base_url: settings.base_url.clone(),
                model_name: settings.model_name.clone(),
                keywords: settings.keywords.clone(),
            },
            warning: settings.warning(),
            papers: session.papers.clone(),
            news: session.news.iter().map(NewsView::from).collect(),
            summaries: session.summaries.clone(),
        }
    }
}
