use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use dr_core::{NewsEntry, Paper, Settings, SettingsInput};
use dr_inference::{summarize_with_settings, SummaryOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::page::INDEX_HTML;
use crate::session::{ItemKind, NewsView, Session, SessionView};
use crate::AppState;

pub enum ApiError {
    SessionNotFound(Uuid),
    ItemNotFound(String),
    Upstream(dr_core::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::SessionNotFound(id) => (StatusCode::NOT_FOUND, format!("Unknown session {}", id)),
            ApiError::ItemNotFound(link) => (StatusCode::NOT_FOUND, format!("No scanned item with link {}", link)),
            ApiError::Upstream(e) => {
                warn!("Upstream failure: {}", e);
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<dr_core::Error> for ApiError {
    fn from(err: dr_core::Error) -> Self {
        ApiError::Upstream(err)
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
pub struct SummaryRequest {
    link: String,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    link: String,
    /// `None` when summaries are unavailable.
    summary: Option<String>,
    outcome: SummaryOutcome,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SettingsInput>,
) -> impl IntoResponse {
    let session = Session::new(input);
    let settings = state.resolve(&session);
    let id = state.insert_session(session.clone()).await;
    let view = SessionView::new(id, &session, &settings, state.provisioned_key.is_some());
    info!("🆕 Session {} created", id);
    (StatusCode::CREATED, Json(view))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let view = with_session(&state, id, |session| view_of(&state, id, session)).await?;
    Ok(Json(view))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<SettingsInput>,
) -> ApiResult<Json<SessionView>> {
    let view = with_session(&state, id, |session| {
        session.input = input;
        view_of(&state, id, session)
    })
    .await?;
    Ok(Json(view))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.remove_session(id).await {
        return Err(ApiError::SessionNotFound(id));
    }
    info!("👋 Session {} closed", id);
    Ok(StatusCode::NO_CONTENT)
}

fn view_of(state: &AppState, id: Uuid, session: &Session) -> SessionView {
    let settings = state.resolve(session);
    SessionView::new(id, session, &settings, state.provisioned_key.is_some())
}

/// Settings in effect for one action. The lock is released before any outbound call.
async fn current_settings(state: &AppState, id: Uuid) -> ApiResult<Settings> {
    with_session(state, id, |session| state.resolve(session)).await
}

/// Run `f` on a live session and mark it as recently used.
async fn with_session<T>(state: &AppState, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> ApiResult<T> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
    session.touch();
    Ok(f(session))
}

pub async fn scan_papers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Paper>>> {
    let settings = current_settings(&state, id).await?;
    info!("🔍 Session {} scanning {} for {:?}", id, state.papers.source(), settings.keywords);
    let papers = state.papers.search(&settings.keywords).await?;

    with_session(&state, id, |session| session.papers = papers.clone()).await?;
    Ok(Json(papers))
}

pub async fn scan_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<NewsView>>> {
    current_settings(&state, id).await?;
    info!("🔍 Session {} scanning {}", id, state.news.source());
    let news = state.news.latest().await?;

    let views: Vec<NewsView> = news.iter().map(NewsView::from).collect();
    with_session(&state, id, |session| session.news = news).await?;
    Ok(Json(views))
}

pub async fn summarize_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let text = with_session(&state, id, |session| session.paper(&request.link).map(|p: &Paper| p.summary.clone()))
        .await?
        .ok_or_else(|| ApiError::ItemNotFound(request.link.clone()))?;
    summarize_item(&state, id, ItemKind::Paper, request.link, &text).await
}

pub async fn summarize_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let text = with_session(&state, id, |session| session.news_entry(&request.link).map(NewsEntry::summary_input))
        .await?
        .ok_or_else(|| ApiError::ItemNotFound(request.link.clone()))?;
    summarize_item(&state, id, ItemKind::News, request.link, &text).await
}

async fn summarize_item(
    state: &AppState,
    id: Uuid,
    kind: ItemKind,
    link: String,
    text: &str,
) -> ApiResult<Json<SummaryResponse>> {
    let settings = current_settings(state, id).await?;
    info!("✨ Session {} summarizing {}", id, link);
    let outcome = summarize_with_settings(&settings, text).await;

    let summary = outcome.clone().into_text();
    if let Some(summary) = &summary {
        let key = link.clone();
        let summary = summary.clone();
        with_session(state, id, move |session| session.summaries.insert(kind, key, summary)).await?;
    }
    Ok(Json(SummaryResponse { link, summary, outcome }))
}
