use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    serve, Json, Router,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::constants::{HEIGHT_RANGE_CM, PROFILE_INCOMPLETE_NOTICE, WEIGHT_RANGE_KG};
use crate::conversation::Turn;
use crate::error::ProfileError;
use crate::llm_interaction::CompletionClient;
use crate::pipeline::{run_turn, TurnOutcome};
use crate::profile::ProfileStore;
use crate::session::{ChatSession, TurnState};

pub const TEMPLATE_DIR: &str = "templates";
pub const STATIC_DIR: &str = "static";

// Shared application state
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    // The single chat session. Held locked for a whole turn so submissions
    // are processed one at a time, in order.
    session: Arc<Mutex<ChatSession>>,
    client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>, profile: ProfileStore) -> Self {
        Self {
            templates: Arc::new(create_minijinja_env()),
            session: Arc::new(Mutex::new(ChatSession::new(profile))),
            client,
        }
    }
}

/// Snapshot of the session as the page and the JSON API see it.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub profile: ProfileStore,
    pub profile_complete: bool,
    pub state: TurnState,
    pub turns: Vec<Turn>,
}

impl From<&ChatSession> for SessionView {
    fn from(session: &ChatSession) -> Self {
        Self {
            profile: session.profile,
            profile_complete: session.profile.is_complete(),
            state: session.state,
            turns: session.conversation.turns().to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub outcome: TurnOutcome,
    pub notice: Option<String>,
    pub session: SessionView,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        warn!(%status, error = %self, "Rejected API request");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

// Minijinja Environment setup
fn create_minijinja_env() -> AutoReloader {
    AutoReloader::new(|notifier| {
        let mut env = Environment::new();
        env.set_loader(path_loader(TEMPLATE_DIR));
        notifier.watch_path(TEMPLATE_DIR, true);
        Ok(env)
    })
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, Html<String>> {
    let view = SessionView::from(&*state.session.lock().await);

    state
        .templates
        .acquire_env()
        .and_then(|env| {
            env.get_template("index.html").and_then(|tmpl| {
                let context = minijinja::context! {
                    title => "Fitness Chatbot",
                    profile => view.profile,
                    profile_complete => view.profile_complete,
                    profile_notice => PROFILE_INCOMPLETE_NOTICE,
                    turns => view.turns,
                    height_min => *HEIGHT_RANGE_CM.start(),
                    height_max => *HEIGHT_RANGE_CM.end(),
                    weight_min => *WEIGHT_RANGE_KG.start(),
                    weight_max => *WEIGHT_RANGE_KG.end(),
                };
                tmpl.render(context)
            })
        })
        .map(Html)
        .map_err(|e| {
            error!("Failed to get or render template: {}", e);
            Html(format!("Internal Server Error: {}", e))
        })
}

async fn session_handler(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}

async fn profile_handler(
    State(state): State<AppState>,
    Json(update): Json<ProfileStore>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.lock().await;
    session.profile.update(update)?;
    info!(profile = ?session.profile, "Profile updated");
    Ok(Json(SessionView::from(&*session)))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let mut session = state.session.lock().await;
    let outcome = run_turn(&mut session, &request.message, state.client.as_ref()).await;
    let notice = outcome.notice().map(str::to_string);
    Json(ChatResponse {
        outcome,
        notice,
        session: SessionView::from(&*session),
    })
}

async fn clear_handler(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.clear_history();
    info!("Chat history cleared");
    Json(SessionView::from(&*session))
}

pub fn build_router(state: AppState) -> Router {
    let static_files_service = ServeDir::new(STATIC_DIR).not_found_service(tower::service_fn(
        |_req: Request| async {
            Ok::<_, std::convert::Infallible>((StatusCode::NOT_FOUND, "Not Found").into_response())
        },
    ));

    Router::new()
        .route("/", get(index_handler))
        .route("/api/session", get(session_handler))
        .route("/api/profile", put(profile_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/clear", post(clear_handler))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(port: u16, state: AppState) -> Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
