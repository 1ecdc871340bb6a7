use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use claim_flow::{
    ClaimSource, DetailSession, DetailView, InMemorySessionStorage, LookupForm, PortalError,
    Route, SessionStorage, StaticClaimDataset, detail,
};
use serde_json::{Value, json};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    api,
    config::PortalConfig,
    models::{LookupFormData, MessageFormData, detail_path, session_path},
    static_files, telemetry, views,
};

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<dyn ClaimSource>,
    pub session_storage: Arc<dyn SessionStorage>,
}

impl AppState {
    pub fn new(dataset: Arc<dyn ClaimSource>, session_storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            dataset,
            session_storage,
        }
    }

    pub fn in_memory(dataset: impl ClaimSource + 'static) -> Self {
        Self::new(Arc::new(dataset), Arc::new(InMemorySessionStorage::new()))
    }
}

/// Dataset from `CLAIMS_DATA_PATH` when configured, otherwise the bundled one
pub fn load_dataset(config: &PortalConfig) -> claim_flow::Result<StaticClaimDataset> {
    match &config.claims_path {
        Some(path) => StaticClaimDataset::from_path(path),
        None => {
            let dataset = StaticClaimDataset::bundled()?;
            info!(claims = dataset.len(), "Using bundled claim dataset");
            Ok(dataset)
        }
    }
}

pub fn create_app(config: &PortalConfig) -> claim_flow::Result<(Router, AppState)> {
    let dataset = load_dataset(config)?;
    let app_state = AppState::in_memory(dataset);
    Ok((build_router(app_state.clone()), app_state))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(lookup_page).post(submit_lookup))
        .route("/home/{claim_id}", get(mount_detail))
        .route("/home/{claim_id}/{session_id}", get(show_session))
        .route("/home/{claim_id}/{session_id}/messages", post(send_message))
        .route("/home/{claim_id}/{session_id}/logout", post(logout))
        .route("/assets/{*path}", get(static_files::asset))
        .route("/health", get(health_check))
        .nest("/api", api::router())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(telemetry::correlation_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

/// Periodically discard detail sessions nobody has touched for `idle_timeout`
pub fn spawn_session_sweeper(
    storage: Arc<dyn SessionStorage>,
    idle_timeout: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let max_idle = chrono::Duration::from_std(idle_timeout)
            .unwrap_or_else(|_| chrono::Duration::minutes(30));
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match storage.evict_idle(max_idle).await {
                Ok(0) => {}
                Ok(evicted) => info!(evicted, "Discarded idle claim detail sessions"),
                Err(e) => error!(error = %e, "Failed to sweep idle sessions"),
            }
        }
    })
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let sessions = state.session_storage.len().await.unwrap_or_default();
    Json(json!({
        "status": "healthy",
        "claims": state.dataset.len(),
        "sessions": sessions,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn internal_error_page(e: &PortalError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::error_page(&e.to_string())),
    )
        .into_response()
}

async fn lookup_page() -> Html<String> {
    Html(views::lookup_page(&LookupForm::default()))
}

async fn submit_lookup(
    State(state): State<AppState>,
    Form(data): Form<LookupFormData>,
) -> Response {
    let mut form = LookupForm::with_input(data.claim_id);
    match form.submit(state.dataset.as_ref()) {
        Ok(route) => Redirect::to(&route.path()).into_response(),
        Err(e) => {
            let status = match e {
                PortalError::ClaimIdRequired => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::NOT_FOUND,
            };
            (status, Html(views::lookup_page(&form))).into_response()
        }
    }
}

async fn mount_detail(State(state): State<AppState>, Path(claim_id): Path<String>) -> Response {
    match detail::mount(state.dataset.as_ref(), &claim_id) {
        DetailView::Mounted(session) => {
            let target = session_path(&session);
            info!(session_id = %session.id, routed_id = %claim_id, "Mounted claim detail session");
            if let Err(e) = state.session_storage.save(session).await {
                error!(routed_id = %claim_id, error = %e, "Failed to save detail session");
                return internal_error_page(&e);
            }
            Redirect::to(&target).into_response()
        }
        DetailView::NotFound { routed_id } => (
            StatusCode::NOT_FOUND,
            Html(views::not_found_page(&routed_id)),
        )
            .into_response(),
    }
}

/// Load the session behind a detail URL. `Ok(None)` means the screen must be
/// remounted: the session expired, was logged out, or belongs to another claim.
async fn load_for_route(
    state: &AppState,
    claim_id: &str,
    session_id: &str,
) -> Result<Option<DetailSession>, Response> {
    match state.session_storage.get(session_id).await {
        Ok(Some(session)) if session.belongs_to(claim_id) => Ok(Some(session)),
        Ok(Some(_)) => {
            warn!(
                session_id = %session_id,
                routed_id = %claim_id,
                "Session does not belong to routed claim"
            );
            Ok(None)
        }
        Ok(None) => Ok(None),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to load session");
            Err(internal_error_page(&e))
        }
    }
}

async fn show_session(
    State(state): State<AppState>,
    Path((claim_id, session_id)): Path<(String, String)>,
) -> Response {
    match load_for_route(&state, &claim_id, &session_id).await {
        Ok(Some(session)) => Html(views::detail_page(&session)).into_response(),
        Ok(None) => Redirect::to(&detail_path(&claim_id)).into_response(),
        Err(response) => response,
    }
}

async fn send_message(
    State(state): State<AppState>,
    Path((claim_id, session_id)): Path<(String, String)>,
    Form(data): Form<MessageFormData>,
) -> Response {
    let mut session = match load_for_route(&state, &claim_id, &session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Redirect::to(&detail_path(&claim_id)).into_response(),
        Err(response) => return response,
    };

    session.touch();
    session.chat.set_draft(data.text);
    let sent = session.chat.send();
    info!(
        session_id = %session.id,
        sent,
        messages = session.chat.len(),
        "Chat send"
    );

    let target = session_path(&session);
    if let Err(e) = state.session_storage.save(session).await {
        error!(session_id = %session_id, error = %e, "Failed to save session");
        return internal_error_page(&e);
    }
    Redirect::to(&target).into_response()
}

async fn logout(
    State(state): State<AppState>,
    Path((claim_id, session_id)): Path<(String, String)>,
) -> Response {
    match load_for_route(&state, &claim_id, &session_id).await {
        Ok(Some(session)) => {
            let route = session.logout();
            if let Err(e) = state.session_storage.delete(&session.id).await {
                error!(session_id = %session_id, error = %e, "Failed to delete session");
                return internal_error_page(&e);
            }
            Redirect::to(&route.path()).into_response()
        }
        Ok(None) => Redirect::to(&Route::Lookup.path()).into_response(),
        Err(response) => response,
    }
}
