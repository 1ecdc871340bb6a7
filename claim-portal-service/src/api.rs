//! JSON API over the same lookup and detail-session operations as the HTML screens

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use claim_flow::{DetailSession, DetailView, PortalError, detail, lookup};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::{
    models::{
        AttachFilesRequest, AttachFilesResponse, LogoutResponse, LookupRequest, LookupResponse,
        MessageRequest, MessageResponse, SessionSnapshot,
    },
    service::AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "id": id
        })),
    )
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

fn portal_error(e: &PortalError) -> ApiError {
    match e {
        PortalError::ClaimIdRequired => bad_request_error(&e.to_string()),
        PortalError::InvalidClaimId(id)
        | PortalError::ClaimNotFound(id)
        | PortalError::SessionNotFound(id) => not_found_error(&e.to_string(), id),
        PortalError::DatasetLoad(details) | PortalError::Storage(details) => {
            internal_error("Internal error", details)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lookup", post(lookup_claim))
        .route("/claims/{claim_id}/sessions", post(mount_session))
        .route("/sessions/{session_id}", get(get_session).delete(end_session))
        .route("/sessions/{session_id}/messages", post(post_message))
        .route("/sessions/{session_id}/files", post(attach_files))
}

async fn lookup_claim(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> ApiResult<LookupResponse> {
    let route = lookup::submit(state.dataset.as_ref(), &request.claim_id)
        .map_err(|e| portal_error(&e))?;

    let routed_id = route.routed_id().unwrap_or_default().to_string();
    Ok(Json(LookupResponse {
        route: route.path(),
        routed_id,
    }))
}

async fn mount_session(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let session = match detail::mount(state.dataset.as_ref(), &claim_id) {
        DetailView::Mounted(session) => session,
        DetailView::NotFound { routed_id } => {
            return Err(portal_error(&PortalError::ClaimNotFound(routed_id)));
        }
    };

    let snapshot = SessionSnapshot::from(&session);
    save_session(&state, session).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn load_session(state: &AppState, session_id: &str) -> Result<DetailSession, ApiError> {
    match state.session_storage.get(session_id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(portal_error(&PortalError::SessionNotFound(
            session_id.to_string(),
        ))),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to load session");
            Err(portal_error(&e))
        }
    }
}

async fn save_session(state: &AppState, session: DetailSession) -> Result<(), ApiError> {
    let session_id = session.id.clone();
    state.session_storage.save(session).await.map_err(|e| {
        error!(session_id = %session_id, error = %e, "Failed to save session");
        portal_error(&e)
    })
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionSnapshot> {
    let session = load_session(&state, &session_id).await?;
    Ok(Json(SessionSnapshot::from(&session)))
}

async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> ApiResult<MessageResponse> {
    let mut session = load_session(&state, &session_id).await?;
    let appended = session.send_message(&request.text);
    info!(
        session_id = %session_id,
        appended,
        messages = session.chat.len(),
        "Chat message via API"
    );

    let snapshot = SessionSnapshot::from(&session);
    save_session(&state, session).await?;
    Ok(Json(MessageResponse {
        appended,
        session: snapshot,
    }))
}

async fn attach_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AttachFilesRequest>,
) -> ApiResult<AttachFilesResponse> {
    let mut session = load_session(&state, &session_id).await?;
    let added = session.attach_files(request.files);
    info!(
        session_id = %session_id,
        added,
        total = session.attachments.len(),
        "Attached files"
    );

    let snapshot = SessionSnapshot::from(&session);
    save_session(&state, session).await?;
    Ok(Json(AttachFilesResponse {
        added,
        session: snapshot,
    }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<LogoutResponse> {
    let session = load_session(&state, &session_id).await?;
    let route = session.logout();
    state
        .session_storage
        .delete(&session.id)
        .await
        .map_err(|e| portal_error(&e))?;
    Ok(Json(LogoutResponse {
        route: route.path(),
    }))
}
