// handlers/protected/logs/create.rs - POST /logs handler

use axum::extract::{rejection::JsonRejection, Extension, State};
use axum::Json;

use crate::app::AppState;
use crate::config;
use crate::database::models::NewLog;
use crate::database::record::{LogPayload, LogRequest};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, LogBody};

/**
 * POST /logs - Create a log owned by the requester
 *
 * Expected Input:
 * ```json
 * { "log": { "title": "Morning run", "body": "5k, easy pace" } }
 * ```
 *
 * Any `owner` in the body is discarded; the owner is always the
 * authenticated user. Responds 201 with `{ "log": {...} }`.
 */
pub async fn log_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> ApiResult<LogBody> {
    let Json(request) = payload?;
    let required = &config::config().logs.required_fields;
    let content = LogPayload::for_create(request.log, required)?;

    let log = state
        .store
        .create(NewLog {
            owner_id: user.id,
            content: content.into_fields(),
        })
        .await?;

    tracing::info!("{} created log {}", user.username, log.id);
    Ok(ApiResponse::created(LogBody { log }))
}
