// handlers/protected/logs/update.rs - PATCH /logs/:id handler

use axum::extract::{rejection::JsonRejection, Extension, Path, State};
use axum::Json;

use crate::app::AppState;
use crate::auth::require_ownership;
use crate::database::record::{parse_log_id, LogPayload, LogRequest};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/**
 * PATCH /logs/:id - Partially update a log the requester owns
 *
 * Fields submitted as `""` are treated as "no change requested" and skipped.
 * `owner` is never writable. Responds 204 with no body.
 *
 * Order of checks: 404 when the log is absent, then 401 for a non-owner,
 * then payload validation.
 */
pub async fn log_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> ApiResult<()> {
    let id = parse_log_id(&id)?;

    let log = state.store.find_404(id).await?;
    require_ownership(&user, &log)?;

    let Json(request) = payload?;
    let changes = LogPayload::for_update(request.log)?;
    if changes.is_empty() {
        tracing::debug!("{} sent no changes for log {}", user.username, id);
        return Ok(ApiResponse::no_content());
    }

    state.store.update(id, changes.into_fields()).await?;
    tracing::info!("{} updated log {}", user.username, id);

    Ok(ApiResponse::no_content())
}
