// handlers/protected/logs/delete.rs - DELETE /logs/:id handler

use axum::extract::{Extension, Path, State};

use crate::app::AppState;
use crate::auth::require_ownership;
use crate::database::record::parse_log_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// DELETE /logs/:id - remove a log the requester owns; 204 on success
pub async fn log_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_log_id(&id)?;

    let log = state.store.find_404(id).await?;
    require_ownership(&user, &log)?;

    state.store.delete(id).await?;
    tracing::info!("{} deleted log {}", user.username, id);

    Ok(ApiResponse::no_content())
}
