// handlers/protected/logs/mine.rs - GET /myLogs handler

use axum::extract::{Extension, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, LogsBody};

/// GET /myLogs - the requester's own logs, in the same order as GET /logs.
///
/// The owner filter runs inside the store query rather than over the full
/// listing.
pub async fn log_list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<LogsBody> {
    let logs = state.store.list(Some(user.id)).await?;
    tracing::debug!("{} listed {} of their own logs", user.username, logs.len());

    Ok(ApiResponse::success(LogsBody { logs }))
}
