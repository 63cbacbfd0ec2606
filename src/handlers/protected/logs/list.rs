// handlers/protected/logs/list.rs - GET /logs handler

use axum::extract::{Extension, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, LogsBody};

/// GET /logs - every log, newest first, owners resolved to usernames
pub async fn log_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<LogsBody> {
    let logs = state.store.list(None).await?;
    tracing::debug!("{} listed {} logs", user.username, logs.len());

    Ok(ApiResponse::success(LogsBody { logs }))
}
