// handlers/protected/logs/show.rs - GET /logs/:id handler

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::record::parse_log_id;
use crate::middleware::{ApiResponse, ApiResult, LogBody};

/// GET /logs/:id - a single log; 404 when absent
pub async fn log_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LogBody> {
    let id = parse_log_id(&id)?;
    let log = state.store.find_404(id).await?;

    Ok(ApiResponse::success(LogBody { log }))
}
