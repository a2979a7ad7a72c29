//! Tag HTTP Handlers

use axum::{extract::State, Json};

use super::db;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::blog::TagWithCount;

/// All tags with their post counts
pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagWithCount>>, BackendError> {
    let tags = db::list_tags(&state.db).await.map_err(|e| {
        tracing::error!("Failed to list tags: {:?}", e);
        e
    })?;
    Ok(Json(tags))
}
