//! Search HTTP Handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::blog::SearchResults;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, BackendError> {
    Ok(Json(super::global_search(&state.db, &params.keyword).await?))
}
