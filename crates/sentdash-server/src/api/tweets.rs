use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use sentdash_core::TweetRecord;
use sentdash_mock::{MockConfig, MockGenerator, TweetProvider};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    map_db_error, map_task_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct TweetsQuery {
    pub company: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MockQuery {
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(super) struct MockRunData {
    pub inserted: usize,
    pub companies: usize,
    pub seed: u64,
}

pub(super) async fn list_tweets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TweetsQuery>,
) -> Result<Json<ApiResponse<Vec<TweetRecord>>>, ApiError> {
    let data = sentdash_db::list_tweets(
        &state.pool,
        query.company.as_deref(),
        normalize_limit(query.limit),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Regenerate synthetic tweets for every tracked company and replace the
/// stored table with them.
///
/// Each call draws a fresh seed unless `?seed=` pins one; the seed used is
/// echoed back.
pub(super) async fn regenerate_mock_tweets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MockQuery>,
) -> Result<Json<ApiResponse<MockRunData>>, ApiError> {
    let companies = Arc::clone(&state.companies);
    let mock = MockConfig {
        seed: query.seed.unwrap_or_else(rand::random),
        ..state.mock
    };

    let records = tokio::task::spawn_blocking(move || {
        MockGenerator::new(mock).tweets(&companies, Utc::now())
    })
    .await
    .map_err(|e| map_task_error(req_id.0.clone(), &e))?
    .map_err(|e| {
        tracing::error!(error = %e, "mock generation failed");
        ApiError::new(req_id.0.clone(), "internal_error", e.to_string())
    })?;

    let inserted = sentdash_db::replace_tweets(&state.pool, &records)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(inserted, seed = mock.seed, "replaced tweets with synthetic data");

    Ok(Json(ApiResponse {
        data: MockRunData {
            inserted,
            companies: state.companies.len(),
            seed: mock.seed,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
