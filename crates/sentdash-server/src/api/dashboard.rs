use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use sentdash_analytics::{build_dashboard, window_start, CompanyAggregate};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_db_error, map_task_error, resolve_days, ApiError, ApiResponse, AppState, ResponseMeta,
    MAX_WINDOW_DAYS,
};

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    pub days: Option<i64>,
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<Vec<CompanyAggregate>>>, ApiError> {
    let days = validate_days(&req_id, query.days, state.window_days)?;
    let data = load_dashboard(&state, &req_id, days, None).await?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_company_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(company): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<CompanyAggregate>>, ApiError> {
    let days = validate_days(&req_id, query.days, state.window_days)?;
    let data = load_dashboard(&state, &req_id, days, Some(company.as_str()))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no tweets for company {company} in the last {days} days"),
            )
        })?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn validate_days(req_id: &RequestId, requested: Option<i64>, default: u32) -> Result<u32, ApiError> {
    resolve_days(requested, default).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("days must be between 1 and {MAX_WINDOW_DAYS}"),
        )
    })
}

/// Load the window from the database and aggregate it off the async reactor.
async fn load_dashboard(
    state: &AppState,
    req_id: &RequestId,
    days: u32,
    company: Option<&str>,
) -> Result<Vec<CompanyAggregate>, ApiError> {
    let since = window_start(Utc::now(), days);
    let records = match company {
        Some(company) => {
            sentdash_db::list_company_tweets_since(&state.pool, company, since).await
        }
        None => sentdash_db::list_tweets_since(&state.pool, since).await,
    }
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tokio::task::spawn_blocking(move || build_dashboard(&records, days))
        .await
        .map_err(|e| map_task_error(req_id.0.clone(), &e))
}
