//! Executive HTTP Routes
//!
//! CRUD endpoints for executive records. Handlers return `ApiResult`, so
//! every failure leaves through `ApiError`'s responder.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::rest_api::{ApiError, ApiResult, DataResponse, Filter, ListQuery, ListResponse};
use crate::schema::{Executive, ExecutiveFields, ExecutiveValidator, EXECUTIVE_FIELDS};
use crate::storage::{ExecutiveStore, FindQuery};

// ==================
// Shared State
// ==================

/// State shared by the executive handlers
pub struct ExecutiveState {
    pub store: Arc<dyn ExecutiveStore>,
    pub validator: ExecutiveValidator,
    /// Page size when a list request has no `limit`
    pub default_limit: u64,
}

impl ExecutiveState {
    pub fn new(store: Arc<dyn ExecutiveStore>, default_limit: u64) -> Self {
        Self {
            store,
            validator: ExecutiveValidator::new(),
            default_limit,
        }
    }
}

// ==================
// Executive Routes
// ==================

/// Create executive routes
pub fn executive_routes(state: Arc<ExecutiveState>) -> Router {
    Router::new()
        .route("/executives", get(list_executives).post(create_executive))
        .route(
            "/executives/:id",
            get(get_executive)
                .put(update_executive)
                .delete(delete_executive),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::MalformedInput(format!("Invalid executive id: {}", raw)))
}

fn body(payload: Result<Json<ExecutiveFields>, JsonRejection>) -> ApiResult<ExecutiveFields> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| ApiError::MalformedInput(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn list_executives(
    State(state): State<Arc<ExecutiveState>>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Value>>> {
    let Query(params) = params.map_err(|e| ApiError::MalformedInput(e.body_text()))?;

    let query = ListQuery::parse_with_limit(&params, state.default_limit)?;
    query.check_fields(EXECUTIVE_FIELDS)?;

    if !query.filter.is_empty() {
        tracing::debug!(filter = %query.filter.to_document(), "list filter");
    }

    // Page links are computed against the whole collection.
    let total = state.store.count(&Filter::default()).await?;
    let records = state
        .store
        .find(&FindQuery {
            filter: query.filter.clone(),
            sort: query.sort.clone(),
            skip: query.page.skip(),
            limit: query.page.limit,
        })
        .await?;

    let data = records
        .iter()
        .map(|record| {
            let doc = record.to_document();
            match &query.projection {
                Some(projection) => projection.apply(doc),
                None => doc,
            }
        })
        .collect();

    Ok(Json(ListResponse::new(data, query.page.pagination(total))))
}

async fn get_executive(
    State(state): State<Arc<ExecutiveState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Executive>>> {
    let id = parse_id(&id)?;

    let record = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::executive_not_found(id))?;

    Ok(Json(DataResponse::new(record)))
}

async fn create_executive(
    State(state): State<Arc<ExecutiveState>>,
    payload: Result<Json<ExecutiveFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Executive>>)> {
    let new = state.validator.validate_new(body(payload)?)?;

    let record = state.store.create(new).await?;
    tracing::info!(id = %record.id, "executive created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

async fn update_executive(
    State(state): State<Arc<ExecutiveState>>,
    Path(id): Path<String>,
    payload: Result<Json<ExecutiveFields>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Executive>>> {
    let id = parse_id(&id)?;
    let patch = state.validator.validate_patch(body(payload)?)?;

    let record = state
        .store
        .find_by_id_and_update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::executive_not_found(id))?;
    tracing::info!(id = %record.id, "executive updated");

    Ok(Json(DataResponse::new(record)))
}

async fn delete_executive(
    State(state): State<Arc<ExecutiveState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Value>>> {
    let id = parse_id(&id)?;

    state
        .store
        .find_by_id_and_delete(id)
        .await?
        .ok_or_else(|| ApiError::executive_not_found(id))?;
    tracing::info!(%id, "executive deleted");

    Ok(Json(DataResponse::empty()))
}
