//! Kat management admin endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::admin::{ChangeList, ChangeListParams, KAT_ADMIN};
use crate::domain::Kat;
use crate::infrastructure::kat::{CreateKatRequest, UpdateKatRequest};

/// Request to create a new kat
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKatApiRequest {
    pub name: String,
    pub age: i32,
}

/// Request to update a kat
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateKatApiRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Kat response for admin API
#[derive(Debug, Clone, Serialize)]
pub struct KatResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub display: String,
}

impl From<&Kat> for KatResponse {
    fn from(kat: &Kat) -> Self {
        Self {
            id: kat.id().value(),
            name: kat.name().to_string(),
            age: kat.age(),
            display: kat.to_string(),
        }
    }
}

/// GET /admin/kats
pub async fn list_kats(
    State(state): State<AppState>,
    Query(params): Query<ChangeListParams>,
) -> Result<Json<ChangeList>, ApiError> {
    debug!(?params, "Admin listing kats");

    let list = state
        .kat_service
        .change_list(&KAT_ADMIN, &params)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(list))
}

/// POST /admin/kats
pub async fn create_kat(
    State(state): State<AppState>,
    Json(request): Json<CreateKatApiRequest>,
) -> Result<(axum::http::StatusCode, Json<KatResponse>), ApiError> {
    debug!(name = %request.name, age = request.age, "Admin creating kat");

    let kat = state
        .kat_service
        .create(CreateKatRequest {
            name: request.name,
            age: request.age,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((axum::http::StatusCode::CREATED, Json(KatResponse::from(&kat))))
}

/// GET /admin/kats/{kat_id}
pub async fn get_kat(
    State(state): State<AppState>,
    Path(kat_id): Path<String>,
) -> Result<Json<KatResponse>, ApiError> {
    debug!(kat_id = %kat_id, "Admin getting kat");

    let kat = state
        .kat_service
        .get(&kat_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Kat '{}' not found", kat_id)))?;

    Ok(Json(KatResponse::from(&kat)))
}

/// PUT /admin/kats/{kat_id}
pub async fn update_kat(
    State(state): State<AppState>,
    Path(kat_id): Path<String>,
    Json(request): Json<UpdateKatApiRequest>,
) -> Result<Json<KatResponse>, ApiError> {
    debug!(kat_id = %kat_id, "Admin updating kat");

    let kat = state
        .kat_service
        .update(
            &kat_id,
            UpdateKatRequest {
                name: request.name,
                age: request.age,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(KatResponse::from(&kat)))
}

/// DELETE /admin/kats/{kat_id}
pub async fn delete_kat(
    State(state): State<AppState>,
    Path(kat_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(kat_id = %kat_id, "Admin deleting kat");

    state
        .kat_service
        .delete(&kat_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": kat_id
    })))
}
