use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::customer::domain::{Customer, CustomerDraft};
use service::customer::errors::CustomerError;

use super::ServerState;
use crate::errors::ApiError;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.list().await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>, ApiError> {
    match state.customers.get(id).await? {
        Some(customer) => Ok(Json(customer)),
        None => Err(CustomerError::NotFound(id).into()),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<CustomerDraft>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let created = state.customers.create(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customers.update(id, draft).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
