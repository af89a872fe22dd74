use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use models::{Payload, Response, User};
use service::ServiceError;

use crate::errors::JsonApiError;
use crate::state::ServerState;

type ApiResult = Result<Json<Response>, JsonApiError>;
type IdPath = Result<Path<HashMap<String, String>>, PathRejection>;

fn parse_id(params: &HashMap<String, String>) -> Result<i64, ServiceError> {
    let raw = params
        .get("id")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::missing("id"))?;
    raw.parse::<i64>().map_err(|_| ServiceError::invalid("id"))
}

fn path_id(path: IdPath) -> Result<i64, ServiceError> {
    let Path(params) = path.map_err(|_| ServiceError::invalid("id"))?;
    parse_id(&params)
}

/// Decode the body as JSON whatever the declared content type.
fn body_user(body: Result<Bytes, BytesRejection>) -> Result<User, ServiceError> {
    let bytes = body.map_err(|_| ServiceError::invalid("body"))?;
    serde_json::from_slice(&bytes).map_err(|_| ServiceError::invalid("body"))
}

#[utoipa::path(post, path = "/user", tag = "users", request_body = crate::openapi::UserDoc,
    responses((status = 200, description = "Inserted", body = crate::openapi::UserEnvelopeDoc),
              (status = 400, description = "Invalid body", body = crate::openapi::ErrorDoc),
              (status = 500, description = "DB Error", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let user = body_user(body)?;
    state.users.create(&user).await?;
    Ok(Json(Response::ok(Payload::User(user), "Inserted user successfully")))
}

#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = crate::openapi::UsersEnvelopeDoc),
              (status = 500, description = "DB Error", body = crate::openapi::ErrorDoc)))]
pub async fn get_all(State(state): State<ServerState>) -> ApiResult {
    let users = state.users.get_all().await?;
    Ok(Json(Response::ok(Payload::Users(users), "Retrieved User Successfully")))
}

#[utoipa::path(get, path = "/user/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id, must be positive")),
    responses((status = 200, description = "Found", body = crate::openapi::UserEnvelopeDoc),
              (status = 400, description = "Bad id", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such user", body = crate::openapi::ErrorDoc)))]
pub async fn get_by_id(State(state): State<ServerState>, path: IdPath) -> ApiResult {
    let id = path_id(path)?;
    let user = state.users.get_by_id(id).await?;
    Ok(Json(Response::ok(Payload::User(user), "Retrieved User Successfully")))
}

#[utoipa::path(put, path = "/user", tag = "users", request_body = crate::openapi::UserDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::UserEnvelopeDoc),
              (status = 400, description = "Invalid body or id", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such user", body = crate::openapi::ErrorDoc)))]
pub async fn update(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let user = body_user(body)?;
    state.users.update(&user).await?;
    Ok(Json(Response::ok(Payload::User(user), "Updated user successfully")))
}

#[utoipa::path(delete, path = "/user/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id, must be positive")),
    responses((status = 200, description = "Deleted", body = crate::openapi::EmptyEnvelopeDoc),
              (status = 400, description = "Bad id", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such user", body = crate::openapi::ErrorDoc)))]
pub async fn delete(State(state): State<ServerState>, path: IdPath) -> ApiResult {
    let id = path_id(path)?;
    state.users.delete(id).await?;
    Ok(Json(Response::ok(Payload::None, "Deleted User Successfully")))
}
