use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain::inputs::MasterInput;
use domain::masters;
use domain::sorting::{ListOptions, MasterSort};

use crate::auth::ServerState;
use crate::errors::ApiError;
use crate::presentation::{Deleted, MasterDto, MastersList};
use crate::routes::ListQuery;

#[utoipa::path(
    get, path = "/masters", tag = "masters",
    params(ListQuery),
    responses(
        (status = 200, description = "All masters", body = MastersList),
        (status = 401, description = "Missing or unknown API key")
    ),
    security(("api_key" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<MastersList>, ApiError> {
    let Query(q) = query?;
    let opts = ListOptions::<MasterSort>::parse(q.sort_by.as_deref(), q.direction.as_deref());
    let rows = masters::list_masters(&state.db, opts).await?;
    Ok(Json(MastersList { masters: rows.into_iter().map(MasterDto::from).collect() }))
}

#[utoipa::path(
    get, path = "/masters/{id}", tag = "masters",
    params(("id" = i32, Path, description = "Master ID")),
    responses(
        (status = 200, description = "OK", body = MasterDto),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MasterDto>, ApiError> {
    let Path(id) = path?;
    Ok(Json(masters::get_master(&state.db, id).await?.into()))
}

#[utoipa::path(
    post, path = "/masters", tag = "masters",
    request_body = crate::openapi::MasterPayloadDoc,
    responses(
        (status = 201, description = "Created", body = MasterDto),
        (status = 400, description = "Invalid field, duplicate phone or unknown service"),
        (status = 403, description = "Admin key required")
    ),
    security(("api_key" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<MasterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MasterDto>), ApiError> {
    let Json(input) = body?;
    let created = masters::create_master(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put, path = "/masters/{id}", tag = "masters",
    params(("id" = i32, Path, description = "Master ID")),
    request_body = crate::openapi::MasterPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = MasterDto),
        (status = 400, description = "Invalid field, duplicate phone or unknown service"),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<MasterInput>, JsonRejection>,
) -> Result<Json<MasterDto>, ApiError> {
    let Path(id) = path?;
    let Json(input) = body?;
    Ok(Json(masters::update_master(&state.db, id, input).await?.into()))
}

#[utoipa::path(
    delete, path = "/masters/{id}", tag = "masters",
    params(("id" = i32, Path, description = "Master ID")),
    responses(
        (status = 200, description = "Deleted with appointments and links", body = Deleted),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(id) = path?;
    masters::delete_master(&state.db, id).await?;
    Ok(Json(Deleted::new(id)))
}
