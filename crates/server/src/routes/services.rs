use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain::catalog;
use domain::inputs::ServiceInput;
use domain::sorting::{ListOptions, ServiceSort};

use crate::auth::ServerState;
use crate::errors::ApiError;
use crate::presentation::{Deleted, ServiceDto, ServicesList};
use crate::routes::ListQuery;

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(ListQuery),
    responses((status = 200, description = "Service catalog", body = ServicesList)),
    security(("api_key" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ServicesList>, ApiError> {
    let Query(q) = query?;
    let opts = ListOptions::<ServiceSort>::parse(q.sort_by.as_deref(), q.direction.as_deref());
    let rows = catalog::list_services(&state.db, opts).await?;
    Ok(Json(ServicesList { services: rows.into_iter().map(ServiceDto::from).collect() }))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "OK", body = ServiceDto),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ServiceDto>, ApiError> {
    let Path(id) = path?;
    Ok(Json(catalog::get_service(&state.db, id).await?.into()))
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::ServicePayloadDoc,
    responses(
        (status = 201, description = "Created", body = ServiceDto),
        (status = 400, description = "Invalid field or duplicate title")
    ),
    security(("api_key" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceDto>), ApiError> {
    let Json(input) = body?;
    let created = catalog::create_service(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::ServicePayloadDoc,
    responses(
        (status = 200, description = "Updated", body = ServiceDto),
        (status = 400, description = "Invalid field or duplicate title"),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<ServiceDto>, ApiError> {
    let Path(id) = path?;
    let Json(input) = body?;
    Ok(Json(catalog::update_service(&state.db, id, input).await?.into()))
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted", body = Deleted),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Still linked to masters or appointments")
    ),
    security(("api_key" = []))
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(id) = path?;
    catalog::delete_service(&state.db, id).await?;
    Ok(Json(Deleted::new(id)))
}
