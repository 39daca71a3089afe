use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain::appointments;
use domain::inputs::AppointmentInput;
use domain::sorting::{AppointmentSort, ListOptions};

use crate::auth::ServerState;
use crate::errors::ApiError;
use crate::presentation::{AppointmentDto, AppointmentsList, Deleted};
use crate::routes::ListQuery;

#[utoipa::path(
    get, path = "/appointments", tag = "appointments",
    params(ListQuery),
    responses((status = 200, description = "All appointments", body = AppointmentsList)),
    security(("api_key" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<AppointmentsList>, ApiError> {
    let Query(q) = query?;
    let opts = ListOptions::<AppointmentSort>::parse(q.sort_by.as_deref(), q.direction.as_deref());
    let rows = appointments::list_appointments(&state.db, opts).await?;
    Ok(Json(AppointmentsList { appointments: rows.into_iter().map(AppointmentDto::from).collect() }))
}

#[utoipa::path(
    get, path = "/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "OK", body = AppointmentDto),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let Path(id) = path?;
    Ok(Json(appointments::get_appointment(&state.db, id).await?.into()))
}

#[utoipa::path(
    get, path = "/appointments/master/{master_id}", tag = "appointments",
    params(("master_id" = i32, Path, description = "Master ID")),
    responses(
        (status = 200, description = "Appointments of the master", body = AppointmentsList),
        (status = 404, description = "Master not found")
    ),
    security(("api_key" = []))
)]
pub async fn list_for_master(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<AppointmentsList>, ApiError> {
    let Path(master_id) = path?;
    let rows = appointments::list_appointments_for_master(&state.db, master_id).await?;
    Ok(Json(AppointmentsList { appointments: rows.into_iter().map(AppointmentDto::from).collect() }))
}

#[utoipa::path(
    post, path = "/appointments", tag = "appointments",
    request_body = crate::openapi::AppointmentPayloadDoc,
    responses(
        (status = 201, description = "Created", body = AppointmentDto),
        (status = 400, description = "Missing field, unknown master or unknown service")
    ),
    security(("api_key" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentDto>), ApiError> {
    let Json(input) = body?;
    let created = appointments::create_appointment(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put, path = "/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = crate::openapi::AppointmentPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = AppointmentDto),
        (status = 400, description = "Invalid field, unknown master or unknown service"),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let Path(id) = path?;
    let Json(input) = body?;
    Ok(Json(appointments::update_appointment(&state.db, id, input).await?.into()))
}

#[utoipa::path(
    delete, path = "/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Deleted", body = Deleted),
        (status = 404, description = "Not Found")
    ),
    security(("api_key" = []))
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(id) = path?;
    appointments::delete_appointment(&state.db, id).await?;
    Ok(Json(Deleted::new(id)))
}
