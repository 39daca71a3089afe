use axum::{middleware, routing::get, Json, Router};
use common::types::Health;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::auth::{require_api_key, ServerState};
use crate::openapi::ApiDoc;

pub mod appointments;
pub mod masters;
pub mod services;

/// `?sort_by=&direction=` on list endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Field to order by; unknown fields use the default order
    pub sort_by: Option<String>,
    /// `desc` for descending, anything else ascending
    pub direction: Option<String>,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public routes plus key-protected resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = Router::new()
        .route("/masters", get(masters::list).post(masters::create))
        .route("/masters/:id", get(masters::get).put(masters::update).delete(masters::delete))
        .route("/appointments", get(appointments::list).post(appointments::create))
        .route(
            "/appointments/:id",
            get(appointments::get).put(appointments::update).delete(appointments::delete),
        )
        .route("/appointments/master/:master_id", get(appointments::list_for_master))
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", get(services::get).put(services::update).delete(services::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    public
        .merge(api)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
}
