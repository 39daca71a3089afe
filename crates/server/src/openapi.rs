use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::presentation::{
    AppointmentDto, AppointmentsList, Deleted, MasterDto, MasterRef, MastersList, ServiceDto, ServicesList,
};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Create needs first_name, last_name and phone; update takes any subset.
/// Omitting `services` keeps links, `[]` clears them.
#[derive(ToSchema)]
pub struct MasterPayloadDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub services: Option<Vec<i32>>,
}

/// Create needs client_name, client_phone and master_id.
#[derive(ToSchema)]
pub struct AppointmentPayloadDoc {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub master_id: Option<i32>,
    /// RFC 3339; defaults to now
    pub date: Option<String>,
    /// Defaults to "awaiting"
    pub status: Option<String>,
    pub comment: Option<String>,
    pub services: Option<Vec<i32>>,
}

#[derive(ToSchema)]
pub struct ServicePayloadDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Number or decimal string, at most two fractional digits
    pub price: Option<String>,
}

struct ApiKeyScheme;

impl Modify for ApiKeyScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::masters::list,
        crate::routes::masters::get,
        crate::routes::masters::create,
        crate::routes::masters::update,
        crate::routes::masters::delete,
        crate::routes::appointments::list,
        crate::routes::appointments::get,
        crate::routes::appointments::list_for_master,
        crate::routes::appointments::create,
        crate::routes::appointments::update,
        crate::routes::appointments::delete,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MasterPayloadDoc,
            AppointmentPayloadDoc,
            ServicePayloadDoc,
            MasterDto,
            MasterRef,
            MastersList,
            AppointmentDto,
            AppointmentsList,
            ServiceDto,
            ServicesList,
            Deleted,
        )
    ),
    modifiers(&ApiKeyScheme),
    tags(
        (name = "health"),
        (name = "masters"),
        (name = "appointments"),
        (name = "services")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in ["/health", "/masters", "/masters/{id}", "/appointments/master/{master_id}", "/services/{id}"] {
            assert!(paths.contains_key(p), "missing {}", p);
        }
        assert!(doc["components"]["securitySchemes"]["api_key"].is_object());
    }
}
