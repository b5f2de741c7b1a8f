//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI
//! specifications, and Swagger UI serves the collected document at
//! `/api/docs`.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

// Two coach proofs plus up to ten member proofs at 5 MiB each, with
// headroom for the multipart framing.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Registro", description = "Registro API"), tags(
        (name = controller::registration::REGISTRATION_TAG, description = "Registration intake routes"),
        (name = controller::admin::ADMIN_TAG, description = "Admin review routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::registration::submit))
        .routes(routes!(controller::registration::csrf_token))
        .routes(routes!(controller::captcha::challenge))
        .routes(routes!(controller::admin::login))
        .routes(routes!(controller::admin::logout))
        .routes(routes!(controller::admin::get_session))
        .routes(routes!(controller::admin::dashboard))
        .routes(routes!(controller::admin::update_status))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes.layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
}
