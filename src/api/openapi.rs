//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health, overview, principal, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backoffice API",
        version = "1.0.0",
        description = "Administrative backend REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Users
        users::list_users,
        // Overview
        overview::get_overview,
        // Equipment
        equipment::list_equipment,
        equipment::create_equipment,
        // Principal
        principal::get_principal,
    ),
    components(
        schemas(
            // Auth
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Users
            crate::models::user::Role,
            crate::models::user::UserSummary,
            // Overview
            overview::OverviewResponse,
            // Equipment
            crate::models::equipment::CreateEquipment,
            equipment::InventoryReport,
            equipment::EquipmentItem,
            equipment::CreateEquipmentResponse,
            // Principal
            crate::models::principal::ClientPrincipal,
            principal::MissingHeaderResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Account administration"),
        (name = "overview", description = "Dashboard aggregation"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "principal", description = "Platform principal decoding")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
