//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Home Inventory API",
        version = "0.1.0",
        description = "REST API for cataloging household items and where they are stored",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_inventory::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Household item catalog endpoints")
    )
)]
pub struct ApiDoc;
