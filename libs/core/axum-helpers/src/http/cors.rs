use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer.
///
/// Allows any origin, method, and header. The API carries no credentials or
/// tenant isolation, so cross-origin access is intentionally open; restrict
/// this at a reverse proxy if a deployment needs it.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
