//! Route table and middleware for the scan station.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_http::validate_request::ValidateRequestHeaderLayer;

use crate::server::{AppState, database, scan};

/// Build the application router.
///
/// When both basic-auth credentials are configured, the entire surface sits
/// behind the auth gate; otherwise the service is open (trusted-network
/// deployments).
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(scan::scan_form).post(scan::scan_submit))
        .route("/database", get(database::database_page))
        .route("/database/upload", post(database::database_upload))
        .route("/database/delete/all", post(database::delete_all))
        .route("/database/delete/complete", post(database::delete_completed))
        .route("/database/download/all", post(database::download_all))
        .route(
            "/database/download/completed",
            post(database::download_completed),
        )
        .route(
            "/database/download/incomplete",
            post(database::download_incomplete),
        )
        .layer(TraceLayer::new_for_http());

    if let (Some(user), Some(password)) = (
        state.config.http.auth_user.as_deref(),
        state.config.http.auth_password.as_deref(),
    ) {
        router = router.layer(ValidateRequestHeaderLayer::basic(user, password));
    }

    router.with_state(state)
}
