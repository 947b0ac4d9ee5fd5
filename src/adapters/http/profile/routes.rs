//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_details, add_own_details, get_details, get_own_details, get_own_summary, get_summary,
    ProfileAppState,
};

/// Open routes. The username comes from the body or the query string.
///
/// - `POST /addDetails`
/// - `GET /getDetails?username=`
/// - `GET /getSummary?username=`
pub fn profile_routes() -> Router<ProfileAppState> {
    Router::new()
        .route("/addDetails", post(add_details))
        .route("/getDetails", get(get_details))
        .route("/getSummary", get(get_summary))
}

/// Routes scoped to the authenticated caller. Must sit behind `auth_middleware`.
pub fn auth_profile_routes() -> Router<ProfileAppState> {
    Router::new()
        .route("/addDetails", post(add_own_details))
        .route("/getDetails", get(get_own_details))
        .route("/getSummary", get(get_own_summary))
}
