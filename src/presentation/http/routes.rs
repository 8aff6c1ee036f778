use super::{
    handlers::{blocked_comments, health, hooks, settings},
    middleware::request_id::request_id_middleware,
    middleware::user::require_user,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

/// Mount point of the reviewer API, as exposed through the host's plugin router.
pub const REVIEW_PREFIX: &str = "/plugins/german-ai-mod/router";

pub fn create_router(state: AppState) -> Router {
    let review_routes = Router::new()
        .route(
            "/blocked-comments",
            get(blocked_comments::list_blocked_comments),
        )
        .route(
            "/blocked-comments/{id}/approve",
            post(blocked_comments::approve_blocked_comment),
        )
        .route(
            "/blocked-comments/{id}",
            delete(blocked_comments::delete_blocked_comment),
        )
        .route("/my-videos", get(blocked_comments::list_my_videos))
        .route("/settings", get(settings::get_settings))
        .route("/settings/{name}", put(settings::update_setting))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .route("/health", get(health::health_check))
        // Host accept hooks (called by the host, not by browsers)
        .route("/hooks/{target}", post(hooks::accept_comment))
        .nest(REVIEW_PREFIX, review_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
