//! HTTP surface of the contact app.

mod handlers;
mod middleware;
mod session;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, override_method, METHOD_OVERRIDE_HEADER};
pub use session::FLASH_KEY;
pub use types::*;

use crate::views::Views;
use axum::{
    extract::Request,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use contact_store::ContactStore;
use session_store::SessionStore;
use std::path::Path;
use std::sync::Arc;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "contact_sid";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Contact collection
    pub store: Arc<dyn ContactStore>,
    /// Flash message sessions
    pub sessions: SessionStore,
    /// Page templates
    pub views: Arc<Views>,
    /// Session cookie name
    pub cookie_name: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn ContactStore>, sessions: SessionStore, views: Views) -> Self {
        Self {
            store,
            sessions,
            views: Arc::new(views),
            cookie_name: Arc::from(DEFAULT_COOKIE_NAME),
        }
    }

    /// Use a different session cookie name.
    pub fn with_cookie_name(mut self, cookie_name: impl AsRef<str>) -> Self {
        self.cookie_name = Arc::from(cookie_name.as_ref());
        self
    }
}

/// Router wrapped so that method overrides apply before routing.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Create the page router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health))
        .route(
            "/contact",
            get(handlers::list_contacts)
                .post(handlers::create_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/contact/add", get(handlers::add_form))
        .route("/contact/edit/:nama", get(handlers::edit_form))
        .route("/contact/:nama", get(handlers::show_contact))
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the page router plus static files under `/public`.
pub fn create_router_with_public_dir(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    create_router(state).nest_service("/public", ServeDir::new(public_dir))
}

/// Wrap a router so `POST` requests can stand in for `PUT`, `PATCH` and
/// `DELETE` via `?_method=` or the override header.
pub fn with_method_override(router: Router) -> App {
    MapRequestLayer::new(override_method as fn(Request) -> Request).layer(router)
}

/// Full application with method override and no static files.
pub fn create_app(state: AppState) -> App {
    with_method_override(create_router(state))
}
