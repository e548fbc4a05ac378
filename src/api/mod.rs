pub mod auth;
mod error;
mod lockout;
mod products;
pub mod rate_limit;
mod session_demo;
mod suppliers;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes: logout/profile behind the session check, register/login
    // public, all of them on the tighter auth rate budget
    let auth_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/logout", get(auth::logout))
        .route("/profile", get(auth::get_profile))
        .route("/profile", put(auth::update_profile))
        .route("/profile", post(auth::update_profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_auth,
        ));

    // Protected API routes
    let api_routes = Router::new()
        // Suppliers
        .route("/suppliers", get(suppliers::list_suppliers))
        .route("/suppliers", post(suppliers::create_supplier))
        .route("/suppliers/:id", get(suppliers::get_supplier))
        .route("/suppliers/:id", put(suppliers::update_supplier))
        .route("/suppliers/:id", delete(suppliers::delete_supplier))
        .route(
            "/suppliers/:id/cascade",
            delete(suppliers::cascade_delete_supplier),
        )
        // Products
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/:id", get(products::get_product))
        .route("/products/:id", put(products::update_product))
        .route("/products/:id", delete(products::delete_product))
        // Session demo surface
        .route("/session/info", get(session_demo::session_info))
        .route("/session/set", post(session_demo::set_value))
        .route("/session/get/:key", get(session_demo::get_value))
        .route("/session/clear", delete(session_demo::clear_session))
        .route("/session/cart/add", post(session_demo::add_to_cart))
        .route("/session/cart", get(session_demo::get_cart))
        .route("/session/cart/clear", delete(session_demo::clear_cart))
        .route("/session/visit", post(session_demo::track_visit))
        // Protected by auth
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_api,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
