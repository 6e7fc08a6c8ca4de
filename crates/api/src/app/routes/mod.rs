use axum::Router;

pub mod items;
pub mod system;
pub mod transactions;

/// Router for all endpoints behind the auth stub.
pub fn router() -> Router {
    Router::new()
        .nest("/items", items::router())
        .nest("/transactions", transactions::router())
}
