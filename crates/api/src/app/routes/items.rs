use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockbook_core::ItemId;
use stockbook_recon::StockLevel;

use crate::app::services::{AppServices, ItemWithStock};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", axum::routing::put(update_item).delete(delete_item))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let entries = match services.list_items() {
        Ok(entries) => entries,
        Err(e) => return errors::service_error_to_response(e),
    };

    let items = entries.iter().map(dto::item_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let item = match services.create_item(body.into_draft()) {
        Ok(item) => item,
        Err(e) => return errors::service_error_to_response(e),
    };

    // A fresh item has no history yet: derived quantities are zero.
    let entry = ItemWithStock {
        item,
        stock: StockLevel::default(),
    };
    (StatusCode::CREATED, Json(dto::item_to_json(&entry))).into_response()
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    let (item, rewritten) = match services.update_item(id, body.into_draft()) {
        Ok(v) => v,
        Err(e) => return errors::service_error_to_response(e),
    };

    let mut payload = dto::catalog_item_to_json(&item);
    payload["ledgerRewritten"] = serde_json::json!(rewritten);
    (StatusCode::OK, Json(payload)).into_response()
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    let deleted = match services.delete_item(id) {
        Ok(n) => n,
        Err(e) => return errors::service_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "id": id.to_string(),
            "ledgerDeleted": deleted,
        })),
    )
        .into_response()
}
