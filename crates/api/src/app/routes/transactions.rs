use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockbook_core::TransactionId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let transactions = match services.list_transactions() {
        Ok(txs) => txs,
        Err(e) => return errors::service_error_to_response(e),
    };

    let payload = transactions
        .iter()
        .map(dto::transaction_to_json)
        .collect::<Vec<_>>();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "transactions": payload })),
    )
        .into_response()
}

pub async fn create_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TransactionRequest>,
) -> axum::response::Response {
    let transaction = match services.create_transaction(body.into_draft()) {
        Ok(tx) => tx,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::transaction_to_json(&transaction))).into_response()
}

pub async fn update_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::TransactionRequest>,
) -> axum::response::Response {
    let id: TransactionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid transaction id")
        }
    };

    let transaction = match services.update_transaction(id, body.into_draft()) {
        Ok(tx) => tx,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::transaction_to_json(&transaction))).into_response()
}

pub async fn delete_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TransactionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid transaction id")
        }
    };

    if let Err(e) = services.delete_transaction(id) {
        return errors::service_error_to_response(e);
    }

    (StatusCode::OK, Json(serde_json::json!({ "id": id.to_string() }))).into_response()
}
