pub mod accounts;
pub mod catalog;
pub mod flights;
pub mod orders;
pub mod routes;

use crate::extract::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
