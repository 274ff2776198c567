use axum::Json;
use serde_json::{Value, json};

pub const HOME_MESSAGE: &str = "✅ Servicio de Automatización Regulatoria Activo. Accede a /generate-sarlaft-report para obtener el PDF.";

pub async fn home() -> Json<Value> {
    Json(json!({ "message": HOME_MESSAGE }))
}
