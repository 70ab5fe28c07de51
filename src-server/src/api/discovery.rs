// FICHIER : src-server/src/api/discovery.rs

use crate::json_db::registry::ResourceRegistry;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

/// Document informatif servi sur `GET /`.
#[derive(Debug, Clone)]
pub struct Discovery {
    document: Value,
}

impl Discovery {
    pub fn from_registry(registry: &ResourceRegistry) -> Self {
        Self {
            document: json!({
                "message": "Generic JSON API server",
                "available_endpoints": registry.routes(),
                "instructions": {
                    "add_new_api": {
                        "step1": "Create a JSON file in the data directory",
                        "step2": "Add a route mapping to the resources configuration",
                        "step3": "Restart the server"
                    }
                }
            }),
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

pub async fn index(State(discovery): State<Arc<Discovery>>) -> Json<Value> {
    Json(discovery.document.clone())
}
