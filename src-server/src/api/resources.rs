// FICHIER : src-server/src/api/resources.rs

use crate::json_db::collections::{Collection, CollectionHandler, Record};
use crate::utils::{AppError, Result};
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde_json::Value;
use std::sync::Arc;

type SharedHandler = State<Arc<CollectionHandler>>;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Routes `P` et `P/{id}` d'une ressource.
pub fn routes(handler: CollectionHandler) -> Router {
    let route = handler.descriptor().route.clone();
    let item_route = handler.descriptor().item_route();

    Router::new()
        .route(&route, get(list).post(create))
        .route(&item_route, get(get_one).put(update).delete(delete))
        .with_state(Arc::new(handler))
}

async fn list(State(handler): SharedHandler) -> Json<Collection> {
    Json(handler.list().await)
}

async fn get_one(State(handler): SharedHandler, Path(id): Path<String>) -> Result<Json<Record>> {
    handler.get(&id).await.map(Json)
}

async fn create(State(handler): SharedHandler, request: Request) -> Result<(StatusCode, Json<Record>)> {
    let body = read_body(request).await?;
    let record = handler.create(body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update(
    State(handler): SharedHandler,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Record>> {
    let body = read_body(request).await?;
    handler.update(&id, body).await.map(Json)
}

async fn delete(State(handler): SharedHandler, Path(id): Path<String>) -> Result<Json<Record>> {
    handler.delete(&id).await.map(Json)
}

// --- CORPS DE REQUÊTE ---

/// Formulaire urlencoded si annoncé comme tel, JSON sinon.
async fn read_body(request: Request) -> Result<Record> {
    if is_form(&request) {
        let Form(fields) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e.body_text())))?;
        return Ok(form_record(fields));
    }

    let raw = Bytes::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(format!("Unreadable body: {}", e.body_text())))?;
    parse_json_body(&raw)
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE))
}

/// Les champs de formulaire sont des chaînes ; une clé répétée garde sa dernière valeur.
fn form_record(fields: Vec<(String, String)>) -> Record {
    fields
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Corps vide = objet vide ; sinon un objet JSON est exigé.
fn parse_json_body(raw: &[u8]) -> Result<Record> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::BadRequest(format!("Invalid JSON body: {}", e))),
    }
}
