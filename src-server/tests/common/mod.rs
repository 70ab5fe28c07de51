// FICHIER : src-server/tests/common/mod.rs

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use jsonapi::api::{self, App};
use jsonapi::utils::AppConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tower::ServiceExt;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub struct TestEnv {
    pub app: App,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub _tmp_dir: TempDir,
}

impl TestEnv {
    #[allow(dead_code)]
    pub fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

/// Environnement isolé : dossier de données temporaire + routeur par défaut.
pub fn setup_test_env() -> TestEnv {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });

    let tmp_dir = tempfile::Builder::new()
        .prefix("jsonapi_it_")
        .tempdir()
        .expect("❌ Impossible de créer le dossier temporaire");
    let data_dir = tmp_dir.path().join("data");
    let config = AppConfig::with_data_dir(&data_dir);
    let app = api::app(&config).expect("routeur");

    TestEnv {
        app,
        config,
        data_dir,
        _tmp_dir: tmp_dir,
    }
}

/// Envoie une requête au routeur en mémoire et décode la réponse JSON.
pub async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("requête");

    let response = app.clone().oneshot(request).await.expect("réponse");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("corps");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("corps JSON")
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn send_raw(app: &App, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    send_typed(app, method, uri, "application/json", raw).await
}

/// Corps `application/x-www-form-urlencoded` (ex: `name=Widget&price=3`).
#[allow(dead_code)]
pub async fn send_form(app: &App, method: &str, uri: &str, form: &str) -> (StatusCode, Value) {
    send_typed(app, method, uri, "application/x-www-form-urlencoded", form).await
}

async fn send_typed(
    app: &App,
    method: &str,
    uri: &str,
    content_type: &str,
    raw: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(raw.to_string()))
        .expect("requête");

    let response = app.clone().oneshot(request).await.expect("réponse");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("corps");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[allow(dead_code)]
pub async fn seed(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.expect("dossier");
    }
    tokio::fs::write(path, content).await.expect("écriture");
}

#[allow(dead_code)]
pub async fn read_json(path: &Path) -> Value {
    let raw = tokio::fs::read_to_string(path).await.expect("lecture");
    serde_json::from_str(&raw).expect("JSON")
}
