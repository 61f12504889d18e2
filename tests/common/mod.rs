#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use notes_api::config::AppConfig;
use notes_api::database::MemoryStore;
use notes_api::AppState;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

/// Serve the real router in-process, backed by an empty in-memory store.
pub async fn spawn_server() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused/in-memory".to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        _ => None,
    })?;
    let state = AppState::new(config, Arc::new(MemoryStore::new()));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, notes_api::app(state)).await;
    });

    Ok(TestServer {
        port,
        base_url,
        client: Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(&body).send().await?)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Value> {
        let res = self
            .post("/api/register", json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(res.status().is_success(), "register failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn user_token(&self, email: &str, password: &str) -> Result<String> {
        let body = self.register(email, password).await?;
        token_of(&body)
    }

    pub async fn drawer_token(&self, drawer_name: &str, password: &str) -> Result<String> {
        let res = self
            .post(
                "/api/drawers",
                json!({ "drawerName": drawer_name, "password": password }),
            )
            .await?;
        anyhow::ensure!(res.status().is_success(), "drawer create failed: {}", res.status());
        token_of(&res.json().await?)
    }

    pub async fn create_note(&self, token: &str, title: &str, content: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/notes"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "create note failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn list_notes(&self, token: &str) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url("/api/notes"))
            .bearer_auth(token)
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "list notes failed: {}", res.status());
        Ok(res.json().await?)
    }
}

pub fn token_of(body: &Value) -> Result<String> {
    body["token"]
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("response has no token: {}", body))
}
