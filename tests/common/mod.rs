use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use logbook_api::auth::{generate_jwt, Claims};
use logbook_api::database::MemoryLogStore;
use logbook_api::AppState;

/// A server running in-process on a free port, backed by the memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryLogStore>,
    client: Client,
}

/// A registered user and a bearer token for them
#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let store = Arc::new(MemoryLogStore::new());
        let app = logbook_api::app(AppState::new(store.clone()));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            client: Client::new(),
        })
    }

    pub async fn user(&self, username: &str) -> Result<TestUser> {
        let user = self.store.add_user(username).await?;
        let token = generate_jwt(&Claims::new(user.id, &user.username))?;
        Ok(TestUser {
            id: user.id.to_string(),
            username: user.username,
            token,
        })
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(format!("{}{}", self.base_url, path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(format!("{}{}", self.base_url, path))
    }

    /// POST /logs as `user` and return the created log object
    #[allow(dead_code)]
    pub async fn create_log(&self, user: &TestUser, log: Value) -> Result<Value> {
        let res = self
            .post("/logs")
            .bearer_auth(&user.token)
            .json(&serde_json::json!({ "log": log }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == 201, "create failed with {}", res.status());
        Ok(res.json::<Value>().await?["log"].clone())
    }

    /// GET a collection endpoint as `user` and return the `logs` array
    #[allow(dead_code)]
    pub async fn list(&self, path: &str, user: &TestUser) -> Result<Vec<Value>> {
        let res = self.get(path).bearer_auth(&user.token).send().await?;
        anyhow::ensure!(res.status() == 200, "list failed with {}", res.status());
        let body = res.json::<Value>().await?;
        body["logs"]
            .as_array()
            .cloned()
            .with_context(|| format!("logs should be an array: {}", body))
    }
}

/// Read an error body and return its `code`
#[allow(dead_code)]
pub async fn error_code(res: Response) -> Result<String> {
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true, "expected error envelope: {}", body);
    Ok(body["code"].as_str().unwrap_or_default().to_string())
}
