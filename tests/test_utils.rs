#![allow(dead_code)]

use std::{net::TcpListener, time::Duration};

use learning_path_api::{
    entities::user::UserResponse,
    repositories::memory::InMemoryStore,
    settings::{AppConfig, AppEnvironment, LogFormat, StorageBackend},
    startup::build_server,
};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = test_config();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = build_server(&config, InMemoryStore::new(), listener)
            .expect("Failed to bind server");

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            client,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE")
    }

    /// Creates a user and returns its JSON representation
    pub async fn create_user(&self, name: &str, email: &str) -> Value {
        let response = self
            .post_json("/api/users", &json!({ "name": name, "email": email }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse user")
    }

    /// Creates a skill and returns its JSON representation
    pub async fn create_skill(&self, body: Value) -> Value {
        let response = self.post_json("/api/skills", &body).await;
        assert!(response.status().is_success(), "create skill failed: {}", response.status());
        response.json().await.expect("Failed to parse skill")
    }

    pub async fn add_skill(&self, user_id: &str, skill_name: &str) -> Response {
        self.post_json(
            &format!("/api/users/{}/skills", user_id),
            &json!({ "skill_name": skill_name }),
        )
        .await
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Learning Path API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        storage: StorageBackend::Memory,
        database_url: String::new(),
        database_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Skill names held by a user JSON document, in response order
pub fn skill_names(user: &Value) -> Vec<String> {
    user["skills"]
        .as_array()
        .expect("skills should be an array")
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

pub fn has_skill(user: &UserResponse, name: &str) -> bool {
    user.skills.iter().any(|s| s.name == name)
}
