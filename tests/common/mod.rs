#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use yoga_backend::{
    AppState,
    config::Config,
    database::{
        MemoryStore, NewSession, NewUser, SessionEntity, SessionRepository, UserEntity,
        UserRepository,
    },
    router::create_router,
    utils::hash_password,
};

pub const SECRET: &str = "openclassrooms";
pub const PASSWORD: &str = "password";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        database_max_connections: 1,
        jwt_secret: SECRET.to_string(),
        jwt_expiration_secs: 1800,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        api_base_uri: "/api".to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::in_memory(store.clone(), test_config());
        Self {
            router: create_router(state.clone()),
            state,
            store,
        }
    }

    pub async fn add_user(&self, email: &str, admin: bool) -> UserEntity {
        UserRepository::insert(
            self.store.as_ref(),
            NewUser {
                email: email.to_string(),
                first_name: "john".to_string(),
                last_name: "doe".to_string(),
                password: hash_password(PASSWORD).expect("hashing should succeed"),
                admin,
            },
        )
        .await
            .expect("user insert should succeed")
    }

    pub async fn add_session(&self, name: &str, teacher_id: Option<i64>) -> SessionEntity {
        SessionRepository::insert(
            self.store.as_ref(),
            NewSession {
                name: name.to_string(),
                date: Utc.with_ymd_and_hms(2025, 5, 14, 10, 0, 0).unwrap(),
                description: format!("{name} description"),
                teacher_id,
                users: vec![],
            },
        )
        .await
        .expect("session insert should succeed")
    }

    pub fn token_for(&self, email: &str) -> String {
        self.state.jwt.issue(email).expect("token should be issued")
    }

    /// 发送请求，返回状态码和解析后的 JSON（空响应体为 `Value::Null`）
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        self.send_raw(request).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, json)
    }
}
