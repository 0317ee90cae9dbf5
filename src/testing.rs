//! Router harness for handler tests: in-memory journals and a signed token.

use axum::{
    body::{to_bytes, Body},
    extract::FromRef,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{app::build_app, auth::services::JwtKeys, state::AppState};

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub user_id: Uuid,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::for_state(AppState::fake())
    }

    /// Another signed-in user sharing the same stores.
    pub fn with_new_user(&self) -> Self {
        Self::for_state(self.state.clone())
    }

    fn for_state(state: AppState) -> Self {
        let user_id = Uuid::new_v4();
        let token = JwtKeys::from_ref(&state)
            .sign_access(user_id)
            .expect("sign test token");
        Self {
            app: build_app(state.clone()),
            state,
            user_id,
            token,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request_as(&self.token, method, uri, body).await
    }

    /// Send a request with `token`; an empty token sends no Authorization header.
    pub async fn request_as(
        &self,
        token: &str,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if !token.is_empty() {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let res = self.app.clone().oneshot(req).await.expect("router is infallible");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("read body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }
}
