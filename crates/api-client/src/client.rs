use std::time::Duration;

use focusflow_api::{
    ErrorBody, LoginRequest, ProfileRecord, ProfileUpsert, SignupRequest, StepRecord, StepUpdate,
    TaskCreate, TaskRecord, TaskUpdate, TokenResponse, UserRecord,
};
use focusflow_core::{GatewayError, TaskGateway};

/// Typed HTTP client for the FocusFlow task service.
///
/// Auth and profile endpoints are inherent methods; the task surface the
/// dashboards drive is exposed through the [`TaskGateway`] impl. Every
/// response goes through one funnel that rejects non-success statuses and
/// classifies failures into the gateway error taxonomy.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build around a caller-supplied `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            auth_token: None,
        }
    }

    pub fn set_auth(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<&str, GatewayError> {
        self.auth_token
            .as_deref()
            .ok_or_else(|| GatewayError::Transport("auth token not set".into()))
    }

    // ── Auth ──────────────────────────────────────────────────────────────

    pub async fn signup(&self, req: &SignupRequest) -> Result<UserRecord, GatewayError> {
        let resp = self
            .client
            .post(self.url("/auth/signup"))
            .json(req)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, GatewayError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(req)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    pub async fn me(&self) -> Result<UserRecord, GatewayError> {
        let token = self.token()?;
        let resp = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    // ── Profile ───────────────────────────────────────────────────────────

    pub async fn profile(&self) -> Result<ProfileRecord, GatewayError> {
        let token = self.token()?;
        let resp = self
            .client
            .get(self.url("/profile/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    pub async fn upsert_profile(&self, req: &ProfileUpsert) -> Result<ProfileRecord, GatewayError> {
        let token = self.token()?;
        let resp = self
            .client
            .post(self.url("/profile"))
            .bearer_auth(token)
            .json(req)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }
}

// ── Task surface ──────────────────────────────────────────────────────────

impl TaskGateway for ApiClient {
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, GatewayError> {
        let token = self.token()?;
        // Trailing slash matters to the server's router.
        let resp = self
            .client
            .get(self.url("/tasks/"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    async fn create_task(
        &self,
        title: &str,
        description: &str,
    ) -> Result<TaskRecord, GatewayError> {
        let token = self.token()?;
        let req = TaskCreate {
            title: title.to_string(),
            description: Some(description.to_string()),
        };
        let resp = self
            .client
            .post(self.url("/tasks/"))
            .bearer_auth(token)
            .json(&req)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    async fn set_task_completed(
        &self,
        task_id: i64,
        completed: bool,
    ) -> Result<TaskRecord, GatewayError> {
        let token = self.token()?;
        let resp = self
            .client
            .put(self.url(&format!("/tasks/{task_id}")))
            .bearer_auth(token)
            .json(&TaskUpdate::completed(completed))
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    async fn set_step_completed(
        &self,
        task_id: i64,
        step_id: i64,
        completed: bool,
    ) -> Result<StepRecord, GatewayError> {
        let token = self.token()?;
        let resp = self
            .client
            .put(self.url(&format!("/tasks/{task_id}/steps/{step_id}")))
            .bearer_auth(token)
            .json(&StepUpdate::completed(completed))
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }

    async fn generate_steps(&self, title: &str) -> Result<TaskRecord, GatewayError> {
        let token = self.token()?;
        let path = format!("/ai/generate-steps?title={}", urlencoding::encode(title));
        let resp = self
            .client
            .post(self.url(&path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(resp).await
    }
}

// ── Response funnel ───────────────────────────────────────────────────────

fn transport_error(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

/// Non-success statuses reject with the server's `detail` message when the
/// body carries one; a success body that fails to decode is malformed, not
/// silently defaulted.
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(api_error(status.as_u16(), &body));
    }
    let bytes = resp.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::Malformed(e.to_string()))
}

fn api_error(status: u16, body: &str) -> GatewayError {
    let detail = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => "Something went wrong".to_string(),
    };
    GatewayError::Api { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Bind an ephemeral port, answer exactly one request with `response`.
    async fn one_shot_server(response: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = sock.read(&mut buf).await;
                let _ = sock.write_all(response.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str) -> ApiClient {
        let mut client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        client.set_auth("test-token");
        client
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/tasks/"), "http://localhost:8000/tasks/");
    }

    #[test]
    fn api_error_prefers_the_detail_field() {
        let err = api_error(404, r#"{"detail": "Task not found"}"#);
        match err {
            GatewayError::Api { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Task not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body_then_generic_message() {
        match api_error(500, "upstream exploded") {
            GatewayError::Api { detail, .. } => assert_eq!(detail, "upstream exploded"),
            other => panic!("unexpected error: {other}"),
        }
        match api_error(502, "") {
            GatewayError::Api { detail, .. } => assert_eq!(detail, "Something went wrong"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn task_calls_require_a_token() {
        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert!(matches!(client.token(), Err(GatewayError::Transport(_))));
    }

    #[tokio::test]
    async fn list_tasks_decodes_a_success_body() {
        let body = r#"[{"id": 1, "title": "t", "description": null, "is_completed": false, "steps": []}]"#;
        let base = one_shot_server(http_response("200 OK", body)).await;
        let tasks = client_for(&base).list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].is_completed);
    }

    #[tokio::test]
    async fn non_success_status_becomes_an_api_error() {
        let base = one_shot_server(http_response(
            "401 Unauthorized",
            r#"{"detail": "Could not validate credentials"}"#,
        ))
        .await;
        let err = client_for(&base).list_tasks().await.unwrap_err();
        match err {
            GatewayError::Api { status, detail } => {
                assert_eq!(status, 401);
                assert_eq!(detail, "Could not validate credentials");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_completion_flag_is_malformed_not_defaulted() {
        let body = r#"[{"id": 1, "title": "t", "steps": []}]"#;
        let base = one_shot_server(http_response("200 OK", body)).await;
        let err = client_for(&base).list_tasks().await.unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }
}
