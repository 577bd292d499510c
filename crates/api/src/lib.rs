//! Shared wire types for the FocusFlow task service.
//!
//! This crate is the single source of truth for the request/response bodies
//! exchanged with the backend. It carries no behavior beyond (de)serialization;
//! field names match the server's JSON contract exactly, so the snake_case
//! `is_completed` flags live here while the domain layer renames them.

use serde::{Deserialize, Serialize};

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Upsert body; `support_mode` is one of `adhd`, `autism`, `dyslexia`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpsert {
    pub support_mode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    pub support_mode: String,
    pub onboarding_completed: bool,
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

/// Raw task as the gateway returns it. `is_completed` is required: a record
/// without it is a contract violation and must fail deserialization rather
/// than default to false.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_completed: bool,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepRecord {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub order: Option<i64>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
}

/// Partial task update. Unset fields are omitted from the JSON body so the
/// server's exclude-unset semantics leave them untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    pub fn completed(value: bool) -> Self {
        Self {
            is_completed: Some(value),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StepUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl StepUpdate {
    pub fn completed(value: bool) -> Self {
        Self {
            is_completed: Some(value),
            ..Self::default()
        }
    }
}

// ─── Error ───────────────────────────────────────────────────────────────────

/// Error body the server attaches to non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_record_parses_full_payload() {
        let json = r#"{
            "id": 7,
            "title": "Write report",
            "description": "quarterly numbers",
            "is_completed": false,
            "steps": [
                {"id": 1, "content": "Collect data", "order": 0, "is_completed": true},
                {"id": 2, "content": "Draft", "order": 1, "is_completed": false}
            ]
        }"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert!(!task.is_completed);
        assert_eq!(task.steps.len(), 2);
        assert!(task.steps[0].is_completed);
        assert_eq!(task.steps[1].content, "Draft");
    }

    #[test]
    fn task_record_defaults_missing_steps_to_empty() {
        let json = r#"{"id": 1, "title": "t", "description": null, "is_completed": true}"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert!(task.steps.is_empty());
        assert!(task.description.is_none());
    }

    #[test]
    fn task_record_rejects_missing_completion_flag() {
        let json = r#"{"id": 1, "title": "t", "steps": []}"#;
        assert!(serde_json::from_str::<TaskRecord>(json).is_err());
    }

    #[test]
    fn step_record_rejects_missing_completion_flag() {
        let json = r#"{"id": 1, "content": "c"}"#;
        assert!(serde_json::from_str::<StepRecord>(json).is_err());
    }

    #[test]
    fn task_update_serializes_only_set_fields() {
        let body = serde_json::to_string(&TaskUpdate::completed(true)).unwrap();
        assert_eq!(body, r#"{"is_completed":true}"#);
    }

    #[test]
    fn step_update_serializes_only_set_fields() {
        let body = serde_json::to_string(&StepUpdate::completed(false)).unwrap();
        assert_eq!(body, r#"{"is_completed":false}"#);
    }

    #[test]
    fn error_body_parses_detail() {
        let err: ErrorBody = serde_json::from_str(r#"{"detail": "Task not found"}"#).unwrap();
        assert_eq!(err.detail, "Task not found");
    }
}
