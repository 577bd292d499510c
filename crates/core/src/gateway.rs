//! Contract the dashboards require from the remote task service.

use focusflow_api::{StepRecord, TaskRecord};
use thiserror::Error;

/// Failure taxonomy as the controller sees it. Every variant degrades to
/// "stale state, user can retry"; nothing here is fatal.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("transport: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server error ({status}): {detail}")]
    Api { status: u16, detail: String },
    /// A response arrived but could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Remote task surface the dashboard drives. The HTTP client implements
/// this; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait TaskGateway {
    /// Full task list, in the server's order.
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, GatewayError>;

    async fn create_task(
        &self,
        title: &str,
        description: &str,
    ) -> Result<TaskRecord, GatewayError>;

    async fn set_task_completed(
        &self,
        task_id: i64,
        completed: bool,
    ) -> Result<TaskRecord, GatewayError>;

    async fn set_step_completed(
        &self,
        task_id: i64,
        step_id: i64,
        completed: bool,
    ) -> Result<StepRecord, GatewayError>;

    /// Ask the service to create a task broken down into generated steps.
    /// The returned record is informational; callers re-fetch anyway.
    async fn generate_steps(&self, title: &str) -> Result<TaskRecord, GatewayError>;
}
