//! Client-side state core for FocusFlow.
//!
//! Owns the session aggregate (user, tasks, accessibility preferences),
//! normalizes what the remote task service returns, selects the current
//! task, derives presentation attributes, and drives the refresh/mutation
//! flows behind every dashboard. Transport and rendering live elsewhere;
//! this crate only defines the contracts it needs from them.

pub mod dashboard;
pub mod gateway;
pub mod model;
pub mod normalize;
pub mod session;
pub mod style;

pub use dashboard::{Dashboard, ModeProfile, Phase, QUICK_ADD_DESCRIPTION, ViewState};
pub use gateway::{GatewayError, TaskGateway};
pub use model::{
    AccessibilitySettings, FontSize, LetterSpacing, LineSpacing, Step, SupportMode, Task, User,
};
pub use normalize::{next_task_index, normalize_task, normalize_tasks};
pub use session::Session;
pub use style::{ClassSet, EffectApplier, SnapshotStore, StyleTarget, presentation_classes};
