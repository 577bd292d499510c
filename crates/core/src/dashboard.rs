//! The dashboard controller: one state machine for all three support modes.
//!
//! Writes are optimistic (no rollback), reads are pessimistic: the store is
//! only ever mutated from a confirmed refresh, never from a locally guessed
//! delta. A failed call is logged and leaves the previous state standing.

use tracing::warn;

use crate::gateway::TaskGateway;
use crate::model::SupportMode;
use crate::normalize::{next_task_index, normalize_tasks};
use crate::session::Session;

/// Description attached to tasks created through the quick-add box.
pub const QUICK_ADD_DESCRIPTION: &str = "Quick added task";

/// Per-mode capabilities. The three dashboards share one controller; this
/// record carries everything that differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub mode: SupportMode,
    /// Theme accent token consumed by the embedding.
    pub accent: &'static str,
    /// Whether the quick-add box is exposed.
    pub quick_add: bool,
    /// Whether the AI breakdown panel is exposed.
    pub ai_decompose: bool,
    /// Whether completing the current task requires every step done first.
    pub steps_gate_completion: bool,
}

impl ModeProfile {
    pub const fn for_mode(mode: SupportMode) -> Self {
        match mode {
            SupportMode::Adhd => Self {
                mode,
                accent: "orange",
                quick_add: true,
                ai_decompose: true,
                steps_gate_completion: false,
            },
            SupportMode::Autism => Self {
                mode,
                accent: "teal",
                quick_add: true,
                ai_decompose: true,
                steps_gate_completion: false,
            },
            SupportMode::Dyslexia => Self {
                mode,
                accent: "amber",
                quick_add: true,
                ai_decompose: true,
                steps_gate_completion: true,
            },
        }
    }
}

/// `Loading` until the first successful refresh lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// What the dashboard should render. Pure function of phase + session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Empty,
    Active,
    AllDone,
}

pub struct Dashboard<G> {
    gateway: G,
    session: Session,
    profile: ModeProfile,
    phase: Phase,
    pub quick_input: String,
    pub ai_input: String,
    pub ai_panel_open: bool,
}

impl<G: TaskGateway> Dashboard<G> {
    pub fn new(gateway: G, mut session: Session, mode: SupportMode) -> Self {
        session.set_support_mode(Some(mode));
        Self {
            gateway,
            session,
            profile: ModeProfile::for_mode(mode),
            phase: Phase::Loading,
            quick_input: String::new(),
            ai_input: String::new(),
            ai_panel_open: false,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn profile(&self) -> ModeProfile {
        self.profile
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view_state(&self) -> ViewState {
        if self.phase == Phase::Loading {
            return ViewState::Loading;
        }
        let tasks = self.session.tasks();
        if tasks.is_empty() {
            ViewState::Empty
        } else if tasks.iter().all(|t| t.completed) {
            ViewState::AllDone
        } else {
            ViewState::Active
        }
    }

    /// `(done, total)` for the progress header.
    pub fn progress(&self) -> (usize, usize) {
        let tasks = self.session.tasks();
        let done = tasks.iter().filter(|t| t.completed).count();
        (done, tasks.len())
    }

    /// Enablement of the complete-current control. Always requires an
    /// incomplete current task; the dyslexia profile additionally requires
    /// every step of it to be done.
    pub fn can_complete_current(&self) -> bool {
        let Some(task) = self.session.current_task() else {
            return false;
        };
        if task.completed {
            return false;
        }
        if self.profile.steps_gate_completion {
            task.all_steps_done()
        } else {
            true
        }
    }

    // ── Mode switching ──────────────────────────────────────────────────

    /// Swap the active profile. Tasks and preferences carry over; the
    /// session's support mode follows the profile.
    pub fn set_mode(&mut self, mode: SupportMode) {
        self.profile = ModeProfile::for_mode(mode);
        self.session.set_support_mode(Some(mode));
    }

    // ── Remote flows ────────────────────────────────────────────────────

    /// Fetch → normalize → replace → re-select. The sole path by which task
    /// state becomes visible. On failure the previous list and index stay
    /// untouched.
    pub async fn refresh(&mut self) {
        match self.gateway.list_tasks().await {
            Ok(records) => {
                let tasks = normalize_tasks(records);
                let index = next_task_index(&tasks);
                self.session.set_tasks(tasks);
                self.session.set_current_task_index(index);
                self.phase = Phase::Ready;
            }
            Err(e) => warn!("task refresh failed: {e}"),
        }
    }

    /// Mark the current task complete, then refresh. No local flip of the
    /// completion flag; the follow-up refresh is what moves the pointer.
    pub async fn complete_current(&mut self) {
        if !self.can_complete_current() {
            return;
        }
        let Some(task) = self.session.current_task() else {
            return;
        };
        let task_id = task.id;
        if let Err(e) = self.gateway.set_task_completed(task_id, true).await {
            warn!("completing task {task_id} failed: {e}");
        }
        self.refresh().await;
    }

    /// Create a task from the quick-add box. Blank input is a no-op with no
    /// gateway traffic; the input only clears once the create succeeded.
    pub async fn quick_add(&mut self) {
        if self.quick_input.trim().is_empty() {
            return;
        }
        let title = self.quick_input.clone();
        match self.gateway.create_task(&title, QUICK_ADD_DESCRIPTION).await {
            Ok(_) => self.quick_input.clear(),
            Err(e) => warn!("quick add failed: {e}"),
        }
        self.refresh().await;
    }

    /// Ask the service to break the query down into a stepped task. The
    /// response body is ignored; the refresh brings the new task in.
    pub async fn decompose(&mut self) {
        if self.ai_input.trim().is_empty() {
            return;
        }
        let query = self.ai_input.clone();
        match self.gateway.generate_steps(&query).await {
            Ok(_) => {
                self.ai_input.clear();
                self.ai_panel_open = false;
            }
            Err(e) => warn!("step generation failed: {e}"),
        }
        self.refresh().await;
    }

    /// Flip one step of the current task to the negation of its flag as of
    /// right now, then refresh.
    pub async fn toggle_step(&mut self, step_id: i64) {
        let Some(task) = self.session.current_task() else {
            return;
        };
        let Some(step) = task.steps.iter().find(|s| s.id == step_id) else {
            return;
        };
        let task_id = task.id;
        let next = !step.completed;
        if let Err(e) = self.gateway.set_step_completed(task_id, step_id, next).await {
            warn!("toggling step {step_id} failed: {e}");
        }
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use focusflow_api::{StepRecord, TaskRecord};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeGateway {
        tasks: RefCell<Vec<TaskRecord>>,
        calls: RefCell<Vec<String>>,
        fail_list: Cell<bool>,
    }

    impl FakeGateway {
        fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
            Self {
                tasks: RefCell::new(tasks),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl TaskGateway for FakeGateway {
        async fn list_tasks(&self) -> Result<Vec<TaskRecord>, GatewayError> {
            self.calls.borrow_mut().push("list".into());
            if self.fail_list.get() {
                return Err(GatewayError::Transport("connection refused".into()));
            }
            Ok(self.tasks.borrow().clone())
        }

        async fn create_task(
            &self,
            title: &str,
            description: &str,
        ) -> Result<TaskRecord, GatewayError> {
            self.calls
                .borrow_mut()
                .push(format!("create:{title}:{description}"));
            let record = TaskRecord {
                id: self.tasks.borrow().len() as i64 + 100,
                title: title.to_string(),
                description: Some(description.to_string()),
                is_completed: false,
                order: None,
                steps: Vec::new(),
            };
            self.tasks.borrow_mut().push(record.clone());
            Ok(record)
        }

        async fn set_task_completed(
            &self,
            task_id: i64,
            completed: bool,
        ) -> Result<TaskRecord, GatewayError> {
            self.calls
                .borrow_mut()
                .push(format!("complete:{task_id}:{completed}"));
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or(GatewayError::Api {
                    status: 404,
                    detail: "Task not found".into(),
                })?;
            task.is_completed = completed;
            Ok(task.clone())
        }

        async fn set_step_completed(
            &self,
            task_id: i64,
            step_id: i64,
            completed: bool,
        ) -> Result<StepRecord, GatewayError> {
            self.calls
                .borrow_mut()
                .push(format!("step:{task_id}:{step_id}:{completed}"));
            let mut tasks = self.tasks.borrow_mut();
            let step = tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .and_then(|t| t.steps.iter_mut().find(|s| s.id == step_id))
                .ok_or(GatewayError::Api {
                    status: 404,
                    detail: "Step not found".into(),
                })?;
            step.is_completed = completed;
            Ok(step.clone())
        }

        async fn generate_steps(&self, title: &str) -> Result<TaskRecord, GatewayError> {
            self.calls.borrow_mut().push(format!("generate:{title}"));
            let record = TaskRecord {
                id: self.tasks.borrow().len() as i64 + 200,
                title: title.to_string(),
                description: None,
                is_completed: false,
                order: None,
                steps: vec![
                    StepRecord {
                        id: 1,
                        content: "First step".into(),
                        order: Some(0),
                        is_completed: false,
                    },
                    StepRecord {
                        id: 2,
                        content: "Second step".into(),
                        order: Some(1),
                        is_completed: false,
                    },
                ],
            };
            self.tasks.borrow_mut().push(record.clone());
            Ok(record)
        }
    }

    fn record(id: i64, completed: bool) -> TaskRecord {
        TaskRecord {
            id,
            title: format!("task {id}"),
            description: None,
            is_completed: completed,
            order: None,
            steps: Vec::new(),
        }
    }

    fn record_with_step(id: i64, step_id: i64, step_done: bool) -> TaskRecord {
        TaskRecord {
            steps: vec![StepRecord {
                id: step_id,
                content: "only step".into(),
                order: Some(0),
                is_completed: step_done,
            }],
            ..record(id, false)
        }
    }

    fn dashboard(gateway: FakeGateway, mode: SupportMode) -> Dashboard<FakeGateway> {
        Dashboard::new(gateway, Session::new(), mode)
    }

    #[tokio::test]
    async fn refresh_selects_first_incomplete_task() {
        let fake =
            FakeGateway::with_tasks(vec![record(1, true), record(2, false), record(3, false)]);
        let mut dash = dashboard(fake, SupportMode::Adhd);
        assert_eq!(dash.view_state(), ViewState::Loading);

        dash.refresh().await;

        assert_eq!(dash.phase(), Phase::Ready);
        assert_eq!(dash.session().current_task_index(), 1);
        assert_eq!(dash.session().current_task().map(|t| t.id), Some(2));
        assert_eq!(dash.view_state(), ViewState::Active);
    }

    #[tokio::test]
    async fn refresh_with_everything_complete_falls_back_to_first() {
        let fake = FakeGateway::with_tasks(vec![record(1, true), record(2, true)]);
        let mut dash = dashboard(fake, SupportMode::Autism);
        dash.refresh().await;

        assert_eq!(dash.session().current_task_index(), 0);
        assert_eq!(dash.view_state(), ViewState::AllDone);
        assert_eq!(dash.progress(), (2, 2));
    }

    #[tokio::test]
    async fn refresh_with_no_tasks_shows_empty_state() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Adhd);
        dash.refresh().await;
        assert_eq!(dash.view_state(), ViewState::Empty);
        assert!(dash.session().current_task().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_leaves_previous_state_untouched() {
        let fake = FakeGateway::with_tasks(vec![record(1, true), record(2, false)]);
        let mut dash = dashboard(fake, SupportMode::Adhd);
        dash.refresh().await;
        let tasks_before = dash.session().tasks().to_vec();
        let index_before = dash.session().current_task_index();

        dash.gateway().fail_list.set(true);
        dash.gateway().tasks.borrow_mut().clear();
        dash.refresh().await;

        assert_eq!(dash.session().tasks(), tasks_before.as_slice());
        assert_eq!(dash.session().current_task_index(), index_before);
        assert_eq!(dash.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn failed_first_refresh_stays_in_loading() {
        let fake = FakeGateway::default();
        fake.fail_list.set(true);
        let mut dash = dashboard(fake, SupportMode::Dyslexia);
        dash.refresh().await;
        assert_eq!(dash.view_state(), ViewState::Loading);
    }

    #[tokio::test]
    async fn quick_add_with_blank_input_makes_no_calls() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Adhd);
        dash.quick_input = "   ".into();
        dash.quick_add().await;
        assert!(dash.gateway().calls().is_empty());
        assert_eq!(dash.quick_input, "   ");
    }

    #[tokio::test]
    async fn quick_add_creates_with_placeholder_then_refreshes() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Adhd);
        dash.quick_input = "Buy milk".into();
        dash.quick_add().await;

        assert_eq!(
            dash.gateway().calls(),
            vec!["create:Buy milk:Quick added task".to_string(), "list".into()]
        );
        assert!(dash.quick_input.is_empty());
        assert_eq!(dash.session().tasks().len(), 1);
        assert_eq!(dash.session().current_task().map(|t| t.id), Some(100));
    }

    #[tokio::test]
    async fn decompose_with_blank_input_makes_no_calls() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Autism);
        dash.ai_input.clear();
        dash.decompose().await;
        assert!(dash.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn decompose_clears_input_closes_panel_and_refreshes() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Autism);
        dash.ai_panel_open = true;
        dash.ai_input = "Plan the move".into();
        dash.decompose().await;

        assert_eq!(
            dash.gateway().calls(),
            vec!["generate:Plan the move".to_string(), "list".into()]
        );
        assert!(dash.ai_input.is_empty());
        assert!(!dash.ai_panel_open);
        assert_eq!(dash.session().tasks()[0].steps.len(), 2);
    }

    #[tokio::test]
    async fn completing_advances_to_the_next_incomplete_task() {
        let fake = FakeGateway::with_tasks(vec![record(1, false), record(2, false)]);
        let mut dash = dashboard(fake, SupportMode::Adhd);
        dash.refresh().await;

        dash.complete_current().await;

        assert_eq!(
            dash.gateway().calls(),
            vec!["list".to_string(), "complete:1:true".into(), "list".into()]
        );
        assert_eq!(dash.session().current_task().map(|t| t.id), Some(2));
    }

    #[tokio::test]
    async fn complete_is_a_noop_without_a_current_task() {
        let mut dash = dashboard(FakeGateway::default(), SupportMode::Adhd);
        dash.refresh().await;
        dash.complete_current().await;
        assert_eq!(dash.gateway().calls(), vec!["list".to_string()]);
    }

    #[tokio::test]
    async fn step_toggle_sends_the_negated_flag_each_time() {
        let fake = FakeGateway::with_tasks(vec![record_with_step(1, 5, false)]);
        let mut dash = dashboard(fake, SupportMode::Autism);
        dash.refresh().await;

        dash.toggle_step(5).await;
        dash.toggle_step(5).await;

        let calls = dash.gateway().calls();
        assert!(calls.contains(&"step:1:5:true".to_string()));
        assert!(calls.contains(&"step:1:5:false".to_string()));
        let first = calls.iter().position(|c| c == "step:1:5:true").unwrap();
        let second = calls.iter().position(|c| c == "step:1:5:false").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn dyslexia_gates_completion_until_steps_are_done() {
        let fake = FakeGateway::with_tasks(vec![record_with_step(1, 5, false)]);
        let mut dash = dashboard(fake, SupportMode::Dyslexia);
        dash.refresh().await;

        assert!(!dash.can_complete_current());
        dash.complete_current().await;
        assert!(!dash.gateway().calls().iter().any(|c| c.starts_with("complete:")));

        dash.toggle_step(5).await;
        assert!(dash.can_complete_current());
        dash.complete_current().await;
        assert!(dash.gateway().calls().contains(&"complete:1:true".to_string()));
    }

    #[tokio::test]
    async fn other_modes_do_not_gate_completion_on_steps() {
        let fake = FakeGateway::with_tasks(vec![record_with_step(1, 5, false)]);
        let mut dash = dashboard(fake, SupportMode::Adhd);
        dash.refresh().await;
        assert!(dash.can_complete_current());
    }

    #[tokio::test]
    async fn switching_modes_keeps_tasks_and_swaps_profile() {
        let fake = FakeGateway::with_tasks(vec![record_with_step(1, 5, false)]);
        let mut dash = dashboard(fake, SupportMode::Adhd);
        dash.refresh().await;

        dash.set_mode(SupportMode::Dyslexia);

        assert_eq!(dash.session().support_mode(), Some(SupportMode::Dyslexia));
        assert_eq!(dash.session().tasks().len(), 1);
        assert!(dash.profile().steps_gate_completion);
        assert!(!dash.can_complete_current());
    }
}
