//! The session & preference store: one owned aggregate, explicit mutators.

use crate::model::{AccessibilitySettings, SupportMode, Task, User};

/// Process-wide session state. Every mutator replaces its field wholesale;
/// none of them can fail. The embedding must route all mutations through a
/// single owner so nothing observes a half-applied change; mutations here
/// are plain `&mut self` calls, so ownership enforces that for free.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    support_mode: Option<SupportMode>,
    onboarding_complete: bool,
    tasks: Vec<Task>,
    current_task_index: usize,
    accessibility: AccessibilitySettings,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn support_mode(&self) -> Option<SupportMode> {
        self.support_mode
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn current_task_index(&self) -> usize {
        self.current_task_index
    }

    /// The task the index points at; `None` only when the list is empty.
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.current_task_index)
    }

    pub fn accessibility(&self) -> AccessibilitySettings {
        self.accessibility
    }

    // ── Mutations ───────────────────────────────────────────────────────

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn set_support_mode(&mut self, mode: Option<SupportMode>) {
        self.support_mode = mode;
    }

    pub fn set_onboarding_complete(&mut self, done: bool) {
        self.onboarding_complete = done;
    }

    /// Wholesale task-list replacement. The index is re-clamped so the
    /// `0 ≤ index < max(1, len)` invariant holds even before the caller
    /// re-selects the current task.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.current_task_index = clamp_index(self.current_task_index, self.tasks.len());
    }

    pub fn set_current_task_index(&mut self, index: usize) {
        self.current_task_index = clamp_index(index, self.tasks.len());
    }

    pub fn set_accessibility(&mut self, settings: AccessibilitySettings) {
        self.accessibility = settings;
    }

    /// Clears user, support mode, onboarding flag, and tasks in one call.
    /// Accessibility preferences survive. The embedding must also delete
    /// its durably stored session token.
    pub fn logout(&mut self) {
        self.user = None;
        self.support_mode = None;
        self.onboarding_complete = false;
        self.tasks.clear();
        self.current_task_index = 0;
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontSize;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            completed,
            display_order: None,
            steps: Vec::new(),
        }
    }

    fn authenticated_session() -> Session {
        let mut session = Session::new();
        session.set_user(Some(User {
            id: 1,
            email: "mo@example.com".into(),
            name: "Mo".into(),
        }));
        session.set_support_mode(Some(SupportMode::Adhd));
        session.set_onboarding_complete(true);
        session.set_tasks(vec![task(1, true), task(2, false)]);
        session.set_current_task_index(1);
        session
    }

    #[test]
    fn authentication_derives_from_user_presence() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        session.set_user(Some(User {
            id: 9,
            email: "a@b.c".into(),
            name: "A".into(),
        }));
        assert!(session.is_authenticated());
        session.set_user(None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_everything_but_accessibility() {
        let mut session = authenticated_session();
        let mut settings = session.accessibility();
        settings.font_size = FontSize::Xl;
        session.set_accessibility(settings);

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.support_mode(), None);
        assert!(!session.onboarding_complete());
        assert!(session.tasks().is_empty());
        assert_eq!(session.current_task_index(), 0);
        assert_eq!(session.accessibility().font_size, FontSize::Xl);
    }

    #[test]
    fn replacing_with_shorter_list_clamps_the_index() {
        let mut session = authenticated_session();
        session.set_current_task_index(1);
        session.set_tasks(vec![task(7, false)]);
        assert_eq!(session.current_task_index(), 0);
        assert_eq!(session.current_task().map(|t| t.id), Some(7));
    }

    #[test]
    fn index_is_clamped_into_the_list() {
        let mut session = Session::new();
        session.set_tasks(vec![task(1, false), task(2, false), task(3, false)]);
        session.set_current_task_index(9);
        assert_eq!(session.current_task_index(), 2);
    }

    #[test]
    fn empty_list_pins_index_to_zero_with_no_current_task() {
        let mut session = Session::new();
        session.set_current_task_index(5);
        assert_eq!(session.current_task_index(), 0);
        assert!(session.current_task().is_none());
    }
}
