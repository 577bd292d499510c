use crossterm::event::KeyCode;
use tracing::warn;

use focusflow_api_client::ApiClient;
use focusflow_core::{
    AccessibilitySettings, ClassSet, Dashboard, EffectApplier, Session, SupportMode, User,
};
use focusflow_local_store::LocalStore;

use crate::async_ops::Action;
use crate::settings::{self, SettingField};

/// Which screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Onboarding,
    Dashboard,
    Settings,
}

/// Focused field on the login screen. `SwitchMode` is the sign-in /
/// create-account toggle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Name,
    SwitchMode,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub name: String,
    /// True when the form is in create-account mode.
    pub signup: bool,
    pub focus: LoginField,
    pub status: Option<String>,
}

/// Keyboard focus inside the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashFocus {
    Browse,
    QuickAdd,
    AiPanel,
}

pub struct App {
    pub screen: Screen,
    pub login: LoginForm,
    pub onboarding_index: usize,
    pub settings_cursor: usize,
    pub dash_focus: DashFocus,

    /// Present once the user is signed in and onboarded.
    pub dashboard: Option<Dashboard<ApiClient>>,
    /// Authenticated client parked while onboarding is unfinished.
    pub auth_client: Option<ApiClient>,
    /// Signed-in user parked while onboarding is unfinished.
    pub pending_user: Option<User>,

    /// Accessibility snapshot used before a session exists, and refreshed on
    /// logout so preferences outlive the account.
    pub stored_accessibility: AccessibilitySettings,

    pub store: LocalStore,
    pub applier: EffectApplier<ClassSet, LocalStore>,
    pub server_url: String,

    /// One queued async action, consumed by the run loop between frames.
    pub pending: Option<Action>,
    /// Transient status line shown at the bottom, cleared on the next key.
    pub toast: Option<String>,
}

impl App {
    pub fn new(store: LocalStore, server_url: String) -> Self {
        let stored = store.load();
        let applier = EffectApplier::new(ClassSet::new(), store.clone());
        Self {
            screen: Screen::Login,
            login: LoginForm::default(),
            onboarding_index: 0,
            settings_cursor: 0,
            dash_focus: DashFocus::Browse,
            dashboard: None,
            auth_client: None,
            pending_user: None,
            stored_accessibility: stored.accessibility,
            store,
            applier,
            server_url,
            pending: None,
            toast: None,
        }
    }

    /// Accessibility settings currently in effect: the session's when signed
    /// in, the stored snapshot otherwise.
    pub fn accessibility(&self) -> AccessibilitySettings {
        match &self.dashboard {
            Some(dash) => dash.session().accessibility(),
            None => self.stored_accessibility,
        }
    }

    /// Whether the contrast boost pair is active on the render target.
    pub fn contrast_boosted(&self) -> bool {
        self.applier.target().contains("contrast-125")
    }

    /// Recompute presentation classes and persist the snapshot.
    pub fn apply_effects(&mut self) {
        let settings = self.accessibility();
        let mode = self
            .dashboard
            .as_ref()
            .and_then(|dash| dash.session().support_mode());
        if let Err(err) = self.applier.apply(&settings, mode) {
            warn!("persisting accessibility snapshot failed: {err}");
        }
    }

    // ── Screen transitions ───────────────────────────────────────────

    /// Move into the dashboard once auth and onboarding are both settled.
    pub fn enter_dashboard(&mut self, client: ApiClient, user: User, mode: SupportMode) {
        let mut session = Session::new();
        session.set_user(Some(user));
        session.set_onboarding_complete(true);
        session.set_accessibility(self.stored_accessibility);
        self.dashboard = Some(Dashboard::new(client, session, mode));
        self.auth_client = None;
        self.pending_user = None;
        self.screen = Screen::Dashboard;
        self.dash_focus = DashFocus::Browse;
        self.login = LoginForm::default();
        self.apply_effects();
        self.pending = Some(Action::Refresh);
    }

    /// Park the signed-in user on the mode-choice screen.
    pub fn enter_onboarding(&mut self, client: ApiClient, user: User) {
        self.auth_client = Some(client);
        self.pending_user = Some(user);
        self.screen = Screen::Onboarding;
        self.onboarding_index = 0;
        self.login = LoginForm::default();
    }

    /// Drop all authenticated state and return to the login screen.
    /// Accessibility preferences survive; the stored token does not.
    pub fn logout(&mut self) {
        if let Some(dash) = self.dashboard.as_mut() {
            self.stored_accessibility = dash.session().accessibility();
            dash.session_mut().logout();
        }
        self.dashboard = None;
        self.auth_client = None;
        self.pending_user = None;
        if let Err(err) = self.store.clear_token() {
            warn!("clearing stored token failed: {err}");
        }
        self.screen = Screen::Login;
        self.login = LoginForm::default();
        self.dash_focus = DashFocus::Browse;
        self.apply_effects();
    }

    // ── Key handling ─────────────────────────────────────────────────

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        self.toast = None;
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Onboarding => self.handle_onboarding_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => {
                self.login.focus = self.next_login_field(self.login.focus);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.focus = self.prev_login_field(self.login.focus);
            }
            KeyCode::Enter => match self.login.focus {
                LoginField::SwitchMode => {
                    self.login.signup = !self.login.signup;
                    self.login.status = None;
                    self.login.focus = LoginField::Email;
                }
                _ => self.submit_login(),
            },
            KeyCode::Backspace => {
                if let Some(field) = self.login_text_field() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.login_text_field() {
                    field.push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn login_text_field(&mut self) -> Option<&mut String> {
        match self.login.focus {
            LoginField::Email => Some(&mut self.login.email),
            LoginField::Password => Some(&mut self.login.password),
            LoginField::Name => Some(&mut self.login.name),
            LoginField::SwitchMode => None,
        }
    }

    fn next_login_field(&self, field: LoginField) -> LoginField {
        match (field, self.login.signup) {
            (LoginField::Email, _) => LoginField::Password,
            (LoginField::Password, true) => LoginField::Name,
            (LoginField::Password, false) => LoginField::SwitchMode,
            (LoginField::Name, _) => LoginField::SwitchMode,
            (LoginField::SwitchMode, _) => LoginField::Email,
        }
    }

    fn prev_login_field(&self, field: LoginField) -> LoginField {
        match (field, self.login.signup) {
            (LoginField::Email, _) => LoginField::SwitchMode,
            (LoginField::Password, _) => LoginField::Email,
            (LoginField::Name, _) => LoginField::Password,
            (LoginField::SwitchMode, true) => LoginField::Name,
            (LoginField::SwitchMode, false) => LoginField::Password,
        }
    }

    fn submit_login(&mut self) {
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();
        if email.is_empty() || password.is_empty() {
            self.login.status = Some("Email and password are required".to_string());
            return;
        }
        if self.login.signup {
            let name = self.login.name.trim().to_string();
            if name.is_empty() {
                self.login.status = Some("Name is required to create an account".to_string());
                return;
            }
            self.login.status = Some("Creating account...".to_string());
            self.pending = Some(Action::Signup {
                email,
                password,
                name,
            });
        } else {
            self.login.status = Some("Signing in...".to_string());
            self.pending = Some(Action::Login { email, password });
        }
    }

    fn handle_onboarding_key(&mut self, key: KeyCode) -> bool {
        let count = SupportMode::ALL.len();
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.logout(),
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => {
                self.onboarding_index = (self.onboarding_index + count - 1) % count;
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => {
                self.onboarding_index = (self.onboarding_index + 1) % count;
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.onboarding_index = (c as usize) - ('1' as usize);
            }
            KeyCode::Enter => {
                let mode = SupportMode::ALL[self.onboarding_index];
                self.pending = Some(Action::ChooseMode(mode));
            }
            _ => {}
        }
        false
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) -> bool {
        match self.dash_focus {
            DashFocus::Browse => self.handle_browse_key(key),
            DashFocus::QuickAdd => {
                self.handle_quick_add_key(key);
                false
            }
            DashFocus::AiPanel => {
                self.handle_ai_panel_key(key);
                false
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => self.pending = Some(Action::Refresh),
            KeyCode::Char('c') => self.pending = Some(Action::CompleteCurrent),
            KeyCode::Char('a') => {
                if self.quick_add_available() {
                    self.dash_focus = DashFocus::QuickAdd;
                }
            }
            KeyCode::Char('i') => {
                if self.ai_panel_available() {
                    if let Some(dash) = self.dashboard.as_mut() {
                        dash.ai_panel_open = true;
                    }
                    self.dash_focus = DashFocus::AiPanel;
                }
            }
            KeyCode::Char('z') => self.toggle_zen(),
            KeyCode::Char('s') => {
                self.screen = Screen::Settings;
                self.settings_cursor = 0;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let ordinal = (c as usize) - ('1' as usize);
                if let Some(step_id) = self.nth_step_id(ordinal) {
                    self.pending = Some(Action::ToggleStep(step_id));
                }
            }
            _ => {}
        }
        false
    }

    fn quick_add_available(&self) -> bool {
        match &self.dashboard {
            Some(dash) => dash.profile().quick_add && !dash.session().accessibility().zen_mode,
            None => false,
        }
    }

    fn ai_panel_available(&self) -> bool {
        match &self.dashboard {
            Some(dash) => dash.profile().ai_decompose && !dash.session().accessibility().zen_mode,
            None => false,
        }
    }

    fn nth_step_id(&self, ordinal: usize) -> Option<i64> {
        let dash = self.dashboard.as_ref()?;
        let task = dash.session().current_task()?;
        task.steps.get(ordinal).map(|step| step.id)
    }

    fn toggle_zen(&mut self) {
        if let Some(dash) = self.dashboard.as_mut() {
            let mut settings = dash.session().accessibility();
            settings.zen_mode = !settings.zen_mode;
            dash.session_mut().set_accessibility(settings);
            if settings.zen_mode {
                dash.ai_panel_open = false;
            }
        }
        if self.accessibility().zen_mode {
            self.dash_focus = DashFocus::Browse;
        }
        self.apply_effects();
    }

    fn handle_quick_add_key(&mut self, key: KeyCode) {
        let Some(dash) = self.dashboard.as_mut() else {
            self.dash_focus = DashFocus::Browse;
            return;
        };
        match key {
            KeyCode::Esc => self.dash_focus = DashFocus::Browse,
            KeyCode::Enter => self.pending = Some(Action::QuickAdd),
            KeyCode::Backspace => {
                dash.quick_input.pop();
            }
            KeyCode::Char(c) => dash.quick_input.push(c),
            _ => {}
        }
    }

    fn handle_ai_panel_key(&mut self, key: KeyCode) {
        let Some(dash) = self.dashboard.as_mut() else {
            self.dash_focus = DashFocus::Browse;
            return;
        };
        match key {
            KeyCode::Esc => {
                dash.ai_panel_open = false;
                self.dash_focus = DashFocus::Browse;
            }
            KeyCode::Enter => self.pending = Some(Action::Decompose),
            KeyCode::Backspace => {
                dash.ai_input.pop();
            }
            KeyCode::Char(c) => dash.ai_input.push(c),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_cursor + 1 < settings::selectable_count() {
                    self.settings_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_cursor = self.settings_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(field) = settings::nth_field(self.settings_cursor) {
                    self.activate_setting(field);
                }
            }
            KeyCode::Char('m') => self.cycle_mode(),
            KeyCode::Char('x') => self.logout(),
            _ => {}
        }
        false
    }

    /// Toggle or cycle one setting, then reapply and persist.
    fn activate_setting(&mut self, field: SettingField) {
        if field == SettingField::SupportMode {
            self.cycle_mode();
            return;
        }
        if let Some(dash) = self.dashboard.as_mut() {
            let mut settings = dash.session().accessibility();
            field.activate(&mut settings);
            dash.session_mut().set_accessibility(settings);
        } else {
            let mut settings = self.stored_accessibility;
            field.activate(&mut settings);
            self.stored_accessibility = settings;
        }
        self.apply_effects();
    }

    fn cycle_mode(&mut self) {
        if let Some(dash) = self.dashboard.as_mut() {
            let next = dash.profile().mode.cycle();
            dash.set_mode(next);
        }
        self.apply_effects();
    }
}
