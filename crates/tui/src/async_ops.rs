//! Async actions queued by key handlers and executed between frames.
//!
//! The run loop owns the tokio runtime and executes at most one action at a
//! time, so every session mutation happens on the event-loop thread.

use std::time::Duration;

use tracing::warn;

use focusflow_api::{LoginRequest, ProfileUpsert, SignupRequest, UserRecord};
use focusflow_api_client::ApiClient;
use focusflow_core::{GatewayError, SupportMode, User};

use crate::app::{App, Screen};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One unit of async work.
#[derive(Debug, Clone)]
pub enum Action {
    RestoreSession {
        token: String,
    },
    Login {
        email: String,
        password: String,
    },
    Signup {
        email: String,
        password: String,
        name: String,
    },
    ChooseMode(SupportMode),
    Refresh,
    CompleteCurrent,
    QuickAdd,
    Decompose,
    ToggleStep(i64),
}

/// Execute one action against the server and fold the outcome into the app.
pub async fn dispatch(app: &mut App, action: Action) {
    match action {
        Action::RestoreSession { token } => restore_session(app, token).await,
        Action::Login { email, password } => login(app, &email, &password).await,
        Action::Signup {
            email,
            password,
            name,
        } => signup(app, email, password, name).await,
        Action::ChooseMode(mode) => choose_mode(app, mode).await,
        Action::Refresh => {
            if let Some(dash) = app.dashboard.as_mut() {
                dash.refresh().await;
            }
        }
        Action::CompleteCurrent => {
            if let Some(dash) = app.dashboard.as_mut() {
                dash.complete_current().await;
            }
        }
        Action::QuickAdd => {
            if let Some(dash) = app.dashboard.as_mut() {
                dash.quick_add().await;
            }
        }
        Action::Decompose => {
            if let Some(dash) = app.dashboard.as_mut() {
                dash.decompose().await;
            }
        }
        Action::ToggleStep(step_id) => {
            if let Some(dash) = app.dashboard.as_mut() {
                dash.toggle_step(step_id).await;
            }
        }
    }
}

fn make_client(server_url: &str, token: Option<&str>) -> Result<ApiClient, GatewayError> {
    let mut client = ApiClient::new(server_url, REQUEST_TIMEOUT)?;
    if let Some(token) = token {
        client.set_auth(token.to_string());
    }
    Ok(client)
}

fn to_user(record: UserRecord) -> User {
    User {
        id: record.id,
        email: record.email,
        name: record.name,
    }
}

/// Login-screen error line: prefer the server's detail over the full error.
fn login_error(err: GatewayError) -> String {
    match err {
        GatewayError::Api { detail, .. } => detail,
        other => other.to_string(),
    }
}

async fn restore_session(app: &mut App, token: String) {
    let client = match make_client(&app.server_url, Some(&token)) {
        Ok(client) => client,
        Err(err) => {
            app.login.status = Some(err.to_string());
            return;
        }
    };
    match client.me().await {
        Ok(user) => finish_auth(app, client, to_user(user)).await,
        Err(err) => {
            // A stale or revoked token is normal; fall back to login quietly.
            warn!("session restore failed: {err}");
            if let Err(err) = app.store.clear_token() {
                warn!("clearing stored token failed: {err}");
            }
            app.screen = Screen::Login;
            app.login.status = None;
        }
    }
}

async fn login(app: &mut App, email: &str, password: &str) {
    let mut client = match make_client(&app.server_url, None) {
        Ok(client) => client,
        Err(err) => {
            app.login.status = Some(err.to_string());
            return;
        }
    };
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    match client.login(&request).await {
        Ok(token) => {
            if let Err(err) = app.store.save_token(&token.access_token) {
                warn!("storing session token failed: {err}");
            }
            client.set_auth(token.access_token);
            match client.me().await {
                Ok(user) => finish_auth(app, client, to_user(user)).await,
                Err(err) => app.login.status = Some(login_error(err)),
            }
        }
        Err(err) => app.login.status = Some(login_error(err)),
    }
}

async fn signup(app: &mut App, email: String, password: String, name: String) {
    let client = match make_client(&app.server_url, None) {
        Ok(client) => client,
        Err(err) => {
            app.login.status = Some(err.to_string());
            return;
        }
    };
    let request = SignupRequest {
        email: email.clone(),
        password: password.clone(),
        name,
    };
    match client.signup(&request).await {
        // Accounts start signed out server-side; chain straight into login.
        Ok(_) => login(app, &email, &password).await,
        Err(err) => app.login.status = Some(login_error(err)),
    }
}

/// Route a freshly authenticated user to the dashboard or onboarding.
async fn finish_auth(app: &mut App, client: ApiClient, user: User) {
    match client.profile().await {
        Ok(profile) => {
            let mode = profile.support_mode.parse::<SupportMode>();
            match (mode, profile.onboarding_completed) {
                (Ok(mode), true) => app.enter_dashboard(client, user, mode),
                _ => app.enter_onboarding(client, user),
            }
        }
        Err(GatewayError::Api { status: 404, .. }) => app.enter_onboarding(client, user),
        Err(err) => {
            warn!("profile fetch failed: {err}");
            if let Err(err) = app.store.clear_token() {
                warn!("clearing stored token failed: {err}");
            }
            app.screen = Screen::Login;
            app.login.status = Some(login_error(err));
        }
    }
}

async fn choose_mode(app: &mut App, mode: SupportMode) {
    let Some(client) = app.auth_client.take() else {
        return;
    };
    let request = ProfileUpsert {
        support_mode: mode.as_str().to_string(),
    };
    match client.upsert_profile(&request).await {
        Ok(_) => {
            let Some(user) = app.pending_user.take() else {
                return;
            };
            app.enter_dashboard(client, user, mode);
        }
        Err(err) => {
            app.toast = Some(err.to_string());
            app.auth_client = Some(client);
        }
    }
}
