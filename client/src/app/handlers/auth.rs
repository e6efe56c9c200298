//! # Authentication Handlers
//!
//! Login, registration, logout and profile management.

use shared::{AuthResponse, LoginRequest, MessageResponse, ProfileUpdate, RegisterRequest, User};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{validate_email, validate_registration};

impl Store {
    /// Create an account; a successful registration logs the user in.
    pub fn register(&self, request: RegisterRequest) -> Result<()> {
        if let Err(e) = validate_registration(&request).into_result() {
            self.state.write().auth.status.fail(validation_message(&e));
            return Err(e);
        }

        let generation = self.state.write().auth.status.begin(Op::Register);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.register(request).await }, AppEvent::RegisterResult);
        Ok(())
    }

    pub fn login(&self, email: String, password: String) -> Result<()> {
        if email.is_empty() || password.is_empty() {
            let err = AppError::Validation("Email and password required".to_string());
            self.state.write().auth.status.fail(validation_message(&err));
            return Err(err);
        }
        if let Err(e) = validate_email(&email).into_result() {
            self.state.write().auth.status.fail(validation_message(&e));
            return Err(e);
        }

        let generation = self.state.write().auth.status.begin(Op::Login);
        let api = self.api.clone();
        let request = LoginRequest { email, password };
        self.spawn_request(generation, async move { api.login(request).await }, AppEvent::LoginResult);
        Ok(())
    }

    /// Drop the local session immediately, then tell the backend.
    ///
    /// The local clear does not depend on the request succeeding. Session
    /// requests still in flight are discarded when they land.
    pub fn logout(&self) {
        let generation = {
            let mut state = self.state.write();
            for op in [Op::Register, Op::Login, Op::FetchCurrentUser, Op::UpdateProfile] {
                state.auth.status.invalidate(op);
            }
            state.auth.clear();
            state.purchase = Default::default();
            state.auth.status.begin(Op::Logout)
        };
        self.persist();
        tracing::info!("Logged out locally");

        let api = self.api.clone();
        self.spawn_request(generation, async move { api.logout().await }, AppEvent::LogoutResult);
    }

    pub fn fetch_current_user(&self) {
        let generation = self.state.write().auth.status.begin(Op::FetchCurrentUser);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.current_user().await }, AppEvent::CurrentUserResult);
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }
        if let Some(email) = &update.email {
            validate_email(email).into_result()?;
        }

        let generation = self.state.write().auth.status.begin(Op::UpdateProfile);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.update_profile(update).await },
            AppEvent::ProfileUpdateResult,
        );
        Ok(())
    }

    pub fn verify_password(&self, password: String) {
        let generation = self.state.write().auth.status.begin(Op::VerifyPassword);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.verify_password(password).await },
            AppEvent::VerifyPasswordResult,
        );
    }

    // ---- reducers ----

    pub(crate) fn on_register(&self, outcome: Outcome<AuthResponse>) {
        self.apply_session(Op::Register, outcome, "Registration successful");
    }

    pub(crate) fn on_login(&self, outcome: Outcome<AuthResponse>) {
        self.apply_session(Op::Login, outcome, "Login successful");
    }

    fn apply_session(&self, op: Op, outcome: Outcome<AuthResponse>, success: &str) {
        let mut state = self.state.write();
        let Some(response) = state.auth.status.resolve(op, outcome) else {
            return;
        };

        tracing::info!(user_id = %response.user.id, admin = response.user.is_admin(), "Session established");
        self.api.set_token(Some(response.token.clone()));
        state.auth.set_credentials(response.user, response.token);
        state.notify(NotificationLevel::Success, response.message.unwrap_or_else(|| success.to_string()));
    }

    pub(crate) fn on_logout(&self, outcome: Outcome<MessageResponse>) {
        let mut state = self.state.write();
        if !state.auth.status.settle(Op::Logout, outcome.generation) {
            return;
        }
        if let Err(e) = outcome.result {
            // The local session is already gone; nothing to surface.
            tracing::warn!(error = %e, "Logout request failed");
        }
        if state.auth.token.is_none() {
            self.api.set_token(None);
        }
    }

    pub(crate) fn on_current_user(&self, outcome: Outcome<User>) {
        let mut state = self.state.write();
        if !state.auth.status.settle(Op::FetchCurrentUser, outcome.generation) {
            return;
        }
        match outcome.result {
            Ok(_) if state.auth.token.is_none() => {
                tracing::debug!("Ignoring current user without a session");
            }
            Ok(user) => state.auth.set_user(Some(user)),
            Err(e) if e.status == Some(401) => {
                tracing::info!("Session expired");
                state.auth.clear();
                self.api.set_token(None);
                state.auth.status.fail(e.message);
            }
            Err(e) => state.auth.status.fail(e.message),
        }
    }

    pub(crate) fn on_profile_update(&self, outcome: Outcome<User>) {
        let mut state = self.state.write();
        if let Some(user) = state.auth.status.resolve(Op::UpdateProfile, outcome) {
            state.auth.user = Some(user);
            state.notify(NotificationLevel::Success, "Profile updated");
        }
    }

    pub(crate) fn on_verify_password(&self, outcome: Outcome<MessageResponse>) {
        let mut state = self.state.write();
        if let Some(response) = state.auth.status.resolve(Op::VerifyPassword, outcome) {
            let message = if response.message.is_empty() {
                "Password verified".to_string()
            } else {
                response.message
            };
            state.notify(NotificationLevel::Success, message);
        }
    }
}

/// Validation errors are stored without the category prefix.
fn validation_message(err: &AppError) -> String {
    match err {
        AppError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}
