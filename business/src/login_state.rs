//! Login form state and the submit flow.
//!
//! The controller owns the email/password inputs and the [`LoginStatus`]. `submit`
//! validates locally, then runs [`AuthService::login`] in the background; the outcome
//! is applied on the next [`LoginController::sync`] or [`LoginController::settle`].

use log::info;
use sphere_states::{TaskId, TaskSlot, UpdateQueue};

use crate::error::{ApiError, ValidationError, ViewError};
use crate::services::AuthService;
use crate::session::Session;

/// Input state for the login form.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        if self.email.trim().is_empty() {
            fields.push("email");
        }
        if self.password.is_empty() {
            fields.push("password");
        }

        let message = match fields.as_slice() {
            [] => return Ok(()),
            ["email"] => "Email is required",
            ["password"] => "Password is required",
            _ => "Email and password are required",
        };
        Err(ValidationError::new(fields, message))
    }
}

/// Result/status of authentication.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoginStatus {
    #[default]
    Idle,
    Submitting,
    LoggedIn(Session),
    Failed(ViewError),
}

impl LoginStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::LoggedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

struct LoginAttempt;

type LoginOutcome = (TaskId, Result<Session, ApiError>);

#[derive(Debug)]
pub struct LoginController {
    auth: AuthService,
    pub input: LoginInput,
    status: LoginStatus,
    slot: TaskSlot,
    updates: UpdateQueue<LoginOutcome>,
}

impl LoginController {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            input: LoginInput::default(),
            status: LoginStatus::Idle,
            slot: TaskSlot::of::<LoginAttempt>(),
            updates: UpdateQueue::new(),
        }
    }

    pub fn status(&self) -> &LoginStatus {
        &self.status
    }

    /// Starts a login with the current inputs. Ignored while one is in flight.
    pub fn submit(&mut self) {
        if self.status.is_submitting() {
            return;
        }
        if let Err(e) = self.input.validate() {
            self.status = LoginStatus::Failed(e.into());
            return;
        }

        self.status = LoginStatus::Submitting;
        let task = self.slot.begin().id();
        let auth = self.auth.clone();
        let email = self.input.email.trim().to_owned();
        let password = self.input.password.clone();

        self.updates.spawn(async move {
            let result = auth.login(&email, &password).await;
            (task, result)
        });
    }

    /// Applies a finished login, if any. Call once per frame.
    pub fn sync(&mut self) {
        while let Some(outcome) = self.updates.try_next() {
            self.apply(outcome);
        }
    }

    /// Waits for the in-flight login and applies it.
    pub async fn settle(&mut self) {
        while let Some(outcome) = self.updates.next().await {
            self.apply(outcome);
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, LoginStatus::Failed(_)) {
            self.status = LoginStatus::Idle;
        }
    }

    fn apply(&mut self, (task, result): LoginOutcome) {
        if !self.slot.finish(task) {
            return;
        }

        self.status = match result {
            Ok(session) => {
                info!("login form completed for {}", session.user.email);
                self.input.password.clear();
                LoginStatus::LoggedIn(session)
            }
            Err(e) => LoginStatus::Failed(e.into()),
        };
    }
}
