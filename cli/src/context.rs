//! Wiring of config, session storage and services for one CLI invocation.

use anyhow::{Context as _, Result, bail};
use sphere_business::storage::FileStorage;
use sphere_business::{
    ApiClient, AuthGate, BusinessConfig, GateDecision, LoginController, Route, Services,
    SessionStore, StatsController, UserListController,
};
use tracing::debug;

pub struct AppContext {
    pub config: BusinessConfig,
    pub session: SessionStore,
    pub services: Services,
    pub gate: AuthGate,
}

impl AppContext {
    /// Config from the environment, `--api-url` on top, session in the platform config dir.
    pub fn from_env(api_url: Option<String>) -> Result<Self> {
        let mut config = BusinessConfig::from_env().context("Invalid SPHERE_* environment")?;
        if let Some(url) = api_url {
            config.api_base_url = BusinessConfig::new(url).api_base_url;
        }

        let storage = FileStorage::open_default().context("Failed to locate session storage")?;
        debug!(path = %storage.path().display(), "using session file");

        Ok(Self::new(config, SessionStore::new(storage)))
    }

    pub fn new(config: BusinessConfig, session: SessionStore) -> Self {
        let client = ApiClient::new(config.clone(), session.clone());
        Self {
            gate: AuthGate::new(session.clone()),
            services: Services::new(client),
            config,
            session,
        }
    }

    /// Runs the auth gate for `route`; a redirect becomes an error.
    pub fn require(&self, route: Route) -> Result<()> {
        match self.gate.check(route) {
            GateDecision::Allowed(_) => Ok(()),
            GateDecision::Redirected { .. } => {
                bail!("Not logged in. Run `sphere-admin login` first.")
            }
        }
    }

    pub fn login_controller(&self) -> LoginController {
        LoginController::new(self.services.auth.clone())
    }

    pub fn stats_controller(&self) -> StatsController {
        StatsController::new(self.services.stats.clone())
    }

    pub fn users_controller(&self) -> UserListController {
        UserListController::new(
            self.services.users.clone(),
            self.services.static_data.clone(),
            self.config.page_size,
        )
    }
}
