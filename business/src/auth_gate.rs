//! Decides whether a route may render for the current session.

use log::debug;

use crate::route::Route;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed(Route),
    /// Navigate to `to`; `replace` means the blocked route must not stay in history.
    Redirected { to: Route, replace: bool },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// The route that will actually render.
    pub fn route(&self) -> Route {
        match self {
            Self::Allowed(route) => *route,
            Self::Redirected { to, .. } => *to,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    session: SessionStore,
}

impl AuthGate {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Evaluated on every mount; reads the store each time.
    pub fn check(&self, route: Route) -> GateDecision {
        if !route.requires_session() || self.session.is_active() {
            return GateDecision::Allowed(route);
        }

        debug!("no session, redirecting {} to login", route.path());
        GateDecision::Redirected {
            to: Route::Login,
            replace: true,
        }
    }

    pub fn navigate(&self, path: &str) -> GateDecision {
        self.check(Route::from_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::route::DashboardTab;
    use crate::storage::MemoryStorage;

    #[test]
    fn dashboard_redirects_without_session() {
        let gate = AuthGate::new(SessionStore::new(MemoryStorage::new()));

        assert_eq!(
            gate.navigate("/dashboard/users"),
            GateDecision::Redirected {
                to: Route::Login,
                replace: true
            }
        );
    }

    #[test]
    fn login_is_always_allowed() {
        let gate = AuthGate::new(SessionStore::new(MemoryStorage::new()));
        assert_eq!(gate.navigate("/login"), GateDecision::Allowed(Route::Login));
    }

    #[test]
    fn gate_follows_session_changes() {
        let store = SessionStore::new(MemoryStorage::new());
        let gate = AuthGate::new(store.clone());
        let users = Route::Dashboard(DashboardTab::Users);

        store.set_session("t1", &UserProfile::default()).expect("set");
        assert_eq!(gate.check(users), GateDecision::Allowed(users));

        store.clear().expect("clear");
        assert!(!gate.check(users).is_allowed());
        assert_eq!(gate.check(users).route(), Route::Login);
    }
}
