//! Navigable locations of the admin panel.
//!
//! Paths look like `/login`, `/dashboard` and `/dashboard/<tab>`. Anything else,
//! including `/`, resolves to the login page.

use serde::{Deserialize, Serialize};

/// Tabs of the dashboard shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardTab {
    #[default]
    Overview,
    Users,
    Messages,
    Channels,
    Settings,
}

impl DashboardTab {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Users,
        Self::Messages,
        Self::Channels,
        Self::Settings,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Users => "users",
            Self::Messages => "messages",
            Self::Channels => "channels",
            Self::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Users => "Users",
            Self::Messages => "Messages",
            Self::Channels => "Channels",
            Self::Settings => "Settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(slug))
    }

    /// Tabs that exist in the navigation but have no content yet.
    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::Messages | Self::Channels | Self::Settings)
    }
}

/// Represents the current page/route of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Login page, the only public route.
    #[default]
    Login,
    Dashboard(DashboardTab),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let mut segments = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty());

        match (segments.next(), segments.next(), segments.next()) {
            (Some("dashboard"), None, None) => Self::Dashboard(DashboardTab::Overview),
            (Some("dashboard"), Some(tab), None) => DashboardTab::from_slug(tab)
                .map(Self::Dashboard)
                .unwrap_or(Self::Login),
            _ => Self::Login,
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Dashboard(DashboardTab::Overview) => "/dashboard".to_owned(),
            Self::Dashboard(tab) => format!("/dashboard/{}", tab.slug()),
        }
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn is_placeholder(self) -> bool {
        match self {
            Self::Login => false,
            Self::Dashboard(tab) => tab.is_placeholder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_default_is_login() {
        assert_eq!(Route::default(), Route::Login);
    }

    #[test]
    fn parses_dashboard_paths() {
        assert_eq!(
            Route::from_path("/dashboard"),
            Route::Dashboard(DashboardTab::Overview)
        );
        assert_eq!(
            Route::from_path("/dashboard/users/"),
            Route::Dashboard(DashboardTab::Users)
        );
        assert_eq!(
            Route::from_path("/dashboard/Settings?x=1"),
            Route::Dashboard(DashboardTab::Settings)
        );
    }

    #[test]
    fn root_and_unknown_paths_go_to_login() {
        for path in ["", "/", "/login", "/nope", "/dashboard/nope", "/dashboard/users/7"] {
            assert_eq!(Route::from_path(path), Route::Login, "path {path:?}");
        }
    }

    #[test]
    fn path_round_trips() {
        let routes = std::iter::once(Route::Login).chain(DashboardTab::ALL.map(Route::Dashboard));
        for route in routes {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn placeholders() {
        assert!(!Route::Login.is_placeholder());
        assert!(!Route::Dashboard(DashboardTab::Users).is_placeholder());
        assert!(Route::Dashboard(DashboardTab::Channels).is_placeholder());
    }
}
