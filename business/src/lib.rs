//! Business layer of the Sphere Admin panel.
//!
//! Everything below the presentation layer lives here: configuration, the persisted
//! session, the API gateway client and domain services, the auth gate, and the
//! view-state controllers that a front-end drives.

mod auth_gate;
mod config;
mod dashboard;
mod error;
mod gateway;
pub mod http;
mod login_state;
mod models;
mod route;
mod services;
mod session;
pub mod storage;
mod users;

pub use auth_gate::{AuthGate, GateDecision};
pub use config::{BusinessConfig, ConfigError, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use dashboard::{StatCard, StatValue, StatsController, StatsResult};
pub use error::{
    ApiError, ApiErrorKind, INVALID_RESPONSE_MESSAGE, NO_RESPONSE_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE, ValidationError, ViewError,
};
pub use gateway::{ApiClient, decode_envelope};
pub use login_state::{LoginController, LoginInput, LoginStatus};
pub use models::{
    Envelope, ListUsersRequest, LoginData, LoginRequest, NewUserForm, PASSWORD_AUTH_PROVIDER_ID,
    ProfilePicture, Role, SystemStats, UserProfile,
};
pub use route::{DashboardTab, Route};
pub use services::{
    AUTH_FALLBACK, AuthService, STATIC_DATA_FALLBACK, STATS_FALLBACK, StaticDataService,
    StatsService, USERS_FALLBACK, UserService,
};
pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use users::{CreateFormState, DetailView, UserListController, UserListPage, UsersViewState};

/// All services, sharing one gateway client.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub stats: StatsService,
    pub users: UserService,
    pub static_data: StaticDataService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            stats: StatsService::new(client.clone()),
            users: UserService::new(client.clone()),
            static_data: StaticDataService::new(client),
        }
    }
}
