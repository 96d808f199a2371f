//! CLI integration tests using mock servers.
//!
//! These tests don't spawn the binary. They run the same business workflows the
//! commands run, with the session kept in a file the way the CLI keeps it, so state
//! must survive between separate "invocations".

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::path::Path;

use sphere_business::storage::FileStorage;
use sphere_business::{
    ApiClient, AuthGate, BusinessConfig, GateDecision, LoginController, Route, Services,
    SessionStore, UserListController,
};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test context for CLI integration tests.
struct CliTestContext {
    mock_server: MockServer,
    dir: TempDir,
}

/// What one CLI process builds at startup.
struct Invocation {
    session: SessionStore,
    services: Services,
    gate: AuthGate,
    page_size: u32,
}

impl CliTestContext {
    async fn new() -> Self {
        Self {
            mock_server: MockServer::start().await,
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn session_file(&self) -> std::path::PathBuf {
        self.dir.path().join("sphere-admin/session.json")
    }

    /// Builds a fresh set of services over the same session file.
    fn invocation(&self) -> Invocation {
        let config = BusinessConfig::new(self.mock_server.uri());
        let session = SessionStore::new(FileStorage::new(self.session_file()));
        let page_size = config.page_size;
        Invocation {
            services: Services::new(ApiClient::new(config, session.clone())),
            gate: AuthGate::new(session.clone()),
            session,
            page_size,
        }
    }

    async fn mount_login(&self) {
        Mock::given(method("POST"))
            .and(path("/Auth/Login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "token": "cli-token",
                    "user": { "id": 7, "firstName": "Cli", "lastName": "User", "email": "cli@example.com" }
                }
            })))
            .mount(&self.mock_server)
            .await;
    }
}

async fn login(invocation: &Invocation) {
    let mut login = LoginController::new(invocation.services.auth.clone());
    login.input.email = "cli@example.com".to_owned();
    login.input.password = "pw".to_owned();
    login.submit();
    login.settle().await;
    assert!(login.status().session().is_some(), "login should succeed");
}

fn file_exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[tokio::test]
async fn login_persists_across_invocations() {
    let ctx = CliTestContext::new().await;
    ctx.mount_login().await;

    login(&ctx.invocation()).await;
    assert!(file_exists(&ctx.session_file()));

    let next = ctx.invocation();
    let session = next.session.session().expect("session should be restored");
    assert_eq!(session.token, "cli-token");
    assert_eq!(session.user.full_name(), "Cli User");
    assert!(next.gate.navigate("/dashboard/users").is_allowed());
}

#[tokio::test]
async fn logout_is_seen_by_the_next_invocation() {
    let ctx = CliTestContext::new().await;
    ctx.mount_login().await;
    login(&ctx.invocation()).await;

    ctx.invocation()
        .services
        .auth
        .logout()
        .expect("logout should succeed");

    let next = ctx.invocation();
    assert!(!next.session.is_active());
    assert_eq!(
        next.gate.navigate("/dashboard"),
        GateDecision::Redirected {
            to: Route::Login,
            replace: true
        }
    );
}

#[tokio::test]
async fn users_list_uses_the_stored_token() {
    let ctx = CliTestContext::new().await;
    ctx.mount_login().await;
    Mock::given(method("POST"))
        .and(path("/User/GetSystemUsers"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "userId": 1, "firstName": "A", "email": "a@example.com" },
                { "userId": 2, "firstName": "B", "email": "b@example.com" }
            ]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    login(&ctx.invocation()).await;

    let next = ctx.invocation();
    let mut users = UserListController::new(
        next.services.users.clone(),
        next.services.static_data.clone(),
        next.page_size,
    );
    users.load(1);
    users.settle().await;

    let list = &users.state().list;
    assert!(list.last_error.is_none());
    assert_eq!(list.items.len(), 2);
    assert!(!users.next_page_enabled());
}

#[tokio::test]
async fn expired_token_is_an_ordinary_error() {
    let ctx = CliTestContext::new().await;
    ctx.mount_login().await;
    Mock::given(method("GET"))
        .and(path("/User/GetSystemStats"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Token expired"})),
        )
        .mount(&ctx.mock_server)
        .await;

    login(&ctx.invocation()).await;
    let next = ctx.invocation();
    let err = next
        .services
        .stats
        .get_system_stats()
        .await
        .expect_err("should fail");

    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Token expired");
    assert!(next.session.is_active(), "401 must not clear the session");
}
