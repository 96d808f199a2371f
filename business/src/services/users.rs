use log::{error, info, warn};
use serde::Deserialize;

use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::{Envelope, ListUsersRequest, NewUserForm, UserProfile};

pub const USERS_FALLBACK: &str = "Operation failed";

/// Register answers with either `{data: user}` or the bare user.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedUser {
    Wrapped(Envelope<UserProfile>),
    Bare(UserProfile),
}

#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of users, 1-based.
    pub async fn list_users(&self, page: u32, page_size: u32) -> Result<Vec<UserProfile>, ApiError> {
        self.client
            .post_json(
                "/User/GetSystemUsers",
                &ListUsersRequest { page, page_size },
                USERS_FALLBACK,
            )
            .await
            .inspect_err(|e| error!("listing users (page {page}) failed: {} (status {})", e.message, e.status))
    }

    pub async fn get_user_details(&self, id: i64) -> Result<UserProfile, ApiError> {
        self.client
            .get(&format!("/User/GetUserDetails/{id}"), USERS_FALLBACK)
            .await
            .inspect_err(|e| error!("fetching user {id} failed: {} (status {})", e.message, e.status))
    }

    /// Registers a user through the multipart endpoint. Does not validate `form`.
    ///
    /// Any 2xx means the user exists. The created profile is returned when the body
    /// carries one, `None` otherwise.
    pub async fn create_user(&self, form: &NewUserForm) -> Result<Option<UserProfile>, ApiError> {
        let response = self
            .client
            .post_multipart("/Auth/Register", form.to_form_parts(), USERS_FALLBACK)
            .await
            .inspect_err(|e| error!("creating user failed: {} (status {})", e.message, e.status))?;

        match response.json::<CreatedUser>() {
            Ok(CreatedUser::Wrapped(Envelope { data: user })) | Ok(CreatedUser::Bare(user)) => {
                info!("created user {}", user.id);
                Ok(Some(user))
            }
            Err(e) => {
                warn!(
                    "user created (status {}) but the body holds no profile: {e}",
                    response.status
                );
                Ok(None)
            }
        }
    }
}
