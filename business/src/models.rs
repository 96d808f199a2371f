//! Wire types for the ReactoSphere REST backend.
//!
//! The backend speaks camelCase JSON and wraps every successful payload in a
//! `{ "data": ... }` envelope.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::http::FormPart;

/// Identity provider id for email + password accounts.
pub const PASSWORD_AUTH_PROVIDER_ID: u32 = 1;

/// `{ "data": T }` success envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A user as returned by the list, details and login endpoints.
///
/// The list endpoint names the key `userId`; everything else uses `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "userId")]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// URL of the uploaded picture, if any.
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStats {
    pub total_users: u64,
    pub active_users: u64,
    pub new_users_this_week: u64,
    pub new_users_this_month: u64,
    pub total_connections: u64,
    pub total_groups: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: i64,
    pub role_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    pub page: u32,
    pub page_size: u32,
}

/// A file attached to the create-user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fields of the "add user" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub gender: String,
    pub phone_number: String,
    pub role_id: Option<i64>,
    pub profile_picture: Option<ProfilePicture>,
}

impl NewUserForm {
    /// Checks the fields the backend refuses to go without.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("firstName", "first name", &self.first_name),
            ("lastName", "last name", &self.last_name),
            ("email", "email", &self.email),
            ("password", "password", &self.password),
        ];

        let missing: Vec<_> = required
            .iter()
            .filter(|(_, _, value)| value.trim().is_empty())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let labels: Vec<&str> = missing.iter().map(|(_, label, _)| *label).collect();
        Err(ValidationError::new(
            missing.iter().map(|(field, _, _)| *field).collect(),
            format!("Please fill in: {}", labels.join(", ")),
        ))
    }

    /// Multipart fields in the order the backend documents them.
    pub fn to_form_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("firstName", self.first_name.trim()),
            FormPart::text("lastName", self.last_name.trim()),
            FormPart::text("email", self.email.trim()),
            FormPart::text("password", self.password.as_str()),
            FormPart::text("authProviderId", PASSWORD_AUTH_PROVIDER_ID.to_string()),
            FormPart::text("bio", self.bio.as_str()),
            FormPart::text("gender", self.gender.as_str()),
            FormPart::text("phoneNumber", self.phone_number.as_str()),
            FormPart::text(
                "roleId",
                self.role_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ];

        if let Some(picture) = &self.profile_picture {
            parts.push(FormPart::File {
                name: "profilePicture".to_owned(),
                file_name: picture.file_name.clone(),
                mime: picture.mime.clone(),
                bytes: picture.bytes.clone(),
            });
        }

        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> NewUserForm {
        NewUserForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "secret".to_owned(),
            ..NewUserForm::default()
        }
    }

    #[test]
    fn user_profile_accepts_user_id_alias() {
        let user: UserProfile =
            serde_json::from_str(r#"{"userId":7,"firstName":"A","email":"a@b.c"}"#)
                .expect("should deserialize");

        assert_eq!(user.id, 7);
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "");
        assert_eq!(user.profile_picture, None);
    }

    #[test]
    fn user_profile_round_trips_through_storage_shape() {
        let user = UserProfile {
            id: 1,
            first_name: "A".to_owned(),
            ..UserProfile::default()
        };
        let json = serde_json::to_string(&user).expect("serialize");
        let back: UserProfile = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back, user);
        assert!(json.contains("\"firstName\""));
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let user = UserProfile {
            first_name: "Ada".to_owned(),
            ..UserProfile::default()
        };
        assert_eq!(user.full_name(), "Ada");
    }

    #[test]
    fn stats_default_missing_counters() {
        let stats: SystemStats =
            serde_json::from_str(r#"{"totalUsers":12,"activeUsers":3}"#).expect("deserialize");

        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.active_users, 3);
        assert_eq!(stats.total_groups, 0);
    }

    #[test]
    fn list_request_is_camel_case() {
        let body = serde_json::to_value(ListUsersRequest {
            page: 2,
            page_size: 10,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"page": 2, "pageSize": 10}));
    }

    #[test]
    fn validate_accepts_filled_form() {
        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn validate_lists_missing_fields_in_form_order() {
        let form = NewUserForm {
            first_name: "  ".to_owned(),
            password: String::new(),
            ..filled_form()
        };

        let err = form.validate().expect_err("should fail");
        assert_eq!(err.fields, vec!["firstName", "password"]);
        assert_eq!(err.message, "Please fill in: first name, password");
    }

    #[test]
    fn form_parts_always_send_password_provider() {
        let parts = filled_form().to_form_parts();

        assert!(parts.contains(&FormPart::text("authProviderId", "1")));
        assert!(parts.contains(&FormPart::text("roleId", "")));
        assert!(!parts.iter().any(|p| p.name() == "profilePicture"));
    }

    #[test]
    fn form_parts_include_picture_when_attached() {
        let form = NewUserForm {
            role_id: Some(2),
            profile_picture: Some(ProfilePicture {
                file_name: "ada.png".to_owned(),
                mime: Some("image/png".to_owned()),
                bytes: vec![0x89, 0x50],
            }),
            ..filled_form()
        };
        let parts = form.to_form_parts();

        assert!(parts.contains(&FormPart::text("roleId", "2")));
        assert_eq!(parts.last().map(FormPart::name), Some("profilePicture"));
    }
}
