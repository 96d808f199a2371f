//! View state of the user-management tab.
//!
//! Plain data only; every mutation goes through `UserListController`.

use crate::error::ViewError;
use crate::models::{NewUserForm, Role, UserProfile};

/// One page of the users table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserListPage {
    pub items: Vec<UserProfile>,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub is_loading: bool,
    pub last_error: Option<ViewError>,
}

impl UserListPage {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            is_loading: false,
            last_error: None,
        }
    }

    /// A short page means there is nothing after it.
    pub fn next_page_enabled(&self) -> bool {
        !self.is_loading && self.items.len() >= self.page_size as usize
    }

    pub fn prev_page_enabled(&self) -> bool {
        !self.is_loading && self.page > 1
    }
}

/// The "add user" modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFormState {
    pub open: bool,
    pub fields: NewUserForm,
    pub is_submitting: bool,
}

/// The read-only "user details" modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailView {
    #[default]
    Closed,
    Loading(i64),
    Open(UserProfile),
}

impl DetailView {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Open(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsersViewState {
    pub list: UserListPage,
    pub create: CreateFormState,
    pub details: DetailView,
    /// Options for the role picker. Empty until roles load.
    pub roles: Vec<Role>,
}

impl UsersViewState {
    pub fn new(page_size: u32) -> Self {
        Self {
            list: UserListPage::new(page_size),
            create: CreateFormState::default(),
            details: DetailView::Closed,
            roles: Vec::new(),
        }
    }

    pub fn role_name(&self, role_id: i64) -> Option<&str> {
        self.roles
            .iter()
            .find(|role| role.role_id == role_id)
            .map(|role| role.role_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<UserProfile> {
        (0..n)
            .map(|i| UserProfile {
                id: i as i64 + 1,
                ..UserProfile::default()
            })
            .collect()
    }

    #[test]
    fn full_page_enables_next() {
        let mut page = UserListPage::new(10);
        page.items = rows(10);
        assert!(page.next_page_enabled());

        page.items = rows(3);
        assert!(!page.next_page_enabled());
    }

    #[test]
    fn loading_disables_both_directions() {
        let mut page = UserListPage::new(10);
        page.items = rows(10);
        page.page = 2;
        page.is_loading = true;

        assert!(!page.next_page_enabled());
        assert!(!page.prev_page_enabled());
    }

    #[test]
    fn first_page_disables_prev() {
        let page = UserListPage::new(10);
        assert!(!page.prev_page_enabled());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(UserListPage::new(0).page_size, 1);
    }

    #[test]
    fn role_name_lookup() {
        let mut state = UsersViewState::new(10);
        state.roles = vec![Role {
            role_id: 2,
            role_name: "Admin".to_owned(),
        }];

        assert_eq!(state.role_name(2), Some("Admin"));
        assert_eq!(state.role_name(3), None);
    }
}
