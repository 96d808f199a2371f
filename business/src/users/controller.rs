//! Fetch/page/create/details lifecycle of the users table.
//!
//! Every request runs as a spawned task that reports back through the controller's
//! update queue. Page loads carry the page they were issued for plus their [`TaskId`]:
//! a newer load cancels the older one, and any result whose task no longer owns the
//! page slot is dropped on arrival, so a slow page 1 can never overwrite page 2.

use log::{debug, warn};
use sphere_states::{TaskId, TaskSlot, UpdateQueue, run_cancellable};

use crate::error::{ApiError, ViewError};
use crate::models::{NewUserForm, Role, UserProfile};
use crate::services::{StaticDataService, UserService};

use super::state::{DetailView, UsersViewState};

struct PageLoad;
struct DetailLoad;
struct CreateSubmit;

#[derive(Debug)]
enum UsersUpdate {
    Page {
        task: TaskId,
        page: u32,
        /// `None` when the load was cancelled before it finished.
        result: Option<Result<Vec<UserProfile>, ApiError>>,
    },
    Details {
        task: TaskId,
        result: Result<UserProfile, ApiError>,
    },
    Created {
        task: TaskId,
        /// `Ok(None)` when the backend confirmed without echoing the profile.
        result: Result<Option<UserProfile>, ApiError>,
    },
    Roles(Result<Vec<Role>, ApiError>),
}

#[derive(Debug)]
pub struct UserListController {
    users: UserService,
    static_data: StaticDataService,
    state: UsersViewState,
    page_slot: TaskSlot,
    detail_slot: TaskSlot,
    create_slot: TaskSlot,
    updates: UpdateQueue<UsersUpdate>,
}

impl UserListController {
    pub fn new(users: UserService, static_data: StaticDataService, page_size: u32) -> Self {
        Self {
            users,
            static_data,
            state: UsersViewState::new(page_size),
            page_slot: TaskSlot::of::<PageLoad>(),
            detail_slot: TaskSlot::of::<DetailLoad>(),
            create_slot: TaskSlot::of::<CreateSubmit>(),
            updates: UpdateQueue::new(),
        }
    }

    pub fn state(&self) -> &UsersViewState {
        &self.state
    }

    /// Editable fields of the create form.
    pub fn form_mut(&mut self) -> &mut NewUserForm {
        &mut self.state.create.fields
    }

    pub fn next_page_enabled(&self) -> bool {
        self.state.list.next_page_enabled()
    }

    pub fn prev_page_enabled(&self) -> bool {
        self.state.list.prev_page_enabled()
    }

    /// Loads `page` (clamped to 1), replacing whatever load is in flight.
    pub fn load(&mut self, page: u32) {
        let page = page.max(1);
        let list = &mut self.state.list;
        list.page = page;
        list.is_loading = true;

        let handle = self.page_slot.begin();
        let task = handle.id();
        let cancel = handle.cancellation_token();
        let users = self.users.clone();
        let page_size = list.page_size;

        debug!("loading users page {page}");
        self.updates.spawn(async move {
            let result = run_cancellable(cancel, users.list_users(page, page_size)).await;
            UsersUpdate::Page { task, page, result }
        });
    }

    /// Reloads the page currently shown.
    pub fn reload(&mut self) {
        self.load(self.state.list.page);
    }

    /// Always loads the following page; check [`Self::next_page_enabled`] to grey it out.
    pub fn next_page(&mut self) {
        self.load(self.state.list.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        if self.state.list.page > 1 {
            self.load(self.state.list.page - 1);
        }
    }

    pub fn open_create_form(&mut self) {
        self.state.create.open = true;
    }

    pub fn close_create_form(&mut self) {
        self.state.create.open = false;
    }

    /// Submits the form currently held in state.
    pub fn submit_create_form(&mut self) {
        let form = self.state.create.fields.clone();
        self.create(form);
    }

    /// Registers a user. Invalid forms are rejected without a request.
    pub fn create(&mut self, form: NewUserForm) {
        if self.state.create.is_submitting {
            return;
        }
        if let Err(e) = form.validate() {
            self.state.create.fields = form;
            self.state.list.last_error = Some(e.into());
            return;
        }

        self.state.create.is_submitting = true;
        let task = self.create_slot.begin().id();
        let users = self.users.clone();
        let submitted = form.clone();
        self.state.create.fields = form;

        self.updates.spawn(async move {
            let result = users.create_user(&submitted).await;
            UsersUpdate::Created { task, result }
        });
    }

    /// Fetches one user and opens the detail view on success.
    pub fn view_details(&mut self, id: i64) {
        self.state.details = DetailView::Loading(id);
        let handle = self.detail_slot.begin();
        let task = handle.id();
        let cancel = handle.cancellation_token();
        let users = self.users.clone();

        self.updates.spawn(async move {
            let result = match run_cancellable(cancel, users.get_user_details(id)).await {
                Some(result) => result,
                None => Err(ApiError::client_setup("Request cancelled")),
            };
            UsersUpdate::Details { task, result }
        });
    }

    pub fn close_details(&mut self) {
        self.detail_slot.cancel();
        self.state.details = DetailView::Closed;
    }

    pub fn dismiss_error(&mut self) {
        self.state.list.last_error = None;
    }

    /// Fetches role options. Failures are logged and leave the current list as is.
    pub fn load_roles(&mut self) {
        let static_data = self.static_data.clone();
        self.updates
            .spawn(async move { UsersUpdate::Roles(static_data.list_roles().await) });
    }

    /// Applies every finished request without waiting. Call once per frame.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        while let Some(update) = self.updates.try_next() {
            self.apply(update);
            changed = true;
        }
        changed
    }

    /// Waits until nothing is in flight, including follow-up loads started while applying.
    pub async fn settle(&mut self) {
        while let Some(update) = self.updates.next().await {
            self.apply(update);
        }
    }

    fn apply(&mut self, update: UsersUpdate) {
        match update {
            UsersUpdate::Page { task, page, result } => self.apply_page(task, page, result),
            UsersUpdate::Details { task, result } => {
                if !self.detail_slot.finish(task) {
                    return;
                }
                match result {
                    Ok(user) => self.state.details = DetailView::Open(user),
                    Err(e) => {
                        self.state.details = DetailView::Closed;
                        self.state.list.last_error = Some(e.into());
                    }
                }
            }
            UsersUpdate::Created { task, result } => {
                if !self.create_slot.finish(task) {
                    return;
                }
                self.state.create.is_submitting = false;
                match result {
                    Ok(user) => {
                        match user {
                            Some(user) => debug!("user {} created, refreshing page", user.id),
                            None => debug!("user created, refreshing page"),
                        }
                        self.state.create.fields = NewUserForm::default();
                        self.state.create.open = false;
                        self.state.list.last_error = None;
                        self.reload();
                    }
                    Err(e) => self.state.list.last_error = Some(e.into()),
                }
            }
            UsersUpdate::Roles(Ok(roles)) => self.state.roles = roles,
            UsersUpdate::Roles(Err(e)) => warn!("role list unavailable: {}", e.message),
        }
    }

    fn apply_page(
        &mut self,
        task: TaskId,
        page: u32,
        result: Option<Result<Vec<UserProfile>, ApiError>>,
    ) {
        let list = &mut self.state.list;
        if !self.page_slot.is_current(task) || list.page != page {
            debug!("dropping stale result for users page {page}");
            return;
        }
        self.page_slot.finish(task);
        list.is_loading = false;

        match result {
            Some(Ok(items)) => {
                list.items = items;
                list.last_error = None;
            }
            Some(Err(e)) => list.last_error = Some(ViewError::Api(e)),
            None => {}
        }
    }
}
