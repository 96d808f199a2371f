use log::error;

use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::Role;

pub const STATIC_DATA_FALLBACK: &str = "Operation failed";

#[derive(Debug, Clone)]
pub struct StaticDataService {
    client: ApiClient,
}

impl StaticDataService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.client
            .get("/StaticData/GetRoles", STATIC_DATA_FALLBACK)
            .await
            .inspect_err(|e| error!("fetching roles failed: {} (status {})", e.message, e.status))
    }
}
