use log::error;

use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::SystemStats;

pub const STATS_FALLBACK: &str = "Failed to fetch user data";

#[derive(Debug, Clone)]
pub struct StatsService {
    client: ApiClient,
}

impl StatsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_system_stats(&self) -> Result<SystemStats, ApiError> {
        self.client
            .get("/User/GetSystemStats", STATS_FALLBACK)
            .await
            .inspect_err(|e| error!("fetching system stats failed: {} (status {})", e.message, e.status))
    }
}
