//! Overview tab: system statistics and the stat cards derived from them.

use sphere_states::{TaskId, TaskSlot, UpdateQueue};

use crate::error::ApiError;
use crate::models::SystemStats;
use crate::services::StatsService;

/// Status/result of the stats call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatsResult {
    /// No request has been made yet.
    #[default]
    Idle,
    Loading,
    Loaded(SystemStats),
    Error(ApiError),
}

/// What a single card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Loading,
    Count(u64),
    /// The last fetch failed; no number is shown.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: StatValue,
}

struct StatsFetch;

type StatsOutcome = (TaskId, Result<SystemStats, ApiError>);

#[derive(Debug)]
pub struct StatsController {
    service: StatsService,
    result: StatsResult,
    slot: TaskSlot,
    updates: UpdateQueue<StatsOutcome>,
}

impl StatsController {
    pub fn new(service: StatsService) -> Self {
        Self {
            service,
            result: StatsResult::Idle,
            slot: TaskSlot::of::<StatsFetch>(),
            updates: UpdateQueue::new(),
        }
    }

    pub fn result(&self) -> &StatsResult {
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, StatsResult::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.result {
            StatsResult::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<&SystemStats> {
        match &self.result {
            StatsResult::Loaded(stats) => Some(stats),
            _ => None,
        }
    }

    /// Fetches fresh numbers, superseding any fetch still in flight.
    pub fn refresh(&mut self) {
        self.result = StatsResult::Loading;
        let task = self.slot.begin().id();
        let service = self.service.clone();

        self.updates.spawn(async move {
            let result = service.get_system_stats().await;
            (task, result)
        });
    }

    pub fn sync(&mut self) {
        while let Some(outcome) = self.updates.try_next() {
            self.apply(outcome);
        }
    }

    pub async fn settle(&mut self) {
        while let Some(outcome) = self.updates.next().await {
            self.apply(outcome);
        }
    }

    fn apply(&mut self, (task, result): StatsOutcome) {
        if !self.slot.finish(task) {
            return;
        }
        self.result = match result {
            Ok(stats) => StatsResult::Loaded(stats),
            Err(e) => StatsResult::Error(e),
        };
    }

    /// Overview cards, one per counter.
    pub fn stat_cards(&self) -> [StatCard; 6] {
        let value = |pick: fn(&SystemStats) -> u64| match &self.result {
            StatsResult::Idle | StatsResult::Loading => StatValue::Loading,
            StatsResult::Loaded(stats) => StatValue::Count(pick(stats)),
            StatsResult::Error(_) => StatValue::Unavailable,
        };

        [
            StatCard {
                label: "Total Users",
                value: value(|s| s.total_users),
            },
            StatCard {
                label: "Active Users",
                value: value(|s| s.active_users),
            },
            StatCard {
                label: "New This Week",
                value: value(|s| s.new_users_this_week),
            },
            StatCard {
                label: "New This Month",
                value: value(|s| s.new_users_this_month),
            },
            StatCard {
                label: "Connections",
                value: value(|s| s.total_connections),
            },
            StatCard {
                label: "Total Groups",
                value: value(|s| s.total_groups),
            },
        ]
    }
}
