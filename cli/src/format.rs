//! Plain-text rendering of business state for the terminal.

use chrono::{DateTime, NaiveDateTime, Utc};
use sphere_business::{
    DashboardTab, GateDecision, Route, StatCard, StatValue, UserListPage, UserProfile, ViewError,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}

/// Formats backend timestamps, which come with or without an offset.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_owned();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_owned()
}

pub fn users_table(users: &[UserProfile]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|user| UserRow {
            id: user.id,
            name: truncate_str(&user.full_name(), 28),
            email: truncate_str(&user.email, 32),
            created: format_timestamp(user.created_at.as_deref()),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn stat_value(value: StatValue) -> String {
    match value {
        StatValue::Loading => "…".to_owned(),
        StatValue::Count(n) => n.to_string(),
        StatValue::Unavailable => "unavailable".to_owned(),
    }
}

pub fn stats_table(cards: &[StatCard]) -> String {
    let rows: Vec<StatRow> = cards
        .iter()
        .map(|card| StatRow {
            label: card.label,
            value: stat_value(card.value),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

/// "Page 2 · 10 rows · ◀ prev · next ▶", with unavailable directions left out.
pub fn pager_line(list: &UserListPage) -> String {
    let mut parts = vec![
        format!("Page {}", list.page),
        format!("{} row(s)", list.items.len()),
    ];
    if list.prev_page_enabled() {
        parts.push("◀ prev".to_owned());
    }
    if list.next_page_enabled() {
        parts.push("next ▶".to_owned());
    }
    parts.join(" · ")
}

pub fn route_label(route: Route) -> String {
    match route {
        Route::Login => "Login".to_owned(),
        Route::Dashboard(DashboardTab::Overview) => "Dashboard".to_owned(),
        Route::Dashboard(tab) => format!("Dashboard › {}", tab.title()),
    }
}

pub fn gate_decision(decision: GateDecision) -> String {
    match decision {
        GateDecision::Allowed(route) if route.is_placeholder() => {
            format!("{} ({}, coming soon)", route_label(route), route.path())
        }
        GateDecision::Allowed(route) => format!("{} ({})", route_label(route), route.path()),
        GateDecision::Redirected { to, replace } => format!(
            "redirect to {}{}",
            to.path(),
            if replace { " (replacing history)" } else { "" }
        ),
    }
}

/// Error text with the HTTP status when there was one.
pub fn view_error(err: &ViewError) -> String {
    match err.status() {
        Some(status) if status > 0 => format!("{} (HTTP {status})", err.message()),
        _ => err.message().to_owned(),
    }
}
