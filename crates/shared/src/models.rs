use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display text for a route with no surviving alerts
pub const SERVICE_NORMAL: &str = "✅ Service Normal";

/// Effect reported by the transit agency for an alert
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Effect {
    Delay,
    Suspension,
    Detour,
    SnowRoute,
    Shuttle,
    Other(String),
}

impl Effect {
    /// The disruption categories worth reporting. Anything else (elevator
    /// closures, station notices, ...) is noise for a commute check.
    pub fn relevant() -> Vec<Effect> {
        vec![
            Effect::Delay,
            Effect::Suspension,
            Effect::Detour,
            Effect::SnowRoute,
            Effect::Shuttle,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Effect::Delay => "DELAY",
            Effect::Suspension => "SUSPENSION",
            Effect::Detour => "DETOUR",
            Effect::SnowRoute => "SNOW_ROUTE",
            Effect::Shuttle => "SHUTTLE",
            Effect::Other(raw) => raw,
        }
    }
}

impl From<String> for Effect {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DELAY" => Effect::Delay,
            "SUSPENSION" => Effect::Suspension,
            "DETOUR" => Effect::Detour,
            "SNOW_ROUTE" => Effect::SnowRoute,
            "SHUTTLE" => Effect::Shuttle,
            _ => Effect::Other(raw),
        }
    }
}

impl From<&str> for Effect {
    fn from(raw: &str) -> Self {
        Effect::from(raw.to_string())
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        effect.as_str().to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One disruption notice from the transit alerts API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub effect: Effect,
    pub header: String,
    pub description: String,
    pub route_id: Option<String>,
}

impl AlertRecord {
    pub fn new(
        effect: impl Into<Effect>,
        header: impl Into<String>,
        description: impl Into<String>,
        route_id: Option<&str>,
    ) -> Self {
        Self {
            effect: effect.into(),
            header: header.into(),
            description: description.into(),
            route_id: route_id.map(str::to_string),
        }
    }

    /// Header and description joined, the text keyword rules run against
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.header, self.description)
    }
}

/// The legs of the commute that get their own section in the briefing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKey {
    RedLine,
    Bus1,
    ShuttleM2,
}

impl RouteKey {
    pub fn label(&self) -> &'static str {
        match self {
            RouteKey::RedLine => "Red Line",
            RouteKey::Bus1 => "Bus 1",
            RouteKey::ShuttleM2 => "M2 Shuttle",
        }
    }
}

/// Verdict for a single route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStatus {
    pub route: RouteKey,
    pub is_disrupted: bool,
    pub display_text: String,
}

impl RouteStatus {
    pub fn normal(route: RouteKey) -> Self {
        Self {
            route,
            is_disrupted: false,
            display_text: SERVICE_NORMAL.to_string(),
        }
    }

    pub fn disrupted(route: RouteKey, display_text: impl Into<String>) -> Self {
        Self {
            route,
            is_disrupted: true,
            display_text: display_text.into(),
        }
    }
}

/// Red Line and Bus 1 verdicts, both derived from the same alert fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitStatus {
    pub red_line: RouteStatus,
    pub bus: RouteStatus,
}

/// The finished report for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Briefing {
    pub subject: String,
    pub body: String,
    pub generated_at: NaiveDate,
}
