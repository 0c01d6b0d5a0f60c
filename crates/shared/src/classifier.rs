use std::fmt::Display;

use crate::config::ClassifierConfig;
use crate::models::{AlertRecord, RouteKey, RouteStatus, TransitStatus};

/// Buckets transit alerts into Red Line and Bus 1 verdicts
pub struct AlertClassifier {
    config: ClassifierConfig,
}

impl AlertClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Which route an alert counts against, or `None` if it should be dropped
    pub fn route_for(&self, alert: &AlertRecord) -> Option<RouteKey> {
        if !self.config.relevant_effects.contains(&alert.effect) {
            return None;
        }

        let route_id = alert.route_id.as_deref()?;

        if route_id == self.config.red_line_route_id {
            // Line-wide alerts are long; only keep the ones touching our segment
            let text = alert.searchable_text();
            if self.mentions_zone(&text) || self.mentions_whole_line(&text) {
                return Some(RouteKey::RedLine);
            }
            return None;
        }

        if route_id == self.config.bus_route_id {
            return Some(RouteKey::Bus1);
        }

        None
    }

    pub fn classify(&self, alerts: &[AlertRecord]) -> TransitStatus {
        let mut red_line = Vec::new();
        let mut bus = Vec::new();

        for alert in alerts {
            match self.route_for(alert) {
                Some(RouteKey::RedLine) => red_line.push(alert.header.as_str()),
                Some(RouteKey::Bus1) => bus.push(alert.header.as_str()),
                _ => {}
            }
        }

        TransitStatus {
            red_line: Self::route_status(RouteKey::RedLine, &red_line),
            bus: Self::route_status(RouteKey::Bus1, &bus),
        }
    }

    /// Status for both routes when the alerts could not be fetched.
    ///
    /// Unknown is reported as disrupted so a broken feed never reads as an
    /// all-clear.
    pub fn classify_failure(error: impl Display) -> TransitStatus {
        let text = format!("⚠️ Error checking MBTA: {}", error);
        TransitStatus {
            red_line: RouteStatus::disrupted(RouteKey::RedLine, text.clone()),
            bus: RouteStatus::disrupted(RouteKey::Bus1, text),
        }
    }

    fn route_status(route: RouteKey, headers: &[&str]) -> RouteStatus {
        if headers.is_empty() {
            return RouteStatus::normal(route);
        }

        let mut text = format!("🚨 {} ISSUES:", route.label().to_uppercase());
        for header in headers {
            text.push_str("\n• ");
            text.push_str(header);
        }

        RouteStatus::disrupted(route, text)
    }

    fn mentions_zone(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.config
            .zone_keywords
            .iter()
            .any(|keyword| text.contains(&keyword.to_lowercase()))
    }

    fn mentions_whole_line(&self, text: &str) -> bool {
        // Whole words only, otherwise "all" matches "shall" and "small"
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        self.config
            .global_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .any(|keyword| words.contains(&keyword))
    }
}

impl Default for AlertClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
