use std::env;

use crate::models::Effect;

pub const DEFAULT_MBTA_API_URL: &str =
    "https://api-v3.mbta.com/alerts?filter[route]=Red,1&filter[activity]=BOARD,RIDE,PARK";
pub const DEFAULT_M2_ADVISORY_URL: &str = "https://www.longwoodcollective.org/advisories";
pub const DEFAULT_FLIGHT_RSS_URL: &str = "https://news.google.com/rss/search?q=(Boston+OR+DC)+AND+(airport+OR+flight+OR+delay+OR+storm+OR+FAA)+when:1d&hl=en-US&gl=US&ceid=US:en";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_SMTP_RELAY: &str = "smtp.gmail.com";

/// External endpoints the run talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub mbta_api_url: String,
    pub m2_advisory_url: String,
    pub flight_rss_url: String,
    pub groq_api_url: String,
    pub smtp_relay: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            mbta_api_url: DEFAULT_MBTA_API_URL.to_string(),
            m2_advisory_url: DEFAULT_M2_ADVISORY_URL.to_string(),
            flight_rss_url: DEFAULT_FLIGHT_RSS_URL.to_string(),
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            smtp_relay: DEFAULT_SMTP_RELAY.to_string(),
        }
    }
}

/// Rules deciding which transit alerts matter for this commute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub relevant_effects: Vec<Effect>,
    /// Stations on the part of the Red Line this commute actually rides
    pub zone_keywords: Vec<String>,
    /// Words marking an alert as affecting the whole line
    pub global_keywords: Vec<String>,
    pub red_line_route_id: String,
    pub bus_route_id: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            relevant_effects: Effect::relevant(),
            zone_keywords: ["Harvard", "Central", "Kendall"]
                .into_iter()
                .map(String::from)
                .collect(),
            global_keywords: vec!["all".to_string(), "global".to_string()],
            red_line_route_id: "Red".to_string(),
            bus_route_id: "1".to_string(),
        }
    }
}

/// Credentials and endpoints read from the environment.
///
/// Nothing here is mandatory at load time. Mail credentials are only
/// required once the run gets to delivery, and a missing Groq key shows up
/// as an inline error in the summaries.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub email_user: Option<String>,
    pub email_password: Option<String>,
    pub email_to: Option<String>,
    pub groq_api_key: Option<String>,
    pub mbta_api_key: Option<String>,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn from_env() -> Self {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            mbta_api_url: var_or("MBTA_API_URL", defaults.mbta_api_url),
            m2_advisory_url: var_or("M2_ADVISORY_URL", defaults.m2_advisory_url),
            flight_rss_url: var_or("FLIGHT_RSS_URL", defaults.flight_rss_url),
            groq_api_url: var_or("GROQ_API_URL", defaults.groq_api_url),
            smtp_relay: var_or("SMTP_RELAY", defaults.smtp_relay),
        };

        Self {
            email_user: non_empty_var("EMAIL_USER"),
            email_password: non_empty_var("EMAIL_PASSWORD"),
            email_to: non_empty_var("EMAIL_TO"),
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            mbta_api_key: non_empty_var("MBTA_API_KEY"),
            endpoints,
        }
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/commute-briefing/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("commute-briefing").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: String) -> String {
    non_empty_var(key).unwrap_or(default)
}
