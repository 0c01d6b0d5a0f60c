use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{AlertRecord, Effect};

#[derive(Debug, Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AlertResource {
    attributes: AlertAttributes,
}

#[derive(Debug, Deserialize)]
struct AlertAttributes {
    #[serde(default)]
    effect: Option<Effect>,
    #[serde(default)]
    header: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    informed_entity: Option<Vec<InformedEntity>>,
}

#[derive(Debug, Deserialize)]
struct InformedEntity {
    #[serde(default)]
    route_id: Option<String>,
}

impl AlertResource {
    /// `None` when the alert carries no effect to classify on
    fn into_record(self) -> Option<AlertRecord> {
        let attrs = self.attributes;
        let effect = attrs.effect?;
        // The first informed entity decides the route
        let route_id = attrs
            .informed_entity
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|entity| entity.route_id);

        Some(AlertRecord {
            effect,
            header: attrs.header.unwrap_or_default(),
            description: attrs.description.unwrap_or_default(),
            route_id,
        })
    }
}

/// Parse a JSON:API alerts document into records, keeping source order.
///
/// A malformed alert is skipped on its own; only a document that is not
/// JSON:API at all fails.
pub fn parse_alerts(json: &str) -> Result<Vec<AlertRecord>> {
    let response: AlertsResponse =
        serde_json::from_str(json).context("Failed to parse MBTA alerts response")?;

    let mut alerts = Vec::with_capacity(response.data.len());
    for (index, value) in response.data.into_iter().enumerate() {
        match serde_json::from_value::<AlertResource>(value) {
            Ok(resource) => match resource.into_record() {
                Some(alert) => alerts.push(alert),
                None => tracing::warn!(index, "Skipping MBTA alert without an effect"),
            },
            Err(e) => tracing::warn!(index, error = %e, "Skipping malformed MBTA alert"),
        }
    }

    Ok(alerts)
}

pub struct TransitClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl TransitClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
        })
    }

    pub async fn fetch_alerts(&self) -> Result<Vec<AlertRecord>> {
        let mut request = self
            .client
            .get(&self.api_url)
            .header("accept", "application/vnd.api+json");

        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch alerts from MBTA")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("MBTA API returned error: {} - {}", status, error_text);
        }

        let body = response
            .text()
            .await
            .context("Failed to read MBTA response body")?;

        parse_alerts(&body)
    }
}
