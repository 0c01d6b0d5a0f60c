//! One function per briefing section. Each swallows its own failures and
//! returns a status the briefing can print, so a dead upstream never stops
//! the rest of the run.

use crate::classifier::AlertClassifier;
use crate::config::Config;
use crate::extractor::ContentExtractor;
use crate::feeds::FlightNewsFeed;
use crate::models::{RouteStatus, TransitStatus};
use crate::shuttle::{resolve_shuttle, shuttle_fetch_failed};
use crate::summarizer::{GroqSummarizer, Summary, SummaryContext};
use crate::transit::TransitClient;

/// Everything the briefing needs, one entry per section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub transit: TransitStatus,
    pub shuttle: RouteStatus,
    pub flights: Option<String>,
}

/// Run every check in order: flights, MBTA, M2 shuttle.
///
/// Clients are built here, and a client that cannot be built becomes that
/// section's error status like any other upstream failure.
pub async fn gather(config: &Config, skip_flights: bool) -> Sections {
    let endpoints = &config.endpoints;
    let summarizer =
        GroqSummarizer::new(endpoints.groq_api_url.clone(), config.groq_api_key.clone());

    let flights = if skip_flights {
        None
    } else {
        let text = match (FlightNewsFeed::new(endpoints.flight_rss_url.clone()), &summarizer) {
            (Ok(feed), Ok(summarizer)) => check_flights(&feed, summarizer).await,
            (Err(e), _) => flights_failed(e),
            (Ok(_), Err(e)) => summarizer_unavailable(e).display_text(),
        };
        Some(text)
    };

    let transit_client =
        TransitClient::new(endpoints.mbta_api_url.clone(), config.mbta_api_key.clone());
    let transit = match transit_client {
        Ok(client) => check_transit(&client, &AlertClassifier::default()).await,
        Err(e) => {
            tracing::warn!(error = %e, "MBTA client unavailable");
            AlertClassifier::classify_failure(format!("{:#}", e))
        }
    };

    let shuttle = match (ContentExtractor::new(), &summarizer) {
        (Ok(extractor), Ok(summarizer)) => {
            check_shuttle(&extractor, summarizer, &endpoints.m2_advisory_url).await
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Page extractor unavailable");
            shuttle_fetch_failed(format!("{:#}", e))
        }
        (Ok(_), Err(e)) => resolve_shuttle(&summarizer_unavailable(e)),
    };

    Sections {
        transit,
        shuttle,
        flights,
    }
}

fn summarizer_unavailable(e: &anyhow::Error) -> Summary {
    tracing::warn!(error = %e, "Summarizer unavailable");
    Summary::Failed(format!("{:#}", e))
}

fn flights_failed(e: anyhow::Error) -> String {
    tracing::warn!(error = %e, "Flight news check failed");
    format!("⚠️ Error checking flights: {:#}", e)
}

pub async fn check_transit(client: &TransitClient, classifier: &AlertClassifier) -> TransitStatus {
    match client.fetch_alerts().await {
        Ok(alerts) => {
            let status = classifier.classify(&alerts);
            tracing::info!(
                alerts = alerts.len(),
                red_line_disrupted = status.red_line.is_disrupted,
                bus_disrupted = status.bus.is_disrupted,
                "Classified MBTA alerts"
            );
            status
        }
        Err(e) => {
            tracing::warn!(error = %e, "MBTA check failed");
            AlertClassifier::classify_failure(format!("{:#}", e))
        }
    }
}

pub async fn check_shuttle(
    extractor: &ContentExtractor,
    summarizer: &GroqSummarizer,
    advisory_url: &str,
) -> RouteStatus {
    let page_text = match extractor.fetch_page_text(advisory_url).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "M2 advisory page fetch failed");
            return shuttle_fetch_failed(format!("{:#}", e));
        }
    };

    let summary = summarizer.summarize(&page_text, SummaryContext::Shuttle).await;
    let status = resolve_shuttle(&summary);
    tracing::info!(disrupted = status.is_disrupted, "Resolved M2 shuttle status");

    status
}

pub async fn check_flights(feed: &FlightNewsFeed, summarizer: &GroqSummarizer) -> String {
    match feed.fetch_headlines().await {
        Ok(headlines) if headlines.is_empty() => "✅ No major flight news found.".to_string(),
        Ok(headlines) => {
            tracing::info!(headlines = headlines.len(), "Fetched flight headlines");
            summarizer
                .summarize(&headlines.join("\n"), SummaryContext::Flights)
                .await
                .display_text()
        }
        Err(e) => flights_failed(e),
    }
}
