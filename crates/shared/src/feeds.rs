use anyhow::{Context, Result};
use reqwest::Client;
use rss::Channel;

/// Headlines passed on to the summarizer per run
pub const MAX_HEADLINES: usize = 15;

/// Airport and flight news headlines from a news search RSS feed
pub struct FlightNewsFeed {
    client: Client,
    feed_url: String,
}

impl FlightNewsFeed {
    pub fn new(feed_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; CommuteBriefing/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    pub async fn fetch_headlines(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .context("Failed to fetch flight news feed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Flight news feed returned error: {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read flight news feed")?;

        parse_headlines(&bytes)
    }
}

pub fn parse_headlines(xml: &[u8]) -> Result<Vec<String>> {
    let channel = Channel::read_from(xml).context("Failed to parse RSS feed")?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| item.title())
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .take(MAX_HEADLINES)
        .collect())
}
