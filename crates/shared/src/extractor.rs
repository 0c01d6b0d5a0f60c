use anyhow::{Context, Result};
use reqwest::Client;

/// Characters of page text handed on to the summarizer
pub const MAX_PAGE_CHARS: usize = 5000;

pub struct ContentExtractor {
    client: Client,
}

impl ContentExtractor {
    pub fn new() -> Result<Self> {
        // Some advisory pages refuse requests without a browser user agent
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; CommuteBriefing/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a page and return its visible text, truncated to [`MAX_PAGE_CHARS`]
    pub async fn fetch_page_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        let html = response.text().await.context("Failed to read response body")?;

        Ok(Self::page_text(&html))
    }

    pub fn page_text(html: &str) -> String {
        let text = html2text::from_read(html.as_bytes(), 100);
        truncate_chars(&text, MAX_PAGE_CHARS)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
