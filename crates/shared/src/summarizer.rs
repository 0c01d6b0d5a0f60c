use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Reply the shuttle prompt asks for when nothing relevant is on the page
pub const SHUTTLE_NORMAL_SENTINEL: &str = "No M2 shuttle advisories found.";

/// Reply the flights prompt asks for when the headlines are irrelevant
pub const FLIGHTS_NORMAL_SENTINEL: &str = "No major flight issues.";

const MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Reply(String),
    Failed(String),
}

impl Summary {
    /// Text as it should appear in the briefing
    pub fn display_text(&self) -> String {
        match self {
            Summary::Reply(text) => text.clone(),
            Summary::Failed(error) => format!("⚠️ Error asking AI: {}", error),
        }
    }
}

/// Which prompt to wrap the raw text in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryContext {
    Flights,
    Shuttle,
}

impl SummaryContext {
    pub fn prompt(&self, text_data: &str) -> String {
        match self {
            SummaryContext::Flights => format!(
                r#"Summarize flight disruptions for Boston (BOS) or DC (DCA/IAD) based on these headlines.
Ignore irrelevant news. If none, reply with exactly: "{}"

Data:
{}"#,
                FLIGHTS_NORMAL_SENTINEL, text_data
            ),
            SummaryContext::Shuttle => format!(
                r#"Check this text for any delays, detours, or cancellations regarding the "M2 Shuttle" or "Harvard Shuttle".
If the text mentions holidays, snow, or schedule changes affecting the M2, note them briefly.
If nothing is relevant to the M2, reply with exactly: "{}"

Data:
{}"#,
                SHUTTLE_NORMAL_SENTINEL, text_data
            ),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

/// Chat-completion client for Groq's OpenAI-compatible endpoint
pub struct GroqSummarizer {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GroqSummarizer {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
        })
    }

    /// Summarize `text_data`. Never fails: any problem comes back as
    /// [`Summary::Failed`] so it can be shown inline in the briefing.
    pub async fn summarize(&self, text_data: &str, context: SummaryContext) -> Summary {
        match self.try_summarize(text_data, context).await {
            Ok(text) => Summary::Reply(text),
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::warn!(?context, %error, "Summarization failed");
                Summary::Failed(error)
            }
        }
    }

    async fn try_summarize(&self, text_data: &str, context: SummaryContext) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("GROQ_API_KEY not found. Set it as an environment variable or in ~/.config/commute-briefing/.env")?;

        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: context.prompt(text_data),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Groq API error: {} - {}", status, error_text);
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .context("Failed to parse Groq API response")?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("Groq API returned an empty reply");
        }

        Ok(text)
    }
}
