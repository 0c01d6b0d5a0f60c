use chrono::NaiveDate;
use shared::checks::{check_shuttle, check_transit};
use shared::summarizer::SHUTTLE_NORMAL_SENTINEL;
use shared::{
    AlertClassifier, BriefingGenerator, ContentExtractor, GroqSummarizer, TransitClient,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn chat_reply(content: &str) -> String {
    serde_json::json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

const ADVISORY_PAGE: &str =
    "<html><body><h1>Shuttle Advisories</h1><p>Nothing scheduled.</p></body></html>";

async fn mock_shuttle(server: &mut mockito::ServerGuard, reply: &str) -> Vec<mockito::Mock> {
    let page = server
        .mock("GET", "/advisories")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(ADVISORY_PAGE)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_reply(reply))
        .create_async()
        .await;
    vec![page, chat]
}

#[tokio::test]
async fn test_quiet_morning_is_all_clear() {
    let mut server = mockito::Server::new_async().await;
    let _alerts = server
        .mock("GET", "/alerts")
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;
    let _shuttle_mocks = mock_shuttle(&mut server, SHUTTLE_NORMAL_SENTINEL).await;

    let transit_client = TransitClient::new(format!("{}/alerts", server.url()), None).unwrap();
    let summarizer =
        GroqSummarizer::new(format!("{}/chat", server.url()), Some("k".to_string())).unwrap();
    let extractor = ContentExtractor::new().unwrap();

    let transit = check_transit(&transit_client, &AlertClassifier::default()).await;
    let shuttle = check_shuttle(
        &extractor,
        &summarizer,
        &format!("{}/advisories", server.url()),
    )
    .await;

    let briefing = BriefingGenerator::generate(&transit, &shuttle, None, date());

    assert_eq!(
        briefing.subject,
        "✅ Commute Clear: All Normal (Saturday, October 17)"
    );
    assert!(briefing.body.contains("✅ Service Normal"));
    assert!(briefing.body.contains(SHUTTLE_NORMAL_SENTINEL));
}

#[tokio::test]
async fn test_kendall_delay_names_red_line() {
    let alerts = r#"{
        "data": [
            {
                "attributes": {
                    "effect": "DELAY",
                    "header": "Red Line trains running 15 minutes behind",
                    "description": "Due to a disabled train at Kendall/MIT.",
                    "informed_entity": [{"route_id": "Red"}]
                }
            },
            {
                "attributes": {
                    "effect": "DETOUR",
                    "header": "Route 1 detoured around Mass Ave",
                    "description": null,
                    "informed_entity": [{"route_id": "1"}]
                }
            }
        ]
    }"#;

    let mut server = mockito::Server::new_async().await;
    let _alerts = server
        .mock("GET", "/alerts")
        .with_status(200)
        .with_body(alerts)
        .create_async()
        .await;
    let _shuttle_mocks = mock_shuttle(&mut server, SHUTTLE_NORMAL_SENTINEL).await;

    let transit_client = TransitClient::new(format!("{}/alerts", server.url()), None).unwrap();
    let summarizer =
        GroqSummarizer::new(format!("{}/chat", server.url()), Some("k".to_string())).unwrap();
    let extractor = ContentExtractor::new().unwrap();

    let transit = check_transit(&transit_client, &AlertClassifier::default()).await;
    let shuttle = check_shuttle(
        &extractor,
        &summarizer,
        &format!("{}/advisories", server.url()),
    )
    .await;

    assert!(transit.red_line.display_text.contains("RED LINE ISSUES"));
    assert!(transit.bus.is_disrupted);

    let briefing = BriefingGenerator::generate(&transit, &shuttle, None, date());
    assert_eq!(
        briefing.subject,
        "🚨 Red Line Disruption (Saturday, October 17)"
    );
    assert!(!briefing.subject.contains("Bus 1"));
    assert!(briefing.body.contains("• Route 1 detoured around Mass Ave"));
}

#[tokio::test]
async fn test_broken_upstreams_never_read_as_normal() {
    let mut server = mockito::Server::new_async().await;
    let _alerts = server
        .mock("GET", "/alerts")
        .with_status(500)
        .create_async()
        .await;
    let _advisories = server
        .mock("GET", "/advisories")
        .with_status(404)
        .create_async()
        .await;

    let transit_client = TransitClient::new(format!("{}/alerts", server.url()), None).unwrap();
    let summarizer = GroqSummarizer::new(format!("{}/chat", server.url()), None).unwrap();
    let extractor = ContentExtractor::new().unwrap();

    let transit = check_transit(&transit_client, &AlertClassifier::default()).await;
    let shuttle = check_shuttle(
        &extractor,
        &summarizer,
        &format!("{}/advisories", server.url()),
    )
    .await;

    assert!(transit.red_line.is_disrupted);
    assert!(transit.red_line.display_text.starts_with("⚠️ Error checking MBTA"));
    assert!(shuttle.is_disrupted);
    assert!(shuttle.display_text.starts_with("⚠️ Error checking M2"));

    let briefing = BriefingGenerator::generate(&transit, &shuttle, None, date());
    assert!(!briefing.subject.contains("Commute Clear"));
}

#[tokio::test]
async fn test_missing_groq_key_flags_shuttle() {
    let mut server = mockito::Server::new_async().await;
    let _advisories = server
        .mock("GET", "/advisories")
        .with_status(200)
        .with_body(ADVISORY_PAGE)
        .create_async()
        .await;

    let summarizer = GroqSummarizer::new(format!("{}/chat", server.url()), None).unwrap();
    let extractor = ContentExtractor::new().unwrap();

    let shuttle = check_shuttle(
        &extractor,
        &summarizer,
        &format!("{}/advisories", server.url()),
    )
    .await;

    assert!(shuttle.is_disrupted);
    assert!(shuttle.display_text.contains("GROQ_API_KEY"));
}
