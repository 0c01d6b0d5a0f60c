//! Verdict for the M2 shuttle.
//!
//! The shuttle operator publishes no structured feed, so the advisory page is
//! summarized by the language model, which is told to answer with
//! [`SHUTTLE_NORMAL_SENTINEL`] when nothing concerns the M2. Anything else
//! counts as a disruption. This only holds as long as the model sticks to the
//! prompt; a reworded "all clear" will be reported as an advisory.

use std::fmt::Display;

use crate::models::{RouteKey, RouteStatus};
use crate::summarizer::{Summary, SHUTTLE_NORMAL_SENTINEL};

pub fn resolve_shuttle(summary: &Summary) -> RouteStatus {
    match summary {
        Summary::Reply(text) if text.contains(SHUTTLE_NORMAL_SENTINEL) => RouteStatus {
            route: RouteKey::ShuttleM2,
            is_disrupted: false,
            display_text: text.clone(),
        },
        _ => RouteStatus::disrupted(RouteKey::ShuttleM2, summary.display_text()),
    }
}

/// Status when the advisory page itself could not be fetched
pub fn shuttle_fetch_failed(error: impl Display) -> RouteStatus {
    RouteStatus::disrupted(
        RouteKey::ShuttleM2,
        format!("⚠️ Error checking M2: {}", error),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sentinel_is_normal() {
        let status = resolve_shuttle(&Summary::Reply(SHUTTLE_NORMAL_SENTINEL.to_string()));
        assert!(!status.is_disrupted);
        assert_eq!(status.display_text, "No M2 shuttle advisories found.");
    }

    #[test]
    fn test_sentinel_inside_reply_is_normal() {
        let reply = format!("Checked the page. {}", SHUTTLE_NORMAL_SENTINEL);
        let status = resolve_shuttle(&Summary::Reply(reply));
        assert!(!status.is_disrupted);
    }

    #[test]
    fn test_advisory_reply_is_disrupted() {
        let reply = "The M2 will run a Saturday schedule on Monday for the holiday.";
        let status = resolve_shuttle(&Summary::Reply(reply.to_string()));
        assert!(status.is_disrupted);
        assert_eq!(status.display_text, reply);
        assert_eq!(status.route, RouteKey::ShuttleM2);
    }

    #[test]
    fn test_reworded_all_clear_is_disrupted() {
        let status = resolve_shuttle(&Summary::Reply("No M2 advisories.".to_string()));
        assert!(status.is_disrupted);
    }

    #[test]
    fn test_failed_summary_is_disrupted() {
        let status = resolve_shuttle(&Summary::Failed("GROQ_API_KEY not found".to_string()));
        assert!(status.is_disrupted);
        assert_eq!(status.display_text, "⚠️ Error asking AI: GROQ_API_KEY not found");
    }

    #[test]
    fn test_fetch_failure_is_disrupted() {
        let status = shuttle_fetch_failed("HTTP error: 403 Forbidden");
        assert!(status.is_disrupted);
        assert_eq!(status.display_text, "⚠️ Error checking M2: HTTP error: 403 Forbidden");
    }
}
