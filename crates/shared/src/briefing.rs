use chrono::NaiveDate;

use crate::models::{Briefing, RouteKey, RouteStatus, TransitStatus};

const RULE: &str = "-------------------------------------------";

pub struct BriefingGenerator;

impl BriefingGenerator {
    /// Format as "Saturday, October 17"
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%A, %B %d").to_string()
    }

    /// Subject naming only the most important disruption.
    ///
    /// Priority is Red Line, then Bus 1, then the shuttle. A second
    /// disrupted route is never mentioned; the body carries the details.
    pub fn subject(transit: &TransitStatus, shuttle: &RouteStatus, date: NaiveDate) -> String {
        let date = Self::format_date(date);

        let disrupted = [&transit.red_line, &transit.bus, shuttle]
            .into_iter()
            .find(|status| status.is_disrupted);

        match disrupted {
            Some(status) => match status.route {
                RouteKey::ShuttleM2 => {
                    format!("🚨 {} Advisory ({})", status.route.label(), date)
                }
                _ => format!("🚨 {} Disruption ({})", status.route.label(), date),
            },
            None => format!("✅ Commute Clear: All Normal ({})", date),
        }
    }

    pub fn body(
        transit: &TransitStatus,
        shuttle: &RouteStatus,
        flights: Option<&str>,
        date: NaiveDate,
    ) -> String {
        let mut body = String::new();

        body.push_str(&format!(
            "MORNING COMMUTE BRIEFING - {}\n",
            Self::format_date(date)
        ));

        Self::push_section(&mut body, "🚇 RED LINE", &transit.red_line.display_text);
        Self::push_section(&mut body, "🚌 BUS 1", &transit.bus.display_text);
        Self::push_section(&mut body, "🚐 HARVARD M2 SHUTTLE", &shuttle.display_text);

        if let Some(flights) = flights {
            Self::push_section(&mut body, "✈️ FLIGHTS (Boston/DC)", flights);
        }

        body
    }

    pub fn generate(
        transit: &TransitStatus,
        shuttle: &RouteStatus,
        flights: Option<&str>,
        date: NaiveDate,
    ) -> Briefing {
        Briefing {
            subject: Self::subject(transit, shuttle, date),
            body: Self::body(transit, shuttle, flights, date),
            generated_at: date,
        }
    }

    fn push_section(body: &mut String, title: &str, text: &str) {
        body.push_str(RULE);
        body.push_str("\n\n");
        body.push_str(title);
        body.push('\n');
        body.push_str(text);
        body.push_str("\n\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn transit(red: bool, bus: bool) -> TransitStatus {
        TransitStatus {
            red_line: if red {
                RouteStatus::disrupted(RouteKey::RedLine, "🚨 RED LINE ISSUES:\n• Delays at Harvard")
            } else {
                RouteStatus::normal(RouteKey::RedLine)
            },
            bus: if bus {
                RouteStatus::disrupted(RouteKey::Bus1, "🚨 BUS 1 ISSUES:\n• Detour")
            } else {
                RouteStatus::normal(RouteKey::Bus1)
            },
        }
    }

    fn shuttle(disrupted: bool) -> RouteStatus {
        if disrupted {
            RouteStatus::disrupted(RouteKey::ShuttleM2, "Holiday schedule Monday.")
        } else {
            RouteStatus {
                route: RouteKey::ShuttleM2,
                is_disrupted: false,
                display_text: "No M2 shuttle advisories found.".to_string(),
            }
        }
    }

    // ==================== Date Formatting Tests ====================

    #[test]
    fn test_format_date() {
        assert_eq!(BriefingGenerator::format_date(date()), "Saturday, October 17");
    }

    #[test]
    fn test_format_date_pads_day() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(BriefingGenerator::format_date(date), "Tuesday, February 03");
    }

    // ==================== Subject Priority Tests ====================

    #[test]
    fn test_subject_all_clear() {
        let subject = BriefingGenerator::subject(&transit(false, false), &shuttle(false), date());
        assert_eq!(subject, "✅ Commute Clear: All Normal (Saturday, October 17)");
    }

    #[test]
    fn test_subject_red_line_beats_everything() {
        let subject = BriefingGenerator::subject(&transit(true, true), &shuttle(true), date());
        assert_eq!(subject, "🚨 Red Line Disruption (Saturday, October 17)");
        assert!(!subject.contains("Bus 1"));
        assert!(!subject.contains("Shuttle"));
    }

    #[test]
    fn test_subject_bus_beats_shuttle() {
        let subject = BriefingGenerator::subject(&transit(false, true), &shuttle(true), date());
        assert_eq!(subject, "🚨 Bus 1 Disruption (Saturday, October 17)");
    }

    #[test]
    fn test_subject_shuttle_only() {
        let subject = BriefingGenerator::subject(&transit(false, false), &shuttle(true), date());
        assert_eq!(subject, "🚨 M2 Shuttle Advisory (Saturday, October 17)");
    }

    // ==================== Body Tests ====================

    #[test]
    fn test_body_sections_in_fixed_order() {
        let body = BriefingGenerator::body(&transit(true, true), &shuttle(true), None, date());

        let red = body.find("🚇 RED LINE").unwrap();
        let bus = body.find("🚌 BUS 1").unwrap();
        let m2 = body.find("🚐 HARVARD M2 SHUTTLE").unwrap();
        assert!(red < bus && bus < m2);

        assert!(body.starts_with("MORNING COMMUTE BRIEFING - Saturday, October 17\n"));
        assert!(body.contains("🚨 RED LINE ISSUES:\n• Delays at Harvard"));
        assert!(body.contains("🚨 BUS 1 ISSUES:\n• Detour"));
        assert!(body.contains("Holiday schedule Monday."));
        assert!(!body.contains("FLIGHTS"));
    }

    #[test]
    fn test_body_appends_flights_last() {
        let body = BriefingGenerator::body(
            &transit(false, false),
            &shuttle(false),
            Some("No major flight issues."),
            date(),
        );

        let m2 = body.find("🚐 HARVARD M2 SHUTTLE").unwrap();
        let flights = body.find("✈️ FLIGHTS (Boston/DC)").unwrap();
        assert!(m2 < flights);
        assert!(body.contains("No major flight issues."));
    }

    #[test]
    fn test_flights_never_change_subject() {
        let briefing = BriefingGenerator::generate(
            &transit(false, false),
            &shuttle(false),
            Some("Ground stop at BOS"),
            date(),
        );
        assert!(briefing.subject.starts_with("✅ Commute Clear"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let transit = transit(true, false);
        let shuttle = shuttle(true);

        let first = BriefingGenerator::generate(&transit, &shuttle, Some("flights"), date());
        let second = BriefingGenerator::generate(&transit, &shuttle, Some("flights"), date());

        assert_eq!(first, second);
        assert_eq!(first.subject.as_bytes(), second.subject.as_bytes());
        assert_eq!(first.body.as_bytes(), second.body.as_bytes());
        assert_eq!(first.generated_at, date());
    }
}
