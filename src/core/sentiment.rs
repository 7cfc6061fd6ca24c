use chrono::{DateTime, Duration, Utc};

use crate::core::text::classify_sentiment;
use crate::models::{
    FeedbackEntry, GuestRecord, Sentiment, SentimentCounts, SentimentReport, SentimentWindows,
};

/// Default cap on `recent_feedback`
pub const DEFAULT_RECENT_FEEDBACK: usize = 8;

/// Width of each trailing comparison window
const WINDOW_MINUTES: i64 = 30;

/// Mentions needed before a recurring complaint raises an alert
const REPEAT_THRESHOLD: usize = 2;

/// Classify guest feedback and compare the last two half-hour windows
pub fn analyze_sentiment(guests: &[GuestRecord], now: DateTime<Utc>) -> SentimentReport {
    analyze_sentiment_with_limit(guests, now, DEFAULT_RECENT_FEEDBACK)
}

/// [`analyze_sentiment`] with a custom `recent_feedback` cap
///
/// Guests without feedback are skipped. Each entry is timed by `updated_at`,
/// then `created_at`, then `now`.
pub fn analyze_sentiment_with_limit(
    guests: &[GuestRecord],
    now: DateTime<Utc>,
    recent_limit: usize,
) -> SentimentReport {
    let window = Duration::minutes(WINDOW_MINUTES);

    let mut counts = SentimentCounts::default();
    let mut windows = SentimentWindows::default();
    let mut confusing = 0;
    let mut tired = 0;
    let mut entries = Vec::new();

    for guest in guests {
        let Some(text) = guest.feedback_text() else {
            continue;
        };

        let sentiment = classify_sentiment(text);
        counts.record(sentiment);

        let at = guest.activity_time(now);
        let age = now - at;
        if age <= window {
            windows.last_30_minutes.record(sentiment);
        } else if age <= window * 2 {
            windows.previous_30_minutes.record(sentiment);
        }

        let lowered = text.to_lowercase();
        if lowered.contains("confusing") {
            confusing += 1;
        }
        if lowered.contains("tired") {
            tired += 1;
        }

        entries.push(FeedbackEntry {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            text: text.to_string(),
            sentiment,
            at,
        });
    }

    let negative_delta =
        windows.last_30_minutes.negative as i64 - windows.previous_30_minutes.negative as i64;
    let positive_delta =
        windows.last_30_minutes.positive as i64 - windows.previous_30_minutes.positive as i64;

    let trend = if counts.total() == 0 {
        "No feedback yet".to_string()
    } else if negative_delta > 0 {
        "Negative feedback rising, check in with guests".to_string()
    } else if positive_delta > 0 {
        "Sentiment improving".to_string()
    } else {
        "Sentiment stable".to_string()
    };

    let mut alerts = Vec::new();
    let mut actions = Vec::new();

    if confusing >= REPEAT_THRESHOLD {
        alerts.push(format!("{} guests found the activity confusing", confusing));
        actions.push("Clarify instructions for the current activity".to_string());
    }
    if tired >= REPEAT_THRESHOLD {
        alerts.push(format!("{} guests report feeling tired", tired));
        actions.push("Offer a rest break".to_string());
    }
    if negative_delta > 0 {
        alerts.push(format!(
            "Negative feedback up by {} in the last 30 minutes",
            negative_delta
        ));
        actions.push("Have a host check in with unhappy guests".to_string());
    }
    // Holds vacuously with no feedback at all
    if counts.positive >= counts.negative + counts.neutral {
        actions.push("Share positive highlights with the group".to_string());
    }

    entries.sort_by(|a, b| b.at.cmp(&a.at));
    entries.truncate(recent_limit);

    tracing::debug!(
        "Sentiment over {} feedback entries: {:?}, trend: {}",
        counts.total(),
        counts,
        trend
    );

    SentimentReport {
        counts,
        dominant: counts.dominant(),
        windows,
        trend,
        alerts,
        actions,
        recent_feedback: entries,
    }
}

/// Sentiment of one guest's feedback, if any
pub fn guest_sentiment(guest: &GuestRecord) -> Option<Sentiment> {
    guest.feedback_text().map(classify_sentiment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn create_guest(id: &str, feedback: &str, minutes_ago: i64) -> GuestRecord {
        GuestRecord {
            feedback: Some(feedback.to_string()),
            updated_at: Some(now() - Duration::minutes(minutes_ago)),
            ..GuestRecord::new(id, format!("Guest {}", id))
        }
    }

    #[test]
    fn test_counts_and_dominant_tie() {
        let guests = vec![
            create_guest("a", "This was amazing and wonderful", 5),
            create_guest("b", "Terrible and boring", 5),
        ];

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.counts, SentimentCounts { positive: 1, neutral: 0, negative: 1 });
        assert_eq!(report.dominant, Sentiment::Positive);
    }

    #[test]
    fn test_no_feedback() {
        let guests = vec![GuestRecord::new("a", "Ana"), create_guest("b", "   ", 1)];

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.counts.total(), 0);
        assert_eq!(report.dominant, Sentiment::Neutral);
        assert_eq!(report.trend, "No feedback yet");
        assert!(report.alerts.is_empty());
        assert_eq!(
            report.actions,
            vec!["Share positive highlights with the group".to_string()]
        );
    }

    #[test]
    fn test_reinforcement_needs_positive_majority() {
        let balanced = vec![
            create_guest("a", "great fun", 5),
            create_guest("b", "meh", 5),
        ];
        let report = analyze_sentiment(&balanced, now());
        assert!(report.actions.contains(&"Share positive highlights with the group".to_string()));

        let outweighed = vec![
            create_guest("a", "great fun", 5),
            create_guest("b", "meh", 5),
            create_guest("c", "so boring", 5),
        ];
        let report = analyze_sentiment(&outweighed, now());
        assert!(!report.actions.contains(&"Share positive highlights with the group".to_string()));
    }

    #[test]
    fn test_guest_sentiment() {
        assert_eq!(guest_sentiment(&create_guest("a", "loved it", 5)), Some(Sentiment::Positive));
        assert_eq!(guest_sentiment(&create_guest("b", "  ", 5)), None);
        assert_eq!(guest_sentiment(&GuestRecord::new("c", "Cy")), None);
    }

    #[test]
    fn test_negative_rising() {
        let guests = vec![
            create_guest("a", "so boring", 10),
            create_guest("b", "bad food", 20),
            create_guest("c", "awful bus", 45),
            create_guest("d", "great view", 50),
            create_guest("e", "terrible", 120),
        ];

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.windows.last_30_minutes.negative, 2);
        assert_eq!(report.windows.previous_30_minutes.negative, 1);
        assert_eq!(report.windows.previous_30_minutes.positive, 1);
        assert_eq!(report.trend, "Negative feedback rising, check in with guests");
        assert!(report
            .alerts
            .contains(&"Negative feedback up by 1 in the last 30 minutes".to_string()));
    }

    #[test]
    fn test_improving_and_reinforcement() {
        let guests = vec![
            create_guest("a", "great fun", 5),
            create_guest("b", "loved it", 15),
            create_guest("c", "meh", 40),
        ];

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.trend, "Sentiment improving");
        assert_eq!(
            report.actions,
            vec!["Share positive highlights with the group".to_string()]
        );
    }

    #[test]
    fn test_repeated_complaints() {
        let guests = vec![
            create_guest("a", "The map was confusing", 90),
            create_guest("b", "confusing signs, I'm tired", 90),
            create_guest("c", "so tired", 90),
        ];

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.trend, "Sentiment stable");
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(
            report.actions,
            vec![
                "Clarify instructions for the current activity".to_string(),
                "Offer a rest break".to_string(),
            ]
        );
    }

    #[test]
    fn test_recent_feedback_sorted_and_capped() {
        let guests: Vec<GuestRecord> = (0..10)
            .map(|i| create_guest(&format!("g{}", i), "fine", 100 - i * 10))
            .collect();

        let report = analyze_sentiment(&guests, now());

        assert_eq!(report.recent_feedback.len(), DEFAULT_RECENT_FEEDBACK);
        assert_eq!(report.recent_feedback[0].guest_id, "g9");
        assert_eq!(report.recent_feedback[7].guest_id, "g2");
    }

    #[test]
    fn test_missing_timestamp_falls_back_to_now() {
        let mut guest = GuestRecord::new("a", "Ana");
        guest.feedback = Some("boring".to_string());

        let report = analyze_sentiment(&[guest], now());

        assert_eq!(report.windows.last_30_minutes.negative, 1);
        assert_eq!(report.recent_feedback[0].at, now());
    }
}
