//! Integration tests for coaching refreshes driven by tracker analytics.

use std::sync::Arc;
use std::time::Duration;

use triumph_core::coach::{ClassifierRequest, RuleClassifier};
use triumph_core::{
    AnalyticsSnapshot, ClassifierError, Coach, CoachMessage, ManualClock, MemoryStore, Sentiment,
    SentimentClassifier, Tracker, Trend,
};

/// Replies after a delay that depends on the request, echoing the failure count.
struct Delayed;

impl SentimentClassifier for Delayed {
    async fn classify(&self, request: &ClassifierRequest) -> Result<CoachMessage, ClassifierError> {
        let delay = if request.failure_count == 0 { 5 } else { 1 };
        tokio::time::sleep(Duration::from_secs(delay)).await;
        Ok(CoachMessage {
            message: format!("failures: {}", request.failure_count),
            sentiment: Sentiment::Motivational,
        })
    }
}

fn snapshot(failure_count: usize) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        elapsed_time: 10.0,
        success_rate: 0.5,
        trend: Trend::Stable,
        failure_count,
    }
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_does_not_overwrite_newer() {
    let coach = Coach::new(Delayed).with_timeout(Duration::from_secs(30));

    // The first request is slower than the second and finishes last.
    let (snap0, snap1) = (snapshot(0), snapshot(1));
    let (older, newer) = tokio::join!(coach.refresh(&snap0), coach.refresh(&snap1));

    assert!(older.tag < newer.tag);
    assert!(!older.published);
    assert!(newer.published);
    let shown = coach.board().current().unwrap();
    assert_eq!(shown.tag, newer.tag);
    assert_eq!(shown.message.message, "failures: 1");
}

#[tokio::test]
async fn test_refresh_after_each_mutation() {
    let clock = Arc::new(ManualClock::new(0));
    let mut tracker = Tracker::with_clock(MemoryStore::new(), clock.clone());
    let coach = Coach::new(RuleClassifier::default());

    tracker.start().unwrap();
    clock.advance(60_000);
    let first = coach.refresh_after(&tracker).await;
    assert!(first.published);
    assert_eq!(first.analytics, tracker.analytics());
    assert_eq!(first.analytics.failure_count, 0);

    for _ in 0..3 {
        tracker.stop("slip", "Other").unwrap();
        tracker.start().unwrap();
        clock.advance(1_000);
    }
    let second = coach.refresh_after(&tracker).await;
    assert_eq!(second.analytics.failure_count, 3);

    assert!(second.tag > first.tag);
    assert_eq!(second.message.sentiment, Sentiment::Cautionary);
    assert_eq!(coach.board().current().unwrap().message, second.message);
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    let coach = Coach::new(triumph_core::coach::HttpClassifier::new("http://127.0.0.1:9/classify"))
        .with_timeout(Duration::from_secs(2));
    let refresh = coach.refresh(&snapshot(2)).await;
    assert!(refresh.published);
    assert_eq!(refresh.message, CoachMessage::fallback());
}
