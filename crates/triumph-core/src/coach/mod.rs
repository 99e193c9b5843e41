//! Coaching messages.
//!
//! A [`Coach`] sends analytics to a [`SentimentClassifier`] and publishes the
//! reply to its [`MessageBoard`]. Classifier failures and timeouts are
//! replaced by [`CoachMessage::fallback`]; they are logged, never returned.

mod board;
mod classifier;
mod http;
mod rules;
mod types;

pub use board::{Displayed, MessageBoard, RequestTag};
pub use classifier::SentimentClassifier;
pub use http::HttpClassifier;
pub use rules::{RuleClassifier, RuleThresholds};
pub use types::{ClassifierRequest, CoachMessage, Sentiment, FALLBACK_MESSAGE};

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::analytics::AnalyticsSnapshot;
use crate::clock::Clock;
use crate::error::ClassifierError;
use crate::storage::{Config, KeyValueStore};
use crate::tracker::Tracker;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Refresh {
    pub tag: RequestTag,
    /// The analytics that were classified.
    pub analytics: AnalyticsSnapshot,
    pub message: CoachMessage,
    /// `false` when a newer refresh was issued while this one was in flight.
    pub published: bool,
}

pub struct Coach<C> {
    classifier: C,
    board: Arc<MessageBoard>,
    timeout: Duration,
}

impl<C: SentimentClassifier> Coach<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            board: Arc::new(MessageBoard::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn board(&self) -> &Arc<MessageBoard> {
        &self.board
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Ask the classifier, substituting the fallback on any failure.
    pub async fn classify_or_fallback(&self, request: &ClassifierRequest) -> CoachMessage {
        let outcome = match tokio::time::timeout(self.timeout, self.classifier.classify(request)).await {
            Ok(result) => result,
            Err(_) => Err(ClassifierError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        };
        match outcome {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "classifier failed, using fallback message");
                CoachMessage::fallback()
            }
        }
    }

    /// Recompute analytics for `tracker` and refresh the message from them.
    /// Call once after every confirmed tracker mutation.
    pub async fn refresh_after<S: KeyValueStore, K: Clock>(&self, tracker: &Tracker<S, K>) -> Refresh {
        self.refresh(&tracker.analytics()).await
    }

    /// Classify `snapshot` and publish the result unless a newer refresh
    /// has been issued in the meantime.
    pub async fn refresh(&self, snapshot: &AnalyticsSnapshot) -> Refresh {
        let tag = self.board.issue();
        let message = self.classify_or_fallback(&ClassifierRequest::from(snapshot)).await;
        let published = self.board.publish(tag, message.clone());
        Refresh {
            tag,
            analytics: *snapshot,
            message,
            published,
        }
    }
}

/// Classifier chosen from configuration: remote when an endpoint is set,
/// rules otherwise.
pub enum ConfiguredClassifier {
    Http(HttpClassifier),
    Rules(RuleClassifier),
}

impl ConfiguredClassifier {
    pub fn from_config(config: &Config) -> Self {
        match HttpClassifier::from_config(&config.classifier) {
            Some(http) => ConfiguredClassifier::Http(http),
            None => ConfiguredClassifier::Rules(RuleClassifier::new(config.coaching)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfiguredClassifier::Http(_) => "http",
            ConfiguredClassifier::Rules(_) => "rules",
        }
    }
}

impl SentimentClassifier for ConfiguredClassifier {
    async fn classify(&self, request: &ClassifierRequest) -> Result<CoachMessage, ClassifierError> {
        match self {
            ConfiguredClassifier::Http(c) => c.classify(request).await,
            ConfiguredClassifier::Rules(c) => c.classify(request).await,
        }
    }
}

impl Coach<ConfiguredClassifier> {
    pub fn from_config(config: &Config) -> Self {
        Coach::new(ConfiguredClassifier::from_config(config))
            .with_timeout(Duration::from_secs(config.classifier.timeout_secs.max(1)))
    }
}
