//! Local rule-based classifier.
//!
//! Short streak with many setbacks is cautionary; a long streak with a high
//! success rate is celebratory; everything else is motivational.

use serde::{Deserialize, Serialize};

use super::classifier::SentimentClassifier;
use super::types::{ClassifierRequest, CoachMessage, Sentiment};
use crate::analytics::{humanize_duration, Trend};
use crate::error::ClassifierError;

const DAY_SECS: u64 = 24 * 60 * 60;

/// Thresholds for [`RuleClassifier`]. Stored under `[coaching]` in the
/// config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// A streak shorter than this is "short".
    #[serde(default = "default_short_streak_secs")]
    pub short_streak_secs: u64,
    /// A streak at least this long is "long".
    #[serde(default = "default_long_streak_secs")]
    pub long_streak_secs: u64,
    #[serde(default = "default_high_failure_count")]
    pub high_failure_count: usize,
    #[serde(default = "default_high_success_rate")]
    pub high_success_rate: f64,
}

fn default_short_streak_secs() -> u64 {
    DAY_SECS
}
fn default_long_streak_secs() -> u64 {
    7 * DAY_SECS
}
fn default_high_failure_count() -> usize {
    3
}
fn default_high_success_rate() -> f64 {
    0.7
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            short_streak_secs: default_short_streak_secs(),
            long_streak_secs: default_long_streak_secs(),
            high_failure_count: default_high_failure_count(),
            high_success_rate: default_high_success_rate(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleClassifier {
    thresholds: RuleThresholds,
}

impl RuleClassifier {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn sentiment(&self, request: &ClassifierRequest) -> Sentiment {
        let t = &self.thresholds;
        let short = request.elapsed_time < t.short_streak_secs as f64;
        let long = request.elapsed_time >= t.long_streak_secs as f64;

        if short && request.failure_count >= t.high_failure_count {
            Sentiment::Cautionary
        } else if long && request.success_rate >= t.high_success_rate {
            Sentiment::Celebratory
        } else {
            Sentiment::Motivational
        }
    }

    pub fn compose(&self, request: &ClassifierRequest) -> CoachMessage {
        let sentiment = self.sentiment(request);
        let streak = humanize_duration((request.elapsed_time * 1000.0) as i64);
        let trend_note = match request.overall_trend {
            Trend::Improving => " Your streaks are getting longer.",
            Trend::Worsening => " Recent streaks have been shorter; be gentle and plan ahead.",
            Trend::Stable => "",
        };
        let message = match sentiment {
            Sentiment::Cautionary => format!(
                "Only {streak} in, with {} setbacks behind you. Stay alert to your triggers today.{trend_note}",
                request.failure_count
            ),
            Sentiment::Celebratory => {
                format!("{streak} strong! That is a real achievement, keep it going.{trend_note}")
            }
            Sentiment::Motivational => {
                format!("{streak} and counting. Every moment adds up.{trend_note}")
            }
        };
        CoachMessage { message, sentiment }
    }
}

impl SentimentClassifier for RuleClassifier {
    async fn classify(&self, request: &ClassifierRequest) -> Result<CoachMessage, ClassifierError> {
        Ok(self.compose(request))
    }
}
