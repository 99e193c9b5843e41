use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsSnapshot, Trend};

/// Message shown when the classifier cannot produce one.
pub const FALLBACK_MESSAGE: &str = "Keep pushing forward. Every moment of abstinence is a victory.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Motivational,
    Cautionary,
    Celebratory,
}

/// Classifier input, serialized as
/// `{elapsedTime, successRate, failureCount, overallTrend}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierRequest {
    pub elapsed_time: f64,
    pub success_rate: f64,
    pub failure_count: usize,
    pub overall_trend: Trend,
}

impl From<&AnalyticsSnapshot> for ClassifierRequest {
    fn from(snapshot: &AnalyticsSnapshot) -> Self {
        Self {
            elapsed_time: snapshot.elapsed_time,
            success_rate: snapshot.success_rate,
            failure_count: snapshot.failure_count,
            overall_trend: snapshot.trend,
        }
    }
}

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachMessage {
    pub message: String,
    pub sentiment: Sentiment,
}

impl CoachMessage {
    pub fn fallback() -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
            sentiment: Sentiment::Motivational,
        }
    }
}
