use std::future::Future;

use super::types::{ClassifierRequest, CoachMessage};
use crate::error::ClassifierError;

/// Turns analytics into a sentiment-tagged coaching message.
///
/// Implementations may be remote and slow; callers go through
/// [`super::Coach`], which applies the timeout and fallback.
pub trait SentimentClassifier: Send + Sync {
    fn classify(
        &self,
        request: &ClassifierRequest,
    ) -> impl Future<Output = Result<CoachMessage, ClassifierError>> + Send;
}
