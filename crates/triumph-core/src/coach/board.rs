//! Displayed coaching message with stale-response protection.
//!
//! Every refresh takes a ticket from [`MessageBoard::issue`]. A response is
//! published only while its ticket is still the newest one issued, so a slow
//! reply to an earlier request can never replace the reply to a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use super::types::CoachMessage;

/// Sequence number attached to one classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RequestTag(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Displayed {
    pub tag: RequestTag,
    pub message: CoachMessage,
}

#[derive(Debug, Default)]
pub struct MessageBoard {
    latest: AtomicU64,
    current: Mutex<Option<Displayed>>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next tag. Any tag issued earlier becomes stale.
    pub fn issue(&self) -> RequestTag {
        RequestTag(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> RequestTag {
        RequestTag(self.latest.load(Ordering::SeqCst))
    }

    /// Show `message` if `tag` is still the newest issued. Returns whether
    /// it was shown.
    pub fn publish(&self, tag: RequestTag, message: CoachMessage) -> bool {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Checked under the lock so a publish cannot interleave with a newer one.
        if tag != self.latest() {
            debug!(tag = tag.0, latest = self.latest().0, "discarding stale coaching response");
            return false;
        }
        *current = Some(Displayed { tag, message });
        true
    }

    pub fn current(&self) -> Option<Displayed> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// A refresh is outstanding when the newest tag has not been published.
    pub fn is_pending(&self) -> bool {
        let latest = self.latest();
        latest.0 > 0 && self.current().map_or(true, |d| d.tag != latest)
    }
}
