use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request ids for one fetcher.
///
/// A response is applied only if its id is still the latest issued.
#[derive(Debug, Default)]
pub(crate) struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub(crate) fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, id: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == id
    }
}
