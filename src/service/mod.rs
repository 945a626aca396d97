pub mod banner;
pub mod poller;
pub mod unread;

pub use banner::Banner;
pub use poller::PollerHandle;
pub use unread::UnreadCounter;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::app::Result;
use crate::client::DigestApi;
use crate::domain::{Digest, NotificationPayload};

/// What the poller remembers between checks. Process-local, never
/// persisted: every launch starts cold.
#[derive(Debug, Clone, Default)]
pub struct PollerMemory {
    pub last_seen: Option<i64>,
    pub initialized: bool,
}

/// The digest core: poller memory, the notification banner, and the
/// unread count, behind one service object constructed at process start.
///
/// State updates are whole-state assignments under short-lived locks that
/// are never held across an await, so the poll loop and a user dismissal
/// resolve by last write wins.
pub struct DigestService {
    api: Arc<dyn DigestApi + Send + Sync>,
    memory: Mutex<PollerMemory>,
    banner: Mutex<Banner>,
    unread: UnreadCounter,
}

impl DigestService {
    pub fn new(api: Arc<dyn DigestApi + Send + Sync>) -> Self {
        Self {
            api,
            memory: Mutex::new(PollerMemory::default()),
            banner: Mutex::new(Banner::Hidden),
            unread: UnreadCounter::default(),
        }
    }

    /// Snapshot of the banner state.
    pub fn current_notification(&self) -> Banner {
        self.lock_banner().clone()
    }

    /// Hide the banner and drop its payload. Called for an explicit close
    /// action and when the digest history is opened.
    pub fn dismiss(&self) {
        self.lock_banner().dismiss();
    }

    pub fn unread_count(&self) -> i64 {
        self.unread.get()
    }

    /// One unread refresh. Failures keep the previous count.
    pub async fn refresh_unread(&self) {
        let outcome = self.api.fetch_unread_count().await;
        self.apply_unread(outcome);
    }

    /// One digest check: fetch the list and fold the result into state.
    pub async fn check_digests(&self) {
        let outcome = self.api.fetch_digests().await;
        self.apply_digests(outcome);
    }

    /// Fold a completed fetch into poller memory and the banner.
    ///
    /// Kept separate from [`check_digests`](Self::check_digests) so the
    /// poll loop can discard a result that completes after teardown before
    /// it touches state.
    pub(crate) fn apply_digests(&self, outcome: Result<Vec<Digest>>) {
        let digests = match outcome {
            Ok(digests) => digests,
            Err(e) => {
                debug!("digest check failed: {}", e);
                return;
            }
        };

        let Some(latest) = digests.first() else {
            return;
        };

        let mut memory = self.lock_memory();
        if !memory.initialized {
            // First successful fetch after launch: remember what already
            // exists without announcing it.
            memory.initialized = true;
            memory.last_seen = Some(latest.id);
            return;
        }
        if memory.last_seen == Some(latest.id) {
            return;
        }
        memory.last_seen = Some(latest.id);
        drop(memory);

        info!(digest_id = latest.id, "new digest detected");
        self.lock_banner()
            .show(NotificationPayload::for_digest(latest));
    }

    pub(crate) fn apply_unread(&self, outcome: Result<i64>) {
        self.unread.apply(outcome);
    }

    /// Push a known-new digest straight to the banner, bypassing the id
    /// comparison, and remember its id so the next check stays quiet.
    pub fn show_test_digest(&self, digest: &Digest) {
        self.lock_memory().last_seen = Some(digest.id);
        self.lock_banner()
            .show(NotificationPayload::for_digest(digest));
    }

    /// Start the recurring check loop. The first check runs immediately.
    pub fn start(self: &Arc<Self>, period: std::time::Duration) -> PollerHandle {
        poller::spawn(self.clone(), period)
    }

    pub(crate) fn api(&self) -> &Arc<dyn DigestApi + Send + Sync> {
        &self.api
    }

    pub(crate) fn poller_memory(&self) -> PollerMemory {
        self.lock_memory().clone()
    }

    fn lock_memory(&self) -> MutexGuard<'_, PollerMemory> {
        self.memory.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_banner(&self) -> MutexGuard<'_, Banner> {
        self.banner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
