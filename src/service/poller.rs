use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

use crate::service::DigestService;

/// Handle to a running poll loop.
pub struct PollerHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the loop. No further checks run; a fetch already in flight
    /// has its result discarded when it completes.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Spawn the recurring digest check and unread refresh.
///
/// The first check runs immediately on activation, then one per period.
/// Each tick spawns its own task, so a response slower than the period
/// never delays the next tick; overlapping results apply in completion
/// order.
pub fn spawn(service: Arc<DigestService>, period: Duration) -> PollerHandle {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();

    let task = tokio::spawn(async move {
        info!("digest poller started (period: {:?})", period);
        let mut timer = interval(period);

        while flag.load(Ordering::SeqCst) {
            timer.tick().await;
            if !flag.load(Ordering::SeqCst) {
                break;
            }
            tokio::spawn(run_check(service.clone(), flag.clone()));
        }

        debug!("digest poller stopped");
    });

    PollerHandle { running, task }
}

/// One tick: digest check, then unread refresh. The running flag is
/// re-checked after each fetch completes so a late response never
/// corrupts state after teardown.
async fn run_check(service: Arc<DigestService>, running: Arc<AtomicBool>) {
    let digests = service.api().fetch_digests().await;
    if !running.load(Ordering::SeqCst) {
        debug!("dropping digest result that completed after shutdown");
        return;
    }
    service.apply_digests(digests);

    let count = service.api().fetch_unread_count().await;
    if !running.load(Ordering::SeqCst) {
        return;
    }
    service.apply_unread(count);
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::app::{Result, TidingsError};
    use crate::client::DigestApi;
    use crate::domain::Digest;
    use crate::service::tests::{digest, ScriptedApi};
    use crate::service::Banner;

    /// Collaborator whose digest fetch blocks until released, for
    /// exercising in-flight responses around teardown.
    struct GatedApi {
        gate: Notify,
    }

    #[async_trait]
    impl DigestApi for GatedApi {
        async fn fetch_digests(&self) -> Result<Vec<Digest>> {
            self.gate.notified().await;
            Ok(vec![digest(6, "Late")])
        }

        async fn fetch_unread_count(&self) -> Result<i64> {
            Ok(0)
        }

        async fn generate_test_digest(&self) -> Result<Digest> {
            Err(TidingsError::Other("not scripted".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_check_runs_immediately() {
        let api = Arc::new(ScriptedApi::new());
        api.push_digests(Ok(vec![digest(5, "Existing")]));
        api.push_count(Ok(3));
        let service = Arc::new(DigestService::new(api));

        let handle = spawn(service.clone(), Duration::from_secs(30));
        // Well under one period: only the immediate first tick has run.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let memory = service.poller_memory();
        assert!(memory.initialized);
        assert_eq!(memory.last_seen, Some(5));
        assert_eq!(service.unread_count(), 3);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_tick_detects_new_digest() {
        let api = Arc::new(ScriptedApi::new());
        api.push_digests(Ok(vec![digest(5, "Existing")]));
        api.push_digests(Ok(vec![digest(6, "Fresh"), digest(5, "Existing")]));
        let service = Arc::new(DigestService::new(api));

        let handle = spawn(service.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(service.current_notification(), Banner::Hidden);

        tokio::time::sleep(Duration::from_secs(31)).await;

        let banner = service.current_notification();
        assert_eq!(banner.payload().unwrap().digest_id, Some(6));

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_handle_schedules_no_more_checks() {
        let api = Arc::new(ScriptedApi::new());
        api.push_digests(Ok(vec![digest(5, "Existing")]));
        let service = Arc::new(DigestService::new(api.clone()));

        let handle = spawn(service.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.stop();
        assert!(!handle.is_running());

        // Script a would-be detection; with the poller stopped it must
        // never be fetched.
        api.push_digests(Ok(vec![digest(6, "Fresh")]));
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(service.current_notification(), Banner::Hidden);
        assert_eq!(service.poller_memory().last_seen, Some(5));
    }

    #[tokio::test]
    async fn test_in_flight_result_dropped_after_stop() {
        let api = Arc::new(GatedApi {
            gate: Notify::new(),
        });
        let service = Arc::new(DigestService::new(api.clone()));

        let running = Arc::new(AtomicBool::new(true));
        let check = tokio::spawn(run_check(service.clone(), running.clone()));

        // Tear down while the fetch is still pending, then release it.
        running.store(false, Ordering::SeqCst);
        api.gate.notify_one();
        check.await.expect("check task should finish");

        assert!(!service.poller_memory().initialized);
        assert_eq!(service.current_notification(), Banner::Hidden);
    }
}
