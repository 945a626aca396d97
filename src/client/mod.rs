pub mod http;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Digest;

pub use http::HttpDigestApi;

/// Collaborator contract for the digest backend.
///
/// The polling service and the CLI consume only this trait; tests script
/// it with in-memory implementations.
#[async_trait]
pub trait DigestApi {
    /// Fetch the digest list, newest first. Empty on no data.
    async fn fetch_digests(&self) -> Result<Vec<Digest>>;

    /// Fetch the number of unread digests.
    async fn fetch_unread_count(&self) -> Result<i64>;

    /// Ask the backend to produce a fresh digest, known-new by
    /// construction, for the notification path.
    async fn generate_test_digest(&self) -> Result<Digest>;
}
