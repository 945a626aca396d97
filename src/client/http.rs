use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::app::{Result, TidingsError};
use crate::client::DigestApi;
use crate::domain::{Digest, DigestSource};

/// reqwest-backed digest backend client.
pub struct HttpDigestApi {
    client: Client,
    base: Url,
}

impl HttpDigestApi {
    pub fn new(base: Url) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent("tidings/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.endpoint(path)?).send().await?;
        response.error_for_status_ref()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.post(self.endpoint(path)?).send().await?;
        response.error_for_status_ref()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DigestApi for HttpDigestApi {
    async fn fetch_digests(&self) -> Result<Vec<Digest>> {
        let envelope: DigestsEnvelope = self.get_json("digests").await?;
        if !envelope.success {
            return Err(TidingsError::Api("digest list fetch rejected".into()));
        }
        Ok(envelope.digests.into_iter().map(Digest::from).collect())
    }

    async fn fetch_unread_count(&self) -> Result<i64> {
        let envelope: CountEnvelope = self.get_json("digests/unread-count").await?;
        if !envelope.success {
            return Err(TidingsError::Api("unread count fetch rejected".into()));
        }
        Ok(envelope.count)
    }

    async fn generate_test_digest(&self) -> Result<Digest> {
        let envelope: TestDigestEnvelope = self.post_json("digests/test").await?;
        if !envelope.success {
            return Err(TidingsError::Api("test digest generation rejected".into()));
        }
        envelope
            .digest
            .map(Digest::from)
            .ok_or_else(|| TidingsError::Api("test digest response missing digest".into()))
    }
}

#[derive(Debug, Deserialize)]
struct DigestsEnvelope {
    success: bool,
    #[serde(default)]
    digests: Vec<WireDigest>,
}

#[derive(Debug, Deserialize)]
struct CountEnvelope {
    success: bool,
    #[serde(default)]
    count: i64,
}

#[derive(Debug, Deserialize)]
struct TestDigestEnvelope {
    success: bool,
    digest: Option<WireDigest>,
}

/// Digest as the backend sends it. `topics` and `sources` arrive either
/// inline or JSON-encoded inside a string field; both forms are decoded
/// here so the domain model never sees the wire quirk.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDigest {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default, deserialize_with = "json_or_inline")]
    topics: Vec<String>,
    #[serde(default, deserialize_with = "json_or_inline")]
    sources: Vec<DigestSource>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    is_read: bool,
    #[serde(default)]
    is_bookmarked: bool,
}

impl From<WireDigest> for Digest {
    fn from(wire: WireDigest) -> Self {
        Digest {
            id: wire.id,
            title: wire.title,
            content: wire.content,
            topics: wire.topics,
            sources: wire.sources,
            created_at: wire.created_at,
            is_read: wire.is_read,
            is_bookmarked: wire.is_bookmarked,
        }
    }
}

fn json_or_inline<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded<T> {
        Json(String),
        Inline(T),
        Null,
    }

    match Encoded::<T>::deserialize(deserializer)? {
        Encoded::Json(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(T::default())
            } else {
                serde_json::from_str(trimmed).map_err(serde::de::Error::custom)
            }
        }
        Encoded::Inline(value) => Ok(value),
        Encoded::Null => Ok(T::default()),
    }
}
