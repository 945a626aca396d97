use serde::{Deserialize, Serialize};

use crate::domain::Digest;

/// Banner title used when a digest has no usable title of its own.
pub const FALLBACK_TITLE: &str = "New Digest Available";

/// Fixed banner body; the title carries the digest-specific part.
pub const NOTIFICATION_BODY: &str = "Your daily digest is ready.";

/// Transient payload for the notification banner.
///
/// Created when a new digest is detected, held by at most one banner slot,
/// and discarded on dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub digest_id: Option<i64>,
}

impl NotificationPayload {
    pub fn for_digest(digest: &Digest) -> Self {
        let title = if digest.title.trim().is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            digest.title.clone()
        };

        Self {
            title,
            body: NOTIFICATION_BODY.to_string(),
            digest_id: Some(digest.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn digest(id: i64, title: &str) -> Digest {
        Digest {
            id,
            title: title.to_string(),
            content: String::new(),
            topics: Vec::new(),
            sources: Vec::new(),
            created_at: Utc::now(),
            is_read: false,
            is_bookmarked: false,
        }
    }

    #[test]
    fn test_payload_uses_digest_title() {
        let payload = NotificationPayload::for_digest(&digest(7, "Tech Roundup"));
        assert_eq!(payload.title, "Tech Roundup");
        assert_eq!(payload.body, NOTIFICATION_BODY);
        assert_eq!(payload.digest_id, Some(7));
    }

    #[test]
    fn test_payload_falls_back_on_empty_title() {
        let payload = NotificationPayload::for_digest(&digest(3, ""));
        assert_eq!(payload.title, FALLBACK_TITLE);
        assert_eq!(payload.digest_id, Some(3));
    }
}
