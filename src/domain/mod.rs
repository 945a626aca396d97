pub mod digest;
pub mod notification;

pub use digest::{Digest, DigestSource};
pub use notification::NotificationPayload;
