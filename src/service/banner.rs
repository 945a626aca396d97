use crate::domain::NotificationPayload;

/// Single-slot notification banner.
///
/// At most one payload is ever held: a detection that lands while an
/// earlier banner is still up silently replaces it, nothing is queued.
/// Dismissing drops the payload along with visibility, so a later show
/// always carries a freshly built payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    Hidden,
    Visible(NotificationPayload),
}

impl Banner {
    pub fn show(&mut self, payload: NotificationPayload) {
        *self = Banner::Visible(payload);
    }

    pub fn dismiss(&mut self) {
        *self = Banner::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Banner::Visible(_))
    }

    pub fn payload(&self) -> Option<&NotificationPayload> {
        match self {
            Banner::Visible(payload) => Some(payload),
            Banner::Hidden => None,
        }
    }
}
