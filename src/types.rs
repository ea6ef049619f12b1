use serde::{Deserialize, Serialize};

/// A push delivery channel as handed out by the platform's push service.
///
/// The wire shape matches the browser's `PushSubscription.toJSON()`: the
/// endpoint plus a nested `keys` object. Extra fields such as
/// `expirationTime` are tolerated on input and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Notification permission state as reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Permission {
    /// Not decided yet; a prompt may be shown.
    #[default]
    Default,
    Granted,
    Denied,
}

/// Payload carried by a push message. `data.id` correlates a shown
/// notification with a later dismiss request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NotificationData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
