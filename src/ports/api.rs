use crate::types::Subscription;

/// The backend's notification REST surface, one method per endpoint. All
/// calls are fire-and-forget from the caller's point of view: there is no
/// retry and no partial-failure recovery anywhere in the stack.
pub trait ApiClient: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type Fut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// `POST /api/notifications/subscribe` — store a subscription.
    fn register<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a>;

    /// `DELETE /api/notifications/unsubscribe` — drop a subscription.
    fn unregister<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a>;

    /// `POST /api/notifications` — ask the server to push to one channel.
    fn notify<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a>;

    /// `POST /api/notifications/broadcast` — push a payload to everyone.
    fn broadcast<'a>(&'a self, payload: &'a serde_json::Value) -> Self::Fut<'a>;

    /// `POST /api/notifications/{id}/dismiss` — mark a notification read,
    /// identified by its id and the dismissing channel's endpoint.
    fn dismiss<'a>(&'a self, id: &'a str, endpoint: &'a str) -> Self::Fut<'a>;
}
