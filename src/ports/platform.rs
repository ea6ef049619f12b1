use crate::types::{Permission, Subscription};

/// The platform primitives behind push subscriptions: permission state, the
/// service worker registration, and the push service's subscription store.
/// In a browser this is backed by the Notification and Push APIs; tests and
/// the CLI use the in-memory adapter.
pub trait PushPlatform: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type PermissionFut<'a>: Future<Output = Permission> + Send + 'a
    where
        Self: 'a;
    type ReadyFut<'a>: Future<Output = ()> + Send + 'a
    where
        Self: 'a;
    type SubscriptionFut<'a>: Future<Output = Option<Subscription>> + Send + 'a
    where
        Self: 'a;
    type SubscribeFut<'a>: Future<Output = Result<Subscription, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type UnsubscribeFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// Whether push is available at all on this platform.
    fn supported(&self) -> bool;

    /// Current permission state, without prompting.
    fn permission(&self) -> Permission;

    /// Ask the user for notification permission. Resolves immediately with
    /// the existing state when permission was already decided.
    fn request_permission(&self) -> Self::PermissionFut<'_>;

    /// Suspends until the service worker registration is ready.
    fn ready(&self) -> Self::ReadyFut<'_>;

    /// The currently active subscription, if any.
    fn subscription(&self) -> Self::SubscriptionFut<'_>;

    /// Create a new subscription against the given application server key.
    fn subscribe<'a>(&'a self, server_key: &'a [u8]) -> Self::SubscribeFut<'a>;

    /// Drop the active subscription.
    fn unsubscribe(&self) -> Self::UnsubscribeFut<'_>;
}
