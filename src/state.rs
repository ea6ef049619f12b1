use crate::config;
use crate::ports::{ApiClient, PushPlatform};
use crate::subscription;

/// UI-visible subscription state. Starts unsubscribed and is only ever
/// recomputed from the platform; nothing is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionStatus {
    pub is_subscribed: bool,
}

/// Owns the subscription status for a presentation layer: one value, two
/// actions. Taking `&mut self` on the actions rules out the overlapping
/// last-write-wins updates the shared-flag version allowed.
pub struct SubscriptionController<P, A> {
    config: config::AppConfig,
    platform: P,
    api: A,
    status: SubscriptionStatus,
}

impl<P, A> SubscriptionController<P, A>
where
    P: PushPlatform,
    A: ApiClient,
{
    pub fn new(config: config::AppConfig, platform: P, api: A) -> Self {
        Self {
            config,
            platform,
            api,
            status: SubscriptionStatus::default(),
        }
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    /// Runs the full subscription negotiation and stores the outcome.
    pub async fn subscribe(&mut self) -> SubscriptionStatus {
        let is_subscribed =
            subscription::configure_push_sub(&self.config, &self.platform, &self.api).await;
        self.status.is_subscribed = is_subscribed;
        self.status
    }

    /// Refreshes the status from the platform without side effects.
    pub async fn check_subscription(&mut self) -> SubscriptionStatus {
        self.status.is_subscribed = subscription::has_subscription(&self.platform).await;
        self.status
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::adapters::MemoryPlatform;
    use crate::types::Subscription;
    use std::sync::{Arc, Mutex};

    const TEST_PUBLIC_KEY: &str =
        "BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U";

    #[derive(Debug)]
    struct TestError;

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("test error")
        }
    }

    #[derive(Clone, Default)]
    struct RecordingApi {
        registered: Arc<Mutex<Vec<String>>>,
    }

    impl ApiClient for RecordingApi {
        type Error = TestError;
        type Fut<'a>
            = std::future::Ready<Result<(), TestError>>
        where
            Self: 'a;

        fn register<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a> {
            self.registered
                .lock()
                .expect("registered lock")
                .push(subscription.endpoint.clone());
            std::future::ready(Ok(()))
        }

        fn unregister<'a>(&'a self, _subscription: &'a Subscription) -> Self::Fut<'a> {
            std::future::ready(Ok(()))
        }

        fn notify<'a>(&'a self, _subscription: &'a Subscription) -> Self::Fut<'a> {
            std::future::ready(Ok(()))
        }

        fn broadcast<'a>(&'a self, _payload: &'a serde_json::Value) -> Self::Fut<'a> {
            std::future::ready(Ok(()))
        }

        fn dismiss<'a>(&'a self, _id: &'a str, _endpoint: &'a str) -> Self::Fut<'a> {
            std::future::ready(Ok(()))
        }
    }

    fn test_config() -> config::AppConfig {
        config::AppConfig {
            vapid_public_key: Some(TEST_PUBLIC_KEY.to_string()),
            ..config::AppConfig::default()
        }
    }

    #[tokio::test]
    async fn controller__should_start_unsubscribed() {
        let controller = SubscriptionController::new(
            test_config(),
            MemoryPlatform::new(),
            RecordingApi::default(),
        );

        assert!(!controller.status().is_subscribed);
    }

    #[tokio::test]
    async fn subscribe__should_update_status_on_success() {
        // Given
        let platform = MemoryPlatform::new();
        platform.grant_on_request(true);
        let api = RecordingApi::default();
        let mut controller = SubscriptionController::new(test_config(), platform, api.clone());

        // When
        let status = controller.subscribe().await;

        // Then
        assert!(status.is_subscribed);
        assert!(controller.status().is_subscribed);
        assert_eq!(api.registered.lock().expect("registered lock").len(), 1);
    }

    #[tokio::test]
    async fn subscribe__should_stay_unsubscribed_when_denied() {
        let platform = MemoryPlatform::new();
        platform.grant_on_request(false);
        let mut controller =
            SubscriptionController::new(test_config(), platform, RecordingApi::default());

        let status = controller.subscribe().await;

        assert!(!status.is_subscribed);
    }

    #[tokio::test]
    async fn check_subscription__should_recompute_from_platform() {
        let platform = MemoryPlatform::new();
        platform.grant_on_request(true);
        let mut controller = SubscriptionController::new(
            test_config(),
            platform.clone(),
            RecordingApi::default(),
        );

        assert!(!controller.check_subscription().await.is_subscribed);

        controller.subscribe().await;
        assert!(controller.check_subscription().await.is_subscribed);

        platform.set_subscription(None);
        assert!(!controller.check_subscription().await.is_subscribed);
    }
}
