use crate::ports;
use crate::types::{NotificationPayload, Permission, Subscription, SubscriptionKeys};

use base64::{URL_SAFE_NO_PAD, encode_config};
use rand::RngCore;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// `ApiClient` over the backend's REST endpoints.
#[derive(Clone)]
pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ports::ApiClient for HttpApiClient {
    type Error = reqwest::Error;
    type Fut<'a>
        = Pin<Box<dyn Future<Output = Result<(), reqwest::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn register<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a> {
        Box::pin(async move {
            self.client
                .post(self.url("/api/notifications/subscribe"))
                .json(subscription)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }

    fn unregister<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a> {
        Box::pin(async move {
            self.client
                .delete(self.url("/api/notifications/unsubscribe"))
                .json(subscription)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }

    fn notify<'a>(&'a self, subscription: &'a Subscription) -> Self::Fut<'a> {
        Box::pin(async move {
            self.client
                .post(self.url("/api/notifications"))
                .json(subscription)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }

    fn broadcast<'a>(&'a self, payload: &'a serde_json::Value) -> Self::Fut<'a> {
        Box::pin(async move {
            self.client
                .post(self.url("/api/notifications/broadcast"))
                .json(payload)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }

    fn dismiss<'a>(&'a self, id: &'a str, endpoint: &'a str) -> Self::Fut<'a> {
        Box::pin(async move {
            self.client
                .post(self.url(&format!("/api/notifications/{id}/dismiss")))
                .form(&[("endpoint", endpoint)])
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }
}

#[derive(Debug)]
pub struct PlatformError(&'static str);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for PlatformError {}

/// In-process stand-in for the browser's push stack: scriptable permission
/// state and at most one active subscription, with synthesized endpoints and
/// keys. Backs the CLI flows and tests.
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    inner: Arc<Mutex<MemoryPlatformState>>,
}

#[derive(Default)]
struct MemoryPlatformState {
    permission: Permission,
    grant_on_request: bool,
    subscription: Option<Subscription>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_permission(&self, permission: Permission) {
        self.inner.lock().expect("platform lock").permission = permission;
    }

    /// Scripts the user's answer to the next permission prompt.
    pub fn grant_on_request(&self, grant: bool) {
        self.inner.lock().expect("platform lock").grant_on_request = grant;
    }

    pub fn set_subscription(&self, subscription: Option<Subscription>) {
        self.inner.lock().expect("platform lock").subscription = subscription;
    }
}

impl ports::PushPlatform for MemoryPlatform {
    type Error = PlatformError;
    type PermissionFut<'a>
        = std::future::Ready<Permission>
    where
        Self: 'a;
    type ReadyFut<'a>
        = std::future::Ready<()>
    where
        Self: 'a;
    type SubscriptionFut<'a>
        = std::future::Ready<Option<Subscription>>
    where
        Self: 'a;
    type SubscribeFut<'a>
        = std::future::Ready<Result<Subscription, PlatformError>>
    where
        Self: 'a;
    type UnsubscribeFut<'a>
        = std::future::Ready<Result<(), PlatformError>>
    where
        Self: 'a;

    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        self.inner.lock().expect("platform lock").permission
    }

    fn request_permission(&self) -> Self::PermissionFut<'_> {
        let mut state = self.inner.lock().expect("platform lock");
        // Only an undecided permission can change; a denial sticks, as it
        // does in browsers.
        if state.permission == Permission::Default {
            state.permission = if state.grant_on_request {
                Permission::Granted
            } else {
                Permission::Denied
            };
        }
        std::future::ready(state.permission)
    }

    fn ready(&self) -> Self::ReadyFut<'_> {
        // The in-memory worker takes over immediately; there is no staged
        // rollout to wait for.
        std::future::ready(())
    }

    fn subscription(&self) -> Self::SubscriptionFut<'_> {
        std::future::ready(self.inner.lock().expect("platform lock").subscription.clone())
    }

    fn subscribe<'a>(&'a self, server_key: &'a [u8]) -> Self::SubscribeFut<'a> {
        let mut state = self.inner.lock().expect("platform lock");
        let result = if state.permission != Permission::Granted {
            Err(PlatformError("notification permission not granted"))
        } else if server_key.is_empty() {
            Err(PlatformError("empty application server key"))
        } else {
            let subscription = synthesize_subscription();
            state.subscription = Some(subscription.clone());
            Ok(subscription)
        };
        std::future::ready(result)
    }

    fn unsubscribe(&self) -> Self::UnsubscribeFut<'_> {
        let mut state = self.inner.lock().expect("platform lock");
        let result = if state.subscription.take().is_some() {
            Ok(())
        } else {
            Err(PlatformError("no active subscription"))
        };
        std::future::ready(result)
    }
}

fn synthesize_subscription() -> Subscription {
    let mut rng = rand::thread_rng();
    let mut channel = [0u8; 16];
    rng.fill_bytes(&mut channel);
    let mut p256dh = [0u8; 65];
    rng.fill_bytes(&mut p256dh);
    let mut auth = [0u8; 16];
    rng.fill_bytes(&mut auth);
    Subscription {
        endpoint: format!(
            "https://push.memory.invalid/{}",
            encode_config(channel, URL_SAFE_NO_PAD)
        ),
        keys: SubscriptionKeys {
            p256dh: encode_config(p256dh, URL_SAFE_NO_PAD),
            auth: encode_config(auth, URL_SAFE_NO_PAD),
        },
    }
}

/// `NotificationDisplay` for the CLI: notifications land on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl ports::NotificationDisplay for ConsoleDisplay {
    type Error = Infallible;
    type ShowFut<'a>
        = std::future::Ready<Result<(), Infallible>>
    where
        Self: 'a;
    type OpenFut<'a>
        = std::future::Ready<Result<(), Infallible>>
    where
        Self: 'a;

    fn show<'a>(&'a self, payload: &'a NotificationPayload) -> Self::ShowFut<'a> {
        println!("[notification] {}: {}", payload.title, payload.message);
        std::future::ready(Ok(()))
    }

    fn open_window<'a>(&'a self, url: &'a str) -> Self::OpenFut<'a> {
        println!("[window] open {url}");
        std::future::ready(Ok(()))
    }
}
