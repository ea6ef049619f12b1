use crate::config;
use crate::ports::{ApiClient, PushPlatform};

use base64::{URL_SAFE_NO_PAD, decode_config};

#[derive(Debug)]
pub enum SubscribeError {
    MissingPublicKey,
    InvalidPublicKey(String),
    Platform(String),
    Api(String),
}

impl std::fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscribeError::MissingPublicKey => f.write_str("VAPID public key is not configured"),
            SubscribeError::InvalidPublicKey(reason) => {
                write!(f, "invalid VAPID public key: {reason}")
            }
            SubscribeError::Platform(reason) => write!(f, "push platform error: {reason}"),
            SubscribeError::Api(reason) => write!(f, "notification API error: {reason}"),
        }
    }
}

impl std::error::Error for SubscribeError {}

/// Best-effort subscription toggle. Returns true iff the caller ends up
/// subscribed; every failure is logged and collapsed into false.
///
/// When permission is already granted and a subscription exists, the whole
/// channel is replaced: the old endpoint is dropped on the server and the
/// platform, then a fresh one is created and registered.
pub async fn configure_push_sub<P, A>(config: &config::AppConfig, platform: &P, api: &A) -> bool
where
    P: PushPlatform,
    A: ApiClient,
{
    match try_configure(config, platform, api).await {
        Ok(subscribed) => subscribed,
        Err(err) => {
            eprintln!("push subscription error: {err}");
            false
        }
    }
}

async fn try_configure<P, A>(
    config: &config::AppConfig,
    platform: &P,
    api: &A,
) -> Result<bool, SubscribeError>
where
    P: PushPlatform,
    A: ApiClient,
{
    // Checked before touching the platform so a missing key never prompts
    // the user or hits the network.
    let raw_key = config
        .vapid_public_key
        .as_deref()
        .ok_or(SubscribeError::MissingPublicKey)?;
    let server_key = decode_vapid_public_key(raw_key)?;

    platform.ready().await;

    if platform.permission() == crate::types::Permission::Granted {
        if let Some(current) = platform.subscription().await {
            api.unregister(&current)
                .await
                .map_err(|err| SubscribeError::Api(err.to_string()))?;
            platform
                .unsubscribe()
                .await
                .map_err(|err| SubscribeError::Platform(err.to_string()))?;
            let fresh = platform
                .subscribe(&server_key)
                .await
                .map_err(|err| SubscribeError::Platform(err.to_string()))?;
            api.register(&fresh)
                .await
                .map_err(|err| SubscribeError::Api(err.to_string()))?;
            return Ok(true);
        }
    }

    match platform.request_permission().await {
        crate::types::Permission::Granted => {
            let subscription = platform
                .subscribe(&server_key)
                .await
                .map_err(|err| SubscribeError::Platform(err.to_string()))?;
            api.register(&subscription)
                .await
                .map_err(|err| SubscribeError::Api(err.to_string()))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Whether a platform subscription currently exists. No side effects.
pub async fn has_subscription<P: PushPlatform>(platform: &P) -> bool {
    platform.subscription().await.is_some()
}

/// Decodes a base64url VAPID public key, padded or not, into the raw bytes
/// handed to the platform as the application server key.
pub(crate) fn decode_vapid_public_key(raw: &str) -> Result<Vec<u8>, SubscribeError> {
    let trimmed = raw.trim().trim_end_matches('=');
    let bytes = decode_config(trimmed, URL_SAFE_NO_PAD)
        .map_err(|err| SubscribeError::InvalidPublicKey(err.to_string()))?;
    if bytes.is_empty() {
        return Err(SubscribeError::InvalidPublicKey("key is empty".to_string()));
    }
    Ok(bytes)
}
