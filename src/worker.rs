use crate::ports::{ApiClient, NotificationDisplay, PushPlatform};
use crate::types::{NotificationPayload, Permission, Subscription};

/// URL opened when a notification is clicked outside of an action button.
pub const ROOT_URL: &str = "/";

/// One platform event delivered to the worker context.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// A push message arrived; `data` is the raw payload, if any.
    Push { data: Option<String> },
    /// A shown notification was clicked, possibly on an action button.
    Click { action: Option<String> },
    /// A shown notification was closed without being clicked.
    Close { notification: NotificationPayload },
}

/// A side effect the worker wants performed. Planning is pure; applying the
/// effects is the executor's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowNotification(NotificationPayload),
    OpenWindow { url: String },
    DismissNotification { id: String, endpoint: String },
}

/// Maps an event to the effects it should cause, given the current
/// permission state and active subscription. Each event is independent; no
/// state is carried between calls.
pub fn plan(
    event: &WorkerEvent,
    permission: Permission,
    subscription: Option<&Subscription>,
) -> Vec<Effect> {
    match event {
        WorkerEvent::Push { data } => plan_push(data.as_deref(), permission),
        WorkerEvent::Click { action } => plan_click(action.as_deref()),
        WorkerEvent::Close { notification } => plan_close(notification, subscription),
    }
}

fn plan_push(data: Option<&str>, permission: Permission) -> Vec<Effect> {
    if permission != Permission::Granted {
        return Vec::new();
    }
    let Some(raw) = data else {
        return Vec::new();
    };
    match serde_json::from_str::<NotificationPayload>(raw) {
        Ok(payload) => vec![Effect::ShowNotification(payload)],
        // A payload we cannot read is dropped rather than shown garbled.
        Err(_) => Vec::new(),
    }
}

fn plan_click(action: Option<&str>) -> Vec<Effect> {
    match action {
        // Action buttons are declared but not handled anywhere yet; a tagged
        // click falls through without opening the app.
        Some(tag) if !tag.is_empty() => Vec::new(),
        _ => vec![Effect::OpenWindow {
            url: ROOT_URL.to_string(),
        }],
    }
}

fn plan_close(
    notification: &NotificationPayload,
    subscription: Option<&Subscription>,
) -> Vec<Effect> {
    let Some(subscription) = subscription else {
        return Vec::new();
    };
    let Some(id) = notification.data.as_ref().and_then(|data| data.id.as_deref()) else {
        return Vec::new();
    };
    vec![Effect::DismissNotification {
        id: id.to_string(),
        endpoint: subscription.endpoint.clone(),
    }]
}

/// Executor tying the planner to the injected capabilities. Mirrors the
/// worker's runtime contract: effect failures are logged and never
/// propagated, and each dispatch stands alone.
pub struct Worker<P, D, A> {
    platform: P,
    display: D,
    api: A,
}

impl<P, D, A> Worker<P, D, A>
where
    P: PushPlatform,
    D: NotificationDisplay,
    A: ApiClient,
{
    pub fn new(platform: P, display: D, api: A) -> Self {
        Self {
            platform,
            display,
            api,
        }
    }

    /// Plans and applies the effects for one event, returning the plan.
    pub async fn dispatch(&self, event: WorkerEvent) -> Vec<Effect> {
        let permission = self.platform.permission();
        let subscription = self.platform.subscription().await;
        let effects = plan(&event, permission, subscription.as_ref());
        for effect in &effects {
            self.apply(effect).await;
        }
        effects
    }

    async fn apply(&self, effect: &Effect) {
        match effect {
            Effect::ShowNotification(payload) => {
                if let Err(err) = self.display.show(payload).await {
                    eprintln!("notification display error: {err}");
                }
            }
            Effect::OpenWindow { url } => {
                if let Err(err) = self.display.open_window(url).await {
                    eprintln!("window open error: {err}");
                }
            }
            Effect::DismissNotification { id, endpoint } => {
                // Fire-and-forget; a lost dismiss only leaves the server
                // thinking the notification is still unread.
                if let Err(err) = self.api.dismiss(id, endpoint).await {
                    eprintln!("notification dismiss error: {err}");
                }
            }
        }
    }
}
