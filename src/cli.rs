use pushside::adapters::{ConsoleDisplay, HttpApiClient, MemoryPlatform};
use pushside::ports::{ApiClient, PushPlatform};
use pushside::types::Permission;
use pushside::{config, subscription, worker};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub(crate) async fn run() -> i32 {
    let cli = Cli::parse();

    let file = match cli.config.as_ref() {
        Some(path) => match config::ConfigFile::load(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("error: {err}");
                return 2;
            }
        },
        None => config::ConfigFile::default(),
    };

    let config = config::AppConfig {
        api_base: cli
            .api_base
            .or(file.api_base)
            .unwrap_or_else(|| config::DEFAULT_API_BASE.to_string()),
        vapid_public_key: cli.vapid_public_key.or(file.vapid_public_key),
    };
    let api = HttpApiClient::new(config.api_base.clone());

    match cli.command {
        Command::Subscribe(args) => run_subscribe(&config, &api, args).await,
        Command::Broadcast(args) => run_broadcast(&api, args).await,
        Command::Dismiss(args) => run_dismiss(&api, args).await,
        Command::Deliver(args) => run_deliver(&api, args).await,
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pushside",
    version,
    about = "Web push subscription client for the notifications backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    #[arg(long, env = "PUSHSIDE_API_BASE")]
    api_base: Option<String>,
    #[arg(long, env = "PUSHSIDE_VAPID_PUBLIC_KEY")]
    vapid_public_key: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Negotiate a subscription with the backend using the in-memory platform
    Subscribe(SubscribeArgs),
    /// Ask the server to push a payload to every subscriber
    Broadcast(BroadcastArgs),
    /// Mark a notification as dismissed on the server
    Dismiss(DismissArgs),
    /// Feed a push payload through the worker dispatcher locally
    Deliver(DeliverArgs),
}

#[derive(Args, Debug)]
struct SubscribeArgs {
    /// Also request a test push to the new subscription
    #[arg(long)]
    notify: bool,
}

#[derive(Args, Debug)]
struct BroadcastArgs {
    /// JSON payload to broadcast
    #[arg(long, default_value = "{}")]
    payload: String,
}

#[derive(Args, Debug)]
struct DismissArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    endpoint: String,
}

#[derive(Args, Debug)]
struct DeliverArgs {
    /// JSON payload, as the push event would carry it
    #[arg(long)]
    payload: String,
}

async fn run_subscribe(
    config: &config::AppConfig,
    api: &HttpApiClient,
    args: SubscribeArgs,
) -> i32 {
    let platform = MemoryPlatform::new();
    platform.grant_on_request(true);

    if !platform.supported() {
        eprintln!("error: push is not supported on this platform");
        return 1;
    }

    if !subscription::configure_push_sub(config, &platform, api).await {
        eprintln!("subscription failed");
        return 1;
    }

    let Some(created) = platform.subscription().await else {
        eprintln!("subscription failed: platform lost the new channel");
        return 1;
    };
    println!("subscribed: {}", created.endpoint);

    if args.notify {
        if let Err(err) = api.notify(&created).await {
            eprintln!("test notification error: {err}");
            return 1;
        }
        println!("test notification requested");
    }
    0
}

async fn run_broadcast(api: &HttpApiClient, args: BroadcastArgs) -> i32 {
    let payload: serde_json::Value = match serde_json::from_str(&args.payload) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("error: payload is not valid JSON: {err}");
            return 2;
        }
    };

    // The one path where a network failure is surfaced to the caller.
    if let Err(err) = api.broadcast(&payload).await {
        eprintln!("broadcast error: {err}");
        return 1;
    }
    println!("broadcast sent");
    0
}

async fn run_dismiss(api: &HttpApiClient, args: DismissArgs) -> i32 {
    if let Err(err) = api.dismiss(&args.id, &args.endpoint).await {
        eprintln!("dismiss error: {err}");
        return 1;
    }
    println!("notification {} dismissed", args.id);
    0
}

async fn run_deliver(api: &HttpApiClient, args: DeliverArgs) -> i32 {
    let platform = MemoryPlatform::new();
    platform.set_permission(Permission::Granted);
    let worker = worker::Worker::new(platform, ConsoleDisplay, api.clone());

    let effects = worker
        .dispatch(worker::WorkerEvent::Push {
            data: Some(args.payload),
        })
        .await;
    if effects.is_empty() {
        eprintln!("payload produced no notification");
        return 1;
    }
    0
}
