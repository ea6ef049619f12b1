pub mod api;
pub mod display;
pub mod platform;

pub use api::ApiClient;
pub use display::NotificationDisplay;
pub use platform::PushPlatform;
