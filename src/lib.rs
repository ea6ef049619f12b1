pub mod adapters;
pub mod config;
pub mod ports;
pub mod state;
pub mod subscription;
pub mod types;
pub mod worker;

pub use subscription::{configure_push_sub, has_subscription};
