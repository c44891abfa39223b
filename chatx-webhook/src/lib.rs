//! # chatx-webhook
//!
//! HTTP surface of the ChatX service: the `messages` webhook shim, the
//! [`ActivityProcessor`] dispatcher contract, the Genie-backed dispatcher
//! implementation, and env-based configuration.

pub mod config;
pub mod dispatcher;
pub mod server;

pub use config::AppConfig;
pub use dispatcher::{ActivityProcessor, GenieDispatcher, InvokeResponse};
pub use server::{build_router, AppState};
