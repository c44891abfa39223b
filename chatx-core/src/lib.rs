//! # chatx-core
//!
//! Core types for the ChatX webhook service: the chat [`Activity`] envelope,
//! adaptive-card attachment types, error types, and tracing initialization.
//! Transport-agnostic; used by chatx-genie and chatx-webhook.

pub mod activity;
pub mod error;
pub mod logger;

pub use activity::{Activity, AdaptiveCard, Attachment, TextBlock, ADAPTIVE_CARD_CONTENT_TYPE};
pub use error::{ChatxError, Result};
pub use logger::init_tracing;
