//! Posts plain-text messages to a Slack channel on behalf of a user-supplied
//! access token.
//!
//! See [message::MessageRequest] for what goes over the wire.

pub mod api;
pub mod auth;
pub mod channel;
pub mod error;
pub mod message;
