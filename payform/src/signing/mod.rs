//! Security key (message authentication) scheme shared by both directions of
//! the provider protocol.
//!
//! - [`SecurityKeyContext::Request`] authenticates an outgoing payment form redirect
//! - [`SecurityKeyContext::Callback`] authenticates an incoming provider callback
//!
//! Both modes share one digest primitive ([`SecurityKey::compute`]) and the
//! field formats in [`format`].

pub mod format;
pub mod security_key;

pub use format::{TIMESTAMP_FORMAT, format_amount, format_timestamp};
pub use security_key::{SecurityKey, SecurityKeyContext};
