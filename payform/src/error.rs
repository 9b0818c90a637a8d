//! Error types for hosted payment form integration.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Input Errors** ([`FormError::InvalidArgument`]): caller supplied an unusable value
//! - **Mapping Errors** ([`FormError::NotSupported`]): a payment method or language code has no
//!   URL mapping
//! - **Callback Errors** ([`FormError::MalformedCallback`], [`FormError::SecurityViolation`]):
//!   an inbound provider callback is unreadable or not authentic
//! - **Configuration Errors** ([`FormError::ConfigError`]): TOML or environment problems
//!
//! # Examples
//!
//! ```
//! use payform::error::{FormError, Result};
//!
//! fn require_order_id(order_id: &str) -> Result<&str> {
//!     if order_id.trim().is_empty() {
//!         return Err(FormError::InvalidArgument("order id must not be empty".to_owned()));
//!     }
//!     Ok(order_id)
//! }
//!
//! assert!(require_order_id("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for payment form operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while building payment URLs or verifying callbacks.
///
/// # Error Recovery
///
/// - **Input errors** ([`InvalidArgument`](Self::InvalidArgument)): fix the input and retry
/// - **Mapping errors** ([`NotSupported`](Self::NotSupported)): the code is unknown to this
///   library version, never guessed
/// - **Callback errors** ([`MalformedCallback`](Self::MalformedCallback)): reject the request
///   (e.g. HTTP 400) without side effects
/// - **Security errors** ([`SecurityViolation`](Self::SecurityViolation)): reject the request and
///   do not trust or persist any field from it
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum FormError {
    /// A required input is missing, empty or malformed.
    ///
    /// Common causes include:
    /// - Empty or whitespace-only merchant private key
    /// - Empty order id or a currency that is not a 3-letter code
    /// - Negative order amount
    /// - Processing URL that is not an absolute HTTP(S) URL with a host
    ///
    /// # Examples
    ///
    /// ```
    /// use payform::model::MerchantAccount;
    ///
    /// let err = MerchantAccount::new(12345, "  ").unwrap_err();
    /// assert!(err.to_string().contains("Invalid argument"));
    /// ```
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A payment method or form language has no defined URL mapping.
    ///
    /// Indicates a mismatch between the caller and the provider protocol version
    /// supported by this library.
    ///
    /// # Examples
    ///
    /// ```
    /// use payform::model::PaymentMethod;
    ///
    /// let err = "paypal".parse::<PaymentMethod>().unwrap_err();
    /// assert!(err.to_string().contains("Not supported"));
    /// ```
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A required callback field is missing or fails strict parsing.
    #[error("Malformed callback: field '{field}' {reason}")]
    MalformedCallback {
        /// Wire name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The security key supplied with a callback does not match the recomputed one.
    ///
    /// # Recovery
    ///
    /// None. The callback must be rejected outright; it either did not originate
    /// from the provider or was tampered with in transit.
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// Configuration could not be loaded or failed validation.
    ///
    /// Common causes include:
    /// - Invalid TOML syntax or unknown field types
    /// - Processing URL not using HTTPS, or pointing at a loopback host
    /// - Private key environment variable unset
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FormError {
    /// Creates a [`FormError::MalformedCallback`] for `field`.
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedCallback { field, reason: reason.into() }
    }
}
