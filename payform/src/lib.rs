//! Payform: Hosted Payment Form Integration for Merchants
//!
//! A Rust library for merchants that accept card and e-wallet payments through a
//! provider-hosted payment form. It builds the signed redirect URL that sends a
//! payer to the form, and authenticates the callback the provider sends back once
//! the transaction completes.
//!
//! # How It Works
//!
//! ```text
//! ┌────────────┐  1. redirect URL (signed)   ┌─────────────────────┐
//! │  Merchant  │────────────────────────────▶│  Hosted payment     │
//! │  web site  │                             │  form (provider)    │
//! │            │◀────────────────────────────│                     │
//! └────────────┘  2. callback (signed)       └─────────────────────┘
//! ```
//!
//! Both messages carry a `SecurityKey`: the lowercase hex MD5 digest of a
//! canonical string that includes the merchant's private security key. The key
//! itself never travels over the wire.
//!
//! # Quick Start
//!
//! ## 1. Redirect the Payer
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use payform::{
//!     model::{Language, MerchantAccount, Order, PaymentMethod},
//!     redirect::PaymentUrlBuilder,
//! };
//! use rust_decimal::Decimal;
//!
//! # fn example() -> payform::Result<()> {
//! let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
//! let order = Order::new("56789", Decimal::new(999, 2), "USD")?
//!     .with_description("Buying phone")
//!     .with_valid_until(Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap());
//!
//! let url = PaymentUrlBuilder::new("https://secure.payonlinesystem.com", &merchant, &order)?
//!     .payment_method(PaymentMethod::Select)
//!     .language(Language::English)
//!     .custom_param("email", "test@test.test")
//!     .build()?;
//!
//! // Send an HTTP 302 to `url`
//! # let _ = url;
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Verify the Callback
//!
//! ```rust
//! use payform::{FormError, callback::CallbackVerifier, model::MerchantAccount};
//!
//! # fn example(body: &str) -> payform::Result<()> {
//! let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
//! let verifier = CallbackVerifier::new(merchant);
//!
//! match verifier.verify_query(body) {
//!     Ok(result) if result.is_approved() => {
//!         println!("Order {} paid", result.order.order_id());
//!     }
//!     Ok(result) => println!("Declined with code {:?}", result.decline_code),
//!     Err(FormError::SecurityViolation(_)) => {
//!         // Forged or corrupted callback: do not fulfil the order
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Load Settings from TOML
//!
//! ```rust
//! use payform::config::FormConfig;
//!
//! # fn example() -> payform::Result<()> {
//! let config = FormConfig::from_toml(
//!     r#"
//!     merchant_id = 12345
//!     processing_url = "https://secure.payonlinesystem.com"
//!     private_key_env = "PAYFORM_PRIVATE_KEY"
//!     language = "en"
//!     "#,
//! )?;
//! let verifier = config.callback_verifier()?;
//! # let _ = verifier;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`model`]: Merchant account, order, payment method and language
//! - [`signing`]: Security key calculation and wire formatting
//! - [`redirect`]: Payment form URL builder
//! - [`callback`]: Callback parsing and verification
//! - [`config`]: TOML configuration
//! - [`error`]: Error types
//!
//! # Security Considerations
//!
//! - **Keep the private key secret**: load it from the environment with
//!   `private_key_env`; [`model::PrivateKey`] redacts itself in `Debug` output and
//!   is zeroized on drop
//! - **Never trust unverified callbacks**: a
//!   [`CallbackResult`](callback::CallbackResult) only exists after its security
//!   key matched
//! - **HTTPS in production**: [`config::FormConfig`] only accepts HTTPS,
//!   non-loopback provider origins; the builder also takes `http://` test hosts
//! - **Constant-time comparison**: received security keys are compared with
//!   `subtle`
//!
//! MD5 is what the provider's protocol mandates. It authenticates messages with a
//! shared secret and must not be reused for anything else.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod callback;
pub mod config;
pub mod error;
pub mod model;
pub mod redirect;
pub mod signing;

pub use callback::{CallbackResult, CallbackVerifier};
pub use config::FormConfig;
pub use error::{FormError, Result};
pub use model::{MerchantAccount, Order};
pub use redirect::PaymentUrlBuilder;
pub use signing::SecurityKey;
