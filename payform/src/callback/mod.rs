//! Provider callback handling.
//!
//! After a payment the provider calls back the merchant with the transaction
//! outcome. [`CallbackVerifier`] parses that parameter set and authenticates it
//! against the merchant's private security key; only an authenticated payload
//! becomes a [`CallbackResult`].

pub mod indicators;
pub mod params;
pub mod result;
pub mod verifier;

pub use indicators::{EnrollmentStatus, LiabilityShift};
pub use params::CallbackParams;
pub use result::{BillingAddress, CallbackResult};
pub use verifier::CallbackVerifier;
