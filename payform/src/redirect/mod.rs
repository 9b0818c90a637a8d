//! Outgoing direction: the signed redirect to the hosted payment form.

pub mod builder;

pub use builder::PaymentUrlBuilder;
