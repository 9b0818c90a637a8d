//! Value objects describing the merchant, the order and the form to show.
//!
//! All types are immutable after construction and validate their inputs once,
//! so downstream security key and URL code can format them without re-checking.

pub mod merchant;
pub mod method;
pub mod order;

pub use merchant::{MerchantAccount, PrivateKey};
pub use method::{Language, PaymentMethod};
pub use order::{Order, RedirectTargets};
