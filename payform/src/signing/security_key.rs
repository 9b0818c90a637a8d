//! Security key generation for payment requests and provider callbacks.
//!
//! A security key is the lowercase hex MD5 digest of a canonical string built
//! from transaction fields in a fixed order, terminated by the merchant's
//! private key. MD5 is what the provider protocol mandates; it is reproduced
//! byte for byte for interoperability.

use std::fmt;

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::{
    model::{MerchantAccount, Order},
    signing::format::{format_amount, format_timestamp},
};

/// Field set a security key authenticates.
#[derive(Debug, Clone, Copy)]
pub enum SecurityKeyContext<'a> {
    /// Outgoing redirect to the hosted payment form.
    ///
    /// ```text
    /// MerchantId=..&OrderId=..&Amount=..&Currency=..
    ///   [&ValidUntil=..][&OrderDescription=..]&PrivateSecurityKey=..
    /// ```
    Request {
        /// Merchant issuing the request.
        merchant: &'a MerchantAccount,
        /// Order being paid.
        order: &'a Order,
    },
    /// Incoming provider callback.
    ///
    /// ```text
    /// DateTime=..&TransactionID=..&OrderId=..&Amount=..&Currency=..&PrivateSecurityKey=..
    /// ```
    Callback {
        /// Merchant receiving the callback.
        merchant: &'a MerchantAccount,
        /// Order the transaction belongs to.
        order: &'a Order,
        /// Provider transaction id.
        transaction_id: u64,
        /// Provider transaction timestamp.
        transaction_time: DateTime<Utc>,
    },
}

impl SecurityKeyContext<'_> {
    /// Builds the canonical string for this context.
    ///
    /// The result embeds the private key; callers must zeroize it after use.
    pub(crate) fn canonical_string(&self) -> String {
        match self {
            Self::Request { merchant, order } => {
                let mut canonical = format!(
                    "MerchantId={}&OrderId={}&Amount={}&Currency={}",
                    merchant.merchant_id(),
                    order.order_id(),
                    format_amount(order.amount()),
                    order.currency().to_ascii_uppercase(),
                );
                if let Some(valid_until) = order.valid_until() {
                    canonical.push_str("&ValidUntil=");
                    canonical.push_str(&format_timestamp(&valid_until));
                }
                if let Some(description) = order.description().filter(|d| !d.is_empty()) {
                    canonical.push_str("&OrderDescription=");
                    canonical.push_str(description);
                }
                canonical.push_str("&PrivateSecurityKey=");
                canonical.push_str(merchant.private_key().expose());
                canonical
            }
            Self::Callback { merchant, order, transaction_id, transaction_time } => format!(
                "DateTime={}&TransactionID={transaction_id}&OrderId={}&Amount={}&Currency={}&\
                 PrivateSecurityKey={}",
                format_timestamp(transaction_time),
                order.order_id(),
                format_amount(order.amount()),
                order.currency().to_ascii_uppercase(),
                merchant.private_key().expose(),
            ),
        }
    }
}

/// A computed security key: 32 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use payform::{
///     model::{MerchantAccount, Order},
///     signing::SecurityKey,
/// };
/// use rust_decimal::Decimal;
///
/// # fn example() -> payform::Result<()> {
/// let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
/// let order = Order::new("56789", Decimal::new(999, 2), "USD")?;
/// let time = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
///
/// let key = SecurityKey::for_callback(&merchant, &order, 123_456_789, time);
/// assert_eq!(key.as_str(), "9caebdeb8382cece06fd404661bf583b");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecurityKey(String);

impl SecurityKey {
    /// Computes the security key for `context`.
    #[must_use]
    pub fn compute(context: &SecurityKeyContext<'_>) -> Self {
        let mut canonical = context.canonical_string();
        let digest = Md5::digest(canonical.as_bytes());
        canonical.zeroize();
        Self(hex::encode(digest))
    }

    /// Computes the key sent with a payment form redirect.
    #[must_use]
    pub fn for_request(merchant: &MerchantAccount, order: &Order) -> Self {
        Self::compute(&SecurityKeyContext::Request { merchant, order })
    }

    /// Computes the key a genuine provider callback must carry.
    #[must_use]
    pub fn for_callback(
        merchant: &MerchantAccount,
        order: &Order,
        transaction_id: u64,
        transaction_time: DateTime<Utc>,
    ) -> Self {
        Self::compute(&SecurityKeyContext::Callback {
            merchant,
            order,
            transaction_id,
            transaction_time,
        })
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, constant-time comparison with a key received from the provider.
    #[must_use]
    pub fn matches(&self, supplied: &str) -> bool {
        self.0.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}

impl fmt::Display for SecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecurityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
