//! Order and redirect target value objects.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use crate::error::{FormError, Result};

/// A single checkout attempt.
///
/// Invariants enforced at construction:
/// - `order_id` is not empty
/// - `currency` is a 3-letter code, stored uppercased
/// - `amount` is not negative
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use payform::model::Order;
/// use rust_decimal::Decimal;
///
/// let order = Order::new("56789", Decimal::new(999, 2), "usd")?
///     .with_description("Buying phone")
///     .with_valid_until(Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap());
///
/// assert_eq!(order.currency(), "USD");
/// assert_eq!(order.description(), Some("Buying phone"));
/// # Ok::<(), payform::FormError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    order_id: String,
    amount: Decimal,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_until: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an order without description or expiry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if the order id is empty, the currency is
    /// not three ASCII letters, or the amount is negative.
    pub fn new(order_id: impl Into<String>, amount: Decimal, currency: &str) -> Result<Self> {
        let order_id = order_id.into();
        if order_id.trim().is_empty() {
            return Err(FormError::InvalidArgument("order id must not be empty".to_owned()));
        }

        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(FormError::InvalidArgument(format!(
                "currency must be a 3-letter ISO 4217 code, got '{currency}'"
            )));
        }

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FormError::InvalidArgument(format!(
                "order amount must not be negative, got {amount}"
            )));
        }

        Ok(Self {
            order_id,
            amount,
            currency: currency.to_ascii_uppercase(),
            description: None,
            valid_until: None,
        })
    }

    /// Attaches a free-text description. An empty description is treated as absent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Sets the moment after which the provider must refuse payment.
    #[must_use]
    pub fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// Merchant-side order identifier.
    #[must_use]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Order amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Uppercased ISO 4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Optional order description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional payment deadline.
    #[must_use]
    pub const fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }
}

/// Where the provider sends the payer after a successful or failed payment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTargets {
    /// Destination after a successful payment.
    pub return_url: Option<Url>,
    /// Destination after a failed payment.
    pub fail_url: Option<Url>,
}

impl RedirectTargets {
    /// Creates empty redirect targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the success destination.
    #[must_use]
    pub fn with_return_url(mut self, url: Url) -> Self {
        self.return_url = Some(url);
        self
    }

    /// Sets the failure destination.
    #[must_use]
    pub fn with_fail_url(mut self, url: Url) -> Self {
        self.fail_url = Some(url);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_order_normalizes_currency() {
        let order = Order::new("1", Decimal::new(100, 2), "eur").unwrap();
        assert_eq!(order.currency(), "EUR");
    }

    #[test]
    fn test_order_rejects_empty_id() {
        let result = Order::new("  ", Decimal::ONE, "USD");
        assert!(matches!(result, Err(FormError::InvalidArgument(_))));
    }

    #[test]
    fn test_order_rejects_bad_currency() {
        for currency in ["", "US", "USDT", "U$D", "12A"] {
            assert!(Order::new("1", Decimal::ONE, currency).is_err(), "{currency} accepted");
        }
    }

    #[test]
    fn test_order_rejects_negative_amount() {
        assert!(Order::new("1", Decimal::new(-1, 2), "USD").is_err());
        assert!(Order::new("1", Decimal::ZERO, "USD").is_ok());
    }

    #[test]
    fn test_empty_description_is_absent() {
        let order = Order::new("1", Decimal::ONE, "USD").unwrap().with_description("");
        assert_eq!(order.description(), None);
    }

    #[test]
    fn test_order_serializes_without_absent_fields() {
        let order = Order::new("56789", Decimal::new(999, 2), "usd").unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_id"], "56789");
        assert_eq!(json["amount"], "9.99");
        assert_eq!(json["currency"], "USD");
        assert!(json.get("description").is_none());
        assert!(json.get("valid_until").is_none());
    }

    #[test]
    fn test_valid_until_is_kept() {
        let deadline = Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap();
        let order = Order::new("1", Decimal::ONE, "USD").unwrap().with_valid_until(deadline);
        assert_eq!(order.valid_until(), Some(deadline));
    }

    #[test]
    fn test_redirect_targets_builder() {
        let targets = RedirectTargets::new()
            .with_return_url(Url::parse("https://shop.example.com/ok").unwrap())
            .with_fail_url(Url::parse("https://shop.example.com/fail").unwrap());
        assert_eq!(targets.return_url.unwrap().path(), "/ok");
        assert_eq!(targets.fail_url.unwrap().path(), "/fail");
    }
}
