//! Verified callback data.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    callback::{EnrollmentStatus, LiabilityShift},
    model::Order,
};

/// Payer billing address as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct BillingAddress {
    /// Country code (`Country`).
    pub country: Option<String>,
    /// City (`City`).
    pub city: Option<String>,
    /// Street address (`Address`).
    pub street: Option<String>,
    /// Postal code (`Zip`).
    pub zip: Option<String>,
}

/// Transaction data from a provider callback whose security key has been verified.
///
/// Only [`CallbackVerifier`](crate::callback::CallbackVerifier) produces values of
/// this type, so holding one means the payload was authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CallbackResult {
    /// Provider transaction id (`TransactionID`).
    pub transaction_id: u64,
    /// Transaction timestamp (`DateTime`).
    pub transaction_time: DateTime<Utc>,
    /// Order the transaction belongs to (`OrderId`, `Amount`, `Currency`).
    pub order: Order,
    /// Amount actually charged (`PaymentAmount`), may differ after currency conversion.
    pub payment_amount: Decimal,
    /// Currency actually charged (`PaymentCurrency`).
    pub payment_currency: Option<String>,
    /// Masked card number (`CardNumber`).
    pub masked_card_number: Option<String>,
    /// Cardholder name (`CardHolder`).
    pub cardholder_name: Option<String>,
    /// Issuing bank name (`BankName`).
    pub issuer: Option<String>,
    /// Authorization code (`AuthCode`).
    pub authorization_code: Option<String>,
    /// Bank-side transaction id (`GatewayTransactionId`).
    pub bank_transaction_id: Option<String>,
    /// 3-D Secure liability shift (`ECI`).
    pub liability_shift: LiabilityShift,
    /// 3-D Secure enrollment (`ThreedsEnrollment`).
    pub enrollment_status: EnrollmentStatus,
    /// Billing address (`Country`, `City`, `Address`, `Zip`).
    pub billing_address: BillingAddress,
    /// Payer phone (`Phone`).
    pub phone: Option<String>,
    /// Payer email (`Email`).
    pub email: Option<String>,
    /// Payer IP address (`IpAddress`), `None` if absent or unparsable.
    pub ip_address: Option<IpAddr>,
    /// Country derived from the payer IP (`IpCountry`).
    pub ip_country: Option<String>,
    /// Country derived from the card BIN (`BinCountry`).
    pub bin_country: Option<String>,
    /// Free-text special conditions (`SpecialConditions`).
    pub special_conditions: Option<String>,
    /// Token for charging the same card again (`RebillAnchor`).
    pub rebill_anchor: Option<String>,
    /// Decline code (`Code`).
    pub decline_code: Option<u32>,
    /// Error code (`ErrorCode`).
    pub error_code: Option<u32>,
}

impl CallbackResult {
    /// Returns true if the provider reported neither a decline nor an error code.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.decline_code.is_none() && self.error_code.is_none()
    }
}
