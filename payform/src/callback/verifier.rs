//! Provider callback parsing and security key verification.

use std::net::IpAddr;

use tracing::{debug, instrument, warn};

use crate::{
    callback::{BillingAddress, CallbackParams, CallbackResult, EnrollmentStatus, LiabilityShift},
    error::{FormError, Result},
    model::{MerchantAccount, Order},
    signing::{
        SecurityKey,
        format::{parse_amount, parse_digits, parse_timestamp},
    },
};

/// Verifies callbacks sent by the payment provider.
///
/// Verification is single-shot and side-effect free: parse the required fields
/// strictly, the optional ones permissively, recompute the callback security key
/// and compare it with the supplied `SecurityKey`. Nothing is returned unless the
/// keys match.
///
/// # Examples
///
/// ```
/// use payform::{callback::CallbackVerifier, model::MerchantAccount};
///
/// # fn example() -> payform::Result<()> {
/// let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
/// let verifier = CallbackVerifier::new(merchant);
///
/// let result = verifier.verify_query(
///     "DateTime=2010-01-01+00%3A00%3A00&TransactionID=123456789&OrderId=56789\
///      &Amount=9.99&Currency=USD&PaymentAmount=9.99\
///      &SecurityKey=9caebdeb8382cece06fd404661bf583b",
/// )?;
///
/// assert_eq!(result.transaction_id, 123_456_789);
/// assert_eq!(result.order.order_id(), "56789");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    merchant: MerchantAccount,
}

impl CallbackVerifier {
    /// Creates a verifier for callbacks addressed to `merchant`.
    #[must_use]
    pub const fn new(merchant: MerchantAccount) -> Self {
        Self { merchant }
    }

    /// Returns the merchant this verifier checks callbacks for.
    #[must_use]
    pub const fn merchant(&self) -> &MerchantAccount {
        &self.merchant
    }

    /// Decodes a form-encoded callback body or query string and verifies it.
    ///
    /// # Errors
    ///
    /// See [`verify`](Self::verify).
    pub fn verify_query(&self, query: &str) -> Result<CallbackResult> {
        self.verify(&CallbackParams::from_query(query))
    }

    /// Parses and authenticates a callback.
    ///
    /// # Errors
    ///
    /// - [`FormError::MalformedCallback`] if a required field (`DateTime`, `TransactionID`,
    ///   `OrderId`, `Amount`, `Currency`, `PaymentAmount`) is missing or malformed, or if
    ///   `Code`/`ErrorCode` is present but not numeric
    /// - [`FormError::SecurityViolation`] if `SecurityKey` is missing or does not match
    #[instrument(
        skip(self, params),
        fields(merchant_id = self.merchant.merchant_id(), param_count = params.len())
    )]
    pub fn verify(&self, params: &CallbackParams) -> Result<CallbackResult> {
        // 1. Required fields
        let transaction_id = required(params, "TransactionID", parse_digits::<u64>)?;
        let transaction_time = required(params, "DateTime", parse_timestamp)?;
        let amount = required(params, "Amount", parse_amount)?;
        let payment_amount = required(params, "PaymentAmount", parse_amount)?;

        let order_id = params
            .get_non_empty("OrderId")
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| FormError::malformed("OrderId", "is missing"))?;
        let currency = params
            .get_non_empty("Currency")
            .ok_or_else(|| FormError::malformed("Currency", "is missing"))?;
        let order = Order::new(order_id, amount, currency).map_err(|e| match e {
            FormError::InvalidArgument(reason) => FormError::malformed("Currency", reason),
            other => other,
        })?;

        // 2. Decline and error codes: empty means absent, anything else must be numeric
        let decline_code = optional_code(params, "Code")?;
        let error_code = optional_code(params, "ErrorCode")?;

        // 3. Authenticate before exposing anything
        let expected =
            SecurityKey::for_callback(&self.merchant, &order, transaction_id, transaction_time);
        let supplied = params.get("SecurityKey").unwrap_or_default();
        if !expected.matches(supplied) {
            warn!(transaction_id, order_id = order.order_id(), "Callback security key mismatch");
            return Err(FormError::SecurityViolation(format!(
                "security key mismatch for transaction {transaction_id}"
            )));
        }

        // 4. Optional fields
        let text = |name: &str| params.get_non_empty(name).map(str::to_owned);
        let result = CallbackResult {
            transaction_id,
            transaction_time,
            order,
            payment_amount,
            payment_currency: text("PaymentCurrency"),
            masked_card_number: text("CardNumber"),
            cardholder_name: text("CardHolder"),
            issuer: text("BankName"),
            authorization_code: text("AuthCode"),
            bank_transaction_id: text("GatewayTransactionId"),
            liability_shift: params.get("ECI").map(LiabilityShift::from_code).unwrap_or_default(),
            enrollment_status: params
                .get("ThreedsEnrollment")
                .map(EnrollmentStatus::from_code)
                .unwrap_or_default(),
            billing_address: BillingAddress {
                country: text("Country"),
                city: text("City"),
                street: text("Address"),
                zip: text("Zip"),
            },
            phone: text("Phone"),
            email: text("Email"),
            ip_address: params.get("IpAddress").and_then(|ip| ip.trim().parse::<IpAddr>().ok()),
            ip_country: text("IpCountry"),
            bin_country: text("BinCountry"),
            special_conditions: text("SpecialConditions"),
            rebill_anchor: text("RebillAnchor"),
            decline_code,
            error_code,
        };

        debug!(transaction_id, order_id = result.order.order_id(), "Callback verified");
        Ok(result)
    }
}

/// Looks up and strictly parses a required field.
fn required<T>(
    params: &CallbackParams,
    field: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T> {
    let raw = params.get(field).ok_or_else(|| FormError::malformed(field, "is missing"))?;
    parse(raw).ok_or_else(|| FormError::malformed(field, format!("has invalid value '{raw}'")))
}

fn optional_code(params: &CallbackParams, field: &'static str) -> Result<Option<u32>> {
    params
        .get_non_empty(field)
        .map(|raw| {
            parse_digits(raw)
                .ok_or_else(|| FormError::malformed(field, format!("has invalid value '{raw}'")))
        })
        .transpose()
}
