//! Payment form redirect URL construction.

use tracing::{debug, instrument};
use url::Url;

use crate::{
    error::{FormError, Result},
    model::{Language, MerchantAccount, Order, PaymentMethod, RedirectTargets},
    signing::{SecurityKey, format_amount, format_timestamp},
};

/// Query parameter names owned by the protocol; custom parameters may not reuse them.
const RESERVED_PARAMS: &[&str] = &[
    "MerchantId",
    "OrderId",
    "Amount",
    "Currency",
    "ValidUntil",
    "OrderDescription",
    "SecurityKey",
    "ReturnUrl",
    "FailUrl",
];

/// Builds the URL that sends a payer to the provider's hosted payment form.
///
/// The URL has the form `<origin>[/<lang>]/payment[/select[/<method>]]?<query>`
/// with the query parameters in protocol order, followed by any custom
/// parameters in the order they were added.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use payform::{
///     model::{Language, MerchantAccount, Order, PaymentMethod},
///     redirect::PaymentUrlBuilder,
/// };
/// use rust_decimal::Decimal;
///
/// # fn example() -> payform::Result<()> {
/// let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
/// let order = Order::new("56789", Decimal::new(999, 2), "USD")?
///     .with_description("Buying phone")
///     .with_valid_until(Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap());
///
/// let url = PaymentUrlBuilder::new("https://secure.payonlinesystem.com", &merchant, &order)?
///     .payment_method(PaymentMethod::Select)
///     .language(Language::English)
///     .build()?;
///
/// assert_eq!(url.path(), "/en/payment/select");
/// assert!(url.as_str().contains("SecurityKey=3a561b5b42069b2432095e08630c3f93"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PaymentUrlBuilder<'a> {
    origin: Url,
    merchant: &'a MerchantAccount,
    order: &'a Order,
    method: PaymentMethod,
    language: Language,
    redirect: RedirectTargets,
    custom: Vec<(String, String)>,
}

impl<'a> PaymentUrlBuilder<'a> {
    /// Starts a builder for the provider at `origin`.
    ///
    /// Defaults: [`PaymentMethod::Card`], [`Language::Russian`], no redirect targets
    /// and no custom parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if `origin` is not an absolute HTTP(S)
    /// URL with a host. [`FormConfig`](crate::config::FormConfig) additionally
    /// requires HTTPS and a non-loopback host for configured origins.
    pub fn new(origin: &str, merchant: &'a MerchantAccount, order: &'a Order) -> Result<Self> {
        Ok(Self {
            origin: parse_origin(origin)?,
            merchant,
            order,
            method: PaymentMethod::default(),
            language: Language::default(),
            redirect: RedirectTargets::default(),
            custom: Vec::new(),
        })
    }

    /// Selects the payment method page.
    #[must_use]
    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    /// Selects the form language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets where the payer lands after the payment.
    #[must_use]
    pub fn redirect_targets(mut self, redirect: RedirectTargets) -> Self {
        self.redirect = redirect;
        self
    }

    /// Appends a merchant-defined query parameter passed through to the provider.
    ///
    /// Names must be non-empty and must not match a protocol parameter such as
    /// `SecurityKey` or `Amount`, ignoring ASCII case. Offending names are kept
    /// until [`build`](Self::build), which then fails with
    /// [`FormError::InvalidArgument`].
    #[must_use]
    pub fn custom_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.push((name.into(), value.into()));
        self
    }

    /// Appends several merchant-defined query parameters, preserving their order.
    ///
    /// Names follow the rules of [`custom_param`](Self::custom_param).
    #[must_use]
    pub fn custom_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns the path selected by language and payment method.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.language.path_prefix(), self.method.path())
    }

    /// Builds the redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if a custom parameter name is empty or
    /// collides (ignoring ASCII case) with a protocol parameter.
    #[instrument(
        skip(self),
        fields(
            merchant_id = self.merchant.merchant_id(),
            order_id = %self.order.order_id(),
            method = %self.method,
            language = %self.language,
        )
    )]
    pub fn build(&self) -> Result<Url> {
        for (name, _) in &self.custom {
            validate_custom_name(name)?;
        }

        let security_key = SecurityKey::for_request(self.merchant, self.order);

        let mut url = self.origin.clone();
        url.set_path(&self.path());
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("MerchantId", &self.merchant.merchant_id().to_string())
                .append_pair("OrderId", self.order.order_id())
                .append_pair("Amount", &format_amount(self.order.amount()))
                .append_pair("Currency", &self.order.currency().to_ascii_uppercase());
            if let Some(valid_until) = self.order.valid_until() {
                query.append_pair("ValidUntil", &format_timestamp(&valid_until));
            }
            if let Some(description) = self.order.description().filter(|d| !d.is_empty()) {
                query.append_pair("OrderDescription", description);
            }
            query.append_pair("SecurityKey", security_key.as_str());
            if let Some(return_url) = &self.redirect.return_url {
                query.append_pair("ReturnUrl", return_url.as_str());
            }
            if let Some(fail_url) = &self.redirect.fail_url {
                query.append_pair("FailUrl", fail_url.as_str());
            }
            query.extend_pairs(&self.custom);
        }

        debug!(path = url.path(), custom_params = self.custom.len(), "Payment URL built");
        Ok(url)
    }
}

/// Parses and checks a provider origin.
pub(crate) fn parse_origin(origin: &str) -> Result<Url> {
    let url = Url::parse(origin).map_err(|e| {
        FormError::InvalidArgument(format!("invalid processing URL '{origin}': {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FormError::InvalidArgument(format!(
            "processing URL must use HTTP(S), got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(FormError::InvalidArgument(format!("processing URL missing host: {origin}")));
    }

    Ok(url)
}

fn validate_custom_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FormError::InvalidArgument(
            "custom parameter name must not be empty".to_owned(),
        ));
    }

    if RESERVED_PARAMS.iter().any(|reserved| reserved.eq_ignore_ascii_case(name)) {
        return Err(FormError::InvalidArgument(format!(
            "custom parameter '{name}' collides with a protocol parameter"
        )));
    }

    Ok(())
}
