//! TOML configuration for a merchant integration.
//!
//! ```toml
//! merchant_id = 12345
//! processing_url = "https://secure.payonlinesystem.com"
//! private_key_env = "PAYFORM_PRIVATE_KEY"
//! language = "en"
//! payment_method = "select"
//!
//! [redirect]
//! return_url = "https://shop.example.com/paid"
//! fail_url = "https://shop.example.com/failed"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{
    callback::CallbackVerifier,
    error::{FormError, Result},
    model::{Language, MerchantAccount, Order, PaymentMethod, PrivateKey, RedirectTargets},
    redirect::{PaymentUrlBuilder, builder::parse_origin},
};

/// Merchant integration settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Merchant id issued by the provider.
    pub merchant_id: u32,

    /// Provider origin, e.g. `https://secure.payonlinesystem.com`.
    pub processing_url: String,

    /// Private security key given inline.
    #[serde(default)]
    pub private_key: Option<PrivateKey>,

    /// Name of the environment variable holding the private security key.
    #[serde(default)]
    pub private_key_env: Option<String>,

    /// Default form language code (`ru`, `en`).
    #[serde(default)]
    pub language: Option<String>,

    /// Default payment method code (`card`, `select`, `qiwi`, `paymaster`, `yandexmoney`).
    #[serde(default)]
    pub payment_method: Option<String>,

    /// Where the payer lands after the payment.
    #[serde(default)]
    pub redirect: RedirectConfig,
}

/// `[redirect]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectConfig {
    /// Page shown after a successful payment.
    pub return_url: Option<Url>,
    /// Page shown after a failed payment.
    pub fail_url: Option<Url>,
}

impl FormConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] if the TOML is invalid or validation fails,
    /// and [`FormError::NotSupported`] for unknown language or payment method codes.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| FormError::ConfigError(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormError::ConfigError(format!("cannot read config file '{}': {e}", path.display()))
        })?;
        debug!(path = %path.display(), "Loading payment form config");
        Self::from_toml(&content)
    }

    /// Checks the configuration for mistakes.
    ///
    /// This method checks for:
    /// - Processing URL must be HTTPS with a host
    /// - Processing URL must not be localhost or loopback addresses
    /// - Exactly one of `private_key` and `private_key_env` is set
    /// - Environment variable name is alphanumeric
    /// - Language and payment method codes are known
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] if any check fails, or
    /// [`FormError::NotSupported`] for unknown codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use payform::config::FormConfig;
    ///
    /// let config = FormConfig::from_toml(
    ///     r#"
    ///     merchant_id = 12345
    ///     processing_url = "https://secure.payonlinesystem.com"
    ///     private_key = "3844908d-4c2a-42e1-9be0-91bb5d068d22"
    ///     "#,
    /// );
    /// assert!(config.is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.validate_processing_url()?;

        match (&self.private_key, &self.private_key_env) {
            (Some(_), Some(_)) => {
                return Err(FormError::ConfigError(
                    "set only one of private_key and private_key_env".to_owned(),
                ));
            }
            (None, None) => {
                return Err(FormError::ConfigError(
                    "one of private_key or private_key_env is required".to_owned(),
                ));
            }
            (Some(key), None) if key.is_blank() => {
                return Err(FormError::ConfigError("private_key must not be empty".to_owned()));
            }
            (None, Some(name)) => validate_env_var_name(name)?,
            (Some(_), None) => {}
        }

        self.language()?;
        self.payment_method()?;
        Ok(())
    }

    fn validate_processing_url(&self) -> Result<()> {
        let url = parse_origin(&self.processing_url).map_err(|e| match e {
            FormError::InvalidArgument(reason) => FormError::ConfigError(reason),
            other => other,
        })?;

        if url.scheme() != "https" {
            return Err(FormError::ConfigError(format!(
                "processing_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str() {
            let host_lower = host.to_lowercase();
            if host_lower == "localhost"
                || host_lower.starts_with("127.")
                || host_lower == "[::1]"
            {
                return Err(FormError::ConfigError(format!(
                    "processing_url must not be localhost or loopback: {host}"
                )));
            }
        }

        Ok(())
    }

    /// Configured form language, [`Language::Russian`] if unset.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotSupported`] for an unknown code.
    pub fn language(&self) -> Result<Language> {
        self.language.as_deref().map_or(Ok(Language::default()), str::parse)
    }

    /// Configured payment method, [`PaymentMethod::Card`] if unset.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotSupported`] for an unknown code.
    pub fn payment_method(&self) -> Result<PaymentMethod> {
        self.payment_method.as_deref().map_or(Ok(PaymentMethod::default()), str::parse)
    }

    /// Configured redirect targets.
    #[must_use]
    pub fn redirect_targets(&self) -> RedirectTargets {
        RedirectTargets {
            return_url: self.redirect.return_url.clone(),
            fail_url: self.redirect.fail_url.clone(),
        }
    }

    /// Builds the merchant account, reading the key from the environment if configured so.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] if the key variable is unset or empty.
    pub fn merchant_account(&self) -> Result<MerchantAccount> {
        self.merchant_account_with(|name| std::env::var(name).ok())
    }

    fn merchant_account_with(
        &self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<MerchantAccount> {
        let key = match (&self.private_key, &self.private_key_env) {
            (Some(key), _) => key.clone(),
            (None, Some(name)) => {
                let value = lookup(name).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                    FormError::ConfigError(format!("environment variable {name} is not set"))
                })?;
                PrivateKey::new(value)?
            }
            (None, None) => {
                return Err(FormError::ConfigError("no private key configured".to_owned()));
            }
        };
        MerchantAccount::with_key(self.merchant_id, key)
    }

    /// Starts a redirect URL for `order` with the configured origin, language,
    /// payment method and redirect targets.
    ///
    /// # Errors
    ///
    /// Propagates origin and code errors; see [`validate`](Self::validate).
    pub fn payment_url<'a>(
        &self,
        merchant: &'a MerchantAccount,
        order: &'a Order,
    ) -> Result<PaymentUrlBuilder<'a>> {
        Ok(PaymentUrlBuilder::new(&self.processing_url, merchant, order)?
            .language(self.language()?)
            .payment_method(self.payment_method()?)
            .redirect_targets(self.redirect_targets()))
    }

    /// Creates a callback verifier for the configured merchant.
    ///
    /// # Errors
    ///
    /// See [`merchant_account`](Self::merchant_account).
    pub fn callback_verifier(&self) -> Result<CallbackVerifier> {
        Ok(CallbackVerifier::new(self.merchant_account()?))
    }
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(FormError::ConfigError(
            "environment variable name cannot be empty".to_owned(),
        ));
    };

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(FormError::ConfigError(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(FormError::ConfigError(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const INLINE: &str = r#"
        merchant_id = 12345
        processing_url = "https://secure.payonlinesystem.com"
        private_key = "3844908d-4c2a-42e1-9be0-91bb5d068d22"
    "#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = FormConfig::from_toml(INLINE).unwrap();
        assert_eq!(config.merchant_id, 12345);
        assert_eq!(config.language().unwrap(), Language::Russian);
        assert_eq!(config.payment_method().unwrap(), PaymentMethod::Card);
        assert_eq!(config.redirect_targets(), RedirectTargets::default());
        assert_eq!(config.merchant_account().unwrap().merchant_id(), 12345);
    }

    #[test]
    fn test_full_config_builds_payment_url() {
        let config = FormConfig::from_toml(
            r#"
            merchant_id = 12345
            processing_url = "https://secure.payonlinesystem.com"
            private_key = "3844908d-4c2a-42e1-9be0-91bb5d068d22"
            language = "en"
            payment_method = "select"

            [redirect]
            return_url = "http://merchant-site/return"
            fail_url = "http://merchant-site/fail"
            "#,
        )
        .unwrap();

        let merchant = config.merchant_account().unwrap();
        let order = Order::new("56789", Decimal::new(999, 2), "USD").unwrap();
        let url = config.payment_url(&merchant, &order).unwrap().build().unwrap();

        assert_eq!(url.path(), "/en/payment/select");
        assert!(url.as_str().contains("SecurityKey=56a5663a5d72fe15124396754bbcb38c"));
        assert!(url.as_str().ends_with("&FailUrl=http%3A%2F%2Fmerchant-site%2Ffail"));
    }

    #[test]
    fn test_rejects_insecure_processing_url() {
        let urls = [
            "http://secure.payonlinesystem.com",
            "https://localhost",
            "https://127.0.0.1",
            "ftp://secure.payonlinesystem.com",
        ];
        for url in urls {
            let toml = INLINE.replace("https://secure.payonlinesystem.com", url);
            let result = FormConfig::from_toml(&toml);
            assert!(matches!(result, Err(FormError::ConfigError(_))), "{url} accepted");
        }

        let toml = INLINE.replace("https://", "http://");
        match FormConfig::from_toml(&toml) {
            Err(FormError::ConfigError(reason)) => assert!(reason.contains("HTTPS"), "{reason}"),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_codes_as_not_supported() {
        let result = FormConfig::from_toml(&format!("{INLINE}\nlanguage = \"de\""));
        assert!(matches!(result, Err(FormError::NotSupported(_))));

        let result = FormConfig::from_toml(&format!("{INLINE}\npayment_method = \"webmoney\""));
        assert!(matches!(result, Err(FormError::NotSupported(_))));
    }

    #[test]
    fn test_requires_exactly_one_key_source() {
        let both = format!("{INLINE}\nprivate_key_env = \"PAYFORM_KEY\"");
        assert!(matches!(FormConfig::from_toml(&both), Err(FormError::ConfigError(_))));

        let neither = r#"
            merchant_id = 12345
            processing_url = "https://secure.payonlinesystem.com"
        "#;
        assert!(matches!(FormConfig::from_toml(neither), Err(FormError::ConfigError(_))));

        let blank = INLINE.replace("3844908d-4c2a-42e1-9be0-91bb5d068d22", "  ");
        assert!(matches!(FormConfig::from_toml(&blank), Err(FormError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_invalid_env_var_names() {
        for name in ["", "1KEY", "PAY-KEY", "KEY$"] {
            let toml = format!(
                "merchant_id = 1\nprocessing_url = \"https://pay.example.com\"\n\
                 private_key_env = \"{name}\""
            );
            let result = FormConfig::from_toml(&toml);
            assert!(matches!(result, Err(FormError::ConfigError(_))), "{name:?} accepted");
        }
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = FormConfig::from_toml(&format!("{INLINE}\nsecret = \"x\""));
        assert!(matches!(result, Err(FormError::ConfigError(_))));
    }

    #[test]
    fn test_private_key_from_environment() {
        let config = FormConfig::from_toml(
            r#"
            merchant_id = 7
            processing_url = "https://pay.example.com"
            private_key_env = "PAYFORM_TEST_KEY"
            "#,
        )
        .unwrap();

        let merchant = config
            .merchant_account_with(|name| (name == "PAYFORM_TEST_KEY").then(|| "secret".to_owned()))
            .unwrap();
        assert_eq!(merchant.merchant_id(), 7);

        let unset = config.merchant_account_with(|_| None);
        assert!(matches!(unset, Err(FormError::ConfigError(_))));

        let empty = config.merchant_account_with(|_| Some(String::new()));
        assert!(matches!(empty, Err(FormError::ConfigError(_))));
    }

    #[test]
    fn test_debug_does_not_leak_inline_key() {
        let config = FormConfig::from_toml(INLINE).unwrap();
        assert!(!format!("{config:?}").contains("3844908d"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = FormConfig::from_file("/nonexistent/payform.toml");
        assert!(matches!(result, Err(FormError::ConfigError(_))));
    }
}
