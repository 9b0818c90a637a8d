//! Payment method and form language selectors.
//!
//! Both map to URL path segments of the hosted payment form:
//!
//! ```text
//! <origin>[/<lang>]/payment[/select[/<method>]]
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Payment method presented to the payer on the hosted form.
///
/// Serialized as its configuration code (`card`, `select`, `qiwi`, `paymaster`,
/// `yandexmoney`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PaymentMethod {
    /// Bank card form.
    #[default]
    Card,
    /// Method selection page.
    Select,
    /// QIWI wallet.
    Qiwi,
    /// PayMaster.
    PayMaster,
    /// Yandex.Money wallet.
    YandexMoney,
}

impl PaymentMethod {
    /// All supported methods.
    pub const ALL: [Self; 5] =
        [Self::Card, Self::Select, Self::Qiwi, Self::PayMaster, Self::YandexMoney];

    /// Returns the URL path of the form for this method.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Card => "/payment",
            Self::Select => "/payment/select",
            Self::Qiwi => "/payment/select/qiwi",
            Self::PayMaster => "/payment/select/paymaster",
            Self::YandexMoney => "/payment/select/yandexmoney",
        }
    }

    /// Returns the configuration code of this method.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Select => "select",
            Self::Qiwi => "qiwi",
            Self::PayMaster => "paymaster",
            Self::YandexMoney => "yandexmoney",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = FormError;

    /// Parses a method code, ignoring ASCII case.
    ///
    /// Unknown codes fail with [`FormError::NotSupported`].
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::NotSupported(format!("payment method '{s}'")))
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = FormError;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(method: PaymentMethod) -> Self {
        method.code()
    }
}

/// Language of the hosted payment form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Language {
    /// Provider default language, served without a path prefix.
    #[default]
    Russian,
    /// English, served under `/en`.
    English,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 2] = [Self::Russian, Self::English];

    /// Returns the path prefix placed before the payment method path.
    #[must_use]
    pub const fn path_prefix(&self) -> &'static str {
        match self {
            Self::Russian => "",
            Self::English => "/en",
        }
    }

    /// Returns the ISO 639-1 code of this language.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FormError;

    /// Parses an ISO 639-1 code, ignoring ASCII case.
    ///
    /// Unknown codes fail with [`FormError::NotSupported`].
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::NotSupported(format!("form language '{s}'")))
    }
}

impl TryFrom<String> for Language {
    type Error = FormError;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

impl From<Language> for &'static str {
    fn from(language: Language) -> Self {
        language.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_paths() {
        assert_eq!(PaymentMethod::Card.path(), "/payment");
        assert_eq!(PaymentMethod::Select.path(), "/payment/select");
        assert_eq!(PaymentMethod::Qiwi.path(), "/payment/select/qiwi");
        assert_eq!(PaymentMethod::PayMaster.path(), "/payment/select/paymaster");
        assert_eq!(PaymentMethod::YandexMoney.path(), "/payment/select/yandexmoney");
    }

    #[test]
    fn test_payment_method_code_roundtrip() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_eq!("QIWI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qiwi);
    }

    #[test]
    fn test_unknown_payment_method_not_supported() {
        let result = "paypal".parse::<PaymentMethod>();
        assert!(matches!(result, Err(FormError::NotSupported(_))));
    }

    #[test]
    fn test_language_prefixes() {
        assert_eq!(Language::Russian.path_prefix(), "");
        assert_eq!(Language::English.path_prefix(), "/en");
        assert_eq!(Language::default(), Language::Russian);
    }

    #[test]
    fn test_unknown_language_not_supported() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!(matches!("de".parse::<Language>(), Err(FormError::NotSupported(_))));
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&PaymentMethod::YandexMoney).unwrap(), "\"yandexmoney\"");
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");

        let method: PaymentMethod = serde_json::from_str("\"PayMaster\"").unwrap();
        assert_eq!(method, PaymentMethod::PayMaster);
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
    }
}
