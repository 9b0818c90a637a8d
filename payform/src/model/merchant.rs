//! Merchant account credentials.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroize;

use crate::error::{FormError, Result};

/// Merchant private security key shared with the payment provider.
///
/// The key never appears in `Debug` output and its memory is zeroized on drop.
/// It is only readable inside the crate, where it is appended to canonical
/// security key strings.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Wraps a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if the key is empty or whitespace only.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = Self(key.into());
        if key.is_blank() {
            return Err(FormError::InvalidArgument(
                "merchant private key must not be empty".to_owned(),
            ));
        }
        Ok(key)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(***)")
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Merchant account registered with the payment provider.
///
/// Created once at configuration time and used read-only by every security key
/// computation and payment URL build.
///
/// # Examples
///
/// ```
/// use payform::model::MerchantAccount;
///
/// let merchant = MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22")?;
/// assert_eq!(merchant.merchant_id(), 12345);
/// assert!(!format!("{merchant:?}").contains("3844908d"));
/// # Ok::<(), payform::FormError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantAccount {
    merchant_id: u32,
    private_key: PrivateKey,
}

impl MerchantAccount {
    /// Creates a merchant account.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if `private_key` is empty or whitespace only.
    pub fn new(merchant_id: u32, private_key: impl Into<String>) -> Result<Self> {
        Ok(Self { merchant_id, private_key: PrivateKey::new(private_key)? })
    }

    /// Creates a merchant account from an already wrapped key.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidArgument`] if the key is blank.
    pub fn with_key(merchant_id: u32, private_key: PrivateKey) -> Result<Self> {
        if private_key.is_blank() {
            return Err(FormError::InvalidArgument(
                "merchant private key must not be empty".to_owned(),
            ));
        }
        Ok(Self { merchant_id, private_key })
    }

    /// Returns the provider-assigned merchant id.
    #[must_use]
    pub const fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    pub(crate) const fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}
