//! 3-D Secure indicators reported in callbacks.
//!
//! Both decoders are total: codes the provider may introduce later fall back to
//! the default variant instead of failing the callback.

use serde::Serialize;

/// Which party bears fraud liability for the transaction (wire field `ECI`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityShift {
    /// No indicator, or an unrecognized code.
    #[default]
    None,
    /// Full 3-D Secure authentication (`5`).
    FullThreeDs,
    /// Issuer liable without full 3-D Secure (`6`).
    IssuerResponsibleNonFullThreeDs,
    /// Merchant liable (`7`).
    MerchantResponsible,
}

impl LiabilityShift {
    /// Decodes the provider `ECI` code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "5" => Self::FullThreeDs,
            "6" => Self::IssuerResponsibleNonFullThreeDs,
            "7" => Self::MerchantResponsible,
            _ => Self::None,
        }
    }
}

/// Whether the card is enrolled in 3-D Secure (wire field `ThreedsEnrollment`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Not reported, or an unrecognized code.
    #[default]
    Unknown,
    /// Enrolled (`1`).
    Enrolled,
    /// Not enrolled (`0`).
    NotEnrolled,
    /// Directory server unavailable (`2`).
    Unavailable,
}

impl EnrollmentStatus {
    /// Decodes the provider `ThreedsEnrollment` code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Enrolled,
            "0" => Self::NotEnrolled,
            "2" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}
