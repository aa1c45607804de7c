//! Per-call validation input.
//!
//! A [`ValidationRequest`] is built once at call entry and threaded
//! through the pipeline unchanged; no state survives the call. The card
//! number and CVV are zeroized when the request is dropped, and `Debug`
//! masks them, so request values are safe to log.

use crate::mask::mask_number;
use std::fmt;
use zeroize::Zeroize;

/// The input to one validation call.
///
/// Check flags (`check_holder`, `check_expiry`, `check_cvv`) and
/// behavior flags (`normalize_number`, `detect_issuer`,
/// `persist_issuer`) all default to on; disable the ones a given
/// form does not collect.
///
/// # Example
///
/// ```
/// use cardcheck::ValidationRequest;
///
/// let request = ValidationRequest::new("4111-1111-1111-1111")
///     .holder("John Smith")
///     .expiry(11, 2030)
///     .cvv("123");
/// assert_eq!(request.raw_number(), "4111-1111-1111-1111");
/// ```
#[derive(Clone)]
pub struct ValidationRequest {
    number: String,
    issuer: Option<String>,
    holder: Option<String>,
    expiry_month: Option<i32>,
    expiry_year: Option<i32>,
    cvv: Option<String>,
    check_holder: bool,
    check_expiry: bool,
    check_cvv: bool,
    normalize_number: bool,
    detect_issuer: bool,
    persist_issuer: bool,
}

impl ValidationRequest {
    /// Starts a request for a raw card number. Separators are fine;
    /// the pipeline normalizes before matching.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            issuer: None,
            holder: None,
            expiry_month: None,
            expiry_year: None,
            cvv: None,
            check_holder: true,
            check_expiry: true,
            check_cvv: true,
            normalize_number: true,
            detect_issuer: true,
            persist_issuer: true,
        }
    }

    /// Sets an explicit issuer, bypassing auto-detection.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the card holder name.
    pub fn holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = Some(holder.into());
        self
    }

    /// Sets the expiry month and year.
    pub fn expiry(self, month: i32, year: i32) -> Self {
        self.expiry_month(month).expiry_year(year)
    }

    /// Sets the expiry month.
    pub fn expiry_month(mut self, month: i32) -> Self {
        self.expiry_month = Some(month);
        self
    }

    /// Sets the expiry year.
    pub fn expiry_year(mut self, year: i32) -> Self {
        self.expiry_year = Some(year);
        self
    }

    /// Sets the CVV.
    pub fn cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = Some(cvv.into());
        self
    }

    /// Enables or disables the holder-name check.
    pub fn check_holder(mut self, enabled: bool) -> Self {
        self.check_holder = enabled;
        self
    }

    /// Enables or disables the expiry check.
    pub fn check_expiry(mut self, enabled: bool) -> Self {
        self.check_expiry = enabled;
        self
    }

    /// Enables or disables the CVV check.
    pub fn check_cvv(mut self, enabled: bool) -> Self {
        self.check_cvv = enabled;
        self
    }

    /// Whether a successful result should carry the normalized number
    /// for the caller to write back.
    pub fn normalize_number(mut self, enabled: bool) -> Self {
        self.normalize_number = enabled;
        self
    }

    /// Whether to auto-detect the issuer when no explicit issuer is set.
    pub fn detect_issuer(mut self, enabled: bool) -> Self {
        self.detect_issuer = enabled;
        self
    }

    /// Whether a successful result should carry the detected issuer for
    /// the caller to persist.
    pub fn persist_issuer(mut self, enabled: bool) -> Self {
        self.persist_issuer = enabled;
        self
    }

    /// The raw card number as supplied.
    pub fn raw_number(&self) -> &str {
        &self.number
    }

    /// The explicit issuer override, if any.
    pub fn issuer_override(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// The holder name, if supplied.
    pub fn holder_value(&self) -> Option<&str> {
        self.holder.as_deref()
    }

    /// The expiry month, if supplied.
    pub fn expiry_month_value(&self) -> Option<i32> {
        self.expiry_month
    }

    /// The expiry year, if supplied.
    pub fn expiry_year_value(&self) -> Option<i32> {
        self.expiry_year
    }

    /// The CVV, if supplied.
    pub fn cvv_value(&self) -> Option<&str> {
        self.cvv.as_deref()
    }

    pub(crate) fn holder_check_enabled(&self) -> bool {
        self.check_holder
    }

    pub(crate) fn expiry_check_enabled(&self) -> bool {
        self.check_expiry
    }

    pub(crate) fn cvv_check_enabled(&self) -> bool {
        self.check_cvv
    }

    pub(crate) fn wants_normalized_number(&self) -> bool {
        self.normalize_number
    }

    pub(crate) fn detection_enabled(&self) -> bool {
        self.detect_issuer
    }

    pub(crate) fn wants_detected_issuer(&self) -> bool {
        self.persist_issuer
    }
}

impl fmt::Debug for ValidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Mask card data so request values are safe in logs
        f.debug_struct("ValidationRequest")
            .field("number", &mask_number(&self.number))
            .field("issuer", &self.issuer)
            .field("holder", &self.holder)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &self.cvv.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Drop for ValidationRequest {
    fn drop(&mut self) {
        self.number.zeroize();
        if let Some(cvv) = self.cvv.as_mut() {
            cvv.zeroize();
        }
    }
}
