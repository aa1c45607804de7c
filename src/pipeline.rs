//! Validation pipeline: issuer resolution, number check, secondary checks.
//!
//! The stages run in a fixed order and short-circuit on the first
//! failure; no call accumulates multiple errors. The order is load
//! bearing: issuer resolution gates every later stage (the CVV rules
//! come from the resolved spec), and a malformed number is reported
//! even when holder, expiry, and CVV are also bad.

use crate::catalog::Catalog;
use crate::checks::{self, YearMonth, DEFAULT_HOLDER_PATTERN};
use crate::classify;
use crate::error::ValidationFailure;
use crate::number::validate_number;
use crate::request::ValidationRequest;
use regex::Regex;

/// A successful validation.
///
/// Carries the values the caller may want to write back: the normalized
/// number (when the request asked for normalization) and the detected
/// issuer (when detection ran and the request asked to persist it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    number: Option<String>,
    issuer: Option<String>,
}

impl Validated {
    /// The normalized card number, if the request asked for it.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// The auto-detected issuer, if detection ran and the request asked
    /// to persist it.
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }
}

/// A configured validation pipeline.
///
/// Built once per configuration (the allow-list is applied at
/// construction) and read-only afterwards, so one pipeline can serve
/// concurrent calls without coordination.
///
/// # Example
///
/// ```
/// use cardcheck::{Pipeline, ValidationRequest};
///
/// let pipeline = Pipeline::new();
/// let request = ValidationRequest::new("4111-1111-1111-1111")
///     .holder("John Smith")
///     .expiry(11, 2030)
///     .cvv("123");
/// let validated = pipeline.validate(&request).unwrap();
/// assert_eq!(validated.number(), Some("4111111111111111"));
/// assert_eq!(validated.issuer(), Some("Visa"));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: Catalog,
    holder_pattern: Regex,
}

impl Pipeline {
    /// A pipeline over the full built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin().clone())
    }

    /// A pipeline over the built-in catalog restricted to an allow-list.
    ///
    /// Unknown names are skipped, not rejected; an empty list allows
    /// everything.
    pub fn allowing(allowed: &[&str]) -> Self {
        Self::with_catalog(Catalog::builtin().restrict(allowed))
    }

    /// A pipeline over an explicit catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            holder_pattern: DEFAULT_HOLDER_PATTERN.clone(),
        }
    }

    /// Replaces the holder-name pattern.
    pub fn holder_pattern(mut self, pattern: Regex) -> Self {
        self.holder_pattern = pattern;
        self
    }

    /// The active catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validates a request against the system clock.
    pub fn validate(&self, request: &ValidationRequest) -> Result<Validated, ValidationFailure> {
        self.validate_at(request, YearMonth::now())
    }

    /// Validates a request with an explicit notion of "now" for the
    /// expiry window.
    pub fn validate_at(
        &self,
        request: &ValidationRequest,
        now: YearMonth,
    ) -> Result<Validated, ValidationFailure> {
        let number = classify::normalize(request.raw_number());

        // Stage 1: resolve the issuer. An explicit override wins;
        // otherwise classify, if detection is enabled.
        let (issuer, detected) = match request.issuer_override() {
            Some(name) => (Some(name), false),
            None if request.detection_enabled() => {
                (classify::classify(&number, &self.catalog), true)
            }
            None => (None, false),
        };
        let issuer = issuer.ok_or_else(|| ValidationFailure::UnsupportedCard {
            number: number.clone(),
        })?;
        let spec = self
            .catalog
            .lookup(issuer)
            .ok_or_else(|| ValidationFailure::UnsupportedCard {
                number: number.clone(),
            })?;

        // Stage 2: pattern plus conditional Luhn.
        if !validate_number(&number, spec) {
            return Err(ValidationFailure::InvalidNumber { number });
        }

        // Stages 3-5: secondary checks, each gated by its flag.
        if request.holder_check_enabled() {
            let holder = request.holder_value().unwrap_or("");
            if !checks::is_valid_holder(holder, &self.holder_pattern) {
                return Err(ValidationFailure::InvalidHolder {
                    holder: holder.to_string(),
                });
            }
        }

        if request.expiry_check_enabled() {
            let month = request.expiry_month_value();
            let year = request.expiry_year_value();
            let valid = match (month, year) {
                (Some(m), Some(y)) => checks::is_valid_expiry(m, y, now),
                _ => false,
            };
            if !valid {
                return Err(ValidationFailure::InvalidExpiry { month, year });
            }
        }

        if request.cvv_check_enabled() {
            let cvv = request.cvv_value().unwrap_or("");
            if !checks::is_valid_cvv(cvv, spec.cvv_lengths()) {
                return Err(ValidationFailure::InvalidCvv {
                    cvv: cvv.to_string(),
                });
            }
        }

        Ok(Validated {
            number: request.wants_normalized_number().then_some(number),
            issuer: (detected && request.wants_detected_issuer()).then(|| issuer.to_string()),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::issuer;
    use crate::error::Field;

    const NOW: YearMonth = YearMonth {
        year: 2024,
        month: 6,
    };

    fn full_request(number: &str) -> ValidationRequest {
        ValidationRequest::new(number)
            .holder("John Smith")
            .expiry(11, 2030)
            .cvv("123")
    }

    #[test]
    fn test_happy_path() {
        let pipeline = Pipeline::new();
        let validated = pipeline
            .validate_at(&full_request("4111-1111-1111-1111"), NOW)
            .unwrap();
        assert_eq!(validated.number(), Some("4111111111111111"));
        assert_eq!(validated.issuer(), Some(issuer::VISA));
    }

    #[test]
    fn test_explicit_issuer_override() {
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111111").issuer(issuer::VISA);
        let validated = pipeline.validate_at(&request, NOW).unwrap();
        // Override means nothing was detected, so nothing to persist
        assert_eq!(validated.issuer(), None);
    }

    #[test]
    fn test_unknown_override_is_unsupported() {
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111111").issuer("Obscure Card");
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert!(matches!(err, ValidationFailure::UnsupportedCard { .. }));
    }

    #[test]
    fn test_detection_disabled_without_override() {
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111111").detect_issuer(false);
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert!(matches!(err, ValidationFailure::UnsupportedCard { .. }));
    }

    #[test]
    fn test_unclassifiable_number() {
        let pipeline = Pipeline::new();
        let err = pipeline
            .validate_at(&full_request("0000000000000000"), NOW)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::UnsupportedCard {
                number: "0000000000000000".to_string()
            }
        );
    }

    #[test]
    fn test_checksum_failure_with_override() {
        // Classification would fail this number, but an override forces
        // the Visa spec and the checksum rejects it.
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111112").issuer(issuer::VISA);
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::InvalidNumber {
                number: "4111111111111112".to_string()
            }
        );
    }

    #[test]
    fn test_holder_failure() {
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111111").holder("J0hn");
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::InvalidHolder {
                holder: "J0hn".to_string()
            }
        );
        assert_eq!(err.fields(), &[Field::Holder]);
    }

    #[test]
    fn test_missing_holder_fails_when_checked() {
        let pipeline = Pipeline::new();
        let request = ValidationRequest::new("4111111111111111")
            .expiry(11, 2030)
            .cvv("123");
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert!(matches!(err, ValidationFailure::InvalidHolder { .. }));
    }

    #[test]
    fn test_expiry_failure_implicates_both_fields() {
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111111").expiry(5, 2024);
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::InvalidExpiry {
                month: Some(5),
                year: Some(2024)
            }
        );
        assert_eq!(err.fields(), &[Field::ExpiryMonth, Field::ExpiryYear]);
    }

    #[test]
    fn test_missing_expiry_fails_when_checked() {
        let pipeline = Pipeline::new();
        let request = ValidationRequest::new("4111111111111111")
            .holder("John Smith")
            .cvv("123");
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::InvalidExpiry {
                month: None,
                year: None
            }
        );
    }

    #[test]
    fn test_cvv_failure_uses_issuer_lengths() {
        let pipeline = Pipeline::new();

        // Amex accepts 3 or 4 digits
        let amex = ValidationRequest::new("378282246310005")
            .holder("John Smith")
            .expiry(11, 2030)
            .cvv("1234");
        assert!(pipeline.validate_at(&amex, NOW).is_ok());

        // Visa accepts only 3
        let visa = full_request("4111111111111111").cvv("1234");
        let err = pipeline.validate_at(&visa, NOW).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::InvalidCvv {
                cvv: "1234".to_string()
            }
        );
    }

    #[test]
    fn test_short_circuit_number_before_cvv() {
        // Both the number and the CVV are bad; the number failure wins.
        let pipeline = Pipeline::new();
        let request = full_request("4111111111111112")
            .issuer(issuer::VISA)
            .cvv("1");
        let err = pipeline.validate_at(&request, NOW).unwrap_err();
        assert!(matches!(err, ValidationFailure::InvalidNumber { .. }));
    }

    #[test]
    fn test_disabled_checks_are_skipped() {
        let pipeline = Pipeline::new();
        let request = ValidationRequest::new("4111111111111111")
            .check_holder(false)
            .check_expiry(false)
            .check_cvv(false);
        assert!(pipeline.validate_at(&request, NOW).is_ok());
    }

    #[test]
    fn test_behavior_flags_control_result_payload() {
        let pipeline = Pipeline::new();
        let request = full_request("4111-1111-1111-1111")
            .normalize_number(false)
            .persist_issuer(false);
        let validated = pipeline.validate_at(&request, NOW).unwrap();
        assert_eq!(validated.number(), None);
        assert_eq!(validated.issuer(), None);
    }

    #[test]
    fn test_allow_list_blocks_other_issuers() {
        let pipeline = Pipeline::allowing(&[issuer::MASTERCARD]);
        let err = pipeline
            .validate_at(&full_request("4111111111111111"), NOW)
            .unwrap_err();
        assert!(matches!(err, ValidationFailure::UnsupportedCard { .. }));

        let mastercard = full_request("5500000000000004");
        assert!(pipeline.validate_at(&mastercard, NOW).is_ok());
    }

    #[test]
    fn test_luhn_exempt_issuer() {
        // UnionPay has luhn = false; a pattern match suffices.
        let pipeline = Pipeline::new();
        let request = full_request("6212345678901234");
        let validated = pipeline.validate_at(&request, NOW).unwrap();
        assert_eq!(validated.issuer(), Some(issuer::UNIONPAY));
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
        assert_send_sync::<Validated>();
        assert_send_sync::<ValidationRequest>();
    }
}
