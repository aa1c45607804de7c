//! Number validation against a resolved issuer spec.

use crate::catalog::CardSpec;
use crate::luhn;

/// Validates a normalized card number against an issuer spec.
///
/// The number must fully match the issuer's pattern, and additionally
/// pass the Luhn checksum when the spec requires it. Issuers with
/// `requires_luhn` unset skip the checksum entirely (some card families
/// use other check-digit schemes, or the entry simply doesn't enforce
/// one).
///
/// `number` must already be normalized; see
/// [`crate::classify::normalize`].
///
/// # Example
///
/// ```
/// use cardcheck::catalog::{issuer, Catalog};
/// use cardcheck::number::validate_number;
///
/// let visa = Catalog::builtin().lookup(issuer::VISA).unwrap();
/// assert!(validate_number("4111111111111111", visa));
/// // Pattern matches but the checksum fails
/// assert!(!validate_number("4111111111111112", visa));
/// ```
pub fn validate_number(number: &str, spec: &CardSpec) -> bool {
    if !spec.matches(number) {
        return false;
    }
    !spec.requires_luhn() || luhn::validate_str(number)
}
