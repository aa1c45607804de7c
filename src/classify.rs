//! Issuer classification over the ordered catalog.
//!
//! Classification is first-match-wins under the catalog's declaration
//! order, not longest-match: a number matching both a narrow debit
//! pattern and its parent credit pattern classifies as whichever entry
//! comes first.

use crate::catalog::Catalog;

/// Strips every character that is not an ASCII digit.
///
/// The same normalization is applied everywhere a raw number is
/// compared, so classification and final number validation always see
/// the same digit string.
///
/// # Example
///
/// ```
/// use cardcheck::classify::normalize;
///
/// assert_eq!(normalize(" 4111-1111 1111 1111"), "4111111111111111");
/// assert_eq!(normalize("4111111111111111"), "4111111111111111");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Determines the issuer of a raw card number, if any.
///
/// The number is normalized, then the catalog is scanned in declaration
/// order and the first fully-matching entry's name is returned. Pure
/// and idempotent: re-classifying an already-normalized number gives
/// the same answer.
///
/// # Example
///
/// ```
/// use cardcheck::catalog::{issuer, Catalog};
/// use cardcheck::classify::classify;
///
/// let catalog = Catalog::builtin();
/// assert_eq!(classify("4111 1111 1111 1111", catalog), Some(issuer::VISA));
/// // Electron is declared before Visa, so its narrower pattern wins
/// assert_eq!(classify("4026000000000000", catalog), Some(issuer::ELECTRON));
/// assert_eq!(classify("0000000000000000", catalog), None);
/// ```
pub fn classify<'a>(raw: &str, catalog: &'a Catalog) -> Option<&'a str> {
    let number = normalize(raw);
    catalog
        .iter()
        .find(|(_, spec)| spec.matches(&number))
        .map(|(name, _)| name)
}
