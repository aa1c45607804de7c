//! Masking helpers so card data never reaches logs in full.

/// Masks all but the last four characters of a card number.
///
/// Inputs of four characters or fewer are fully masked.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_number;
///
/// assert_eq!(mask_number("4111111111111111"), "************1111");
/// assert_eq!(mask_number("411"), "***");
/// ```
pub fn mask_number(number: &str) -> String {
    let len = number.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let visible: String = number.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), visible)
}
