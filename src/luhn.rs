//! Luhn checksum (the "modulus 10" algorithm) used by most card
//! numbering schemes to catch single-digit and transposition errors.
//!
//! The doubling step uses a lookup table rather than branching on the
//! doubled value in the inner loop.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence with the Luhn algorithm.
///
/// Walking right to left, every second digit (positions 1, 3, 5, ...
/// counted from the check digit) is doubled, with 9 subtracted from
/// doubled values above 9; the number is valid iff the digit sum is
/// divisible by 10. Empty input is invalid.
///
/// # Example
///
/// ```
/// use cardcheck::luhn;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(luhn::validate(&digits));
///
/// let flipped = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!luhn::validate(&flipped));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }
    checksum(digits) % 10 == 0
}

/// Computes the raw Luhn sum (not reduced modulo 10) for a digit
/// sequence, the rightmost digit being position 0 (never doubled).
#[inline]
pub fn checksum(digits: &[u8]) -> u32 {
    let len = digits.len();
    let mut sum: u32 = 0;
    let mut i = 0;
    while i < len {
        let digit = digits[len - 1 - i];
        if i % 2 == 1 {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        i += 1;
    }
    sum
}

/// Validates an already-normalized ASCII digit string.
///
/// Behavior on non-digit characters is undefined by contract; callers
/// strip separators first (see [`crate::classify::normalize`]). This
/// implementation treats any such input as invalid.
///
/// # Example
///
/// ```
/// use cardcheck::luhn;
///
/// assert!(luhn::validate_str("4532015112830366"));
/// assert!(!luhn::validate_str("4532015112830367"));
/// ```
pub fn validate_str(digits: &str) -> bool {
    let mut buf = Vec::with_capacity(digits.len());
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return false;
        }
        buf.push(b - b'0');
    }
    validate(&buf)
}

/// Computes the check digit that makes `digits` followed by it pass
/// Luhn validation.
///
/// Every digit we already have sits one position further left once the
/// check digit is appended, so the doubling parity is shifted by one
/// relative to [`checksum`].
///
/// # Example
///
/// ```
/// use cardcheck::luhn;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(luhn::check_digit(&partial), 1);
/// ```
#[inline]
pub fn check_digit(digits: &[u8]) -> u8 {
    let len = digits.len();
    let mut sum: u32 = 0;
    let mut i = 0;
    while i < len {
        let digit = digits[len - 1 - i];
        // Final position will be i + 1, so parity is inverted.
        if i % 2 == 0 {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        i += 1;
    }
    ((10 - (sum % 10)) % 10) as u8
}
