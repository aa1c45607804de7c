//! Failure kinds produced by the validation pipeline.
//!
//! Each pipeline stage has exactly one failure kind, carrying the
//! offending value(s) for message interpolation and naming the model
//! field(s) to blame. Rendering a localized message is the caller's
//! concern; `Display` provides the default English template.

use std::fmt;

/// The model fields a validation failure can implicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The card number field.
    Number,
    /// The card holder name field.
    Holder,
    /// The expiry month field.
    ExpiryMonth,
    /// The expiry year field.
    ExpiryYear,
    /// The CVV field.
    Cvv,
}

impl Field {
    /// The canonical attribute name for this field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Holder => "holder",
            Self::ExpiryMonth => "expiryMonth",
            Self::ExpiryYear => "expiryYear",
            Self::Cvv => "cvv",
        }
    }
}

/// A validation failure: one kind per pipeline stage.
///
/// The pipeline short-circuits, so a single call yields at most one
/// failure; earlier stages mask later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// No issuer was resolved, or the resolved issuer is not in the
    /// active catalog.
    UnsupportedCard {
        /// The normalized card number.
        number: String,
    },

    /// The number failed its issuer's pattern or checksum.
    InvalidNumber {
        /// The normalized card number.
        number: String,
    },

    /// The holder name is empty or fails the holder pattern.
    InvalidHolder {
        /// The holder name as supplied.
        holder: String,
    },

    /// The expiry month/year pair is malformed, not strictly in the
    /// future, or beyond the ten-year window.
    InvalidExpiry {
        /// The expiry month, if one parsed.
        month: Option<i32>,
        /// The expiry year, if one parsed.
        year: Option<i32>,
    },

    /// The CVV is empty, non-numeric, or has a length the issuer does
    /// not accept.
    InvalidCvv {
        /// The CVV as supplied.
        cvv: String,
    },
}

impl ValidationFailure {
    /// The field(s) to blame for this failure.
    ///
    /// Expiry failures implicate the month and year fields jointly;
    /// every other kind implicates a single field.
    pub const fn fields(&self) -> &'static [Field] {
        match self {
            Self::UnsupportedCard { .. } | Self::InvalidNumber { .. } => &[Field::Number],
            Self::InvalidHolder { .. } => &[Field::Holder],
            Self::InvalidExpiry { .. } => &[Field::ExpiryMonth, Field::ExpiryYear],
            Self::InvalidCvv { .. } => &[Field::Cvv],
        }
    }

    /// Renders the expiry value the way messages show it: `month/year`,
    /// with missing parts left blank.
    fn expiry_display(month: Option<i32>, year: Option<i32>) -> String {
        let month = month.map(|m| m.to_string()).unwrap_or_default();
        let year = year.map(|y| y.to_string()).unwrap_or_default();
        format!("{}/{}", month, year)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCard { number } => {
                write!(f, "unsupported card number \"{}\"", number)
            }
            Self::InvalidNumber { number } => {
                write!(f, "\"{}\" is not a valid card number", number)
            }
            Self::InvalidHolder { holder } => {
                write!(f, "invalid holder name \"{}\"", holder)
            }
            Self::InvalidExpiry { month, year } => {
                write!(
                    f,
                    "invalid expiry month/year \"{}\"",
                    Self::expiry_display(*month, *year)
                )
            }
            Self::InvalidCvv { cvv } => {
                write!(f, "invalid CVV \"{}\"", cvv)
            }
        }
    }
}

impl std::error::Error for ValidationFailure {}
