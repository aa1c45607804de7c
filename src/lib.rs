//! # cardcheck
//!
//! Credit and debit card validation: issuer classification over an
//! ordered regex catalog, Luhn checksum, and conditional holder,
//! expiry, and CVV checks, composed into a short-circuiting pipeline.
//!
//! The engine is a synchronous, stateless computation over value
//! inputs: the catalog is frozen configuration, every call reads only
//! its own request, and one pipeline serves concurrent callers without
//! coordination.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{Pipeline, ValidationRequest, ValidationFailure};
//!
//! let pipeline = Pipeline::new();
//!
//! let request = ValidationRequest::new("4111-1111-1111-1111")
//!     .holder("John Smith")
//!     .expiry(11, 2030)
//!     .cvv("123");
//! let validated = pipeline.validate(&request).unwrap();
//! assert_eq!(validated.issuer(), Some("Visa"));
//! assert_eq!(validated.number(), Some("4111111111111111"));
//!
//! // A failed checksum names the blamed field and carries the value
//! let bad = ValidationRequest::new("4111-1111-1111-1112").check_holder(false);
//! let err = pipeline.validate(&bad).unwrap_err();
//! assert!(matches!(err, ValidationFailure::InvalidNumber { .. }));
//! ```
//!
//! ## Allow-lists
//!
//! ```rust
//! use cardcheck::catalog::issuer;
//! use cardcheck::{Pipeline, ValidationRequest};
//!
//! // Only accept Visa and Mastercard
//! let pipeline = Pipeline::allowing(&[issuer::VISA, issuer::MASTERCARD]);
//! let amex = ValidationRequest::new("378282246310005");
//! assert!(pipeline.validate(&amex).is_err());
//! ```
//!
//! ## Model adapter
//!
//! Frameworks hold attribute values in a model; [`model::ModelValidator`]
//! maps a `field name -> value` view onto the pipeline and hands back
//! either write-back values (normalized number, detected issuer) or one
//! error per implicated field.
//!
//! ## Client mirror
//!
//! A companion script (typically in-browser) re-runs classification and
//! the Luhn check against a serialized copy of the active catalog;
//! [`catalog::Catalog::to_wire_json`] produces that payload, keyed by
//! issuer name with `{pattern, cvvLength, luhn}` entries in catalog
//! order.
//!
//! ## Built-in issuers
//!
//! | Issuer | CVV | Luhn |
//! |--------|-----|------|
//! | Visa Electron | 3 | yes |
//! | Maestro | 3 | yes |
//! | Forbrugsforeningen | 3 | yes |
//! | Dankort | 3 | yes |
//! | Visa | 3 | yes |
//! | Mastercard | 3 | yes |
//! | American Express | 3, 4 | yes |
//! | Carte Blanche | 3 | yes |
//! | Diners Club | 3 | yes |
//! | BC Global | 3 | yes |
//! | Discover | 3 | yes |
//! | Insta Payment | 3 | yes |
//! | JCB | 3 | yes |
//! | Voyager | 3 | yes |
//! | Korean Local | 3 | yes |
//! | Solo | 3 | yes |
//! | Switch Card | 3 | yes |
//! | Laser | 3 | yes |
//! | Union Pay | 3 | no |
//!
//! Debit brands are declared before the credit brands sharing their
//! prefixes; classification is first-match-wins.
//!
//! ## Security
//!
//! - Request card number and CVV are zeroized on drop
//! - `Debug` output masks card data
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod checks;
pub mod classify;
pub mod error;
pub mod luhn;
pub mod mask;
pub mod model;
pub mod number;
pub mod pipeline;
pub mod request;

// Re-export main types at crate root
pub use catalog::{CardSpec, Catalog, CatalogError};
pub use checks::YearMonth;
pub use error::{Field, ValidationFailure};
pub use pipeline::{Pipeline, Validated};
pub use request::ValidationRequest;
