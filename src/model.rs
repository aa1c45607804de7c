//! Adapter between a model's field map and the validation pipeline.
//!
//! The surrounding framework owns attribute storage; this module maps a
//! `field name -> value` view of a model onto a [`ValidationRequest`],
//! runs the pipeline, and translates the outcome back into per-field
//! errors or write-back values. Every recognized attribute is named
//! explicitly in [`FieldBinding`] and resolved by ordinary field access
//! rather than constructed attribute names.

use crate::checks::YearMonth;
use crate::error::{Field, ValidationFailure};
use crate::pipeline::Pipeline;
use crate::request::ValidationRequest;
use std::collections::HashMap;

/// Names the model fields each card attribute is bound to.
///
/// Only the number field is required. The issuer field is write-back
/// only: detected issuers are persisted there, never read from there
/// (explicit issuers come from [`Overrides`]).
#[derive(Debug, Clone)]
pub struct FieldBinding {
    number: String,
    issuer: Option<String>,
    holder: Option<String>,
    expiry_month: Option<String>,
    expiry_year: Option<String>,
    cvv: Option<String>,
}

impl FieldBinding {
    /// Binds the card number to a field name.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            issuer: None,
            holder: None,
            expiry_month: None,
            expiry_year: None,
            cvv: None,
        }
    }

    /// Binds the issuer write-back field.
    pub fn issuer_field(mut self, name: impl Into<String>) -> Self {
        self.issuer = Some(name.into());
        self
    }

    /// Binds the holder name field.
    pub fn holder_field(mut self, name: impl Into<String>) -> Self {
        self.holder = Some(name.into());
        self
    }

    /// Binds the expiry month field.
    pub fn expiry_month_field(mut self, name: impl Into<String>) -> Self {
        self.expiry_month = Some(name.into());
        self
    }

    /// Binds the expiry year field.
    pub fn expiry_year_field(mut self, name: impl Into<String>) -> Self {
        self.expiry_year = Some(name.into());
        self
    }

    /// Binds the CVV field.
    pub fn cvv_field(mut self, name: impl Into<String>) -> Self {
        self.cvv = Some(name.into());
        self
    }

    /// The bound name for a field, falling back to the canonical
    /// attribute name when nothing is bound.
    fn bound_name(&self, field: Field) -> &str {
        let bound = match field {
            Field::Number => Some(&self.number),
            Field::Holder => self.holder.as_ref(),
            Field::ExpiryMonth => self.expiry_month.as_ref(),
            Field::ExpiryYear => self.expiry_year.as_ref(),
            Field::Cvv => self.cvv.as_ref(),
        };
        bound.map(String::as_str).unwrap_or(field.name())
    }
}

/// Explicit attribute values taking precedence over bound field values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Issuer to use instead of auto-detection.
    pub issuer: Option<String>,
    /// Holder name to check instead of the bound field's value.
    pub holder: Option<String>,
    /// Expiry month to check instead of the bound field's value.
    pub expiry_month: Option<i32>,
    /// Expiry year to check instead of the bound field's value.
    pub expiry_year: Option<i32>,
    /// CVV to check instead of the bound field's value.
    pub cvv: Option<String>,
}

/// An error to register against one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field to attach the error to.
    pub field: String,
    /// The rendered error message.
    pub message: String,
}

/// Values to write back into the model after a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdates {
    /// `(field name, new value)` pairs.
    pub values: Vec<(String, String)>,
}

/// A pipeline bound to a model's field layout.
///
/// # Example
///
/// ```
/// use cardcheck::model::{FieldBinding, ModelValidator};
/// use cardcheck::Pipeline;
/// use std::collections::HashMap;
///
/// let validator = ModelValidator::new(
///     Pipeline::new(),
///     FieldBinding::new("cardNumber")
///         .issuer_field("cardType")
///         .holder_field("cardHolder")
///         .expiry_month_field("expMonth")
///         .expiry_year_field("expYear")
///         .cvv_field("cardCvv"),
/// );
///
/// let mut values = HashMap::new();
/// values.insert("cardNumber".to_string(), "4111-1111-1111-1111".to_string());
/// values.insert("cardHolder".to_string(), "John Smith".to_string());
/// values.insert("expMonth".to_string(), "11".to_string());
/// values.insert("expYear".to_string(), "2030".to_string());
/// values.insert("cardCvv".to_string(), "123".to_string());
///
/// let updates = validator.validate(&values).unwrap();
/// assert!(updates
///     .values
///     .contains(&("cardNumber".to_string(), "4111111111111111".to_string())));
/// ```
#[derive(Debug, Clone)]
pub struct ModelValidator {
    pipeline: Pipeline,
    binding: FieldBinding,
    overrides: Overrides,
    check_holder: bool,
    check_expiry: bool,
    check_cvv: bool,
    normalize_number: bool,
    detect_issuer: bool,
    persist_issuer: bool,
}

impl ModelValidator {
    /// Binds a pipeline to a field layout with all checks enabled.
    pub fn new(pipeline: Pipeline, binding: FieldBinding) -> Self {
        Self {
            pipeline,
            binding,
            overrides: Overrides::default(),
            check_holder: true,
            check_expiry: true,
            check_cvv: true,
            normalize_number: true,
            detect_issuer: true,
            persist_issuer: true,
        }
    }

    /// Sets explicit attribute overrides.
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
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

    /// Whether to write the normalized number back into the model.
    pub fn normalize_number(mut self, enabled: bool) -> Self {
        self.normalize_number = enabled;
        self
    }

    /// Whether to auto-detect the issuer.
    pub fn detect_issuer(mut self, enabled: bool) -> Self {
        self.detect_issuer = enabled;
        self
    }

    /// Whether to write the detected issuer back into the model.
    pub fn persist_issuer(mut self, enabled: bool) -> Self {
        self.persist_issuer = enabled;
        self
    }

    /// Validates the model's field values against the system clock.
    ///
    /// A missing number field is a success with no updates: the
    /// attribute is unset, so there is nothing to validate.
    pub fn validate(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<FieldUpdates, Vec<FieldError>> {
        self.validate_at(values, YearMonth::now())
    }

    /// Validates with an explicit notion of "now" for the expiry window.
    pub fn validate_at(
        &self,
        values: &HashMap<String, String>,
        now: YearMonth,
    ) -> Result<FieldUpdates, Vec<FieldError>> {
        let Some(raw_number) = values.get(&self.binding.number) else {
            return Ok(FieldUpdates::default());
        };

        let request = self.build_request(raw_number, values);
        match self.pipeline.validate_at(&request, now) {
            Ok(validated) => {
                let mut updates = FieldUpdates::default();
                if let Some(number) = validated.number() {
                    updates
                        .values
                        .push((self.binding.number.clone(), number.to_string()));
                }
                if let (Some(issuer), Some(field)) = (validated.issuer(), &self.binding.issuer) {
                    updates.values.push((field.clone(), issuer.to_string()));
                }
                Ok(updates)
            }
            Err(failure) => Err(self.fan_out(failure)),
        }
    }

    /// Builds the per-call request: overrides win, then bound field
    /// values, then nothing.
    fn build_request(&self, raw_number: &str, values: &HashMap<String, String>) -> ValidationRequest {
        let lookup = |field: &Option<String>| {
            field
                .as_ref()
                .and_then(|name| values.get(name))
                .map(String::as_str)
        };

        let mut request = ValidationRequest::new(raw_number)
            .check_holder(self.check_holder)
            .check_expiry(self.check_expiry)
            .check_cvv(self.check_cvv)
            .normalize_number(self.normalize_number)
            .detect_issuer(self.detect_issuer)
            .persist_issuer(self.persist_issuer);

        if let Some(issuer) = &self.overrides.issuer {
            request = request.issuer(issuer.clone());
        }
        if let Some(holder) = self
            .overrides
            .holder
            .as_deref()
            .or_else(|| lookup(&self.binding.holder))
        {
            request = request.holder(holder);
        }
        let month = self
            .overrides
            .expiry_month
            .or_else(|| parse_int(lookup(&self.binding.expiry_month)));
        if let Some(month) = month {
            request = request.expiry_month(month);
        }
        let year = self
            .overrides
            .expiry_year
            .or_else(|| parse_int(lookup(&self.binding.expiry_year)));
        if let Some(year) = year {
            request = request.expiry_year(year);
        }
        if let Some(cvv) = self
            .overrides
            .cvv
            .as_deref()
            .or_else(|| lookup(&self.binding.cvv))
        {
            request = request.cvv(cvv);
        }
        request
    }

    /// Turns one failure into an error per implicated field.
    fn fan_out(&self, failure: ValidationFailure) -> Vec<FieldError> {
        let message = failure.to_string();
        failure
            .fields()
            .iter()
            .map(|&field| FieldError {
                field: self.binding.bound_name(field).to_string(),
                message: message.clone(),
            })
            .collect()
    }
}

fn parse_int(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse().ok())
}
