use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{FormValues, PredictionRequest, ValidationError};

/// The numeric inputs of the prediction form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    StoreId,
    SkuId,
    TotalPrice,
    BasePrice,
}

impl Field {
    /// Human label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::StoreId => "Store ID",
            Field::SkuId => "SKU ID",
            Field::TotalPrice => "Total Price",
            Field::BasePrice => "Base Price",
        }
    }

    fn raw<'a>(&self, form: &'a FormValues) -> &'a str {
        match self {
            Field::StoreId => &form.store_id,
            Field::SkuId => &form.sku_id,
            Field::TotalPrice => &form.total_price,
            Field::BasePrice => &form.base_price,
        }
    }

    fn required_message(&self) -> String {
        format!("{} is required", self.label())
    }

    fn positive_message(&self) -> String {
        format!("{} must be a positive number", self.label())
    }

    fn number_message(&self) -> String {
        format!("{} must be a valid number", self.label())
    }
}

pub const PRICE_ORDER_MESSAGE: &str = "Base Price should not exceed Total Price";

/// Outcome of checking a form: `valid` plus one message per failing field.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    fn from_errors(errors: BTreeMap<Field, String>) -> Self {
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

enum Parsed<T> {
    Missing,
    Invalid,
    Value(T),
}

impl<T> Parsed<T> {
    fn value(&self) -> Option<&T> {
        match self {
            Parsed::Value(value) => Some(value),
            _ => None,
        }
    }
}

fn digits_end(bytes: &[u8], start: usize) -> usize {
    start
        + bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
}

// Longest leading `[+-]digits` run; trailing text is ignored.
fn integer_prefix(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = digits_end(bytes, start);
    (end > start).then(|| &raw[..end])
}

// Longest leading decimal literal with optional fraction and exponent.
fn decimal_prefix(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_end(bytes, start);
    let mut end = int_end;
    let mut digits = int_end - start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_end(bytes, end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_end(bytes, end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    Some(&raw[..end])
}

fn parse_integer(raw: &str) -> Parsed<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Parsed::Missing;
    }
    match integer_prefix(raw).map(str::parse::<i64>) {
        Some(Ok(value)) => Parsed::Value(value),
        _ => Parsed::Invalid,
    }
}

fn parse_price(raw: &str) -> Parsed<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Parsed::Missing;
    }
    match decimal_prefix(raw).map(str::parse::<f64>) {
        Some(Ok(value)) if value.is_finite() => Parsed::Value(value),
        _ => Parsed::Invalid,
    }
}

// Records the presence/number/positivity message for one field, if any.
fn check_positive<T: PartialOrd + Default>(
    field: Field,
    parsed: &Parsed<T>,
    errors: &mut BTreeMap<Field, String>,
) {
    let message = match parsed {
        Parsed::Missing => field.required_message(),
        Parsed::Invalid => field.number_message(),
        Parsed::Value(value) if *value <= T::default() => field.positive_message(),
        Parsed::Value(_) => return,
    };
    errors.insert(field, message);
}

fn check(form: &FormValues) -> (BTreeMap<Field, String>, Option<PredictionRequest>) {
    let store_id = parse_integer(Field::StoreId.raw(form));
    let sku_id = parse_integer(Field::SkuId.raw(form));
    let total_price = parse_price(Field::TotalPrice.raw(form));
    let base_price = parse_price(Field::BasePrice.raw(form));

    let mut errors = BTreeMap::new();
    check_positive(Field::StoreId, &store_id, &mut errors);
    check_positive(Field::SkuId, &sku_id, &mut errors);
    check_positive(Field::TotalPrice, &total_price, &mut errors);
    check_positive(Field::BasePrice, &base_price, &mut errors);

    // Runs regardless of the positivity checks, but only on parsed prices.
    if let (Some(total), Some(base)) = (total_price.value(), base_price.value()) {
        if base > total {
            errors.insert(Field::BasePrice, PRICE_ORDER_MESSAGE.to_string());
        }
    }

    if !errors.is_empty() {
        return (errors, None);
    }

    let request = match (store_id, sku_id, total_price, base_price) {
        (
            Parsed::Value(store_id),
            Parsed::Value(sku_id),
            Parsed::Value(total_price),
            Parsed::Value(base_price),
        ) => Some(PredictionRequest {
            store_id,
            sku_id,
            total_price,
            base_price,
            is_featured_sku: form.is_featured_sku,
            is_display_sku: form.is_display_sku,
        }),
        _ => None,
    };

    (errors, request)
}

/// Checks every field and reports all violations at once.
pub fn check_form(form: &FormValues) -> ValidationReport {
    let (errors, _) = check(form);
    ValidationReport::from_errors(errors)
}

/// Validates the form and builds the request when every rule passes.
pub fn validate_form(form: &FormValues) -> Result<PredictionRequest, ValidationError> {
    match check(form) {
        (_, Some(request)) => Ok(request),
        (errors, None) => {
            warn!("Rejected prediction form: {:?}", errors);
            Err(ValidationError {
                report: ValidationReport::from_errors(errors),
            })
        }
    }
}
