use json_schema_derive::ToJsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw form input, exactly as typed into the page.
///
/// Numeric fields stay strings until validation so that empty and malformed
/// input can be reported per field. Toggles accept `true`/`false`, `"1"`/`"0"`
/// or `1`/`0`, matching the radio inputs of the demo page and the JSON body
/// of a `/predict` request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FormValues {
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub store_id: String,
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub sku_id: String,
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub total_price: String,
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub base_price: String,
    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub is_featured_sku: bool,
    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub is_display_sku: bool,
}

impl FormValues {
    pub fn new(
        store_id: impl Into<String>,
        sku_id: impl Into<String>,
        total_price: impl Into<String>,
        base_price: impl Into<String>,
    ) -> Self {
        FormValues {
            store_id: store_id.into(),
            sku_id: sku_id.into(),
            total_price: total_price.into(),
            base_price: base_price.into(),
            is_featured_sku: false,
            is_display_sku: false,
        }
    }

    pub fn with_featured(mut self, is_featured_sku: bool) -> Self {
        self.is_featured_sku = is_featured_sku;
        self
    }

    pub fn with_display(mut self, is_display_sku: bool) -> Self {
        self.is_display_sku = is_display_sku;
        self
    }
}

/// A validated prediction input.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, ToJsonSchema)]
#[serde(rename_all = "snake_case")]
#[schema(
    title = "Sales Prediction Request",
    description = "Store, SKU and pricing inputs for the unit sales heuristic"
)]
pub struct PredictionRequest {
    #[schema(title = "Store ID", description = "Store identifier", exclusive_minimum = 0)]
    pub store_id: i64,
    #[schema(title = "SKU ID", description = "Stock-keeping unit identifier", exclusive_minimum = 0)]
    pub sku_id: i64,
    #[schema(title = "Total Price", description = "Shelf price charged", exclusive_minimum = 0.0)]
    pub total_price: f64,
    #[schema(
        title = "Base Price",
        description = "Undiscounted base price, must not exceed the total price",
        exclusive_minimum = 0.0
    )]
    pub base_price: f64,
    #[schema(title = "Featured SKU", description = "Promoted as a featured product")]
    pub is_featured_sku: bool,
    #[schema(title = "Display SKU", description = "Placed on an in-store display")]
    pub is_display_sku: bool,
}

impl PredictionRequest {
    pub fn price_ratio(&self) -> f64 {
        self.base_price / self.total_price
    }
}

impl From<&PredictionRequest> for FormValues {
    fn from(request: &PredictionRequest) -> Self {
        FormValues {
            store_id: request.store_id.to_string(),
            sku_id: request.sku_id.to_string(),
            total_price: request.total_price.to_string(),
            base_price: request.base_price.to_string(),
            is_featured_sku: request.is_featured_sku,
            is_display_sku: request.is_display_sku,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToggle {
    Flag(bool),
    Number(i64),
    Text(String),
}

fn deserialize_toggle<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawToggle>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawToggle::Flag(flag)) => flag,
        Some(RawToggle::Number(number)) => number == 1,
        Some(RawToggle::Text(text)) => matches!(text.trim(), "1" | "true"),
        None => false,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Integer(i64),
    Float(f64),
    Text(String),
}

// JSON clients send numbers, form posts send strings
fn deserialize_field_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawText::Integer(value)) => value.to_string(),
        Some(RawText::Float(value)) => value.to_string(),
        Some(RawText::Text(text)) => text,
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_values_from_radio_strings() {
        let form: FormValues = serde_json::from_value(json!({
            "store_id": "1",
            "sku_id": "216418",
            "total_price": "99.0375",
            "base_price": "111.8625",
            "is_featured_sku": "1",
            "is_display_sku": "0"
        }))
        .unwrap();

        assert_eq!(form.store_id, "1");
        assert_eq!(form.total_price, "99.0375");
        assert!(form.is_featured_sku);
        assert!(!form.is_display_sku);
    }

    #[test]
    fn test_form_values_from_json_numbers() {
        let form: FormValues = serde_json::from_value(json!({
            "store_id": 3,
            "sku_id": 12,
            "total_price": 10.5,
            "base_price": 8,
            "is_featured_sku": true,
            "is_display_sku": 1
        }))
        .unwrap();

        assert_eq!(form, FormValues::new("3", "12", "10.5", "8").with_featured(true).with_display(true));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let form: FormValues = serde_json::from_value(json!({ "store_id": null })).unwrap();
        assert_eq!(form, FormValues::default());
    }

    #[test]
    fn test_request_round_trips_into_form() {
        let request = PredictionRequest {
            store_id: 5,
            sku_id: 9,
            total_price: 100.0,
            base_price: 87.5,
            is_featured_sku: false,
            is_display_sku: true,
        };
        let form = FormValues::from(&request);
        assert_eq!(form.total_price, "100");
        assert_eq!(form.base_price, "87.5");
        assert!(form.is_display_sku);
        assert_eq!(request.price_ratio(), 0.875);
    }
}
