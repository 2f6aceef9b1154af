pub use serde_json::{json, Value};

/// Describes a type as a JSON Schema object document.
///
/// Implemented by `#[derive(ToJsonSchema)]` from `json_schema_derive`.
pub trait ToJsonSchema {
    fn to_json_schema() -> Value;

    /// Names of the properties listed under `required`.
    fn required_fields() -> Vec<String> {
        Self::to_json_schema()["required"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|field| field.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}
